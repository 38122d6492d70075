//! macOS collaborators
//!
//! - Hotkeys: Carbon via `global-hotkey`, main thread only
//! - Injection: `CGEventPost` at the HID tap (needs Accessibility permission)
//! - Foreground app: `NSWorkspace.frontmostApplication`

mod hotkeys;
mod inject;
mod keycodes;
mod run_loop;
mod workspace;

pub use hotkeys::{forward_presses, CarbonHotkeys};
pub use inject::EventInjector;
pub use run_loop::MainLoop;
pub use workspace::Workspace;

type Boolean = u8;

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXIsProcessTrusted() -> Boolean;
}

/// Whether this process may post synthetic input
pub fn accessibility_trusted() -> bool {
    unsafe { AXIsProcessTrusted() != 0 }
}

/// Errors raised while setting up the platform layer
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("must be started on the main thread")]
    NotMainThread,
}
