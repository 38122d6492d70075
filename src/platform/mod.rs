//! OS collaborators
//!
//! Only macOS is supported; elsewhere the daemon refuses to start.

#[cfg(target_os = "macos")]
pub mod macos;
