//! Frontmost application lookup through `NSWorkspace`

use objc2::rc::autoreleasepool;
use objc2_app_kit::NSWorkspace;

use crate::synth::ForegroundApp;

/// Reads the localized name of the frontmost application
pub struct Workspace;

impl ForegroundApp for Workspace {
    fn frontmost_name(&self) -> Option<String> {
        autoreleasepool(|_| {
            let workspace = unsafe { NSWorkspace::sharedWorkspace() };
            let app = unsafe { workspace.frontmostApplication() }?;
            let name = unsafe { app.localizedName() }?;
            Some(name.to_string())
        })
    }
}
