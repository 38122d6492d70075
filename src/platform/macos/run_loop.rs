//! Main-thread AppKit event pump
//!
//! Carbon hotkey events reach their handler only while the main thread
//! dispatches AppKit events. The pump runs until its running flag is
//! cleared from another thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use objc2::rc::{autoreleasepool, Retained};
use objc2::MainThreadMarker;
use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy, NSEventMask};
use objc2_foundation::{NSDate, NSDefaultRunLoopMode};
use tracing::info;

use super::PlatformError;

/// How long one pump iteration waits for an event before rechecking the flag
const POLL_INTERVAL_SECS: f64 = 0.1;

pub struct MainLoop {
    app: Retained<NSApplication>,
    running: Arc<AtomicBool>,
}

impl MainLoop {
    /// Set up a background (no Dock icon) application on the main thread
    pub fn new() -> Result<Self, PlatformError> {
        let mtm = MainThreadMarker::new().ok_or(PlatformError::NotMainThread)?;
        let app = NSApplication::sharedApplication(mtm);
        unsafe {
            app.setActivationPolicy(NSApplicationActivationPolicy::Prohibited);
            app.finishLaunching();
        }

        Ok(Self {
            app,
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    /// Flag that keeps the pump alive; store `false` to stop it
    pub fn running(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    /// Dispatch AppKit events until the running flag is cleared
    pub fn run(&self) {
        info!("main event loop running");

        while self.running.load(Ordering::SeqCst) {
            autoreleasepool(|_| {
                let event = unsafe {
                    let until = NSDate::dateWithTimeIntervalSinceNow(POLL_INTERVAL_SECS);
                    self.app.nextEventMatchingMask_untilDate_inMode_dequeue(
                        NSEventMask::Any,
                        Some(&until),
                        NSDefaultRunLoopMode,
                        true,
                    )
                };
                if let Some(event) = event {
                    unsafe { self.app.sendEvent(&event) };
                }
            });
        }

        info!("main event loop stopped");
    }
}
