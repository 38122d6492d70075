//! Carbon global hotkeys through `global-hotkey`
//!
//! The manager must be created on the main thread, and its events are only
//! delivered while the main thread pumps AppKit events (see `run_loop`).

use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tracing::debug;

use super::keycodes;
use crate::events::{HotkeyEvent, HotkeyId, KeyState};
use crate::hotkey::{Chord, HotkeyError, HotkeyFacility, PressRouter};

/// System-wide hotkey registration backed by the Carbon event manager
pub struct CarbonHotkeys {
    manager: GlobalHotKeyManager,
}

impl CarbonHotkeys {
    pub fn new() -> Result<Self, HotkeyError> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| HotkeyError::Unavailable(e.to_string()))?;
        Ok(Self { manager })
    }
}

impl HotkeyFacility for CarbonHotkeys {
    fn bind(&self, chord: &Chord) -> Result<HotkeyId, HotkeyError> {
        let hotkey = keycodes::hotkey(chord);
        let id = hotkey.id();
        self.manager
            .register(hotkey)
            .map_err(|e| HotkeyError::Rejected {
                chord: *chord,
                reason: e.to_string(),
            })?;
        Ok(id)
    }

    fn unbind(&self, chord: &Chord) -> Result<(), HotkeyError> {
        self.manager
            .unregister(keycodes::hotkey(chord))
            .map_err(|e| HotkeyError::UnregisterFailed {
                chord: *chord,
                reason: e.to_string(),
            })
    }
}

/// Send every hotkey event the facility delivers through `router`
pub fn forward_presses(router: PressRouter) {
    GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
        let state = match event.state() {
            HotKeyState::Pressed => KeyState::Pressed,
            _ => KeyState::Released,
        };
        let event = HotkeyEvent {
            id: event.id(),
            state,
        };
        debug!(%event, "hotkey event");
        router.route(event);
    }));
}
