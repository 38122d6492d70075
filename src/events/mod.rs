//! Events module for hotkey notifications
//!
//! Raw events come from the OS hotkey facility; listeners only ever see
//! `Pressed`.

use std::fmt;

/// Identifier the hotkey facility assigns to a registered chord
pub type HotkeyId = u32;

/// Whether a registered chord went down or came back up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Raw event delivered by the hotkey facility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyEvent {
    pub id: HotkeyId,
    pub state: KeyState,
}

impl HotkeyEvent {
    pub fn pressed(id: HotkeyId) -> Self {
        Self {
            id,
            state: KeyState::Pressed,
        }
    }

    pub fn released(id: HotkeyId) -> Self {
        Self {
            id,
            state: KeyState::Released,
        }
    }
}

/// A registered chord was pressed (keydown)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pressed {
    pub id: HotkeyId,
}

impl fmt::Display for HotkeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            KeyState::Pressed => write!(f, "HOTKEY_PRESSED ({})", self.id),
            KeyState::Released => write!(f, "HOTKEY_RELEASED ({})", self.id),
        }
    }
}
