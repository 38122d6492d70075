//! Translation of chords into macOS key codes and hotkey definitions

use core_graphics::event::{CGEventFlags, CGKeyCode};
use global_hotkey::hotkey::{Code, HotKey, Modifiers as HotKeyModifiers};

use crate::hotkey::{Chord, Key, Modifiers};

/// ANSI virtual key code (`kVK_ANSI_*` / `kVK_*`)
pub fn virtual_keycode(key: Key) -> CGKeyCode {
    match key {
        Key::A => 0,
        Key::S => 1,
        Key::D => 2,
        Key::F => 3,
        Key::H => 4,
        Key::G => 5,
        Key::Z => 6,
        Key::X => 7,
        Key::C => 8,
        Key::V => 9,
        Key::B => 11,
        Key::Q => 12,
        Key::W => 13,
        Key::E => 14,
        Key::R => 15,
        Key::Y => 16,
        Key::T => 17,
        Key::Num1 => 18,
        Key::Num2 => 19,
        Key::Num3 => 20,
        Key::Num4 => 21,
        Key::Num6 => 22,
        Key::Num5 => 23,
        Key::Equal => 24,
        Key::Num9 => 25,
        Key::Num7 => 26,
        Key::Minus => 27,
        Key::Num8 => 28,
        Key::Num0 => 29,
        Key::RightBracket => 30,
        Key::O => 31,
        Key::U => 32,
        Key::LeftBracket => 33,
        Key::I => 34,
        Key::P => 35,
        Key::Return => 36,
        Key::L => 37,
        Key::J => 38,
        Key::Quote => 39,
        Key::K => 40,
        Key::Semicolon => 41,
        Key::Backslash => 42,
        Key::Comma => 43,
        Key::Slash => 44,
        Key::N => 45,
        Key::M => 46,
        Key::Period => 47,
        Key::Tab => 48,
        Key::Space => 49,
        Key::Grave => 50,
        Key::Delete => 51,
        Key::Escape => 53,
    }
}

/// Event flags to stamp on injected key events
pub fn event_flags(modifiers: Modifiers) -> CGEventFlags {
    let mut flags = CGEventFlags::empty();
    if modifiers.control {
        flags |= CGEventFlags::CGEventFlagControl;
    }
    if modifiers.option {
        flags |= CGEventFlags::CGEventFlagAlternate;
    }
    if modifiers.command {
        flags |= CGEventFlags::CGEventFlagCommand;
    }
    if modifiers.shift {
        flags |= CGEventFlags::CGEventFlagShift;
    }
    flags
}

fn hotkey_code(key: Key) -> Code {
    match key {
        Key::A => Code::KeyA,
        Key::B => Code::KeyB,
        Key::C => Code::KeyC,
        Key::D => Code::KeyD,
        Key::E => Code::KeyE,
        Key::F => Code::KeyF,
        Key::G => Code::KeyG,
        Key::H => Code::KeyH,
        Key::I => Code::KeyI,
        Key::J => Code::KeyJ,
        Key::K => Code::KeyK,
        Key::L => Code::KeyL,
        Key::M => Code::KeyM,
        Key::N => Code::KeyN,
        Key::O => Code::KeyO,
        Key::P => Code::KeyP,
        Key::Q => Code::KeyQ,
        Key::R => Code::KeyR,
        Key::S => Code::KeyS,
        Key::T => Code::KeyT,
        Key::U => Code::KeyU,
        Key::V => Code::KeyV,
        Key::W => Code::KeyW,
        Key::X => Code::KeyX,
        Key::Y => Code::KeyY,
        Key::Z => Code::KeyZ,
        Key::Num0 => Code::Digit0,
        Key::Num1 => Code::Digit1,
        Key::Num2 => Code::Digit2,
        Key::Num3 => Code::Digit3,
        Key::Num4 => Code::Digit4,
        Key::Num5 => Code::Digit5,
        Key::Num6 => Code::Digit6,
        Key::Num7 => Code::Digit7,
        Key::Num8 => Code::Digit8,
        Key::Num9 => Code::Digit9,
        Key::Return => Code::Enter,
        Key::Tab => Code::Tab,
        Key::Space => Code::Space,
        Key::Escape => Code::Escape,
        Key::Delete => Code::Backspace,
        Key::Minus => Code::Minus,
        Key::Equal => Code::Equal,
        Key::LeftBracket => Code::BracketLeft,
        Key::RightBracket => Code::BracketRight,
        Key::Semicolon => Code::Semicolon,
        Key::Quote => Code::Quote,
        Key::Comma => Code::Comma,
        Key::Period => Code::Period,
        Key::Slash => Code::Slash,
        Key::Backslash => Code::Backslash,
        Key::Grave => Code::Backquote,
    }
}

/// Carbon hotkey definition for a listen chord
///
/// The id is derived from the chord, so the same chord always maps to the
/// same hotkey.
pub fn hotkey(chord: &Chord) -> HotKey {
    let modifiers = chord.modifiers();
    let mut mods = HotKeyModifiers::empty();
    if modifiers.control {
        mods |= HotKeyModifiers::CONTROL;
    }
    if modifiers.option {
        mods |= HotKeyModifiers::ALT;
    }
    if modifiers.command {
        mods |= HotKeyModifiers::SUPER;
    }
    if modifiers.shift {
        mods |= HotKeyModifiers::SHIFT;
    }
    HotKey::new(Some(mods), hotkey_code(chord.key()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_keycodes() {
        assert_eq!(virtual_keycode(Key::C), 8);
        assert_eq!(virtual_keycode(Key::V), 9);
        assert_eq!(virtual_keycode(Key::X), 7);
    }

    #[test]
    fn test_event_flags() {
        let flags = event_flags(Modifiers::COMMAND | Modifiers::SHIFT);
        assert!(flags.contains(CGEventFlags::CGEventFlagCommand));
        assert!(flags.contains(CGEventFlags::CGEventFlagShift));
        assert!(!flags.contains(CGEventFlags::CGEventFlagControl));
    }

    #[test]
    fn test_hotkey_ids_distinguish_shift() {
        let plain = Chord::new(Modifiers::CONTROL, Key::T).unwrap();
        let shifted = Chord::new(Modifiers::CONTROL | Modifiers::SHIFT, Key::T).unwrap();
        assert_ne!(hotkey(&plain).id(), hotkey(&shifted).id());
        assert_eq!(hotkey(&plain).id(), hotkey(&plain).id());
    }
}
