//! Chord definitions
//!
//! A chord is a set of modifier keys plus one base key. Chords are plain
//! `Copy` values; the platform layer translates them into hotkey and
//! injection codes.

use std::fmt;
use std::ops::BitOr;

/// Modifier keys held as part of a chord
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key is held
    pub control: bool,
    /// Option/Alt key is held
    pub option: bool,
    /// Command key is held
    pub command: bool,
    /// Shift key is held
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        control: false,
        option: false,
        command: false,
        shift: false,
    };
    pub const CONTROL: Modifiers = Modifiers {
        control: true,
        ..Modifiers::NONE
    };
    pub const OPTION: Modifiers = Modifiers {
        option: true,
        ..Modifiers::NONE
    };
    pub const COMMAND: Modifiers = Modifiers {
        command: true,
        ..Modifiers::NONE
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Check if no modifier is set
    pub fn is_empty(&self) -> bool {
        !self.control && !self.option && !self.command && !self.shift
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers {
            control: self.control || rhs.control,
            option: self.option || rhs.option,
            command: self.command || rhs.command,
            shift: self.shift || rhs.shift,
        }
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.control, "Ctrl"),
            (self.option, "Opt"),
            (self.command, "Cmd"),
            (self.shift, "Shift"),
        ];
        let mut first = true;
        for (held, name) in names {
            if !held {
                continue;
            }
            if !first {
                f.write_str("+")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

/// Base keys that can take part in a chord (ANSI layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    Return,
    Tab,
    Space,
    Escape,
    Delete,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Backslash,
    Grave,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Num0 => "0",
            Key::Num1 => "1",
            Key::Num2 => "2",
            Key::Num3 => "3",
            Key::Num4 => "4",
            Key::Num5 => "5",
            Key::Num6 => "6",
            Key::Num7 => "7",
            Key::Num8 => "8",
            Key::Num9 => "9",
            Key::Minus => "-",
            Key::Equal => "=",
            Key::LeftBracket => "[",
            Key::RightBracket => "]",
            Key::Semicolon => ";",
            Key::Quote => "'",
            Key::Comma => ",",
            Key::Period => ".",
            Key::Slash => "/",
            Key::Backslash => "\\",
            Key::Grave => "`",
            // Letters and named keys print as their variant name
            other => return write!(f, "{:?}", other),
        };
        f.write_str(name)
    }
}

/// Errors raised while building a chord
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChordError {
    #[error("chord on key {0} has no modifier; bare keys cannot be captured globally")]
    NoModifier(Key),
}

/// A modifier set plus one base key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    modifiers: Modifiers,
    key: Key,
}

impl Chord {
    /// Build a chord, rejecting chords without any modifier
    pub fn new(modifiers: Modifiers, key: Key) -> Result<Self, ChordError> {
        if modifiers.is_empty() {
            return Err(ChordError::NoModifier(key));
        }
        Ok(Self { modifiers, key })
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn key(&self) -> Key {
        self.key
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.modifiers, self.key)
    }
}
