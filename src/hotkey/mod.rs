//! Hotkey module for global chord capture
//!
//! Chords are registered with an OS facility; keydown events are routed to
//! one notification stream per registration.

mod keys;
mod registrar;
mod router;

pub use keys::{Chord, ChordError, Key, Modifiers};
pub use registrar::{HotkeyError, HotkeyFacility, Registrar, Registration, RegistrationHandle};
pub use router::{PressRouter, Presses};
