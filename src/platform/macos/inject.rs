//! Synthetic key events posted at the HID tap

use core_graphics::event::{CGEvent, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

use super::keycodes;
use crate::hotkey::Chord;
use crate::synth::{InjectError, KeyInjector};

/// Posts key-down/key-up pairs with the chord's modifier flags set
pub struct EventInjector;

impl KeyInjector for EventInjector {
    fn emit(&self, chord: &Chord) -> Result<(), InjectError> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|_| InjectError::EventSource)?;
        let keycode = keycodes::virtual_keycode(chord.key());
        let flags = keycodes::event_flags(chord.modifiers());

        // Build both events before posting so a failure never leaves a key down
        let mut events = Vec::with_capacity(2);
        for keydown in [true, false] {
            let event = CGEvent::new_keyboard_event(source.clone(), keycode, keydown)
                .map_err(|_| InjectError::EventCreation(*chord))?;
            event.set_flags(flags);
            events.push(event);
        }

        for event in events {
            event.post(CGEventTapLocation::HID);
        }
        Ok(())
    }
}
