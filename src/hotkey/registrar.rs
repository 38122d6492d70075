//! Registration of listen chords with the OS hotkey facility

use std::collections::HashMap;

use tracing::{info, warn};

use super::keys::Chord;
use super::router::{PressRouter, Presses};
use crate::events::HotkeyId;

/// Errors that can occur while binding or unbinding chords
#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("chord {0} is already registered by this process")]
    AlreadyRegistered(Chord),

    #[error("hotkey facility rejected {chord}: {reason}")]
    Rejected { chord: Chord, reason: String },

    #[error("failed to unregister {chord}: {reason}")]
    UnregisterFailed { chord: Chord, reason: String },

    #[error("hotkey facility unavailable: {0}")]
    Unavailable(String),
}

/// OS service that captures chords system-wide
///
/// Press events are delivered out of band, through a [`PressRouter`] that the
/// platform layer wires to the facility's callback.
pub trait HotkeyFacility {
    /// Bind `chord` and return the id its press events will carry
    fn bind(&self, chord: &Chord) -> Result<HotkeyId, HotkeyError>;

    /// Release a chord previously bound with [`HotkeyFacility::bind`]
    fn unbind(&self, chord: &Chord) -> Result<(), HotkeyError>;
}

/// Proof that a chord is currently registered
///
/// Not `Clone`: [`Registrar::unregister`] consumes it, so each registration
/// is released at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct RegistrationHandle {
    id: HotkeyId,
    chord: Chord,
}

impl RegistrationHandle {
    pub fn id(&self) -> HotkeyId {
        self.id
    }

    pub fn chord(&self) -> Chord {
        self.chord
    }
}

/// A live registration plus its keydown stream
#[derive(Debug)]
pub struct Registration {
    pub handle: RegistrationHandle,
    pub presses: Presses,
}

/// Registers chords and tracks which ones this process owns
pub struct Registrar<F> {
    facility: F,
    router: PressRouter,
    active: HashMap<HotkeyId, Chord>,
}

impl<F: HotkeyFacility> Registrar<F> {
    pub fn new(facility: F, router: PressRouter) -> Self {
        Self {
            facility,
            router,
            active: HashMap::new(),
        }
    }

    /// Register a chord and open its notification stream
    pub fn register(&mut self, chord: Chord) -> Result<Registration, HotkeyError> {
        if self.active.values().any(|owned| *owned == chord) {
            return Err(HotkeyError::AlreadyRegistered(chord));
        }

        let id = self.facility.bind(&chord)?;
        let presses = self.router.subscribe(id);
        self.active.insert(id, chord);

        info!(%chord, id, "hotkey registered");

        Ok(Registration {
            handle: RegistrationHandle { id, chord },
            presses,
        })
    }

    /// Unregister a chord, best effort
    ///
    /// The notification stream is closed even if the facility fails to
    /// release the chord.
    pub fn unregister(&mut self, handle: RegistrationHandle) {
        self.router.unsubscribe(handle.id);
        self.active.remove(&handle.id);

        match self.facility.unbind(&handle.chord) {
            Ok(()) => info!(chord = %handle.chord, id = handle.id, "hotkey unregistered"),
            Err(e) => warn!(%e, chord = %handle.chord, "failed to unregister hotkey"),
        }
    }

    /// Number of chords currently owned by this process
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{HotkeyEvent, Pressed};
    use crate::hotkey::keys::{Key, Modifiers};
    use crate::testing::FakeFacility;
    use tokio_test::{assert_err, assert_ok};

    fn ctrl(key: Key) -> Chord {
        Chord::new(Modifiers::CONTROL, key).unwrap()
    }

    #[test]
    fn test_register_binds_chord() {
        let facility = FakeFacility::new();
        let mut registrar = Registrar::new(facility.clone(), PressRouter::new());

        let registration = assert_ok!(registrar.register(ctrl(Key::C)));
        assert_eq!(registration.handle.chord(), ctrl(Key::C));
        assert_eq!(facility.bound(), vec![ctrl(Key::C)]);
        assert_eq!(registrar.active_count(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let facility = FakeFacility::new();
        let mut registrar = Registrar::new(facility.clone(), PressRouter::new());

        assert_ok!(registrar.register(ctrl(Key::C)));
        let err = assert_err!(registrar.register(ctrl(Key::C)));
        assert!(matches!(err, HotkeyError::AlreadyRegistered(chord) if chord == ctrl(Key::C)));

        // The facility was only asked once
        assert_eq!(facility.bind_calls(), 1);
    }

    #[test]
    fn test_facility_rejection_is_surfaced() {
        let facility = FakeFacility::new();
        facility.claim_elsewhere(ctrl(Key::K));
        let mut registrar = Registrar::new(facility, PressRouter::new());

        let err = assert_err!(registrar.register(ctrl(Key::K)));
        assert!(matches!(err, HotkeyError::Rejected { .. }));
        assert_eq!(registrar.active_count(), 0);
    }

    #[test]
    fn test_chord_can_be_registered_again_after_unregister() {
        let facility = FakeFacility::new();
        let mut registrar = Registrar::new(facility.clone(), PressRouter::new());

        let registration = assert_ok!(registrar.register(ctrl(Key::R)));
        registrar.unregister(registration.handle);
        assert_ok!(registrar.register(ctrl(Key::R)));
        assert_eq!(facility.unbind_calls(), vec![ctrl(Key::R)]);
    }

    #[tokio::test]
    async fn test_unregister_failure_still_closes_stream() {
        let facility = FakeFacility::new();
        facility.fail_unbind(true);
        let router = PressRouter::new();
        let mut registrar = Registrar::new(facility.clone(), router.clone());

        let Registration { handle, mut presses } = assert_ok!(registrar.register(ctrl(Key::W)));
        let id = handle.id();
        router.route(HotkeyEvent::pressed(id));
        registrar.unregister(handle);

        assert_eq!(presses.next().await, Some(Pressed { id }));
        assert_eq!(presses.next().await, None);
        assert_eq!(registrar.active_count(), 0);
        assert_eq!(facility.unbind_calls(), vec![ctrl(Key::W)]);
    }
}
