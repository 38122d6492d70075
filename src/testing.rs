//! In-memory stand-ins for the OS collaborators

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::events::HotkeyId;
use crate::hotkey::{Chord, HotkeyError, HotkeyFacility};
use crate::synth::{ForegroundApp, InjectError, KeyInjector};

#[derive(Default)]
struct FacilityState {
    bound: HashMap<Chord, HotkeyId>,
    claimed_elsewhere: HashSet<Chord>,
    next_id: HotkeyId,
    bind_calls: usize,
    unbind_calls: Vec<Chord>,
    fail_unbind: bool,
}

/// Hotkey facility that rejects duplicate binds like the OS does
#[derive(Clone, Default)]
pub struct FakeFacility {
    state: Arc<Mutex<FacilityState>>,
}

impl FakeFacility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend another process already owns `chord`
    pub fn claim_elsewhere(&self, chord: Chord) {
        self.state.lock().unwrap().claimed_elsewhere.insert(chord);
    }

    pub fn fail_unbind(&self, fail: bool) {
        self.state.lock().unwrap().fail_unbind = fail;
    }

    /// Currently bound chords, ordered by id
    pub fn bound(&self) -> Vec<Chord> {
        let state = self.state.lock().unwrap();
        let mut bound: Vec<_> = state.bound.iter().map(|(c, id)| (*id, *c)).collect();
        bound.sort_by_key(|(id, _)| *id);
        bound.into_iter().map(|(_, chord)| chord).collect()
    }

    pub fn bind_calls(&self) -> usize {
        self.state.lock().unwrap().bind_calls
    }

    pub fn unbind_calls(&self) -> Vec<Chord> {
        self.state.lock().unwrap().unbind_calls.clone()
    }
}

impl HotkeyFacility for FakeFacility {
    fn bind(&self, chord: &Chord) -> Result<HotkeyId, HotkeyError> {
        let mut state = self.state.lock().unwrap();
        state.bind_calls += 1;

        if state.bound.contains_key(chord) || state.claimed_elsewhere.contains(chord) {
            return Err(HotkeyError::Rejected {
                chord: *chord,
                reason: "chord already taken".to_string(),
            });
        }

        state.next_id += 1;
        let id = state.next_id;
        state.bound.insert(*chord, id);
        Ok(id)
    }

    fn unbind(&self, chord: &Chord) -> Result<(), HotkeyError> {
        let mut state = self.state.lock().unwrap();
        state.unbind_calls.push(*chord);

        if state.fail_unbind {
            return Err(HotkeyError::UnregisterFailed {
                chord: *chord,
                reason: "simulated failure".to_string(),
            });
        }

        state.bound.remove(chord);
        Ok(())
    }
}

/// One chord handed to the injector
#[derive(Debug, Clone)]
pub struct Emission {
    pub chord: Chord,
    /// Name of the thread the injection ran on
    pub thread: Option<String>,
}

/// Injector that reports every emitted chord on a channel
#[derive(Clone)]
pub struct RecordingInjector {
    tx: mpsc::UnboundedSender<Emission>,
    fail: Arc<AtomicBool>,
}

impl RecordingInjector {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Emission>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let injector = Self {
            tx,
            fail: Arc::new(AtomicBool::new(false)),
        };
        (injector, rx)
    }

    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl KeyInjector for RecordingInjector {
    fn emit(&self, chord: &Chord) -> Result<(), InjectError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(InjectError::EventCreation(*chord));
        }

        let _ = self.tx.send(Emission {
            chord: *chord,
            thread: std::thread::current().name().map(str::to_string),
        });
        Ok(())
    }
}

/// Foreground application that never changes
#[derive(Clone)]
pub struct FixedForeground(Option<String>);

impl FixedForeground {
    pub fn named(name: &str) -> Self {
        Self(Some(name.to_string()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl ForegroundApp for FixedForeground {
    fn frontmost_name(&self) -> Option<String> {
        self.0.clone()
    }
}
