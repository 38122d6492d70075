//! Chooses and emits the chord for a pressed mapping

use tracing::{debug, error};

use crate::config::Mapping;
use crate::hotkey::Chord;

/// Errors raised while injecting a synthetic chord
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("failed to create input event source")]
    EventSource,

    #[error("failed to create key event for {0}")]
    EventCreation(Chord),
}

/// OS service that posts synthetic key events
pub trait KeyInjector {
    /// Set the chord's modifier flags, then press and release its key
    fn emit(&self, chord: &Chord) -> Result<(), InjectError>;
}

/// OS service that reports which application has focus
pub trait ForegroundApp {
    /// Display name of the frontmost application, if any
    fn frontmost_name(&self) -> Option<String>;
}

/// Pick the chord to emit for `mapping` given the frontmost application
///
/// Skipped applications get the listen chord back verbatim.
pub fn resolve_chord<'a>(mapping: &'a Mapping, frontmost: Option<&str>) -> &'a Chord {
    match frontmost {
        Some(app) if mapping.skips(app) => &mapping.listen,
        _ => &mapping.send,
    }
}

/// Resolves and injects chords through the OS collaborators
pub struct KeySynthesizer<I, F> {
    injector: I,
    foreground: F,
}

impl<I: KeyInjector, F: ForegroundApp> KeySynthesizer<I, F> {
    pub fn new(injector: I, foreground: F) -> Self {
        Self {
            injector,
            foreground,
        }
    }

    /// Emit the chord for a pressed mapping
    ///
    /// Returns the chord that was emitted, or `None` if injection failed.
    /// Failures are logged and the event is dropped.
    pub fn synthesize(&self, mapping: &Mapping) -> Option<Chord> {
        let frontmost = self.foreground.frontmost_name();
        let chord = *resolve_chord(mapping, frontmost.as_deref());

        debug!(
            listen = %mapping.listen,
            emit = %chord,
            app = frontmost.as_deref().unwrap_or("<none>"),
            "synthesizing chord"
        );

        match self.injector.emit(&chord) {
            Ok(()) => Some(chord),
            Err(e) => {
                error!(%e, %chord, "failed to inject chord");
                None
            }
        }
    }
}
