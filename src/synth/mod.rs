//! Key synthesis
//!
//! Decides between the send chord and a pass-through of the listen chord,
//! then injects it from a dedicated OS thread.

mod executor;
mod synthesizer;

pub use executor::{SynthExecutor, SynthHandle};
pub use synthesizer::{resolve_chord, ForegroundApp, InjectError, KeyInjector, KeySynthesizer};
