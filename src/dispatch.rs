//! Per-mapping dispatch loop
//!
//! One task per mapping waits on that mapping's keydown stream and hands
//! each press to the key synthesizer.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Mapping;
use crate::hotkey::Presses;
use crate::synth::SynthHandle;

/// A registered mapping waiting for presses
#[derive(Debug)]
pub struct Listener {
    pub mapping: Arc<Mapping>,
    pub presses: Presses,
}

impl Listener {
    /// Run until the chord is unregistered
    pub async fn run(mut self, synth: SynthHandle) {
        while let Some(pressed) = self.presses.next().await {
            debug!(listen = %self.mapping.listen, id = pressed.id, "chord pressed");
            synth.submit(Arc::clone(&self.mapping));
        }

        info!(listen = %self.mapping.listen, "listener stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::events::HotkeyEvent;
    use crate::hotkey::{Chord, Key, Modifiers, PressRouter, Registrar};
    use crate::synth::{KeySynthesizer, SynthExecutor};
    use crate::testing::{FakeFacility, FixedForeground, RecordingInjector};

    fn remap(extra: Modifiers, key: Key) -> Arc<Mapping> {
        Arc::new(Mapping::new(
            Chord::new(Modifiers::CONTROL | extra, key).unwrap(),
            Chord::new(Modifiers::COMMAND | extra, key).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_shifted_and_plain_chords_fire_independently() {
        let router = PressRouter::new();
        let mut registrar = Registrar::new(FakeFacility::new(), router.clone());
        let (injector, mut emitted) = RecordingInjector::new();
        let executor =
            SynthExecutor::start(move || KeySynthesizer::new(injector, FixedForeground::none()))
                .unwrap();

        let plain = remap(Modifiers::NONE, Key::T);
        let shifted = remap(Modifiers::SHIFT, Key::T);

        let mut ids = Vec::new();
        for mapping in [&plain, &shifted] {
            let registration = registrar.register(mapping.listen).unwrap();
            ids.push(registration.handle.id());
            let listener = Listener {
                mapping: Arc::clone(mapping),
                presses: registration.presses,
            };
            tokio::spawn(listener.run(executor.handle()));
        }
        assert_ne!(ids[0], ids[1]);

        router.route(HotkeyEvent::pressed(ids[1]));
        let emission = tokio::time::timeout(Duration::from_secs(5), emitted.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(emission.chord, shifted.send);

        router.route(HotkeyEvent::pressed(ids[0]));
        let emission = tokio::time::timeout(Duration::from_secs(5), emitted.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(emission.chord, plain.send);
    }

    #[tokio::test]
    async fn test_listener_stops_when_stream_closes() {
        let router = PressRouter::new();
        let mut registrar = Registrar::new(FakeFacility::new(), router.clone());
        let (injector, _emitted) = RecordingInjector::new();
        let executor =
            SynthExecutor::start(move || KeySynthesizer::new(injector, FixedForeground::none()))
                .unwrap();

        let mapping = remap(Modifiers::NONE, Key::K);
        let registration = registrar.register(mapping.listen).unwrap();
        let listener = Listener {
            mapping,
            presses: registration.presses,
        };
        let task = tokio::spawn(listener.run(executor.handle()));

        registrar.unregister(registration.handle);
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
    }
}
