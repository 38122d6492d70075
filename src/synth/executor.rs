//! Single OS thread that owns every foreground query and key injection
//!
//! AppKit and CoreGraphics objects are created and used on this thread
//! only. Requests from all dispatch tasks are queued here.

use std::sync::Arc;
use std::thread;

use tokio::sync::mpsc;
use tracing::{info, warn};

use super::synthesizer::{ForegroundApp, KeyInjector, KeySynthesizer};
use crate::config::Mapping;

const THREAD_NAME: &str = "key-synth";

/// Owns the synthesizer thread
pub struct SynthExecutor {
    tx: mpsc::UnboundedSender<Arc<Mapping>>,
    worker: thread::JoinHandle<()>,
}

/// Cheap handle for submitting pressed mappings
#[derive(Clone)]
pub struct SynthHandle {
    tx: mpsc::UnboundedSender<Arc<Mapping>>,
}

impl SynthExecutor {
    /// Start the executor thread
    ///
    /// `make` runs on the new thread, so the synthesizer it builds never
    /// has to be `Send`.
    pub fn start<M, I, F>(make: M) -> std::io::Result<Self>
    where
        M: FnOnce() -> KeySynthesizer<I, F> + Send + 'static,
        I: KeyInjector + 'static,
        F: ForegroundApp + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Arc<Mapping>>();

        let worker = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || {
                let synthesizer = make();
                info!("key synthesizer thread started");

                while let Some(mapping) = rx.blocking_recv() {
                    synthesizer.synthesize(&mapping);
                }

                info!("key synthesizer thread stopped");
            })?;

        Ok(Self { tx, worker })
    }

    pub fn handle(&self) -> SynthHandle {
        SynthHandle {
            tx: self.tx.clone(),
        }
    }

    /// Stop accepting work and wait for queued requests to drain
    ///
    /// Handles still held elsewhere keep the thread alive until dropped.
    pub fn join(self) {
        drop(self.tx);
        if self.worker.join().is_err() {
            warn!("key synthesizer thread panicked");
        }
    }
}

impl SynthHandle {
    /// Queue a pressed mapping; never blocks
    pub fn submit(&self, mapping: Arc<Mapping>) {
        if self.tx.send(mapping).is_err() {
            warn!("key synthesizer stopped, dropping press");
        }
    }
}
