//! Fan-out from the facility's single event callback to per-chord listeners
//!
//! The callback runs on the AppKit main thread and must not block, so every
//! listener gets an unbounded channel.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::events::{HotkeyEvent, HotkeyId, KeyState, Pressed};

/// Routes raw hotkey events to the listener registered for each id
#[derive(Clone, Default)]
pub struct PressRouter {
    routes: Arc<RwLock<HashMap<HotkeyId, mpsc::UnboundedSender<Pressed>>>>,
}

/// Keydown notifications for one registered chord
///
/// The stream ends once the chord is unregistered.
#[derive(Debug)]
pub struct Presses {
    rx: mpsc::UnboundedReceiver<Pressed>,
}

impl Presses {
    /// Wait for the next keydown
    pub async fn next(&mut self) -> Option<Pressed> {
        self.rx.recv().await
    }
}

impl PressRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the notification stream for `id`, replacing any previous one
    pub fn subscribe(&self, id: HotkeyId) -> Presses {
        let (tx, rx) = mpsc::unbounded_channel();
        match self.routes.write() {
            Ok(mut routes) => {
                routes.insert(id, tx);
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(id, tx);
            }
        }
        Presses { rx }
    }

    /// Close the notification stream for `id`
    pub fn unsubscribe(&self, id: HotkeyId) {
        match self.routes.write() {
            Ok(mut routes) => {
                routes.remove(&id);
            }
            Err(poisoned) => {
                poisoned.into_inner().remove(&id);
            }
        }
    }

    /// Deliver a raw event. Key-up events are dropped.
    pub fn route(&self, event: HotkeyEvent) {
        if event.state != KeyState::Pressed {
            return;
        }

        let routes = match self.routes.read() {
            Ok(routes) => routes,
            Err(poisoned) => poisoned.into_inner(),
        };

        match routes.get(&event.id) {
            Some(tx) => {
                debug!(%event, "routing hotkey press");
                if tx.send(Pressed { id: event.id }).is_err() {
                    warn!(id = event.id, "listener gone, dropping press");
                }
            }
            None => {
                debug!(%event, "press for unknown hotkey id");
            }
        }
    }
}
