//! Lifecycle controller
//!
//! Drives the process through Idle, Registering, Running, Unregistering and
//! Stopped. Registration failures abort startup; unregistration is best
//! effort.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::config::Mapping;
use crate::dispatch::Listener;
use crate::hotkey::{HotkeyError, HotkeyFacility, Registrar, RegistrationHandle};

/// Lifecycle phases, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Registering,
    Running,
    Unregistering,
    Stopped,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "Idle"),
            Phase::Registering => write!(f, "Registering"),
            Phase::Running => write!(f, "Running"),
            Phase::Unregistering => write!(f, "Unregistering"),
            Phase::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Errors raised by the lifecycle controller
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("cannot {action} while {phase}")]
    InvalidTransition { action: &'static str, phase: Phase },

    #[error("failed to register hotkey")]
    Registration(#[from] HotkeyError),
}

/// Owns the registrar and every live registration handle
pub struct Lifecycle<F> {
    phase: Phase,
    registrar: Registrar<F>,
    handles: Vec<RegistrationHandle>,
}

impl<F: HotkeyFacility> Lifecycle<F> {
    pub fn new(registrar: Registrar<F>) -> Self {
        Self {
            phase: Phase::Idle,
            registrar,
            handles: Vec::new(),
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Register every mapping, in order
    ///
    /// Stops at the first failure and leaves the controller in
    /// `Registering`; the caller is expected to abort.
    pub fn register_all(
        &mut self,
        mappings: &[Arc<Mapping>],
    ) -> Result<Vec<Listener>, LifecycleError> {
        self.require(Phase::Idle, "register")?;
        self.transition_to(Phase::Registering);

        let mut listeners = Vec::with_capacity(mappings.len());
        for mapping in mappings {
            let registration = self.registrar.register(mapping.listen)?;
            self.handles.push(registration.handle);
            listeners.push(Listener {
                mapping: Arc::clone(mapping),
                presses: registration.presses,
            });
        }

        self.transition_to(Phase::Running);
        Ok(listeners)
    }

    /// Unregister everything registered by [`Lifecycle::register_all`]
    ///
    /// Each handle is released exactly once; failures are logged by the
    /// registrar and do not stop the rest. Returns how many chords were
    /// released.
    pub fn unregister_all(&mut self) -> Result<usize, LifecycleError> {
        self.require(Phase::Running, "unregister")?;
        self.transition_to(Phase::Unregistering);

        let handles = std::mem::take(&mut self.handles);
        let released = handles.len();
        for handle in handles {
            self.registrar.unregister(handle);
        }

        self.transition_to(Phase::Stopped);
        Ok(released)
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<(), LifecycleError> {
        if self.phase != phase {
            return Err(LifecycleError::InvalidTransition {
                action,
                phase: self.phase,
            });
        }
        Ok(())
    }

    fn transition_to(&mut self, next: Phase) {
        info!(from = %self.phase, to = %next, "lifecycle transition");
        self.phase = next;
    }
}
