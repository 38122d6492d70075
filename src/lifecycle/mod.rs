//! Process lifecycle: registration, signal wait, unregistration

mod controller;
mod shutdown;

pub use controller::{Lifecycle, LifecycleError, Phase};
pub use shutdown::{Shutdown, ShutdownSignal};
