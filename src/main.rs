//! chordmap: Background daemon that remaps Ctrl chords to Cmd chords on macOS
//!
//! The daemon:
//! - Registers every chord in the compiled-in table as a global hotkey
//! - On each press, checks the frontmost application and either emits the
//!   mapped Cmd chord or passes the original Ctrl chord through
//! - Unregisters everything on SIGINT/SIGTERM and exits

#![cfg_attr(not(target_os = "macos"), allow(dead_code))]

mod config;
mod dispatch;
mod events;
mod hotkey;
mod lifecycle;
mod platform;
mod synth;

#[cfg(test)]
mod testing;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "chordmap starting");

    let config = Config::load()?;
    info!(mappings = config.mappings.len(), "configuration loaded");

    run(config)?;

    info!("chordmap stopped");
    Ok(())
}

#[cfg(target_os = "macos")]
fn run(config: Config) -> Result<()> {
    use std::sync::atomic::Ordering;

    use anyhow::Context;
    use tracing::{error, warn};

    use crate::hotkey::{PressRouter, Registrar};
    use crate::lifecycle::{Lifecycle, ShutdownSignal};
    use crate::platform::macos;
    use crate::synth::{KeySynthesizer, SynthExecutor};

    if !macos::accessibility_trusted() {
        warn!("Accessibility permission not granted - key injection will fail");
    }

    // AppKit and the Carbon hotkey manager stay on this thread; the
    // listeners and the signal watcher run on the runtime's workers
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("chordmap-worker")
        .build()
        .context("failed to build async runtime")?;

    let main_loop = macos::MainLoop::new()?;
    let router = PressRouter::new();
    let facility = macos::CarbonHotkeys::new()?;
    macos::forward_presses(router.clone());

    info!("registering handlers");
    let mut lifecycle = Lifecycle::new(Registrar::new(facility, router));
    let listeners = lifecycle.register_all(&config.mappings)?;
    info!(count = listeners.len(), "handlers registered");

    let synth = SynthExecutor::start(|| KeySynthesizer::new(macos::EventInjector, macos::Workspace))
        .context("failed to start key synthesizer thread")?;

    for listener in listeners {
        runtime.spawn(listener.run(synth.handle()));
    }

    let running = main_loop.running();
    runtime.spawn(async move {
        match ShutdownSignal::new().wait().await {
            Ok(signal) => info!(%signal, "shutdown signal received"),
            Err(e) => error!(%e, "failed to install signal handlers, shutting down"),
        }
        running.store(false, Ordering::SeqCst);
    });

    main_loop.run();

    info!("unregistering handlers");
    let released = lifecycle.unregister_all()?;
    info!(count = released, "handlers unregistered");

    runtime.shutdown_background();
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn run(_config: Config) -> Result<()> {
    anyhow::bail!("chordmap only runs on macOS")
}
