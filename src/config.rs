//! Configuration loading and management
//!
//! The mapping table is compiled in; `Config::load` only validates it.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::hotkey::{Chord, ChordError, Key, Modifiers};

/// Terminal emulators that expect the Ctrl chords untouched
const TERMINALS: &[&str] = &["kitty"];

/// One remap: pressing `listen` emits `send` unless a skipped app is in front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub listen: Chord,
    pub send: Chord,
    pub skip_apps: Vec<String>,
}

impl Mapping {
    pub fn new(listen: Chord, send: Chord) -> Self {
        Self {
            listen,
            send,
            skip_apps: Vec::new(),
        }
    }

    /// Leave the chord alone while one of `apps` is frontmost
    pub fn skip_in(mut self, apps: &[&str]) -> Self {
        self.skip_apps = apps.iter().map(|app| app.to_string()).collect();
        self
    }

    /// Check whether `app` is on this mapping's skip-list (exact match)
    pub fn skips(&self, app: &str) -> bool {
        self.skip_apps.iter().any(|skipped| skipped == app)
    }
}

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Remaps in registration order
    pub mappings: Vec<Arc<Mapping>>,
}

impl Config {
    /// Load the compiled-in mapping table
    pub fn load() -> Result<Self> {
        let mappings = default_mappings()
            .context("invalid chord in the mapping table")?
            .into_iter()
            .map(Arc::new)
            .collect();

        Ok(Self { mappings })
    }
}

/// Ctrl+`key` → Cmd+`key`, with `extra` held on both sides
fn ctrl_to_cmd(extra: Modifiers, key: Key) -> Result<Mapping, ChordError> {
    Ok(Mapping::new(
        Chord::new(Modifiers::CONTROL | extra, key)?,
        Chord::new(Modifiers::COMMAND | extra, key)?,
    ))
}

fn default_mappings() -> Result<Vec<Mapping>, ChordError> {
    let none = Modifiers::NONE;
    let shift = Modifiers::SHIFT;

    Ok(vec![
        // general editing
        ctrl_to_cmd(none, Key::A)?,
        ctrl_to_cmd(none, Key::B)?,
        ctrl_to_cmd(none, Key::I)?,
        ctrl_to_cmd(shift, Key::X)?,
        // clipboard, except where the terminal needs Ctrl
        ctrl_to_cmd(none, Key::X)?.skip_in(TERMINALS),
        ctrl_to_cmd(none, Key::C)?.skip_in(TERMINALS),
        ctrl_to_cmd(none, Key::V)?.skip_in(TERMINALS),
        // browser tabs
        ctrl_to_cmd(none, Key::R)?,
        ctrl_to_cmd(none, Key::T)?,
        ctrl_to_cmd(shift, Key::T)?,
        ctrl_to_cmd(none, Key::W)?,
        // channel/DM switcher
        ctrl_to_cmd(none, Key::K)?,
    ])
}
