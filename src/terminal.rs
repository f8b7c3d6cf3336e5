//! The per-page coordinator object.
//!
//! `Terminal` owns every piece of mutable state the engine needs: the display
//! surface, the run counter, the typewriter (and with it the typing flag) and
//! the input buffer. It is cheap to clone; clones share state, so event
//! handlers each hold one instead of closing over globals.
//!
//! Behaviour is split across modules the same way the components are:
//! `sequence` (boot/rerun), `commands` (dispatch) and `input` (keys and the
//! shadow field) each add an `impl Terminal` block.

use crate::commands::CommandTable;
use crate::input::InputState;
use crate::run::RunCounter;
use crate::surface::Surface;
use crate::typewriter::{Sleeper, Typewriter};
use parking_lot::Mutex;
use std::sync::Arc;
use termfolio_config::Config;

pub(crate) struct Inner<S> {
    pub(crate) boot_lines: Vec<String>,
    pub(crate) prompt: String,
    pub(crate) commands: CommandTable,
    pub(crate) surface: Mutex<Surface>,
    pub(crate) runs: RunCounter,
    pub(crate) typewriter: Typewriter<S>,
    pub(crate) input: Mutex<InputState>,
}

/// Typewriter terminal state shared by all event handlers of one page.
pub struct Terminal<S> {
    pub(crate) inner: Arc<Inner<S>>,
}

impl<S> Clone for Terminal<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Sleeper> Terminal<S> {
    /// Build a terminal from configuration. Nothing is rendered until the
    /// boot sequence runs.
    pub fn new(config: &Config, sleeper: S) -> Self {
        Self::with_commands(config, CommandTable::from_config(config), sleeper)
    }

    /// Build a terminal with a custom command table.
    pub fn with_commands(config: &Config, commands: CommandTable, sleeper: S) -> Self {
        log::debug!(
            "Creating terminal with {} boot lines and {} commands",
            config.boot_lines.len(),
            commands.len()
        );
        Self {
            inner: Arc::new(Inner {
                boot_lines: config.boot_lines.clone(),
                prompt: config.prompt.clone(),
                commands,
                surface: Mutex::new(Surface::new()),
                runs: RunCounter::new(),
                typewriter: Typewriter::new(sleeper, &config.typing),
                input: Mutex::new(InputState::default()),
            }),
        }
    }

    pub fn commands(&self) -> &CommandTable {
        &self.inner.commands
    }

    pub fn sleeper(&self) -> &S {
        self.inner.typewriter.sleeper()
    }

    /// True while any reveal call is appending characters.
    pub fn is_typing(&self) -> bool {
        self.inner.typewriter.is_typing()
    }

    /// Identifier of the current run (0 before the first sequence)
    pub fn current_run(&self) -> u64 {
        self.inner.runs.current()
    }

    /// Surface generation; changes whenever the rendered content changes.
    pub fn generation(&self) -> u64 {
        self.inner.surface.lock().generation()
    }

    /// Run `f` with read access to the surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&Surface) -> R) -> R {
        f(&self.inner.surface.lock())
    }

    /// Rendered text without the cursor.
    pub fn text(&self) -> String {
        self.with_surface(Surface::plain_text)
    }

    pub fn html(&self) -> String {
        self.with_surface(Surface::to_html)
    }

    pub fn ansi(&self) -> String {
        self.with_surface(Surface::to_ansi)
    }
}
