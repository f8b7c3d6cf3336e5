//! Input controller: keystrokes, the shadow text field and submission.

use crate::commands::CommandOutcome;
use crate::surface::{CursorMode, Origin};
use crate::terminal::Terminal;
use crate::typewriter::Sleeper;

/// A key press, independent of where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character
    Char(char),
    Backspace,
    Enter,
    /// Anything else (arrows, modifiers, function keys)
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Key::Char(ch),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// The command text captured when Enter was pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    command: String,
}

impl Submission {
    /// Trimmed buffer contents
    pub fn command(&self) -> &str {
        &self.command
    }
}

/// What a key press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Input is disabled, typing is in progress, or the key is not handled
    Ignored,
    /// The character was appended to the buffer and echoed
    Echoed(char),
    /// Backspace; carries the removed character, if the buffer had one
    Erased(Option<char>),
    /// Enter; input is disabled until the submission completes
    Submit(Submission),
}

impl KeyAction {
    /// Whether the host should suppress the key's default behaviour
    /// (page scroll on Backspace, form submission on Enter).
    pub fn prevents_default(&self) -> bool {
        matches!(self, KeyAction::Erased(_) | KeyAction::Submit(_))
    }
}

/// Net effect of reconciling the shadow field with the buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShadowChange {
    pub erased: usize,
    pub appended: usize,
}

impl ShadowChange {
    pub fn is_empty(&self) -> bool {
        self.erased == 0 && self.appended == 0
    }
}

/// Unsubmitted keystrokes and whether the prompt accepts more.
#[derive(Debug, Default)]
pub(crate) struct InputState {
    pub(crate) enabled: bool,
    pub(crate) buffer: String,
}

impl InputState {
    pub(crate) fn reset(&mut self) {
        self.enabled = false;
        self.buffer.clear();
    }
}

impl<S: Sleeper> Terminal<S> {
    /// True only while idle at a prompt.
    pub fn input_enabled(&self) -> bool {
        self.inner.input.lock().enabled
    }

    /// Whether key presses are currently handled.
    pub fn accepts_input(&self) -> bool {
        self.input_enabled() && !self.is_typing()
    }

    /// Current unsubmitted input
    pub fn input_text(&self) -> String {
        self.inner.input.lock().buffer.clone()
    }

    /// Handle the synchronous part of a key press.
    ///
    /// For [`KeyAction::Submit`] the caller must then drive
    /// [`Terminal::submit`]; [`Terminal::press`] does both.
    pub fn handle_key(&self, key: Key) -> KeyAction {
        if !self.accepts_input() {
            return KeyAction::Ignored;
        }

        match key {
            Key::Char(ch) if !ch.is_control() => {
                self.echo(ch);
                KeyAction::Echoed(ch)
            }
            Key::Backspace => KeyAction::Erased(self.erase()),
            Key::Enter => KeyAction::Submit(self.begin_submit()),
            Key::Char(_) | Key::Other => KeyAction::Ignored,
        }
    }

    /// Handle a key press, running the submitted command to completion.
    pub async fn press(&self, key: Key) -> KeyAction {
        let action = self.handle_key(key);
        if let KeyAction::Submit(submission) = &action {
            self.submit(submission.clone()).await;
        }
        action
    }

    /// Dispatch a submission, then re-arm the prompt unless the command
    /// handed the surface to another run.
    pub async fn submit(&self, submission: Submission) -> CommandOutcome {
        let outcome = self.execute(submission.command()).await;

        if outcome.needs_prompt() {
            let mut surface = self.inner.surface.lock();
            surface.push_break();
            surface.push_prompt(&self.inner.prompt);
            self.inner.input.lock().enabled = true;
            surface.set_cursor(CursorMode::Idle);
        }

        log::debug!("Submission {:?} finished: {:?}", submission.command(), outcome);
        outcome
    }

    /// Reconcile the off-screen text field's value with the buffer.
    ///
    /// Characters past the common prefix are erased from the buffer (one
    /// rendered character each), then the field's remaining characters are
    /// echoed. A single typed or deleted character is the common case.
    pub fn handle_shadow_change(&self, value: &str) -> ShadowChange {
        if !self.accepts_input() {
            return ShadowChange::default();
        }

        let buffer = self.input_text();
        let common = buffer
            .chars()
            .zip(value.chars())
            .take_while(|(a, b)| a == b)
            .count();

        let mut change = ShadowChange::default();
        for _ in common..buffer.chars().count() {
            if self.erase().is_some() {
                change.erased += 1;
            }
        }
        for ch in value.chars().skip(common).filter(|ch| !ch.is_control()) {
            self.echo(ch);
            change.appended += 1;
        }
        change
    }

    fn echo(&self, ch: char) {
        let mut surface = self.inner.surface.lock();
        self.inner.input.lock().buffer.push(ch);
        surface.push_char(ch, Origin::Input);
        surface.set_cursor(CursorMode::Typing);
    }

    fn erase(&self) -> Option<char> {
        let mut surface = self.inner.surface.lock();
        let removed = self.inner.input.lock().buffer.pop()?;
        if surface.pop_input_char().is_none() {
            log::warn!("Input buffer and surface disagree; no echoed character to erase");
        }
        surface.set_cursor(CursorMode::Typing);
        Some(removed)
    }

    fn begin_submit(&self) -> Submission {
        let mut surface = self.inner.surface.lock();
        let mut input = self.inner.input.lock();
        input.enabled = false;
        surface.clear_cursor();
        surface.push_break();
        let command = std::mem::take(&mut input.buffer).trim().to_string();
        Submission { command }
    }
}
