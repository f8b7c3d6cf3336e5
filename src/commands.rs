//! The fixed command table and command dispatch.

use crate::sequence::SequenceOutcome;
use crate::terminal::Terminal;
use crate::typewriter::{Sleeper, TypeOutcome};
use std::collections::BTreeMap;
use termfolio_config::Config;

/// What a command does when run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type these lines, one at a time, with breaks between them
    Print(Vec<String>),
    /// Empty the surface immediately, without animation or a new run
    Clear,
    /// Rerun the boot sequence
    Restart,
}

/// Case-insensitive mapping from command name to command.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: BTreeMap<String, Command>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table: `help`, `about`, `contact`, `clear`, `ls` and the
    /// boot script path (`./<script_name>`).
    pub fn from_config(config: &Config) -> Self {
        let mut table = Self::new();
        table.insert("help", Command::Print(config.commands.help.clone()));
        table.insert("about", Command::Print(config.commands.about.clone()));
        table.insert("contact", Command::Print(config.commands.contact.clone()));
        table.insert("clear", Command::Clear);
        table.insert(&config.restart_command(), Command::Restart);
        table.insert("ls", Command::Print(vec![config.script_name.clone()]));
        table
    }

    /// Add or replace a command. Names are stored lowercased.
    pub fn insert(&mut self, name: &str, command: Command) {
        self.entries.insert(name.trim().to_lowercase(), command);
    }

    /// Look up trimmed, case-insensitive input.
    pub fn lookup(&self, input: &str) -> Option<&Command> {
        self.entries.get(&input.trim().to_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output line for an unknown command, keeping the user's casing.
pub fn not_found_message(input: &str) -> String {
    format!("command not found: {input}")
}

/// How a dispatched command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Blank input; nothing ran
    Empty,
    /// Output (or the not-found message) was typed
    Printed,
    /// The surface was cleared
    Cleared,
    /// The boot sequence reran and armed its own prompt
    Restarted,
    /// A newer run took over while the command was typing
    Superseded,
}

impl CommandOutcome {
    /// Whether the submit path should append a fresh prompt afterwards.
    pub fn needs_prompt(self) -> bool {
        !matches!(self, CommandOutcome::Restarted | CommandOutcome::Superseded)
    }
}

impl<S: Sleeper> Terminal<S> {
    /// Dispatch `input` to the command table.
    ///
    /// Does not touch the prompt or the input state; see [`Terminal::submit`].
    pub async fn execute(&self, input: &str) -> CommandOutcome {
        let input = input.trim();
        if input.is_empty() {
            return CommandOutcome::Empty;
        }

        match self.inner.commands.lookup(input) {
            Some(Command::Print(lines)) => {
                log::info!("Running command {:?}", input);
                self.print_lines(lines).await
            }
            Some(Command::Clear) => {
                log::info!("Clearing terminal");
                self.inner.surface.lock().clear();
                CommandOutcome::Cleared
            }
            Some(Command::Restart) => match self.rerun().await {
                SequenceOutcome::Completed => CommandOutcome::Restarted,
                SequenceOutcome::Superseded => CommandOutcome::Superseded,
            },
            None => {
                log::info!("Unknown command {:?}", input);
                self.print_lines(&[not_found_message(input)]).await
            }
        }
    }

    async fn print_lines(&self, lines: &[String]) -> CommandOutcome {
        let run = self.inner.runs.issue();
        match self.type_lines(lines, &run).await {
            TypeOutcome::Completed => CommandOutcome::Printed,
            TypeOutcome::Abandoned => {
                log::debug!("Command output for run {} superseded", run.id());
                CommandOutcome::Superseded
            }
        }
    }
}
