//! Leaf configuration types shared by the `Config` struct.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Inclusive range of per-character delays, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// A range that never waits.
    pub const fn instant() -> Self {
        Self::new(0, 0)
    }

    pub fn is_instant(&self) -> bool {
        self.max_ms == 0
    }

    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }
}

/// Typing animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Delay between characters of plain text
    pub text_delay: DelayRange,
    /// Delay between characters inside a link
    pub link_delay: DelayRange,
    /// Fixed RNG seed for reproducible pacing (None = seeded from entropy)
    pub seed: Option<u64>,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            text_delay: crate::defaults::text_delay(),
            link_delay: crate::defaults::link_delay(),
            seed: None,
        }
    }
}

/// Canned responses for the built-in commands.
///
/// Each entry is typed one line at a time, with a line break between lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub help: Vec<String>,
    pub about: Vec<String>,
    pub contact: Vec<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            help: crate::defaults::help_lines(),
            about: crate::defaults::about_lines(),
            contact: crate::defaults::contact_lines(),
        }
    }
}

/// Log level for the debug log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
