//! The top-level `Config` struct, builder helpers and validation.

mod persistence;

use crate::error::ConfigError;
use crate::types::{CommandsConfig, DelayRange, LogLevel, TypingConfig};
use serde::{Deserialize, Serialize};

/// Complete configuration for one terminal instance.
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Lines typed out when the page loads or the boot script is rerun
    #[serde(default = "crate::defaults::boot_lines")]
    pub boot_lines: Vec<String>,

    /// Glyph written before user input
    #[serde(default = "crate::defaults::prompt")]
    pub prompt: String,

    /// Name of the fake boot script; `ls` prints it and `./<name>` reruns it
    #[serde(default = "crate::defaults::script_name")]
    pub script_name: String,

    #[serde(default)]
    pub typing: TypingConfig,

    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boot_lines: crate::defaults::boot_lines(),
            prompt: crate::defaults::prompt(),
            script_name: crate::defaults::script_name(),
            typing: TypingConfig::default(),
            commands: CommandsConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boot_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boot_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Disable the per-character delay for both text and links.
    pub fn with_instant_typing(mut self) -> Self {
        self.typing.text_delay = DelayRange::instant();
        self.typing.link_delay = DelayRange::instant();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.typing.seed = Some(seed);
        self
    }

    /// The command that reruns the boot sequence, e.g. `./jared.sh`.
    pub fn restart_command(&self) -> String {
        format!("./{}", self.script_name)
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, range) in [
            ("typing.text_delay", self.typing.text_delay),
            ("typing.link_delay", self.typing.link_delay),
        ] {
            if range.min_ms > range.max_ms {
                return Err(ConfigError::Validation(format!(
                    "{field}: min_ms ({}) is greater than max_ms ({})",
                    range.min_ms, range.max_ms
                )));
            }
        }

        let name = self.script_name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "script_name must not be empty".to_string(),
            ));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "script_name {name:?} must not contain whitespace"
            )));
        }

        Ok(())
    }
}
