//! Configuration system for the termfolio typewriter terminal.
//!
//! This crate provides configuration loading, saving, and default values
//! for the engine and its frontends. It includes:
//!
//! - The greeting (boot banner) and canned command responses
//! - Per-character typing delay ranges
//! - Log level selection
//! - YAML persistence with validation

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::{CommandsConfig, DelayRange, LogLevel, TypingConfig};
