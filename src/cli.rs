//! Command-line interface for termfolio.
//!
//! This module handles CLI argument parsing and the `print-config` subcommand.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use termfolio_config::Config;

/// termfolio - a typewriter-style fake terminal
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug log level (written to the debug log file, never the tty)
    #[arg(long, value_name = "LEVEL", value_enum)]
    pub log_level: Option<CliLogLevel>,

    /// Reveal text without per-character delay
    #[arg(long)]
    pub instant: bool,

    /// Fixed seed for the typing delay jitter
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective configuration as YAML and exit
    PrintConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliLogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliLogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            CliLogLevel::Off => log::LevelFilter::Off,
            CliLogLevel::Error => log::LevelFilter::Error,
            CliLogLevel::Warn => log::LevelFilter::Warn,
            CliLogLevel::Info => log::LevelFilter::Info,
            CliLogLevel::Debug => log::LevelFilter::Debug,
            CliLogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    /// Effective configuration (file + CLI overrides)
    pub config: Config,
    /// Log level requested on the command line
    pub log_level: Option<log::LevelFilter>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal application startup
    Continue(Box<RuntimeOptions>),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    process(Cli::parse())
}

fn process(cli: Cli) -> CliResult {
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("termfolio: error: {e:#}");
            return CliResult::Exit(1);
        }
    };

    match cli.command {
        Some(Commands::PrintConfig) => match config.to_yaml() {
            Ok(yaml) => {
                print!("{yaml}");
                CliResult::Exit(0)
            }
            Err(e) => {
                eprintln!("termfolio: error: {e}");
                CliResult::Exit(1)
            }
        },
        None => CliResult::Continue(Box::new(RuntimeOptions {
            config,
            log_level: cli.log_level.map(CliLogLevel::to_level_filter),
        })),
    }
}

/// Load the config named on the command line (or the default one) and apply
/// the CLI overrides.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.instant {
        config = config.with_instant_typing();
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}
