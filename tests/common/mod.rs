//! Shared integration test helpers.
//!
//! Include with `mod common;` at the top of each test file. The
//! `#[allow(dead_code)]` below suppresses warnings when a file only uses a
//! subset of the helpers.

#![allow(dead_code)]

use termfolio::config::Config;
use termfolio::{Key, Terminal, TokioSleeper};

/// Fixed seed so delay sequences are reproducible across runs.
pub const SEED: u64 = 7;

/// Default content with a seeded pacer.
pub fn config() -> Config {
    Config::default().with_seed(SEED)
}

/// A terminal with default content on the tokio timer.
pub fn terminal() -> Terminal<TokioSleeper> {
    Terminal::new(&config(), TokioSleeper)
}

/// A terminal that boots with `lines` instead of the default banner.
pub fn terminal_with_boot(lines: &[&str]) -> Terminal<TokioSleeper> {
    Terminal::new(
        &config().with_boot_lines(lines.iter().copied()),
        TokioSleeper,
    )
}

/// Expected plain text after a completed boot of `lines`.
pub fn booted_text(lines: &[String]) -> String {
    format!("{}\n\n$ ", lines.join("\n"))
}

/// Type `text` one key at a time, as a user would.
pub async fn type_keys(terminal: &Terminal<TokioSleeper>, text: &str) {
    for ch in text.chars() {
        terminal.press(Key::Char(ch)).await;
    }
}

/// Type `text` and press Enter, waiting for the command to finish.
pub async fn submit(terminal: &Terminal<TokioSleeper>, text: &str) {
    type_keys(terminal, text).await;
    terminal.press(Key::Enter).await;
}
