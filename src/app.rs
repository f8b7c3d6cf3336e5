//! Native terminal frontend.
//!
//! Drives a [`Terminal`] inside a real tty: a reader thread forwards
//! crossterm key events, the engine runs on a single-threaded runtime, and a refresh task
//! redraws the screen whenever the surface generation changes.

pub mod keys;
pub mod tty;

use crate::cli::RuntimeOptions;
use crate::input::KeyAction;
use crate::terminal::Terminal;
use crate::typewriter::TokioSleeper;
use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::event;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use keys::TtyInput;
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{LocalSet, spawn_local};
use tty::TtyGuard;
use unicode_width::UnicodeWidthChar;

/// Redraw poll interval (~60 fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Build the runtime and run the app until the user quits.
pub fn run(options: RuntimeOptions) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = LocalSet::new();
    local.block_on(&runtime, run_app(options))
}

async fn run_app(options: RuntimeOptions) -> Result<()> {
    let terminal = Terminal::new(&options.config, TokioSleeper);
    let _tty = TtyGuard::enable().context("stdout is not an interactive terminal")?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_reader(tx)?;

    let redraw = spawn_local(redraw_loop(terminal.clone()));

    let boot = terminal.clone();
    spawn_local(async move {
        boot.run_boot_sequence().await;
    });

    while let Some(input) = rx.recv().await {
        match input {
            TtyInput::Quit => break,
            TtyInput::Rerun => {
                let terminal = terminal.clone();
                spawn_local(async move {
                    terminal.rerun().await;
                });
            }
            TtyInput::Key(key) => {
                if let KeyAction::Submit(submission) = terminal.handle_key(key) {
                    let terminal = terminal.clone();
                    spawn_local(async move {
                        terminal.submit(submission).await;
                    });
                }
            }
        }
    }

    redraw.abort();
    log::info!("Quit requested, restoring tty");
    Ok(())
}

/// Read terminal events on a plain thread; `event::read` blocks.
fn spawn_reader(tx: mpsc::UnboundedSender<TtyInput>) -> Result<()> {
    std::thread::Builder::new()
        .name("tty-reader".into())
        .spawn(move || {
            loop {
                match event::read() {
                    Ok(event) => {
                        if let Some(input) = keys::map_event(&event)
                            && tx.send(input).is_err()
                        {
                            return;
                        }
                    }
                    Err(e) => {
                        log::error!("Failed to read terminal event: {}", e);
                        let _ = tx.send(TtyInput::Quit);
                        return;
                    }
                }
            }
        })?;
    Ok(())
}

async fn redraw_loop(terminal: Terminal<TokioSleeper>) {
    let mut last_generation = None;
    loop {
        tokio::time::sleep(FRAME_INTERVAL).await;

        let generation = terminal.generation();
        if last_generation == Some(generation) {
            continue;
        }
        last_generation = Some(generation);

        let ansi = terminal.ansi();
        let frame = fit_frame(&ansi, tty::window_size());
        if let Err(e) = draw(&frame) {
            log::error!("Redraw failed: {}", e);
        }
    }
}

/// Display width of one line, skipping CSI and OSC escape sequences.
fn visible_width(line: &str) -> usize {
    let mut width = 0;
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            width += ch.width().unwrap_or(0);
            continue;
        }
        match chars.next() {
            Some('[') => {
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                // Terminated by BEL or ST (ESC \)
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    width
}

/// Keep the tail of the output that fits in `rows - 1` physical rows at
/// `cols` columns, so drawing never scrolls the screen. Long lines count
/// once per row they wrap onto; the last line is always kept.
fn fit_frame(ansi: &str, size: Option<(usize, usize)>) -> Vec<&str> {
    let lines: Vec<&str> = ansi.split("\r\n").collect();
    let Some((cols, rows)) = size else {
        return lines;
    };
    let cols = cols.max(1);
    let budget = rows.saturating_sub(1).max(1);

    let mut used = 0;
    let mut start = lines.len();
    while start > 0 {
        let height = visible_width(lines[start - 1]).div_ceil(cols).max(1);
        if used + height > budget && start < lines.len() {
            break;
        }
        used += height;
        start -= 1;
    }
    lines[start..].to_vec()
}

/// Overwrite the screen from the top, erasing stale text after every line
/// and below the frame.
fn draw(lines: &[&str]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    queue!(out, MoveTo(0, 0))?;
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            queue!(out, Print("\r\n"))?;
        }
        queue!(out, Print(line), Clear(ClearType::UntilNewLine))?;
    }
    queue!(out, Clear(ClearType::FromCursorDown))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_frame_keeps_tail() {
        let frame = fit_frame("a\r\nb\r\nc\r\nd", Some((80, 3)));
        assert_eq!(frame, vec!["c", "d"]);
    }

    #[test]
    fn test_fit_frame_without_size_keeps_everything() {
        assert_eq!(fit_frame("a\r\nb", None), vec!["a", "b"]);
    }

    #[test]
    fn test_fit_frame_tiny_window() {
        assert_eq!(fit_frame("a\r\nb", Some((80, 1))), vec!["b"]);
    }

    #[test]
    fn test_fit_frame_counts_wrapped_rows() {
        let long = "x".repeat(200);
        let ansi = format!("a\r\n{long}\r\nb");

        // 200 columns wrap onto 3 rows at 80 wide
        assert_eq!(fit_frame(&ansi, Some((80, 3))), vec!["b"]);
        assert_eq!(fit_frame(&ansi, Some((80, 5))), vec![long.as_str(), "b"]);
        assert_eq!(fit_frame(&ansi, Some((80, 6))), vec!["a", long.as_str(), "b"]);
    }

    #[test]
    fn test_visible_width_skips_escapes() {
        let link = "\x1b]8;;mailto:a@b.co\x1b\\\x1b[4ma@b.co\x1b[24m\x1b]8;;\x1b\\";
        assert_eq!(visible_width(link), 6);
        assert_eq!(visible_width("$ _"), 3);
        assert_eq!(visible_width(""), 0);
        assert_eq!(visible_width("日本"), 4);
    }
}
