//! Controlling-tty setup and teardown.

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, disable_raw_mode, enable_raw_mode};
use std::io::{self, Write};

/// Raw mode with a hidden hardware cursor on a cleared screen.
///
/// Everything is restored on drop, including on error paths.
pub struct TtyGuard;

impl TtyGuard {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        // The surface draws its own cursor
        execute!(io::stdout(), Hide, Clear(ClearType::All), MoveTo(0, 0))?;
        log::debug!("tty switched to raw mode");
        Ok(guard)
    }
}

impl Drop for TtyGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(out, Show, Print("\r\n"));
        let _ = out.flush();
        if let Err(e) = disable_raw_mode() {
            log::error!("Failed to restore tty: {}", e);
        } else {
            log::debug!("tty settings restored");
        }
    }
}

/// Size of the controlling terminal as `(columns, rows)`, if known.
pub fn window_size() -> Option<(usize, usize)> {
    match terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => Some((cols as usize, rows as usize)),
        _ => None,
    }
}
