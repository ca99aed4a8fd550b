//! Raw-mode terminal guard.

use std::io::{self, Write};

use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::{execute, terminal};

/// Raw mode plus focus reporting for as long as the guard lives.
///
/// Restores the terminal on drop, including when the demo exits with an
/// error.
#[derive(Debug)]
pub struct RawModeGuard {
    focus_events: bool,
}

impl RawModeGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");

        let mut guard = Self {
            focus_events: false,
        };
        execute!(io::stdout(), EnableFocusChange)?;
        guard.focus_events = true;
        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.focus_events {
            let _ = execute!(stdout, DisableFocusChange);
        }
        // Exit raw mode last
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
        tracing::info!("terminal raw mode disabled");
    }
}
