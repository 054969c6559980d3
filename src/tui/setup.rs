//! Terminal event-mode configuration.

use std::io::stdout;

use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::execute;

/// Guard that enables bracketed paste mode and disables it on drop.
///
/// Bracketed paste delivers multi-line pastes into the outline/chapter
/// editor as a single event instead of a stream of key presses. The guard
/// ensures the mode is cleared even if the application panics.
pub struct TerminalEventGuard {
    bracketed_paste_enabled: bool,
}

impl TerminalEventGuard {
    #[must_use]
    pub fn new() -> Self {
        let mut guard = Self {
            bracketed_paste_enabled: false,
        };

        match execute!(stdout(), EnableBracketedPaste) {
            Ok(()) => guard.bracketed_paste_enabled = true,
            Err(e) => {
                eprintln!("Warning: could not enable bracketed paste mode: {e}");
                eprintln!("Multi-line paste into the editor may not work correctly.");
            }
        }

        guard
    }
}

impl Default for TerminalEventGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalEventGuard {
    fn drop(&mut self) {
        if self.bracketed_paste_enabled {
            let _ = execute!(stdout(), DisableBracketedPaste);
        }
    }
}
