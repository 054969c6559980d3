//! Activity log widget.
//!
//! Every backend action reports here: successes, advisories, and failures.
//! This panel is the diagnostics log; nothing is written to stdout/stderr
//! while the TUI owns the terminal.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::tui::Theme;

/// Maximum number of activity lines retained.
pub const MAX_ACTIVITY_LINES: usize = 500;

/// Severity of an activity line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// A timestamped line in the activity log.
#[derive(Debug, Clone)]
pub struct ActivityLine {
    pub text: String,
    pub kind: ActivityKind,
    pub at: DateTime<Local>,
}

impl ActivityLine {
    fn new(text: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            text: text.into(),
            kind,
            at: Local::now(),
        }
    }

    /// Creates an info line.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, ActivityKind::Info)
    }

    /// Creates a success line.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, ActivityKind::Success)
    }

    /// Creates a warning/advisory line.
    #[must_use]
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, ActivityKind::Warning)
    }

    /// Creates an error line.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, ActivityKind::Error)
    }

    fn prefix(&self) -> &'static str {
        match self.kind {
            ActivityKind::Info => "  ",
            ActivityKind::Success => "+ ",
            ActivityKind::Warning => "! ",
            ActivityKind::Error => "x ",
        }
    }
}

/// Append-only activity buffer with a retention cap.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    lines: Vec<ActivityLine>,
}

impl ActivityLog {
    /// Appends a line, dropping the oldest beyond the retention cap.
    pub fn push(&mut self, line: ActivityLine) {
        self.lines.push(line);
        if self.lines.len() > MAX_ACTIVITY_LINES {
            let overflow = self.lines.len() - MAX_ACTIVITY_LINES;
            self.lines.drain(..overflow);
        }
    }

    /// Returns all retained lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[ActivityLine] {
        &self.lines
    }

    /// Returns the most recent line, if any.
    #[must_use]
    pub fn last(&self) -> Option<&ActivityLine> {
        self.lines.last()
    }
}

/// Renders the tail of the activity log in a bordered panel.
pub struct ActivityWidget<'a> {
    log: &'a ActivityLog,
    theme: &'a Theme,
}

impl<'a> ActivityWidget<'a> {
    #[must_use]
    pub const fn new(log: &'a ActivityLog, theme: &'a Theme) -> Self {
        Self { log, theme }
    }

    fn style_for(&self, kind: ActivityKind) -> ratatui::style::Style {
        match kind {
            ActivityKind::Info => self.theme.muted_style(),
            ActivityKind::Success => self.theme.success_style(),
            ActivityKind::Warning => self.theme.warning_style(),
            ActivityKind::Error => self.theme.error_style(),
        }
    }
}

impl Widget for ActivityWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_height = area.height.saturating_sub(2) as usize;
        let start = self.log.lines().len().saturating_sub(inner_height);

        let lines: Vec<Line> = self.log.lines()[start..]
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", entry.at.format("%H:%M:%S")),
                        self.theme.muted_style(),
                    ),
                    Span::styled(
                        format!("{}{}", entry.prefix(), entry.text),
                        self.style_for(entry.kind),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Activity ")
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style()),
            )
            .render(area, buf);
    }
}
