//! Chapter generation progress list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::{ChapterProgress, ChapterStatus};
use crate::tui::Theme;

/// Width of the per-chapter bar in characters.
const BAR_WIDTH: usize = 20;

/// Renders one bar per chapter for the current bulk run.
pub struct ChapterProgressWidget<'a> {
    progress: &'a ChapterProgress,
    theme: &'a Theme,
}

impl<'a> ChapterProgressWidget<'a> {
    #[must_use]
    pub const fn new(progress: &'a ChapterProgress, theme: &'a Theme) -> Self {
        Self { progress, theme }
    }

    fn bar(status: ChapterStatus) -> String {
        let filled = BAR_WIDTH * usize::from(status.percent()) / 100;
        let mut bar = String::with_capacity(BAR_WIDTH);
        for i in 0..BAR_WIDTH {
            bar.push(if i < filled { '█' } else { '░' });
        }
        bar
    }

    fn status_style(&self, status: ChapterStatus) -> ratatui::style::Style {
        match status {
            ChapterStatus::Pending => self.theme.muted_style(),
            ChapterStatus::Generating => self.theme.highlight_style(),
            ChapterStatus::Completed => self.theme.success_style(),
            ChapterStatus::Error => self.theme.error_style(),
        }
    }
}

impl Widget for ChapterProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            " Generating chapters ({}/{}) ",
            self.progress.completed(),
            self.progress.total()
        );

        let lines: Vec<Line> = self
            .progress
            .iter()
            .map(|(number, status)| {
                Line::from(vec![
                    Span::styled(format!("Chapter {number:>3}  "), self.theme.normal_style()),
                    Span::styled(Self::bar(status), self.status_style(status)),
                    Span::styled(format!("  {}", status.label()), self.status_style(status)),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style()),
            )
            .render(area, buf);
    }
}
