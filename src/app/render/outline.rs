//! Outline step rendering: the generation prompt and the review screen.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::app::layout::workflow_rows;
use crate::tui::widgets::ChapterProgressWidget;

impl App {
    /// Renders the outline generation screen (step 2).
    pub(crate) fn render_outline_pending(&self, frame: &mut Frame) {
        let (steps, body, activity) = workflow_rows(frame.area());
        self.render_step_strip(frame, steps);

        let title = self
            .session
            .project
            .as_ref()
            .map_or_else(String::new, |p| p.title.clone());

        let mut lines = vec![
            Line::from(Span::styled(title, self.theme.header_style())),
            Line::from(""),
        ];
        if self.outline_busy {
            lines.push(Line::from(Span::styled(
                "Generating outline... this can take a minute.",
                self.theme.warning_style(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "No outline yet.",
                self.theme.normal_style(),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("[g] ", self.theme.highlight_style()),
                Span::styled("Generate outline  ", self.theme.muted_style()),
                Span::styled("[Esc] ", self.theme.highlight_style()),
                Span::styled("Dashboard", self.theme.muted_style()),
            ]));
        }

        let panel = Paragraph::new(lines).block(
            Block::default()
                .title(" Outline ")
                .borders(Borders::ALL)
                .border_style(self.theme.border_style()),
        );
        frame.render_widget(panel, body);
        self.render_activity(frame, activity);
    }

    /// Renders the outline review screen (step 3).
    ///
    /// While a bulk run is in flight the outline panel is replaced by the
    /// per-chapter progress list.
    pub(crate) fn render_outline_review(&self, frame: &mut Frame) {
        let (steps, body, activity) = workflow_rows(frame.area());
        self.render_step_strip(frame, steps);

        if self.bulk_running
            && let Some(progress) = &self.progress
        {
            frame.render_widget(ChapterProgressWidget::new(progress, &self.theme), body);
        } else if self.outline.editing {
            self.render_outline_editor(frame, body);
        } else {
            self.render_outline_text(frame, body);
        }

        self.render_activity(frame, activity);
    }

    fn render_outline_editor(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Edit Outline  [Ctrl+S] Save  [Esc] Discard ")
            .borders(Borders::ALL)
            .border_style(self.theme.highlight_style());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(&self.outline.editor, inner);
    }

    fn render_outline_text(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = self
            .session
            .outline
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), self.theme.normal_style())))
            .collect();

        lines.push(Line::from(""));
        // Advisory only; the backend is the authority on charging.
        if self.credits.covers(self.session.chapter_count()) == Some(false) {
            lines.push(Line::from(Span::styled(
                format!(
                    "Credits may not cover all {} chapters",
                    self.session.chapter_count()
                ),
                self.theme.warning_style(),
            )));
        }
        lines.push(Line::from(vec![
            Span::styled("[e] ", self.theme.highlight_style()),
            Span::styled("Edit  ", self.theme.muted_style()),
            Span::styled("[r] ", self.theme.highlight_style()),
            Span::styled("Regenerate  ", self.theme.muted_style()),
            Span::styled("[a] ", self.theme.highlight_style()),
            Span::styled("Generate all chapters  ", self.theme.muted_style()),
            Span::styled("[w] ", self.theme.highlight_style()),
            Span::styled("Writing view  ", self.theme.muted_style()),
            Span::styled("[Esc] ", self.theme.highlight_style()),
            Span::styled("Dashboard", self.theme.muted_style()),
        ]));

        let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(" Outline ")
                .borders(Borders::ALL)
                .border_style(self.theme.border_style()),
        );
        frame.render_widget(panel, area);
    }
}
