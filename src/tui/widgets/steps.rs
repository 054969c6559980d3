//! Workflow step progress strip.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::WorkflowStep;
use crate::tui::Theme;

/// Renders the four-step strip: `[1] Setup ── [2] Outline ── ...`.
///
/// Completed steps are marked with a check, the active step is
/// highlighted, and future steps are muted.
pub struct StepStrip<'a> {
    current: WorkflowStep,
    theme: &'a Theme,
}

impl<'a> StepStrip<'a> {
    #[must_use]
    pub const fn new(current: WorkflowStep, theme: &'a Theme) -> Self {
        Self { current, theme }
    }
}

impl Widget for StepStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let current_index = self.current.index();
        let mut spans = Vec::new();

        for (i, step) in WorkflowStep::all().iter().enumerate() {
            let index = step.index();
            let (marker, style) = if index < current_index {
                ("✓".to_string(), self.theme.step_done_style())
            } else if index == current_index {
                (index.to_string(), self.theme.step_active_style())
            } else {
                (index.to_string(), self.theme.muted_style())
            };

            spans.push(Span::styled(format!("[{marker}] "), style));
            spans.push(Span::styled(step.label().to_string(), style));
            if i + 1 < WorkflowStep::all().len() {
                spans.push(Span::styled(" ── ", self.theme.muted_style()));
            }
        }

        Paragraph::new(Line::from(spans))
            .alignment(ratatui::layout::Alignment::Center)
            .render(area, buf);
    }
}
