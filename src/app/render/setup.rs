//! Setup step rendering: the project creation form.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::app::layout::workflow_rows;
use crate::app::state::SetupField;

impl App {
    /// Renders the setup form screen.
    pub(crate) fn render_setup(&self, frame: &mut Frame) {
        let (steps, body, activity) = workflow_rows(frame.area());
        self.render_step_strip(frame, steps);
        self.render_form(frame, body);
        self.render_activity(frame, activity);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            "Tell us about your book",
            self.theme.header_style(),
        )));
        lines.push(Line::from(""));

        for field in SetupField::all() {
            lines.push(self.render_form_field(*field));
        }

        lines.push(Line::from(""));
        lines.push(self.render_cost_line());

        if self.creating {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Creating project...",
                self.theme.warning_style(),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[Tab/↑/↓] ", self.theme.highlight_style()),
            Span::styled("Field  ", self.theme.muted_style()),
            Span::styled("[←/→] ", self.theme.highlight_style()),
            Span::styled("Adjust  ", self.theme.muted_style()),
            Span::styled("[Enter] ", self.theme.highlight_style()),
            Span::styled("Create  ", self.theme.muted_style()),
            Span::styled("[Esc] ", self.theme.highlight_style()),
            Span::styled("Back", self.theme.muted_style()),
        ]));

        let form = Paragraph::new(lines).block(
            Block::default()
                .title(" New Book ")
                .title_style(self.theme.header_style())
                .borders(Borders::ALL)
                .border_style(self.theme.border_style()),
        );
        frame.render_widget(form, area);
    }

    fn render_form_field(&self, field: SetupField) -> Line<'static> {
        let value = match field {
            SetupField::Title => self.form.title.clone(),
            SetupField::Description => self.form.description.clone(),
            SetupField::Pages => self.form.pages.to_string(),
            SetupField::Chapters => self.form.chapters.to_string(),
            SetupField::Language => self.form.language().to_string(),
            SetupField::Style => self.form.style.name().to_string(),
        };
        let selected = self.form.selected == field;
        let prefix = if selected { "› " } else { "  " };
        let style = if selected {
            self.theme.highlight_style()
        } else {
            self.theme.normal_style()
        };

        let shown = if value.is_empty() && field.is_text() {
            Span::styled("(required)".to_string(), self.theme.muted_style())
        } else if field.is_text() {
            Span::styled(value, style)
        } else {
            Span::styled(format!("‹ {value} ›"), style)
        };

        Line::from(vec![
            Span::styled(prefix.to_string(), style),
            Span::styled(format!("{:<16}", field.label()), style),
            shown,
        ])
    }

    /// Renders the informational cost estimate line.
    ///
    /// The estimate is advisory only; creation is never blocked on it.
    fn render_cost_line(&self) -> Line<'static> {
        match &self.form.cost {
            Some(estimate) => Line::from(vec![
                Span::styled("Estimated cost: ", self.theme.muted_style()),
                Span::styled(
                    format!("{} credits", estimate.total_cost),
                    self.theme.normal_style(),
                ),
                Span::styled(
                    format!(" ({}/chapter)", estimate.cost_per_chapter),
                    self.theme.muted_style(),
                ),
            ]),
            None if self.form.cost_debounce.is_pending() => Line::from(Span::styled(
                "Estimating cost...",
                self.theme.muted_style(),
            )),
            None => Line::from(Span::styled(
                "Adjust pages or chapters to estimate the cost",
                self.theme.muted_style(),
            )),
        }
    }
}
