//! Writing step rendering: chapter sidebar, editor, and export selector.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::App;
use crate::core::ExportFormat;
use crate::tui::widgets::ChapterProgressWidget;

impl App {
    /// Renders the writing screen (step 4).
    pub(crate) fn render_writing(&self, frame: &mut Frame) {
        let layout = self.layout;

        self.render_step_strip(frame, layout.steps);

        if self.bulk_running
            && let Some(progress) = &self.progress
        {
            // Progress replaces the editor while a bulk run is in flight.
            self.render_chapter_sidebar(frame, layout.sidebar);
            frame.render_widget(
                ChapterProgressWidget::new(progress, &self.theme),
                layout.editor,
            );
        } else {
            self.render_chapter_sidebar(frame, layout.sidebar);
            self.render_chapter_panel(frame, layout.editor);
        }

        self.render_activity(frame, layout.activity);
    }

    /// Renders the chapter list with per-chapter completion markers.
    fn render_chapter_sidebar(&self, frame: &mut Frame, area: Rect) {
        let total = self.session.chapter_count();
        let items: Vec<ListItem> = (1..=total)
            .map(|number| {
                let written = self.session.chapters.contains_key(&number);
                let marker = if written { "●" } else { "○" };
                let style = if written {
                    self.theme.success_style()
                } else {
                    self.theme.muted_style()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{marker} "), style),
                    Span::styled(format!("Chapter {number}"), self.theme.normal_style()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Chapters ")
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style()),
            )
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("› ");

        let mut state = ListState::default();
        if total > 0 {
            state.select(Some((self.writing.selected_chapter - 1) as usize));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    /// Renders the selected chapter: editor when editing, read-only text
    /// plus keybinding footer otherwise.
    fn render_chapter_panel(&self, frame: &mut Frame, area: Rect) {
        let number = self.writing.selected_chapter;

        if self.writing.editing {
            let block = Block::default()
                .title(format!(" Chapter {number}  [Ctrl+S] Save  [Esc] Discard "))
                .borders(Borders::ALL)
                .border_style(self.theme.highlight_style());
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(&self.writing.editor, inner);
            return;
        }

        let mut lines: Vec<Line> = match self.session.chapters.get(&number) {
            Some(content) => content
                .split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), self.theme.normal_style())))
                .collect(),
            None if self.chapter_busy => vec![Line::from(Span::styled(
                format!("Writing chapter {number}..."),
                self.theme.warning_style(),
            ))],
            None => vec![Line::from(Span::styled(
                "Not written yet. Press [g] to generate.",
                self.theme.muted_style(),
            ))],
        };

        lines.push(Line::from(""));
        lines.push(self.render_export_line());
        lines.push(Line::from(vec![
            Span::styled("[↑/↓] ", self.theme.highlight_style()),
            Span::styled("Chapter  ", self.theme.muted_style()),
            Span::styled("[g] ", self.theme.highlight_style()),
            Span::styled("Generate  ", self.theme.muted_style()),
            Span::styled("[a] ", self.theme.highlight_style()),
            Span::styled("Generate all  ", self.theme.muted_style()),
            Span::styled("[Enter] ", self.theme.highlight_style()),
            Span::styled("Edit  ", self.theme.muted_style()),
            Span::styled("[Esc] ", self.theme.highlight_style()),
            Span::styled("Review", self.theme.muted_style()),
        ]));

        let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title(format!(" Chapter {number} "))
                .borders(Borders::ALL)
                .border_style(self.theme.border_style()),
        );
        frame.render_widget(panel, area);
    }

    /// Renders the export format selector and export keybinding.
    fn render_export_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("[x] ", self.theme.highlight_style()),
            Span::styled("Format: ", self.theme.muted_style()),
        ];
        for format in ExportFormat::all() {
            let style = if *format == self.writing.export_format {
                self.theme.highlight_style()
            } else {
                self.theme.muted_style()
            };
            spans.push(Span::styled(format!("{} ", format.name()), style));
        }
        spans.push(Span::styled(" [e] ", self.theme.highlight_style()));
        if self.export_busy {
            spans.push(Span::styled("Exporting...", self.theme.warning_style()));
        } else {
            spans.push(Span::styled("Export", self.theme.muted_style()));
        }
        Line::from(spans)
    }
}
