//! Dashboard rendering: statistics cards and the project list.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;
use crate::app::layout::ACTIVITY_HEIGHT;

impl App {
    /// Renders the dashboard view.
    pub(crate) fn render_dashboard(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(4),
                Constraint::Length(ACTIVITY_HEIGHT),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_stats_cards(frame, rows[0]);
        self.render_project_list(frame, rows[1]);
        self.render_activity(frame, rows[2]);
        self.render_dashboard_footer(frame, rows[3]);
    }

    /// Renders the statistics cards across the top.
    fn render_stats_cards(&self, frame: &mut Frame, area: Rect) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let (books, chapters, words, credits) = match &self.dashboard.stats {
            Some(stats) => (
                stats.total_books.to_string(),
                stats.total_chapters.to_string(),
                stats.total_words.to_string(),
                stats
                    .credit_balance
                    .map_or_else(|| "?".to_string(), |b| b.to_string()),
            ),
            None if self.dashboard.stats_loading => {
                let dots = "...".to_string();
                (dots.clone(), dots.clone(), dots.clone(), dots)
            }
            None => {
                let dash = "-".to_string();
                (dash.clone(), dash.clone(), dash.clone(), dash)
            }
        };

        self.render_stat_card(frame, cards[0], "Books", &books);
        self.render_stat_card(frame, cards[1], "Chapters", &chapters);
        self.render_stat_card(frame, cards[2], "Words", &words);
        self.render_stat_card(frame, cards[3], "Credits", &credits);
    }

    fn render_stat_card(&self, frame: &mut Frame, area: Rect, label: &str, value: &str) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(value.to_string(), self.theme.header_style())),
            Line::from(Span::styled(label.to_string(), self.theme.muted_style())),
        ])
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border_style()),
        );
        frame.render_widget(card, area);
    }

    /// Renders the project list.
    fn render_project_list(&self, frame: &mut Frame, area: Rect) {
        let title = if self.dashboard.projects_loading {
            " Your Books (loading...) "
        } else {
            " Your Books "
        };

        let items: Vec<ListItem> = if self.dashboard.projects.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "No books yet. Press [n] to start one.",
                self.theme.muted_style(),
            )))]
        } else {
            self.dashboard
                .projects
                .iter()
                .map(|project| {
                    let written = project.chapters_content.len();
                    ListItem::new(Line::from(vec![
                        Span::styled(project.title.clone(), self.theme.normal_style()),
                        Span::styled(
                            format!("  {written}/{} chapters", project.chapters),
                            self.theme.muted_style(),
                        ),
                        Span::styled(
                            format!("  {} · {}", project.language, project.writing_style.name()),
                            self.theme.muted_style(),
                        ),
                    ]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style()),
            )
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("› ");

        let mut state = ListState::default();
        if !self.dashboard.projects.is_empty() {
            state.select(Some(self.dashboard.selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_dashboard_footer(&self, frame: &mut Frame, area: Rect) {
        let footer = Line::from(vec![
            Span::styled("[↑/↓] ", self.theme.highlight_style()),
            Span::styled("Select  ", self.theme.muted_style()),
            Span::styled("[Enter] ", self.theme.highlight_style()),
            Span::styled("Open  ", self.theme.muted_style()),
            Span::styled("[n] ", self.theme.highlight_style()),
            Span::styled("New book  ", self.theme.muted_style()),
            Span::styled("[r] ", self.theme.highlight_style()),
            Span::styled("Refresh  ", self.theme.muted_style()),
            Span::styled("[q] ", self.theme.highlight_style()),
            Span::styled("Quit", self.theme.muted_style()),
        ]);
        frame.render_widget(Paragraph::new(footer), area);
    }
}
