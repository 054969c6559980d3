//! Event handling logic for the App.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::api::types::LANGUAGES;
use crate::app::state::{AppView, SetupField};
use crate::core::WorkflowStep;
use crate::tui::widgets::ActivityLine;

/// Increment for page-count adjustment keys.
const PAGES_STEP: u32 = 10;

/// Upper bounds for the setup form's numeric fields.
const MAX_PAGES: u32 = 1000;
const MAX_CHAPTERS: u32 = 100;

impl App {
    /// Handles pasted text from bracketed paste mode.
    ///
    /// Multi-line pasted text arrives as a single `Event::Paste` rather than
    /// individual key events, so Enter inside pasted text never triggers a
    /// submission. Paste only lands in an active editor or a text field of
    /// the setup form; everywhere else it is ignored.
    ///
    /// Line endings are normalized to `\n` and control characters other
    /// than newlines are filtered out.
    pub fn handle_paste(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let filtered: String = normalized
            .chars()
            .filter(|c| !c.is_control() || *c == '\n')
            .collect();

        if self.view == AppView::Writing {
            match self.step {
                WorkflowStep::Setup if self.form.selected.is_text() => {
                    // Form fields are single-line; flatten newlines to spaces.
                    let flat = filtered.replace('\n', " ");
                    match self.form.selected {
                        SetupField::Title => self.form.title.push_str(&flat),
                        SetupField::Description => self.form.description.push_str(&flat),
                        _ => {}
                    }
                }
                WorkflowStep::OutlineReview if self.outline.editing => {
                    self.outline.editor.insert_str(&filtered);
                }
                WorkflowStep::Writing if self.writing.editing => {
                    self.writing.editor.insert_str(&filtered);
                }
                _ => {}
            }
        }
    }

    /// Handles a key event, dispatching on the current view and step.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global hotkey: Ctrl+C always quits.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.view {
            AppView::Dashboard => self.handle_dashboard_key(key),
            AppView::Writing => match self.step {
                WorkflowStep::Setup => self.handle_setup_key(key),
                WorkflowStep::OutlinePending => self.handle_outline_pending_key(key),
                WorkflowStep::OutlineReview => self.handle_outline_review_key(key),
                WorkflowStep::Writing => self.handle_writing_key(key),
            },
        }
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Up | KeyCode::Char('k') => self.dashboard.select_up(),
            KeyCode::Down | KeyCode::Char('j') => self.dashboard.select_down(),
            KeyCode::Enter => self.open_selected_project(),
            KeyCode::Char('n') => self.start_new_book(),
            KeyCode::Char('r') => self.refresh_dashboard(),
            _ => {}
        }
    }

    /// Enters the setup step with a fresh form.
    fn start_new_book(&mut self) {
        self.form = super::SetupForm::default();
        self.session = super::SessionState::default();
        self.progress = None;
        self.view = AppView::Writing;
        self.step = WorkflowStep::Setup;
    }

    // =========================================================================
    // Step 1: Setup
    // =========================================================================

    fn handle_setup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.view = AppView::Dashboard;
                self.form.cost_debounce.cancel();
            }
            KeyCode::Enter => self.submit_setup_form(),
            KeyCode::Up | KeyCode::BackTab => {
                self.form.selected = self.form.selected.prev();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form.selected = self.form.selected.next();
            }
            KeyCode::Left => self.adjust_setup_field(false),
            KeyCode::Right => self.adjust_setup_field(true),
            KeyCode::Backspace => {
                match self.form.selected {
                    SetupField::Title => {
                        self.form.title.pop();
                    }
                    SetupField::Description => {
                        self.form.description.pop();
                    }
                    _ => {}
                };
            }
            KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
                match self.form.selected {
                    SetupField::Title => self.form.title.push(c),
                    SetupField::Description => self.form.description.push(c),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    /// Adjusts the selected non-text field up or down.
    ///
    /// Pages and chapters edits arm the cost estimate debounce; the request
    /// fires from [`App::tick`] once typing settles.
    fn adjust_setup_field(&mut self, up: bool) {
        match self.form.selected {
            SetupField::Pages => {
                self.form.pages = if up {
                    (self.form.pages + PAGES_STEP).min(MAX_PAGES)
                } else {
                    self.form.pages.saturating_sub(PAGES_STEP).max(PAGES_STEP)
                };
                self.form.cost_debounce.touch();
            }
            SetupField::Chapters => {
                self.form.chapters = if up {
                    (self.form.chapters + 1).min(MAX_CHAPTERS)
                } else {
                    self.form.chapters.saturating_sub(1).max(1)
                };
                self.form.cost_debounce.touch();
            }
            SetupField::Language => {
                let count = LANGUAGES.len();
                self.form.language_index = if up {
                    (self.form.language_index + 1) % count
                } else {
                    (self.form.language_index + count - 1) % count
                };
            }
            SetupField::Style => {
                self.form.style = if up {
                    self.form.style.next()
                } else {
                    self.form.style.prev()
                };
            }
            SetupField::Title | SetupField::Description => {}
        }
    }

    // =========================================================================
    // Step 2: Outline Generation
    // =========================================================================

    fn handle_outline_pending_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.leave_workflow(),
            KeyCode::Char('g') | KeyCode::Enter => self.generate_outline(),
            _ => {}
        }
    }

    // =========================================================================
    // Step 3: Outline Review
    // =========================================================================

    fn handle_outline_review_key(&mut self, key: KeyEvent) {
        if self.outline.editing {
            match key.code {
                KeyCode::Esc => self.outline.stop_editing(),
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.save_outline();
                }
                _ => {
                    self.outline.editor.input(key);
                }
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.leave_workflow(),
            KeyCode::Char('e') => {
                let outline = self.session.outline.clone();
                self.outline.start_editing(&outline);
            }
            KeyCode::Char('r') => self.generate_outline(),
            KeyCode::Char('a') => self.start_bulk_generation(),
            KeyCode::Char('w') => self.try_enter_writing(),
            _ => {}
        }
    }

    /// Manual advance from review to the writing interface.
    ///
    /// Allowed only once at least one chapter exists; otherwise an advisory
    /// is logged and the step stays put.
    fn try_enter_writing(&mut self) {
        if self.step.can_enter_writing(self.session.chapters.len()) {
            self.step = WorkflowStep::Writing;
            self.writing.selected_chapter = 1;
            self.sync_chapter_editor();
        } else {
            self.log(ActivityLine::warning(
                "Generate at least one chapter before entering the writing view",
            ));
        }
    }

    // =========================================================================
    // Step 4: Writing
    // =========================================================================

    fn handle_writing_key(&mut self, key: KeyEvent) {
        if self.writing.editing {
            match key.code {
                KeyCode::Esc => self.writing.editing = false,
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.save_selected_chapter();
                }
                _ => {
                    self.writing.editor.input(key);
                }
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                self.step = WorkflowStep::OutlineReview;
            }
            KeyCode::Up | KeyCode::Char('k') => self.select_chapter_up(),
            KeyCode::Down | KeyCode::Char('j') => self.select_chapter_down(),
            KeyCode::Char('g') => self.generate_selected_chapter(),
            KeyCode::Char('a') => self.start_bulk_generation(),
            KeyCode::Enter | KeyCode::Char('i') => {
                self.sync_chapter_editor();
                self.writing.editing = true;
            }
            KeyCode::Char('x') => {
                self.writing.export_format = self.writing.export_format.next();
            }
            KeyCode::Char('e') => self.export_selected(),
            _ => {}
        }
    }

    fn select_chapter_up(&mut self) {
        if self.writing.selected_chapter > 1 {
            self.writing.selected_chapter -= 1;
            self.sync_chapter_editor();
        }
    }

    fn select_chapter_down(&mut self) {
        if self.writing.selected_chapter < self.session.chapter_count() {
            self.writing.selected_chapter += 1;
            self.sync_chapter_editor();
        }
    }

    /// Returns to the dashboard, keeping the session intact so the project
    /// can be reopened, and refreshes the list.
    fn leave_workflow(&mut self) {
        self.view = AppView::Dashboard;
        self.refresh_dashboard();
    }
}
