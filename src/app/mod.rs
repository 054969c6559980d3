//! Main application state and logic.
//!
//! This module contains the core App struct and its implementation,
//! organized into submodules:
//! - `events` - Key and paste event handling
//! - `layout` - Writing view layout calculation
//! - `render` - UI rendering per view and step
//! - `state` - Application state structures
//!
//! ## Views
//!
//! The application operates in two views:
//!
//! - **`Dashboard`**: project list with aggregate statistics. Entry point;
//!   opening a project or starting a new book switches to the workflow.
//! - **`Writing`**: the four-step book workflow (setup, outline generation,
//!   outline review, chapter writing). The current [`WorkflowStep`] selects
//!   which step screen renders and which keys are live.
//!
//! All backend calls run on spawned tasks and report back over the event
//! channel; the UI loop applies their [`WorkflowEvent`]s between frames, so
//! state is only ever mutated from one place.

pub mod events;
mod layout;
mod render;
pub mod state;

#[cfg(test)]
mod tests;

pub use layout::{WritingLayout, calculate_writing_layout, workflow_rows};

use std::path::PathBuf;
use std::sync::Arc;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::api::BookApi;
use crate::core::{
    ChapterProgress, ChapterStatus, CreditLedger, WorkflowStep, export_book, run_bulk_generation,
};
use crate::tui::Theme;
use crate::tui::widgets::{ActivityLine, ActivityLog};

pub use self::state::{
    AppView, DashboardState, OutlineState, SessionState, SetupField, SetupForm, WorkflowEvent,
    WritingState,
};

/// Channel buffer size for workflow events.
const EVENT_CHANNEL_SIZE: usize = 1000;

/// Main application state.
///
/// Organized into component sub-structs for separation of concerns:
/// - `dashboard`: project list and stats cards
/// - `form`: the setup step's creation form
/// - `session`: the active project, outline, and chapter contents
/// - `outline` / `writing`: per-step editor state
pub struct App {
    // =========================================================================
    // Shared State
    // =========================================================================
    /// Backend client shared with spawned tasks.
    api: Arc<dyn BookApi>,
    /// Directory export artifacts are written to.
    output_dir: PathBuf,
    /// Theme for styling.
    pub(crate) theme: Theme,
    /// Current top-level view.
    pub(crate) view: AppView,
    /// Current workflow step (meaningful in the Writing view).
    pub(crate) step: WorkflowStep,
    /// Should quit flag.
    should_quit: bool,

    // =========================================================================
    // Event Channels
    // =========================================================================
    /// Event receiver for workflow events.
    event_rx: mpsc::Receiver<WorkflowEvent>,
    /// Event sender (cloned into spawned backend tasks).
    event_tx: mpsc::Sender<WorkflowEvent>,

    // =========================================================================
    // Component States
    // =========================================================================
    pub(crate) dashboard: DashboardState,
    pub(crate) form: SetupForm,
    pub(crate) session: SessionState,
    pub(crate) outline: OutlineState,
    pub(crate) writing: WritingState,

    /// Advisory local credit balance.
    pub(crate) credits: CreditLedger,
    /// Per-chapter progress of the bulk run in flight, if any.
    pub(crate) progress: Option<ChapterProgress>,
    /// Activity log shown at the bottom of every screen.
    pub(crate) activity: ActivityLog,
    /// Writing view layout, recomputed each frame.
    pub(crate) layout: WritingLayout,

    // =========================================================================
    // In-flight Flags
    // =========================================================================
    /// An outline generation request is in flight.
    pub(crate) outline_busy: bool,
    /// A bulk generation run is in flight.
    pub(crate) bulk_running: bool,
    /// A single-chapter generation or save is in flight.
    pub(crate) chapter_busy: bool,
    /// An export is in flight.
    pub(crate) export_busy: bool,
    /// A project creation request is in flight.
    pub(crate) creating: bool,
}

impl App {
    /// Creates an application instance without issuing any backend calls.
    ///
    /// This constructor is used by tests; [`App::new`] additionally kicks
    /// off the initial dashboard refresh.
    pub fn with_api(api: Arc<dyn BookApi>, output_dir: PathBuf) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);

        Self {
            api,
            output_dir,
            theme: Theme::default(),
            view: AppView::default(),
            step: WorkflowStep::default(),
            should_quit: false,
            event_rx,
            event_tx,
            dashboard: DashboardState::default(),
            form: SetupForm::default(),
            session: SessionState::default(),
            outline: OutlineState::default(),
            writing: WritingState::default(),
            credits: CreditLedger::new(),
            progress: None,
            activity: ActivityLog::default(),
            layout: WritingLayout::default(),
            outline_busy: false,
            bulk_running: false,
            chapter_busy: false,
            export_busy: false,
            creating: false,
        }
    }

    /// Creates the application and starts the initial dashboard refresh.
    pub fn new(api: Arc<dyn BookApi>, output_dir: PathBuf) -> Self {
        let mut app = Self::with_api(api, output_dir);
        app.refresh_dashboard();
        app
    }

    /// Returns true if the application should quit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Requests application shutdown.
    pub(crate) fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Gets the event sender for spawning backend tasks.
    #[must_use]
    pub fn event_sender(&self) -> mpsc::Sender<WorkflowEvent> {
        self.event_tx.clone()
    }

    /// Pushes an activity line.
    pub(crate) fn log(&mut self, line: ActivityLine) {
        self.activity.push(line);
    }

    // =========================================================================
    // Backend Actions
    // =========================================================================

    /// Refreshes the project list and dashboard statistics.
    pub(crate) fn refresh_dashboard(&mut self) {
        self.dashboard.projects_loading = true;
        self.dashboard.stats_loading = true;

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match api.list_projects().await {
                Ok(projects) => {
                    tx.send(WorkflowEvent::ProjectsLoaded(projects)).await.ok();
                }
                Err(error) => {
                    tx.send(WorkflowEvent::ActionFailed {
                        context: "loading projects".to_string(),
                        message: error.to_string(),
                    })
                    .await
                    .ok();
                }
            }
            match api.user_stats().await {
                Ok(stats) => {
                    tx.send(WorkflowEvent::StatsLoaded(stats)).await.ok();
                }
                Err(error) => {
                    tx.send(WorkflowEvent::ActionFailed {
                        context: "loading stats".to_string(),
                        message: error.to_string(),
                    })
                    .await
                    .ok();
                }
            }
        });
    }

    /// Fetches the authoritative credit balance.
    ///
    /// Called whenever the local cache is known stale: after credit
    /// exhaustion errors and after a bulk run finishes.
    pub(crate) fn refresh_balance(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match api.credit_balance().await {
                Ok(balance) => {
                    tx.send(WorkflowEvent::BalanceRefreshed(balance)).await.ok();
                }
                Err(error) => {
                    tx.send(WorkflowEvent::ActionFailed {
                        context: "refreshing balance".to_string(),
                        message: error.to_string(),
                    })
                    .await
                    .ok();
                }
            }
        });
    }

    /// Requests a cost estimate for the current form, tagged with the
    /// debounce generation so stale responses can be dropped.
    pub(crate) fn request_cost_estimate(&self, generation: u64) {
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let pages = self.form.pages;
        let chapters = self.form.chapters;
        tokio::spawn(async move {
            // Estimate failures are silent: the estimate is informational
            // and the next edit retries anyway.
            if let Ok(estimate) = api.estimate_cost(pages, chapters).await {
                tx.send(WorkflowEvent::CostEstimated { generation, estimate })
                    .await
                    .ok();
            }
        });
    }

    /// Submits the setup form. No-op unless the form is submittable and no
    /// creation is already in flight.
    pub(crate) fn submit_setup_form(&mut self) {
        if self.creating || !self.form.is_submittable() {
            return;
        }
        self.creating = true;

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let draft = self.form.draft();
        self.log(ActivityLine::info(format!("Creating \"{}\"...", draft.title)));
        tokio::spawn(async move {
            match api.create_project(&draft).await {
                Ok(project) => {
                    tx.send(WorkflowEvent::ProjectCreated(project)).await.ok();
                }
                Err(error) => {
                    tx.send(WorkflowEvent::ActionFailed {
                        context: "creating project".to_string(),
                        message: error.to_string(),
                    })
                    .await
                    .ok();
                }
            }
        });
    }

    /// Opens the project selected on the dashboard.
    ///
    /// The full project is re-fetched so the outline and chapter contents
    /// are current before the entry step is computed.
    pub(crate) fn open_selected_project(&mut self) {
        let Some(project) = self.dashboard.selected_project() else {
            return;
        };
        let id = project.id.clone();

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match api.get_project(&id).await {
                Ok(project) => {
                    tx.send(WorkflowEvent::ProjectLoaded(project)).await.ok();
                }
                Err(error) => {
                    tx.send(WorkflowEvent::ActionFailed {
                        context: "opening project".to_string(),
                        message: error.to_string(),
                    })
                    .await
                    .ok();
                }
            }
        });
    }

    /// Generates (or regenerates) the outline for the active project.
    pub(crate) fn generate_outline(&mut self) {
        if self.outline_busy {
            return;
        }
        let Some(id) = self.session.project_id().map(String::from) else {
            return;
        };
        self.outline_busy = true;
        self.log(ActivityLine::info("Generating outline..."));

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match api.generate_outline(&id).await {
                Ok(outline) => {
                    tx.send(WorkflowEvent::OutlineGenerated(outline)).await.ok();
                }
                Err(error) if error.is_insufficient_credits() => {
                    tx.send(WorkflowEvent::CreditsExhausted {
                        detail: error.to_string(),
                    })
                    .await
                    .ok();
                }
                Err(error) => {
                    tx.send(WorkflowEvent::ActionFailed {
                        context: "generating outline".to_string(),
                        message: error.to_string(),
                    })
                    .await
                    .ok();
                }
            }
        });
    }

    /// Persists the outline editor buffer.
    pub(crate) fn save_outline(&mut self) {
        let Some(id) = self.session.project_id().map(String::from) else {
            return;
        };
        let text = self.outline.text();

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match api.update_outline(&id, &text).await {
                Ok(()) => {
                    tx.send(WorkflowEvent::OutlineSaved(text)).await.ok();
                }
                Err(error) => {
                    tx.send(WorkflowEvent::ActionFailed {
                        context: "saving outline".to_string(),
                        message: error.to_string(),
                    })
                    .await
                    .ok();
                }
            }
        });
    }

    /// Starts the sequential bulk generation run over all chapters.
    ///
    /// At most one run can be in flight. The run itself lives in
    /// [`run_bulk_generation`]; this method seeds the progress tracker and
    /// hands the advisory balance over.
    pub(crate) fn start_bulk_generation(&mut self) {
        if self.bulk_running {
            return;
        }
        let Some(id) = self.session.project_id().map(String::from) else {
            return;
        };
        if !self.require_outline() {
            return;
        }
        let chapter_count = self.session.chapter_count();
        if chapter_count == 0 {
            return;
        }

        self.bulk_running = true;
        self.progress = Some(ChapterProgress::start(chapter_count));
        self.log(ActivityLine::info(format!(
            "Generating {chapter_count} chapters..."
        )));

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let cached = self.credits.cached();
        tokio::spawn(async move {
            run_bulk_generation(api.as_ref(), &id, chapter_count, cached, &tx).await;
        });
    }

    /// Generates a single chapter from the writing step.
    pub(crate) fn generate_selected_chapter(&mut self) {
        if self.chapter_busy || self.bulk_running {
            return;
        }
        let Some(id) = self.session.project_id().map(String::from) else {
            return;
        };
        if !self.require_outline() {
            return;
        }
        let number = self.writing.selected_chapter;
        self.chapter_busy = true;
        self.log(ActivityLine::info(format!("Generating chapter {number}...")));

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match api.generate_chapter(&id, number).await {
                Ok(chapter) => {
                    tx.send(WorkflowEvent::ChapterGenerated {
                        number,
                        content: chapter.chapter_content,
                        credit_cost: chapter.credit_cost,
                        remaining: chapter.remaining_credits,
                    })
                    .await
                    .ok();
                }
                Err(error) if error.is_insufficient_credits() => {
                    tx.send(WorkflowEvent::CreditsExhausted {
                        detail: error.to_string(),
                    })
                    .await
                    .ok();
                }
                Err(error) => {
                    tx.send(WorkflowEvent::ActionFailed {
                        context: format!("generating chapter {number}"),
                        message: error.to_string(),
                    })
                    .await
                    .ok();
                }
            }
        });
    }

    /// Persists the chapter editor buffer for the selected chapter.
    pub(crate) fn save_selected_chapter(&mut self) {
        if self.chapter_busy {
            return;
        }
        let Some(id) = self.session.project_id().map(String::from) else {
            return;
        };
        let number = self.writing.selected_chapter;
        let content = self.writing.text();
        self.chapter_busy = true;

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            match api.update_chapter(&id, number, &content).await {
                Ok(()) => {
                    tx.send(WorkflowEvent::ChapterSaved { number, content })
                        .await
                        .ok();
                }
                Err(error) => {
                    tx.send(WorkflowEvent::ActionFailed {
                        context: format!("saving chapter {number}"),
                        message: error.to_string(),
                    })
                    .await
                    .ok();
                }
            }
        });
    }

    /// Exports the active project in the currently selected format.
    pub(crate) fn export_selected(&mut self) {
        if self.export_busy {
            return;
        }
        let Some(project) = self.session.project.clone() else {
            return;
        };
        let format = self.writing.export_format;
        self.export_busy = true;
        self.log(ActivityLine::info(format!("Exporting as {}...", format.name())));

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let out_dir = self.output_dir.clone();
        tokio::spawn(async move {
            match export_book(api.as_ref(), &project, format, &out_dir).await {
                Ok(path) => {
                    tx.send(WorkflowEvent::ExportFinished { format, path })
                        .await
                        .ok();
                }
                Err(error) => {
                    tx.send(WorkflowEvent::ActionFailed {
                        context: format!("exporting {}", format.name()),
                        message: format!("{error:#}"),
                    })
                    .await
                    .ok();
                }
            }
        });
    }

    // =========================================================================
    // Event Processing
    // =========================================================================

    /// Drains and applies all pending workflow events.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Applies one workflow event to state.
    ///
    /// Failures log and clear busy flags; they never move the step machine.
    pub(crate) fn apply_event(&mut self, event: WorkflowEvent) {
        match event {
            WorkflowEvent::ProjectsLoaded(projects) => {
                self.dashboard.projects_loading = false;
                if self.dashboard.selected >= projects.len() {
                    self.dashboard.selected = projects.len().saturating_sub(1);
                }
                self.dashboard.projects = projects;
            }
            WorkflowEvent::StatsLoaded(stats) => {
                self.dashboard.stats_loading = false;
                if let Some(balance) = stats.credit_balance {
                    self.credits.apply_authoritative(balance);
                }
                self.dashboard.stats = Some(stats);
            }
            WorkflowEvent::BalanceRefreshed(balance) => {
                self.credits.apply_authoritative(balance);
                if let Some(stats) = &mut self.dashboard.stats {
                    stats.credit_balance = Some(balance);
                }
            }
            WorkflowEvent::CostEstimated { generation, estimate } => {
                // A newer edit has fired since this request went out.
                if self.form.cost_debounce.is_current(generation) {
                    self.form.cost = Some(estimate);
                }
            }
            WorkflowEvent::ProjectCreated(project) => {
                self.creating = false;
                self.log(ActivityLine::success(format!("Created \"{}\"", project.title)));
                self.session.open(project);
                self.view = AppView::Writing;
                // A fresh project has no outline; go straight to generation.
                self.step = WorkflowStep::OutlinePending;
            }
            WorkflowEvent::ProjectLoaded(project) => {
                self.step = WorkflowStep::entry_for(&project);
                self.log(ActivityLine::info(format!("Opened \"{}\"", project.title)));
                self.session.open(project);
                self.view = AppView::Writing;
            }
            WorkflowEvent::OutlineGenerated(outline) => {
                self.outline_busy = false;
                self.session.outline = outline.clone();
                if let Some(project) = &mut self.session.project {
                    project.outline = outline;
                }
                self.step = WorkflowStep::OutlineReview;
                self.log(ActivityLine::success("Outline ready"));
            }
            WorkflowEvent::OutlineSaved(outline) => {
                self.session.outline = outline.clone();
                if let Some(project) = &mut self.session.project {
                    project.outline = outline;
                }
                self.outline.stop_editing();
                self.log(ActivityLine::success("Outline saved"));
            }
            WorkflowEvent::ChapterStarted(number) => {
                if let Some(progress) = &mut self.progress {
                    progress.set(number, ChapterStatus::Generating);
                }
            }
            WorkflowEvent::ChapterCompleted { number, remaining } => {
                if let Some(progress) = &mut self.progress {
                    progress.set(number, ChapterStatus::Completed);
                }
                if let Some(balance) = remaining {
                    self.credits.apply_authoritative(balance);
                }
            }
            WorkflowEvent::ChapterFailed { number, fatal, message } => {
                if let Some(progress) = &mut self.progress {
                    progress.set(number, ChapterStatus::Error);
                }
                if fatal {
                    self.log(ActivityLine::error(format!(
                        "Chapter {number}: {message}; remaining chapters skipped"
                    )));
                    self.refresh_balance();
                } else {
                    self.log(ActivityLine::warning(format!(
                        "Chapter {number} failed: {message}"
                    )));
                }
            }
            WorkflowEvent::BatchFinished(report) => {
                self.bulk_running = false;
                if let Some((required, available)) = report.advisory_abort {
                    self.progress = None;
                    self.log(ActivityLine::warning(format!(
                        "Not enough credits: need {required}, have {available}"
                    )));
                    return;
                }

                // The report is the new authoritative chapter set.
                self.session.chapters = report.chapters.clone();
                if let Some(project) = &mut self.session.project {
                    project.chapters_content = report.chapters.clone();
                }
                let succeeded = report.succeeded();
                if report.halted_at.is_none() {
                    self.log(ActivityLine::success(format!(
                        "Generated {succeeded} chapters ({} credits)",
                        report.credits_spent
                    )));
                } else {
                    self.log(ActivityLine::warning(format!(
                        "Generated {succeeded} chapters before credits ran out"
                    )));
                }
                // The step stays put: 3 to 4 is a manual transition.
                if succeeded > 0 {
                    self.sync_chapter_editor();
                }
                self.refresh_balance();
            }
            WorkflowEvent::ChapterGenerated {
                number,
                content,
                credit_cost,
                remaining,
            } => {
                self.chapter_busy = false;
                self.session.chapters.insert(number, content.clone());
                if let Some(project) = &mut self.session.project {
                    project.chapters_content.insert(number, content);
                }
                if let Some(balance) = remaining {
                    self.credits.apply_authoritative(balance);
                }
                self.log(ActivityLine::success(format!(
                    "Chapter {number} written ({credit_cost} credits)"
                )));
                if self.writing.selected_chapter == number {
                    self.sync_chapter_editor();
                }
            }
            WorkflowEvent::ChapterSaved { number, content } => {
                self.chapter_busy = false;
                self.session.chapters.insert(number, content.clone());
                if let Some(project) = &mut self.session.project {
                    project.chapters_content.insert(number, content);
                }
                self.writing.editing = false;
                self.log(ActivityLine::success(format!("Chapter {number} saved")));
            }
            WorkflowEvent::ExportFinished { format, path } => {
                self.export_busy = false;
                self.log(ActivityLine::success(format!(
                    "Exported {} to {}",
                    format.name(),
                    path.display()
                )));
            }
            WorkflowEvent::CreditsExhausted { detail } => {
                self.outline_busy = false;
                self.chapter_busy = false;
                self.log(ActivityLine::error(detail));
                self.refresh_balance();
            }
            WorkflowEvent::ActionFailed { context, message } => {
                self.clear_busy_for(&context);
                self.log(ActivityLine::error(format!("Error {context}: {message}")));
            }
        }
    }

    /// Clears the busy flag matching a failed action's context.
    fn clear_busy_for(&mut self, context: &str) {
        if context.starts_with("creating project") {
            self.creating = false;
        } else if context.starts_with("generating outline") {
            self.outline_busy = false;
        } else if context.starts_with("generating chapter") || context.starts_with("saving chapter")
        {
            self.chapter_busy = false;
        } else if context.starts_with("exporting") {
            self.export_busy = false;
        } else if context.starts_with("loading projects") {
            self.dashboard.projects_loading = false;
        } else if context.starts_with("loading stats") {
            self.dashboard.stats_loading = false;
        }
    }

    /// Chapter generation requires an outline; an emptied outline can be
    /// saved from review, so this is re-checked at request time rather
    /// than assumed from the step. Logs an advisory on failure.
    fn require_outline(&mut self) -> bool {
        let present = !self.session.outline.trim().is_empty();
        if !present {
            self.log(ActivityLine::warning(
                "Generate an outline before writing chapters",
            ));
        }
        present
    }

    /// Loads the selected chapter's content into the writing editor.
    pub(crate) fn sync_chapter_editor(&mut self) {
        let content = self
            .session
            .chapters
            .get(&self.writing.selected_chapter)
            .cloned()
            .unwrap_or_default();
        self.writing.load_chapter(&content);
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Processes periodic tasks; called on each event loop tick.
    ///
    /// Currently the only timer is the debounced cost estimate: once the
    /// quiet period after the last pages/chapters edit elapses, the estimate
    /// request fires.
    pub fn tick(&mut self) {
        if let Some(generation) = self.form.cost_debounce.fire_due() {
            self.request_cost_estimate(generation);
        }
    }

    /// Updates cached layout from the terminal dimensions. Called once per
    /// frame before rendering.
    pub fn update_layout(&mut self, terminal_area: Rect) {
        self.layout = calculate_writing_layout(terminal_area);
    }
}
