//! Application state structures.
//!
//! State is split by concern:
//!
//! - **`DashboardState`**: project list, stats cards, selection
//! - **`SetupForm`**: the project creation form with debounced cost estimate
//! - **`SessionState`**: the active project, its outline and chapter mapping
//! - **`OutlineState`** / **`WritingState`**: per-step editor state
//!
//! All of it is owned by [`super::App`] and mutated only from the main
//! event loop in response to user keys or completed backend calls.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use tui_textarea::TextArea;

use crate::api::types::{CostEstimate, LANGUAGES, Project, ProjectDraft, UserStats, WritingStyle};
use crate::core::{BatchReport, Debouncer, ExportFormat};

/// Quiet period before a pages/chapters edit triggers a cost re-estimate.
const COST_DEBOUNCE_MS: u64 = 400;

/// Top-level view: the dashboard or the four-step writing workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Dashboard,
    Writing,
}

/// Events sent from spawned backend tasks to the UI loop.
///
/// Every backend response arrives here; the loop applies them to state via
/// [`super::App::process_events`]. Failures carry enough text for the
/// activity log and never reset the step machine.
#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    /// Project list refreshed.
    ProjectsLoaded(Vec<Project>),
    /// Dashboard statistics refreshed.
    StatsLoaded(UserStats),
    /// Fresh authoritative credit balance.
    BalanceRefreshed(u64),
    /// Cost estimate arrived for a debounced form edit.
    CostEstimated { generation: u64, estimate: CostEstimate },
    /// Project created from the setup form.
    ProjectCreated(Project),
    /// Existing project fetched for opening.
    ProjectLoaded(Project),
    /// Outline generated or regenerated.
    OutlineGenerated(String),
    /// Edited outline persisted.
    OutlineSaved(String),
    /// Bulk run: a chapter request was issued.
    ChapterStarted(u32),
    /// Bulk run: a chapter succeeded; `remaining` is the authoritative
    /// post-charge balance when the backend supplied one.
    ChapterCompleted { number: u32, remaining: Option<u64> },
    /// Bulk run: a chapter failed. `fatal` marks credit exhaustion.
    ChapterFailed { number: u32, fatal: bool, message: String },
    /// Bulk run finished (exhaustion, early halt, or advisory abort).
    BatchFinished(BatchReport),
    /// Single chapter generated outside a bulk run.
    ChapterGenerated {
        number: u32,
        content: String,
        credit_cost: u64,
        remaining: Option<u64>,
    },
    /// Edited chapter persisted.
    ChapterSaved { number: u32, content: String },
    /// Export artifact written locally.
    ExportFinished { format: ExportFormat, path: PathBuf },
    /// A single-chapter operation hit credit exhaustion; the local cache
    /// is known stale and a balance refresh is already warranted.
    CreditsExhausted { detail: String },
    /// Any other failed backend action.
    ActionFailed { context: String, message: String },
}

/// Fields of the setup form, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetupField {
    #[default]
    Title,
    Description,
    Pages,
    Chapters,
    Language,
    Style,
}

impl SetupField {
    /// Returns all fields in display order.
    #[must_use]
    pub const fn all() -> &'static [SetupField] {
        &[
            Self::Title,
            Self::Description,
            Self::Pages,
            Self::Chapters,
            Self::Language,
            Self::Style,
        ]
    }

    /// Returns the display label for this field.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Pages => "Pages",
            Self::Chapters => "Chapters",
            Self::Language => "Language",
            Self::Style => "Writing Style",
        }
    }

    /// Returns the next field, stopping at the last.
    #[must_use]
    pub fn next(&self) -> Self {
        let fields = Self::all();
        let i = fields.iter().position(|f| f == self).unwrap_or(0);
        fields[(i + 1).min(fields.len() - 1)]
    }

    /// Returns the previous field, stopping at the first.
    #[must_use]
    pub fn prev(&self) -> Self {
        let fields = Self::all();
        let i = fields.iter().position(|f| f == self).unwrap_or(0);
        fields[i.saturating_sub(1)]
    }

    /// Whether this field takes free text input.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Title | Self::Description)
    }
}

/// The project creation form.
#[derive(Debug, Clone)]
pub struct SetupForm {
    pub title: String,
    pub description: String,
    pub pages: u32,
    pub chapters: u32,
    pub language_index: usize,
    pub style: WritingStyle,
    pub selected: SetupField,
    /// Latest informational cost estimate, if any.
    pub cost: Option<CostEstimate>,
    /// Debounce for cost re-estimation on pages/chapters edits.
    pub cost_debounce: Debouncer,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            pages: 100,
            chapters: 10,
            language_index: 0,
            style: WritingStyle::default(),
            selected: SetupField::default(),
            cost: None,
            cost_debounce: Debouncer::new(Duration::from_millis(COST_DEBOUNCE_MS)),
        }
    }
}

impl SetupForm {
    /// Returns the currently selected language.
    #[must_use]
    pub fn language(&self) -> &'static str {
        LANGUAGES[self.language_index % LANGUAGES.len()]
    }

    /// Builds the creation request body from the form.
    #[must_use]
    pub fn draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            pages: self.pages,
            chapters: self.chapters,
            language: self.language().to_string(),
            writing_style: self.style,
        }
    }

    /// Precondition for submission: title and description present.
    /// A failing check means the operation is a no-op; nothing is sent.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// Dashboard view state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub projects: Vec<Project>,
    pub selected: usize,
    pub stats: Option<UserStats>,
    pub stats_loading: bool,
    pub projects_loading: bool,
}

impl DashboardState {
    /// Returns the currently selected project, if any.
    #[must_use]
    pub fn selected_project(&self) -> Option<&Project> {
        self.projects.get(self.selected)
    }

    /// Moves the selection up.
    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the selection down.
    pub fn select_down(&mut self) {
        if !self.projects.is_empty() {
            self.selected = (self.selected + 1).min(self.projects.len() - 1);
        }
    }
}

/// The active project and its locally held content.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub project: Option<Project>,
    /// Outline markup; empty until generated.
    pub outline: String,
    /// Sparse chapter mapping, chapter number to markup.
    pub chapters: BTreeMap<u32, String>,
}

impl SessionState {
    /// Makes `project` the active one, adopting its outline and chapters.
    pub fn open(&mut self, project: Project) {
        self.outline = project.outline.clone();
        self.chapters = project.chapters_content.clone();
        self.project = Some(project);
    }

    /// Target chapter count of the active project (0 when none).
    #[must_use]
    pub fn chapter_count(&self) -> u32 {
        self.project.as_ref().map_or(0, |p| p.chapters)
    }

    /// Returns the active project id, if any.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.id.as_str())
    }
}

/// Outline review step state.
#[derive(Default)]
pub struct OutlineState {
    /// When true, keys go to the editor instead of the step bindings.
    pub editing: bool,
    pub editor: TextArea<'static>,
}

impl OutlineState {
    /// Enters edit mode with the given outline text.
    pub fn start_editing(&mut self, outline: &str) {
        self.editor = TextArea::new(outline.split('\n').map(String::from).collect());
        self.editing = true;
    }

    /// Leaves edit mode, discarding or after persisting the buffer.
    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    /// Returns the editor buffer joined into one string.
    #[must_use]
    pub fn text(&self) -> String {
        self.editor.lines().join("\n")
    }
}

/// Writing step state.
pub struct WritingState {
    /// 1-based chapter currently selected in the sidebar.
    pub selected_chapter: u32,
    /// When true, keys go to the chapter editor.
    pub editing: bool,
    pub editor: TextArea<'static>,
    /// Format the export keybinding will request.
    pub export_format: ExportFormat,
}

impl Default for WritingState {
    fn default() -> Self {
        Self {
            selected_chapter: 1,
            editing: false,
            editor: TextArea::default(),
            export_format: ExportFormat::default(),
        }
    }
}

impl WritingState {
    /// Loads the given chapter text into the editor.
    pub fn load_chapter(&mut self, content: &str) {
        self.editor = TextArea::new(content.split('\n').map(String::from).collect());
    }

    /// Returns the editor buffer joined into one string.
    #[must_use]
    pub fn text(&self) -> String {
        self.editor.lines().join("\n")
    }
}
