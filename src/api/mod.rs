//! Backend API client for the book-writing service.
//!
//! Provides a trait-based abstraction over the backend REST contract so the
//! workflow logic can be exercised against a scripted mock in tests, with a
//! reqwest implementation for the real service.

pub mod http;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpBookApi;
pub use types::{
    CostEstimate, GeneratedChapter, HtmlExport, LANGUAGES, Project, ProjectDraft, UserStats,
    WritingStyle,
};

/// Errors from backend calls.
///
/// `InsufficientCredits` is the one variant with workflow semantics: it is
/// the sole signal that halts a bulk generation batch. Everything else is
/// logged and, for batch chapters, skipped.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend refused a credit-consuming operation (HTTP 402).
    /// Carries the backend's human-readable detail message.
    #[error("insufficient credits: {detail}")]
    InsufficientCredits { detail: String },
    /// Any other non-success HTTP status.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    /// Network failure, timeout, or malformed response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Returns true if this is the batch-halting credit-exhaustion error.
    #[must_use]
    pub const fn is_insufficient_credits(&self) -> bool {
        matches!(self, Self::InsufficientCredits { .. })
    }
}

/// The backend operations consumed by the workflow controller.
///
/// One method per endpoint of the REST contract. Implementations must treat
/// every call as independent; the client never batches or retries.
#[async_trait]
pub trait BookApi: Send + Sync {
    /// Lists the user's projects.
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    /// Fetches a single project including outline and chapter contents.
    async fn get_project(&self, id: &str) -> Result<Project, ApiError>;

    /// Creates a project from the setup form.
    async fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError>;

    /// Fetches aggregate user statistics for the dashboard.
    async fn user_stats(&self) -> Result<UserStats, ApiError>;

    /// Fetches the authoritative credit balance.
    async fn credit_balance(&self) -> Result<u64, ApiError>;

    /// Estimates the credit cost of a book configuration (informational).
    async fn estimate_cost(&self, pages: u32, chapters: u32) -> Result<CostEstimate, ApiError>;

    /// Generates (or regenerates) the project outline.
    async fn generate_outline(&self, project_id: &str) -> Result<String, ApiError>;

    /// Overwrites the project outline with edited text.
    async fn update_outline(&self, project_id: &str, outline: &str) -> Result<(), ApiError>;

    /// Generates one chapter. Consumes one credit on the backend.
    async fn generate_chapter(
        &self,
        project_id: &str,
        number: u32,
    ) -> Result<GeneratedChapter, ApiError>;

    /// Overwrites one chapter's content with edited text.
    async fn update_chapter(
        &self,
        project_id: &str,
        number: u32,
        content: &str,
    ) -> Result<(), ApiError>;

    /// Requests the rendered book as a structured HTML payload.
    async fn export_html(&self, project_id: &str) -> Result<HtmlExport, ApiError>;

    /// Requests the rendered book as raw PDF bytes.
    async fn export_pdf(&self, project_id: &str) -> Result<Vec<u8>, ApiError>;

    /// Requests the rendered book as raw DOCX bytes.
    async fn export_docx(&self, project_id: &str) -> Result<Vec<u8>, ApiError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testing {
    //! Scripted in-memory backend used by workflow and app tests.

    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;

    /// A recorded backend call, in issue order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        ListProjects,
        GetProject(String),
        CreateProject(String),
        UserStats,
        CreditBalance,
        EstimateCost { pages: u32, chapters: u32 },
        GenerateOutline(String),
        UpdateOutline(String),
        GenerateChapter { project_id: String, number: u32 },
        UpdateChapter { project_id: String, number: u32 },
        ExportHtml(String),
        ExportPdf(String),
        ExportDocx(String),
    }

    /// Scripted outcome for a generate-chapter call.
    #[derive(Debug, Clone)]
    pub enum ChapterOutcome {
        Ok(GeneratedChapter),
        CreditError(String),
        Failure(String),
    }

    /// In-memory `BookApi` that records calls and serves scripted responses.
    #[derive(Default)]
    pub struct MockApi {
        pub calls: Mutex<Vec<Call>>,
        pub projects: Mutex<Vec<Project>>,
        pub stats: Mutex<UserStats>,
        pub balance: Mutex<u64>,
        pub outline: Mutex<String>,
        /// Per-chapter scripted outcomes; unscripted chapters succeed with
        /// placeholder content and no authoritative balance.
        pub chapter_script: Mutex<BTreeMap<u32, ChapterOutcome>>,
        pub html_export: Mutex<Option<HtmlExport>>,
        pub pdf_bytes: Mutex<Vec<u8>>,
        pub docx_bytes: Mutex<Vec<u8>>,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self {
                outline: Mutex::new("<h1>Outline</h1>".to_string()),
                pdf_bytes: Mutex::new(b"%PDF-1.4 mock".to_vec()),
                docx_bytes: Mutex::new(b"PK mock docx".to_vec()),
                ..Self::default()
            }
        }

        pub fn with_project(project: Project) -> Self {
            let api = Self::new();
            api.projects.lock().unwrap().push(project);
            api
        }

        pub fn script_chapter(&self, number: u32, outcome: ChapterOutcome) {
            self.chapter_script.lock().unwrap().insert(number, outcome);
        }

        pub fn recorded_calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        /// Chapter numbers of generate-chapter calls, in issue order.
        pub fn generated_chapter_numbers(&self) -> Vec<u32> {
            self.recorded_calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::GenerateChapter { number, .. } => Some(number),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl BookApi for MockApi {
        async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
            self.record(Call::ListProjects);
            Ok(self.projects.lock().unwrap().clone())
        }

        async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
            self.record(Call::GetProject(id.to_string()));
            self.projects
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| ApiError::Status {
                    status: 404,
                    message: format!("project {id} not found"),
                })
        }

        async fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
            self.record(Call::CreateProject(draft.title.clone()));
            let project = Project {
                id: format!("project-{}", self.projects.lock().unwrap().len() + 1),
                title: draft.title.clone(),
                description: draft.description.clone(),
                pages: draft.pages,
                chapters: draft.chapters,
                language: draft.language.clone(),
                writing_style: draft.writing_style,
                outline: String::new(),
                chapters_content: BTreeMap::new(),
            };
            self.projects.lock().unwrap().push(project.clone());
            Ok(project)
        }

        async fn user_stats(&self) -> Result<UserStats, ApiError> {
            self.record(Call::UserStats);
            Ok(self.stats.lock().unwrap().clone())
        }

        async fn credit_balance(&self) -> Result<u64, ApiError> {
            self.record(Call::CreditBalance);
            Ok(*self.balance.lock().unwrap())
        }

        async fn estimate_cost(&self, pages: u32, chapters: u32) -> Result<CostEstimate, ApiError> {
            self.record(Call::EstimateCost { pages, chapters });
            Ok(CostEstimate {
                total_cost: u64::from(chapters),
                cost_per_chapter: 1,
                chapters,
                pages,
            })
        }

        async fn generate_outline(&self, project_id: &str) -> Result<String, ApiError> {
            self.record(Call::GenerateOutline(project_id.to_string()));
            Ok(self.outline.lock().unwrap().clone())
        }

        async fn update_outline(&self, project_id: &str, outline: &str) -> Result<(), ApiError> {
            self.record(Call::UpdateOutline(project_id.to_string()));
            if let Some(project) = self
                .projects
                .lock()
                .unwrap()
                .iter_mut()
                .find(|p| p.id == project_id)
            {
                project.outline = outline.to_string();
            }
            Ok(())
        }

        async fn generate_chapter(
            &self,
            project_id: &str,
            number: u32,
        ) -> Result<GeneratedChapter, ApiError> {
            self.record(Call::GenerateChapter {
                project_id: project_id.to_string(),
                number,
            });
            let scripted = self.chapter_script.lock().unwrap().get(&number).cloned();
            match scripted {
                Some(ChapterOutcome::Ok(chapter)) => Ok(chapter),
                Some(ChapterOutcome::CreditError(detail)) => {
                    Err(ApiError::InsufficientCredits { detail })
                }
                Some(ChapterOutcome::Failure(message)) => {
                    Err(ApiError::Status { status: 500, message })
                }
                None => Ok(GeneratedChapter {
                    chapter_content: format!("Chapter {number} text"),
                    credit_cost: 1,
                    remaining_credits: None,
                }),
            }
        }

        async fn update_chapter(
            &self,
            project_id: &str,
            number: u32,
            content: &str,
        ) -> Result<(), ApiError> {
            self.record(Call::UpdateChapter {
                project_id: project_id.to_string(),
                number,
            });
            if let Some(project) = self
                .projects
                .lock()
                .unwrap()
                .iter_mut()
                .find(|p| p.id == project_id)
            {
                project.chapters_content.insert(number, content.to_string());
            }
            Ok(())
        }

        async fn export_html(&self, project_id: &str) -> Result<HtmlExport, ApiError> {
            self.record(Call::ExportHtml(project_id.to_string()));
            Ok(self
                .html_export
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| HtmlExport {
                    html: "<html></html>".to_string(),
                    filename: None,
                }))
        }

        async fn export_pdf(&self, project_id: &str) -> Result<Vec<u8>, ApiError> {
            self.record(Call::ExportPdf(project_id.to_string()));
            Ok(self.pdf_bytes.lock().unwrap().clone())
        }

        async fn export_docx(&self, project_id: &str) -> Result<Vec<u8>, ApiError> {
            self.record(Call::ExportDocx(project_id.to_string()));
            Ok(self.docx_bytes.lock().unwrap().clone())
        }
    }

    /// Builds a project with the given chapter count and optional outline.
    pub fn sample_project(id: &str, chapters: u32, outline: &str) -> Project {
        Project {
            id: id.to_string(),
            title: "My Book".to_string(),
            description: "A sample project".to_string(),
            pages: 100,
            chapters,
            language: "English".to_string(),
            writing_style: WritingStyle::Story,
            outline: outline.to_string(),
            chapters_content: BTreeMap::new(),
        }
    }
}
