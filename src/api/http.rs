//! reqwest implementation of the backend contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, BookApi};
use super::types::{CostEstimate, GeneratedChapter, HtmlExport, Project, ProjectDraft, UserStats};

/// Fixed upper bound for any single backend call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Error body shape used by the backend for 4xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Deserialize)]
struct OutlineBody {
    outline: String,
}

#[derive(Debug, Deserialize)]
struct BalanceBody {
    credit_balance: u64,
}

/// HTTP client for the book-writing backend.
#[derive(Debug, Clone)]
pub struct HttpBookApi {
    client: Client,
    base_url: String,
}

impl HttpBookApi {
    /// Creates a client against the given base URL (no trailing slash needed).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Maps non-success statuses to the error taxonomy.
    ///
    /// 402 carries the backend's human-readable detail and is the only
    /// status with batch-halting semantics.
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::PAYMENT_REQUIRED {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .map_or(body, |parsed| parsed.detail);
            return Err(ApiError::InsufficientCredits { detail });
        }
        let message = serde_json::from_str::<ErrorBody>(&body).map_or(body, |parsed| parsed.detail);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        Ok(Self::check(response).await?.bytes().await?.to_vec())
    }
}

#[async_trait]
impl BookApi for HttpBookApi {
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_json("/projects").await
    }

    async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        self.get_json(&format!("/projects/{id}")).await
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        let response = self
            .client
            .post(self.url("/projects"))
            .json(draft)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn user_stats(&self) -> Result<UserStats, ApiError> {
        self.get_json("/user/stats").await
    }

    async fn credit_balance(&self) -> Result<u64, ApiError> {
        let body: BalanceBody = self.get_json("/credits/balance").await?;
        Ok(body.credit_balance)
    }

    async fn estimate_cost(&self, pages: u32, chapters: u32) -> Result<CostEstimate, ApiError> {
        let response = self
            .client
            .post(self.url("/credits/calculate-book-cost"))
            .json(&json!({ "pages": pages, "chapters": chapters }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn generate_outline(&self, project_id: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.url("/generate-outline"))
            .json(&json!({ "project_id": project_id }))
            .send()
            .await?;
        let body: OutlineBody = Self::check(response).await?.json().await?;
        Ok(body.outline)
    }

    async fn update_outline(&self, project_id: &str, outline: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.url("/update-outline"))
            .json(&json!({ "project_id": project_id, "outline": outline }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn generate_chapter(
        &self,
        project_id: &str,
        number: u32,
    ) -> Result<GeneratedChapter, ApiError> {
        let response = self
            .client
            .post(self.url("/generate-chapter"))
            .json(&json!({ "project_id": project_id, "chapter_number": number }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_chapter(
        &self,
        project_id: &str,
        number: u32,
        content: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.url("/update-chapter"))
            .json(&json!({
                "project_id": project_id,
                "chapter_number": number,
                "content": content,
            }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn export_html(&self, project_id: &str) -> Result<HtmlExport, ApiError> {
        self.get_json(&format!("/export-book/{project_id}")).await
    }

    async fn export_pdf(&self, project_id: &str) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&format!("/export-book-pdf/{project_id}")).await
    }

    async fn export_docx(&self, project_id: &str) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&format!("/export-book-docx/{project_id}")).await
    }
}
