//! Book export: fetch a rendered artifact and save it locally.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs as async_fs;

use crate::api::BookApi;
use crate::api::types::Project;

/// Export formats offered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Structured payload wrapped into a local `.html` file.
    #[default]
    Html,
    /// Raw binary payload.
    Pdf,
    /// Raw binary payload.
    Docx,
}

impl ExportFormat {
    /// Returns the display name for this format.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
        }
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// Returns the next format in the selector cycle.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Html => Self::Pdf,
            Self::Pdf => Self::Docx,
            Self::Docx => Self::Html,
        }
    }

    /// Returns the previous format in the selector cycle.
    #[must_use]
    pub const fn prev(&self) -> Self {
        match self {
            Self::Html => Self::Docx,
            Self::Pdf => Self::Html,
            Self::Docx => Self::Pdf,
        }
    }

    /// Returns all formats in selector order.
    #[must_use]
    pub const fn all() -> &'static [ExportFormat] {
        &[Self::Html, Self::Pdf, Self::Docx]
    }
}

/// Derives the artifact filename for a project and format.
///
/// Binary formats are always `<title>.<ext>`. Path separators in the title
/// are replaced so the result stays a single path component.
#[must_use]
pub fn artifact_filename(title: &str, format: ExportFormat) -> String {
    let safe: String = title
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{safe}.{}", format.extension())
}

/// Exports the project in the given format and writes it under `out_dir`.
///
/// Nothing is written until the full response has arrived, so a failed
/// transfer leaves no partial file behind. Returns the written path.
///
/// # Errors
///
/// Returns an error if the backend call fails or the file cannot be written.
pub async fn export_book(
    api: &dyn BookApi,
    project: &Project,
    format: ExportFormat,
    out_dir: &Path,
) -> Result<PathBuf> {
    let (filename, bytes) = match format {
        ExportFormat::Html => {
            let payload = api
                .export_html(&project.id)
                .await
                .context("HTML export request failed")?;
            let filename = payload
                .filename
                .unwrap_or_else(|| artifact_filename(&project.title, format));
            (filename, payload.html.into_bytes())
        }
        ExportFormat::Pdf => {
            let bytes = api
                .export_pdf(&project.id)
                .await
                .context("PDF export request failed")?;
            (artifact_filename(&project.title, format), bytes)
        }
        ExportFormat::Docx => {
            let bytes = api
                .export_docx(&project.id)
                .await
                .context("DOCX export request failed")?;
            (artifact_filename(&project.title, format), bytes)
        }
    };

    let path = out_dir.join(filename);
    async_fs::write(&path, &bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
