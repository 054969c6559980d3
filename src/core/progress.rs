//! Per-chapter progress tracking for bulk generation.
//!
//! This state is ephemeral UI bookkeeping: rebuilt at the start of each
//! bulk run and never persisted.

use std::collections::BTreeMap;

/// Status of one chapter within a bulk generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChapterStatus {
    /// Not yet attempted.
    #[default]
    Pending,
    /// Request currently in flight.
    Generating,
    /// Generated and stored.
    Completed,
    /// Request failed (credit exhaustion or transient error).
    Error,
}

impl ChapterStatus {
    /// Returns the short label shown next to the progress bar.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Waiting",
            Self::Generating => "Writing...",
            Self::Completed => "Done",
            Self::Error => "Error",
        }
    }

    /// Progress percentage rendered for this status.
    #[must_use]
    pub const fn percent(&self) -> u16 {
        match self {
            Self::Pending | Self::Generating | Self::Error => 0,
            Self::Completed => 100,
        }
    }
}

/// Progress of all chapters in the current bulk run.
#[derive(Debug, Clone, Default)]
pub struct ChapterProgress {
    statuses: BTreeMap<u32, ChapterStatus>,
    total: u32,
}

impl ChapterProgress {
    /// Starts tracking a fresh run over `total` chapters, all pending.
    #[must_use]
    pub fn start(total: u32) -> Self {
        Self {
            statuses: (1..=total).map(|n| (n, ChapterStatus::Pending)).collect(),
            total,
        }
    }

    /// Records a status for one chapter.
    pub fn set(&mut self, number: u32, status: ChapterStatus) {
        self.statuses.insert(number, status);
    }

    /// Returns the status of one chapter.
    #[must_use]
    pub fn status(&self, number: u32) -> ChapterStatus {
        self.statuses.get(&number).copied().unwrap_or_default()
    }

    /// Total chapters in the run.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Count of completed chapters.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.statuses
            .values()
            .filter(|s| **s == ChapterStatus::Completed)
            .count()
    }

    /// Iterates `(chapter number, status)` in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, ChapterStatus)> + '_ {
        self.statuses.iter().map(|(n, s)| (*n, *s))
    }
}

/// Outcome of a bulk generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Accumulated chapter texts; failed or unattempted chapters are absent.
    pub chapters: BTreeMap<u32, String>,
    /// Total credits spent across successful generations.
    pub credits_spent: u64,
    /// Set when the run halted early on an insufficient-credit error,
    /// carrying the chapter number that failed.
    pub halted_at: Option<u32>,
    /// Set when the run was aborted up front by the advisory balance check
    /// (zero requests issued): `(required, available)`.
    pub advisory_abort: Option<(u32, u64)>,
}

impl BatchReport {
    /// Number of successfully generated chapters.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.chapters.len()
    }
}
