//! Wire types for the book-writing backend.
//!
//! These mirror the JSON bodies of the backend REST contract. Numeric
//! chapter keys arrive as JSON object keys (strings); `serde_json` parses
//! them straight into a `BTreeMap<u32, String>`, which also keeps the
//! sparse chapter mapping ordered for display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A user's book-in-progress as stored by the backend.
///
/// `chapters_content` is sparse: only generated or saved chapters have an
/// entry, and keys always fall within `1..=chapters`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub pages: u32,
    pub chapters: u32,
    pub language: String,
    pub writing_style: WritingStyle,
    #[serde(default)]
    pub outline: String,
    #[serde(default)]
    pub chapters_content: BTreeMap<u32, String>,
}

impl Project {
    /// Returns true if an outline has been generated for this project.
    #[must_use]
    pub fn has_outline(&self) -> bool {
        !self.outline.trim().is_empty()
    }
}

/// Request body for project creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub pages: u32,
    pub chapters: u32,
    pub language: String,
    pub writing_style: WritingStyle,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            pages: 100,
            chapters: 10,
            language: "English".to_string(),
            writing_style: WritingStyle::default(),
        }
    }
}

/// Writing styles offered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritingStyle {
    #[default]
    Story,
    Descriptive,
    Academic,
    Technical,
    Biography,
    SelfHelp,
    Children,
    Poetry,
    Business,
}

impl WritingStyle {
    /// Returns the display name for this style.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Story => "Story",
            Self::Descriptive => "Descriptive",
            Self::Academic => "Academic",
            Self::Technical => "Technical",
            Self::Biography => "Biography",
            Self::SelfHelp => "Self-Help",
            Self::Children => "Children's",
            Self::Poetry => "Poetry",
            Self::Business => "Business",
        }
    }

    /// Returns the next style in the cycle.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Story => Self::Descriptive,
            Self::Descriptive => Self::Academic,
            Self::Academic => Self::Technical,
            Self::Technical => Self::Biography,
            Self::Biography => Self::SelfHelp,
            Self::SelfHelp => Self::Children,
            Self::Children => Self::Poetry,
            Self::Poetry => Self::Business,
            Self::Business => Self::Story,
        }
    }

    /// Returns the previous style in the cycle.
    #[must_use]
    pub const fn prev(&self) -> Self {
        match self {
            Self::Story => Self::Business,
            Self::Descriptive => Self::Story,
            Self::Academic => Self::Descriptive,
            Self::Technical => Self::Academic,
            Self::Biography => Self::Technical,
            Self::SelfHelp => Self::Biography,
            Self::Children => Self::SelfHelp,
            Self::Poetry => Self::Children,
            Self::Business => Self::Poetry,
        }
    }

    /// Returns all styles in display order.
    #[must_use]
    pub const fn all() -> &'static [WritingStyle] {
        &[
            Self::Story,
            Self::Descriptive,
            Self::Academic,
            Self::Technical,
            Self::Biography,
            Self::SelfHelp,
            Self::Children,
            Self::Poetry,
            Self::Business,
        ]
    }
}

/// Languages offered in the setup form.
pub const LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Dutch",
    "Russian",
    "Japanese",
    "Chinese",
];

/// Aggregate user statistics shown on the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStats {
    #[serde(default)]
    pub total_books: u64,
    #[serde(default)]
    pub total_chapters: u64,
    #[serde(default)]
    pub total_words: u64,
    #[serde(default)]
    pub recent_activity: u64,
    #[serde(default)]
    pub credit_balance: Option<u64>,
    #[serde(default)]
    pub avg_words_per_chapter: u64,
    #[serde(default)]
    pub user_since: Option<String>,
}

/// Informational cost estimate for a book configuration.
///
/// Purely advisory; actual charging is enforced server-side per chapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostEstimate {
    #[serde(default)]
    pub total_cost: u64,
    #[serde(default)]
    pub cost_per_chapter: u64,
    #[serde(default)]
    pub chapters: u32,
    #[serde(default)]
    pub pages: u32,
}

/// Response from a generate-chapter call.
///
/// `remaining_credits` is the authoritative post-charge balance and must
/// overwrite any locally cached value when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedChapter {
    pub chapter_content: String,
    #[serde(default)]
    pub credit_cost: u64,
    #[serde(default)]
    pub remaining_credits: Option<u64>,
}

/// Structured HTML export payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HtmlExport {
    pub html: String,
    #[serde(default)]
    pub filename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_parses_sparse_string_keyed_chapter_map() {
        let json = r#"{
            "id": "p1",
            "title": "My Book",
            "description": "A test book",
            "pages": 100,
            "chapters": 10,
            "language": "English",
            "writing_style": "self_help",
            "outline": "<h1>Outline</h1>",
            "chapters_content": {"1": "one", "7": "seven"}
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.writing_style, WritingStyle::SelfHelp);
        assert_eq!(project.chapters_content.len(), 2);
        assert_eq!(project.chapters_content.get(&7).map(String::as_str), Some("seven"));
        assert!(project.has_outline());
    }

    #[test]
    fn project_defaults_missing_outline_and_chapters() {
        let json = r#"{
            "id": "p2",
            "title": "Bare",
            "description": "No outline yet",
            "pages": 50,
            "chapters": 5,
            "language": "English",
            "writing_style": "story"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(!project.has_outline());
        assert!(project.chapters_content.is_empty());
    }

    #[test]
    fn writing_style_next_and_prev_are_inverse() {
        for style in WritingStyle::all() {
            assert_eq!(style.next().prev(), *style);
            assert_eq!(style.prev().next(), *style);
        }
    }

    #[test]
    fn writing_style_serializes_snake_case() {
        let json = serde_json::to_string(&WritingStyle::SelfHelp).unwrap();
        assert_eq!(json, "\"self_help\"");
    }

    #[test]
    fn generated_chapter_carries_authoritative_balance() {
        let json = r#"{"chapter_content": "...", "credit_cost": 1, "remaining_credits": 7}"#;
        let chapter: GeneratedChapter = serde_json::from_str(json).unwrap();
        assert_eq!(chapter.credit_cost, 1);
        assert_eq!(chapter.remaining_credits, Some(7));
    }

    #[test]
    fn user_stats_tolerates_missing_fields() {
        let stats: UserStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.credit_balance, None);
    }
}
