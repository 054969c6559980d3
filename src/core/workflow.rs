//! Writing workflow step state machine.

use crate::api::Project;

/// Steps of the writing workflow.
///
/// Forward transitions are driven by successful backend calls; a failed
/// call always leaves the machine where it was. There are no enforced
/// backward transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStep {
    /// Configuring a new book (title, description, size, style).
    #[default]
    Setup,
    /// Project exists but no outline has been generated yet.
    OutlinePending,
    /// Outline exists; review, edit, regenerate, or launch chapter generation.
    OutlineReview,
    /// Per-chapter writing and editing interface.
    Writing,
}

impl WorkflowStep {
    /// Computes the entry step when opening an existing project:
    /// outline present routes to review, otherwise to outline generation.
    #[must_use]
    pub fn entry_for(project: &Project) -> Self {
        if project.has_outline() {
            Self::OutlineReview
        } else {
            Self::OutlinePending
        }
    }

    /// Returns the 1-based position in the progress strip.
    #[must_use]
    pub const fn index(&self) -> u8 {
        match self {
            Self::Setup => 1,
            Self::OutlinePending => 2,
            Self::OutlineReview => 3,
            Self::Writing => 4,
        }
    }

    /// Returns the label shown in the progress strip.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Setup => "Setup",
            Self::OutlinePending => "Outline",
            Self::OutlineReview => "Review",
            Self::Writing => "Writing",
        }
    }

    /// Returns all steps in workflow order.
    #[must_use]
    pub const fn all() -> &'static [WorkflowStep] {
        &[
            Self::Setup,
            Self::OutlinePending,
            Self::OutlineReview,
            Self::Writing,
        ]
    }

    /// Whether the manual advance to the writing interface is allowed.
    ///
    /// Review moves to Writing only once at least one chapter exists.
    #[must_use]
    pub const fn can_enter_writing(&self, generated_chapters: usize) -> bool {
        matches!(self, Self::OutlineReview | Self::Writing) && generated_chapters > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::sample_project;

    #[test]
    fn entry_without_outline_routes_to_outline_pending() {
        let project = sample_project("p1", 10, "");
        assert_eq!(WorkflowStep::entry_for(&project), WorkflowStep::OutlinePending);
    }

    #[test]
    fn entry_with_outline_routes_to_review() {
        let project = sample_project("p1", 10, "<h1>Outline</h1>");
        assert_eq!(WorkflowStep::entry_for(&project), WorkflowStep::OutlineReview);
    }

    #[test]
    fn whitespace_only_outline_counts_as_absent() {
        let project = sample_project("p1", 10, "  \n ");
        assert_eq!(WorkflowStep::entry_for(&project), WorkflowStep::OutlinePending);
    }

    #[test]
    fn indices_follow_workflow_order() {
        let indices: Vec<u8> = WorkflowStep::all().iter().map(WorkflowStep::index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn writing_requires_a_generated_chapter() {
        assert!(!WorkflowStep::OutlineReview.can_enter_writing(0));
        assert!(WorkflowStep::OutlineReview.can_enter_writing(1));
        assert!(!WorkflowStep::Setup.can_enter_writing(5));
    }
}
