//! Reusable TUI widgets.

pub mod activity;
pub mod progress;
pub mod steps;

pub use activity::{ActivityKind, ActivityLine, ActivityLog, ActivityWidget, MAX_ACTIVITY_LINES};
pub use progress::ChapterProgressWidget;
pub use steps::StepStrip;
