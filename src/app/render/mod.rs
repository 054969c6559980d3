//! Rendering methods for the App.
//!
//! This module contains all UI rendering logic:
//! - **Dashboard**: project list with statistics cards
//! - **Setup**: the project creation form with the live cost estimate
//! - **Outline**: generation prompt and the review/edit screen
//! - **Writing**: chapter sidebar, editor, progress, and export selector
//!
//! Each workflow step has its own builder; [`App::render`] dispatches on the
//! current view and step so exactly one step screen is live per frame.

mod dashboard;
mod outline;
mod setup;
mod writing;

use ratatui::{Frame, layout::Rect};

use super::App;
use crate::app::state::AppView;
use crate::core::WorkflowStep;
use crate::tui::widgets::{ActivityWidget, StepStrip};

impl App {
    /// Renders the application UI.
    pub fn render(&self, frame: &mut Frame) {
        match self.view {
            AppView::Dashboard => self.render_dashboard(frame),
            AppView::Writing => match self.step {
                WorkflowStep::Setup => self.render_setup(frame),
                WorkflowStep::OutlinePending => self.render_outline_pending(frame),
                WorkflowStep::OutlineReview => self.render_outline_review(frame),
                WorkflowStep::Writing => self.render_writing(frame),
            },
        }
    }

    /// Renders the step strip shared by every workflow screen.
    pub(crate) fn render_step_strip(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(StepStrip::new(self.step, &self.theme), area);
    }

    /// Renders the activity log shared by every screen.
    pub(crate) fn render_activity(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(ActivityWidget::new(&self.activity, &self.theme), area);
    }
}
