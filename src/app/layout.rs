//! Layout calculation for the application screens.
//!
//! Centralizing the arithmetic keeps rendering and event handling agreed
//! on where each panel is, which matters for the writing view's sidebar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the step strip at the top of the workflow view.
pub const STEP_STRIP_HEIGHT: u16 = 1;

/// Height of the activity panel at the bottom of every screen.
pub const ACTIVITY_HEIGHT: u16 = 8;

/// Width of the chapter sidebar in the writing view.
pub const SIDEBAR_WIDTH: u16 = 28;

/// Computed layout of the writing view.
#[derive(Debug, Clone, Copy, Default)]
pub struct WritingLayout {
    /// Step strip across the top.
    pub steps: Rect,
    /// Chapter list on the left.
    pub sidebar: Rect,
    /// Chapter content / editor on the right.
    pub editor: Rect,
    /// Activity log across the bottom.
    pub activity: Rect,
}

/// Splits the terminal for the writing step: step strip on top, activity
/// log on the bottom, and the middle split into sidebar and editor.
#[must_use]
pub fn calculate_writing_layout(area: Rect) -> WritingLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STEP_STRIP_HEIGHT),
            Constraint::Min(4),
            Constraint::Length(ACTIVITY_HEIGHT),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(rows[1]);

    WritingLayout {
        steps: rows[0],
        sidebar: columns[0],
        editor: columns[1],
        activity: rows[2],
    }
}

/// Splits a workflow screen that has no sidebar (setup, outline steps):
/// step strip, body, activity log.
#[must_use]
pub fn workflow_rows(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(STEP_STRIP_HEIGHT),
            Constraint::Min(4),
            Constraint::Length(ACTIVITY_HEIGHT),
        ])
        .split(area);
    (rows[0], rows[1], rows[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writing_layout_partitions_the_area() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = calculate_writing_layout(area);

        assert_eq!(layout.steps.height, STEP_STRIP_HEIGHT);
        assert_eq!(layout.activity.height, ACTIVITY_HEIGHT);
        assert_eq!(layout.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(
            layout.sidebar.height + layout.steps.height + layout.activity.height,
            area.height
        );
        assert_eq!(layout.sidebar.y, layout.editor.y);
    }

    #[test]
    fn small_terminal_still_yields_editor_space() {
        let layout = calculate_writing_layout(Rect::new(0, 0, 60, 14));
        assert!(layout.editor.width >= 20);
        assert!(layout.editor.height >= 4);
    }
}
