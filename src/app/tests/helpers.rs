//! Shared test utilities for the app module.
//!
//! Provides app constructors wired to a scripted [`MockApi`], key event
//! builders, and a `TestBackend` render helper.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use crate::api::BookApi;
use crate::api::testing::{MockApi, sample_project};
use crate::api::types::Project;
use crate::app::App;

/// Creates a [`KeyEvent`] for a character key with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] for an arbitrary key code with no modifiers.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates a [`KeyEvent`] with Ctrl held.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Creates an app backed by a fresh mock, without the startup refresh.
///
/// Returns the mock too so tests can script responses and inspect the
/// recorded calls.
pub fn test_app() -> (App, Arc<MockApi>) {
    let api = Arc::new(MockApi::new());
    let api_obj: Arc<dyn BookApi> = api.clone();
    let app = App::with_api(api_obj, temp_out());
    (app, api)
}

/// Creates an app with one project registered on the mock and opened as
/// the active session.
pub fn test_app_with_project(project: Project) -> (App, Arc<MockApi>) {
    let api = Arc::new(MockApi::with_project(project.clone()));
    let api_obj: Arc<dyn BookApi> = api.clone();
    let mut app = App::with_api(api_obj, temp_out());
    app.dashboard.projects = vec![project.clone()];
    app.session.open(project);
    (app, api)
}

/// Standard ten-chapter project with an outline.
pub fn outlined_project() -> Project {
    sample_project("p1", 10, "<h1>Outline</h1>")
}

fn temp_out() -> PathBuf {
    std::env::temp_dir()
}

/// Lets spawned backend tasks run to completion, then drains their events.
///
/// The mock resolves every call immediately, so a short sleep is enough
/// for the task to finish and send its events.
pub async fn settle(app: &mut App) {
    tokio::time::sleep(Duration::from_millis(25)).await;
    app.process_events();
}

/// Renders the app to a `TestBackend` terminal.
///
/// Mimics the main loop by calling `update_layout()` before rendering.
///
/// # Errors
///
/// Returns an error if terminal creation or rendering fails.
pub fn render_app_to_terminal(
    app: &mut App,
    width: u16,
    height: u16,
) -> Result<Terminal<TestBackend>> {
    use ratatui::layout::Rect;

    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    app.update_layout(Rect::new(0, 0, width, height));
    terminal.draw(|f| app.render(f))?;

    Ok(terminal)
}

/// Returns the terminal buffer flattened to one string, for containment
/// assertions that don't care about styling.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let area = *buffer.area();
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
