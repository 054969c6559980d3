//! Key binding tests per view and step.

use ratatui::crossterm::event::KeyCode;

use super::helpers::{char_key, ctrl_key, key, outlined_project, settle, test_app,
    test_app_with_project};
use crate::api::testing::Call;
use crate::app::state::{AppView, SetupField};
use crate::core::{ExportFormat, WorkflowStep};
use crate::tui::widgets::ActivityKind;

#[tokio::test]
async fn ctrl_c_quits_from_any_view() {
    let (mut app, _api) = test_app();
    app.view = AppView::Writing;
    app.step = WorkflowStep::OutlineReview;

    app.handle_key(ctrl_key('c'));

    assert!(app.should_quit());
}

#[tokio::test]
async fn q_quits_from_the_dashboard() {
    let (mut app, _api) = test_app();
    app.handle_key(char_key('q'));
    assert!(app.should_quit());
}

#[tokio::test]
async fn n_opens_a_fresh_setup_form() {
    let (mut app, _api) = test_app();
    app.form.title = "left over".to_string();

    app.handle_key(char_key('n'));

    assert_eq!(app.view, AppView::Writing);
    assert_eq!(app.step, WorkflowStep::Setup);
    assert!(app.form.title.is_empty());
}

#[tokio::test]
async fn typing_fills_the_selected_text_field() {
    let (mut app, _api) = test_app();
    app.handle_key(char_key('n'));

    for c in "My Book".chars() {
        app.handle_key(char_key(c));
    }
    app.handle_key(key(KeyCode::Tab));
    for c in "About it".chars() {
        app.handle_key(char_key(c));
    }
    app.handle_key(key(KeyCode::Backspace));

    assert_eq!(app.form.title, "My Book");
    assert_eq!(app.form.description, "About i");
    assert_eq!(app.form.selected, SetupField::Description);
}

#[tokio::test]
async fn adjusting_chapters_arms_the_cost_debounce() {
    let (mut app, _api) = test_app();
    app.handle_key(char_key('n'));
    app.form.selected = SetupField::Chapters;

    app.handle_key(key(KeyCode::Right));

    assert_eq!(app.form.chapters, 11);
    assert!(app.form.cost_debounce.is_pending());
}

#[tokio::test]
async fn chapters_never_drop_below_one() {
    let (mut app, _api) = test_app();
    app.handle_key(char_key('n'));
    app.form.selected = SetupField::Chapters;
    app.form.chapters = 1;

    app.handle_key(key(KeyCode::Left));

    assert_eq!(app.form.chapters, 1);
}

#[tokio::test]
async fn submitting_an_incomplete_form_sends_nothing() {
    let (mut app, api) = test_app();
    app.handle_key(char_key('n'));

    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;

    assert!(!app.creating);
    assert!(api.recorded_calls().is_empty());
    assert_eq!(app.step, WorkflowStep::Setup);
}

#[tokio::test]
async fn submitting_a_complete_form_creates_the_project() {
    let (mut app, api) = test_app();
    app.handle_key(char_key('n'));
    app.form.title = "My Book".to_string();
    app.form.description = "About it".to_string();

    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;

    assert!(
        api.recorded_calls()
            .contains(&Call::CreateProject("My Book".to_string()))
    );
    assert_eq!(app.step, WorkflowStep::OutlinePending);
}

#[tokio::test]
async fn w_without_chapters_stays_in_review() {
    let (mut app, _api) = test_app_with_project(outlined_project());
    app.view = AppView::Writing;
    app.step = WorkflowStep::OutlineReview;

    app.handle_key(char_key('w'));

    assert_eq!(app.step, WorkflowStep::OutlineReview);
    assert_eq!(app.activity.last().unwrap().kind, ActivityKind::Warning);
}

#[tokio::test]
async fn w_with_a_chapter_enters_the_writing_view() {
    let (mut app, _api) = test_app_with_project(outlined_project());
    app.view = AppView::Writing;
    app.step = WorkflowStep::OutlineReview;
    app.session.chapters.insert(1, "text".to_string());

    app.handle_key(char_key('w'));

    assert_eq!(app.step, WorkflowStep::Writing);
    assert_eq!(app.writing.selected_chapter, 1);
}

#[tokio::test]
async fn chapter_selection_stays_within_bounds() {
    let (mut app, _api) = test_app_with_project(outlined_project());
    app.view = AppView::Writing;
    app.step = WorkflowStep::Writing;

    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.writing.selected_chapter, 1);

    for _ in 0..20 {
        app.handle_key(key(KeyCode::Down));
    }
    assert_eq!(app.writing.selected_chapter, 10);
}

#[tokio::test]
async fn x_cycles_the_export_format() {
    let (mut app, _api) = test_app_with_project(outlined_project());
    app.view = AppView::Writing;
    app.step = WorkflowStep::Writing;

    app.handle_key(char_key('x'));
    assert_eq!(app.writing.export_format, ExportFormat::Pdf);
    app.handle_key(char_key('x'));
    assert_eq!(app.writing.export_format, ExportFormat::Docx);
    app.handle_key(char_key('x'));
    assert_eq!(app.writing.export_format, ExportFormat::Html);
}

#[tokio::test]
async fn esc_from_writing_returns_to_review() {
    let (mut app, _api) = test_app_with_project(outlined_project());
    app.view = AppView::Writing;
    app.step = WorkflowStep::Writing;

    app.handle_key(key(KeyCode::Esc));

    assert_eq!(app.step, WorkflowStep::OutlineReview);
}

#[tokio::test]
async fn outline_editor_captures_keys_while_editing() {
    let (mut app, _api) = test_app_with_project(outlined_project());
    app.view = AppView::Writing;
    app.step = WorkflowStep::OutlineReview;

    app.handle_key(char_key('e'));
    assert!(app.outline.editing);

    // 'r' edits the buffer instead of regenerating.
    app.handle_key(char_key('r'));
    assert!(!app.outline_busy);
    assert!(app.outline.text().contains('r'));

    app.handle_key(key(KeyCode::Esc));
    assert!(!app.outline.editing);
}

#[tokio::test]
async fn saving_the_outline_persists_the_edit() {
    let (mut app, api) = test_app_with_project(outlined_project());
    app.view = AppView::Writing;
    app.step = WorkflowStep::OutlineReview;

    app.handle_key(char_key('e'));
    app.handle_key(char_key('!'));
    app.handle_key(ctrl_key('s'));
    settle(&mut app).await;

    assert!(!app.outline.editing);
    assert!(
        api.recorded_calls()
            .contains(&Call::UpdateOutline("p1".to_string()))
    );
    assert!(app.session.outline.contains('!'));
}

#[tokio::test]
async fn paste_lands_in_the_active_form_field() {
    let (mut app, _api) = test_app();
    app.handle_key(char_key('n'));

    app.handle_paste("Pasted\r\nTitle");

    assert_eq!(app.form.title, "Pasted Title");
}

#[tokio::test]
async fn paste_is_ignored_outside_editors_and_form() {
    let (mut app, _api) = test_app_with_project(outlined_project());
    app.view = AppView::Writing;
    app.step = WorkflowStep::OutlineReview;

    app.handle_paste("stray");

    assert_eq!(app.session.outline, "<h1>Outline</h1>");
    assert!(!app.outline.editing);
}

#[tokio::test]
async fn enter_opens_the_selected_project() {
    let (mut app, api) = test_app();
    app.dashboard.projects = vec![outlined_project()];

    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;

    assert!(
        api.recorded_calls()
            .contains(&Call::GetProject("p1".to_string()))
    );
}
