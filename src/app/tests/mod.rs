//! Tests for the app module.
//!
//! This module is organized into submodules by functionality:
//! - `events` - Key bindings per view and step
//! - `flow` - Workflow event application and step transitions
//! - `helpers` - Shared test utilities
//! - `ui` - Render smoke tests against a `TestBackend`

#[allow(clippy::unwrap_used, clippy::expect_used)]
mod events;
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub mod helpers;
