//! Bookwright - TUI client for an AI book-writing service.
//!
//! Drives the four-step book workflow (setup, outline, review, writing)
//! against a REST backend, with credit-gated bulk chapter generation and
//! export to HTML, PDF, and DOCX.

pub mod api;
pub mod app;
pub mod cli;
pub mod core;
pub mod tui;
