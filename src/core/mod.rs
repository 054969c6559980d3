//! Core workflow logic: step machine, credit tracking, bulk generation,
//! export, and the debounce utility.

pub mod credits;
pub mod debounce;
pub mod export;
pub mod generator;
pub mod progress;
pub mod workflow;

pub use credits::CreditLedger;
pub use debounce::Debouncer;
pub use export::{ExportFormat, artifact_filename, export_book};
pub use generator::run_bulk_generation;
pub use progress::{BatchReport, ChapterProgress, ChapterStatus};
pub use workflow::WorkflowStep;
