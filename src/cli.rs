//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Bookwright - AI book writing client
///
/// Terminal client for the book-writing backend: configure a book, generate
/// an outline and chapters, edit the text, and export the finished book.
#[derive(Parser, Debug)]
#[command(name = "bookwright", version, about, long_about = None)]
pub struct Args {
    /// Base URL of the backend service
    #[arg(long, env = "BOOKWRIGHT_BASE_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Directory exported books are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}
