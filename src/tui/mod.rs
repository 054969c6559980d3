//! Terminal UI plumbing: theme, terminal setup, and widgets.

pub mod setup;
pub mod theme;
pub mod widgets;

pub use setup::TerminalEventGuard;
pub use theme::Theme;
