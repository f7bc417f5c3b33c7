//! Terminal user interface built on ratatui.

pub mod renderer;
pub mod status;
pub mod terminal;
pub mod theme;

pub use renderer::UIRenderer;
pub use status::{StatusLine, StatusMessage};
pub use terminal::TerminalUI;
pub use theme::ColorTheme;

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
