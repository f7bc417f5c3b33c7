//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait for drawing a session and managing terminal
//! lifecycle hooks such as initialization and cleanup.

use crate::error::Result;
use crate::render::ui::status::StatusLine;
use crate::session::Session;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Draw the tab bar, the materialized viewport rows and the status line.
    ///
    /// Implementations must only read `session.frame()` rows; they never walk the full
    /// list of visible lines.
    fn render(&mut self, session: &Session, status: &StatusLine) -> Result<()>;

    /// Set up raw mode, the alternate screen and mouse capture
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal state
    fn cleanup(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)

    /// Rows available to the viewport for a terminal `height`
    fn viewport_rows(&self, height: u16) -> u16 {
        // tab bar + status line
        height.saturating_sub(2)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock UI renderer for testing
    ///
    /// Records how many rows each render materialized so tests can check the window size.
    pub struct MockUIRenderer {
        pub render_count: usize,
        pub terminal_size: (u16, u16),
        pub is_initialized: bool,
        pub last_row_count: usize,
        pub last_status: String,
    }

    impl Default for MockUIRenderer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockUIRenderer {
        pub fn new() -> Self {
            Self {
                render_count: 0,
                terminal_size: (80, 24),
                is_initialized: false,
                last_row_count: 0,
                last_status: String::new(),
            }
        }

        pub fn set_terminal_size(&mut self, width: u16, height: u16) {
            self.terminal_size = (width, height);
        }
    }

    impl UIRenderer for MockUIRenderer {
        fn render(&mut self, session: &Session, status: &StatusLine) -> Result<()> {
            self.render_count += 1;
            self.last_row_count = session.frame().rows.len();
            self.last_status = status.format(session);
            Ok(())
        }

        fn initialize(&mut self) -> Result<()> {
            self.is_initialized = true;
            Ok(())
        }

        fn cleanup(&mut self) -> Result<()> {
            self.is_initialized = false;
            Ok(())
        }

        fn get_terminal_size(&self) -> Result<(u16, u16)> {
            Ok(self.terminal_size)
        }
    }

    #[test]
    fn test_mock_renderer_basic() {
        let mut renderer = MockUIRenderer::new();
        let mut session = Session::default();
        let status = StatusLine::new();

        renderer.initialize().unwrap();
        assert!(renderer.is_initialized);

        renderer.render(&session, &status).unwrap();
        assert_eq!(renderer.render_count, 1);
        assert_eq!(renderer.last_row_count, 0);

        session.import("a.log", "one\ntwo").unwrap();
        renderer.render(&session, &status).unwrap();
        assert_eq!(renderer.last_row_count, 2);
        assert!(renderer.last_status.starts_with("a.log"));

        renderer.cleanup().unwrap();
        assert!(!renderer.is_initialized);
    }

    #[test]
    fn test_viewport_rows_reserve_chrome() {
        let mut renderer = MockUIRenderer::new();
        renderer.set_terminal_size(120, 30);
        let (_, height) = renderer.get_terminal_size().unwrap();
        assert_eq!(renderer.viewport_rows(height), 28);
        assert_eq!(renderer.viewport_rows(1), 0);
    }
}
