//! View state shared between the session and the renderers.
//!
//! The session rebuilds `visible_lines` on filter-triggering events; scroll events only
//! touch the viewport. Renderers read this state and never mutate source data.

use crate::filter::ViewLine;
use crate::render::viewport::{materialize, DisplayRow, RenderPhase, Viewport};
use crate::source::SYNTHETIC_SOURCE_NAME;

/// Why the viewport shows no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Nothing is loaded or active
    NoSource,
    /// The active real source has no lines passing the filter
    NoMatches,
    /// The mass search found nothing
    NoResults,
}

impl Placeholder {
    pub fn message(self) -> &'static str {
        match self {
            Placeholder::NoSource => "Open a .log or .txt file to begin.",
            Placeholder::NoMatches => "No matching lines.",
            Placeholder::NoResults => "No result found.",
        }
    }
}

/// Everything a renderer needs for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame<'a> {
    pub phase: RenderPhase,
    pub total_height: u64,
    pub scroll_offset: u64,
    pub rows: Vec<DisplayRow<'a>>,
    pub placeholder: Option<Placeholder>,
}

#[derive(Debug)]
pub struct ViewState {
    active_source: Option<String>,
    visible_lines: Vec<ViewLine>,
    /// Process-wide toggle, independent of the active source
    pub error_only: bool,
    viewport: Viewport,
    phase: RenderPhase,
}

impl ViewState {
    pub fn new(row_height: u64, viewport_height: u64) -> Self {
        Self {
            active_source: None,
            visible_lines: Vec::new(),
            error_only: false,
            viewport: Viewport::new(row_height, viewport_height),
            phase: RenderPhase::Idle,
        }
    }

    pub fn active_source(&self) -> Option<&str> {
        self.active_source.as_deref()
    }

    pub fn is_synthetic_active(&self) -> bool {
        self.active_source.as_deref() == Some(SYNTHETIC_SOURCE_NAME)
    }

    pub fn visible_lines(&self) -> &[ViewLine] {
        &self.visible_lines
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    /// Install a freshly computed view. Scroll always returns to the top.
    pub fn show(&mut self, active_source: impl Into<String>, visible_lines: Vec<ViewLine>) {
        self.active_source = Some(active_source.into());
        self.visible_lines = visible_lines;
        self.viewport.reset();
        self.phase = RenderPhase::Filtered;
    }

    /// Drop the active source and go idle.
    pub fn clear(&mut self) {
        self.active_source = None;
        self.visible_lines.clear();
        self.viewport.reset();
        self.phase = RenderPhase::Idle;
    }

    /// Scroll by whole rows. Idle views ignore scrolling. Returns true if it moved.
    pub fn scroll_rows(&mut self, rows: i64) -> bool {
        if self.phase == RenderPhase::Idle {
            return false;
        }
        let moved = self.viewport.scroll_rows(rows, self.visible_lines.len());
        self.sync_phase();
        moved
    }

    pub fn scroll_to_top(&mut self) -> bool {
        self.scroll_to(0)
    }

    pub fn scroll_to_bottom(&mut self) -> bool {
        self.scroll_to(u64::MAX)
    }

    fn scroll_to(&mut self, offset: u64) -> bool {
        if self.phase == RenderPhase::Idle {
            return false;
        }
        let moved = self.viewport.scroll_to(offset, self.visible_lines.len());
        self.sync_phase();
        moved
    }

    /// Rows per page, used for page up/down.
    pub fn page_rows(&self) -> u64 {
        self.viewport.page_rows()
    }

    pub fn resize(&mut self, viewport_height: u64) {
        self.viewport
            .resize(viewport_height, self.visible_lines.len());
        self.sync_phase();
    }

    /// Materialize the current window.
    pub fn frame(&self) -> RenderFrame<'_> {
        let placeholder = match self.phase {
            RenderPhase::Idle => Some(Placeholder::NoSource),
            _ if self.visible_lines.is_empty() => Some(if self.is_synthetic_active() {
                Placeholder::NoResults
            } else {
                Placeholder::NoMatches
            }),
            _ => None,
        };

        RenderFrame {
            phase: self.phase,
            total_height: self.viewport.total_height(self.visible_lines.len()),
            scroll_offset: self.viewport.scroll_offset(),
            rows: materialize(
                &self.visible_lines,
                &self.viewport,
                self.is_synthetic_active(),
            ),
            placeholder,
        }
    }

    fn sync_phase(&mut self) {
        if self.phase == RenderPhase::Idle {
            return;
        }
        self.phase = if self.viewport.scroll_offset() > 0 {
            RenderPhase::Scrolled
        } else {
            RenderPhase::Filtered
        };
    }
}
