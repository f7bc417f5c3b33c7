//! Virtualized viewport over the visible lines.
//!
//! Only the rows intersecting the viewport are materialized. Each row is positioned at
//! `index * row_height`, and the total content height is `len * row_height`, so a
//! scrollbar can reflect the full list without any other row existing. Every method
//! here is O(window), independent of how many lines are visible.

use crate::filter::ViewLine;
use crate::source::SourceColor;
use std::borrow::Cow;
use std::ops::RangeInclusive;

/// Render lifecycle of the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    /// No active source
    Idle,
    /// Visible lines freshly computed, scrolled to the top
    Filtered,
    /// Same visible lines, scroll offset > 0
    Scrolled,
}

/// Scroll geometry in abstract units; with a row height of 1 a unit is one terminal row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    row_height: u64,
    height: u64,
    scroll_offset: u64,
}

impl Viewport {
    /// A zero row height is treated as 1.
    pub fn new(row_height: u64, height: u64) -> Self {
        Self {
            row_height: row_height.max(1),
            height,
            scroll_offset: 0,
        }
    }

    pub fn row_height(&self) -> u64 {
        self.row_height
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Height of the sizing element backing the scrollbar.
    pub fn total_height(&self, len: usize) -> u64 {
        len as u64 * self.row_height
    }

    /// Largest offset that still keeps the viewport filled.
    pub fn max_offset(&self, len: usize) -> u64 {
        self.total_height(len).saturating_sub(self.height)
    }

    /// Inclusive index range to materialize, or `None` when nothing is visible
    /// (no lines, or a zero-height viewport).
    ///
    /// `start = floor(offset / H)`, `end = min(len - 1, ceil((offset + height) / H))`.
    pub fn window(&self, len: usize) -> Option<RangeInclusive<usize>> {
        if len == 0 || self.height == 0 {
            return None;
        }
        let start = self.scroll_offset / self.row_height;
        let end = (self.scroll_offset + self.height).div_ceil(self.row_height);
        let last = len as u64 - 1;
        if start > last {
            return None;
        }
        Some(start as usize..=end.min(last) as usize)
    }

    /// Jump to an absolute offset, clamped to the content. Returns true if it moved.
    pub fn scroll_to(&mut self, offset: u64, len: usize) -> bool {
        let clamped = offset.min(self.max_offset(len));
        let moved = clamped != self.scroll_offset;
        self.scroll_offset = clamped;
        moved
    }

    /// Move by `rows` (negative scrolls up). Returns true if it moved.
    pub fn scroll_rows(&mut self, rows: i64, len: usize) -> bool {
        let delta = rows.unsigned_abs().saturating_mul(self.row_height);
        let target = if rows < 0 {
            self.scroll_offset.saturating_sub(delta)
        } else {
            self.scroll_offset.saturating_add(delta)
        };
        self.scroll_to(target, len)
    }

    /// Number of whole rows the viewport shows; at least one unless the height is zero.
    pub fn page_rows(&self) -> u64 {
        if self.height == 0 {
            return 0;
        }
        (self.height / self.row_height).max(1)
    }

    pub fn reset(&mut self) {
        self.scroll_offset = 0;
    }

    /// Change the viewport height, re-clamping the current offset.
    pub fn resize(&mut self, height: u64, len: usize) {
        self.height = height;
        self.scroll_offset = self.scroll_offset.min(self.max_offset(len));
    }
}

/// One materialized display row.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow<'a> {
    /// Index into the visible lines
    pub index: usize,
    /// Absolute offset of the row's top edge
    pub top: u64,
    /// 1-based line number within the originating source
    pub line_number: usize,
    pub text: Cow<'a, str>,
    /// Set only when rows come from the synthetic source
    pub color: Option<SourceColor>,
}

/// Build rows for exactly the indices in the viewport window.
///
/// With `synthetic` set, text is prefixed with `[source]` and carries the source color.
pub fn materialize<'a>(
    lines: &'a [ViewLine],
    viewport: &Viewport,
    synthetic: bool,
) -> Vec<DisplayRow<'a>> {
    let Some(window) = viewport.window(lines.len()) else {
        return Vec::new();
    };

    lines[window.clone()]
        .iter()
        .zip(window)
        .map(|(line, index)| DisplayRow {
            index,
            top: index as u64 * viewport.row_height(),
            line_number: line.original_index + 1,
            text: if synthetic {
                Cow::Owned(format!("[{}] {}", line.source_name, line.text))
            } else {
                Cow::Borrowed(line.text.as_str())
            },
            color: synthetic.then_some(line.source_color),
        })
        .collect()
}
