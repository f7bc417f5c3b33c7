//! Rendering subsystem.
//!
//! - [`viewport`] computes which slice of the visible lines to materialize.
//! - [`state`] holds the view state the session mutates and renderers read.
//! - [`ui`] draws frames to the terminal.

pub mod state;
pub mod ui;
pub mod viewport;

pub use state::{Placeholder, RenderFrame, ViewState};
pub use viewport::{materialize, DisplayRow, RenderPhase, Viewport};
