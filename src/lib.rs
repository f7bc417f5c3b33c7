//! # logscope - Multi-Source Terminal Log Viewer
//!
//! Load several log files side by side, filter each one by a term or by error lines,
//! search across a chosen set of sources at once, and rewrite text in place. Only the
//! rows inside the viewport are ever materialized, so very long logs stay responsive.
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`source`] - The store of loaded sources, their colors and file validation
//! - [`filter`] - Per-source line filtering
//! - [`search`] - Mass search across sources and text replacement
//! - [`render`] - Virtualized viewport, view state and the terminal UI
//! - [`session`] - The viewer context every user action goes through
//! - [`input`] - Terminal events to input actions
//! - [`app`] - Event loop and file I/O
//! - [`config`] - Viewer settings

// Core modules
pub mod config;
pub mod error;

// Domain
pub mod filter;
pub mod search;
pub mod session;
pub mod source;

// Terminal front end
pub mod app;
pub mod input;
pub mod render;

// Re-export commonly used types for convenience
pub use error::{LogscopeError, Result};

// Public API surface for external usage
pub use app::Application;
pub use config::Config;
pub use filter::{filter, ViewLine};
pub use search::{mass_search, replace_all, replace_line};
pub use session::{Command, ExportPayload, Outcome, Session};
pub use source::{LogSource, SourceStore};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
