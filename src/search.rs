//! Cross-source search and in-place replacement.
//!
//! - [`mass`] runs one term across several checked sources and tags every hit with its
//!   origin.
//! - [`replace`] rewrites the lines of real sources by literal substitution.

pub mod mass;
pub mod replace;

pub use mass::{mass_search, MassQuery};
pub use replace::{replace_all, replace_line};
