//! docrag-text
//!
//! Raw-text fallback search and excerpt helpers.
pub mod search;

pub use search::{excerpt, fallback_search};
