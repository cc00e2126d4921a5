//! Structural query layer over parsed HTML
//!
//! This module wraps the `scraper` tree behind a small capability set:
//! - first/all descendants matching a [`Pattern`]
//! - existence checks
//! - indexed child access by tag
//! - positional attribute values
//! - trimmed text content and first-integer extraction
//! - parent navigation
//!
//! The extractor only ever talks to [`Node`]; it never touches raw markup.

mod node;
mod pattern;

pub use node::{Document, Node};
pub use pattern::{AttrPrefix, Pattern};

use thiserror::Error;

/// Errors raised by structural queries
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("No element matches {pattern}")]
    NotFound { pattern: String },

    #[error("No {what} at index {index} ({available} available)")]
    Index {
        what: String,
        index: usize,
        available: usize,
    },

    #[error("Malformed number: {0}")]
    Format(String),
}

/// Result type for structural queries
pub type QueryResult<T> = std::result::Result<T, QueryError>;
