//! Extraction of forum entities from parsed pages
//!
//! This module is a pure function of DOM to entities:
//! - listing pages → topic reference URLs
//! - topic pages → a [`Topic`](crate::model::Topic) with its comment list
//!
//! It performs no I/O and no recovery. Errors from the structural query layer
//! propagate unchanged, except for the optional fields (reply-to author, like
//! count, view count) which default when their markup is absent.

mod comments;
pub mod layout;
mod listing;
mod topic;

pub use comments::extract_comments;
pub use listing::extract_topic_references;
pub use topic::extract_topic;
