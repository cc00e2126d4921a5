//! Storage module for caching harvested topics
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Storing topics with their comments in page order
//! - Loading the most recently stored topics
//! - Clearing the cache

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteTopicStore;
pub use traits::{StorageError, StorageResult, TopicStore};

use std::path::Path;

/// Initializes or opens a topic cache database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
pub fn open_storage(path: &Path) -> StorageResult<SqliteTopicStore> {
    SqliteTopicStore::new(path)
}
