//! Storage traits and error types
//!
//! This module defines the trait interface for topic cache backends and
//! associated error types.

use crate::model::Topic;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Cache collaborator for extracted topics
///
/// The crawl core never calls this; front ends store what they fetched and
/// read it back later.
pub trait TopicStore {
    /// Stores topics, replacing any cached topic with the same URL
    ///
    /// # Returns
    ///
    /// The number of topics written
    fn store(&mut self, topics: &[Topic]) -> StorageResult<usize>;

    /// Loads up to `limit` topics, most recently stored first
    ///
    /// Topics stored in the same batch come back in reverse input order.
    fn load_recent(&self, limit: usize) -> StorageResult<Vec<Topic>>;

    /// Deletes every cached topic and comment
    ///
    /// # Returns
    ///
    /// The number of topics deleted
    fn clear(&mut self) -> StorageResult<usize>;

    /// Counts cached topics
    fn count_topics(&self) -> StorageResult<u64>;

    /// Counts cached comments
    fn count_comments(&self) -> StorageResult<u64>;

    /// Timestamp of the most recent store, if any
    fn latest_stored_at(&self) -> StorageResult<Option<String>>;
}
