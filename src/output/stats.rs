//! Statistics generation from the topic cache
//!
//! This module provides functionality for extracting and displaying
//! cache statistics from the storage layer.

use crate::storage::{StorageResult, TopicStore};

/// Cache statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Number of cached topics
    pub total_topics: u64,

    /// Number of cached comments across all topics
    pub total_comments: u64,

    /// When the most recent batch was stored
    pub latest_stored_at: Option<String>,
}

impl CacheStatistics {
    /// Average comments per topic, 0 for an empty cache
    pub fn comments_per_topic(&self) -> f64 {
        if self.total_topics == 0 {
            0.0
        } else {
            self.total_comments as f64 / self.total_topics as f64
        }
    }
}

/// Loads statistics from storage
pub fn load_statistics(storage: &dyn TopicStore) -> StorageResult<CacheStatistics> {
    Ok(CacheStatistics {
        total_topics: storage.count_topics()?,
        total_comments: storage.count_comments()?,
        latest_stored_at: storage.latest_stored_at()?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CacheStatistics) {
    println!("=== Cache Statistics ===\n");
    println!("  Cached topics: {}", stats.total_topics);
    println!("  Cached comments: {}", stats.total_comments);
    println!("  Comments per topic: {:.1}", stats.comments_per_topic());
    match &stats.latest_stored_at {
        Some(at) => println!("  Last stored: {}", at),
        None => println!("  Last stored: never"),
    }
}
