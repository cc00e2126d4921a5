//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the TopicStore trait.

use crate::model::{Author, Comment, Topic};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{StorageError, StorageResult, TopicStore};
use chrono::{SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteTopicStore {
    conn: Connection,
}

impl SqliteTopicStore {
    /// Opens (or creates) the database at `path` and ensures the schema exists
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn load_comments(&self, topic_id: i64) -> StorageResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(
            "SELECT author_name, author_url, in_reply_to_author_name, nesting_level, body,
             like_count, created_at, permalink
             FROM comments WHERE topic_id = ?1 ORDER BY position ASC",
        )?;

        let comments = stmt
            .query_map(params![topic_id], |row| {
                Ok(Comment {
                    author: Author::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?),
                    in_reply_to_author_name: row.get(2)?,
                    nesting_level: row.get(3)?,
                    body: row.get(4)?,
                    like_count: row.get(5)?,
                    created_at: row.get(6)?,
                    permalink: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(comments)
    }
}

/// A topic row before its comments are attached
struct TopicRow {
    id: i64,
    topic: Topic,
}

fn topic_row(row: &Row<'_>) -> rusqlite::Result<TopicRow> {
    let stored_views: i64 = row.get(7)?;
    let view_count = u64::try_from(stored_views)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(7, Type::Integer, Box::new(e)))?;
    Ok(TopicRow {
        id: row.get(0)?,
        topic: Topic {
            url: row.get(1)?,
            title: row.get(2)?,
            author: Author::new(row.get::<_, String>(3)?, row.get::<_, String>(4)?),
            body: row.get(5)?,
            created_at: row.get(6)?,
            comments: Vec::new(),
            view_count,
        },
    })
}

impl TopicStore for SqliteTopicStore {
    fn store(&mut self, topics: &[Topic]) -> StorageResult<usize> {
        let stored_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let tx = self.conn.transaction()?;

        for topic in topics {
            let view_count = i64::try_from(topic.view_count).map_err(|_| {
                StorageError::Serialization(format!(
                    "view count {} of {} does not fit in SQLite",
                    topic.view_count, topic.url
                ))
            })?;

            // Replacing by URL keeps ids increasing, which orders same-batch rows
            tx.execute("DELETE FROM topics WHERE url = ?1", params![topic.url])?;
            tx.execute(
                "INSERT INTO topics (url, title, author_name, author_url, body, created_at,
                 view_count, stored_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    topic.url,
                    topic.title,
                    topic.author.name,
                    topic.author.profile_url,
                    topic.body,
                    topic.created_at,
                    view_count,
                    stored_at
                ],
            )?;
            let topic_id = tx.last_insert_rowid();

            for (position, comment) in topic.comments.iter().enumerate() {
                tx.execute(
                    "INSERT INTO comments (topic_id, position, author_name, author_url,
                     in_reply_to_author_name, nesting_level, body, like_count, created_at, permalink)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        topic_id,
                        position as i64,
                        comment.author.name,
                        comment.author.profile_url,
                        comment.in_reply_to_author_name,
                        comment.nesting_level,
                        comment.body,
                        comment.like_count,
                        comment.created_at,
                        comment.permalink
                    ],
                )?;
            }
        }

        tx.commit()?;
        tracing::debug!("Stored {} topics at {}", topics.len(), stored_at);
        Ok(topics.len())
    }

    fn load_recent(&self, limit: usize) -> StorageResult<Vec<Topic>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(
            "SELECT id, url, title, author_name, author_url, body, created_at, view_count
             FROM topics ORDER BY stored_at DESC, id DESC LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![limit], topic_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let mut topics = Vec::with_capacity(rows.len());
        for TopicRow { id, mut topic } in rows {
            topic.comments = self.load_comments(id)?;
            topics.push(topic);
        }

        Ok(topics)
    }

    fn clear(&mut self) -> StorageResult<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM comments", [])?;
        let deleted = tx.execute("DELETE FROM topics", [])?;
        tx.commit()?;
        Ok(deleted)
    }

    fn count_topics(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM topics", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_comments(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM comments", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn latest_stored_at(&self) -> StorageResult<Option<String>> {
        let latest: Option<String> = self
            .conn
            .query_row("SELECT MAX(stored_at) FROM topics", [], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()?
            .flatten();
        Ok(latest)
    }
}
