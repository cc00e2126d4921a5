//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the topic cache.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Cached topics, one row per topic URL
CREATE TABLE IF NOT EXISTS topics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    author_name TEXT NOT NULL,
    author_url TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    view_count INTEGER NOT NULL DEFAULT 0,
    stored_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_topics_stored_at ON topics(stored_at);

-- Comments in page order
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic_id INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    author_name TEXT NOT NULL,
    author_url TEXT NOT NULL,
    in_reply_to_author_name TEXT NOT NULL,
    nesting_level INTEGER NOT NULL,
    body TEXT NOT NULL,
    like_count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    permalink TEXT NOT NULL,
    UNIQUE(topic_id, position)
);

CREATE INDEX IF NOT EXISTS idx_comments_topic ON comments(topic_id);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
