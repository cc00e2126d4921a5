//! Domain records produced by the extractor
//!
//! Every record is an immutable value built in a single extraction pass.

use serde::{Deserialize, Serialize};

/// A post or comment author as presented by the source page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub profile_url: String,
}

impl Author {
    pub fn new(name: impl Into<String>, profile_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_url: profile_url.into(),
        }
    }
}

/// A single comment on a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: Author,

    /// Name of the author this comment replies to, empty if none
    pub in_reply_to_author_name: String,

    /// Reply depth, derived from the comment's DOM ancestry
    pub nesting_level: u32,

    pub body: String,

    pub like_count: u32,

    /// Site-formatted timestamp, kept verbatim
    pub created_at: String,

    pub permalink: String,
}

/// A discussion thread with its comments in page order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    pub author: Author,
    pub body: String,
    pub created_at: String,
    pub comments: Vec<Comment>,

    /// 0 when the page shows no view counter
    pub view_count: u64,

    pub url: String,
}

/// Summary of a topic without its body and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicHead {
    pub title: String,
    pub author: Author,
    pub created_at: String,
    pub view_count: u64,
    pub comment_count: usize,
    pub url: String,
}

impl From<&Topic> for TopicHead {
    fn from(topic: &Topic) -> Self {
        Self {
            title: topic.title.clone(),
            author: topic.author.clone(),
            created_at: topic.created_at.clone(),
            view_count: topic.view_count,
            comment_count: topic.comments.len(),
            url: topic.url.clone(),
        }
    }
}
