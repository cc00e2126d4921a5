//! Output module for presenting harvested topics
//!
//! This module handles:
//! - Rendering topics, topic heads and references as JSON or markdown
//! - Cache statistics

mod markdown;
pub mod stats;

pub use markdown::{format_heads_markdown, format_topic_markdown, format_topics_markdown};
pub use stats::{load_statistics, print_statistics, CacheStatistics};

use crate::model::{Topic, TopicHead};
use crate::TrawlError;

/// Rendering format for command output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

/// Renders topics in the requested format
pub fn render_topics(topics: &[Topic], format: OutputFormat) -> Result<String, TrawlError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(topics)?),
        OutputFormat::Markdown => Ok(format_topics_markdown(topics)),
    }
}

/// Renders topic heads in the requested format
pub fn render_heads(heads: &[TopicHead], format: OutputFormat) -> Result<String, TrawlError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(heads)?),
        OutputFormat::Markdown => Ok(format_heads_markdown(heads)),
    }
}

/// Renders topic references, one per line for markdown
pub fn render_references(references: &[String], format: OutputFormat) -> Result<String, TrawlError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(references)?),
        OutputFormat::Markdown => Ok(references
            .iter()
            .map(|r| format!("- <{}>", r))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
