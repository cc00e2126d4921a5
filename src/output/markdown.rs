//! Markdown rendering
//!
//! This module renders topics and topic heads as human-readable markdown.
//! Comment replies are indented by their nesting level.

use crate::model::{Comment, Topic, TopicHead};

/// Deepest reply level rendered as indentation; deeper replies stay at this depth
const MAX_INDENT_LEVEL: u32 = 32;

/// Formats a list of topics as one markdown document
pub fn format_topics_markdown(topics: &[Topic]) -> String {
    topics
        .iter()
        .map(format_topic_markdown)
        .collect::<Vec<_>>()
        .join("\n---\n\n")
}

/// Formats one topic, its metadata and its comment tree
pub fn format_topic_markdown(topic: &Topic) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", topic.title));
    md.push_str(&format!(
        "- **Author**: [{}]({})\n",
        topic.author.name, topic.author.profile_url
    ));
    md.push_str(&format!("- **Created**: {}\n", topic.created_at));
    md.push_str(&format!("- **Views**: {}\n", topic.view_count));
    md.push_str(&format!("- **URL**: <{}>\n\n", topic.url));
    md.push_str(&format!("{}\n\n", topic.body));

    md.push_str(&format!("## Comments ({})\n\n", topic.comments.len()));
    for comment in &topic.comments {
        md.push_str(&format_comment_line(comment));
    }

    md
}

/// Formats topic heads as a markdown table
pub fn format_heads_markdown(heads: &[TopicHead]) -> String {
    let mut md = String::new();

    md.push_str("| Title | Author | Created | Views | Comments |\n");
    md.push_str("|-------|--------|---------|-------|----------|\n");
    for head in heads {
        md.push_str(&format!(
            "| [{}]({}) | {} | {} | {} | {} |\n",
            escape_table_cell(&head.title),
            head.url,
            escape_table_cell(&head.author.name),
            escape_table_cell(&head.created_at),
            head.view_count,
            head.comment_count
        ));
    }

    md
}

fn format_comment_line(comment: &Comment) -> String {
    let indent = "  ".repeat(comment.nesting_level.min(MAX_INDENT_LEVEL) as usize);
    let reply = if comment.in_reply_to_author_name.is_empty() {
        String::new()
    } else {
        format!(" → {}", comment.in_reply_to_author_name)
    };

    format!(
        "{}- **{}**{} ([{}]({}), {} likes): {}\n",
        indent,
        comment.author.name,
        reply,
        comment.created_at,
        comment.permalink,
        comment.like_count,
        single_line(&comment.body)
    )
}

/// Collapses whitespace runs so multi-line bodies stay inside one list item
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_table_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}
