//! Topic page extraction

use crate::dom::{Document, Node, QueryResult};
use crate::extract::comments::extract_comments;
use crate::extract::layout;
use crate::model::{Author, Topic};

/// Extracts a complete topic, comments included, from a topic page
///
/// Any structural mismatch aborts the whole page; only the view counter is
/// optional and defaults to 0.
pub fn extract_topic(topic_page: &Document, source_url: &str) -> QueryResult<Topic> {
    let root = topic_page.root();
    let container = root.first_match(&layout::TOPIC_CONTAINER)?;

    Ok(Topic {
        title: container
            .first_child(layout::TOPIC_TITLE_TAG)?
            .text_content(),
        author: topic_author(root)?,
        body: container.first_match(&layout::TOPIC_BODY)?.text_content(),
        created_at: root.first_match(&layout::TOPIC_DATE)?.text_content(),
        comments: extract_comments(topic_page)?,
        view_count: view_count(root)?,
        url: source_url.to_string(),
    })
}

fn topic_author(root: Node<'_>) -> QueryResult<Author> {
    let link = root
        .first_match(&layout::TOPIC_AUTHOR_BOX)?
        .first_child("a")?;
    Ok(Author::new(
        link.text_content(),
        link.attribute_value(layout::TOPIC_AUTHOR_HREF_ATTR)?,
    ))
}

fn view_count(root: Node<'_>) -> QueryResult<u64> {
    if !root.exists(&layout::TOPIC_PAGEVIEWS) {
        return Ok(0);
    }
    root.first_match(&layout::TOPIC_PAGEVIEWS)?
        .first_integer_in_content()
}
