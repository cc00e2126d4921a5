//! Listing page extraction

use crate::dom::{Document, Node, QueryResult};
use crate::extract::layout;

/// Extracts topic reference URLs from a listing page in document order
///
/// An empty result is valid and marks the end of pagination. The link value is
/// returned exactly as written in the markup (relative links stay relative).
///
/// # Example
///
/// ```
/// use topic_trawl::dom::Document;
/// use topic_trawl::extract::extract_topic_references;
///
/// let page = Document::parse(
///     "https://dou.ua/forums/page/1",
///     r#"<article><h2><a href="/t/1">One</a></h2></article>"#,
/// );
/// assert_eq!(extract_topic_references(&page).unwrap(), vec!["/t/1"]);
/// ```
pub fn extract_topic_references(listing: &Document) -> QueryResult<Vec<String>> {
    listing
        .root()
        .all_matches(&layout::LISTING_ENTRY)
        .into_iter()
        .map(topic_link)
        .collect()
}

fn topic_link(entry: Node<'_>) -> QueryResult<String> {
    let href = entry
        .first_child(layout::LISTING_HEADING_TAG)?
        .first_child("a")?
        .attribute_value(layout::LISTING_LINK_HREF_ATTR)?;
    Ok(href.to_string())
}
