//! Comment tree extraction
//!
//! Comments are listed flat in document order. Reply depth is not a counter in
//! the markup: it is read from the class of the comment container, which sits a
//! fixed number of parent hops above the node holding the comment fields.

use crate::dom::{Document, Node, QueryError, QueryResult};
use crate::extract::layout;
use crate::model::{Author, Comment};

/// Extracts every comment on a topic page in document order
pub fn extract_comments(topic_page: &Document) -> QueryResult<Vec<Comment>> {
    topic_page
        .root()
        .all_matches(&layout::COMMENT_CONTAINER)
        .into_iter()
        .map(|container| working_node(container).and_then(comment))
        .collect()
}

/// Descends from a comment container to the node whose children hold the fields
fn working_node(container: Node<'_>) -> QueryResult<Node<'_>> {
    layout::COMMENT_WORKING_PATH
        .iter()
        .try_fold(container, |node, tag| node.first_child(tag))
}

fn comment(node: Node<'_>) -> QueryResult<Comment> {
    let header = node.nth_child_of_tag("div", layout::COMMENT_HEADER_DIV)?;
    let author_link = header.nth_child_of_tag("a", layout::COMMENT_AUTHOR_LINK)?;
    let date_link = header.nth_child_of_tag("a", layout::COMMENT_DATE_LINK)?;

    Ok(Comment {
        author: Author::new(
            author_link.text_content(),
            author_link.attribute_value(layout::COMMENT_LINK_HREF_ATTR)?,
        ),
        in_reply_to_author_name: reply_to_author_name(node)?,
        nesting_level: nesting_level(node)?,
        body: node
            .nth_child_of_tag("div", layout::COMMENT_BODY_DIV)?
            .text_content(),
        like_count: like_count(node)?,
        created_at: date_link.text_content(),
        permalink: date_link
            .attribute_value(layout::COMMENT_LINK_HREF_ATTR)?
            .to_string(),
    })
}

fn reply_to_author_name(node: Node<'_>) -> QueryResult<String> {
    if !node.has_child("div", layout::COMMENT_REPLY_TO_DIV) {
        return Ok(String::new());
    }
    let reply_box = node.nth_child_of_tag("div", layout::COMMENT_REPLY_TO_DIV)?;
    if !reply_box.has_child("a", 0) {
        return Ok(String::new());
    }
    Ok(reply_box.first_child("a")?.text_content())
}

fn like_count(node: Node<'_>) -> QueryResult<u32> {
    if !node.has_child("div", layout::COMMENT_LIKES_DIV) {
        return Ok(0);
    }
    let likes_box = node.nth_child_of_tag("div", layout::COMMENT_LIKES_DIV)?;
    if !likes_box.has_child("span", 0) {
        return Ok(0);
    }
    let count = likes_box.first_child("span")?.first_integer_in_content()?;
    u32::try_from(count).map_err(|_| QueryError::Format(format!("like count {} out of range", count)))
}

fn nesting_level(node: Node<'_>) -> QueryResult<u32> {
    let ancestor = (0..layout::COMMENT_LEVEL_ANCESTOR_HOPS).try_fold(node, |n, _| n.parent())?;
    let level = ancestor.integer_attribute(layout::COMMENT_LEVEL_ATTR)?;
    u32::try_from(level).map_err(|_| QueryError::Format(format!("nesting level {} out of range", level)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment_markup(level: u32, author: &str, body: &str, extra: &str) -> String {
        format!(
            r#"<div class="b-comment level-{level}"><div><div>
                <div class="comment-header">
                    <a class="avatar" href="https://dou.ua/users/{author}/">{author}</a>
                    <a class="comment-link" href="https://dou.ua/forums/topic/1/#{level}">12.01.2024 10:0{level}</a>
                </div>
                <div class="text">{body}</div>
                {extra}
            </div></div></div>"#
        )
    }

    fn page(comments: &[String]) -> Document {
        Document::parse(
            "https://dou.ua/forums/topic/1/",
            &format!(
                "<html><body><div id=\"commentsList\">{}</div></body></html>",
                comments.concat()
            ),
        )
    }

    #[test]
    fn test_comment_fields() {
        let d = page(&[comment_markup(
            1,
            "bob",
            "Reply body",
            r#"<div class="reply-to"><a href="/users/alice/">alice</a></div>
               <div class="likes"><span>7 likes</span></div>"#,
        )]);
        let comments = extract_comments(&d).unwrap();
        assert_eq!(comments.len(), 1);

        let c = &comments[0];
        assert_eq!(c.author.name, "bob");
        assert_eq!(c.author.profile_url, "https://dou.ua/users/bob/");
        assert_eq!(c.created_at, "12.01.2024 10:01");
        assert_eq!(c.permalink, "https://dou.ua/forums/topic/1/#1");
        assert_eq!(c.body, "Reply body");
        assert_eq!(c.in_reply_to_author_name, "alice");
        assert_eq!(c.like_count, 7);
        assert_eq!(c.nesting_level, 1);
    }

    #[test]
    fn test_document_order_and_levels() {
        let d = page(&[
            comment_markup(0, "alice", "first", ""),
            comment_markup(1, "bob", "second", ""),
            comment_markup(2, "carol", "third", ""),
            comment_markup(0, "dave", "fourth", ""),
        ]);
        let comments = extract_comments(&d).unwrap();
        let bodies: Vec<&str> = comments.iter().map(|c| c.body.as_str()).collect();
        let levels: Vec<u32> = comments.iter().map(|c| c.nesting_level).collect();
        assert_eq!(bodies, vec!["first", "second", "third", "fourth"]);
        assert_eq!(levels, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_optional_fields_default_when_boxes_missing() {
        let d = page(&[comment_markup(0, "alice", "plain", "")]);
        let c = &extract_comments(&d).unwrap()[0];
        assert_eq!(c.in_reply_to_author_name, "");
        assert_eq!(c.like_count, 0);
    }

    #[test]
    fn test_optional_fields_default_when_boxes_empty() {
        let d = page(&[comment_markup(
            0,
            "alice",
            "plain",
            r#"<div class="reply-to"></div><div class="likes"><b>none</b></div>"#,
        )]);
        let c = &extract_comments(&d).unwrap()[0];
        assert_eq!(c.in_reply_to_author_name, "");
        assert_eq!(c.like_count, 0);
    }

    #[test]
    fn test_missing_date_link_aborts() {
        let d = page(&[r#"<div class="b-comment level-0"><div><div>
                <div><a class="avatar" href="/users/x/">x</a></div>
                <div>body</div>
            </div></div></div>"#
            .to_string()]);
        assert!(matches!(
            extract_comments(&d).unwrap_err(),
            QueryError::Index { .. }
        ));
    }

    #[test]
    fn test_no_comments() {
        let d = page(&[]);
        assert!(extract_comments(&d).unwrap().is_empty());
    }
}
