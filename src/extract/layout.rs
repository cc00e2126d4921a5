//! Site layout table
//!
//! Every pattern, tag and positional offset the extractor relies on is declared
//! here. A markup change on the forum should only require edits in this file.

use crate::dom::Pattern;

// ===== Listing pages =====

/// One topic entry on a listing page (mobile uses `article`, desktop cards)
pub const LISTING_ENTRY: Pattern = Pattern::AnyOf(&[
    Pattern::tag("article"),
    Pattern::prefixed("div", "class", "b-postcard"),
]);

/// Heading inside a listing entry that wraps the topic link
pub const LISTING_HEADING_TAG: &str = "h2";

/// Position of `href` on the listing heading link
pub const LISTING_LINK_HREF_ATTR: usize = 0;

// ===== Topic pages =====

/// The topic container
pub const TOPIC_CONTAINER: Pattern = Pattern::tag("article");

/// Title heading, an immediate child of the container
pub const TOPIC_TITLE_TAG: &str = "h1";

/// First paragraph inside the container holds the body
pub const TOPIC_BODY: Pattern = Pattern::tag("p");

pub const TOPIC_DATE: Pattern = Pattern::prefixed("span", "class", "date");

pub const TOPIC_PAGEVIEWS: Pattern = Pattern::prefixed("span", "class", "pageviews");

/// Container whose first link is the topic author
pub const TOPIC_AUTHOR_BOX: Pattern = Pattern::prefixed("div", "class", "name");

/// Position of `href` on the topic author link
pub const TOPIC_AUTHOR_HREF_ATTR: usize = 0;

// ===== Comments =====

/// One comment container; the class carries the reply depth
pub const COMMENT_CONTAINER: Pattern = Pattern::prefixed("div", "class", "b-comment level-");

/// First-child tags leading from a comment container to its working node
pub const COMMENT_WORKING_PATH: &[&str] = &["div", "div"];

/// Child containers of the comment working node, by position among `div` children
pub const COMMENT_HEADER_DIV: usize = 0;
pub const COMMENT_BODY_DIV: usize = 1;
pub const COMMENT_REPLY_TO_DIV: usize = 2;
pub const COMMENT_LIKES_DIV: usize = 3;

/// Links inside the comment header, by position among `a` children
pub const COMMENT_AUTHOR_LINK: usize = 0;
pub const COMMENT_DATE_LINK: usize = 1;

/// Position of `href` on header links (attribute 0 is the class)
pub const COMMENT_LINK_HREF_ATTR: usize = 1;

/// Parent hops from the working node to the node carrying the depth attribute
pub const COMMENT_LEVEL_ANCESTOR_HOPS: usize = 2;

/// Position of the depth-bearing attribute on that ancestor
pub const COMMENT_LEVEL_ATTR: usize = 0;
