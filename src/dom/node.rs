//! Parsed documents and the node query handle

use crate::dom::pattern::Pattern;
use crate::dom::{QueryError, QueryResult};
use scraper::{ElementRef, Html};

/// A parsed page together with the URL it was loaded from
pub struct Document {
    html: Html,
    url: String,
}

impl Document {
    /// Parses markup into a navigable tree
    ///
    /// The html5ever parser recovers from malformed markup, so this never fails;
    /// rejecting unusable bodies is the page loader's job.
    pub fn parse(url: impl Into<String>, markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
            url: url.into(),
        }
    }

    /// The `<html>` element
    pub fn root(&self) -> Node<'_> {
        Node {
            element: self.html.root_element(),
        }
    }

    /// The URL this document was loaded from
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A copyable handle to one element of a parsed document
///
/// This is the only view of the tree the extractor works with.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    element: ElementRef<'a>,
}

impl<'a> Node<'a> {
    /// Tag name of this element
    pub fn tag(&self) -> &'a str {
        self.element.value().name()
    }

    /// First element in document order matching `pattern` (the node itself included)
    pub fn first_match(&self, pattern: &Pattern) -> QueryResult<Node<'a>> {
        self.matching(pattern)
            .next()
            .ok_or_else(|| QueryError::NotFound {
                pattern: pattern.to_string(),
            })
    }

    /// All elements in document order matching `pattern` (the node itself included)
    pub fn all_matches(&self, pattern: &Pattern) -> Vec<Node<'a>> {
        self.matching(pattern).collect()
    }

    /// Non-failing existence check
    pub fn exists(&self, pattern: &Pattern) -> bool {
        self.matching(pattern).next().is_some()
    }

    /// First immediate child element with the given tag
    pub fn first_child(&self, tag: &str) -> QueryResult<Node<'a>> {
        self.nth_child_of_tag(tag, 0)
    }

    /// The `index`-th (0-based) immediate child element with the given tag
    pub fn nth_child_of_tag(&self, tag: &str, index: usize) -> QueryResult<Node<'a>> {
        let mut available = 0;
        for child in self.children_of_tag(tag) {
            if available == index {
                return Ok(child);
            }
            available += 1;
        }
        Err(QueryError::Index {
            what: format!("<{}> child", tag),
            index,
            available,
        })
    }

    /// True if an `index`-th immediate child with the given tag exists
    pub fn has_child(&self, tag: &str, index: usize) -> bool {
        self.children_of_tag(tag).nth(index).is_some()
    }

    /// Value of the attribute at `index` in declared source order
    pub fn attribute_value(&self, index: usize) -> QueryResult<&'a str> {
        let element = self.element.value();
        element
            .attrs()
            .nth(index)
            .map(|(_, value)| value)
            .ok_or_else(|| QueryError::Index {
                what: format!("attribute of <{}>", element.name()),
                index,
                available: element.attrs().count(),
            })
    }

    /// First digit run inside the attribute at `index`
    pub fn integer_attribute(&self, index: usize) -> QueryResult<u64> {
        let value = self.attribute_value(index)?;
        parse_first_integer(value)
    }

    /// Concatenated text of this node and its descendants, trimmed
    pub fn text_content(&self) -> String {
        self.element.text().collect::<String>().trim().to_string()
    }

    /// First maximal run of decimal digits in `text_content()`
    ///
    /// "Views: 1,234 today" yields 1, not 1234.
    pub fn first_integer_in_content(&self) -> QueryResult<u64> {
        parse_first_integer(&self.text_content())
    }

    /// Structural parent element
    pub fn parent(&self) -> QueryResult<Node<'a>> {
        self.element
            .parent()
            .and_then(ElementRef::wrap)
            .map(|element| Node { element })
            .ok_or_else(|| QueryError::NotFound {
                pattern: format!("parent of <{}>", self.tag()),
            })
    }

    fn matching<'p>(&self, pattern: &'p Pattern) -> impl Iterator<Item = Node<'a>> + 'p
    where
        'a: 'p,
    {
        self.element
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(move |element| pattern.matches(element.value()))
            .map(|element| Node { element })
    }

    fn children_of_tag<'t>(&self, tag: &'t str) -> impl Iterator<Item = Node<'a>> + 't
    where
        'a: 't,
    {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .filter(move |element| element.value().name().eq_ignore_ascii_case(tag))
            .map(|element| Node { element })
    }
}

fn parse_first_integer(text: &str) -> QueryResult<u64> {
    let start = text
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| QueryError::Format(format!("no digits in {:?}", text)))?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end]
        .parse()
        .map_err(|e| QueryError::Format(format!("invalid number {:?}: {}", &rest[..end], e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str) -> Document {
        Document::parse("https://example.com/", markup)
    }

    #[test]
    fn test_first_match_document_order() {
        let d = doc("<body><p>one</p><div><p>two</p></div></body>");
        let p = d.root().first_match(&Pattern::tag("p")).unwrap();
        assert_eq!(p.text_content(), "one");
    }

    #[test]
    fn test_first_match_not_found() {
        let d = doc("<body><p>one</p></body>");
        let err = d.root().first_match(&Pattern::tag("article")).unwrap_err();
        assert!(matches!(err, QueryError::NotFound { .. }));
    }

    #[test]
    fn test_all_matches_nested_in_order() {
        let d = doc(
            r#"<body>
                <div class="c level-0"><div class="c level-1">b</div></div>
                <div class="c level-0">c</div>
            </body>"#,
        );
        let found = d.root().all_matches(&Pattern::prefixed("div", "class", "c level-"));
        let levels: Vec<u64> = found
            .iter()
            .map(|n| n.integer_attribute(0).unwrap())
            .collect();
        assert_eq!(levels, vec![0, 1, 0]);
    }

    #[test]
    fn test_exists() {
        let d = doc(r#"<body><span class="pageviews">5</span></body>"#);
        assert!(d.root().exists(&Pattern::prefixed("span", "class", "pageviews")));
        assert!(!d.root().exists(&Pattern::prefixed("span", "class", "date")));
    }

    #[test]
    fn test_nth_child_of_tag_counts_only_that_tag() {
        let d = doc("<body><div id=\"w\"><span>s</span><div>a</div><p>x</p><div>b</div></div></body>");
        let w = d.root().first_match(&Pattern::prefixed("div", "id", "w")).unwrap();
        assert_eq!(w.nth_child_of_tag("div", 1).unwrap().text_content(), "b");
        assert_eq!(w.first_child("div").unwrap().text_content(), "a");
        assert!(w.has_child("div", 1));
        assert!(!w.has_child("div", 2));
    }

    #[test]
    fn test_nth_child_out_of_range() {
        let d = doc("<body><div id=\"w\"><div>a</div></div></body>");
        let w = d.root().first_match(&Pattern::prefixed("div", "id", "w")).unwrap();
        match w.nth_child_of_tag("div", 3).unwrap_err() {
            QueryError::Index {
                index, available, ..
            } => {
                assert_eq!(index, 3);
                assert_eq!(available, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_children_are_immediate_only() {
        let d = doc("<body><div id=\"w\"><section><a href=\"/x\">x</a></section></div></body>");
        let w = d.root().first_match(&Pattern::prefixed("div", "id", "w")).unwrap();
        assert!(w.first_child("a").is_err());
    }

    #[test]
    fn test_attribute_value_is_positional() {
        let d = doc(r#"<body><a class="avatar" href="/users/bob/">bob</a></body>"#);
        let a = d.root().first_match(&Pattern::tag("a")).unwrap();
        assert_eq!(a.attribute_value(0).unwrap(), "avatar");
        assert_eq!(a.attribute_value(1).unwrap(), "/users/bob/");
        assert!(matches!(
            a.attribute_value(2).unwrap_err(),
            QueryError::Index { available: 2, .. }
        ));
    }

    #[test]
    fn test_text_content_trimmed() {
        let d = doc("<body><h1>\n   Hello <b>there</b>  \n</h1></body>");
        let h1 = d.root().first_match(&Pattern::tag("h1")).unwrap();
        assert_eq!(h1.text_content(), "Hello there");
    }

    #[test]
    fn test_first_integer_stops_at_first_non_digit() {
        let d = doc("<body><span>Views: 1,234 today</span></body>");
        let span = d.root().first_match(&Pattern::tag("span")).unwrap();
        assert_eq!(span.first_integer_in_content().unwrap(), 1);
    }

    #[test]
    fn test_first_integer_missing_is_format_error() {
        let d = doc("<body><span>no views</span></body>");
        let span = d.root().first_match(&Pattern::tag("span")).unwrap();
        assert!(matches!(
            span.first_integer_in_content().unwrap_err(),
            QueryError::Format(_)
        ));
    }

    #[test]
    fn test_first_integer_overflow_is_format_error() {
        assert!(matches!(
            parse_first_integer("99999999999999999999999"),
            Err(QueryError::Format(_))
        ));
    }

    #[test]
    fn test_parent_chain_and_root() {
        let d = doc("<body><div id=\"a\"><div id=\"b\"><p>x</p></div></div></body>");
        let p = d.root().first_match(&Pattern::tag("p")).unwrap();
        let grandparent = p.parent().unwrap().parent().unwrap();
        assert_eq!(grandparent.attribute_value(0).unwrap(), "a");

        let root = d.root();
        assert_eq!(root.tag(), "html");
        assert!(matches!(root.parent().unwrap_err(), QueryError::NotFound { .. }));
    }
}
