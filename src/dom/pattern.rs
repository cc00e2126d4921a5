//! Structural match patterns
//!
//! A pattern is either a tag name with an optional attribute-prefix predicate
//! (`div[class^="b-comment level-"]`) or a union of such patterns. Patterns are
//! `const`-constructible so site layouts can be declared as tables.

use scraper::node::Element;
use std::fmt;

/// Attribute-prefix predicate (`[attribute^="prefix"]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrPrefix {
    pub attribute: &'static str,
    pub prefix: &'static str,
}

/// A structural query pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Tag name match, optionally narrowed by an attribute prefix
    Element {
        tag: &'static str,
        prefix: Option<AttrPrefix>,
    },

    /// Matches when any branch matches
    AnyOf(&'static [Pattern]),
}

impl Pattern {
    /// Matches every element with the given tag name
    pub const fn tag(tag: &'static str) -> Self {
        Self::Element { tag, prefix: None }
    }

    /// Matches elements with the given tag whose attribute value starts with `prefix`
    pub const fn prefixed(tag: &'static str, attribute: &'static str, prefix: &'static str) -> Self {
        Self::Element {
            tag,
            prefix: Some(AttrPrefix { attribute, prefix }),
        }
    }

    /// Tests a single element against this pattern
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Element { tag, prefix } => {
                if !element.name().eq_ignore_ascii_case(tag) {
                    return false;
                }
                match prefix {
                    None => true,
                    Some(p) => element
                        .attr(p.attribute)
                        .is_some_and(|value| value.starts_with(p.prefix)),
                }
            }
            Self::AnyOf(branches) => branches.iter().any(|branch| branch.matches(element)),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element { tag, prefix: None } => write!(f, "{}", tag),
            Self::Element {
                tag,
                prefix: Some(p),
            } => write!(f, "{}[{}^=\"{}\"]", tag, p.attribute, p.prefix),
            Self::AnyOf(branches) => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", branch)?;
                }
                Ok(())
            }
        }
    }
}
