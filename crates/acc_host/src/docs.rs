//! Extraction of `@property` tags from class documentation comments.
//!
//! Three tags are understood, matched case-insensitively:
//!
//! | doc tag           | produced tags   |
//! |-------------------|-----------------|
//! | `@property`       | `Get` and `Set` |
//! | `@property-read`  | `Get`           |
//! | `@property-write` | `Set`           |
//!
//! The tag is followed by an optional type and the `$name` of the property,
//! e.g. `@property-read string $foo some description`. Lines without a
//! `$name` are skipped.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::Tag;

// -----------------------------------------------------------------------------
// DocAccess

/// Access granted to a property by a documentation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocAccess {
    ReadWrite,
    Read,
    Write,
}

impl DocAccess {
    fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("@property") {
            Some(Self::ReadWrite)
        } else if tag.eq_ignore_ascii_case("@property-read") {
            Some(Self::Read)
        } else if tag.eq_ignore_ascii_case("@property-write") {
            Some(Self::Write)
        } else {
            None
        }
    }

    /// Converts into the equivalent metadata tags.
    pub fn tags(self) -> Vec<Tag> {
        match self {
            Self::ReadWrite => vec![Tag::get(true), Tag::set(true)],
            Self::Read => vec![Tag::get(true)],
            Self::Write => vec![Tag::set(true)],
        }
    }
}

// -----------------------------------------------------------------------------
// DocProperty

/// A property named by a documentation tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocProperty {
    pub name: String,
    pub access: DocAccess,
}

/// Collects the `@property` tags of a documentation comment.
///
/// Each property appears once; when it is named several times the last tag
/// wins.
///
/// # Examples
///
/// ```
/// use acc_host::docs::{DocAccess, parse_property_tags};
///
/// let docs = "/**
///   * @property string $foo
///   * @property-read int $bar the bar
///   */";
///
/// let props = parse_property_tags(docs);
/// assert_eq!(props.len(), 2);
/// assert_eq!(props[0].name, "foo");
/// assert_eq!(props[1].access, DocAccess::Read);
/// ```
pub fn parse_property_tags(docs: &str) -> Vec<DocProperty> {
    let mut result: Vec<DocProperty> = Vec::new();

    for line in docs.lines() {
        let mut tokens = line
            .split_whitespace()
            .skip_while(|token| !token.starts_with('@'));

        let Some(access) = tokens.next().and_then(DocAccess::from_tag) else {
            continue;
        };

        let Some(name) = tokens.find_map(variable_name) else {
            continue;
        };

        match result.iter_mut().find(|p| p.name == name) {
            Some(slot) => slot.access = access,
            None => result.push(DocProperty {
                name: String::from(name),
                access,
            }),
        }
    }

    result
}

/// Returns `foo` for a `$foo` token, ignoring trailing punctuation.
fn variable_name(token: &str) -> Option<&str> {
    let rest = token.strip_prefix('$')?;
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());

    (end > 0).then(|| &rest[..end])
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{DocAccess, parse_property_tags};

    #[test]
    fn recognizes_all_tags() {
        let docs = "
            @property string $a
            @PROPERTY-READ $b
            @property-write ?Foo $c,
            @param string $d
        ";

        let props = parse_property_tags(docs);
        let found: alloc::vec::Vec<_> = props.iter().map(|p| (p.name.as_str(), p.access)).collect();

        assert_eq!(
            found,
            [
                ("a", DocAccess::ReadWrite),
                ("b", DocAccess::Read),
                ("c", DocAccess::Write),
            ]
        );
    }

    #[test]
    fn last_tag_wins() {
        let docs = "* @property-read $foo\n* @property-write $foo";
        let props = parse_property_tags(docs);

        assert_eq!(props.len(), 1);
        assert_eq!(props[0].access, DocAccess::Write);
    }

    #[test]
    fn skips_tags_without_variable() {
        assert!(parse_property_tags("@property string").is_empty());
        assert!(parse_property_tags("@property $").is_empty());
        assert!(parse_property_tags("no tags here $foo").is_empty());
    }
}
