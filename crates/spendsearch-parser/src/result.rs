//! Parser output types.

use crate::key::SearchKey;
use crate::span::Span;
use serde::{Deserialize, Serialize};

/// One recognized value of a `key:value` group.
///
/// `start` and `length` locate the raw source text of the value, quotes
/// included; `value` is the decoded text without its outer quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    /// Canonical key, after alias resolution.
    pub key: SearchKey,
    /// Decoded value.
    pub value: String,
    /// Character offset of the value in the query.
    pub start: usize,
    /// Length of the raw source span in characters.
    pub length: usize,
}

impl Range {
    /// Create a range covering `span`.
    #[must_use]
    pub fn new(key: SearchKey, value: impl Into<String>, span: Span) -> Self {
        Self {
            key,
            value: value.into(),
            start: span.start,
            length: span.len(),
        }
    }

    /// The source span of this range. Saturates for ranges deserialized
    /// with out-of-bounds offsets.
    #[must_use]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.start.saturating_add(self.length))
    }

    /// The raw text this range was parsed from.
    #[must_use]
    pub fn source_text<'a>(&self, query: &'a str) -> &'a str {
        self.span().text(query)
    }
}

/// The value the user is still typing. Same shape as a [`Range`]; an empty
/// `value` with zero `length` marks a slot right after `:` or `,`.
pub type AutocompleteTarget = Range;

/// Result of parsing a search query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Recognized values, in source order.
    pub ranges: Vec<Range>,
    /// The in-progress value suggestions should be offered for.
    pub autocomplete: Option<AutocompleteTarget>,
}

impl ParseResult {
    /// Ranges for one key, in source order.
    pub fn ranges_for(&self, key: SearchKey) -> impl Iterator<Item = &Range> {
        self.ranges.iter().filter(move |range| range.key == key)
    }

    /// Check if the query contained nothing structured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && self.autocomplete.is_none()
    }
}
