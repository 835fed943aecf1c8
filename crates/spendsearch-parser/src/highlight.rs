//! Highlight segmentation for query renderers.
//!
//! A renderer styling the search bar wants the query as a sequence of
//! contiguous pieces rather than a sparse list of ranges. [`segments`] cuts
//! the query at every range boundary, so concatenating the segment texts
//! reproduces the query exactly.

use crate::key::SearchKey;
use crate::result::ParseResult;
use crate::span::Span;
use serde::Serialize;

/// A contiguous piece of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// The source text of the segment.
    pub text: String,
    /// Key of the range this segment renders, `None` for plain text.
    pub key: Option<SearchKey>,
    /// Whether this is the value being autocompleted.
    pub active: bool,
    /// Character span of the segment.
    pub span: Span,
}

/// Split `query` into plain and highlighted segments.
///
/// `result` must come from parsing `query`.
///
/// # Example
///
/// ```
/// use spendsearch_parser::{highlight::segments, parse, SearchKey};
///
/// let query = "type:expense report";
/// let parts = segments(query, &parse(query));
///
/// let texts: Vec<_> = parts.iter().map(|s| s.text.as_str()).collect();
/// assert_eq!(texts, vec!["type:", "expense", " report"]);
/// assert_eq!(parts[1].key, Some(SearchKey::Type));
/// ```
#[must_use]
pub fn segments(query: &str, result: &ParseResult) -> Vec<Segment> {
    let chars: Vec<char> = query.chars().collect();
    let active = result.autocomplete.as_ref().map(|target| target.span());
    let mut segments = Vec::with_capacity(result.ranges.len() * 2 + 1);
    let mut cursor = 0;

    for range in &result.ranges {
        let span = range.span();
        if span.is_empty() || span.start < cursor || span.end > chars.len() {
            continue;
        }
        if span.start > cursor {
            segments.push(plain(&chars, Span::new(cursor, span.start)));
        }
        segments.push(Segment {
            text: chars[span.into_range()].iter().collect(),
            key: Some(range.key),
            active: active == Some(span),
            span,
        });
        cursor = span.end;
    }

    if cursor < chars.len() {
        segments.push(plain(&chars, Span::new(cursor, chars.len())));
    }
    segments
}

fn plain(chars: &[char], span: Span) -> Segment {
    Segment {
        text: chars[span.into_range()].iter().collect(),
        key: None,
        active: false,
        span,
    }
}
