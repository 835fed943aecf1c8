//! Applying a chosen suggestion to the query.
//!
//! Once the user picks a suggestion for the [`AutocompleteTarget`], the
//! partial value in the query is replaced by the suggestion, quoted when it
//! would otherwise be split into several values.
//!
//! # Example
//!
//! ```
//! use spendsearch_parser::completions::apply_suggestion;
//! use spendsearch_parser::parse;
//!
//! let query = "type:expense category:Car,Cel";
//! let target = parse(query).autocomplete.unwrap();
//!
//! let updated = apply_suggestion(query, &target, "Cell Phone");
//! assert_eq!(updated, "type:expense category:Car,\"Cell Phone\"");
//!
//! let reparsed = parse(&updated).autocomplete.unwrap();
//! assert_eq!(reparsed.value, "Cell Phone");
//! ```

use crate::result::AutocompleteTarget;
use crate::scanner::is_quote;
use crate::span::byte_offset;
use std::borrow::Cow;

/// Quote `value` if inserting it verbatim would not parse back as one value.
#[must_use]
pub fn quote_value(value: &str) -> Cow<'_, str> {
    let needs_quotes = value
        .chars()
        .any(|ch| ch == ',' || ch.is_whitespace() || is_quote(ch));
    if needs_quotes {
        Cow::Owned(format!("\"{value}\""))
    } else {
        Cow::Borrowed(value)
    }
}

/// Replace the source span of `target` in `query` with `suggestion`.
///
/// An empty-value target (right after `:` or `,`) inserts at its offset.
#[must_use]
pub fn apply_suggestion(query: &str, target: &AutocompleteTarget, suggestion: &str) -> String {
    let span = target.span();
    let start = byte_offset(query, span.start);
    let end = byte_offset(query, span.end);
    let replacement = quote_value(suggestion);

    let mut updated = String::with_capacity(query.len() - (end - start) + replacement.len());
    updated.push_str(&query[..start]);
    updated.push_str(&replacement);
    updated.push_str(&query[end..]);
    updated
}
