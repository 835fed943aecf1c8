//! Search query autocomplete parser.
//!
//! This crate turns the free text of a search bar into the structure a UI
//! needs while the user is typing:
//!
//! - **ranges**: every recognized `key:value` match with its character offset
//!   and length, for syntax highlighting and chip rendering;
//! - **autocomplete**: at most one value the user is still typing, for
//!   driving a suggestions dropdown.
//!
//! Parsing is a total, pure function. Unknown keys, stray delimiters and
//! unbalanced quotes degrade to free text rather than errors, so callers can
//! parse on every keystroke.
//!
//! # Query Syntax
//!
//! - `key:value` filters, separated by whitespace
//! - `key:a,b,c` value lists
//! - `key:"two words"` quoted values (straight or curly quotes)
//! - aliases such as `tax-rate:` and `expense-type:` resolve to their
//!   canonical keys (`taxRate`, `expenseType`)
//!
//! # Example
//!
//! ```
//! use spendsearch_parser::{parse, SearchKey};
//!
//! let result = parse("in:\"Big Room\" tag:aa,bb");
//!
//! assert_eq!(result.ranges.len(), 3);
//! assert_eq!(result.ranges[0].key, SearchKey::In);
//! assert_eq!(result.ranges[0].value, "Big Room");
//! assert_eq!((result.ranges[0].start, result.ranges[0].length), (3, 10));
//!
//! let pending = result.autocomplete.unwrap();
//! assert_eq!(pending.key, SearchKey::Tag);
//! assert_eq!(pending.value, "bb");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod autocomplete;
pub mod completions;
mod error;
pub mod highlight;
mod key;
mod key_table;
mod ranges;
mod result;
pub mod scanner;
mod span;

pub use error::{KeyTableError, UnknownSearchKey};
pub use key::SearchKey;
pub use key_table::{KeyTable, KeyTableBuilder};
pub use result::{AutocompleteTarget, ParseResult, Range};
pub use span::{Span, Spanned};

/// Parse a search query using the builtin [`KeyTable`].
#[must_use]
pub fn parse(query: &str) -> ParseResult {
    parse_with(query, KeyTable::builtin())
}

/// Parse a search query, recognizing only the keys in `table`.
#[must_use]
pub fn parse_with(query: &str, table: &KeyTable) -> ParseResult {
    let groups = ranges::group(scanner::scan(query), table);
    let ranges = ranges::emit(&groups);
    let autocomplete = autocomplete::select(groups.last());
    ParseResult {
        ranges,
        autocomplete,
    }
}
