//! Autocomplete target selection.
//!
//! Only the final group of a query can be in progress, and only if no
//! whitespace follows it. Within that group the last value is the one being
//! typed; an open slot after a trailing `:` or `,` is an empty value waiting
//! to be typed.

use crate::ranges::Group;
use crate::result::{AutocompleteTarget, Range};
use crate::span::Span;

/// Pick the autocomplete target from the last group of a query.
pub(crate) fn select(last: Option<&Group>) -> Option<AutocompleteTarget> {
    let group = last?;
    if group.terminated {
        return None;
    }
    let key = group.key?;

    match group.open_slot {
        Some(_) if group.is_delimiter_noise() => None,
        Some(offset) => Some(Range::new(key, String::new(), Span::empty(offset))),
        None => group
            .values
            .last()
            .map(|value| Range::new(key, value.value.clone(), value.span)),
    }
}
