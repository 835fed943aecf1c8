//! Key/value range builder.
//!
//! Folds the token stream into groups (`key:value,value`, or a run of free
//! text) and turns the values of recognized groups into [`Range`]s.

use crate::key::SearchKey;
use crate::key_table::KeyTable;
use crate::result::Range;
use crate::scanner::{Token, TokenKind};
use crate::span::Spanned;

/// A `key:value,...` group, or a run of free text between whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Group {
    /// Resolved key. `None` for free text and for keys missing from the table.
    pub key: Option<SearchKey>,
    /// Values in source order.
    pub values: Vec<Spanned<String>>,
    /// Offset of the value slot opened by a trailing `:` or `,`.
    pub open_slot: Option<usize>,
    /// Number of `,` seen in the group.
    pub delimiters: usize,
    /// Whether whitespace followed the group.
    pub terminated: bool,
}

impl Group {
    const fn keyed(key: Option<SearchKey>, slot: usize) -> Self {
        Self {
            key,
            values: Vec::new(),
            open_slot: Some(slot),
            delimiters: 0,
            terminated: false,
        }
    }

    const fn free_text() -> Self {
        Self {
            key: None,
            values: Vec::new(),
            open_slot: None,
            delimiters: 0,
            terminated: false,
        }
    }

    /// Nothing but `key:` so far. Free-text groups never satisfy this: they
    /// start with a value or a delimiter.
    fn awaits_first_value(&self) -> bool {
        self.open_slot.is_some() && self.values.is_empty() && self.delimiters == 0
    }

    /// Only delimiters followed the key (`tag:,,`).
    pub(crate) fn is_delimiter_noise(&self) -> bool {
        self.values.is_empty() && self.delimiters > 0
    }
}

/// Fold tokens into groups, resolving keys through `table`.
pub(crate) fn group(tokens: Vec<Token>, table: &KeyTable) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut current: Option<Group> = None;
    let mut tokens = tokens.into_iter().peekable();

    while let Some(token) = tokens.next() {
        match token.value {
            TokenKind::Key(name) => {
                groups.extend(current.take());
                let key = table.resolve(&name);
                if key.is_none() {
                    tracing::debug!(key = %name, "unknown search key, dropping group");
                }
                current = Some(Group::keyed(key, token.span.end));
            }
            TokenKind::Delimiter => {
                let group = current.get_or_insert_with(Group::free_text);
                group.delimiters += 1;
                group.open_slot = Some(token.span.end);
            }
            TokenKind::QuotedValue(value) | TokenKind::PlainValue(value) => {
                let group = current.get_or_insert_with(Group::free_text);
                group.values.push(Spanned::new(value, token.span));
                group.open_slot = None;
            }
            TokenKind::Whitespace => {
                // `category:   Car` still attaches `Car` to `category`.
                let awaits_value = current.as_ref().is_some_and(Group::awaits_first_value);
                if awaits_value && tokens.peek().is_some_and(|next| next.value.is_value()) {
                    continue;
                }
                if let Some(mut group) = current.take() {
                    group.terminated = true;
                    groups.push(group);
                }
            }
        }
    }

    groups.extend(current);
    groups
}

/// Every value of every recognized group, in source order.
pub(crate) fn emit(groups: &[Group]) -> Vec<Range> {
    groups
        .iter()
        .filter_map(|group| group.key.map(|key| (key, group)))
        .flat_map(|(key, group)| {
            group
                .values
                .iter()
                .map(move |value| Range::new(key, value.value.clone(), value.span))
        })
        .collect()
}
