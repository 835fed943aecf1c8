//! Character to UTF-16 offset conversion.
//!
//! The parser counts Unicode scalar values, while JavaScript strings index
//! by UTF-16 code unit. Every offset handed to JavaScript goes through
//! [`Utf16Offsets`] first, so `query.slice(start, start + length)` works on
//! queries with characters outside the Basic Multilingual Plane.

use spendsearch_parser::highlight::Segment;
use spendsearch_parser::{ParseResult, Range, Span};

/// UTF-16 offset of every character boundary of a query.
pub(crate) struct Utf16Offsets {
    units: Vec<usize>,
}

impl Utf16Offsets {
    pub(crate) fn new(source: &str) -> Self {
        let mut units = Vec::with_capacity(source.len() + 1);
        let mut total = 0;
        units.push(total);
        for ch in source.chars() {
            total += ch.len_utf16();
            units.push(total);
        }
        Self { units }
    }

    /// UTF-16 offset of character offset `offset`, clamped to the end.
    pub(crate) fn at(&self, offset: usize) -> usize {
        self.units
            .get(offset)
            .or_else(|| self.units.last())
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn span(&self, span: Span) -> Span {
        Span::new(self.at(span.start), self.at(span.end))
    }

    pub(crate) fn range(&self, range: &Range) -> Range {
        Range::new(range.key, range.value.clone(), self.span(range.span()))
    }

    pub(crate) fn result(&self, result: &ParseResult) -> ParseResult {
        ParseResult {
            ranges: result.ranges.iter().map(|range| self.range(range)).collect(),
            autocomplete: result.autocomplete.as_ref().map(|target| self.range(target)),
        }
    }

    pub(crate) fn segment(&self, segment: Segment) -> Segment {
        Segment {
            span: self.span(segment.span),
            ..segment
        }
    }
}
