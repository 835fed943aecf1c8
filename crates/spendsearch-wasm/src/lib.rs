//! Search Query Autocomplete WASM Bindings.
//!
//! This crate provides WebAssembly bindings so the search bar can parse
//! queries from JavaScript/TypeScript on every keystroke.
//!
//! # Features
//!
//! - Parse queries into ranges and an autocomplete target
//! - Parse with a caller-supplied key table
//! - Split a query into highlight segments
//! - Apply a chosen suggestion to the query
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { parse, applySuggestion } from '@spendsearch/wasm';
//!
//! await init();
//!
//! const query = 'type:expense category:Car,Cel';
//! const { ranges, autocomplete } = parse(query);
//! if (autocomplete) {
//!     const suggestions = await fetchSuggestions(autocomplete.key, autocomplete.value);
//!     input.value = applySuggestion(query, suggestions[0]);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod utf16;

use spendsearch_parser::completions::apply_suggestion;
use spendsearch_parser::highlight::{segments, Segment};
use spendsearch_parser::{parse_with, KeyTable, KeyTableError, ParseResult};
use utf16::Utf16Offsets;
use wasm_bindgen::prelude::*;

// =============================================================================
// TypeScript Type Definitions
// =============================================================================

#[wasm_bindgen(typescript_custom_section)]
const TS_TYPES: &'static str = r#"
/** Canonical name of a search field. */
export type SearchKey =
    | 'type' | 'status' | 'date' | 'amount' | 'merchant' | 'description'
    | 'reportID' | 'keyword' | 'in' | 'currency' | 'tag' | 'category'
    | 'to' | 'from' | 'taxRate' | 'cardID' | 'expenseType';

/**
 * A recognized value. `start` and `length` count UTF-16 code units, so
 * `query.slice(start, start + length)` is its source text.
 */
export interface Range {
    key: SearchKey;
    value: string;
    start: number;
    length: number;
}

/** Result of parsing a query. */
export interface ParseResult {
    ranges: Range[];
    autocomplete: Range | null;
}

/** A contiguous piece of the query for highlighting. */
export interface Segment {
    text: string;
    key: SearchKey | null;
    active: boolean;
    /** UTF-16 code unit offsets. */
    span: { start: number; end: number };
}

/** Key table document accepted by `parseWithKeys`. */
export interface KeyTableConfig {
    keys: { key: SearchKey; aliases?: string[] }[];
}
"#;

// =============================================================================
// Initialization
// =============================================================================

/// Initialize the WASM module.
///
/// This sets up panic hooks for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();
}

// =============================================================================
// Internal Helpers
// =============================================================================

/// Serialize with plain objects and `null` instead of `Map`s and `undefined`.
fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&e.to_string()))
}

fn parse_utf16(query: &str, table: &KeyTable) -> ParseResult {
    Utf16Offsets::new(query).result(&parse_with(query, table))
}

fn parse_with_config(query: &str, keys_json: &str) -> Result<ParseResult, KeyTableError> {
    let table = KeyTable::from_json(keys_json)?;
    Ok(parse_utf16(query, &table))
}

fn suggest(query: &str, suggestion: &str) -> Option<String> {
    let result = spendsearch_parser::parse(query);
    result
        .autocomplete
        .map(|target| apply_suggestion(query, &target, suggestion))
}

fn highlight_segments(query: &str) -> Vec<Segment> {
    let offsets = Utf16Offsets::new(query);
    segments(query, &spendsearch_parser::parse(query))
        .into_iter()
        .map(|segment| offsets.segment(segment))
        .collect()
}

// =============================================================================
// Public API
// =============================================================================

/// Parse a search query with the builtin key table.
///
/// Returns a `ParseResult` with offsets in UTF-16 code units. Parsing never
/// fails; an error is only returned if the result cannot be converted to a
/// JavaScript value.
#[wasm_bindgen]
pub fn parse(query: &str) -> Result<JsValue, JsError> {
    to_js(&parse_utf16(query, KeyTable::builtin()))
}

/// Parse a search query with a key table given as a `KeyTableConfig` JSON
/// document.
///
/// Throws if the document is malformed or names an unknown key.
#[wasm_bindgen(js_name = "parseWithKeys")]
pub fn parse_with_keys(query: &str, keys_json: &str) -> Result<JsValue, JsError> {
    let result = parse_with_config(query, keys_json).map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&result)
}

/// Replace the autocomplete target of `query` with `suggestion`.
///
/// Returns `undefined` when the query has nothing to complete.
#[wasm_bindgen(js_name = "applySuggestion")]
pub fn apply_suggestion_js(query: &str, suggestion: &str) -> Option<String> {
    suggest(query, suggestion)
}

/// Split a query into `Segment`s for highlighting.
#[wasm_bindgen]
pub fn highlight(query: &str) -> Result<JsValue, JsError> {
    to_js(&highlight_segments(query))
}

/// Get the version of the library.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendsearch_parser::SearchKey;

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
    }

    #[test]
    fn test_parse_with_config() {
        let result = parse_with_config(
            "vendor:Acme tag:x",
            r#"{"keys": [{"key": "merchant", "aliases": ["vendor"]}]}"#,
        )
        .unwrap();
        assert_eq!(result.ranges.len(), 1);
        assert_eq!(result.ranges[0].key, SearchKey::Merchant);
        assert!(result.autocomplete.is_none());
    }

    #[test]
    fn test_parse_with_config_rejects_bad_document() {
        assert!(matches!(
            parse_with_config("tag:x", r#"{"keys": [{"key": "weather"}]}"#),
            Err(KeyTableError::Json(_))
        ));
        assert!(matches!(
            parse_with_config("tag:x", r#"{"keys": [{"key": "tag", "aliases": ["a b"]}]}"#),
            Err(KeyTableError::InvalidSurfaceForm { .. })
        ));
    }

    #[test]
    fn test_suggest() {
        assert_eq!(
            suggest("category:", "Travel").as_deref(),
            Some("category:Travel")
        );
        assert_eq!(suggest("category:Travel ", "Meals"), None);
    }

    #[test]
    fn test_highlight_segments() {
        let parts = highlight_segments("in:\"Big Room\" word");
        let texts: Vec<_> = parts.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["in:", "\"Big Room\"", " word"]);
        assert!(parts.iter().all(|s| !s.active));
    }

    #[test]
    fn test_highlight_segments_use_utf16_offsets() {
        let parts = highlight_segments("tag:😀x");
        let spans: Vec<_> = parts.iter().map(|s| (s.span.start, s.span.end)).collect();
        assert_eq!(spans, vec![(0, 4), (4, 7)]);
        assert!(parts[1].active);
    }

    #[test]
    fn test_parse_with_config_uses_utf16_offsets() {
        let result = parse_with_config("tag:😀,y", r#"{"keys": [{"key": "tag"}]}"#).unwrap();
        let spans: Vec<_> = result.ranges.iter().map(|r| (r.start, r.length)).collect();
        assert_eq!(spans, vec![(4, 2), (7, 1)]);
    }
}
