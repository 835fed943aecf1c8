//! Integration tests for the autocomplete parser.
//!
//! Tests cover range building, autocomplete selection, quoting heuristics
//! and regression queries collected from the search bar.

use spendsearch_parser::{parse, parse_with, KeyTable, ParseResult, Range, SearchKey, Span};

// ============================================================================
// Helper Functions
// ============================================================================

fn range(key: SearchKey, value: &str, start: usize, length: usize) -> Range {
    Range::new(key, value, Span::new(start, start + length))
}

fn assert_parse(query: &str, ranges: Vec<Range>, autocomplete: Option<Range>) {
    let result = parse(query);
    assert_eq!(
        result,
        ParseResult {
            ranges,
            autocomplete
        },
        "query: {query:?}"
    );
}

fn values(result: &ParseResult) -> Vec<&str> {
    result.ranges.iter().map(|r| r.value.as_str()).collect()
}

// ============================================================================
// Basic Groups
// ============================================================================

#[test]
fn test_single_trailing_value_is_range_and_autocomplete() {
    let expense = range(SearchKey::Type, "expense", 5, 7);
    assert_parse("type:expense", vec![expense.clone()], Some(expense));
}

#[test]
fn test_terminated_group_followed_by_keyword() {
    assert_parse(
        "type:expense word",
        vec![range(SearchKey::Type, "expense", 5, 7)],
        None,
    );
}

#[test]
fn test_empty_value_after_colon() {
    assert_parse("category:", vec![], Some(range(SearchKey::Category, "", 9, 0)));
}

#[test]
fn test_delimiter_noise() {
    assert_parse("tag:,,", vec![], None);
    assert_parse("tag:,", vec![], None);
    assert_parse(",", vec![], None);
}

#[test]
fn test_value_list() {
    let cccc = range(SearchKey::Tag, "cccc", 11, 4);
    assert_parse(
        "tag:aa,bbb,cccc",
        vec![
            range(SearchKey::Tag, "aa", 4, 2),
            range(SearchKey::Tag, "bbb", 7, 3),
            cccc.clone(),
        ],
        Some(cccc),
    );
}

#[test]
fn test_quoted_value_list() {
    let small = range(SearchKey::In, "small room", 14, 12);
    assert_parse(
        "in:\"Big Room\",\"small room\"",
        vec![range(SearchKey::In, "Big Room", 3, 10), small.clone()],
        Some(small),
    );
}

#[test]
fn test_empty_value_after_trailing_comma() {
    assert_parse(
        "category:Advertising,",
        vec![range(SearchKey::Category, "Advertising", 9, 11)],
        Some(range(SearchKey::Category, "", 21, 0)),
    );
}

#[test]
fn test_empty_and_whitespace_queries() {
    assert_parse("", vec![], None);
    assert_parse("   ", vec![], None);
    assert_parse("just some words", vec![], None);
}

#[test]
fn test_whitespace_between_colon_and_value() {
    let car = range(SearchKey::Category, "Car", 12, 3);
    assert_parse("category:   Car", vec![car.clone()], Some(car));
    assert_parse("category:   ", vec![], None);
}

#[test]
fn test_trailing_whitespace_clears_autocomplete() {
    assert_parse(
        "in:123456 currency:USD      ",
        vec![
            range(SearchKey::In, "123456", 3, 6),
            range(SearchKey::Currency, "USD", 19, 3),
        ],
        None,
    );
}

// ============================================================================
// Keys and Aliases
// ============================================================================

#[test]
fn test_aliases_resolve_to_canonical_keys() {
    assert_parse(
        "tax-rate:rate1 expense-type:card card:\"Big Bank\"",
        vec![
            range(SearchKey::TaxRate, "rate1", 9, 5),
            range(SearchKey::ExpenseType, "card", 28, 4),
            range(SearchKey::CardId, "Big Bank", 38, 10),
        ],
        Some(range(SearchKey::CardId, "Big Bank", 38, 10)),
    );
}

#[test]
fn test_alias_and_canonical_spelling_agree() {
    for key in SearchKey::SUGGESTIBLE {
        let canonical = parse(&format!("{key}:x"));
        for alias in key.aliases() {
            let aliased = parse(&format!("{alias}:x"));
            assert_eq!(aliased.ranges.len(), 1, "alias {alias}");
            assert_eq!(aliased.ranges[0].key, canonical.ranges[0].key);
            assert_eq!(aliased.ranges[0].value, canonical.ranges[0].value);
        }
    }
}

#[test]
fn test_unknown_and_unsuggestible_keys_are_keywords() {
    assert_parse(
        "date>2024-01-01 amount>100 merchant:\"A B\" description:A,B,C ,, reportid:123456789 word",
        vec![],
        None,
    );
    assert_parse("weather:sunny", vec![], None);
    assert_parse("Category:Car", vec![], None);
}

#[test]
fn test_unknown_key_between_known_groups() {
    let result = parse("type:expense merchant:\"Expensify, Inc.\" tag:IT");
    assert_eq!(values(&result), vec!["expense", "IT"]);
    assert_eq!(result.autocomplete.map(|t| t.key), Some(SearchKey::Tag));
}

#[test]
fn test_custom_key_table() {
    let table = KeyTable::from_json(
        r#"{"keys": [{"key": "merchant", "aliases": ["vendor"]}, {"key": "tag"}]}"#,
    )
    .unwrap();
    let result = parse_with("vendor:Acme category:Car tag:a", &table);
    assert_eq!(
        result.ranges,
        vec![
            range(SearchKey::Merchant, "Acme", 7, 4),
            range(SearchKey::Tag, "a", 29, 1),
        ]
    );
}

// ============================================================================
// Mixed Queries
// ============================================================================

#[test]
fn test_mixed_quoted_and_plain_lists() {
    assert_parse(
        "in:\"Big Room\" from:Friend category:Car,\"Cell Phone\" expense-type:card,cash",
        vec![
            range(SearchKey::In, "Big Room", 3, 10),
            range(SearchKey::From, "Friend", 19, 6),
            range(SearchKey::Category, "Car", 35, 3),
            range(SearchKey::Category, "Cell Phone", 39, 12),
            range(SearchKey::ExpenseType, "card", 65, 4),
            range(SearchKey::ExpenseType, "cash", 70, 4),
        ],
        Some(range(SearchKey::ExpenseType, "cash", 70, 4)),
    );
}

#[test]
fn test_keywords_and_unknown_keys_interleaved() {
    assert_parse(
        "currency:PLN,USD keyword tax-rate:tax  merchant:\"Expensify, Inc.\" tag:\"General Overhead\",IT expense-type:card,distance",
        vec![
            range(SearchKey::Currency, "PLN", 9, 3),
            range(SearchKey::Currency, "USD", 13, 3),
            range(SearchKey::TaxRate, "tax", 34, 3),
            range(SearchKey::Tag, "General Overhead", 70, 18),
            range(SearchKey::Tag, "IT", 89, 2),
            range(SearchKey::ExpenseType, "card", 105, 4),
            range(SearchKey::ExpenseType, "distance", 110, 8),
        ],
        Some(range(SearchKey::ExpenseType, "distance", 110, 8)),
    );
}

#[test]
fn test_offsets_count_characters_not_bytes() {
    let result = parse("type:expense category:“a b”");
    assert_eq!(
        result.ranges[1],
        range(SearchKey::Category, "a b", 22, 5)
    );
}

// ============================================================================
// Quoting Heuristics
// ============================================================================

#[test]
fn test_doubled_straight_quotes() {
    let mad_dog = range(SearchKey::To, "\"Mad\" Dog", 33, 11);
    assert_parse(
        "from:\"\"Big Dog\",\"Little Dog\"\" to:\"\"Mad\" Dog\"",
        vec![
            range(SearchKey::From, "\"Big Dog", 5, 10),
            range(SearchKey::From, "Little Dog\"", 16, 13),
            mad_dog.clone(),
        ],
        Some(mad_dog),
    );
}

#[test]
fn test_mixed_smart_and_straight_quotes() {
    let dogs = range(SearchKey::To, "\"\"Unruly\"\" “““Glad””” \"\"\"Dog\"\"", 32, 32);
    assert_parse(
        "from:““Rag” Dog”,\"Bag ”Dog“\" to:\"\"\"Unruly\"\" “““Glad””” \"\"\"Dog\"\"\"",
        vec![
            range(SearchKey::From, "“Rag” Dog", 5, 11),
            range(SearchKey::From, "Bag ”Dog“", 17, 11),
            dogs.clone(),
        ],
        Some(dogs),
    );
}

#[test]
fn test_unterminated_quote_keeps_literal_quote() {
    let partial = range(SearchKey::Merchant, "\"Big", 9, 4);
    let table = KeyTable::builder().key(SearchKey::Merchant).build().unwrap();
    let result = parse_with("merchant:\"Big", &table);
    assert_eq!(result.ranges, vec![partial.clone()]);
    assert_eq!(result.autocomplete, Some(partial));
}

#[test]
fn test_quoted_empty_value_is_a_value() {
    let empty = range(SearchKey::Tag, "", 4, 2);
    assert_parse("tag:\"\"", vec![empty.clone()], Some(empty));
}

#[test]
fn test_quote_inside_plain_value_is_literal() {
    let value = range(SearchKey::Category, "Bob's\"car\"", 9, 10);
    assert_parse("category:Bob's\"car\"", vec![value.clone()], Some(value));
}

// ============================================================================
// Output Shape
// ============================================================================

#[test]
fn test_json_output() {
    let json = serde_json::to_value(parse("category:")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "ranges": [],
            "autocomplete": {"key": "category", "value": "", "start": 9, "length": 0},
        })
    );
}

#[test]
fn test_source_text_round_trip() {
    let query = "in:\"Big Room\" from:Friend category:Car,\"Cell Phone\"";
    let result = parse(query);
    let raw: Vec<_> = result.ranges.iter().map(|r| r.source_text(query)).collect();
    assert_eq!(raw, vec!["\"Big Room\"", "Friend", "Car", "\"Cell Phone\""]);
}
