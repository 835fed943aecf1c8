//! The injected table of keys a query may complete.
//!
//! The parser never decides on its own which `name:` prefixes are
//! meaningful; it asks a [`KeyTable`]. The builtin table covers the fields
//! that have a suggestion source, and callers owning a different list of
//! searchable fields build their own, either in code with
//! [`KeyTable::builder`] or from a JSON document:
//!
//! ```
//! use spendsearch_parser::{KeyTable, SearchKey};
//!
//! let table = KeyTable::from_json(r#"{
//!     "keys": [
//!         { "key": "merchant", "aliases": ["vendor"] },
//!         { "key": "category" }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(table.resolve("vendor"), Some(SearchKey::Merchant));
//! assert_eq!(table.resolve("tag"), None);
//! ```

use crate::error::KeyTableError;
use crate::key::SearchKey;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Immutable mapping from surface form (`tax-rate`, `taxRate`, ...) to the
/// canonical [`SearchKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTable {
    forms: BTreeMap<String, SearchKey>,
}

impl KeyTable {
    /// The table used by [`parse`](crate::parse): every
    /// [`SearchKey::SUGGESTIBLE`] field with its canonical name and aliases.
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<KeyTable> = OnceLock::new();
        BUILTIN.get_or_init(|| KeyTable {
            forms: SearchKey::SUGGESTIBLE
                .into_iter()
                .flat_map(|key| key.surface_forms().map(move |form| (form.to_string(), key)))
                .collect(),
        })
    }

    /// Start an empty table.
    #[must_use]
    pub fn builder() -> KeyTableBuilder {
        KeyTableBuilder::default()
    }

    /// Load a table from a JSON document of the form
    /// `{"keys": [{"key": "<canonical name>", "aliases": ["..."]}]}`.
    ///
    /// Each listed key is registered under its canonical name and builtin
    /// aliases, plus any extra aliases given in the document.
    pub fn from_json(document: &str) -> Result<Self, KeyTableError> {
        let config: KeyTableConfig = serde_json::from_str(document)?;
        let mut builder = Self::builder();
        for entry in config.keys {
            builder = builder.key(entry.key);
            for alias in entry.aliases {
                builder = builder.alias(alias, entry.key);
            }
        }
        builder.build()
    }

    /// Resolve a surface form to its canonical key.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<SearchKey> {
        self.forms.get(name).copied()
    }

    /// Whether `key` is reachable through at least one surface form.
    #[must_use]
    pub fn contains(&self, key: SearchKey) -> bool {
        self.forms.values().any(|k| *k == key)
    }

    /// All registered surface forms with their keys, sorted by surface form.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SearchKey)> {
        self.forms.iter().map(|(form, key)| (form.as_str(), *key))
    }

    /// Number of registered surface forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Check if no surface form is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

/// Builder for [`KeyTable`]. Validation happens in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct KeyTableBuilder {
    entries: Vec<(String, SearchKey)>,
}

impl KeyTableBuilder {
    /// Register `key` under its canonical name and builtin aliases.
    #[must_use]
    pub fn key(mut self, key: SearchKey) -> Self {
        self.entries
            .extend(key.surface_forms().map(|form| (form.to_string(), key)));
        self
    }

    /// Register an extra spelling for `key`.
    #[must_use]
    pub fn alias(mut self, form: impl Into<String>, key: SearchKey) -> Self {
        self.entries.push((form.into(), key));
        self
    }

    /// Validate the registered surface forms and freeze the table.
    pub fn build(self) -> Result<KeyTable, KeyTableError> {
        let mut forms = BTreeMap::new();
        for (form, key) in self.entries {
            if !is_valid_surface_form(&form) {
                return Err(KeyTableError::InvalidSurfaceForm { form, key });
            }
            match forms.get(&form) {
                Some(existing) if *existing != key => {
                    return Err(KeyTableError::Conflict {
                        form,
                        existing: *existing,
                        key,
                    });
                }
                Some(_) => {}
                None => {
                    forms.insert(form, key);
                }
            }
        }
        Ok(KeyTable { forms })
    }
}

/// A surface form must be scannable as a query key.
fn is_valid_surface_form(form: &str) -> bool {
    !form.is_empty() && form.chars().all(crate::scanner::is_key_char)
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyTableConfig {
    keys: Vec<KeyEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeyEntry {
    key: SearchKey,
    #[serde(default)]
    aliases: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_resolves_aliases() {
        let table = KeyTable::builtin();
        assert_eq!(table.resolve("tax-rate"), Some(SearchKey::TaxRate));
        assert_eq!(table.resolve("taxRate"), Some(SearchKey::TaxRate));
        assert_eq!(table.resolve("expense-type"), Some(SearchKey::ExpenseType));
        assert_eq!(table.resolve("card"), Some(SearchKey::CardId));
        assert_eq!(table.resolve("cardID"), Some(SearchKey::CardId));
    }

    #[test]
    fn test_builtin_excludes_free_form_fields() {
        let table = KeyTable::builtin();
        for key in [
            SearchKey::Merchant,
            SearchKey::Description,
            SearchKey::ReportId,
            SearchKey::Date,
            SearchKey::Amount,
            SearchKey::Keyword,
        ] {
            assert!(!table.contains(key), "{key} should not be completable");
        }
        for key in SearchKey::SUGGESTIBLE {
            assert!(table.contains(key));
        }
    }

    #[test]
    fn test_builtin_passes_validation() {
        let built = SearchKey::SUGGESTIBLE
            .into_iter()
            .fold(KeyTable::builder(), KeyTableBuilder::key)
            .build()
            .unwrap();
        assert_eq!(&built, KeyTable::builtin());
    }

    #[test]
    fn test_builder_rejects_conflicts() {
        let err = KeyTable::builder()
            .key(SearchKey::Tag)
            .alias("tag", SearchKey::Category)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            KeyTableError::Conflict {
                existing: SearchKey::Tag,
                key: SearchKey::Category,
                ..
            }
        ));
    }

    #[test]
    fn test_builder_accepts_repeated_registration() {
        let table = KeyTable::builder()
            .key(SearchKey::Tag)
            .key(SearchKey::Tag)
            .build()
            .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_builder_rejects_invalid_forms() {
        for form in ["", "has space", "colon:", "\"quoted\""] {
            let err = KeyTable::builder()
                .alias(form, SearchKey::Tag)
                .build()
                .unwrap_err();
            assert!(matches!(err, KeyTableError::InvalidSurfaceForm { .. }));
        }
    }

    #[test]
    fn test_from_json() {
        let table = KeyTable::from_json(
            r#"{"keys": [{"key": "reportID"}, {"key": "merchant", "aliases": ["vendor"]}]}"#,
        )
        .unwrap();
        assert_eq!(table.resolve("reportID"), Some(SearchKey::ReportId));
        assert_eq!(table.resolve("report-id"), Some(SearchKey::ReportId));
        assert_eq!(table.resolve("vendor"), Some(SearchKey::Merchant));
        assert_eq!(table.resolve("category"), None);
    }

    #[test]
    fn test_from_json_rejects_unknown_key() {
        let err = KeyTable::from_json(r#"{"keys": [{"key": "weather"}]}"#).unwrap_err();
        assert!(matches!(err, KeyTableError::Json(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        assert!(KeyTable::from_json("keys = []").is_err());
        assert!(KeyTable::from_json(r#"{"keys": [], "extra": 1}"#).is_err());
    }
}
