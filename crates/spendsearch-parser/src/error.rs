//! Error types.
//!
//! Parsing a query never fails. Errors only arise while building a
//! [`KeyTable`](crate::KeyTable) from caller-supplied configuration.

use crate::key::SearchKey;
use thiserror::Error;

/// Error returned when a string names no search field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search key: {0}")]
pub struct UnknownSearchKey(pub String);

/// Error returned when a key table configuration is rejected.
#[derive(Debug, Error)]
pub enum KeyTableError {
    /// The configuration document is not valid JSON, or names a key that
    /// does not exist.
    #[error("invalid key table document: {0}")]
    Json(#[from] serde_json::Error),
    /// A surface form is empty or contains characters a query key cannot.
    #[error("invalid surface form {form:?} for key {key}")]
    InvalidSurfaceForm {
        /// The rejected spelling.
        form: String,
        /// The key it was registered for.
        key: SearchKey,
    },
    /// The same surface form was registered for two different keys.
    #[error("surface form {form:?} maps to both {existing} and {key}")]
    Conflict {
        /// The ambiguous spelling.
        form: String,
        /// The key registered first.
        existing: SearchKey,
        /// The key that tried to claim it.
        key: SearchKey,
    },
}
