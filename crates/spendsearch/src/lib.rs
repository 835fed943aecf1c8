//! Search query CLI tools.
//!
//! This crate provides command-line tools for working with search bar
//! queries:
//!
//! - `spendsearch-parse`: Show the ranges and autocomplete target of a query
//!
//! # Example Usage
//!
//! ```bash
//! spendsearch-parse 'type:expense category:Car,Cel'
//! spendsearch-parse --format json -F queries.txt
//! spendsearch-parse --suggest "Cell Phone" 'category:Car,Cel'
//! spendsearch-parse  # Interactive mode
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
