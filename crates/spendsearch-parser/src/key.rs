//! Search field vocabulary.
//!
//! [`SearchKey`] is the closed set of fields the search bar understands. Each
//! field has exactly one canonical name (the spelling emitted in every
//! [`Range`](crate::Range)) and zero or more aliases: the user-facing
//! spellings (`tax-rate`, `expense-type`, `card`) that older clients and
//! humans type instead of the camel-cased canonical form.

use crate::error::UnknownSearchKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A canonical search field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SearchKey {
    /// Kind of search result (`type:expense`).
    #[serde(rename = "type")]
    Type,
    /// Report or expense status.
    #[serde(rename = "status")]
    Status,
    /// Expense date.
    #[serde(rename = "date")]
    Date,
    /// Expense amount.
    #[serde(rename = "amount")]
    Amount,
    /// Merchant name.
    #[serde(rename = "merchant")]
    Merchant,
    /// Free-form expense description.
    #[serde(rename = "description")]
    Description,
    /// Report identifier.
    #[serde(rename = "reportID")]
    ReportId,
    /// Keyword matched anywhere in the expense.
    #[serde(rename = "keyword")]
    Keyword,
    /// Chat or room the expense was shared in.
    #[serde(rename = "in")]
    In,
    /// Expense currency code.
    #[serde(rename = "currency")]
    Currency,
    /// Workspace tag.
    #[serde(rename = "tag")]
    Tag,
    /// Workspace category.
    #[serde(rename = "category")]
    Category,
    /// Recipient of the expense.
    #[serde(rename = "to")]
    To,
    /// Submitter of the expense.
    #[serde(rename = "from")]
    From,
    /// Tax rate applied to the expense.
    #[serde(rename = "taxRate")]
    TaxRate,
    /// Company card the expense was charged to.
    #[serde(rename = "cardID")]
    CardId,
    /// How the expense was created (cash, card, distance, ...).
    #[serde(rename = "expenseType")]
    ExpenseType,
}

impl SearchKey {
    /// Every search field, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::Type,
        Self::Status,
        Self::Date,
        Self::Amount,
        Self::Merchant,
        Self::Description,
        Self::ReportId,
        Self::Keyword,
        Self::In,
        Self::Currency,
        Self::Tag,
        Self::Category,
        Self::To,
        Self::From,
        Self::TaxRate,
        Self::CardId,
        Self::ExpenseType,
    ];

    /// Fields backed by a suggestion source. These make up the builtin
    /// [`KeyTable`](crate::KeyTable); the remaining fields are free-form and
    /// have nothing to autocomplete.
    pub const SUGGESTIBLE: [Self; 10] = [
        Self::Type,
        Self::In,
        Self::Currency,
        Self::Tag,
        Self::Category,
        Self::To,
        Self::TaxRate,
        Self::CardId,
        Self::From,
        Self::ExpenseType,
    ];

    /// The canonical spelling of this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Status => "status",
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Merchant => "merchant",
            Self::Description => "description",
            Self::ReportId => "reportID",
            Self::Keyword => "keyword",
            Self::In => "in",
            Self::Currency => "currency",
            Self::Tag => "tag",
            Self::Category => "category",
            Self::To => "to",
            Self::From => "from",
            Self::TaxRate => "taxRate",
            Self::CardId => "cardID",
            Self::ExpenseType => "expenseType",
        }
    }

    /// User-facing spellings accepted in place of the canonical name.
    #[must_use]
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::ReportId => &["report-id"],
            Self::TaxRate => &["tax-rate"],
            Self::CardId => &["card"],
            Self::ExpenseType => &["expense-type"],
            _ => &[],
        }
    }

    /// Canonical name followed by every alias.
    pub fn surface_forms(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.as_str()).chain(self.aliases().iter().copied())
    }

    /// Look up a field by its canonical name or one of its aliases.
    ///
    /// This ignores any injected [`KeyTable`](crate::KeyTable); it answers
    /// "is this a field at all", not "is it completable here".
    #[must_use]
    pub fn from_surface_form(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.surface_forms().any(|form| form == name))
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SearchKey {
    type Err = UnknownSearchKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_surface_form(s).ok_or_else(|| UnknownSearchKey(s.to_string()))
    }
}
