//! Transactions as supplied by the external data store.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_key::{parse_timestamp, DateKey};

/// Category name reported for transactions that carry none.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A dated money movement, read-only to the engine.
///
/// `date` is the raw timestamp string; it is parsed on demand so that a
/// malformed value only excludes this transaction instead of failing the load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub date: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: date.into(),
            amount,
            kind,
            category: category.into(),
            note: None,
        }
    }

    pub fn expense(date: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self::new(date, amount, TransactionKind::Expense, category)
    }

    pub fn income(date: impl Into<String>, amount: f64, category: impl Into<String>) -> Self {
        Self::new(date, amount, TransactionKind::Income, category)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Local wall-clock timestamp, if the raw date parses.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.date)
    }

    /// Local calendar day of the transaction, if the raw date parses.
    pub fn date_key(&self) -> Option<DateKey> {
        self.timestamp()
            .and_then(|timestamp| DateKey::from_naive(&timestamp))
    }

    /// Category used for grouping; blank categories fold into [`UNCATEGORIZED`].
    pub fn category_label(&self) -> &str {
        let trimmed = self.category.trim();
        if trimmed.is_empty() {
            UNCATEGORIZED
        } else {
            trimmed
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of a transaction.
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Series name used when aggregating by kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
