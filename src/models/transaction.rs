//! Transaction model
//!
//! A transaction is an immutable value once created: edits replace the whole
//! record by id. The sign of a movement is carried by [`TransactionType`],
//! never by the amount.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::date::TransactionDate;
use super::ids::TransactionId;
use super::money::Money;
use crate::error::{FinboardError, FinboardResult};

/// Direction of a transaction
///
/// Records written by other tools may carry any string here. Unknown values
/// are preserved and contribute to neither income nor expense.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Income,
    Expense,
    Other(String),
}

impl TransactionType {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }

    /// The lower-case wire name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for TransactionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "income" => Self::Income,
            "expense" => Self::Expense,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for TransactionType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<TransactionType> for String {
    fn from(kind: TransactionType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, derived from the creation time
    pub id: TransactionId,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Amount in currency units; the direction is given by `kind`
    pub amount: Money,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Category name (open set)
    #[serde(default)]
    pub category: String,

    /// Calendar date
    pub date: TransactionDate,
}

impl Transaction {
    /// Create a new transaction with a fresh time-derived id
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        kind: TransactionType,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::with_id(TransactionId::now(), description, amount, kind, category, date)
    }

    /// Create a transaction with an explicit id
    pub fn with_id(
        id: TransactionId,
        description: impl Into<String>,
        amount: Money,
        kind: TransactionType,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            date: TransactionDate::Valid(date),
        }
    }

    /// Shorthand for an income record
    pub fn income(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(description, amount, TransactionType::Income, category, date)
    }

    /// Shorthand for an expense record
    pub fn expense(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(description, amount, TransactionType::Expense, category, date)
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    /// Validate the transaction as entered through a form
    ///
    /// The analytics pipeline does not rely on this; it accepts any record.
    pub fn validate(&self) -> FinboardResult<()> {
        if self.description.trim().is_empty() || self.category.trim().is_empty() {
            return Err(FinboardError::Validation(
                "Please fill in all fields.".into(),
            ));
        }

        if !self.amount.is_positive() {
            return Err(FinboardError::Validation(
                "Amount should be greater than zero.".into(),
            ));
        }

        if let TransactionType::Other(raw) = &self.kind {
            return Err(FinboardError::Validation(format!(
                "Transaction type must be 'income' or 'expense', got '{}'",
                raw
            )));
        }

        if let TransactionDate::Invalid(raw) = &self.date {
            return Err(FinboardError::Validation(format!(
                "Invalid date '{}': expected YYYY-MM-DD",
                raw
            )));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}, {})",
            self.date, self.description, self.amount, self.kind, self.category
        )
    }
}
