//! Category catalog
//!
//! Categories are an open set inside the analytics pipeline: any string a
//! transaction carries is grouped as-is. At the input boundary the dashboard
//! offers a closed list of known categories plus free text, modelled by
//! [`CategoryName`], and can guess a category from the description.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FinboardError, FinboardResult};

/// Whether a category is meant for income or expense records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

/// The categories offered by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownCategory {
    Food,
    Transportation,
    Housing,
    Entertainment,
    Health,
    Education,
    Clothing,
    GiftsAndDonations,
    Travel,
    OtherExpenses,
    Salary,
    Freelance,
    Investments,
    OtherIncome,
}

impl KnownCategory {
    /// All known categories, expense categories first
    pub fn all() -> &'static [KnownCategory] {
        &[
            Self::Food,
            Self::Transportation,
            Self::Housing,
            Self::Entertainment,
            Self::Health,
            Self::Education,
            Self::Clothing,
            Self::GiftsAndDonations,
            Self::Travel,
            Self::OtherExpenses,
            Self::Salary,
            Self::Freelance,
            Self::Investments,
            Self::OtherIncome,
        ]
    }

    /// Known categories of one kind, in catalog order
    pub fn of_kind(kind: CategoryKind) -> impl Iterator<Item = KnownCategory> {
        Self::all().iter().copied().filter(move |c| c.kind() == kind)
    }

    /// Display name, as stored on transactions
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Housing => "Housing",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Education => "Education",
            Self::Clothing => "Clothing",
            Self::GiftsAndDonations => "Gifts and Donations",
            Self::Travel => "Travel",
            Self::OtherExpenses => "Other Expenses",
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investments => "Investments",
            Self::OtherIncome => "Other Income",
        }
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            Self::Salary | Self::Freelance | Self::Investments | Self::OtherIncome => {
                CategoryKind::Income
            }
            _ => CategoryKind::Expense,
        }
    }

    /// Look up a known category by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Lower-case keywords that suggest this category in a description
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Food => &["supermarket", "grocery", "restaurant", "cafe", "bakery", "pizza"],
            Self::Transportation => &["metro", "train", "taxi", "uber", "fuel", "parking", "bus ticket"],
            Self::Housing => &["rent", "mortgage", "electricity", "water bill", "internet"],
            Self::Entertainment => &["cinema", "movie", "concert", "netflix", "spotify"],
            Self::Health => &["pharmacy", "doctor", "dentist", "hospital", "gym"],
            Self::Education => &["course", "tuition", "school", "university", "textbook"],
            Self::Clothing => &["shoes", "clothes", "shirt", "jacket", "dress"],
            Self::GiftsAndDonations => &["gift", "donation", "charity"],
            Self::Travel => &["hotel", "flight", "airbnb", "holiday"],
            Self::OtherExpenses => &[],
            Self::Salary => &["salary", "payroll", "wage"],
            Self::Freelance => &["freelance", "invoice"],
            Self::Investments => &["dividend", "interest", "stock"],
            Self::OtherIncome => &[],
        }
    }
}

impl fmt::Display for KnownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A category entered at the boundary: one of the known list or free text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryName {
    Known(KnownCategory),
    Custom(String),
}

impl CategoryName {
    /// Validate user input; blank names are rejected
    pub fn parse(input: &str) -> FinboardResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(FinboardError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        Ok(match KnownCategory::from_name(input) {
            Some(known) => Self::Known(known),
            None => Self::Custom(input.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(known) => known.name(),
            Self::Custom(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guess a category from a free-text description
///
/// The first category (in catalog order) with a keyword contained in the
/// lower-cased description wins; otherwise `Other Expenses`.
pub fn assign_category(description: &str) -> KnownCategory {
    let description = description.to_lowercase();
    KnownCategory::all()
        .iter()
        .copied()
        .find(|c| c.keywords().iter().any(|k| description.contains(k)))
        .unwrap_or(KnownCategory::OtherExpenses)
}
