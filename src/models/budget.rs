//! Budget settings model
//!
//! Holds the overall spending limit, per-category limits and the switch that
//! decides whether budget alerts are shown at all.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::{CategoryKind, KnownCategory};
use super::money::Money;
use crate::error::{FinboardError, FinboardResult};

/// User-configured budget limits
///
/// Serialized with the camelCase keys used by the stored settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSettings {
    /// Limit on total expenses
    #[serde(default)]
    pub total_budget_limit: Money,

    /// Limit per category, ordered by category name
    #[serde(default)]
    pub category_limits: BTreeMap<String, Money>,

    /// Whether alerts should be surfaced to the user
    #[serde(default = "default_alerts_enabled")]
    pub alerts_enabled: bool,
}

fn default_alerts_enabled() -> bool {
    true
}

impl Default for BudgetSettings {
    fn default() -> Self {
        let limits = [
            (KnownCategory::Food, 300),
            (KnownCategory::Transportation, 80),
            (KnownCategory::Housing, 850),
            (KnownCategory::Entertainment, 100),
            (KnownCategory::Health, 50),
            (KnownCategory::Education, 100),
            (KnownCategory::Clothing, 50),
            (KnownCategory::GiftsAndDonations, 100),
            (KnownCategory::Travel, 100),
            (KnownCategory::OtherExpenses, 100),
        ];

        Self {
            total_budget_limit: Money::from_units(1850),
            category_limits: limits
                .iter()
                .map(|(category, units)| (category.name().to_string(), Money::from_units(*units)))
                .collect(),
            alerts_enabled: true,
        }
    }
}

impl BudgetSettings {
    /// Settings with no limits at all
    pub fn empty() -> Self {
        Self {
            total_budget_limit: Money::zero(),
            category_limits: BTreeMap::new(),
            alerts_enabled: true,
        }
    }

    /// Limit configured for a category, if any
    pub fn limit_for(&self, category: &str) -> Option<Money> {
        self.category_limits.get(category).copied()
    }

    /// Set or replace the limit of a category
    pub fn set_limit(&mut self, category: impl Into<String>, limit: Money) {
        self.category_limits.insert(category.into(), limit);
    }

    /// Remove the limit of a category, returning it if it existed
    pub fn remove_limit(&mut self, category: &str) -> Option<Money> {
        self.category_limits.remove(category)
    }

    /// Sum of all category limits
    pub fn total_category_limits(&self) -> Money {
        self.category_limits.values().copied().sum()
    }

    /// Check the settings before they are saved
    pub fn validate(&self) -> FinboardResult<()> {
        if self.total_budget_limit.is_negative() {
            return Err(FinboardError::Settings(
                "The total budget limit cannot be negative.".into(),
            ));
        }

        if let Some((category, _)) = self.category_limits.iter().find(|(_, l)| l.is_negative()) {
            return Err(FinboardError::Settings(format!(
                "The limit for '{}' cannot be negative.",
                category
            )));
        }

        if self.total_category_limits() > self.total_budget_limit {
            return Err(FinboardError::Settings(
                "The sum of category limits exceeds the total budget limit.".into(),
            ));
        }

        Ok(())
    }

    /// Expense categories from the known list that have no limit yet
    pub fn unbudgeted_known_categories(&self) -> Vec<KnownCategory> {
        KnownCategory::of_kind(CategoryKind::Expense)
            .filter(|c| !self.category_limits.contains_key(c.name()))
            .collect()
    }
}
