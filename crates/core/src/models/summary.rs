use serde::{Deserialize, Serialize};

use super::month::MonthlyDataPoint;

/// Live totals derived from the line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,

    /// total_income - total_expenses
    pub cashflow: f64,

    /// total_assets - total_liabilities
    pub net_worth: f64,

    /// Number of line items across all four collections
    pub item_count: usize,
}

/// Everything the home dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub net_worth: f64,
    pub cashflow: f64,

    /// Trend chart series, oldest to newest
    pub latest_12_months: Vec<MonthlyDataPoint>,
}

/// Net worth measured against the age-based milestone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub age: u32,
    pub goal: f64,
    pub net_worth: f64,

    /// net_worth - goal; negative means the milestone is not yet reached
    pub difference: f64,
}

impl GoalProgress {
    pub fn is_met(&self) -> bool {
        self.difference >= 0.0
    }
}
