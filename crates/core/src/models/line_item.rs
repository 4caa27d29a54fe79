use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Which of the four ledger collections a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Income,
    Expense,
    Asset,
    Liability,
}

const INCOME_CATEGORIES: &[&str] = &["Salary", "Real Estate", "Business", "Interest/Dividends"];

const EXPENSE_CATEGORIES: &[&str] = &[
    "Housing",
    "Transportation",
    "Food",
    "Utilities",
    "Insurance",
    "Healthcare",
    "Entertainment",
    "Loan",
];

const ASSET_CATEGORIES: &[&str] = &[
    "Real Estate",
    "Vehicles",
    "Cash",
    "Business",
    "Saving",
    "Stocks/Funds/CDs",
];

const LIABILITY_CATEGORIES: &[&str] = &["Short-term Debts", "Long-term Debts"];

impl ItemKind {
    /// All kinds, in dashboard order.
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Income,
        ItemKind::Expense,
        ItemKind::Asset,
        ItemKind::Liability,
    ];

    /// The fixed category set for this collection, in picker order.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            ItemKind::Income => INCOME_CATEGORIES,
            ItemKind::Expense => EXPENSE_CATEGORIES,
            ItemKind::Asset => ASSET_CATEGORIES,
            ItemKind::Liability => LIABILITY_CATEGORIES,
        }
    }

    /// Category preselected in the add form (first entry of the table).
    pub fn default_category(&self) -> &'static str {
        self.categories()[0]
    }

    pub fn accepts_category(&self, category: &str) -> bool {
        self.categories().contains(&category)
    }

    /// Name of this collection's array in the stored snapshot.
    pub fn wire_field(&self) -> &'static str {
        match self {
            ItemKind::Income => "incomeItems",
            ItemKind::Expense => "expenseItems",
            ItemKind::Asset => "assetItems",
            ItemKind::Liability => "liabilityItems",
        }
    }

    /// Screen title for this collection.
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Income => "Income",
            ItemKind::Expense => "Expenses",
            ItemKind::Asset => "Assets",
            ItemKind::Liability => "Liabilities",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Income => write!(f, "income"),
            ItemKind::Expense => write!(f, "expense"),
            ItemKind::Asset => write!(f, "asset"),
            ItemKind::Liability => write!(f, "liability"),
        }
    }
}

/// A single recorded income, expense, asset or liability entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Time-ordered unique identifier (UUID v7, hyphenated)
    pub id: String,

    /// Non-negative amount with at most two fractional digits
    pub amount: f64,

    pub description: String,

    /// One of the owning collection's categories
    pub category: String,

    /// Creation instant; never changes after the item is created
    pub timestamp: DateTime<Utc>,
}

impl LineItem {
    /// Build an item from a validated draft, stamping it with a fresh id.
    pub fn from_draft(draft: ItemDraft, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: new_item_id(),
            amount: draft.amount,
            description: draft.description,
            category: draft.category,
            timestamp,
        }
    }
}

/// Generate a new time-ordered item id.
pub fn new_item_id() -> String {
    Uuid::now_v7().to_string()
}

/// User input for a new line item, before an id and timestamp are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub amount: f64,
    pub description: String,
    pub category: String,
}

impl ItemDraft {
    pub fn new(amount: f64, description: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
            category: category.into(),
        }
    }

    /// Build a draft from raw form fields.
    ///
    /// Returns `None` unless both the amount text and the description are
    /// present and the amount text parses as a plain decimal.
    pub fn from_input(
        amount_text: &str,
        description: &str,
        category: impl Into<String>,
    ) -> Option<Self> {
        if description.is_empty() {
            return None;
        }
        let amount = crate::services::format::parse_amount_input(amount_text)?;
        Some(Self::new(amount, description, category))
    }

    /// Check the draft against the rules for `kind`.
    /// Fails with `CoreError::ValidationError` carrying a human-readable reason.
    pub fn validate(&self, kind: ItemKind) -> Result<(), CoreError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "amount {} must be a finite, non-negative number",
                self.amount
            )));
        }
        if !has_at_most_two_decimals(self.amount) {
            return Err(CoreError::ValidationError(format!(
                "amount {} has more than two decimal places",
                self.amount
            )));
        }
        if self.description.is_empty() {
            return Err(CoreError::ValidationError("description is required".into()));
        }
        if !kind.accepts_category(&self.category) {
            return Err(CoreError::ValidationError(format!(
                "'{}' is not a valid {kind} category",
                self.category
            )));
        }
        Ok(())
    }
}

fn has_at_most_two_decimals(amount: f64) -> bool {
    let cents = amount * 100.0;
    (cents - cents.round()).abs() < 1e-6
}
