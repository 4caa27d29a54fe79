use crate::models::ledger::LedgerState;
use crate::models::line_item::{ItemKind, LineItem};
use crate::models::month::MonthKey;
use crate::models::summary::LedgerSummary;

/// Derives totals, cashflow and net worth.
///
/// Two separate sources are exposed and must stay separate:
/// - the *live* figures, summed from the current line items;
/// - the *historical* figures, read back from the user-edited monthly history.
///
/// The historical figures are never recomputed from line items, so they can
/// (and usually do) differ from the live ones.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Sum of `amount` over `items`. Empty → 0.
    pub fn total(&self, items: &[LineItem]) -> f64 {
        items.iter().map(|i| i.amount).sum()
    }

    pub fn total_for(&self, state: &LedgerState, kind: ItemKind) -> f64 {
        self.total(state.items(kind))
    }

    /// Live cashflow: total income minus total expenses.
    pub fn cashflow(&self, state: &LedgerState) -> f64 {
        self.total_for(state, ItemKind::Income) - self.total_for(state, ItemKind::Expense)
    }

    /// Live net worth: total assets minus total liabilities.
    pub fn net_worth(&self, state: &LedgerState) -> f64 {
        self.total_for(state, ItemKind::Asset) - self.total_for(state, ItemKind::Liability)
    }

    /// Recorded cashflow for `month`, or 0 when that month has no record.
    pub fn historical_cashflow(&self, state: &LedgerState, month: MonthKey) -> f64 {
        state
            .monthly_history
            .get(&month)
            .map(|s| s.cashflow)
            .unwrap_or(0.0)
    }

    /// Recorded net worth for `month`, or 0 when that month has no record.
    pub fn historical_net_worth(&self, state: &LedgerState, month: MonthKey) -> f64 {
        state
            .monthly_history
            .get(&month)
            .map(|s| s.net_asset)
            .unwrap_or(0.0)
    }

    pub fn summary(&self, state: &LedgerState) -> LedgerSummary {
        let total_income = self.total_for(state, ItemKind::Income);
        let total_expenses = self.total_for(state, ItemKind::Expense);
        let total_assets = self.total_for(state, ItemKind::Asset);
        let total_liabilities = self.total_for(state, ItemKind::Liability);

        LedgerSummary {
            total_income,
            total_expenses,
            total_assets,
            total_liabilities,
            cashflow: total_income - total_expenses,
            net_worth: total_assets - total_liabilities,
            item_count: state.item_count(),
        }
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}
