use std::collections::BTreeMap;

use super::line_item::{ItemKind, LineItem};
use super::month::{MonthKey, MonthlyDataPoint, MonthlyRecord, MonthlySnapshot};

/// The aggregate root: all line items plus the monthly history.
///
/// Live totals are derived from the item collections; the monthly history
/// is an independently edited data set and is never recomputed from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    /// Newest first by construction
    pub income_items: Vec<LineItem>,
    pub expense_items: Vec<LineItem>,
    pub asset_items: Vec<LineItem>,
    pub liability_items: Vec<LineItem>,

    /// Sparse month → snapshot map, kept in chronological order
    pub monthly_history: BTreeMap<MonthKey, MonthlySnapshot>,

    /// True until the initial load from the store completes. Never persisted.
    pub is_loading: bool,
}

impl LedgerState {
    pub fn items(&self, kind: ItemKind) -> &[LineItem] {
        match kind {
            ItemKind::Income => &self.income_items,
            ItemKind::Expense => &self.expense_items,
            ItemKind::Asset => &self.asset_items,
            ItemKind::Liability => &self.liability_items,
        }
    }

    pub fn items_mut(&mut self, kind: ItemKind) -> &mut Vec<LineItem> {
        match kind {
            ItemKind::Income => &mut self.income_items,
            ItemKind::Expense => &mut self.expense_items,
            ItemKind::Asset => &mut self.asset_items,
            ItemKind::Liability => &mut self.liability_items,
        }
    }

    pub fn find_item(&self, kind: ItemKind, id: &str) -> Option<&LineItem> {
        self.items(kind).iter().find(|i| i.id == id)
    }

    /// Insert at the head of the collection.
    pub fn push_item(&mut self, kind: ItemKind, item: LineItem) {
        self.items_mut(kind).insert(0, item);
    }

    /// Remove the item whose id matches. Returns the removed item, if any.
    pub fn remove_item(&mut self, kind: ItemKind, id: &str) -> Option<LineItem> {
        let items = self.items_mut(kind);
        let idx = items.iter().position(|i| i.id == id)?;
        Some(items.remove(idx))
    }

    /// Rebuild the history from `records`; later duplicates win.
    /// Records carrying a non-finite value are skipped, since they cannot be
    /// stored as JSON numbers.
    pub fn replace_history(&mut self, records: impl IntoIterator<Item = MonthlyRecord>) {
        self.monthly_history = records
            .into_iter()
            .filter(|r| {
                let finite = r.net_asset.is_finite() && r.cashflow.is_finite();
                if !finite {
                    tracing::warn!(
                        month = %r.month_key,
                        net_asset = r.net_asset,
                        cashflow = r.cashflow,
                        "skipping non-finite monthly record"
                    );
                }
                finite
            })
            .map(|r| (r.month_key, r.snapshot()))
            .collect();
    }

    /// The whole history as annotated points, oldest first.
    pub fn history_points(&self) -> Vec<MonthlyDataPoint> {
        self.monthly_history
            .iter()
            .map(|(key, snapshot)| MonthlyDataPoint::new(*key, *snapshot))
            .collect()
    }

    /// Total number of line items across all collections.
    pub fn item_count(&self) -> usize {
        ItemKind::ALL.iter().map(|k| self.items(*k).len()).sum()
    }
}
