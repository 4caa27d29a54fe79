use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::ledger::LedgerState;
use crate::models::line_item::LineItem;
use crate::models::month::{MonthKey, MonthlySnapshot};

/// Current snapshot format version.
pub const CURRENT_VERSION: u16 = 1;

fn current_version() -> u16 {
    CURRENT_VERSION
}

/// Persisted form of the ledger.
///
/// Layout:
/// ```text
/// {
///   "version": 1,
///   "incomeItems":    [ {id, amount, description, category, timestamp}, ... ],
///   "expenseItems":   [ ... ],
///   "assetItems":     [ ... ],
///   "liabilityItems": [ ... ],
///   "monthlyHistoricalData": { "2025-01": {"netAsset": 0, "cashflow": 0}, ... }
/// }
/// ```
/// Every field is optional on read; missing collections come back empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSnapshot {
    #[serde(default = "current_version")]
    pub version: u16,
    #[serde(default)]
    pub income_items: Vec<LineItem>,
    #[serde(default)]
    pub expense_items: Vec<LineItem>,
    #[serde(default)]
    pub asset_items: Vec<LineItem>,
    #[serde(default)]
    pub liability_items: Vec<LineItem>,
    /// Keyed by raw month string so one bad key can't fail the whole load
    #[serde(default)]
    pub monthly_historical_data: BTreeMap<String, MonthlySnapshot>,
}

impl LedgerSnapshot {
    pub fn from_state(state: &LedgerState) -> Self {
        Self {
            version: CURRENT_VERSION,
            income_items: state.income_items.clone(),
            expense_items: state.expense_items.clone(),
            asset_items: state.asset_items.clone(),
            liability_items: state.liability_items.clone(),
            monthly_historical_data: state
                .monthly_history
                .iter()
                .map(|(key, snapshot)| (key.to_string(), *snapshot))
                .collect(),
        }
    }

    /// Convert to in-memory state. History entries whose key is not a
    /// valid `YYYY-MM` month are dropped and logged.
    pub fn into_state(self) -> LedgerState {
        let mut monthly_history = BTreeMap::new();
        for (raw_key, snapshot) in self.monthly_historical_data {
            match raw_key.parse::<MonthKey>() {
                Ok(key) => {
                    monthly_history.insert(key, snapshot);
                }
                Err(e) => {
                    tracing::warn!(key = %raw_key, error = %e, "dropping monthly history entry");
                }
            }
        }

        LedgerState {
            income_items: self.income_items,
            expense_items: self.expense_items,
            asset_items: self.asset_items,
            liability_items: self.liability_items,
            monthly_history,
            is_loading: false,
        }
    }
}

/// Serialize the full ledger state (everything except `is_loading`).
pub fn encode(state: &LedgerState, pretty: bool) -> Result<String, CoreError> {
    let snapshot = LedgerSnapshot::from_state(state);
    let result = if pretty {
        serde_json::to_string_pretty(&snapshot)
    } else {
        serde_json::to_string(&snapshot)
    };
    result.map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
}

/// Parse a stored snapshot back into ledger state.
pub fn decode(data: &str) -> Result<LedgerState, CoreError> {
    let snapshot: LedgerSnapshot = serde_json::from_str(data)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))?;

    if snapshot.version == 0 || snapshot.version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(snapshot.version));
    }

    Ok(snapshot.into_state())
}
