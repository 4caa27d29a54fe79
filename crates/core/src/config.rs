use serde::{Deserialize, Serialize};

/// Store key the ledger snapshot lives under.
pub const DEFAULT_STORAGE_KEY: &str = "financialData";

/// Number of months shown by the dashboard trend chart.
pub const DEFAULT_TREND_WINDOW_MONTHS: usize = 12;

/// Number of zeroed months synthesized when no snapshot exists yet.
pub const DEFAULT_HISTORY_MONTHS: usize = 12;

/// Host-supplied ledger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Key under which the whole ledger snapshot is stored.
    pub storage_key: String,

    /// How many trailing months `latest_12_months_data` returns.
    pub trend_window_months: usize,

    /// How many months (ending at the current one) a fresh ledger starts with.
    pub default_history_months: usize,

    /// Write indented JSON instead of compact JSON.
    pub pretty_json: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            trend_window_months: DEFAULT_TREND_WINDOW_MONTHS,
            default_history_months: DEFAULT_HISTORY_MONTHS,
            pretty_json: false,
        }
    }
}

impl LedgerConfig {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_trend_window_months(mut self, months: usize) -> Self {
        self.trend_window_months = months;
        self
    }

    pub fn with_default_history_months(mut self, months: usize) -> Self {
        self.default_history_months = months;
        self
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }
}
