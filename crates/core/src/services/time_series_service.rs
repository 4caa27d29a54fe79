use crate::models::ledger::LedgerState;
use crate::models::month::{MonthKey, MonthlyDataPoint, MonthlyRecord};

/// Orders and windows the monthly history for the trend chart and editor.
pub struct TimeSeriesService;

impl TimeSeriesService {
    pub fn new() -> Self {
        Self
    }

    /// Every recorded month, ascending by month key.
    pub fn all_monthly_data(&self, state: &LedgerState) -> Vec<MonthlyDataPoint> {
        state.history_points()
    }

    /// The trailing `window` months of `all_monthly_data`, still ascending
    /// (oldest to newest, left to right on the chart).
    /// Returns fewer entries when less history exists.
    pub fn latest_months(&self, state: &LedgerState, window: usize) -> Vec<MonthlyDataPoint> {
        let mut all = self.all_monthly_data(state);
        let start = all.len().saturating_sub(window);
        all.split_off(start)
    }

    /// Zeroed records for the `count` months ending at `current`.
    pub fn default_history(&self, current: MonthKey, count: usize) -> Vec<MonthlyRecord> {
        MonthKey::trailing(current, count)
            .into_iter()
            .map(MonthlyRecord::zeroed)
            .collect()
    }

    /// The month a newly appended row should get: the one after the latest
    /// recorded month, or `current` when nothing is recorded.
    /// `None` when the latest month is already the last representable one.
    pub fn next_month_after(&self, latest: Option<MonthKey>, current: MonthKey) -> Option<MonthKey> {
        match latest {
            Some(m) => m.next(),
            None => Some(current),
        }
    }
}

impl Default for TimeSeriesService {
    fn default() -> Self {
        Self::new()
    }
}
