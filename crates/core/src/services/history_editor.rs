use crate::models::month::{MonthKey, MonthlyDataPoint, MonthlyRecord};

use super::time_series_service::TimeSeriesService;

/// Staged edits to the monthly history, most recent month first.
///
/// Nothing here touches the ledger: the host commits the result with
/// `FinanceLedger::replace_monthly_history(editor.into_records())`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEditor {
    rows: Vec<MonthlyDataPoint>,
    dirty: bool,
}

impl HistoryEditor {
    /// Start an editing session from the ledger's `all_monthly_data()`.
    pub fn new(mut points: Vec<MonthlyDataPoint>) -> Self {
        points.sort_by(|a, b| b.month_key.cmp(&a.month_key));
        points.dedup_by_key(|p| p.month_key);
        Self {
            rows: points,
            dirty: false,
        }
    }

    /// Rows in display order (descending by month).
    pub fn rows(&self) -> &[MonthlyDataPoint] {
        &self.rows
    }

    pub fn row(&self, month: MonthKey) -> Option<&MonthlyDataPoint> {
        self.rows.iter().find(|r| r.month_key == month)
    }

    /// `true` once any row has been edited or added.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns `false` if `month` has no row or `value` is not finite.
    pub fn set_net_asset(&mut self, month: MonthKey, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.update(month, |row| row.net_asset = value)
    }

    /// Returns `false` if `month` has no row or `value` is not finite.
    pub fn set_cashflow(&mut self, month: MonthKey, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.update(month, |row| row.cashflow = value)
    }

    /// Like `set_net_asset`, from raw text. Unparseable text stores 0.
    pub fn set_net_asset_input(&mut self, month: MonthKey, text: &str) -> bool {
        self.set_net_asset(month, parse_cell(text))
    }

    /// Like `set_cashflow`, from raw text. Unparseable text stores 0.
    pub fn set_cashflow_input(&mut self, month: MonthKey, text: &str) -> bool {
        self.set_cashflow(month, parse_cell(text))
    }

    /// Prepend a zeroed row for the month after the latest staged month,
    /// or for `current` when there are no rows. Returns the new month, or
    /// `None` (nothing added) when the latest row is December 9999.
    pub fn add_next_month(&mut self, current: MonthKey) -> Option<MonthKey> {
        let latest = self.rows.first().map(|row| row.month_key);
        let month = TimeSeriesService::new().next_month_after(latest, current)?;
        let row = MonthlyDataPoint::new(month, Default::default());
        self.rows.insert(0, row);
        self.dirty = true;
        Some(month)
    }

    /// The staged rows as records, ready for `replace_monthly_history`.
    pub fn into_records(self) -> Vec<MonthlyRecord> {
        self.rows.iter().map(MonthlyDataPoint::to_record).collect()
    }

    fn update(&mut self, month: MonthKey, apply: impl FnOnce(&mut MonthlyDataPoint)) -> bool {
        match self.rows.iter_mut().find(|r| r.month_key == month) {
            Some(row) => {
                apply(row);
                self.dirty = true;
                true
            }
            None => false,
        }
    }
}

/// Parses the longest leading decimal number, so `"12abc"` reads as 12 and
/// `"1e"` as 1. Anything unparsable or non-finite reads as 0.
fn parse_cell(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
