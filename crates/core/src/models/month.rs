use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::errors::CoreError;

/// A calendar month, written canonically as `"YYYY-MM"`.
///
/// Ordering is chronological, which matches lexicographic ordering of the
/// canonical string form (zero-padded, fixed width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub const MAX_YEAR: i32 = 9999;

    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(0..=Self::MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return Err(CoreError::InvalidMonthKey(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`. Years outside `0..=MAX_YEAR` are clamped.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(0, Self::MAX_YEAR),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month (December rolls into January).
    /// `None` past December of `MAX_YEAR`.
    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1).ok()
        } else {
            Self::new(self.year, self.month + 1).ok()
        }
    }

    /// The preceding calendar month (January rolls back into December).
    /// `None` before January of year 0.
    pub fn prev(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12).ok()
        } else {
            Self::new(self.year, self.month - 1).ok()
        }
    }

    /// First day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Long display label, e.g. `"January 2025"`.
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(d) => d.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }

    /// The `count` months ending at `last` (inclusive), oldest first.
    /// Stops early at January of year 0.
    pub fn trailing(last: MonthKey, count: usize) -> Vec<MonthKey> {
        let mut months: Vec<MonthKey> = std::iter::successors(Some(last), MonthKey::prev)
            .take(count)
            .collect();
        months.reverse();
        months
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidMonthKey(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The values stored for one month of history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    /// Net worth as of that month
    #[serde(default)]
    pub net_asset: f64,

    /// Net cashflow for that month
    #[serde(default)]
    pub cashflow: f64,
}

/// One row of monthly history, carrying its own key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    pub month_key: MonthKey,
    pub net_asset: f64,
    pub cashflow: f64,
}

impl MonthlyRecord {
    pub fn new(month_key: MonthKey, net_asset: f64, cashflow: f64) -> Self {
        Self {
            month_key,
            net_asset,
            cashflow,
        }
    }

    /// A record with both values at zero.
    pub fn zeroed(month_key: MonthKey) -> Self {
        Self::new(month_key, 0.0, 0.0)
    }

    pub fn snapshot(&self) -> MonthlySnapshot {
        MonthlySnapshot {
            net_asset: self.net_asset,
            cashflow: self.cashflow,
        }
    }
}

/// A monthly record annotated with its parsed month and year,
/// ready for the trend chart and the history table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDataPoint {
    pub month_key: MonthKey,
    /// 1-based month number
    pub month: u32,
    pub year: i32,
    pub net_asset: f64,
    pub cashflow: f64,
}

impl MonthlyDataPoint {
    pub fn new(month_key: MonthKey, snapshot: MonthlySnapshot) -> Self {
        Self {
            month_key,
            month: month_key.month(),
            year: month_key.year(),
            net_asset: snapshot.net_asset,
            cashflow: snapshot.cashflow,
        }
    }

    pub fn to_record(&self) -> MonthlyRecord {
        MonthlyRecord::new(self.month_key, self.net_asset, self.cashflow)
    }
}
