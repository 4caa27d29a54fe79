use std::cmp::Ordering;

use crate::models::line_item::LineItem;

/// Category filter value that matches every item.
pub const ALL_CATEGORIES: &str = "All";

/// Display order for an item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Newest timestamp first (default for display)
    #[default]
    Newest,
    /// Oldest timestamp first
    Oldest,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
    /// Unrecognized mode: keep the input order
    Unsorted,
}

impl SortMode {
    /// The selectable modes with their picker labels.
    pub fn options() -> [(SortMode, &'static str); 4] {
        [
            (SortMode::Newest, "Newest First"),
            (SortMode::Oldest, "Oldest First"),
            (SortMode::AmountDesc, "Amount (High to Low)"),
            (SortMode::AmountAsc, "Amount (Low to High)"),
        ]
    }

    /// Wire value used by the picker (`"newest"`, `"amountDesc"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::AmountDesc => "amountDesc",
            SortMode::AmountAsc => "amountAsc",
            SortMode::Unsorted => "",
        }
    }
}

impl From<&str> for SortMode {
    /// Never fails: anything unrecognized maps to `Unsorted`.
    fn from(value: &str) -> Self {
        match value {
            "newest" => SortMode::Newest,
            "oldest" => SortMode::Oldest,
            "amountDesc" => SortMode::AmountDesc,
            "amountAsc" => SortMode::AmountAsc,
            _ => SortMode::Unsorted,
        }
    }
}

/// Keep items matching both the category and the search text.
///
/// - `category == "All"` matches every category; anything else must match exactly.
/// - Empty `search_text` matches everything; otherwise it must appear in the
///   description (case-insensitive) or in the amount's string form.
pub fn filter_items<'a>(items: &'a [LineItem], category: &str, search_text: &str) -> Vec<&'a LineItem> {
    let needle = search_text.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let matches_category = category == ALL_CATEGORIES || item.category == category;
            let matches_search = search_text.is_empty()
                || item.description.to_lowercase().contains(&needle)
                || item.amount.to_string().contains(search_text);
            matches_category && matches_search
        })
        .collect()
}

/// Return a sorted copy of `items`; the input slice is left untouched.
/// Ties keep their relative order.
pub fn sort_items<'a>(items: &[&'a LineItem], mode: SortMode) -> Vec<&'a LineItem> {
    let mut sorted = items.to_vec();
    match mode {
        SortMode::Newest => sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortMode::Oldest => sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        SortMode::AmountDesc => sorted.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal)),
        SortMode::AmountAsc => sorted.sort_by(|a, b| a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal)),
        SortMode::Unsorted => {}
    }
    sorted
}

/// The list controls of one item screen: category picker, search box, sort picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub category: String,
    pub search_text: String,
    pub sort: SortMode,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search_text: String::new(),
            sort: SortMode::default(),
        }
    }
}

impl ItemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn sort(mut self, mode: SortMode) -> Self {
        self.sort = mode;
        self
    }

    /// Filter, then sort.
    pub fn apply<'a>(&self, items: &'a [LineItem]) -> Vec<&'a LineItem> {
        let filtered = filter_items(items, &self.category, &self.search_text);
        sort_items(&filtered, self.sort)
    }
}
