pub mod ledger;
pub mod line_item;
pub mod month;
pub mod summary;
