pub mod format;
pub mod goal_service;
pub mod history_editor;
pub mod list_service;
pub mod summary_service;
pub mod time_series_service;
