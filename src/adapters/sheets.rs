pub mod auth;
pub mod http_client;
pub mod reference_column;
pub mod spreadsheet_manager;
pub mod spreadsheet_sheet_repository;
pub mod value_range_factory;
