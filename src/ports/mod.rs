pub mod application_service;
pub mod command_handler;
pub mod record_source;
pub mod routine;
pub mod sheet_repository;
