pub mod app_config;
pub mod axonaut_config;
pub mod sheets_config;
pub mod storage_config;
pub mod telemetry_config;
