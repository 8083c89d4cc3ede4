pub mod axonaut;
pub mod config;
pub mod sheets;
pub mod storage;
