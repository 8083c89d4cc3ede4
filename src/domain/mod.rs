pub mod mapping;
pub mod record;
pub mod sheets;
pub mod variant;

// Re-export commonly used types
pub use mapping::{cell::CellValue, map, map_all, SheetRow};
pub use record::DomainRecord;
pub use sheets::locator::{empty_rows, locate, AppendPolicy};
pub use sheets::row::Row;
pub use variant::Variant;
