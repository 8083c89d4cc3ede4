use thiserror::Error;

use crate::domain::{mapping::cell::CellValue, mapping::SheetRow, sheets::row::Row};

#[derive(Error, Debug)]
pub enum SheetRepositoryError {
    #[error("Failed to reach the spreadsheet")]
    ConnectionFailed,
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),
    #[error("Failed to read the reference column of sheet '{0}'")]
    ReadFailed(String),
    #[error("Failed to append rows to sheet '{0}'")]
    AppendFailed(String),
    #[error("Failed to delete rows from sheet '{0}'")]
    DeleteFailed(String),
}

/// Destination of the mapped rows. Sheets are addressed by their tab title.
#[async_trait::async_trait]
pub trait SheetRepository: Send + Sync {
    /// Title of the whole spreadsheet, used as a connection check.
    async fn spreadsheet_title(&self) -> error_stack::Result<String, SheetRepositoryError>;

    /// Resolves the tab to its sheet identity. A missing tab is
    /// [`SheetRepositoryError::SheetNotFound`]; callers resolve before reading or writing.
    async fn ensure_sheet(
        &self,
        sheet_title: &str,
    ) -> error_stack::Result<(), SheetRepositoryError>;

    /// Cells of the reference column (column A) from row 1 down to the last non-empty row.
    /// Rows with nothing in the reference column come back as [`CellValue::Blank`].
    async fn reference_column(
        &self,
        sheet_title: &str,
    ) -> error_stack::Result<Vec<CellValue>, SheetRepositoryError>;

    /// Writes `rows` starting at `start`, one sheet line per row.
    async fn append_rows(
        &self,
        sheet_title: &str,
        start: Row,
        rows: &[SheetRow],
    ) -> error_stack::Result<(), SheetRepositoryError>;

    /// Removes the given rows, shifting the rows below them up.
    async fn delete_rows(
        &self,
        sheet_title: &str,
        rows: &[Row],
    ) -> error_stack::Result<(), SheetRepositoryError>;
}
