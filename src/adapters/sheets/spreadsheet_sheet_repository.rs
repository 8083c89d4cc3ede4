use error_stack::{Report, ResultExt};
use google_sheets4::api::ValueRange;
use tokio::sync::OnceCell;

use super::spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError};
use super::value_range_factory::ValueRangeFactory;
use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::mapping::cell::CellValue;
use crate::domain::mapping::SheetRow;
use crate::domain::sheets::a1_notation::{
    A1Notation, CellPosition, ColumnRange, RowBlock, ToA1Notation,
};
use crate::domain::sheets::column::Column;
use crate::domain::sheets::row::Row;
use crate::ports::sheet_repository::{SheetRepository, SheetRepositoryError};

/// Column whose emptiness decides whether a sheet row is free.
pub const REFERENCE_COLUMN: Column = Column::A;

pub struct SpreadsheetSheetRepository {
    config: SpreadsheetConfig,
    spreadsheet_manager: OnceCell<SpreadsheetManager>,
}

impl SpreadsheetSheetRepository {
    pub fn new(config: SpreadsheetConfig) -> Self {
        Self {
            config,
            spreadsheet_manager: OnceCell::new(),
        }
    }

    /// Authenticates on first use rather than at construction.
    async fn manager(&self) -> error_stack::Result<&SpreadsheetManager, SheetRepositoryError> {
        self.spreadsheet_manager
            .get_or_try_init(|| SpreadsheetManager::new(self.config.clone()))
            .await
            .change_context(SheetRepositoryError::ConnectionFailed)
    }
}

fn not_found_or(
    report: Report<SpreadsheetManagerError>,
    otherwise: SheetRepositoryError,
) -> Report<SheetRepositoryError> {
    let context = match report.current_context() {
        SpreadsheetManagerError::SheetNotFound(title) => {
            SheetRepositoryError::SheetNotFound(title.clone())
        }
        _ => otherwise,
    };
    report.change_context(context)
}

/// Range starting at `start` in the reference column and as wide as `first_row`.
fn append_block(sheet_title: &str, start: Row, first_row: &SheetRow) -> A1Notation {
    RowBlock {
        start: CellPosition {
            col: REFERENCE_COLUMN,
            row: start,
        },
        last_col: Column::last_of_width(first_row.len()),
    }
    .to_a1_notation(Some(sheet_title))
}

#[async_trait::async_trait]
impl SheetRepository for SpreadsheetSheetRepository {
    async fn spreadsheet_title(&self) -> error_stack::Result<String, SheetRepositoryError> {
        self.manager()
            .await?
            .spreadsheet_title()
            .await
            .change_context(SheetRepositoryError::ConnectionFailed)
    }

    async fn ensure_sheet(
        &self,
        sheet_title: &str,
    ) -> error_stack::Result<(), SheetRepositoryError> {
        self.manager()
            .await?
            .get_sheet_id(sheet_title)
            .await
            .map(|_| ())
            .map_err(|report| not_found_or(report, SheetRepositoryError::ConnectionFailed))
    }

    async fn reference_column(
        &self,
        sheet_title: &str,
    ) -> error_stack::Result<Vec<CellValue>, SheetRepositoryError> {
        let range = ColumnRange(REFERENCE_COLUMN).to_a1_notation(Some(sheet_title));
        self.manager()
            .await?
            .read_column(&range)
            .await
            .change_context(SheetRepositoryError::ReadFailed(sheet_title.to_string()))
    }

    async fn append_rows(
        &self,
        sheet_title: &str,
        start: Row,
        rows: &[SheetRow],
    ) -> error_stack::Result<(), SheetRepositoryError> {
        let Some(first_row) = rows.first() else {
            return Ok(());
        };
        let range = append_block(sheet_title, start, first_row);

        self.manager()
            .await?
            .append_range(&range, ValueRange::from_sheet_rows(rows))
            .await
            .change_context(SheetRepositoryError::AppendFailed(sheet_title.to_string()))
    }

    async fn delete_rows(
        &self,
        sheet_title: &str,
        rows: &[Row],
    ) -> error_stack::Result<(), SheetRepositoryError> {
        self.manager()
            .await?
            .delete_rows(sheet_title, rows)
            .await
            .map_err(|report| {
                not_found_or(
                    report,
                    SheetRepositoryError::DeleteFailed(sheet_title.to_string()),
                )
            })
    }
}
