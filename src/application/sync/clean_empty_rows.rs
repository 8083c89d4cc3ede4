use tracing::instrument;

use crate::domain::sheets::locator::empty_rows;
use crate::ports::sheet_repository::{SheetRepository, SheetRepositoryError};

/// Deletes every row of the sheet whose reference cell is empty.
/// Returns how many rows were removed.
#[instrument(skip(sheets))]
pub async fn clean_empty_rows(
    sheets: &dyn SheetRepository,
    sheet_title: &str,
) -> error_stack::Result<usize, SheetRepositoryError> {
    sheets.ensure_sheet(sheet_title).await?;
    let existing = sheets.reference_column(sheet_title).await?;
    let rows = empty_rows(&existing);

    if rows.is_empty() {
        tracing::trace!("🧹 {}: no empty rows", sheet_title);
        return Ok(0);
    }

    tracing::info!("🧹 {}: deleting {} empty rows", sheet_title, rows.len());
    sheets.delete_rows(sheet_title, &rows).await?;
    Ok(rows.len())
}
