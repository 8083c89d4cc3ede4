use super::row::Row;
use crate::domain::mapping::cell::CellValue;

/// How the first writable row of a sheet is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppendPolicy {
    /// First row whose reference cell is blank, or the row right after the data.
    #[default]
    FirstEmpty,
    /// Always this 1-based row, whatever the sheet holds.
    FixedRow(u32),
}

/// Resolves the row at which new data starts, given the reference column cells
/// read from the top of the sheet.
///
/// ```
/// use axonaut_sheets::domain::mapping::cell::CellValue;
/// use axonaut_sheets::domain::sheets::locator::{locate, AppendPolicy};
///
/// let column = [CellValue::from("a"), CellValue::from("b"), CellValue::Blank];
/// assert_eq!(locate(&column, AppendPolicy::FirstEmpty).number(), 3);
/// assert_eq!(locate(&[], AppendPolicy::FirstEmpty).number(), 1);
/// assert_eq!(locate(&column, AppendPolicy::FixedRow(1223)).number(), 1223);
/// ```
pub fn locate(existing: &[CellValue], policy: AppendPolicy) -> Row {
    match policy {
        AppendPolicy::FixedRow(row) => Row::from_row(row),
        AppendPolicy::FirstEmpty => existing
            .iter()
            .position(CellValue::is_blank)
            .map(|index| Row::from_index(index as u32))
            .unwrap_or_else(|| Row::from_index(existing.len() as u32)),
    }
}

/// Rows whose reference cell is blank, top to bottom.
///
/// Uses the same emptiness rule as [`locate`] so that cleaning a sheet and then
/// appending never disagree about which rows hold data.
pub fn empty_rows(existing: &[CellValue]) -> Vec<Row> {
    existing
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_blank())
        .map(|(index, _)| Row::from_index(index as u32))
        .collect()
}
