use google_sheets4::api::ValueRange;
use serde_json::Value;

use crate::domain::mapping::{cell::CellValue, SheetRow};

pub trait ValueRangeFactory {
    fn from_sheet_rows(rows: &[SheetRow]) -> Self;
}

fn row_to_values(row: &SheetRow) -> Vec<Value> {
    row.cells().iter().map(CellValue::to_json).collect()
}

impl ValueRangeFactory for ValueRange {
    fn from_sheet_rows(rows: &[SheetRow]) -> Self {
        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(rows.iter().map(row_to_values).collect()),
        }
    }
}
