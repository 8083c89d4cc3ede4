use serde_json::Value;

use crate::domain::mapping::cell::CellValue;

/// Turns a `values.get` response over a single column into one cell per sheet row.
///
/// The API drops trailing empty cells, so an empty row in the middle of the data
/// comes back as an empty inner vec. Those must stay in place as blanks, otherwise
/// every row below them would shift.
pub trait FirstCellPerRow {
    fn first_cell_per_row(self) -> Vec<CellValue>;
}

impl FirstCellPerRow for Vec<Vec<Value>> {
    fn first_cell_per_row(self) -> Vec<CellValue> {
        self.into_iter()
            .map(|row| row.first().map(CellValue::from).unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_cell_per_row_keeps_gaps() {
        let values = vec![
            vec![json!("Date")],
            vec![],
            vec![json!("2024-01-01"), json!("Acme")],
            vec![json!("")],
        ];
        assert_eq!(
            values.first_cell_per_row(),
            vec![
                CellValue::from("Date"),
                CellValue::Blank,
                CellValue::from("2024-01-01"),
                CellValue::from(""),
            ]
        );
    }

    #[test]
    fn test_first_cell_per_row_empty() {
        assert!(Vec::<Vec<Value>>::new().first_cell_per_row().is_empty());
    }
}
