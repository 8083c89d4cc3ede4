use std::fmt::Formatter;

use super::{column::Column, row::Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

fn with_sheet(sheet_name: Option<&str>, local: String) -> A1Notation {
    match sheet_name {
        // Quotes inside a sheet title are escaped by doubling them
        Some(sheet_name) => A1Notation(format!("'{}'!{}", sheet_name.replace('\'', "''"), local)),
        None => A1Notation(local),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub col: Column,
    pub row: Row,
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        with_sheet(sheet_name, format!("{}{}", self.col, self.row))
    }
}

/// A whole column, e.g. `A:A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange(pub Column);

impl ToA1Notation for ColumnRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        with_sheet(sheet_name, format!("{}:{}", self.0, self.0))
    }
}

/// Open-ended block starting at a cell, e.g. `A1223:H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBlock {
    pub start: CellPosition,
    pub last_col: Column,
}

impl ToA1Notation for RowBlock {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        with_sheet(
            sheet_name,
            format!("{}{}:{}", self.start.col, self.start.row, self.last_col),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_position_to_a1_notation() {
        let position = CellPosition {
            col: Column::A,
            row: Row::from_row(1223),
        };
        assert_eq!(position.to_a1_notation(None).as_ref(), "A1223");
        assert_eq!(
            position.to_a1_notation(Some("TABLEAU DEVIS")).as_ref(),
            "'TABLEAU DEVIS'!A1223"
        );
    }

    #[test]
    fn test_column_range_to_a1_notation() {
        assert_eq!(
            ColumnRange(Column::A)
                .to_a1_notation(Some("TABLEAU DÉPENSES"))
                .as_ref(),
            "'TABLEAU DÉPENSES'!A:A"
        );
    }

    #[test]
    fn test_row_block_to_a1_notation() {
        let block = RowBlock {
            start: CellPosition {
                col: Column::A,
                row: Row::from_row(3),
            },
            last_col: Column::last_of_width(8),
        };
        assert_eq!(block.to_a1_notation(None).as_ref(), "A3:H");
    }

    #[test]
    fn test_sheet_name_with_quote_is_escaped() {
        assert_eq!(
            ColumnRange(Column::A)
                .to_a1_notation(Some("L'année"))
                .as_ref(),
            "'L''année'!A:A"
        );
    }
}
