pub mod cell;
pub mod schema;

use std::ops::Deref;

use self::cell::CellValue;
use self::schema::ColumnRule;
use super::record::DomainRecord;
use super::variant::Variant;

/// Positional cells for one sheet line. Column order is the contract.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetRow(Vec<CellValue>);

impl SheetRow {
    pub fn cells(&self) -> &[CellValue] {
        &self.0
    }
}

impl Deref for SheetRow {
    type Target = [CellValue];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<CellValue>> for SheetRow {
    fn from(cells: Vec<CellValue>) -> Self {
        SheetRow(cells)
    }
}

/// Maps a record onto the column layout of the variant's sheet.
///
/// Never fails: anything missing from the record becomes a blank cell, so the row
/// always has exactly as many cells as the schema has columns.
pub fn map(record: &DomainRecord, variant: Variant) -> SheetRow {
    variant
        .schema()
        .columns
        .iter()
        .map(|rule| match rule {
            ColumnRule::Source(path) => record
                .get_path(path)
                .map(CellValue::from)
                .unwrap_or_default(),
            ColumnRule::Blank => CellValue::Blank,
        })
        .collect::<Vec<_>>()
        .into()
}

pub fn map_all(records: &[DomainRecord], variant: Variant) -> Vec<SheetRow> {
    records.iter().map(|record| map(record, variant)).collect()
}
