use std::collections::HashMap;
use std::sync::Mutex;

use error_stack::report;

use crate::domain::{
    mapping::cell::CellValue, mapping::SheetRow, record::DomainRecord, sheets::row::Row,
    variant::Variant,
};
use crate::ports::record_source::{DateWindow, RecordSource, RecordSourceError};
use crate::ports::sheet_repository::{SheetRepository, SheetRepositoryError};

/// Spreadsheet kept in memory: one reference column per tab plus a log of appends.
///
/// Missing tabs fail the way the Google Sheets adapter does: only the sheet
/// identity lookups report `SheetNotFound`, reads and appends fail generically.
#[derive(Default)]
pub struct InMemorySheets {
    pub columns: Mutex<HashMap<String, Vec<CellValue>>>,
    pub appends: Mutex<Vec<(String, Row, Vec<SheetRow>)>>,
    pub reads: Mutex<Vec<String>>,
}

impl InMemorySheets {
    pub fn with_sheet(self, title: &str, cells: &[&str]) -> Self {
        self.columns.lock().unwrap().insert(
            title.to_string(),
            cells.iter().map(|cell| CellValue::from(*cell)).collect(),
        );
        self
    }

    pub fn column(&self, title: &str) -> Vec<CellValue> {
        self.columns.lock().unwrap()[title].clone()
    }

    pub fn appends(&self) -> Vec<(String, Row, Vec<SheetRow>)> {
        self.appends.lock().unwrap().clone()
    }

    fn check_exists(
        &self,
        title: &str,
        error: SheetRepositoryError,
    ) -> error_stack::Result<(), SheetRepositoryError> {
        if self.columns.lock().unwrap().contains_key(title) {
            Ok(())
        } else {
            Err(report!(error))
        }
    }
}

#[async_trait::async_trait]
impl SheetRepository for InMemorySheets {
    async fn spreadsheet_title(&self) -> error_stack::Result<String, SheetRepositoryError> {
        Ok("Suivi comptable".to_string())
    }

    async fn ensure_sheet(
        &self,
        sheet_title: &str,
    ) -> error_stack::Result<(), SheetRepositoryError> {
        self.check_exists(
            sheet_title,
            SheetRepositoryError::SheetNotFound(sheet_title.to_string()),
        )
    }

    async fn reference_column(
        &self,
        sheet_title: &str,
    ) -> error_stack::Result<Vec<CellValue>, SheetRepositoryError> {
        self.check_exists(
            sheet_title,
            SheetRepositoryError::ReadFailed(sheet_title.to_string()),
        )?;
        self.reads.lock().unwrap().push(sheet_title.to_string());
        Ok(self.column(sheet_title))
    }

    async fn append_rows(
        &self,
        sheet_title: &str,
        start: Row,
        rows: &[SheetRow],
    ) -> error_stack::Result<(), SheetRepositoryError> {
        self.check_exists(
            sheet_title,
            SheetRepositoryError::AppendFailed(sheet_title.to_string()),
        )?;
        self.appends
            .lock()
            .unwrap()
            .push((sheet_title.to_string(), start, rows.to_vec()));
        Ok(())
    }

    async fn delete_rows(
        &self,
        sheet_title: &str,
        rows: &[Row],
    ) -> error_stack::Result<(), SheetRepositoryError> {
        self.ensure_sheet(sheet_title).await?;
        let mut columns = self.columns.lock().unwrap();
        let column = columns.get_mut(sheet_title).unwrap();
        let mut rows = rows.to_vec();
        rows.sort_unstable_by(|a, b| b.cmp(a));
        for row in rows {
            column.remove(row.index() as usize);
        }
        Ok(())
    }
}

/// Record source returning canned records per variant, or failing when told to.
#[derive(Default)]
pub struct StaticSource {
    pub records: HashMap<Variant, Vec<DomainRecord>>,
    pub fail: bool,
}

impl StaticSource {
    pub fn with(mut self, variant: Variant, records: serde_json::Value) -> Self {
        self.records
            .insert(variant, serde_json::from_value(records).unwrap());
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl RecordSource for StaticSource {
    fn source_name(&self) -> &str {
        "static"
    }

    async fn fetch_records(
        &self,
        variant: Variant,
        _window: DateWindow,
    ) -> error_stack::Result<Vec<DomainRecord>, RecordSourceError> {
        if self.fail {
            return Err(report!(RecordSourceError::FetchFailed(variant)));
        }
        Ok(self.records.get(&variant).cloned().unwrap_or_default())
    }
}
