use error_stack::{report, ResultExt};
use google_sheets4::{
    api::{
        BatchUpdateSpreadsheetRequest, DeleteDimensionRequest, DimensionRange, Request, ValueRange,
    },
    Sheets,
};
use std::{collections::HashMap, fmt::Debug};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::mapping::cell::CellValue;
use crate::domain::sheets::a1_notation::A1Notation;
use crate::domain::sheets::row::Row;

use super::{
    auth::{self},
    http_client::{self, HttpsConnector},
    reference_column::FirstCellPerRow,
};

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    pub(super) hub: Sheets<HttpsConnector>,
    pub sheet_id_cache: RwLock<HashMap<String, i32>>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to authenticate against Google Sheets")]
    FailedToAuthenticate,
    #[error("Failed to fetch spreadsheet")]
    FailedToFetchSpreadsheet,
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to append rows")]
    FailedToAppendRows,
    #[error("Failed to delete rows")]
    FailedToDeleteRows,
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: SpreadsheetConfig,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client()
            .change_context(SpreadsheetManagerError::FailedToAuthenticate)
            .attach_printable("Failed to load the native root certificates")?;
        let auth = auth::auth(&config, client.clone())
            .await
            .change_context(SpreadsheetManagerError::FailedToAuthenticate)?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager {
            config,
            hub,
            sheet_id_cache: RwLock::new(HashMap::new()),
        })
    }

    #[instrument]
    pub async fn spreadsheet_title(&self) -> error_stack::Result<String, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .get(&self.config.spreadsheet_id)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchSpreadsheet)?;

        Ok(response
            .1
            .properties
            .and_then(|properties| properties.title)
            .unwrap_or_default())
    }

    /// Resolves a tab title to its numeric sheet id, needed by structural updates.
    #[instrument]
    pub async fn get_sheet_id(
        &self,
        sheet_title: &str,
    ) -> error_stack::Result<i32, SpreadsheetManagerError> {
        if let Some(sheet_id) = self.sheet_id_cache.read().await.get(sheet_title).copied() {
            return Ok(sheet_id);
        }

        let response = self
            .hub
            .spreadsheets()
            .get(&self.config.spreadsheet_id)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchSpreadsheet)?;

        let sheets = response.1.sheets.unwrap_or_default();

        let mut guard = self.sheet_id_cache.write().await;
        for sheet in &sheets {
            if let (Some(sheet_id), Some(title)) = (
                sheet.properties.as_ref().and_then(|p| p.sheet_id),
                sheet.properties.as_ref().and_then(|p| p.title.as_ref()),
            ) {
                guard.insert(title.clone(), sheet_id);
            }
        }

        guard.get(sheet_title).copied().ok_or_else(|| {
            report!(SpreadsheetManagerError::SheetNotFound(
                sheet_title.to_string()
            ))
            .attach_printable(format!(
                "Available sheets: {:?}",
                guard.keys().collect::<Vec<_>>()
            ))
        })
    }

    /// Reads one column, keeping empty rows as blanks.
    #[instrument]
    pub async fn read_column(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<CellValue>, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range.as_ref())
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        // An entirely empty column has no `values` at all
        Ok(response.1.values.unwrap_or_default().first_cell_per_row())
    }

    #[instrument(skip(value_range))]
    pub async fn append_range(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.hub
            .spreadsheets()
            .values_append(value_range, &self.config.spreadsheet_id, range.as_ref())
            .value_input_option("RAW")
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToAppendRows)
            .attach_printable_lazy(|| format!("Failed to append to range {}", range))
    }

    #[instrument]
    pub async fn delete_rows(
        &self,
        sheet_title: &str,
        rows: &[Row],
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        if rows.is_empty() {
            return Ok(());
        }

        let sheet_id = self.get_sheet_id(sheet_title).await?;

        self.hub
            .spreadsheets()
            .batch_update(
                delete_rows_request(sheet_id, rows),
                &self.config.spreadsheet_id,
            )
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToDeleteRows)
            .attach_printable_lazy(|| {
                format!("Failed to delete {} rows from {}", rows.len(), sheet_title)
            })
    }
}

/// One `deleteDimension` per row, bottom to top, so that earlier deletions in the
/// batch never shift the rows targeted by later ones.
pub(super) fn delete_rows_request(sheet_id: i32, rows: &[Row]) -> BatchUpdateSpreadsheetRequest {
    let mut rows = rows.to_vec();
    rows.sort_unstable_by(|a, b| b.cmp(a));
    rows.dedup();

    let requests = rows
        .into_iter()
        .map(|row| {
            let start_index = i32::try_from(row.index()).unwrap_or(i32::MAX);
            Request {
                delete_dimension: Some(DeleteDimensionRequest {
                    range: Some(DimensionRange {
                        sheet_id: Some(sheet_id),
                        dimension: Some("ROWS".to_string()),
                        start_index: Some(start_index),
                        end_index: Some(start_index.saturating_add(1)),
                    }),
                }),
                ..Default::default()
            }
        })
        .collect();

    BatchUpdateSpreadsheetRequest {
        requests: Some(requests),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deleted_ranges(request: &BatchUpdateSpreadsheetRequest) -> Vec<(i32, i32)> {
        request
            .requests
            .as_ref()
            .unwrap()
            .iter()
            .map(|request| {
                let range = request
                    .delete_dimension
                    .as_ref()
                    .unwrap()
                    .range
                    .as_ref()
                    .unwrap();
                (range.start_index.unwrap(), range.end_index.unwrap())
            })
            .collect()
    }

    #[test]
    fn test_delete_rows_request_goes_bottom_up() {
        let rows = [Row::from_row(2), Row::from_row(7), Row::from_row(4)];
        let request = delete_rows_request(42, &rows);
        assert_eq!(deleted_ranges(&request), vec![(6, 7), (3, 4), (1, 2)]);
    }

    #[test]
    fn test_delete_rows_request_targets_sheet_rows() {
        let request = delete_rows_request(42, &[Row::from_row(1)]);
        let range = request.requests.as_ref().unwrap()[0]
            .delete_dimension
            .as_ref()
            .unwrap()
            .range
            .as_ref()
            .unwrap();
        assert_eq!(range.sheet_id, Some(42));
        assert_eq!(range.dimension.as_deref(), Some("ROWS"));
    }

    #[test]
    fn test_delete_rows_request_deduplicates() {
        let rows = [Row::from_row(3), Row::from_row(3)];
        assert_eq!(deleted_ranges(&delete_rows_request(0, &rows)), vec![(2, 3)]);
    }
}
