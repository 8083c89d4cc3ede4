use std::{fmt, sync::Arc};

use error_stack::ResultExt;
use tracing::instrument;

use super::clean_empty_rows::clean_empty_rows;
use crate::domain::{
    mapping::map_all,
    sheets::{
        locator::{locate, AppendPolicy},
        row::Row,
    },
    variant::Variant,
};
use crate::ports::record_source::{DateWindow, RecordSource};
use crate::ports::routine::{Routine, RoutineError};
use crate::ports::sheet_repository::{SheetRepository, SheetRepositoryError};

/// Pulls the records of one variant and appends them to that variant's sheet tab.
pub struct SyncRoutine {
    routine_name: String,
    variant: Variant,
    sheet_title: String,
    window: DateWindow,
    clean_first: bool,
    source: Arc<dyn RecordSource>,
    sheets: Arc<dyn SheetRepository>,
}

impl fmt::Debug for SyncRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncRoutine")
            .field("routine_name", &self.routine_name)
            .field("sheet_title", &self.sheet_title)
            .field("window", &self.window)
            .field("clean_first", &self.clean_first)
            .finish()
    }
}

impl SyncRoutine {
    pub fn new(
        variant: Variant,
        sheet_title: impl Into<String>,
        source: Arc<dyn RecordSource>,
        sheets: Arc<dyn SheetRepository>,
    ) -> Self {
        Self {
            routine_name: routine_name(variant),
            variant,
            sheet_title: sheet_title.into(),
            window: DateWindow::default(),
            clean_first: false,
            source,
            sheets,
        }
    }

    pub fn with_window(mut self, window: DateWindow) -> Self {
        self.window = window;
        self
    }

    /// Deletes empty rows of the tab before locating the append row.
    pub fn with_clean_first(mut self, clean_first: bool) -> Self {
        self.clean_first = clean_first;
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The fixed-row policy never looks at the sheet, so the column read is skipped.
    #[instrument]
    async fn resolve_append_row(&self) -> error_stack::Result<Row, SheetRepositoryError> {
        let policy = self.variant.schema().append;
        let existing = match policy {
            AppendPolicy::FixedRow(_) => Vec::new(),
            AppendPolicy::FirstEmpty => self.sheets.reference_column(&self.sheet_title).await?,
        };
        Ok(locate(&existing, policy))
    }
}

pub fn routine_name(variant: Variant) -> String {
    format!("{}-sync", variant)
}

#[async_trait::async_trait]
impl Routine for SyncRoutine {
    fn name(&self) -> &str {
        self.routine_name.as_str()
    }

    #[instrument(skip(self), fields(routine = %self.routine_name), name = "SyncRoutine::run")]
    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        if self.clean_first {
            clean_empty_rows(self.sheets.as_ref(), &self.sheet_title)
                .await
                .change_context_lazy(|| {
                    RoutineError::routine_failure(format!(
                        "Failed to clean empty rows of '{}'",
                        self.sheet_title
                    ))
                })?;
        }

        tracing::trace!(
            "{}: ☁️  Getting records from {}",
            self.name(),
            self.source.source_name()
        );
        let records = self
            .source
            .fetch_records(self.variant, self.window)
            .await
            .change_context_lazy(|| RoutineError::routine_failure("Failed to fetch records"))?;

        if records.is_empty() {
            tracing::info!("{}: nothing to append", self.name());
            return Ok(());
        }

        tracing::trace!("{}: 📊 Mapping {} records", self.name(), records.len());
        let rows = map_all(&records, self.variant);

        self.sheets
            .ensure_sheet(&self.sheet_title)
            .await
            .change_context_lazy(|| {
                RoutineError::routine_failure(format!(
                    "Failed to resolve sheet '{}'",
                    self.sheet_title
                ))
            })?;

        let start = self.resolve_append_row().await.change_context_lazy(|| {
            RoutineError::routine_failure(format!(
                "Failed to locate the append row of '{}'",
                self.sheet_title
            ))
        })?;

        tracing::trace!(
            "{}: 📝 Appending {} rows to '{}' from row {}",
            self.name(),
            rows.len(),
            self.sheet_title,
            start
        );
        self.sheets
            .append_rows(&self.sheet_title, start, &rows)
            .await
            .change_context_lazy(|| {
                RoutineError::routine_failure(format!(
                    "Failed to append rows to '{}'",
                    self.sheet_title
                ))
            })?;

        tracing::info!(
            "{}: ✅ {} rows written to '{}' starting at row {}",
            self.name(),
            rows.len(),
            self.sheet_title,
            start
        );
        Ok(())
    }
}
