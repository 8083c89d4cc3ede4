use std::path::PathBuf;
use std::sync::Arc;

use error_stack::ResultExt;
use tracing::{error, info, instrument, Instrument};

use super::sync::clean_empty_rows::clean_empty_rows;
use crate::adapters::config::sheets_config::SheetTabsConfig;
use crate::adapters::storage::json_record_store::JsonRecordStore;
use crate::domain::variant::Variant;
use crate::ports::application_service::{
    ApplicationService, ApplicationServiceError, RoutineResults,
};
use crate::ports::record_source::{DateWindow, RecordSource};
use crate::ports::routine::Routine;
use crate::ports::sheet_repository::SheetRepository;

pub struct SheetsSyncApplicationService {
    routines: Vec<Box<dyn Routine>>,
    api: Arc<dyn RecordSource>,
    store: JsonRecordStore,
    sheets: Arc<dyn SheetRepository>,
    tabs: SheetTabsConfig,
}

impl SheetsSyncApplicationService {
    pub fn new(
        routines: Vec<Box<dyn Routine>>,
        api: Arc<dyn RecordSource>,
        store: JsonRecordStore,
        sheets: Arc<dyn SheetRepository>,
        tabs: SheetTabsConfig,
    ) -> Self {
        Self {
            routines,
            api,
            store,
            sheets,
            tabs,
        }
    }
}

#[async_trait::async_trait]
impl ApplicationService for SheetsSyncApplicationService {
    #[instrument(skip(self))]
    async fn run_all_routines(&self) -> RoutineResults {
        info!("Running {} routines sequentially", self.routines.len());

        let mut routine_results = Vec::with_capacity(self.routines.len());
        for (index, routine) in self.routines.iter().enumerate() {
            let result = routine
                .run()
                .instrument(tracing::span!(
                    tracing::Level::INFO,
                    "routine",
                    routine = routine.name(),
                    index = index,
                    len = self.routines.len()
                ))
                .await;

            if let Err(ref report) = result {
                error!("❌ {}: {:?}", routine.name(), report);
            } else {
                info!("✅ {}: OK", routine.name());
            }

            routine_results.push((routine.name().to_string(), result));
        }

        routine_results
    }

    #[instrument(skip(self))]
    async fn run_routine_by_name(
        &self,
        name: &str,
    ) -> error_stack::Result<(), ApplicationServiceError> {
        let routine = self
            .routines
            .iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| ApplicationServiceError::RoutineExecutionFailed {
                details: format!("Routine '{}' not found", name),
            })?;

        routine
            .run()
            .await
            .change_context_lazy(|| ApplicationServiceError::RoutineExecutionFailed {
                details: format!("Routine '{}' failed", name),
            })
    }

    async fn list_available_routines(&self) -> Vec<String> {
        self.routines.iter().map(|r| r.name().to_string()).collect()
    }

    #[instrument(skip(self))]
    async fn fetch_snapshot(
        &self,
        variant: Variant,
        window: DateWindow,
    ) -> error_stack::Result<(usize, PathBuf), ApplicationServiceError> {
        let records = self
            .api
            .fetch_records(variant, window)
            .await
            .change_context_lazy(|| ApplicationServiceError::FetchFailed {
                details: format!("Could not fetch {} records", variant),
            })?;

        let path = self
            .store
            .save(variant, &records)
            .await
            .change_context_lazy(|| ApplicationServiceError::FetchFailed {
                details: format!("Could not save {} records", variant),
            })?;

        Ok((records.len(), path))
    }

    #[instrument(skip(self))]
    async fn clean_sheet(
        &self,
        variant: Variant,
    ) -> error_stack::Result<usize, ApplicationServiceError> {
        let sheet_title = self.tabs.title(variant);
        clean_empty_rows(self.sheets.as_ref(), sheet_title)
            .await
            .change_context_lazy(|| ApplicationServiceError::CleanFailed {
                details: format!("Could not clean '{}'", sheet_title),
            })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> error_stack::Result<String, ApplicationServiceError> {
        let title = self
            .sheets
            .spreadsheet_title()
            .await
            .change_context(ApplicationServiceError::HealthCheckFailed)?;
        let routine_names: Vec<String> = self.list_available_routines().await;

        Ok(format!(
            "🟢 Connection successful!\n\
             Spreadsheet title: {}\n\
             Records source: {}\n\
             Routines available: {}",
            title,
            self.api.source_name(),
            routine_names.join(", ")
        ))
    }
}
