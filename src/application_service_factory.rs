use axonaut_sheets::{
    adapters::{
        axonaut::api_client::AxonautApiClient,
        config::app_config::AppConfig,
        sheets::spreadsheet_sheet_repository::SpreadsheetSheetRepository,
        storage::json_record_store::JsonRecordStore,
    },
    application::{service::SheetsSyncApplicationService, sync::sync_routine::SyncRoutine},
    domain::variant::Variant,
    ports::{
        application_service::ApplicationService, record_source::DateWindow,
        record_source::RecordSource, routine::Routine, sheet_repository::SheetRepository,
    },
};
use std::sync::Arc;
use strum::IntoEnumIterator;

/// How the sync routines get their records and prepare their sheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutineOptions {
    /// Read the snapshots written by `fetch` instead of calling the API.
    pub from_file: bool,
    pub clean_first: bool,
    pub window: DateWindow,
}

pub struct ApplicationServiceFactory;

impl ApplicationServiceFactory {
    /// The spreadsheet connection is opened by the first command that needs it.
    pub fn create(
        config: &AppConfig,
        options: RoutineOptions,
    ) -> Result<Arc<dyn ApplicationService>, Box<dyn std::error::Error>> {
        let api: Arc<dyn RecordSource> = Arc::new(
            AxonautApiClient::new(&config.axonaut)
                .map_err(|report| format!("Could not create the Axonaut client: {:?}", report))?,
        );
        let store = JsonRecordStore::new(&config.storage);

        let sheets: Arc<dyn SheetRepository> =
            Arc::new(SpreadsheetSheetRepository::new(config.sheets.clone()));

        let source: Arc<dyn RecordSource> = if options.from_file {
            Arc::new(store.clone())
        } else {
            Arc::clone(&api)
        };

        let routines = Self::create_routines(config, options, source, Arc::clone(&sheets));

        Ok(Arc::new(SheetsSyncApplicationService::new(
            routines,
            api,
            store,
            sheets,
            config.sheets.tabs.clone(),
        )))
    }

    /// One routine per variant, in the order they run.
    fn create_routines(
        config: &AppConfig,
        options: RoutineOptions,
        source: Arc<dyn RecordSource>,
        sheets: Arc<dyn SheetRepository>,
    ) -> Vec<Box<dyn Routine>> {
        Variant::iter()
            .map(|variant| {
                Box::new(
                    SyncRoutine::new(
                        variant,
                        config.sheets.sheet_title(variant),
                        Arc::clone(&source),
                        Arc::clone(&sheets),
                    )
                    .with_window(options.window)
                    .with_clean_first(options.clean_first),
                ) as Box<dyn Routine>
            })
            .collect()
    }
}
