use std::path::PathBuf;

use thiserror::Error;

use crate::domain::variant::Variant;
use crate::ports::record_source::DateWindow;
use crate::ports::routine::RoutineError;

#[derive(Error, Debug)]
pub enum ApplicationServiceError {
    #[error("Service initialization failed: {details}")]
    InitializationFailed { details: String },
    #[error("Routine execution failed: {details}")]
    RoutineExecutionFailed { details: String },
    #[error("Fetching records failed: {details}")]
    FetchFailed { details: String },
    #[error("Cleaning sheet failed: {details}")]
    CleanFailed { details: String },
    #[error("Health check failed")]
    HealthCheckFailed,
}

pub type RoutineResults = Vec<(String, error_stack::Result<(), RoutineError>)>;

#[async_trait::async_trait]
pub trait ApplicationService: Send + Sync {
    /// Runs every routine one after the other, in registration order.
    /// A failing routine does not stop the following ones.
    async fn run_all_routines(&self) -> RoutineResults;

    async fn run_routine_by_name(
        &self,
        name: &str,
    ) -> error_stack::Result<(), ApplicationServiceError>;

    async fn list_available_routines(&self) -> Vec<String>;

    /// Downloads the records of a variant and stores them as a JSON snapshot.
    /// Returns how many records were saved and where.
    async fn fetch_snapshot(
        &self,
        variant: Variant,
        window: DateWindow,
    ) -> error_stack::Result<(usize, PathBuf), ApplicationServiceError>;

    /// Deletes the rows of the variant's sheet that have nothing in the reference column.
    async fn clean_sheet(
        &self,
        variant: Variant,
    ) -> error_stack::Result<usize, ApplicationServiceError>;

    async fn health_check(&self) -> error_stack::Result<String, ApplicationServiceError>;
}
