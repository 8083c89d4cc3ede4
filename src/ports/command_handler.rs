use thiserror::Error;

use crate::domain::variant::Variant;
use crate::ports::record_source::DateWindow;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid command: {details}")]
    InvalidCommand { details: String },
    #[error("Command execution failed: {details}")]
    ExecutionFailed { details: String },
}

#[derive(Debug, Clone)]
pub enum Command {
    RunRoutines,
    RunSpecificRoutine { name: String },
    Fetch { variant: Variant, window: DateWindow },
    Clean { variant: Variant },
    ListRoutines,
    HealthCheck,
}

#[async_trait::async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError>;
}
