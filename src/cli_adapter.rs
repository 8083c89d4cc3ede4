use axonaut_sheets::application::sync::sync_routine::routine_name;
use axonaut_sheets::domain::variant::Variant;
use axonaut_sheets::ports::application_service::ApplicationService;
use axonaut_sheets::ports::command_handler::{Command, CommandError, CommandHandler};
use axonaut_sheets::ports::record_source::DateWindow;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::application_service_factory::RoutineOptions;

#[derive(Parser, Debug)]
#[command(
    name = "axonaut-sheets",
    version,
    about = "Append Axonaut expenses, invoices and quotations to the accounting spreadsheet"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Sync every sheet: expenses, then invoices, then quotations
    Run(SyncArgs),
    /// Sync the sheet of a single record kind
    Sync {
        variant: Variant,
        #[command(flatten)]
        args: SyncArgs,
    },
    /// Download records from Axonaut into a JSON snapshot
    Fetch {
        variant: Variant,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Delete the rows with an empty first column
    Clean { variant: Variant },
    /// List the available routines
    List,
    /// Check the connection to the spreadsheet
    Health,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Use the snapshot written by `fetch` instead of calling the API
    #[arg(long)]
    pub from_file: bool,
    /// Delete empty rows before appending
    #[arg(long)]
    pub clean: bool,
    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Only records dated on or after this day (dd/mm/yyyy or yyyy-mm-dd)
    #[arg(long, value_parser = parse_date)]
    pub after: Option<NaiveDate>,
    /// Only records dated on or before this day (dd/mm/yyyy or yyyy-mm-dd)
    #[arg(long, value_parser = parse_date)]
    pub before: Option<NaiveDate>,
}

impl From<&WindowArgs> for DateWindow {
    fn from(args: &WindowArgs) -> Self {
        DateWindow::new(args.after, args.before)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|_| format!("'{}' is not a date, expected dd/mm/yyyy or yyyy-mm-dd", s))
}

impl Cli {
    /// Options the routines are built with. Only sync commands carry any.
    pub fn routine_options(&self) -> RoutineOptions {
        match &self.command {
            Some(CliCommand::Run(args)) | Some(CliCommand::Sync { args, .. }) => RoutineOptions {
                from_file: args.from_file,
                clean_first: args.clean,
                window: DateWindow::from(&args.window),
            },
            _ => RoutineOptions::default(),
        }
    }

    pub fn into_command(self) -> Command {
        match self.command {
            None | Some(CliCommand::Run(_)) => Command::RunRoutines,
            Some(CliCommand::Sync { variant, .. }) => Command::RunSpecificRoutine {
                name: routine_name(variant),
            },
            Some(CliCommand::Fetch { variant, window }) => Command::Fetch {
                variant,
                window: DateWindow::from(&window),
            },
            Some(CliCommand::Clean { variant }) => Command::Clean { variant },
            Some(CliCommand::List) => Command::ListRoutines,
            Some(CliCommand::Health) => Command::HealthCheck,
        }
    }
}

pub struct CliAdapter {
    application_service: Arc<dyn ApplicationService>,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("application_service", &"<ApplicationService>")
            .finish()
    }
}

impl CliAdapter {
    pub fn new(application_service: Arc<dyn ApplicationService>) -> Self {
        Self {
            application_service,
        }
    }

    #[instrument]
    pub async fn run(&self, command: Command) -> Result<(), Box<dyn std::error::Error>> {
        match self.handle(command).await {
            Ok(result) => {
                info!("{}", result);
                Ok(())
            }
            Err(report) => {
                error!("Command failed: {:?}", report);
                Err(format!("Command failed: {:?}", report).into())
            }
        }
    }
}

#[async_trait::async_trait]
impl CommandHandler for CliAdapter {
    #[instrument]
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError> {
        match command {
            Command::RunRoutines => {
                let results = self.application_service.run_all_routines().await;

                let mut success_count = 0;
                let mut failure_count = 0;
                let mut output = "\nRoutine Results:\n".to_string();

                for (name, result) in results {
                    match result {
                        Ok(()) => {
                            success_count += 1;
                            output.push_str(&format!("✅ {}: OK\n", name));
                        }
                        Err(error) => {
                            failure_count += 1;
                            output.push_str(&format!("❌ {}: {:?}\n", name, error));
                        }
                    }
                }

                output.push_str(&format!(
                    "\nSummary: {} successful, {} failed",
                    success_count, failure_count
                ));

                if failure_count > 0 {
                    return Err(CommandError::ExecutionFailed { details: output }.into());
                }
                Ok(output)
            }
            Command::RunSpecificRoutine { name } => {
                self.application_service
                    .run_routine_by_name(&name)
                    .await
                    .map_err(|e| CommandError::ExecutionFailed {
                        details: format!("Failed to run routine {}: {:?}", name, e),
                    })?;

                Ok(format!("✅ Routine '{}' completed successfully", name))
            }
            Command::Fetch { variant, window } => {
                let (count, path) = self
                    .application_service
                    .fetch_snapshot(variant, window)
                    .await
                    .map_err(|e| CommandError::ExecutionFailed {
                        details: format!("Failed to fetch {} records: {:?}", variant, e),
                    })?;

                if count == 0 {
                    Ok(format!(
                        "The API returned an empty list, wrote an empty snapshot to {}",
                        path.display()
                    ))
                } else {
                    Ok(format!(
                        "JSON data saved to {} ({} records)",
                        path.display(),
                        count
                    ))
                }
            }
            Command::Clean { variant } => {
                let deleted = self
                    .application_service
                    .clean_sheet(variant)
                    .await
                    .map_err(|e| CommandError::ExecutionFailed {
                        details: format!("Failed to clean the {} sheet: {:?}", variant, e),
                    })?;

                Ok(format!("🧹 Deleted {} empty rows from the {} sheet", deleted, variant))
            }
            Command::ListRoutines => {
                let routines = self.application_service.list_available_routines().await;
                Ok(format!("Available routines:\n{}", routines.join("\n")))
            }
            Command::HealthCheck => {
                let health = self.application_service.health_check().await.map_err(|e| {
                    CommandError::ExecutionFailed {
                        details: format!("Health check failed: {:?}", e),
                    }
                })?;

                Ok(health)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("axonaut-sheets").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_no_subcommand_runs_everything() {
        assert!(matches!(parse(&[]).into_command(), Command::RunRoutines));
    }

    #[test]
    fn test_sync_maps_to_routine_name() {
        match parse(&["sync", "devis"]).into_command() {
            Command::RunSpecificRoutine { name } => assert_eq!(name, "quotation-sync"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_sync_options() {
        let cli = parse(&[
            "sync",
            "expense",
            "--from-file",
            "--clean",
            "--after",
            "01/01/2024",
            "--before",
            "2025-12-31",
        ]);
        let options = cli.routine_options();
        assert!(options.from_file);
        assert!(options.clean_first);
        assert_eq!(options.window.after, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(options.window.before, NaiveDate::from_ymd_opt(2025, 12, 31));
    }

    #[test]
    fn test_fetch_window() {
        match parse(&["fetch", "invoices", "--after", "28/02/2025"]).into_command() {
            Command::Fetch { variant, window } => {
                assert_eq!(variant, Variant::Invoice);
                assert_eq!(window.after, NaiveDate::from_ymd_opt(2025, 2, 28));
                assert_eq!(window.before, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let result = Cli::try_parse_from(["axonaut-sheets", "fetch", "expense", "--after", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        let result = Cli::try_parse_from(["axonaut-sheets", "clean", "payslips"]);
        assert!(result.is_err());
    }
}
