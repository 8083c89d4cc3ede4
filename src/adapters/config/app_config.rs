use config::Config;
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{
    axonaut_config::AxonautConfig, sheets_config::SpreadsheetConfig,
    storage_config::StorageConfig, telemetry_config::TelemetryConfig,
};

pub const DEFAULT_CONFIG_PATH: &str = "Config";
pub const ENV_PREFIX: &str = "AXONAUT_SHEETS";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub axonaut: AxonautConfig,
    pub sheets: SpreadsheetConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error("Error reading config file '{0}'")]
    Read(String),
    #[error("Invalid configuration at field '{0}'")]
    InvalidField(String),
}

impl AppConfig {
    /// Loads `.env`, then the config file (`CONFIG_PATH` or `Config.*`), then
    /// `AXONAUT_SHEETS__SECTION__KEY` environment overrides.
    pub fn load() -> error_stack::Result<Self, AppConfigError> {
        // A missing .env is fine, the variables may come from the real environment
        let _ = dotenvy::dotenv();

        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let value = Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .change_context_lazy(|| AppConfigError::Read(config_path.clone()))?
            .try_deserialize::<serde_json::Value>()
            .change_context_lazy(|| AppConfigError::Read(config_path.clone()))?;

        Self::from_value(value)
            .attach_printable_lazy(|| format!("While loading config file '{}'", config_path))
    }

    /// Deserializes while tracking the field path so errors point at the faulty key.
    pub fn from_value(value: serde_json::Value) -> error_stack::Result<Self, AppConfigError> {
        use serde::de::IntoDeserializer;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            let path_str = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            report!(AppConfigError::InvalidField(
                path_str.trim_start_matches('.').to_string()
            ))
            .attach_printable(e.to_string())
            .attach_printable(
                "Make sure all required fields are present in the configuration file",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_with_defaults() {
        let config = AppConfig::from_value(json!({
            "axonaut": { "api_key": "secret" },
            "sheets": { "priv_key": "sa.json", "spreadsheet_id": "1nrh" }
        }))
        .unwrap();

        assert_eq!(config.axonaut.base_url.as_ref(), "https://axonaut.com");
        assert_eq!(config.axonaut.api_key.as_ref(), "secret");
        assert_eq!(config.storage.dir, std::path::PathBuf::from("."));
        assert_eq!(config.telemetry.otlp_endpoint, None);
        assert_eq!(config.telemetry.log_file, "axonaut_sheets.log");
    }

    #[test]
    fn test_from_value_reports_missing_field_path() {
        let report = AppConfig::from_value(json!({
            "axonaut": { "api_key": "secret" },
            "sheets": { "priv_key": "sa.json" }
        }))
        .unwrap_err();

        match report.current_context() {
            AppConfigError::InvalidField(path) => assert_eq!(path, "sheets"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_value_reports_wrong_type_path() {
        let report = AppConfig::from_value(json!({
            "axonaut": { "api_key": "secret" },
            "sheets": { "priv_key": "sa.json", "spreadsheet_id": "1nrh", "tabs": { "expense": 3 } }
        }))
        .unwrap_err();

        match report.current_context() {
            AppConfigError::InvalidField(path) => assert_eq!(path, "sheets.tabs.expense"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
