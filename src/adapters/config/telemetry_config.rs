#[derive(serde::Deserialize, Debug, Clone)]
pub struct TelemetryConfig {
    /// OTLP gRPC collector, e.g. `http://localhost:4317`. Spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: None,
            log_file: default_log_file(),
        }
    }
}

fn default_log_file() -> String {
    "axonaut_sheets.log".to_string()
}
