use std::time::Duration;

use error_stack::{report, ResultExt};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use thiserror::Error;
use tracing::{event, instrument, Level};

use crate::adapters::config::axonaut_config::AxonautConfig;
use crate::domain::{record::DomainRecord, variant::Variant};
use crate::ports::record_source::{DateWindow, RecordSource, RecordSourceError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const API_PREFIX: &str = "/api/v2";
/// Date format expected by the `date_after` / `date_before` filters.
const QUERY_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Error, Debug)]
pub enum AxonautClientError {
    #[error("Invalid API key header")]
    InvalidApiKey,

    #[error("Failed to build HTTP client")]
    ClientBuild,

    #[error("HTTP request failed")]
    HttpError,

    #[error("HTTP status error: {0}")]
    HttpStatusError(String),

    #[error("JSON parsing failed")]
    JsonError,
}

pub struct AxonautApiClient {
    base_url: String,
    client: Client,
}

impl std::fmt::Debug for AxonautApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The client holds the API key in its default headers
        f.debug_struct("AxonautApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl AxonautApiClient {
    pub fn new(config: &AxonautConfig) -> error_stack::Result<Self, AxonautClientError> {
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .change_context(AxonautClientError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        // Header names are case-insensitive, Axonaut documents it as `userApiKey`
        headers.insert("userapikey", api_key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .change_context(AxonautClientError::ClientBuild)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint_url(&self, variant: Variant) -> String {
        format!("{}{}/{}", self.base_url, API_PREFIX, variant.endpoint())
    }

    #[instrument]
    pub async fn list(
        &self,
        variant: Variant,
        window: DateWindow,
    ) -> error_stack::Result<Vec<DomainRecord>, AxonautClientError> {
        let url = self.endpoint_url(variant);
        let query = window_query(&window);
        event!(Level::DEBUG, url = %url, query = ?query, "Requesting records");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .change_context(AxonautClientError::HttpError)
            .attach_printable_lazy(|| format!("GET {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(report!(AxonautClientError::HttpStatusError(
                status.to_string()
            )))
            .attach_printable(format!("Response body: {}", body));
        }

        let records = response
            .json::<Vec<DomainRecord>>()
            .await
            .change_context(AxonautClientError::JsonError)
            .attach_printable_lazy(|| format!("Expected a JSON array of {} records", variant))?;

        if records.is_empty() {
            event!(Level::WARN, %variant, "The API returned an empty list");
        } else {
            event!(Level::INFO, %variant, count = records.len(), "Fetched records");
        }

        Ok(records)
    }
}

fn window_query(window: &DateWindow) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(after) = window.after {
        query.push(("date_after", after.format(QUERY_DATE_FORMAT).to_string()));
    }
    if let Some(before) = window.before {
        query.push(("date_before", before.format(QUERY_DATE_FORMAT).to_string()));
    }
    query
}

#[async_trait::async_trait]
impl RecordSource for AxonautApiClient {
    fn source_name(&self) -> &str {
        "Axonaut API"
    }

    async fn fetch_records(
        &self,
        variant: Variant,
        window: DateWindow,
    ) -> error_stack::Result<Vec<DomainRecord>, RecordSourceError> {
        self.list(variant, window)
            .await
            .change_context(RecordSourceError::FetchFailed(variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers a single request with `status` and `body`, yielding the raw request head.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut buf).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..read]);
            }

            let response = format!(
                concat!(
                    "HTTP/1.1 {}\r\n",
                    "Content-Type: application/json\r\n",
                    "Content-Length: {}\r\n",
                    "Connection: close\r\n\r\n{}"
                ),
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).to_lowercase()
        });

        (base_url, handle)
    }

    fn config(base_url: &str) -> AxonautConfig {
        AxonautConfig {
            base_url: base_url.into(),
            api_key: "test-key".into(),
        }
    }

    #[test]
    fn test_endpoint_url() {
        let client = AxonautApiClient::new(&config("https://axonaut.com/")).unwrap();
        assert_eq!(
            client.endpoint_url(Variant::Expense),
            "https://axonaut.com/api/v2/expenses"
        );
        assert_eq!(
            client.endpoint_url(Variant::Quotation),
            "https://axonaut.com/api/v2/quotations"
        );
    }

    #[test]
    fn test_invalid_api_key_is_rejected() {
        let mut config = config("https://axonaut.com");
        config.api_key = "bad\nkey".into();
        let report = AxonautApiClient::new(&config).unwrap_err();
        assert!(matches!(
            report.current_context(),
            AxonautClientError::InvalidApiKey
        ));
    }

    #[test]
    fn test_debug_does_not_leak_api_key() {
        let client = AxonautApiClient::new(&config("https://axonaut.com")).unwrap();
        assert!(!format!("{:?}", client).contains("test-key"));
    }

    #[test]
    fn test_window_query_formats_dates() {
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2025, 12, 31),
        );
        assert_eq!(
            window_query(&window),
            vec![
                ("date_after", "01/01/2024".to_string()),
                ("date_before", "31/12/2025".to_string()),
            ]
        );
    }

    #[test]
    fn test_window_query_unbounded_is_empty() {
        assert!(window_query(&DateWindow::default()).is_empty());
    }

    #[tokio::test]
    async fn test_list_sends_api_key_and_date_filter() {
        let (base_url, server) = serve_once("200 OK", "[]").await;
        let client = AxonautApiClient::new(&config(&base_url)).unwrap();
        let window = DateWindow::new(NaiveDate::from_ymd_opt(2024, 1, 1), None);

        let records = client.list(Variant::Invoice, window).await.unwrap();

        assert!(records.is_empty());
        let request = server.await.unwrap();
        assert!(request.starts_with("get /api/v2/invoices?date_after=01%2f01%2f2024 "));
        assert!(request.contains("userapikey: test-key"));
        assert!(request.contains("accept: application/json"));
    }

    #[tokio::test]
    async fn test_list_parses_records() {
        let (base_url, _server) =
            serve_once("200 OK", r#"[{"id": 1, "number": "D-1"}, {"id": 2}]"#).await;
        let client = AxonautApiClient::new(&config(&base_url)).unwrap();

        let records = client
            .list(Variant::Quotation, DateWindow::default())
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("number"), Some(&serde_json::json!("D-1")));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (base_url, _server) =
            serve_once("500 Internal Server Error", r#"{"error": "boom"}"#).await;
        let client = AxonautApiClient::new(&config(&base_url)).unwrap();

        let report = client
            .list(Variant::Expense, DateWindow::default())
            .await
            .unwrap_err();

        assert!(matches!(
            report.current_context(),
            AxonautClientError::HttpStatusError(status) if status.starts_with("500")
        ));
    }

    #[tokio::test]
    async fn test_non_array_body_is_json_error() {
        let (base_url, _server) = serve_once("200 OK", r#"{"error": "not a list"}"#).await;
        let client = AxonautApiClient::new(&config(&base_url)).unwrap();

        let report = client
            .list(Variant::Expense, DateWindow::default())
            .await
            .unwrap_err();

        assert!(matches!(
            report.current_context(),
            AxonautClientError::JsonError
        ));
    }

    #[tokio::test]
    async fn test_fetch_records_names_the_variant() {
        let (base_url, _server) = serve_once("401 Unauthorized", "{}").await;
        let client = AxonautApiClient::new(&config(&base_url)).unwrap();

        let report = client
            .fetch_records(Variant::Invoice, DateWindow::default())
            .await
            .unwrap_err();

        assert!(matches!(
            report.current_context(),
            RecordSourceError::FetchFailed(Variant::Invoice)
        ));
        assert!(report.contains::<AxonautClientError>());
    }
}
