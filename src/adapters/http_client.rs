use std::time::Duration;

use error_stack::ResultExt;
use reqwest::Client;
use thiserror::Error;

use super::config::http_config::HttpConfig;

#[derive(Error, Debug)]
#[error("Failed to create HTTP client")]
pub struct HttpClientError;

/// Shared client for every Google endpoint; one connection pool per process.
pub fn build_http_client(config: &HttpConfig) -> error_stack::Result<Client, HttpClientError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .change_context(HttpClientError)
}

/// Reads the body of a failed response for error reports.
pub async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    format!("HTTP error {}: {}", status, text)
}
