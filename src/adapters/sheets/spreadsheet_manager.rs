use std::{fmt::Debug, sync::Arc};

use error_stack::{report, ResultExt};
use google_sheets4::api::{AppendValuesResponse, UpdateValuesResponse, ValueRange};
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{event, instrument, Level};

use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::adapters::http_client::error_body;
use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::access_token_provider::AccessTokenProvider;

const USER_ENTERED: &str = "USER_ENTERED";

/// Values API client for one spreadsheet.
pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    client: Client,
    auth: Arc<dyn AccessTokenProvider>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetManagerError {
    #[error("Failed to obtain an access token")]
    Unauthorized,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
    #[error("Failed to append rows")]
    FailedToAppendRows,
    #[error("Spreadsheet API returned status {0}")]
    HttpStatus(StatusCode),
}

impl SpreadsheetManager {
    pub fn new(
        config: SpreadsheetConfig,
        client: Client,
        auth: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        SpreadsheetManager {
            config,
            client,
            auth,
        }
    }

    /// `{api_base}/{spreadsheet_id}/values/{range}` with the range percent-encoded.
    pub fn values_url(&self, range: &A1Notation) -> String {
        format!(
            "{}/{}/values/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.spreadsheet_id,
            urlencoding::encode(range.as_ref())
        )
    }

    async fn authorized(
        &self,
        request: RequestBuilder,
    ) -> error_stack::Result<RequestBuilder, SpreadsheetManagerError> {
        let token = self
            .auth
            .access_token()
            .await
            .change_context(SpreadsheetManagerError::Unauthorized)?;
        Ok(request.bearer_auth(token.expose_secret()))
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
        range: &A1Notation,
        context: SpreadsheetManagerError,
    ) -> error_stack::Result<T, SpreadsheetManagerError> {
        let response = self
            .authorized(request)
            .await?
            .send()
            .await
            .change_context(context.clone())
            .attach_printable_lazy(|| format!("Request for range {} failed", range))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = error_body(response).await;
            return Err(report!(SpreadsheetManagerError::HttpStatus(status)))
                .attach_printable(body)
                .attach_printable_lazy(|| format!("Range: {}", range));
        }

        response
            .json::<T>()
            .await
            .change_context(context)
            .attach_printable_lazy(|| format!("Unexpected response body for range {}", range))
    }

    #[instrument]
    pub async fn get_values(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<ValueRange, SpreadsheetManagerError> {
        let request = self.client.get(self.values_url(range));
        self.send(request, range, SpreadsheetManagerError::FailedToFetchRange)
            .await
    }

    #[instrument(skip(value_range))]
    pub async fn update_values(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError> {
        let request = self
            .client
            .put(self.values_url(range))
            .query(&[("valueInputOption", USER_ENTERED)])
            .json(&value_range);
        let response: UpdateValuesResponse = self
            .send(request, range, SpreadsheetManagerError::FailedToWriteRange)
            .await?;
        event!(
            Level::DEBUG,
            updated_range = ?response.updated_range,
            updated_cells = ?response.updated_cells,
            "Range updated"
        );
        Ok(response)
    }

    #[instrument(skip(value_range))]
    pub async fn append_values(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<AppendValuesResponse, SpreadsheetManagerError> {
        let request = self
            .client
            .post(format!("{}:append", self.values_url(range)))
            .query(&[
                ("valueInputOption", USER_ENTERED),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&value_range);
        self.send(request, range, SpreadsheetManagerError::FailedToAppendRows)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::config::sheets_config::DEFAULT_SHEETS_API_BASE;
    use crate::ports::access_token_provider::TokenError;
    use secrecy::SecretString;

    struct StaticToken;

    #[async_trait::async_trait]
    impl AccessTokenProvider for StaticToken {
        async fn access_token(&self) -> error_stack::Result<SecretString, TokenError> {
            Ok(SecretString::from("token"))
        }
    }

    fn manager(api_base: &str) -> SpreadsheetManager {
        SpreadsheetManager::new(
            SpreadsheetConfig {
                spreadsheet_id: "sheet-123".into(),
                api_base: api_base.to_owned(),
                assets_sheet: "Activos".into(),
                users_sheet: "Usuarios".into(),
                activity_sheet: "Registro".into(),
                deleted_sheet: "Historial".into(),
            },
            Client::new(),
            Arc::new(StaticToken),
        )
    }

    #[test]
    fn test_values_url_encodes_range() {
        let manager = manager(DEFAULT_SHEETS_API_BASE);
        assert_eq!(
            manager.values_url(&A1Notation::from("'Activos'!A5:M")),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/%27Activos%27%21A5%3AM"
        );
    }

    #[test]
    fn test_values_url_trims_trailing_slash() {
        let manager = manager("http://localhost:8080/v4/spreadsheets/");
        assert_eq!(
            manager.values_url(&A1Notation::from("Usuarios!A2:D")),
            "http://localhost:8080/v4/spreadsheets/sheet-123/values/Usuarios%21A2%3AD"
        );
    }

    #[tokio::test]
    async fn test_unreachable_api_reports_fetch_error() {
        let manager = manager("http://127.0.0.1:9/v4/spreadsheets");
        let report = manager
            .get_values(&A1Notation::from("Usuarios!A2:D"))
            .await
            .unwrap_err();
        assert!(matches!(
            report.current_context(),
            SpreadsheetManagerError::FailedToFetchRange
        ));
    }
}
