use error_stack::{report, ResultExt};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{event, instrument, Level};

use crate::ports::access_token_provider::TokenError;

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub access_token: SecretString,
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TokenErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Turns an error body from the token endpoint into a readable reason.
pub fn rejection_reason(body: &str) -> String {
    match serde_json::from_str::<TokenErrorBody>(body) {
        Ok(TokenErrorBody {
            error,
            error_description: Some(description),
        }) => format!("{}: {}", error, description),
        Ok(TokenErrorBody { error, .. }) => error,
        Err(_) if body.trim().is_empty() => "empty response".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

pub fn parse_token_response(body: &str) -> error_stack::Result<TokenResponse, TokenError> {
    let response: TokenResponse = serde_json::from_str(body)
        .change_context(TokenError::MalformedResponse)
        .attach_printable("Token endpoint returned an unexpected body")?;
    if response.access_token.expose_secret().is_empty() {
        return Err(report!(TokenError::MalformedResponse))
            .attach_printable("Token endpoint returned an empty access token");
    }
    Ok(response)
}

/// Trades a signed assertion for an access token at `token_uri`.
#[instrument(skip(client, assertion))]
pub async fn exchange_assertion(
    client: &Client,
    token_uri: &str,
    assertion: &str,
) -> error_stack::Result<TokenResponse, TokenError> {
    let response = client
        .post(token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
        .send()
        .await
        .change_context(TokenError::ExchangeFailed)
        .attach_printable_lazy(|| format!("Could not reach token endpoint {}", token_uri))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .change_context(TokenError::ExchangeFailed)?;

    if !status.is_success() {
        let reason = rejection_reason(&body);
        event!(Level::WARN, %status, reason = %reason, "Token exchange rejected");
        return Err(report!(TokenError::Rejected(reason)))
            .attach_printable(format!("HTTP status {}", status));
    }

    parse_token_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let response = parse_token_response(
            r#"{"access_token":"ya29.abc","expires_in":3599,"token_type":"Bearer"}"#,
        )
        .unwrap();
        assert_eq!(response.access_token.expose_secret(), "ya29.abc");
        assert_eq!(response.expires_in, 3599);
        assert_eq!(response.token_type.as_deref(), Some("Bearer"));
        assert!(!format!("{response:?}").contains("ya29"));
    }

    #[test]
    fn test_parse_token_response_rejects_missing_token() {
        let report = parse_token_response(r#"{"expires_in":3599}"#).unwrap_err();
        assert!(matches!(
            report.current_context(),
            TokenError::MalformedResponse
        ));
        assert!(parse_token_response(r#"{"access_token":"","expires_in":1}"#).is_err());
    }

    #[test]
    fn test_rejection_reason() {
        assert_eq!(
            rejection_reason(r#"{"error":"invalid_grant","error_description":"Invalid JWT Signature."}"#),
            "invalid_grant: Invalid JWT Signature."
        );
        assert_eq!(rejection_reason(r#"{"error":"invalid_client"}"#), "invalid_client");
        assert_eq!(rejection_reason("Bad Gateway"), "Bad Gateway");
        assert_eq!(rejection_reason(""), "empty response");
    }
}
