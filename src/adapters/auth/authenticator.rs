use chrono::{DateTime, Duration, Utc};
use error_stack::ResultExt;
use reqwest::Client;
use secrecy::SecretString;
use tokio::sync::RwLock;
use tracing::{event, instrument, Level};

use crate::adapters::config::auth_config::AuthConfig;
use crate::ports::access_token_provider::{AccessTokenProvider, TokenError};

use super::jwt::build_assertion;
use super::service_account_key::ServiceAccountKey;
use super::token_exchange::{exchange_assertion, TokenResponse};

/// Tokens are renewed this long before Google would expire them.
pub const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: SecretString,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        AccessToken {
            token: response.access_token,
            expires_at: now + Duration::seconds(response.expires_in),
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS)
    }
}

/// Two-legged OAuth for a service account, with an in-memory token cache
/// shared by every adapter that talks to Google.
pub struct ServiceAccountAuthenticator {
    key: ServiceAccountKey,
    scopes: Vec<String>,
    client: Client,
    cache: RwLock<Option<AccessToken>>,
}

impl std::fmt::Debug for ServiceAccountAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountAuthenticator")
            .field("key", &self.key)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountAuthenticator {
    pub fn new(key: ServiceAccountKey, scopes: Vec<String>, client: Client) -> Self {
        Self {
            key,
            scopes,
            client,
            cache: RwLock::new(None),
        }
    }

    pub async fn from_config(
        config: &AuthConfig,
        client: Client,
    ) -> error_stack::Result<Self, TokenError> {
        let key = ServiceAccountKey::from_config(config).await?;
        Ok(Self::new(key, config.scopes.clone(), client))
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    async fn cached(&self, now: DateTime<Utc>) -> Option<SecretString> {
        let cache = self.cache.read().await;
        (*cache)
            .as_ref()
            .filter(|token| token.is_fresh(now))
            .map(|token| token.token.clone())
    }

    async fn store(&self, token: AccessToken) {
        *self.cache.write().await = Some(token);
    }

    /// Drops the cached token so the next call signs a new assertion.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }

    #[instrument(skip(self), fields(client_email = %self.key.client_email))]
    async fn fetch_token(&self, now: DateTime<Utc>) -> error_stack::Result<AccessToken, TokenError> {
        let assertion = build_assertion(&self.key, &self.scopes, now.timestamp())?;
        let response = exchange_assertion(&self.client, &self.key.token_uri, &assertion)
            .await
            .attach_printable_lazy(|| {
                format!("Service account {} could not be authorized", self.key.client_email)
            })?;
        let token = AccessToken::from_response(response, now);
        event!(Level::DEBUG, expires_at = %token.expires_at, "Obtained access token");
        Ok(token)
    }
}

#[async_trait::async_trait]
impl AccessTokenProvider for ServiceAccountAuthenticator {
    async fn access_token(&self) -> error_stack::Result<SecretString, TokenError> {
        if let Some(token) = self.cached(Utc::now()).await {
            return Ok(token);
        }

        let mut cache = self.cache.write().await;
        // Another task may have refreshed while we waited for the lock.
        let now = Utc::now();
        if let Some(token) = (*cache).as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.token.clone());
        }

        let token = self.fetch_token(now).await?;
        let value = token.token.clone();
        *cache = Some(token);
        Ok(value)
    }
}
