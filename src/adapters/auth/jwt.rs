use error_stack::ResultExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::ports::access_token_provider::TokenError;

use super::service_account_key::ServiceAccountKey;

/// Lifetime requested for every assertion (the maximum Google accepts).
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(key: &ServiceAccountKey, scopes: &[String], now: i64) -> Self {
        Claims {
            iss: key.client_email.clone(),
            scope: scopes.join(" "),
            aud: key.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        }
    }
}

/// Builds the RS256-signed assertion `base64url(header).base64url(claims).signature`
/// that is traded for an access token.
pub fn build_assertion(
    key: &ServiceAccountKey,
    scopes: &[String],
    now: i64,
) -> error_stack::Result<String, TokenError> {
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.expose_secret().as_bytes())
        .change_context(TokenError::InvalidKey)
        .attach_printable("Could not decode the service account private key")?;

    jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &Claims::new(key, scopes, now),
        &encoding_key,
    )
    .change_context(TokenError::SigningFailed)
}
