//! OAuth token types.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Fields read from a token endpoint response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// OAuth tokens with metadata.
///
/// Serializable so the user grant can keep them in the HTTP session; the
/// session lives on the server and the client only ever holds its signed ID.
#[derive(Clone, Serialize, Deserialize)]
pub struct Tokens {
    /// Access token for API requests.
    #[serde(serialize_with = "expose")]
    pub access_token: SecretString,
    /// Refresh token, only issued by the user grant. Kept for completeness, never used.
    #[serde(serialize_with = "expose_option", default)]
    pub refresh_token: Option<SecretString>,
    /// Lifetime in seconds as reported by Zoom.
    pub expires_in: Option<i64>,
    /// When the access token expires, computed at exchange time.
    pub expires_at: Option<DateTime<Utc>>,
    /// Token type (usually "bearer").
    pub token_type: String,
    /// Granted scopes.
    pub scopes: Vec<String>,
    /// The provider's payload exactly as received.
    pub raw: serde_json::Value,
}

impl Tokens {
    /// Build tokens from a parsed token response, stamping the expiry relative to now.
    ///
    /// A lifetime too large to represent leaves `expires_at` unset.
    pub fn from_response(response: TokenResponse, raw: serde_json::Value) -> Self {
        let expires_at = response.expires_in.and_then(|seconds| {
            chrono::Duration::try_seconds(seconds).and_then(|d| Utc::now().checked_add_signed(d))
        });

        Self {
            access_token: SecretString::new(response.access_token),
            refresh_token: response.refresh_token.map(SecretString::new),
            expires_in: response.expires_in,
            expires_at,
            token_type: response.token_type.unwrap_or_else(|| "bearer".to_string()),
            scopes: response
                .scope
                .map(|s| s.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            raw,
        }
    }

    /// Check if the access token is expired or about to expire soon.
    ///
    /// Returns true if token is expired or will expire within 5 minutes.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires| {
                let now = Utc::now();
                let buffer = chrono::Duration::minutes(5);
                expires <= (now + buffer)
            })
            .unwrap_or(false)
    }
}

// The raw payload carries the tokens in clear text, so it stays out of Debug output.
impl fmt::Debug for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("access_token", &self.access_token)
            .field("refresh_token", &self.refresh_token)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("token_type", &self.token_type)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

pub(crate) fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn expose_option<S: Serializer>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(secret) => serializer.serialize_some(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}
