//! Error types for the `meeting-auth` crate.
//!
//! Follows the same pattern as domain::error with a root Error struct and error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Synthetic status used when an outbound call timed out before Zoom answered.
pub const TIMEOUT_STATUS: u16 = 504;

/// Synthetic status used when an outbound call failed without any response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Synthetic status used when Zoom answered 2xx with an unusable payload.
pub const INVALID_RESPONSE_STATUS: u16 = 502;

/// Top-level error type for meeting-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in meeting-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Credential(CredentialErrorKind),
    OAuth(OAuthErrorKind),
    Session(SessionErrorKind),
    Http(HttpErrorKind),
}

/// Errors from resolving credentials before any network call.
#[derive(Debug, PartialEq)]
pub enum CredentialErrorKind {
    /// Server-to-Server credentials incomplete after merging with fallbacks.
    MissingCredentials,
    /// User grant configuration incomplete after merging with fallbacks.
    MissingOAuthConfig,
}

/// Errors from OAuth operations.
#[derive(Debug, PartialEq)]
pub enum OAuthErrorKind {
    /// The token endpoint rejected the grant, or could not be reached.
    TokenExchangeFailed(ProviderFailure),
}

/// Errors from the session storage backing the user grant.
#[derive(Debug, PartialEq)]
pub enum SessionErrorKind {
    Storage,
}

/// Errors from HTTP client operations.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    RequestFailed,
    Network,
}

/// Status and body of a failed call to Zoom, kept verbatim for diagnostics.
///
/// When Zoom never answered, `status` is synthetic ([`TIMEOUT_STATUS`] or
/// [`TRANSPORT_FAILURE_STATUS`]) and `body` holds the transport error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub status: u16,
    pub body: String,
}

impl ProviderFailure {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Builds a failure from a transport error that produced no response.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let status = if err.is_timeout() {
            TIMEOUT_STATUS
        } else {
            TRANSPORT_FAILURE_STATUS
        };
        Self::new(status, err.to_string())
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "status {}: {}", self.status, self.body)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Credential(kind) => write!(f, "Credential error: {:?}", kind),
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed(failure)) => {
                write!(f, "OAuth error: token exchange failed with {}", failure)
            }
            ErrorKind::Session(kind) => write!(f, "Session error: {:?}", kind),
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if err.is_request() {
            ErrorKind::Http(HttpErrorKind::RequestFailed)
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl Error {
    /// The message carried by `source`, if any.
    pub fn details(&self) -> Option<String> {
        self.source.as_ref().map(|e| e.to_string())
    }
}

/// Helper function to create credential errors.
pub fn credential_error(kind: CredentialErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Credential(kind),
    }
}

/// Helper function to create token exchange errors.
pub fn token_exchange_error(failure: ProviderFailure) -> Error {
    Error {
        source: Some(failure.body.clone().into()),
        error_kind: ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed(failure)),
    }
}

/// Helper function to create session storage errors.
pub fn session_error(source: Box<dyn StdError + Send + Sync>) -> Error {
    Error {
        source: Some(source),
        error_kind: ErrorKind::Session(SessionErrorKind::Storage),
    }
}
