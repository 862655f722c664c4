//! Error types for the `domain` layer.
use meeting_auth::error::{
    CredentialErrorKind, Error as MeetingAuthError, ErrorKind as MeetingAuthErrorKind,
    OAuthErrorKind,
};
pub use meeting_auth::ProviderFailure;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries. Ex. `domain` is dependent on `meeting-auth`, and `web` is dependent on `domain`,
/// but `web` should not be dependent, directly, on `meeting-auth`. Ultimately the various
/// `error_kind`s are used by `web` to return appropriate HTTP status codes and messages to the client.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Input(InputErrorKind),
    Session(SessionErrorKind),
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Incomplete caller input, detected before any network call.
#[derive(Debug, PartialEq)]
pub enum InputErrorKind {
    MissingCredentials,
    MissingOAuthConfig,
    MissingAuthorizationCode,
}

/// The session lacks state an earlier step of the user flow should have left.
#[derive(Debug, PartialEq)]
pub enum SessionErrorKind {
    /// The callback arrived without a configuration stored by login.
    MissingSessionState,
    /// No tokens in the session: the user flow has not completed.
    Unauthenticated,
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Session,
    Other(String),
}

/// Zoom rejected a call, or could not be reached. The provider's status and body
/// travel unchanged to the caller.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    TokenExchange(ProviderFailure),
    MeetingCreation(ProviderFailure),
}

impl Error {
    pub fn new(error_kind: DomainErrorKind, message: &str) -> Self {
        Error {
            source: Some(message.to_string().into()),
            error_kind,
        }
    }

    /// Human readable details taken from the innermost source, if any.
    pub fn details(&self) -> Option<String> {
        let mut current: &(dyn StdError + 'static) = self.source.as_deref()?;
        while let Some(next) = current.source() {
            current = next;
        }
        Some(current.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `meeting-auth` layer to the `domain` layer.
impl From<MeetingAuthError> for Error {
    fn from(err: MeetingAuthError) -> Self {
        let error_kind = match &err.error_kind {
            MeetingAuthErrorKind::Credential(CredentialErrorKind::MissingCredentials) => {
                DomainErrorKind::Input(InputErrorKind::MissingCredentials)
            }
            MeetingAuthErrorKind::Credential(CredentialErrorKind::MissingOAuthConfig) => {
                DomainErrorKind::Input(InputErrorKind::MissingOAuthConfig)
            }
            MeetingAuthErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed(failure)) => {
                DomainErrorKind::External(ExternalErrorKind::TokenExchange(failure.clone()))
            }
            MeetingAuthErrorKind::Session(_) => DomainErrorKind::Internal(InternalErrorKind::Session),
            MeetingAuthErrorKind::Http(_) => {
                DomainErrorKind::Internal(InternalErrorKind::Other(err.to_string()))
            }
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meeting_auth::error::{credential_error, token_exchange_error};

    #[test]
    fn test_missing_credentials_translates_to_input_error() {
        let err: Error = credential_error(
            CredentialErrorKind::MissingCredentials,
            "Missing Server-to-Server credentials: account_id",
        )
        .into();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Input(InputErrorKind::MissingCredentials)
        );
        assert_eq!(
            err.details(),
            Some("Missing Server-to-Server credentials: account_id".to_string())
        );
    }

    #[test]
    fn test_token_exchange_failure_keeps_provider_payload() {
        let err: Error = token_exchange_error(ProviderFailure::new(401, "invalid_client")).into();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::TokenExchange(ProviderFailure::new(
                401,
                "invalid_client"
            )))
        );
    }
}
