use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use domain::error::{
    DomainErrorKind, Error as DomainError, ExternalErrorKind, InputErrorKind, ProviderFailure,
    SessionErrorKind,
};

extern crate log;
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

/// JSON body of every failed API request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    /// The provider's response body (as JSON when it parses) or a message.
    #[schema(value_type = Object)]
    pub details: Value,
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match &self.0.error_kind {
            DomainErrorKind::Input(_) => StatusCode::BAD_REQUEST,
            DomainErrorKind::Session(SessionErrorKind::MissingSessionState) => {
                StatusCode::BAD_REQUEST
            }
            DomainErrorKind::Session(SessionErrorKind::Unauthenticated) => StatusCode::UNAUTHORIZED,
            DomainErrorKind::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DomainErrorKind::External(
                ExternalErrorKind::TokenExchange(failure)
                | ExternalErrorKind::MeetingCreation(failure),
            ) => provider_status(failure),
        }
    }

    fn message(&self) -> &'static str {
        match &self.0.error_kind {
            DomainErrorKind::Input(InputErrorKind::MissingCredentials) => {
                "Missing Server-to-Server credentials"
            }
            DomainErrorKind::Input(InputErrorKind::MissingOAuthConfig) => {
                "Missing OAuth configuration"
            }
            DomainErrorKind::Input(InputErrorKind::MissingAuthorizationCode) => {
                "Missing authorization code"
            }
            DomainErrorKind::Session(SessionErrorKind::MissingSessionState) => {
                "Missing session state"
            }
            DomainErrorKind::Session(SessionErrorKind::Unauthenticated) => "Not authenticated",
            DomainErrorKind::Internal(_) => "Internal server error",
            DomainErrorKind::External(ExternalErrorKind::TokenExchange(_)) => {
                "Token exchange failed"
            }
            DomainErrorKind::External(ExternalErrorKind::MeetingCreation(_)) => {
                "Meeting creation failed"
            }
        }
    }

    fn details(&self) -> Value {
        match &self.0.error_kind {
            DomainErrorKind::External(
                ExternalErrorKind::TokenExchange(failure)
                | ExternalErrorKind::MeetingCreation(failure),
            ) => serde_json::from_str(&failure.body)
                .unwrap_or_else(|_| Value::String(failure.body.clone())),
            _ => self.0.details().map(Value::String).unwrap_or(Value::Null),
        }
    }

    fn log(&self, status: StatusCode) {
        if status.is_server_error() {
            error!("{} ({}): {:?}", self.message(), status, self.0);
        } else {
            warn!("{} ({}): {:?}", self.message(), status, self.0);
        }
    }

    /// Plain text rendering, for endpoints a browser lands on directly.
    pub fn into_text_response(self) -> Response {
        let status = self.status_code();
        self.log(status);
        let details = match self.details() {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        (status, format!("{}: {}", self.message(), details)).into_response()
    }
}

/// Zoom's own status for rejections, the synthetic one for transport failures.
fn provider_status(failure: &ProviderFailure) -> StatusCode {
    StatusCode::from_u16(failure.status).unwrap_or(StatusCode::BAD_GATEWAY)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.log(status);
        let body = ErrorBody {
            error: self.message().to_string(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
