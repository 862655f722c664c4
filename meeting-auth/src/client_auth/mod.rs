//! Request authentication for calls made to Zoom.
//!
//! The token endpoint authenticates the OAuth client with HTTP Basic, while the
//! REST API expects the access token obtained from it as a Bearer token.

mod basic;
mod bearer;

pub use basic::BasicAuth;
pub use bearer::BearerTokenAuth;

use reqwest::header::{HeaderValue, InvalidHeaderValue};
use reqwest::RequestBuilder;

/// Authentication scheme applied to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// `Authorization: Basic base64(id:secret)`
    Basic,
    /// `Authorization: Bearer <token>`
    Bearer,
}

/// Trait for authenticating outbound HTTP requests.
pub trait ClientAuth: Send + Sync {
    /// Get the authentication method used.
    fn auth_method(&self) -> AuthMethod;

    /// Full value of the `Authorization` header, scheme included.
    fn authorization_value(&self) -> String;

    /// Apply authentication to a request builder.
    ///
    /// The header is marked sensitive so it never shows up in debug output.
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&self.authorization_value())?;
        value.set_sensitive(true);
        Ok(request.header(reqwest::header::AUTHORIZATION, value))
    }
}
