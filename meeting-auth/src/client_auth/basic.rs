//! HTTP Basic authentication of an OAuth client.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use secrecy::{ExposeSecret, SecretString};

use super::{AuthMethod, ClientAuth};

/// HTTP Basic authentication built from an OAuth client ID and secret.
///
/// Both Zoom grants authenticate the client this way at the token endpoint.
pub struct BasicAuth {
    client_id: String,
    client_secret: SecretString,
}

impl BasicAuth {
    /// Create a new Basic authenticator.
    pub fn new(client_id: &str, client_secret: SecretString) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret,
        }
    }
}

impl ClientAuth for BasicAuth {
    fn auth_method(&self) -> AuthMethod {
        AuthMethod::Basic
    }

    fn authorization_value(&self) -> String {
        let credentials = format!("{}:{}", self.client_id, self.client_secret.expose_secret());
        format!("Basic {}", STANDARD.encode(credentials))
    }
}
