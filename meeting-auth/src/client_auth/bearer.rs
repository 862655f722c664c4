//! Standard Bearer token authentication.

use secrecy::{ExposeSecret, SecretString};

use super::{AuthMethod, ClientAuth};

/// Standard Bearer token authentication.
///
/// Uses the standard `Authorization: Bearer <token>` header pattern.
pub struct BearerTokenAuth {
    token: SecretString,
}

impl BearerTokenAuth {
    /// Create a new Bearer token authenticator.
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }
}

impl ClientAuth for BearerTokenAuth {
    fn auth_method(&self) -> AuthMethod {
        AuthMethod::Bearer
    }

    fn authorization_value(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_auth() {
        let auth = BearerTokenAuth::new(SecretString::new("test_token".to_string()));

        assert_eq!(auth.auth_method(), AuthMethod::Bearer);
        assert_eq!(auth.authorization_value(), "Bearer test_token");
    }

    #[test]
    fn test_bearer_token_rejects_header_breaking_token() {
        let auth = BearerTokenAuth::new(SecretString::new("bad\ntoken".to_string()));
        let result = auth.authenticate(reqwest::Client::new().get("http://localhost/"));
        assert!(result.is_err());
    }
}
