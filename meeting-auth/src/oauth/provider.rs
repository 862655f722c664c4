//! OAuth provider trait.

use async_trait::async_trait;

use super::token::Tokens;
use super::OAuthConfig;
use crate::credentials::AccountCredentials;
use crate::error::Error;

/// Trait for OAuth 2.0 token providers.
///
/// Implementations handle the platform-specific details of:
/// - Authorization URL generation for the user grant
/// - The `account_credentials` (Server-to-Server) grant
/// - Authorization code exchange
///
/// Failed exchanges surface as `TokenExchangeFailed` carrying the provider's
/// status and body; implementations never retry.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Build the URL the browser is redirected to for user consent.
    fn authorization_url(&self, config: &OAuthConfig) -> String;

    /// Obtain an access token for the account the credentials belong to.
    async fn exchange_account_credentials(
        &self,
        credentials: &AccountCredentials,
    ) -> Result<Tokens, Error>;

    /// Exchange an authorization code for access and refresh tokens.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration stored at login; its `redirect_uri` is sent verbatim
    /// * `code` - Authorization code from the OAuth callback
    async fn exchange_code(&self, config: &OAuthConfig, code: &str) -> Result<Tokens, Error>;
}
