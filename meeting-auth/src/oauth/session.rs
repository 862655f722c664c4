//! Session storage contract for the user grant.

use async_trait::async_trait;

use super::token::Tokens;
use super::OAuthConfig;
use crate::error::Error;

/// Per-client storage for the user grant's state between requests.
///
/// A handle is scoped to exactly one client session and is passed explicitly into
/// every flow step; nothing is shared across sessions.
///
/// Holds at most one [`OAuthConfig`] and one [`Tokens`] at a time. Every `put_*`
/// replaces the previous value of that kind unconditionally (last write wins): a
/// second login replaces the first login's configuration, and a callback redeemed
/// afterwards is exchanged with the newer configuration. Tokens stored by an earlier
/// callback stay in place until a later callback succeeds.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Store the configuration created at login.
    async fn put_oauth_config(&self, config: &OAuthConfig) -> Result<(), Error>;

    /// The configuration stored at login, if any.
    async fn oauth_config(&self) -> Result<Option<OAuthConfig>, Error>;

    /// Store the tokens obtained by a successful callback.
    async fn put_tokens(&self, tokens: &Tokens) -> Result<(), Error>;

    /// The tokens stored by the last successful callback, if any.
    async fn tokens(&self) -> Result<Option<Tokens>, Error>;

    /// Drop both the configuration and the tokens.
    async fn clear(&self) -> Result<(), Error>;
}
