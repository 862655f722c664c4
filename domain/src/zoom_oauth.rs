//! The Zoom user (authorization code) grant: login, callback, and meeting creation
//! with the tokens the callback left in the session.
//!
//! Every step takes the caller's [`SessionStorage`] handle explicitly. The session
//! moves through three states:
//!
//! - no config, no tokens: only login is useful
//! - config stored: login succeeded, the callback can redeem a code
//! - authenticated: a callback succeeded, meetings can be created
//!
//! A new login replaces the stored config but leaves earlier tokens in place until
//! a later callback succeeds.

use crate::error::{DomainErrorKind, Error, InputErrorKind, SessionErrorKind};
use crate::gateway::oauth::{Provider, SessionStorage};
use crate::gateway::zoom::{Client, MeetingRequest};
use crate::meeting::{MeetingMethod, MeetingResult};
use log::*;
use meeting_auth::credentials::{resolve_oauth_config, OAuthConfigInput};
use serde::Serialize;
use service::config::Config;
use utoipa::ToSchema;

/// What the current session holds, without exposing any of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthStatus {
    /// Tokens from a successful callback are stored.
    pub authenticated: bool,
    /// A login configuration is stored.
    pub config_stored: bool,
    /// The stored access token is expired or about to expire.
    pub token_expired: bool,
}

/// Process-level user grant settings, used field by field where a login leaves one out.
pub fn fallback_oauth_config(config: &Config) -> OAuthConfigInput {
    OAuthConfigInput {
        client_id: config.zoom_oauth_client_id(),
        client_secret: config.zoom_oauth_client_secret(),
        redirect_uri: config.zoom_redirect_uri(),
        scope: Some(config.zoom_oauth_scope().to_string()),
    }
}

/// Start the user grant. Stores the resolved config in the session and returns the
/// Zoom authorization URL to send the browser to.
pub async fn begin_login<S, P>(
    session: &S,
    provider: &P,
    config: &Config,
    supplied: OAuthConfigInput,
) -> Result<String, Error>
where
    S: SessionStorage + ?Sized,
    P: Provider + ?Sized,
{
    let oauth_config = resolve_oauth_config(supplied, fallback_oauth_config(config))
        .map_err(|e| {
            warn!("OAuth login configuration incomplete: {}", e);
            e
        })?;

    session.put_oauth_config(&oauth_config).await?;
    debug!(
        "Stored OAuth config for client {} in session",
        oauth_config.client_id
    );

    Ok(provider.authorization_url(&oauth_config))
}

/// Redeem the authorization code with the config stored at login and keep the
/// resulting tokens in the session. Returns where to send the browser next.
pub async fn complete_callback<S, P>(
    session: &S,
    provider: &P,
    config: &Config,
    code: Option<String>,
) -> Result<String, Error>
where
    S: SessionStorage + ?Sized,
    P: Provider + ?Sized,
{
    let code = code.filter(|c| !c.trim().is_empty()).ok_or_else(|| {
        warn!("OAuth callback without an authorization code");
        Error::new(
            DomainErrorKind::Input(InputErrorKind::MissingAuthorizationCode),
            "Missing authorization code",
        )
    })?;

    let oauth_config = session.oauth_config().await?.ok_or_else(|| {
        warn!("OAuth callback without a stored login configuration");
        Error::new(
            DomainErrorKind::Session(SessionErrorKind::MissingSessionState),
            "Missing OAuth config in session. Start the flow again at /auth/login",
        )
    })?;

    let tokens = provider.exchange_code(&oauth_config, &code).await?;
    session.put_tokens(&tokens).await?;

    info!("OAuth callback complete, tokens stored in session");
    Ok(config.oauth_success_redirect().to_string())
}

/// Create a meeting as the user who completed the grant in this session.
pub async fn create_meeting<S>(
    session: &S,
    client: &Client,
    request: MeetingRequest,
) -> Result<MeetingResult, Error>
where
    S: SessionStorage + ?Sized,
{
    let tokens = session.tokens().await?.ok_or_else(|| {
        warn!("OAuth meeting requested without tokens in session");
        Error::new(
            DomainErrorKind::Session(SessionErrorKind::Unauthenticated),
            "Not authenticated. Retry the login flow at /auth/login",
        )
    })?;

    if tokens.is_expired() {
        debug!("Stored access token looks expired, sending it anyway");
    }

    let meeting = client.create_meeting(&tokens.access_token, request).await?;

    info!("Created OAuth meeting {}", meeting.id);
    Ok(MeetingResult::new(MeetingMethod::OAuth, meeting))
}

pub async fn status<S>(session: &S) -> Result<AuthStatus, Error>
where
    S: SessionStorage + ?Sized,
{
    let tokens = session.tokens().await?;
    let config_stored = session.oauth_config().await?.is_some();

    Ok(AuthStatus {
        authenticated: tokens.is_some(),
        config_stored,
        token_expired: tokens.as_ref().is_some_and(|t| t.is_expired()),
    })
}

/// Forget both the login configuration and the tokens.
pub async fn logout<S>(session: &S) -> Result<(), Error>
where
    S: SessionStorage + ?Sized,
{
    session.clear().await?;
    info!("Cleared OAuth state from session");
    Ok(())
}
