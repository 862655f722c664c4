use crate::extractors::RejectionType;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use domain::gateway::oauth::{session_error, AuthError, OAuthConfig, SessionStorage, Tokens};
use log::*;
use serde::{de::DeserializeOwned, Serialize};
use tower_sessions::Session;

const OAUTH_CONFIG_KEY: &str = "zoom.oauth_config";
const TOKENS_KEY: &str = "zoom.tokens";

/// The caller's server-side session, seen as storage for the Zoom user grant.
///
/// Only the signed session ID travels in the cookie; the config and tokens stay in
/// the session store.
pub(crate) struct SessionState(Session);

impl SessionState {
    async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AuthError> {
        self.0.get::<T>(key).await.map_err(|e| {
            warn!("Failed to read {} from session: {:?}", key, e);
            session_error(Box::new(e))
        })
    }

    async fn put<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> Result<(), AuthError> {
        self.0.insert(key, value).await.map_err(|e| {
            warn!("Failed to write {} to session: {:?}", key, e);
            session_error(Box::new(e))
        })
    }

    async fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.0
            .remove_value(key)
            .await
            .map(|_| ())
            .map_err(|e| {
                warn!("Failed to remove {} from session: {:?}", key, e);
                session_error(Box::new(e))
            })
    }
}

impl<S> FromRequestParts<S> for SessionState
where
    S: Send + Sync,
{
    type Rejection = RejectionType;

    // Wraps the tower_sessions Session extractor, which fails only when the session
    // layer is missing from the router.
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(status, msg)| (status, msg.to_string()))?;
        Ok(SessionState(session))
    }
}

#[async_trait]
impl SessionStorage for SessionState {
    async fn put_oauth_config(&self, config: &OAuthConfig) -> Result<(), AuthError> {
        self.put(OAUTH_CONFIG_KEY, config).await
    }

    async fn oauth_config(&self) -> Result<Option<OAuthConfig>, AuthError> {
        self.get(OAUTH_CONFIG_KEY).await
    }

    async fn put_tokens(&self, tokens: &Tokens) -> Result<(), AuthError> {
        self.put(TOKENS_KEY, tokens).await
    }

    async fn tokens(&self) -> Result<Option<Tokens>, AuthError> {
        self.get(TOKENS_KEY).await
    }

    async fn clear(&self) -> Result<(), AuthError> {
        self.remove(OAUTH_CONFIG_KEY).await?;
        self.remove(TOKENS_KEY).await
    }
}
