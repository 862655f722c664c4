//! Zoom OAuth provider implementation.

use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

use crate::client_auth::{BasicAuth, ClientAuth};
use crate::credentials::AccountCredentials;
use crate::error::{
    token_exchange_error, Error, ErrorKind, HttpErrorKind, ProviderFailure,
    INVALID_RESPONSE_STATUS,
};
use crate::oauth::token::{TokenResponse, Tokens};
use crate::oauth::OAuthConfig;

const AUTHORIZE_PATH: &str = "/oauth/authorize";
const TOKEN_PATH: &str = "/oauth/token";

/// Zoom OAuth provider.
///
/// Holds only endpoints and the shared HTTP client; client credentials arrive
/// with each call, since they may differ per request or per session.
pub struct Provider {
    http_client: reqwest::Client,
    authorize_url: Url,
    token_url: Url,
}

impl Provider {
    /// Create a new Zoom OAuth provider.
    ///
    /// # Arguments
    ///
    /// * `http_client` - Shared client; its timeout bounds every exchange
    /// * `oauth_base_url` - Zoom OAuth host, e.g. `https://zoom.us`
    pub fn new(http_client: reqwest::Client, oauth_base_url: &str) -> Result<Self, Error> {
        let base = oauth_base_url.trim_end_matches('/');
        let authorize_url = parse_endpoint(&format!("{base}{AUTHORIZE_PATH}"))?;
        let token_url = parse_endpoint(&format!("{base}{TOKEN_PATH}"))?;

        Ok(Self {
            http_client,
            authorize_url,
            token_url,
        })
    }

    /// POST to the token endpoint authenticated with HTTP Basic.
    ///
    /// Both grants go through here and differ only in the query and form
    /// parameters they send.
    async fn request_token(
        &self,
        auth: &BasicAuth,
        query: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> Result<Tokens, Error> {
        let mut request = self.http_client.post(self.token_url.clone()).query(query);
        if !form.is_empty() {
            request = request.form(form);
        }
        let request = auth.authenticate(request).map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: ErrorKind::Http(HttpErrorKind::BuilderFailed),
        })?;

        let response = request.send().await.map_err(|e| {
            warn!("Zoom token endpoint unreachable: {}", e);
            token_exchange_error(ProviderFailure::from_transport(&e))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read Zoom token response: {}", e);
            token_exchange_error(ProviderFailure::from_transport(&e))
        })?;

        if !status.is_success() {
            warn!("Zoom token endpoint returned {}: {}", status, body);
            return Err(token_exchange_error(ProviderFailure::new(
                status.as_u16(),
                body,
            )));
        }

        parse_tokens(&body)
    }
}

#[async_trait]
impl crate::oauth::Provider for Provider {
    fn authorization_url(&self, config: &OAuthConfig) -> String {
        let mut url = self.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &config.client_id)
            .append_pair("redirect_uri", &config.redirect_uri)
            .append_pair("scope", &config.scope);
        url.into()
    }

    async fn exchange_account_credentials(
        &self,
        credentials: &AccountCredentials,
    ) -> Result<Tokens, Error> {
        debug!(
            "Requesting account credentials token for account {}",
            credentials.account_id
        );

        let auth = BasicAuth::new(&credentials.client_id, credentials.client_secret.clone());
        let tokens = self
            .request_token(
                &auth,
                &[
                    ("grant_type", "account_credentials"),
                    ("account_id", credentials.account_id.as_str()),
                ],
                &[],
            )
            .await?;

        info!("Obtained account credentials token");
        Ok(tokens)
    }

    async fn exchange_code(&self, config: &OAuthConfig, code: &str) -> Result<Tokens, Error> {
        debug!("Exchanging Zoom OAuth code for tokens");

        let auth = BasicAuth::new(&config.client_id, config.client_secret.clone());
        let tokens = self
            .request_token(
                &auth,
                &[],
                &[
                    ("grant_type", "authorization_code"),
                    ("code", code),
                    ("redirect_uri", config.redirect_uri.as_str()),
                ],
            )
            .await?;

        info!("Successfully exchanged Zoom OAuth code for tokens");
        Ok(tokens)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, Error> {
    Url::parse(endpoint).map_err(|e| Error {
        source: Some(Box::new(e)),
        error_kind: ErrorKind::Http(HttpErrorKind::BuilderFailed),
    })
}

/// Parse a 2xx token response, keeping the raw payload alongside the fields read.
fn parse_tokens(body: &str) -> Result<Tokens, Error> {
    let raw: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        warn!("Zoom token response is not JSON: {}", e);
        token_exchange_error(ProviderFailure::new(INVALID_RESPONSE_STATUS, body))
    })?;
    let response: TokenResponse = serde_json::from_value(raw.clone()).map_err(|e| {
        warn!("Zoom token response has no usable access token: {}", e);
        token_exchange_error(ProviderFailure::new(INVALID_RESPONSE_STATUS, body))
    })?;

    if response.access_token.is_empty() {
        return Err(token_exchange_error(ProviderFailure::new(
            INVALID_RESPONSE_STATUS,
            body,
        )));
    }

    Ok(Tokens::from_response(response, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OAuthErrorKind, TIMEOUT_STATUS, TRANSPORT_FAILURE_STATUS};
    use crate::oauth::Provider as _;
    use mockito::{Matcher, Server};
    use secrecy::{ExposeSecret, SecretString};
    use std::time::Duration;

    fn account_credentials() -> AccountCredentials {
        AccountCredentials {
            client_id: "abc".to_string(),
            client_secret: SecretString::new("xyz".to_string()),
            account_id: "acct-1".to_string(),
        }
    }

    fn oauth_config() -> OAuthConfig {
        OAuthConfig {
            client_id: "abc".to_string(),
            client_secret: SecretString::new("xyz".to_string()),
            redirect_uri: "http://localhost:3000/auth/callback".to_string(),
            scope: "meeting:write".to_string(),
        }
    }

    fn provider(base_url: &str) -> Provider {
        Provider::new(reqwest::Client::new(), base_url).unwrap()
    }

    fn failure(err: Error) -> ProviderFailure {
        match err.error_kind {
            ErrorKind::OAuth(OAuthErrorKind::TokenExchangeFailed(failure)) => failure,
            other => panic!("expected TokenExchangeFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_authorization_url_carries_config() {
        let provider = provider("https://zoom.us");
        let url = Url::parse(&provider.authorization_url(&oauth_config())).unwrap();

        assert_eq!(url.path(), "/oauth/authorize");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
        assert!(pairs.contains(&("client_id".to_string(), "abc".to_string())));
        assert!(pairs.contains(&(
            "redirect_uri".to_string(),
            "http://localhost:3000/auth/callback".to_string()
        )));
        assert!(pairs.contains(&("scope".to_string(), "meeting:write".to_string())));
        assert!(!url.as_str().contains("xyz"));
    }

    #[tokio::test]
    async fn test_account_credentials_grant() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/token")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "account_credentials".into()),
                Matcher::UrlEncoded("account_id".into(), "acct-1".into()),
            ]))
            .match_header("authorization", "Basic YWJjOnh5eg==")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token":"s2s-token","token_type":"bearer","expires_in":3599,"scope":"meeting:write:admin"}"#,
            )
            .create_async()
            .await;

        let tokens = provider(&server.url())
            .exchange_account_credentials(&account_credentials())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(tokens.access_token.expose_secret(), "s2s-token");
        assert!(tokens.refresh_token.is_none());
        assert_eq!(tokens.expires_in, Some(3599));
    }

    #[tokio::test]
    async fn test_authorization_code_grant_is_form_encoded() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/token")
            .match_header("authorization", "Basic YWJjOnh5eg==")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("code".into(), "auth-code".into()),
                Matcher::UrlEncoded(
                    "redirect_uri".into(),
                    "http://localhost:3000/auth/callback".into(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token":"user-token","refresh_token":"user-refresh","token_type":"bearer","expires_in":3599,"scope":"meeting:write"}"#,
            )
            .create_async()
            .await;

        let tokens = provider(&server.url())
            .exchange_code(&oauth_config(), "auth-code")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(tokens.access_token.expose_secret(), "user-token");
        assert_eq!(
            tokens.refresh_token.as_ref().map(|t| t.expose_secret().as_str()),
            Some("user-refresh")
        );
        assert_eq!(tokens.raw["scope"], "meeting:write");
    }

    #[tokio::test]
    async fn test_rejected_grant_preserves_status_and_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth/token")
            .with_status(400)
            .with_body(r#"{"reason":"Invalid redirect uri","error":"invalid_request"}"#)
            .create_async()
            .await;

        let err = provider(&server.url())
            .exchange_code(&oauth_config(), "auth-code")
            .await
            .unwrap_err();

        let failure = failure(err);
        assert_eq!(failure.status, 400);
        assert!(failure.body.contains("Invalid redirect uri"));
    }

    #[tokio::test]
    async fn test_success_without_access_token_is_invalid_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/oauth/token")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"token_type":"bearer"}"#)
            .create_async()
            .await;

        let err = provider(&server.url())
            .exchange_account_credentials(&account_credentials())
            .await
            .unwrap_err();

        assert_eq!(failure(err).status, INVALID_RESPONSE_STATUS);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_token_exchange_failure() {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        // Port 9 (discard) is not expected to accept HTTP connections locally.
        let provider = Provider::new(client, "http://127.0.0.1:9").unwrap();

        let err = provider
            .exchange_account_credentials(&account_credentials())
            .await
            .unwrap_err();

        let failure = failure(err);
        assert!(failure.status == TRANSPORT_FAILURE_STATUS || failure.status == TIMEOUT_STATUS);
        assert!(!failure.body.is_empty());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = Provider::new(reqwest::Client::new(), "not a url");
        assert!(matches!(
            result.map(|_| ()).unwrap_err().error_kind,
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        ));
    }
}
