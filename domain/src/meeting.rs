//! Meeting creation with Server-to-Server credentials, and the result shape both
//! creation flows share.

use crate::error::Error;
use crate::gateway::oauth::Provider;
use crate::gateway::zoom::{Client, MeetingRequest, MeetingResponse};
use log::*;
use meeting_auth::credentials::{resolve_account_credentials, CredentialInput};
use serde::Serialize;
use service::config::Config;
use utoipa::ToSchema;

/// Which grant authorized the meeting creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MeetingMethod {
    S2s,
    OAuth,
}

/// A created meeting as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MeetingResult {
    pub method: MeetingMethod,
    #[schema(example = 123456789)]
    pub meeting_id: i64,
    pub password: String,
    /// Zoom's `start_url`; lets the holder start the meeting as host.
    pub host_link: String,
    /// Zoom's `join_url`.
    pub join_link: String,
}

impl MeetingResult {
    pub(crate) fn new(method: MeetingMethod, meeting: MeetingResponse) -> Self {
        Self {
            method,
            meeting_id: meeting.id,
            password: meeting.password,
            host_link: meeting.start_url,
            join_link: meeting.join_url,
        }
    }
}

/// Process-level Server-to-Server credentials, used field by field where a request
/// leaves one out.
pub fn fallback_credentials(config: &Config) -> CredentialInput {
    CredentialInput {
        client_id: config.zoom_client_id(),
        client_secret: config.zoom_client_secret(),
        account_id: config.zoom_account_id(),
    }
}

/// Create a meeting with an account-level token.
///
/// Resolves credentials, exchanges them for a token and creates the meeting, in that
/// order. Nothing is called once a step fails, and the token is dropped on return.
pub async fn create_with_account_credentials<P>(
    provider: &P,
    client: &Client,
    config: &Config,
    credentials: CredentialInput,
    request: MeetingRequest,
) -> Result<MeetingResult, Error>
where
    P: Provider + ?Sized,
{
    let credentials = resolve_account_credentials(credentials, fallback_credentials(config))
        .map_err(|e| {
            warn!("Server-to-Server credentials incomplete: {}", e);
            e
        })?;

    let tokens = provider.exchange_account_credentials(&credentials).await?;
    let meeting = client.create_meeting(&tokens.access_token, request).await?;

    info!("Created Server-to-Server meeting {}", meeting.id);
    Ok(MeetingResult::new(MeetingMethod::S2s, meeting))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind, InputErrorKind};
    use clap::Parser;
    use meeting_auth::oauth::providers::zoom::Provider as ZoomProvider;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["meeting_bridge"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    fn supplied() -> CredentialInput {
        CredentialInput {
            client_id: Some("abc".to_string()),
            client_secret: Some("xyz".to_string()),
            account_id: Some("acct-1".to_string()),
        }
    }

    #[test]
    fn test_method_serializes_lowercase() {
        assert_eq!(json!(MeetingMethod::S2s), json!("s2s"));
        assert_eq!(json!(MeetingMethod::OAuth), json!("oauth"));
    }

    #[tokio::test]
    async fn test_token_then_meeting() {
        let mut server = Server::new_async().await;
        let token_mock = server
            .mock("POST", "/oauth/token")
            .match_query(Matcher::UrlEncoded(
                "grant_type".into(),
                "account_credentials".into(),
            ))
            .with_status(200)
            .with_body(r#"{"access_token":"s2s-token","expires_in":3599}"#)
            .create_async()
            .await;
        let meeting_mock = server
            .mock("POST", "/users/me/meetings")
            .match_header("authorization", "Bearer s2s-token")
            .with_status(201)
            .with_body(
                json!({
                    "id": 123456789,
                    "password": "abc123",
                    "start_url": "https://zoom.us/s/123456789",
                    "join_url": "https://zoom.us/j/123456789"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let provider = ZoomProvider::new(reqwest::Client::new(), &server.url()).unwrap();
        let client = Client::new(reqwest::Client::new(), &server.url());

        let result = create_with_account_credentials(
            &provider,
            &client,
            &config(&[]),
            supplied(),
            MeetingRequest::default(),
        )
        .await
        .unwrap();

        token_mock.assert_async().await;
        meeting_mock.assert_async().await;
        assert_eq!(
            result,
            MeetingResult {
                method: MeetingMethod::S2s,
                meeting_id: 123456789,
                password: "abc123".to_string(),
                host_link: "https://zoom.us/s/123456789".to_string(),
                join_link: "https://zoom.us/j/123456789".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_fallback_fills_missing_fields() {
        let mut server = Server::new_async().await;
        let token_mock = server
            .mock("POST", "/oauth/token")
            .match_query(Matcher::UrlEncoded("account_id".into(), "env-acct".into()))
            .with_status(200)
            .with_body(r#"{"access_token":"s2s-token"}"#)
            .create_async()
            .await;
        let _meeting_mock = server
            .mock("POST", "/users/me/meetings")
            .with_status(201)
            .with_body(r#"{"id":1,"start_url":"s","join_url":"j"}"#)
            .create_async()
            .await;

        let provider = ZoomProvider::new(reqwest::Client::new(), &server.url()).unwrap();
        let client = Client::new(reqwest::Client::new(), &server.url());
        let credentials = CredentialInput {
            account_id: None,
            ..supplied()
        };

        let result = create_with_account_credentials(
            &provider,
            &client,
            &config(&["--zoom-account-id", "env-acct"]),
            credentials,
            MeetingRequest::default(),
        )
        .await
        .unwrap();

        token_mock.assert_async().await;
        assert_eq!(result.password, "");
    }

    #[tokio::test]
    async fn test_missing_credentials_make_no_calls() {
        let mut server = Server::new_async().await;
        let token_mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let provider = ZoomProvider::new(reqwest::Client::new(), &server.url()).unwrap();
        let client = Client::new(reqwest::Client::new(), &server.url());

        let err = create_with_account_credentials(
            &provider,
            &client,
            &config(&[]),
            CredentialInput::default(),
            MeetingRequest::default(),
        )
        .await
        .unwrap_err();

        token_mock.assert_async().await;
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Input(InputErrorKind::MissingCredentials)
        );
    }

    #[tokio::test]
    async fn test_rejected_credentials_skip_meeting_call() {
        let mut server = Server::new_async().await;
        let _token_mock = server
            .mock("POST", "/oauth/token")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"reason":"Invalid client_id or client_secret","error":"invalid_client"}"#)
            .create_async()
            .await;
        let meeting_mock = server
            .mock("POST", "/users/me/meetings")
            .expect(0)
            .create_async()
            .await;

        let provider = ZoomProvider::new(reqwest::Client::new(), &server.url()).unwrap();
        let client = Client::new(reqwest::Client::new(), &server.url());

        let err = create_with_account_credentials(
            &provider,
            &client,
            &config(&[]),
            supplied(),
            MeetingRequest::default(),
        )
        .await
        .unwrap_err();

        meeting_mock.assert_async().await;
        match err.error_kind {
            DomainErrorKind::External(ExternalErrorKind::TokenExchange(failure)) => {
                assert_eq!(failure.status, 401);
                assert!(failure.body.contains("invalid_client"));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }
}
