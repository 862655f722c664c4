//! Zoom Meetings API client.
//!
//! This module provides an HTTP client for creating scheduled Zoom meetings on
//! behalf of whichever account or user the bearer token belongs to.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use log::*;
use meeting_auth::client_auth::{BearerTokenAuth, ClientAuth};
use meeting_auth::ProviderFailure;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Topic used when the caller does not name the meeting.
pub const DEFAULT_TOPIC: &str = "Test Meeting";

/// Duration in minutes used when the caller does not give one.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Zoom's meeting type for a meeting with a fixed start time.
const SCHEDULED_MEETING_TYPE: u8 = 2;

/// Caller-facing meeting parameters, all optional.
#[derive(Debug, Clone, Default)]
pub struct MeetingRequest {
    pub topic: Option<String>,
    pub duration: Option<u32>,
    /// ISO-8601 start time, passed to Zoom verbatim.
    pub start_time: Option<String>,
    pub timezone: Option<String>,
}

/// Security settings applied to every meeting this service creates.
#[derive(Debug, Serialize)]
pub struct MeetingSettings {
    pub join_before_host: bool,
    pub waiting_room: bool,
}

impl Default for MeetingSettings {
    fn default() -> Self {
        Self {
            join_before_host: false,
            waiting_room: true,
        }
    }
}

/// Request body for `POST /users/me/meetings`
#[derive(Debug, Serialize)]
pub struct CreateMeetingRequest {
    pub topic: String,
    #[serde(rename = "type")]
    pub meeting_type: u8,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub settings: MeetingSettings,
}

impl From<MeetingRequest> for CreateMeetingRequest {
    fn from(request: MeetingRequest) -> Self {
        Self {
            topic: request
                .topic
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            meeting_type: SCHEDULED_MEETING_TYPE,
            duration: request.duration.unwrap_or(DEFAULT_DURATION_MINUTES),
            start_time: request.start_time.filter(|s| !s.trim().is_empty()),
            timezone: request.timezone.filter(|s| !s.trim().is_empty()),
            settings: MeetingSettings::default(),
        }
    }
}

/// Fields read from Zoom's create-meeting response. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct MeetingResponse {
    pub id: i64,
    #[serde(default)]
    pub password: String,
    /// Link that starts the meeting as host.
    pub start_url: String,
    pub join_url: String,
}

/// Zoom Meetings API client
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new Zoom client over the shared HTTP client and API base URL
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a scheduled meeting for the owner of `access_token`.
    ///
    /// Never retried: a retry after an ambiguous failure could create a second meeting.
    pub async fn create_meeting(
        &self,
        access_token: &SecretString,
        request: MeetingRequest,
    ) -> Result<MeetingResponse, Error> {
        let url = format!("{}/users/me/meetings", self.base_url);
        let body = CreateMeetingRequest::from(request);

        debug!(
            "Creating Zoom meeting \"{}\" ({} minutes)",
            body.topic, body.duration
        );

        let auth = BearerTokenAuth::new(access_token.clone());
        let request = auth
            .authenticate(self.client.post(&url).json(&body))
            .map_err(|e| {
                warn!("Failed to create auth header: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                        "Invalid access token format".to_string(),
                    )),
                }
            })?;

        let response = request.send().await.map_err(|e| {
            warn!("Failed to reach Zoom meetings API: {:?}", e);
            meeting_creation_error(ProviderFailure::from_transport(&e))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!("Failed to read Zoom meetings API response: {:?}", e);
            meeting_creation_error(ProviderFailure::from_transport(&e))
        })?;

        if status.is_success() {
            let meeting: MeetingResponse = serde_json::from_str(&text).map_err(|e| {
                warn!("Failed to parse Zoom meeting response: {:?}", e);
                meeting_creation_error(ProviderFailure::new(
                    meeting_auth::error::INVALID_RESPONSE_STATUS,
                    text.clone(),
                ))
            })?;
            info!("Created Zoom meeting: {}", meeting.id);
            Ok(meeting)
        } else {
            warn!("Zoom meetings API error {}: {}", status, text);
            Err(meeting_creation_error(ProviderFailure::new(
                status.as_u16(),
                text,
            )))
        }
    }
}

fn meeting_creation_error(failure: ProviderFailure) -> Error {
    Error {
        source: Some(failure.body.clone().into()),
        error_kind: DomainErrorKind::External(ExternalErrorKind::MeetingCreation(failure)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn token() -> SecretString {
        SecretString::new("access-token".to_string())
    }

    #[test]
    fn test_defaults_and_fixed_settings() {
        let body = serde_json::to_value(CreateMeetingRequest::from(MeetingRequest::default()))
            .unwrap();

        assert_eq!(
            body,
            json!({
                "topic": "Test Meeting",
                "type": 2,
                "duration": 30,
                "settings": {
                    "join_before_host": false,
                    "waiting_room": true
                }
            })
        );
    }

    #[test]
    fn test_supplied_parameters_are_kept() {
        let body = serde_json::to_value(CreateMeetingRequest::from(MeetingRequest {
            topic: Some("Standup".to_string()),
            duration: Some(15),
            start_time: Some("2026-10-20T09:00:00Z".to_string()),
            timezone: Some("Europe/Berlin".to_string()),
        }))
        .unwrap();

        assert_eq!(body["topic"], "Standup");
        assert_eq!(body["duration"], 15);
        assert_eq!(body["start_time"], "2026-10-20T09:00:00Z");
        assert_eq!(body["timezone"], "Europe/Berlin");
        assert_eq!(body["type"], 2);
    }

    #[tokio::test]
    async fn test_create_meeting_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/users/me/meetings")
            .match_header("authorization", "Bearer access-token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "topic": "Test Meeting",
                "type": 2,
                "settings": {"join_before_host": false, "waiting_room": true}
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": 123456789,
                    "password": "abc123",
                    "start_url": "https://zoom.us/s/123456789?zak=host",
                    "join_url": "https://zoom.us/j/123456789?pwd=xyz",
                    "uuid": "ignored"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = Client::new(reqwest::Client::new(), &server.url());
        let meeting = client
            .create_meeting(&token(), MeetingRequest::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(meeting.id, 123456789);
        assert_eq!(meeting.password, "abc123");
        assert_eq!(meeting.start_url, "https://zoom.us/s/123456789?zak=host");
        assert_eq!(meeting.join_url, "https://zoom.us/j/123456789?pwd=xyz");
    }

    #[tokio::test]
    async fn test_rejected_token_is_meeting_creation_failure() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/users/me/meetings")
            .with_status(401)
            .with_body(r#"{"code":124,"message":"Invalid access token."}"#)
            .expect(1)
            .create_async()
            .await;

        let client = Client::new(reqwest::Client::new(), &server.url());
        let err = client
            .create_meeting(&token(), MeetingRequest::default())
            .await
            .unwrap_err();

        // Exactly one call: creation is never retried.
        mock.assert_async().await;
        match err.error_kind {
            DomainErrorKind::External(ExternalErrorKind::MeetingCreation(failure)) => {
                assert_eq!(failure.status, 401);
                assert!(failure.body.contains("Invalid access token."));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }
}
