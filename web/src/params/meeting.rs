use domain::gateway::zoom::MeetingRequest;
use domain::CredentialInput;
use serde::Deserialize;
use utoipa::ToSchema;

/// Body of `POST /api/meetings/s2s`. Credentials left out fall back to the
/// server's configuration.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct S2sParams {
    #[serde(rename = "clientId")]
    pub client_id: Option<String>,
    #[serde(rename = "clientSecret")]
    pub client_secret: Option<String>,
    #[serde(rename = "accountId")]
    pub account_id: Option<String>,
    #[serde(flatten)]
    pub meeting: MeetingParams,
}

/// Meeting parameters shared by both creation endpoints.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MeetingParams {
    #[schema(example = "Test Meeting")]
    pub topic: Option<String>,
    /// Minutes
    #[schema(example = 30)]
    pub duration: Option<u32>,
    /// ISO-8601, passed to Zoom as given
    pub start_time: Option<String>,
    pub timezone: Option<String>,
}

impl S2sParams {
    pub fn into_parts(self) -> (CredentialInput, MeetingRequest) {
        let credentials = CredentialInput {
            client_id: self.client_id,
            client_secret: self.client_secret,
            account_id: self.account_id,
        };
        (credentials, self.meeting.into())
    }
}

impl From<MeetingParams> for MeetingRequest {
    fn from(params: MeetingParams) -> Self {
        MeetingRequest {
            topic: params.topic,
            duration: params.duration,
            start_time: params.start_time,
            timezone: params.timezone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_s2s_body_uses_camel_case_credentials() {
        let params: S2sParams = serde_json::from_value(json!({
            "clientId": "abc",
            "clientSecret": "xyz",
            "accountId": "acct-1",
            "topic": "Standup",
            "start_time": "2026-10-20T09:00:00Z"
        }))
        .unwrap();

        let (credentials, request) = params.into_parts();
        assert_eq!(credentials.client_id.as_deref(), Some("abc"));
        assert_eq!(credentials.account_id.as_deref(), Some("acct-1"));
        assert_eq!(request.topic.as_deref(), Some("Standup"));
        assert_eq!(request.start_time.as_deref(), Some("2026-10-20T09:00:00Z"));
        assert!(request.duration.is_none());
    }

    #[test]
    fn test_empty_body() {
        let params: S2sParams = serde_json::from_value(json!({})).unwrap();
        let (credentials, request) = params.into_parts();
        assert!(credentials.client_secret.is_none());
        assert!(request.topic.is_none());
    }
}
