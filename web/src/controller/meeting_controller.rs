//! Controller for creating Zoom meetings through either grant.

use crate::error::ErrorBody;
use crate::extractors::optional_json::OptionalJson;
use crate::extractors::session_state::SessionState;
use crate::params::meeting::{MeetingParams, S2sParams};
use crate::{AppState, Error};

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use domain::gateway::oauth::zoom as zoom_oauth_gateway;
use domain::gateway::zoom;
use domain::meeting::{self as MeetingApi, MeetingResult};
use domain::zoom_oauth as ZoomOAuthApi;

use log::*;

/// POST create a meeting with Server-to-Server credentials
#[utoipa::path(
    post,
    path = "/api/meetings/s2s",
    request_body(content = Option<S2sParams>, description = "Optional; an empty body uses server defaults"),
    responses(
        (status = 200, description = "Meeting created", body = MeetingResult),
        (status = 400, description = "Credentials incomplete after applying server defaults", body = ErrorBody),
        (status = 500, description = "Zoom unreachable", body = ErrorBody),
        (status = 504, description = "Zoom did not answer in time", body = ErrorBody),
    )
)]
pub async fn create_s2s(
    State(app_state): State<AppState>,
    OptionalJson(params): OptionalJson<S2sParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create Server-to-Server meeting");

    let (credentials, request) = params.into_parts();
    let provider =
        zoom_oauth_gateway::new_provider(&app_state.config, app_state.http_client.clone())?;
    let client = zoom::Client::new(
        app_state.http_client.clone(),
        app_state.config.zoom_api_base_url(),
    );

    let meeting = MeetingApi::create_with_account_credentials(
        &provider,
        &client,
        &app_state.config,
        credentials,
        request,
    )
    .await?;

    Ok(Json(meeting))
}

/// POST create a meeting as the user who completed the OAuth flow in this session
#[utoipa::path(
    post,
    path = "/api/meetings/oauth",
    request_body(content = Option<MeetingParams>, description = "Optional; an empty body uses Zoom meeting defaults"),
    responses(
        (status = 200, description = "Meeting created", body = MeetingResult),
        (status = 401, description = "No tokens in session, or Zoom rejected them", body = ErrorBody),
        (status = 500, description = "Zoom unreachable", body = ErrorBody),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn create_oauth(
    State(app_state): State<AppState>,
    session: SessionState,
    OptionalJson(params): OptionalJson<MeetingParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create OAuth meeting");

    let client = zoom::Client::new(
        app_state.http_client.clone(),
        app_state.config.zoom_api_base_url(),
    );

    let meeting = ZoomOAuthApi::create_meeting(&session, &client, params.into()).await?;

    Ok(Json(meeting))
}
