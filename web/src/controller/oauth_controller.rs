//! Controller for the Zoom user (authorization code) flow.
//!
//! Login and callback are browser redirects, so they answer with 302s and the
//! callback reports failures as plain text.

use crate::error::ErrorBody;
use crate::extractors::session_state::SessionState;
use crate::params::oauth::{CallbackParams, LoginParams};
use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain::error::Error as DomainError;
use domain::gateway::oauth::zoom as zoom_oauth_gateway;
use domain::zoom_oauth::{self as ZoomOAuthApi, AuthStatus};

use log::*;

fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// GET start the Zoom OAuth flow
///
/// Stores the OAuth configuration in the session and redirects to Zoom's
/// authorization page.
#[utoipa::path(
    get,
    path = "/auth/login",
    params(LoginParams),
    responses(
        (status = 302, description = "Redirect to Zoom's authorization page"),
        (status = 400, description = "OAuth configuration incomplete", body = ErrorBody),
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    session: SessionState,
    Query(params): Query<LoginParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Zoom OAuth login");

    let provider =
        zoom_oauth_gateway::new_provider(&app_state.config, app_state.http_client.clone())?;
    let url =
        ZoomOAuthApi::begin_login(&session, &provider, &app_state.config, params.into()).await?;

    Ok(found(url))
}

/// GET redeem the authorization code Zoom redirected back with
#[utoipa::path(
    get,
    path = "/auth/callback",
    params(CallbackParams),
    responses(
        (status = 302, description = "Tokens stored, redirect to the success page"),
        (status = 400, description = "No code, or no login in this session", body = String, content_type = "text/plain"),
        (status = 500, description = "Zoom unreachable", body = String, content_type = "text/plain"),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    session: SessionState,
    Query(params): Query<CallbackParams>,
) -> Response {
    debug!("GET Zoom OAuth callback");

    match redeem_code(&app_state, &session, params.code).await {
        Ok(redirect) => found(redirect),
        Err(e) => Error::from(e).into_text_response(),
    }
}

async fn redeem_code(
    app_state: &AppState,
    session: &SessionState,
    code: Option<String>,
) -> Result<String, DomainError> {
    let provider =
        zoom_oauth_gateway::new_provider(&app_state.config, app_state.http_client.clone())?;
    ZoomOAuthApi::complete_callback(session, &provider, &app_state.config, code).await
}

/// GET what the current session holds
#[utoipa::path(
    get,
    path = "/auth/status",
    responses(
        (status = 200, description = "Session OAuth state", body = AuthStatus),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn status(session: SessionState) -> Result<impl IntoResponse, Error> {
    debug!("GET Zoom OAuth status");

    Ok(Json(ZoomOAuthApi::status(&session).await?))
}

/// POST forget the session's OAuth configuration and tokens
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session cleared"),
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn logout(session: SessionState) -> Result<impl IntoResponse, Error> {
    debug!("POST Zoom OAuth logout");

    ZoomOAuthApi::logout(&session).await?;

    Ok(StatusCode::NO_CONTENT)
}
