use crate::{
    controller::{health_check_controller, meeting_controller, oauth_controller},
    error, params, AppState,
};
use axum::{
    routing::{get, post},
    Router,
};

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// Paths and schemas only show up at /rapidoc when listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Meeting Bridge API"
        ),
        paths(
            health_check_controller::health_check,
            meeting_controller::create_s2s,
            meeting_controller::create_oauth,
            oauth_controller::login,
            oauth_controller::callback,
            oauth_controller::status,
            oauth_controller::logout,
        ),
        components(
            schemas(
                domain::meeting::MeetingMethod,
                domain::meeting::MeetingResult,
                domain::zoom_oauth::AuthStatus,
                error::ErrorBody,
                params::meeting::MeetingParams,
                params::meeting::S2sParams,
            )
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "meeting_bridge", description = "Zoom meeting creation through Server-to-Server or user OAuth")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// The OAuth meeting endpoint relies on the tokens stored in the caller's session,
// which is identified by the signed session cookie.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    crate::SESSION_COOKIE_NAME,
                    "Signed session id set on the first request to /auth/login",
                ))),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(meeting_routes(app_state.clone()))
        .merge(oauth_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi2.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn meeting_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/meetings/s2s", post(meeting_controller::create_s2s))
        .route("/api/meetings/oauth", post(meeting_controller::create_oauth))
        .with_state(app_state)
}

fn oauth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/login", get(oauth_controller::login))
        .route("/auth/callback", get(oauth_controller::callback))
        .route("/auth/status", get(oauth_controller::status))
        .route("/auth/logout", post(oauth_controller::logout))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let openapi = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/meetings/s2s",
            "/api/meetings/oauth",
            "/auth/login",
            "/auth/callback",
            "/auth/status",
            "/auth/logout",
        ] {
            assert!(openapi.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
