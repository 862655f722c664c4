//! HTTP surface of the meeting bridge: routes, session handling and CORS.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use log::*;
use time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub use error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod params;
mod router;

/// Name of the cookie carrying the signed session id.
pub const SESSION_COOKIE_NAME: &str = "meeting_bridge.sid";

const MAX_SESSION_EXPIRY_SECONDS: i64 = 400 * 24 * 60 * 60;

/// Build the router with its session and CORS layers, ready to serve.
pub fn build_app(app_state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_secure(app_state.config.is_production())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(session_expiry(
            app_state.config.backend_session_expiry_seconds,
        )))
        .with_signed(session_key(app_state.config.session_secret()));

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_credentials(true)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allowed_origins(&app_state.config.allowed_origins));

    router::define_routes(app_state)
        .layer(session_layer)
        .layer(cors_layer)
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let server_url = format!("{}:{}", host, app_state.config.port);

    info!(
        "Server starting... listening for connections on http://{} ({} mode)",
        server_url,
        app_state.config.runtime_env()
    );

    let listener = TcpListener::bind(&server_url).await?;
    axum::serve(listener, build_app(app_state)).await
}

/// Inactivity expiry, capped at the 400 days browsers keep a cookie for.
fn session_expiry(seconds: u64) -> Duration {
    let seconds = i64::try_from(seconds).unwrap_or(i64::MAX);
    Duration::seconds(seconds.min(MAX_SESSION_EXPIRY_SECONDS))
}

/// Signing key from the configured secret, or a fresh random one when the secret
/// is missing or shorter than 64 bytes.
fn session_key(secret: Option<String>) -> Key {
    match secret {
        Some(secret) => Key::try_from(secret.as_bytes()).unwrap_or_else(|e| {
            warn!("SESSION_SECRET unusable ({e}), signing sessions with a random key");
            Key::generate()
        }),
        None => {
            warn!("SESSION_SECRET not set, sessions will not survive a restart");
            Key::generate()
        }
    }
}

fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin.trim())
                .map_err(|e| warn!("Ignoring invalid CORS origin {origin:?}: {e}"))
                .ok()
        })
        .collect()
}
