//! Clients for the external APIs this service calls.

pub mod oauth;
pub mod zoom;

use meeting_auth::http::ClientBuilder;
use service::config::Config;
use std::time::Duration;

use crate::error::Error;

/// Build the shared outbound client, bounded by the configured timeout.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, Error> {
    let client = ClientBuilder::new()
        .with_timeout(Duration::from_secs(config.outbound_timeout_secs))
        .with_user_agent(format!("meeting-bridge/{}", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
