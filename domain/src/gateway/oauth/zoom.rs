//! Zoom OAuth client.
//!
//! Provides a configured Zoom OAuth provider for domain operations.

use meeting_auth::oauth::providers::zoom::Provider as ZoomProvider;
use service::config::Config;

use crate::error::Error;

/// Create a new Zoom OAuth provider.
///
/// # Arguments
///
/// * `config` - Supplies the Zoom OAuth base URL
/// * `http_client` - Shared outbound client, already bounded by the configured timeout
///
/// # Example
///
/// ```rust,ignore
/// use domain::gateway::oauth::zoom;
///
/// let provider = zoom::new_provider(&config, http_client)?;
/// ```
pub fn new_provider(config: &Config, http_client: reqwest::Client) -> Result<ZoomProvider, Error> {
    Ok(ZoomProvider::new(http_client, config.zoom_oauth_base_url())?)
}
