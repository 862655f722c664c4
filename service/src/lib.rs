use config::Config;

pub mod config;
pub mod logging;

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Shared outbound client for every call to Zoom. `reqwest::Client` is
    /// reference counted internally, so cloning the state shares one connection pool.
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(app_config: Config, http_client: reqwest::Client) -> Self {
        Self {
            config: app_config,
            http_client,
        }
    }
}
