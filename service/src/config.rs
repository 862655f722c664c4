use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;

/// Default Zoom OAuth host, serving both `/oauth/authorize` and `/oauth/token`.
pub const DEFAULT_ZOOM_OAUTH_BASE_URL: &str = "https://zoom.us";

/// Default Zoom REST API base URL.
pub const DEFAULT_ZOOM_API_BASE_URL: &str = "https://api.zoom.us/v2";

/// Scope requested by the user grant when neither the request nor the environment sets one.
pub const DEFAULT_ZOOM_OAUTH_SCOPE: &str = "meeting:write";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000,https://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Fallback client ID for the Server-to-Server (account credentials) grant.
    #[arg(long, env)]
    zoom_client_id: Option<String>,

    /// Fallback client secret for the Server-to-Server (account credentials) grant.
    #[arg(long, env, hide_env_values = true)]
    zoom_client_secret: Option<String>,

    /// Fallback Zoom account ID for the Server-to-Server (account credentials) grant.
    #[arg(long, env)]
    zoom_account_id: Option<String>,

    /// Fallback client ID for the user (authorization code) grant.
    #[arg(long, env)]
    zoom_oauth_client_id: Option<String>,

    /// Fallback client secret for the user (authorization code) grant.
    #[arg(long, env, hide_env_values = true)]
    zoom_oauth_client_secret: Option<String>,

    /// Fallback redirect URI for the user grant. Must match the value registered
    /// with Zoom exactly.
    #[arg(long, env)]
    zoom_redirect_uri: Option<String>,

    /// Fallback scope for the user grant.
    #[arg(long, env, default_value = DEFAULT_ZOOM_OAUTH_SCOPE)]
    zoom_oauth_scope: String,

    /// Base URL of the Zoom OAuth host.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ZOOM_OAUTH_BASE_URL)]
    zoom_oauth_base_url: String,

    /// Base URL of the Zoom REST API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_ZOOM_API_BASE_URL)]
    zoom_api_base_url: String,

    /// Timeout in seconds applied to every outbound call to Zoom
    #[arg(long, env, default_value_t = 30)]
    pub outbound_timeout_secs: u64,

    /// Key used to sign the session cookie. Must be at least 64 bytes long; a random
    /// key is generated at startup when absent, which invalidates sessions on restart.
    #[arg(long, env, hide_env_values = true)]
    session_secret: Option<String>,

    /// Where the OAuth callback redirects the browser after a successful token exchange.
    #[arg(long, env, default_value = "/?oauth=success")]
    oauth_success_redirect: String,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 3000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,

    /// Session expiry duration in seconds (default: 24 hours = 86400 seconds)
    #[arg(long, env, default_value_t = 86400)]
    pub backend_session_expiry_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn zoom_client_id(&self) -> Option<String> {
        self.zoom_client_id.clone()
    }

    pub fn zoom_client_secret(&self) -> Option<String> {
        self.zoom_client_secret.clone()
    }

    pub fn zoom_account_id(&self) -> Option<String> {
        self.zoom_account_id.clone()
    }

    pub fn zoom_oauth_client_id(&self) -> Option<String> {
        self.zoom_oauth_client_id.clone()
    }

    pub fn zoom_oauth_client_secret(&self) -> Option<String> {
        self.zoom_oauth_client_secret.clone()
    }

    pub fn zoom_redirect_uri(&self) -> Option<String> {
        self.zoom_redirect_uri.clone()
    }

    pub fn zoom_oauth_scope(&self) -> &str {
        &self.zoom_oauth_scope
    }

    /// Returns the Zoom OAuth host without a trailing slash.
    pub fn zoom_oauth_base_url(&self) -> &str {
        self.zoom_oauth_base_url.trim_end_matches('/')
    }

    /// Returns the Zoom REST API base URL without a trailing slash.
    pub fn zoom_api_base_url(&self) -> &str {
        self.zoom_api_base_url.trim_end_matches('/')
    }

    pub fn session_secret(&self) -> Option<String> {
        self.session_secret.clone()
    }

    pub fn oauth_success_redirect(&self) -> &str {
        &self.oauth_success_redirect
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["meeting_bridge"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.zoom_oauth_scope(), "meeting:write");
        assert_eq!(config.zoom_oauth_base_url(), DEFAULT_ZOOM_OAUTH_BASE_URL);
        assert_eq!(config.zoom_api_base_url(), DEFAULT_ZOOM_API_BASE_URL);
        assert_eq!(config.outbound_timeout_secs, 30);
        assert_eq!(config.oauth_success_redirect(), "/?oauth=success");
    }

    #[test]
    fn test_base_urls_drop_trailing_slash() {
        let config = parse(&[
            "--zoom-oauth-base-url",
            "http://127.0.0.1:9000/",
            "--zoom-api-base-url",
            "http://127.0.0.1:9001/v2/",
        ]);
        assert_eq!(config.zoom_oauth_base_url(), "http://127.0.0.1:9000");
        assert_eq!(config.zoom_api_base_url(), "http://127.0.0.1:9001/v2");
    }

    #[test]
    fn test_runtime_env_parsing() {
        assert_eq!("PRODUCTION".parse::<RustEnv>(), Ok(RustEnv::Production));
        assert_eq!("staging".parse::<RustEnv>(), Ok(RustEnv::Staging));
        assert_eq!("qa".parse::<RustEnv>(), Err(RustEnvParseError));

        let config = parse(&["--runtime-env", "production"]);
        assert!(config.is_production());
    }
}
