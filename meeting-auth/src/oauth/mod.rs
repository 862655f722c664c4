//! OAuth 2.0 authentication infrastructure.
//!
//! Provides the two Zoom grants (account credentials and authorization code) and
//! the session contract the user grant relies on between its redirects.

mod config;
mod provider;
mod session;

pub mod providers;
pub mod token;

pub use config::OAuthConfig;
pub use provider::Provider;
pub use session::SessionStorage;
