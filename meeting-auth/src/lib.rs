//! # meeting-auth
//!
//! Single source of truth for authentication against the Zoom platform:
//! - Credential resolution (request-supplied values over process fallbacks)
//! - Request authentication (HTTP Basic for the token endpoint, Bearer for the API)
//! - OAuth 2.0 grants: `account_credentials` (Server-to-Server) and `authorization_code` (user)
//! - Session storage contract for the user grant's transient config and tokens
//! - HTTP client building with a bounded timeout
//!
//! ## Architecture
//!
//! This crate provides the authentication foundation that other crates build upon:
//! - `domain` sequences the grants into the two meeting-creation flows
//! - `web` implements [`oauth::SessionStorage`] over the HTTP session
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meeting_auth::{
//!     credentials::{resolve_account_credentials, CredentialInput},
//!     oauth::{providers::zoom, Provider},
//!     http::ClientBuilder,
//! };
//! ```

pub mod client_auth;
pub mod credentials;
pub mod error;
pub mod http;
pub mod oauth;

// Re-export commonly used types
pub use error::{Error, ErrorKind, ProviderFailure};
