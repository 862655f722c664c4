//! Business logic for creating Zoom meetings through either grant.
//!
//! `domain` sequences the building blocks from `meeting-auth` into the two flows and
//! translates their errors, so that `web` never depends on `meeting-auth` directly.

pub use meeting_auth::credentials::{CredentialInput, OAuthConfigInput};

pub mod error;
pub mod meeting;
pub mod zoom_oauth;

pub mod gateway;
