//! Configuration of the user (authorization code) grant.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::token::tokens::expose;

/// Everything the callback needs to redeem an authorization code.
///
/// Created at login and kept in the session until the callback reads it. The
/// `redirect_uri` must match the value registered with Zoom exactly; that is
/// only ever checked by Zoom itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub client_id: String,
    #[serde(serialize_with = "expose")]
    pub client_secret: SecretString,
    pub redirect_uri: String,
    pub scope: String,
}
