//! Credential resolution for both Zoom grants.
//!
//! Request-supplied values win over process-wide fallbacks field by field. The
//! result is either complete or an error naming every missing field; nothing
//! here touches the network.

mod resolver;

pub use resolver::{
    resolve_account_credentials, resolve_oauth_config, AccountCredentials, CredentialInput,
    OAuthConfigInput,
};
