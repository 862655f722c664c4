//! OAuth token types.

pub(crate) mod tokens;

pub use tokens::{TokenResponse, Tokens};
