use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{credential_error, CredentialErrorKind, Error};
use crate::oauth::OAuthConfig;

/// Possibly incomplete Server-to-Server credentials, from a request body or from
/// process configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialInput {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub account_id: Option<String>,
}

/// Possibly incomplete user grant configuration, from a login query or from
/// process configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthConfigInput {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,
}

/// Complete credentials for the `account_credentials` grant.
#[derive(Debug, Clone)]
pub struct AccountCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
    pub account_id: String,
}

/// Merge request-supplied Server-to-Server credentials over the fallback.
///
/// Fails with `MissingCredentials` listing every field still empty afterwards.
pub fn resolve_account_credentials(
    supplied: CredentialInput,
    fallback: CredentialInput,
) -> Result<AccountCredentials, Error> {
    let client_id = prefer(supplied.client_id, fallback.client_id);
    let client_secret = prefer(supplied.client_secret, fallback.client_secret);
    let account_id = prefer(supplied.account_id, fallback.account_id);

    match (client_id, client_secret, account_id) {
        (Some(client_id), Some(client_secret), Some(account_id)) => Ok(AccountCredentials {
            client_id,
            client_secret: SecretString::new(client_secret),
            account_id,
        }),
        (client_id, client_secret, account_id) => {
            let missing = missing_fields(&[
                ("client_id", client_id.is_none()),
                ("client_secret", client_secret.is_none()),
                ("account_id", account_id.is_none()),
            ]);
            Err(credential_error(
                CredentialErrorKind::MissingCredentials,
                &format!("Missing Server-to-Server credentials: {missing}"),
            ))
        }
    }
}

/// Merge a login request's OAuth settings over the fallback.
///
/// The scope always resolves, since the fallback carries a default. Fails with
/// `MissingOAuthConfig` listing every other field still empty afterwards.
pub fn resolve_oauth_config(
    supplied: OAuthConfigInput,
    fallback: OAuthConfigInput,
) -> Result<OAuthConfig, Error> {
    let client_id = prefer(supplied.client_id, fallback.client_id);
    let client_secret = prefer(supplied.client_secret, fallback.client_secret);
    let redirect_uri = prefer(supplied.redirect_uri, fallback.redirect_uri);
    let scope = prefer(supplied.scope, fallback.scope);

    match (client_id, client_secret, redirect_uri, scope) {
        (Some(client_id), Some(client_secret), Some(redirect_uri), Some(scope)) => {
            Ok(OAuthConfig {
                client_id,
                client_secret: SecretString::new(client_secret),
                redirect_uri,
                scope,
            })
        }
        (client_id, client_secret, redirect_uri, scope) => {
            let missing = missing_fields(&[
                ("client_id", client_id.is_none()),
                ("client_secret", client_secret.is_none()),
                ("redirect_uri", redirect_uri.is_none()),
                ("scope", scope.is_none()),
            ]);
            Err(credential_error(
                CredentialErrorKind::MissingOAuthConfig,
                &format!("Missing OAuth configuration: {missing}"),
            ))
        }
    }
}

/// The supplied value when it is non-blank, otherwise the non-blank fallback.
fn prefer(supplied: Option<String>, fallback: Option<String>) -> Option<String> {
    non_blank(supplied).or_else(|| non_blank(fallback))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing_fields(fields: &[(&str, bool)]) -> String {
    fields
        .iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}
