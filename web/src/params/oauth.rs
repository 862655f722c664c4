use domain::OAuthConfigInput;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query of `GET /auth/login`. Values left out fall back to the server's configuration.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginParams {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Must match the redirect URI registered with Zoom exactly.
    pub redirect_uri: Option<String>,
    /// Defaults to `meeting:write`
    pub scope: Option<String>,
}

impl From<LoginParams> for OAuthConfigInput {
    fn from(params: LoginParams) -> Self {
        OAuthConfigInput {
            client_id: params.client_id,
            client_secret: params.client_secret,
            redirect_uri: params.redirect_uri,
            scope: params.scope,
        }
    }
}

/// Query Zoom appends when redirecting back to `GET /auth/callback`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// Authorization code to redeem
    pub code: Option<String>,
}
