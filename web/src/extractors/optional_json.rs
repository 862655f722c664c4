use crate::extractors::RejectionType;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use log::*;
use serde::de::DeserializeOwned;

/// A JSON body whose fields are all optional.
///
/// A missing or blank body yields `T::default()`. Anything else must be JSON, as
/// with `axum::Json`.
pub(crate) struct OptionalJson<T>(pub T);

impl<T, S> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = RejectionType;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| (e.status(), e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            trace!("Empty request body, using defaults");
            return Ok(OptionalJson(T::default()));
        }

        if !is_json {
            return Err((
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Expected request with `Content-Type: application/json`".to_string(),
            ));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(|e| {
            debug!("Rejected request body: {}", e.body_text());
            (e.status(), e.body_text())
        })?;
        Ok(OptionalJson(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
        .unwrap_or(false)
}
