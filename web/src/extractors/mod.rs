pub(crate) mod optional_json;
pub(crate) mod session_state;

use axum::http::StatusCode;

type RejectionType = (StatusCode, String);
