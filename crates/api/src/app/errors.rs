use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;

use stockroom_store::StoreError;

/// Success envelope: `{ok: true, msg, result?}`.
pub fn envelope_ok(
    status: StatusCode,
    msg: impl Into<String>,
    result: Option<serde_json::Value>,
) -> axum::response::Response {
    let mut body = json!({ "ok": true, "msg": msg.into() });
    if let Some(result) = result {
        body["result"] = result;
    }
    (status, Json(body)).into_response()
}

/// Failure envelope: `{ok: false, msg}`.
pub fn envelope_err(status: StatusCode, msg: impl Into<String>) -> axum::response::Response {
    (status, Json(json!({ "ok": false, "msg": msg.into() }))).into_response()
}

/// Map a repository failure onto the envelope. Storage detail is logged
/// here and intentionally never reaches the caller.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound(what) => {
            envelope_err(StatusCode::NOT_FOUND, format!("There is no {what}"))
        }
        StoreError::Conflict(msg) => envelope_err(StatusCode::BAD_REQUEST, msg),
        StoreError::Validation(msg) => envelope_err(StatusCode::BAD_REQUEST, msg),
        StoreError::Storage(e) => {
            tracing::error!(error = %e, "storage failure");
            envelope_err(StatusCode::INTERNAL_SERVER_ERROR, "Please, talk to the administrator")
        }
        StoreError::Bson(e) => {
            tracing::error!(error = %e, "document serialization failure");
            envelope_err(StatusCode::INTERNAL_SERVER_ERROR, "Please, talk to the administrator")
        }
    }
}

/// Serialize a result payload for the envelope.
pub fn to_result_value<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}
