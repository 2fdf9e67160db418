use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Echo the identity the auth gate attached to the request.
pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "ok": true,
        "msg": "Authenticated",
        "result": {
            "uid": principal.uid(),
            "name": principal.name(),
            "role": principal.role(),
        }
    }))
}
