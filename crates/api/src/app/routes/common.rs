use axum::http::StatusCode;
use bson::oid::ObjectId;

use crate::app::errors;

/// Parse a path id, rejecting malformed ids before they reach the store.
pub fn parse_id(id: &str, what: &str) -> Result<ObjectId, axum::response::Response> {
    ObjectId::parse_str(id).map_err(|_| {
        errors::envelope_err(StatusCode::BAD_REQUEST, format!("invalid {what} id: {id}"))
    })
}
