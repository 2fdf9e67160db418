use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use stockroom_auth::verify_token;

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: Arc<Vec<u8>>,
}

/// Token gate for every protected route: verify the bearer token, attach
/// the caller's identity to the request, and only then let it through.
/// Performs no database access.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer(req.headers()) else {
        return errors::envelope_err(StatusCode::UNAUTHORIZED, "No token in request");
    };

    match verify_token(token, &state.jwt_secret) {
        Ok(claims) => {
            req.extensions_mut().insert(PrincipalContext::new(claims));
            next.run(req).await
        }
        Err(_) => errors::envelope_err(StatusCode::UNAUTHORIZED, "Invalid token"),
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
