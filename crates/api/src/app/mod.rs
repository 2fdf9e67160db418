//! Application wiring (Axum router + store wiring).
//!
//! - `services.rs`: store handles shared by the handlers
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request payloads
//! - `errors.rs`: the uniform `{ok, msg, result}` envelope

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router. `/health` stays public; everything else
/// sits behind the token gate.
pub fn build_app(jwt_secret: Vec<u8>, services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        jwt_secret: Arc::new(jwt_secret),
    };

    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
