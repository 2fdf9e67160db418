use axum::{Router, routing::get};

pub mod common;
pub mod customers;
pub mod products;
pub mod sales;
pub mod system;

/// Router for all token-gated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/products", products::router())
        .nest("/customers", customers::router())
        .nest("/sales", sales::router())
}
