use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
};
use bson::Document;

use stockroom_core::Customer;

use crate::app::errors;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/:id", get(get_customer).put(update_customer).delete(delete_customer))
        .route("/code/:code", get(search_customers))
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<Customer>,
) -> axum::response::Response {
    match services.customers.create(body).await {
        Ok(customer) => errors::envelope_ok(
            StatusCode::CREATED,
            "Customer created",
            Some(errors::to_result_value(&customer)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.customers.list().await {
        Ok(customers) => errors::envelope_ok(
            StatusCode::OK,
            "Get customers",
            Some(errors::to_result_value(&customers)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_id(&id, "customer") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.customers.get(id).await {
        Ok(customer) => errors::envelope_ok(
            StatusCode::OK,
            "Customer got by id",
            Some(errors::to_result_value(&customer)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Prefix search on `code` with a name-substring fallback; both branches
/// live in the store.
pub async fn search_customers(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    match services.customers.search(&code).await {
        Ok(rows) => errors::envelope_ok(
            StatusCode::OK,
            "Customer got by code",
            Some(errors::to_result_value(&rows)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(patch): Json<Document>,
) -> axum::response::Response {
    let id = match common::parse_id(&id, "customer") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.customers.update_fields(id, patch).await {
        Ok(customer) => errors::envelope_ok(
            StatusCode::OK,
            "Updated customer",
            Some(errors::to_result_value(&customer)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_id(&id, "customer") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.customers.delete(id).await {
        Ok(customer) => errors::envelope_ok(
            StatusCode::OK,
            format!("customer {} removed", customer.name),
            None,
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}
