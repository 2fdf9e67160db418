use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
};
use bson::Document;

use stockroom_core::Sale;

use crate::app::errors;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/:id", get(get_sale).put(update_sale).delete(delete_sale))
        .route("/code/:code", get(get_by_code))
}

pub async fn create_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<Sale>,
) -> axum::response::Response {
    match services.sales.create(body).await {
        Ok(sale) => errors::envelope_ok(
            StatusCode::CREATED,
            "Sale created",
            Some(errors::to_result_value(&sale)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// All sales, newest invoice first.
pub async fn list_sales(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.sales.list().await {
        Ok(sales) => errors::envelope_ok(
            StatusCode::OK,
            "Get sales",
            Some(errors::to_result_value(&sales)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_id(&id, "sale") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.sales.get(id).await {
        Ok(sale) => errors::envelope_ok(
            StatusCode::OK,
            "Sale got by id",
            Some(errors::to_result_value(&sale)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_by_code(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> axum::response::Response {
    match services.sales.find_by_code_prefix(&code).await {
        Ok(rows) => errors::envelope_ok(
            StatusCode::OK,
            "Sale got by code",
            Some(errors::to_result_value(&rows)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(patch): Json<Document>,
) -> axum::response::Response {
    let id = match common::parse_id(&id, "sale") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.sales.update_fields(id, patch).await {
        Ok(sale) => errors::envelope_ok(
            StatusCode::OK,
            "Updated sale",
            Some(errors::to_result_value(&sale)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_id(&id, "sale") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.sales.delete(id).await {
        Ok(()) => errors::envelope_ok(StatusCode::OK, "sale removed", None),
        Err(e) => errors::store_error_to_response(e),
    }
}
