use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
};
use bson::Document;
use serde_json::json;

use stockroom_core::Product;
use stockroom_store::StockUpdate;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
        .route("/qty/:id", put(adjust_qty))
        .route("/code/:code", get(get_by_code))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products.list().await {
        Ok(products) => errors::envelope_ok(
            StatusCode::OK,
            "Get products",
            Some(errors::to_result_value(&products)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Create-or-merge: the three branches of the nested-stock protocol map
/// to three distinct success messages.
pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<Product>,
) -> axum::response::Response {
    match services.products.create_or_merge(body).await {
        Ok(StockUpdate::Created(product)) => errors::envelope_ok(
            StatusCode::CREATED,
            "Product created",
            Some(errors::to_result_value(&product)),
        ),
        Ok(StockUpdate::LocationsAppended { code, locations, matched, modified, .. }) => {
            errors::envelope_ok(
                StatusCode::OK,
                format!(
                    "Created the new location {} of the product with code: {code}",
                    locations.join(", ")
                ),
                Some(json!({ "matchedCount": matched, "modifiedCount": modified })),
            )
        }
        Ok(StockUpdate::TrademarkAppended { code, trademark, matched, modified }) => {
            errors::envelope_ok(
                StatusCode::OK,
                format!("The product's {trademark} trademark was created in the code: {code}"),
                Some(json!({ "matchedCount": matched, "modifiedCount": modified })),
            )
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

/// The path id names the resource; the body names the nested target.
pub async fn adjust_qty(
    Extension(services): Extension<Arc<AppServices>>,
    Path(_id): Path<String>,
    Json(body): Json<dto::AdjustQtyRequest>,
) -> axum::response::Response {
    match services
        .products
        .adjust_qty(&body.code, &body.trademark, &body.location, body.qty)
        .await
    {
        Ok(ack) => errors::envelope_ok(
            StatusCode::OK,
            "Updated product quantity",
            Some(json!({ "matchedCount": ack.matched, "modifiedCount": ack.modified })),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_id(&id, "product") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.products.get(id).await {
        Ok(product) => errors::envelope_ok(
            StatusCode::OK,
            "Product got by id",
            Some(errors::to_result_value(&product)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Prefix search on `code`. The optional `x-mode` header names a single
/// field to project.
pub async fn get_by_code(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> axum::response::Response {
    let field = headers
        .get("x-mode")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match services.products.find_by_code_prefix(&code, field).await {
        Ok(rows) => errors::envelope_ok(
            StatusCode::OK,
            "Product got by code",
            Some(errors::to_result_value(&rows)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(patch): Json<Document>,
) -> axum::response::Response {
    let id = match common::parse_id(&id, "product") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.products.update_fields(id, patch).await {
        Ok(product) => errors::envelope_ok(
            StatusCode::OK,
            "Updated product",
            Some(errors::to_result_value(&product)),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match common::parse_id(&id, "product") {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.products.delete(id).await {
        Ok(()) => errors::envelope_ok(StatusCode::OK, "product removed", None),
        Err(e) => errors::store_error_to_response(e),
    }
}
