use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use salesdesk_core::SaleId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/:id", get(get_sale).delete(delete_sale))
        .route("/:id/status", put(update_sale_status))
}

pub async fn create_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateSaleRequest>,
) -> axum::response::Response {
    match services.sales.create(body.into_draft()).await {
        Ok(sale) => (StatusCode::CREATED, Json(sale)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_sales(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.sales.list().await {
        Ok(items) => Json(dto::ListResponse { items }).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SaleId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.sales.get(id).await {
        Ok(sale) => Json(sale).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_sale_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateSaleStatusRequest>,
) -> axum::response::Response {
    let id: SaleId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.sales.update_status(&body.status, id).await {
        Ok(sale) => Json(sale).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SaleId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.sales.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
