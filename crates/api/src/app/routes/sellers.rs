use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use salesdesk_core::SellerId;
use salesdesk_sellers::{NewSeller, SellerChanges};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sellers).post(create_seller))
        .route(
            "/:id",
            get(get_seller).put(update_seller).delete(delete_seller),
        )
}

/// Responds 200 with an empty body; the assigned id is not returned.
pub async fn create_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewSeller>,
) -> axum::response::Response {
    match services.sellers.create(body).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_sellers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.sellers.list().await {
        Ok(items) => Json(dto::ListResponse { items }).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SellerId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.sellers.get(id).await {
        Ok(seller) => Json(seller).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<SellerChanges>,
) -> axum::response::Response {
    let id: SellerId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.sellers.update(id, body).await {
        Ok(seller) => Json(seller).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_seller(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SellerId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.sellers.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
