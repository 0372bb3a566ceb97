use axum::Router;

pub mod sales;
pub mod sellers;
pub mod system;

/// Router for all record endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/sellers", sellers::router())
        .nest("/sales", sales::router())
}
