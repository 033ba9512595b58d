use axum::{Router, routing::get};

pub mod overview;
pub mod search;
pub mod skus;
pub mod system;

/// Router for all read endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/overview", get(overview::overview))
        .route("/search", get(search::quick_search))
        .nest("/skus", skus::router())
}
