use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use tariffwatch_catalog::FixtureProvider;

use crate::app::AppState;

pub async fn health(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "as_of": state.catalog.as_of(),
        "skus": state.catalog.skus().len(),
        "suppliers": state.catalog.suppliers().len(),
    }))
}
