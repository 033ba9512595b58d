use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
};

use tariffwatch_catalog::FixtureProvider;
use tariffwatch_insights::overview;

use crate::app::{AppState, dto, load_section};

/// GET /search?q=term
///
/// Overview quick search. Terms of two characters or fewer are inactive; an
/// active term without matches returns new-product sourcing options.
pub async fn quick_search(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<dto::SearchQuery>,
) -> axum::response::Response {
    let term = query.q.unwrap_or_default();
    let delay = if overview::is_active_term(&term) {
        state.latency.search
    } else {
        Duration::ZERO
    };

    let catalog = &state.catalog;
    let result = match load_section("search", delay, || {
        overview::quick_search(&term, catalog.skus(), catalog.suppliers())
    })
    .await
    {
        Ok(result) => result,
        Err(response) => return response,
    };
    (StatusCode::OK, Json(dto::quick_search_to_json(&result))).into_response()
}
