use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use tariffwatch_catalog::FixtureProvider;
use tariffwatch_insights::overview;

use crate::app::{AppState, dto, load_section};

/// GET /overview
///
/// Headline KPIs and the categories that need attention.
pub async fn overview(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    let catalog = &state.catalog;
    let delay = state.latency.kpis.max(state.latency.categories);
    let loaded = load_section("overview", delay, || {
        let kpis = overview::kpis(catalog.skus(), catalog.categories());
        let categories = overview::high_risk_categories(catalog.categories())
            .into_iter()
            .map(dto::category_to_json)
            .collect::<Vec<_>>();
        (kpis, categories)
    })
    .await;
    let (kpis, categories) = match loaded {
        Ok(sections) => sections,
        Err(response) => return response,
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "as_of": catalog.as_of(),
            "kpis": dto::kpis_to_json(&kpis),
            "high_risk_categories": categories,
        })),
    )
        .into_response()
}
