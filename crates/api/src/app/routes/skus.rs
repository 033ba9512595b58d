//! SKU table, SKU detail, alternatives and tariff scenario.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use tariffwatch_catalog::FixtureProvider;
use tariffwatch_insights::query;
use tariffwatch_insights::ranking::{SourcingStatus, rank_suppliers};
use tariffwatch_insights::scenario::{DEFAULT_TARIFF_INCREASE, tariff_scenario};

use crate::app::{AppState, dto, errors, load_section};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_skus))
        .route("/:id", get(get_sku))
        .route("/:id/alternatives", get(get_alternatives))
        .route("/:id/scenario", get(get_scenario))
}

/// GET /skus?search=&action=&sort=&dir=&page=
///
/// One page of the dashboard table. Unknown or malformed parameters fall back
/// to the defaults (total risk, descending, page 1).
pub async fn list_skus(
    Extension(state): Extension<Arc<AppState>>,
    Query(raw): Query<dto::SkuListQuery>,
) -> axum::response::Response {
    let params = raw.to_params(state.page_size);
    let page = match load_section("table", state.latency.table, || {
        query::query(state.catalog.skus(), &params)
    })
    .await
    {
        Ok(page) => page,
        Err(response) => return response,
    };
    (StatusCode::OK, Json(dto::page_to_json(&page, &params))).into_response()
}

/// GET /skus/:id
pub async fn get_sku(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let sku = match load_section("detail", state.latency.detail, || state.catalog.find_sku(&id)).await {
        Ok(Some(sku)) => sku,
        Ok(None) => return errors::sku_not_found(&id),
        Err(response) => return response,
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "sku": dto::sku_to_json(sku),
            "sourcing_status": dto::status_to_json(SourcingStatus::for_sku(sku)),
            "scenario": dto::scenario_to_json(tariff_scenario(sku, DEFAULT_TARIFF_INCREASE)),
        })),
    )
        .into_response()
}

/// GET /skus/:id/alternatives?type=all|domestic|regional_treaty|international
///
/// Ranked alternative suppliers. An empty ranking carries the reason
/// (already optimal vs. no alternatives) instead of an empty list alone.
pub async fn get_alternatives(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<dto::AlternativesQuery>,
) -> axum::response::Response {
    let catalog = &state.catalog;
    let Some(sku) = catalog.find_sku(&id) else {
        return errors::sku_not_found(&id);
    };

    let ranking = match load_section("alternatives", state.latency.alternatives, || {
        rank_suppliers(sku, catalog.suppliers(), catalog.mapping())
    })
    .await
    {
        Ok(ranking) => ranking,
        Err(response) => return response,
    };
    (StatusCode::OK, Json(dto::ranking_to_json(&ranking, query.filter()))).into_response()
}

/// GET /skus/:id/scenario?increase=5..20
///
/// `scenario` is null for domestic SKUs.
pub async fn get_scenario(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<dto::ScenarioQuery>,
) -> axum::response::Response {
    let Some(sku) = state.catalog.find_sku(&id) else {
        return errors::sku_not_found(&id);
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "sku_id": sku.id.as_str(),
            "scenario": dto::scenario_to_json(tariff_scenario(sku, query.increase())),
        })),
    )
        .into_response()
}
