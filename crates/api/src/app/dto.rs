use serde::Deserialize;
use serde_json::{Value, json};

use tariffwatch_catalog::{Category, Sku, Supplier};
use tariffwatch_insights::format::{compact_currency, percent, signed_percent};
use tariffwatch_insights::overview::{NewProductOption, OverviewKpis, QuickSearch};
use tariffwatch_insights::query::{ActionFilter, QueryPage, QueryParams, SortDirection, SortField, clamp_page};
use tariffwatch_insights::ranking::{
    EmptyReason, RankedSupplier, SourcingStatus, SupplierRanking, SupplierTypeFilter,
};
use tariffwatch_insights::scenario::{DEFAULT_TARIFF_INCREASE, TariffScenario};

// -------------------------
// Query-string DTOs
// -------------------------
//
// Every field is an optional raw string so that malformed values reach the
// lenient parsers instead of being rejected by the extractor.

#[derive(Debug, Default, Deserialize)]
pub struct SkuListQuery {
    pub search: Option<String>,
    pub action: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<String>,
}

impl SkuListQuery {
    pub fn to_params(&self, page_size: usize) -> QueryParams {
        let page = self
            .page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .map(clamp_page)
            .unwrap_or(1);

        QueryParams::default()
            .with_search(self.search.clone().unwrap_or_default())
            .with_action(
                self.action
                    .as_deref()
                    .map(ActionFilter::parse_or_all)
                    .unwrap_or_default(),
            )
            .with_sort(
                self.sort
                    .as_deref()
                    .map(SortField::parse_or_default)
                    .unwrap_or_default(),
                self.dir
                    .as_deref()
                    .map(SortDirection::parse_or_default)
                    .unwrap_or_default(),
            )
            .with_page(page)
            .with_page_size(page_size)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AlternativesQuery {
    #[serde(rename = "type")]
    pub supplier_type: Option<String>,
}

impl AlternativesQuery {
    pub fn filter(&self) -> SupplierTypeFilter {
        self.supplier_type
            .as_deref()
            .map(SupplierTypeFilter::parse_or_all)
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ScenarioQuery {
    pub increase: Option<String>,
}

impl ScenarioQuery {
    pub fn increase(&self) -> f64 {
        self.increase
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .unwrap_or(DEFAULT_TARIFF_INCREASE)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// -------------------------
// Response mapping
// -------------------------

pub fn sku_to_json(sku: &Sku) -> Value {
    json!({
        "id": sku.id.as_str(),
        "name": sku.name,
        "category": sku.category,
        "origin": sku.origin,
        "is_domestic": sku.is_domestic,
        "spend": sku.spend,
        "spend_display": compact_currency(sku.spend),
        "current_margin": sku.current_margin,
        "current_margin_display": percent(sku.current_margin),
        "tariff_impact": sku.tariff_impact,
        "total_risk": sku.total_risk.value(),
        "risk_level": sku.risk_level(),
        "action": sku.action.as_str(),
        "action_label": sku.action.label(),
    })
}

pub fn page_to_json(page: &QueryPage<'_>, params: &QueryParams) -> Value {
    json!({
        "items": page.items.iter().map(|s| sku_to_json(s)).collect::<Vec<_>>(),
        "page": page.page,
        "page_size": page.page_size,
        "total_pages": page.total_pages,
        "total_matching": page.total_matching,
        "catalog_total": page.catalog_total,
        "first_index": page.first_index(),
        "last_index": page.last_index(),
        "has_previous": page.has_previous(),
        "has_next": page.has_next(),
        "query": {
            "search": params.search_text,
            "action": params.action_filter.as_str(),
            "sort": params.sort_field.as_str(),
            "dir": params.sort_direction.as_str(),
        },
    })
}

pub fn category_to_json(category: &Category) -> Value {
    json!({
        "name": category.name,
        "risk_score": category.risk_score.value(),
        "amount_at_risk": category.amount_at_risk,
        "amount_at_risk_display": compact_currency(category.amount_at_risk),
        "action": category.action.as_str(),
        "action_label": category.action.label(),
        "high_risk_countries": category.high_risk_countries,
    })
}

pub fn kpis_to_json(kpis: &OverviewKpis) -> Value {
    json!({
        "total_skus": kpis.total_skus,
        "high_risk_percentage": kpis.high_risk_percentage,
        "total_amount_at_risk": kpis.total_amount_at_risk,
        "total_amount_at_risk_display": compact_currency(kpis.total_amount_at_risk),
        "high_risk_category_count": kpis.high_risk_category_count,
    })
}

pub fn supplier_to_json(supplier: &Supplier) -> Value {
    json!({
        "id": supplier.id.as_str(),
        "name": supplier.name,
        "country": supplier.country,
        "supplier_type": supplier.supplier_type,
        "supplier_type_label": supplier.supplier_type.label(),
        "is_domestic": supplier.is_domestic,
        "margin_change": supplier.margin_change,
        "margin_change_display": signed_percent(supplier.margin_change),
        "transit_days": supplier.transit_days,
        "quality_score": supplier.quality_score,
        "cost_per_unit": supplier.cost_per_unit,
        "capacity": supplier.capacity,
        "tariff_rate": supplier.tariff_rate,
        "is_recommended": supplier.is_recommended,
    })
}

pub fn ranked_to_json(ranked: &RankedSupplier<'_>) -> Value {
    json!({
        "rank": ranked.rank,
        "supplier": supplier_to_json(ranked.supplier),
        "annual_savings": ranked.annual_savings,
        "annual_savings_display": compact_currency(ranked.annual_savings),
        "projected_margin": ranked.projected_margin,
        "sustainability_score": ranked.sustainability_score,
        "carbon_footprint": ranked.carbon_footprint,
    })
}

pub fn status_to_json(status: SourcingStatus) -> Value {
    json!({
        "status": status,
        "label": status.label(),
    })
}

pub fn empty_reason_to_json(reason: EmptyReason, sku: &Sku) -> Value {
    json!({
        "reason": reason,
        "headline": reason.headline(),
        "message": reason.message(sku),
    })
}

pub fn ranking_to_json(ranking: &SupplierRanking<'_>, filter: SupplierTypeFilter) -> Value {
    let empty_reason = if ranking.is_empty() {
        Some(empty_reason_to_json(EmptyReason::for_sku(ranking.sku), ranking.sku))
    } else {
        None
    };

    json!({
        "sku_id": ranking.sku.id.as_str(),
        "filter": filter.as_str(),
        "sourcing_status": status_to_json(ranking.sourcing_status()),
        "counts": ranking.counts(),
        "best": ranking.best(filter).map(ranked_to_json),
        "suppliers": ranking
            .filtered(filter)
            .into_iter()
            .map(ranked_to_json)
            .collect::<Vec<_>>(),
        "empty": empty_reason,
    })
}

pub fn scenario_to_json(scenario: Option<TariffScenario>) -> Value {
    match scenario {
        Some(s) => json!({
            "increase": s.increase,
            "projected_loss": s.projected_loss,
            "projected_loss_display": compact_currency(s.projected_loss),
            "margin_impact": s.margin_impact,
            "margin_impact_display": signed_percent(s.margin_impact),
        }),
        None => Value::Null,
    }
}

pub fn option_to_json(option: &NewProductOption<'_>) -> Value {
    json!({
        "supplier_type": option.supplier_type,
        "country": option.country,
        "estimated_margin": option.estimated_margin,
        "risk_score": option.risk_score,
        "transit_days": option.transit_days,
        "tariff_rate": option.tariff_rate,
        "advantages": option.advantages,
        "disadvantages": option.disadvantages,
        "supplier": supplier_to_json(option.supplier),
    })
}

pub fn quick_search_to_json(result: &QuickSearch<'_>) -> Value {
    match result {
        QuickSearch::Inactive => json!({ "kind": "inactive" }),
        QuickSearch::Matches { skus } => json!({
            "kind": "matches",
            "skus": skus.iter().map(|s| sku_to_json(s)).collect::<Vec<_>>(),
        }),
        QuickSearch::NewProduct { term, options } => json!({
            "kind": "new_product",
            "term": term,
            "options": options.iter().map(option_to_json).collect::<Vec<_>>(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_list_params_fall_back() {
        let q = SkuListQuery {
            search: None,
            action: Some("bogus".into()),
            sort: Some("nope".into()),
            dir: Some("sideways".into()),
            page: Some("-4".into()),
        };
        let params = q.to_params(15);
        assert_eq!(params, QueryParams::default());

        let q = SkuListQuery {
            page: Some("abc".into()),
            ..Default::default()
        };
        assert_eq!(q.to_params(10).page, 1);
        assert_eq!(q.to_params(10).page_size, 10);
    }

    #[test]
    fn list_params_are_parsed() {
        let q = SkuListQuery {
            search: Some("china".into()),
            action: Some("shift".into()),
            sort: Some("spend".into()),
            dir: Some("asc".into()),
            page: Some("2".into()),
        };
        let params = q.to_params(15);
        assert_eq!(params.search_text, "china");
        assert_eq!(params.sort_field, SortField::Spend);
        assert_eq!(params.sort_direction, SortDirection::Ascending);
        assert_eq!(params.page, 2);
    }

    #[test]
    fn scenario_increase_defaults_on_garbage() {
        assert_eq!(ScenarioQuery { increase: Some("x".into()) }.increase(), 5.0);
        assert_eq!(ScenarioQuery { increase: Some("12.5".into()) }.increase(), 12.5);
    }
}
