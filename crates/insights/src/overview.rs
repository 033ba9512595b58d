//! Portfolio overview: headline KPIs, categories needing attention, and the
//! quick search with its new-product fallback.

use serde::Serialize;

use tariffwatch_catalog::{Category, Sku, Supplier, SupplierType};

/// Quick search stays inactive until the term is longer than this.
pub const QUICK_SEARCH_MIN_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewKpis {
    pub total_skus: usize,
    /// Share of SKUs with risk ≥ 80, rounded to a whole percent.
    pub high_risk_percentage: u32,
    pub total_amount_at_risk: f64,
    pub high_risk_category_count: usize,
}

pub fn high_risk_percentage(skus: &[Sku]) -> u32 {
    if skus.is_empty() {
        return 0;
    }
    let high = skus.iter().filter(|s| s.total_risk.is_high()).count();
    (high as f64 * 100.0 / skus.len() as f64).round() as u32
}

/// Categories with risk ≥ 70 whose action is not maintain, in fixture order.
pub fn high_risk_categories(categories: &[Category]) -> Vec<&Category> {
    categories.iter().filter(|c| c.needs_attention()).collect()
}

pub fn kpis(skus: &[Sku], categories: &[Category]) -> OverviewKpis {
    OverviewKpis {
        total_skus: skus.len(),
        high_risk_percentage: high_risk_percentage(skus),
        total_amount_at_risk: categories.iter().map(|c| c.amount_at_risk).sum(),
        high_risk_category_count: high_risk_categories(categories).len(),
    }
}

/// One sourcing route for a product not yet in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProductOption<'a> {
    pub supplier_type: SupplierType,
    /// Supplier country, suffixed with the treaty label for regional suppliers.
    pub country: String,
    pub estimated_margin: f64,
    pub risk_score: u8,
    pub transit_days: u32,
    pub tariff_rate: f64,
    pub advantages: &'static [&'static str],
    pub disadvantages: &'static [&'static str],
    pub supplier: &'a Supplier,
}

struct RouteProfile {
    kind: SupplierType,
    baseline_margin: f64,
    risk_score: u8,
    advantages: &'static [&'static str],
    disadvantages: &'static [&'static str],
}

const ROUTES: [RouteProfile; 3] = [
    RouteProfile {
        kind: SupplierType::Domestic,
        baseline_margin: 38.5,
        risk_score: 15,
        advantages: &[
            "No tariffs",
            "Fast delivery",
            "High quality control",
            "Political stability",
            "Easy communication",
        ],
        disadvantages: &["Higher labor costs", "Limited capacity for some products"],
    },
    RouteProfile {
        kind: SupplierType::RegionalTreaty,
        baseline_margin: 42.2,
        risk_score: 25,
        advantages: &[
            "Lower costs than domestic",
            "NAFTA benefits",
            "Good logistics",
            "Established suppliers",
        ],
        disadvantages: &["Some tariffs", "Longer transit", "Currency fluctuation"],
    },
    RouteProfile {
        kind: SupplierType::International,
        baseline_margin: 48.5,
        risk_score: 45,
        advantages: &[
            "Very competitive costs",
            "Growing manufacturing base",
            "Good for electronics",
        ],
        disadvantages: &[
            "Higher tariffs",
            "Long transit times",
            "Quality control challenges",
        ],
    },
];

/// Supplier of `kind` with the highest margin change; the first one wins ties.
fn best_of_type(suppliers: &[Supplier], kind: SupplierType) -> Option<&Supplier> {
    suppliers
        .iter()
        .filter(|s| s.is_of_type(kind))
        .fold(None, |best: Option<&Supplier>, s| match best {
            Some(b) if b.margin_change >= s.margin_change => Some(b),
            _ => Some(s),
        })
}

/// Domestic, regional-treaty and international routes, skipping types with no
/// suppliers.
pub fn new_product_options(suppliers: &[Supplier]) -> Vec<NewProductOption<'_>> {
    ROUTES
        .iter()
        .filter_map(|route| {
            let best = best_of_type(suppliers, route.kind)?;
            let country = match route.kind {
                SupplierType::RegionalTreaty => format!("{} ({})", best.country, route.kind.label()),
                _ => best.country.clone(),
            };
            let tariff_rate = match route.kind {
                SupplierType::Domestic => 0.0,
                _ => best.tariff_rate,
            };
            Some(NewProductOption {
                supplier_type: route.kind,
                country,
                estimated_margin: route.baseline_margin + best.margin_change,
                risk_score: route.risk_score,
                transit_days: best.transit_days,
                tariff_rate,
                advantages: route.advantages,
                disadvantages: route.disadvantages,
                supplier: best,
            })
        })
        .collect()
}

/// Result of a quick search on the overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuickSearch<'a> {
    /// Term too short; nothing is shown.
    Inactive,
    Matches { skus: Vec<&'a Sku> },
    /// No SKU matched: offer sourcing routes for a new product instead.
    NewProduct {
        term: String,
        options: Vec<NewProductOption<'a>>,
    },
}

impl QuickSearch<'_> {
    pub fn is_active(&self) -> bool {
        !matches!(self, QuickSearch::Inactive)
    }
}

pub fn is_active_term(term: &str) -> bool {
    term.chars().count() > QUICK_SEARCH_MIN_LEN
}

/// Match `term` against SKU name, category or id, case-insensitively.
pub fn quick_search<'a>(term: &str, skus: &'a [Sku], suppliers: &'a [Supplier]) -> QuickSearch<'a> {
    if !is_active_term(term) {
        return QuickSearch::Inactive;
    }

    let needle = term.to_lowercase();
    let matches: Vec<&Sku> = skus
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&needle)
                || s.category.to_lowercase().contains(&needle)
                || s.id.as_str().to_lowercase().contains(&needle)
        })
        .collect();

    tracing::debug!(term, matches = matches.len(), "quick search");

    if matches.is_empty() {
        QuickSearch::NewProduct {
            term: term.to_string(),
            options: new_product_options(suppliers),
        }
    } else {
        QuickSearch::Matches { skus: matches }
    }
}
