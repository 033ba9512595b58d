//! Alternative-supplier ranking for a single SKU.
//!
//! Candidates come from the SKU→supplier mapping. Order: domestic first, then
//! regional-treaty ahead of international, then highest margin change. The
//! sort is stable, so suppliers with equal margin change keep the order of the
//! supplier collection.

use core::cmp::Ordering;

use serde::Serialize;

use tariffwatch_catalog::{Sku, SkuSupplierMapping, Supplier, SupplierType};

/// Projected annual savings of switching `sku` to `supplier`, in dollars.
///
/// Multiplies before dividing so that round percentages stay exact
/// (10,000,000 at +2.5 % is exactly 250,000).
pub fn annual_savings(sku: &Sku, supplier: &Supplier) -> f64 {
    sku.spend * supplier.margin_change / 100.0
}

/// Pairwise ranking rule, applied in priority order.
pub fn compare_suppliers(a: &Supplier, b: &Supplier) -> Ordering {
    match (a.is_domestic, b.is_domestic) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => match (a.supplier_type, b.supplier_type) {
            (SupplierType::RegionalTreaty, SupplierType::International) => return Ordering::Less,
            (SupplierType::International, SupplierType::RegionalTreaty) => {
                return Ordering::Greater;
            }
            _ => {}
        },
        (true, true) => {}
    }
    b.margin_change.total_cmp(&a.margin_change)
}

/// Secondary filter over an already-ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupplierTypeFilter {
    #[default]
    All,
    Only(SupplierType),
}

impl SupplierTypeFilter {
    /// Unrecognized values mean no filtering.
    pub fn parse_or_all(raw: &str) -> Self {
        SupplierType::parse(raw).map_or(SupplierTypeFilter::All, SupplierTypeFilter::Only)
    }

    pub fn matches(&self, supplier: &Supplier) -> bool {
        match self {
            SupplierTypeFilter::All => true,
            SupplierTypeFilter::Only(kind) => supplier.is_of_type(*kind),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierTypeFilter::All => "all",
            SupplierTypeFilter::Only(kind) => kind.as_str(),
        }
    }
}

/// A ranked candidate with the figures derived for the current SKU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSupplier<'a> {
    pub rank: usize,
    pub supplier: &'a Supplier,
    pub annual_savings: f64,
    /// SKU margin after switching: current margin plus the supplier's margin change.
    pub projected_margin: f64,
    pub sustainability_score: u8,
    pub carbon_footprint: f64,
}

/// Per-type candidate counts, shown on the type filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SupplierTypeCounts {
    pub all: usize,
    pub domestic: usize,
    pub regional_treaty: usize,
    pub international: usize,
}

/// Why a SKU has no ranked alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// Risk below 60: current sourcing needs no change.
    AlreadyOptimal,
    /// Risk 60 or above, but the network has nobody to switch to.
    NoAlternatives,
}

impl EmptyReason {
    pub fn for_sku(sku: &Sku) -> Self {
        if sku.total_risk.is_elevated() {
            EmptyReason::NoAlternatives
        } else {
            EmptyReason::AlreadyOptimal
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            EmptyReason::AlreadyOptimal => "Current Sourcing is Optimal",
            EmptyReason::NoAlternatives => "No Alternative Suppliers Available",
        }
    }

    pub fn message(&self, sku: &Sku) -> String {
        match self {
            EmptyReason::AlreadyOptimal => format!(
                "This SKU has a low risk score ({}) and doesn't require alternative sourcing at this time.",
                sku.total_risk
            ),
            EmptyReason::NoAlternatives => format!(
                "While this SKU has elevated risk ({}), no viable alternative suppliers are currently available in our network.",
                sku.total_risk
            ),
        }
    }
}

/// How the SKU is sourced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourcingStatus {
    Domestic,
    LowRiskInternational,
    HighRiskInternational,
}

impl SourcingStatus {
    pub fn for_sku(sku: &Sku) -> Self {
        if sku.is_domestic {
            SourcingStatus::Domestic
        } else if sku.total_risk.is_elevated() {
            SourcingStatus::HighRiskInternational
        } else {
            SourcingStatus::LowRiskInternational
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourcingStatus::Domestic => "Domestic sourcing",
            SourcingStatus::LowRiskInternational => "Low-risk international sourcing",
            SourcingStatus::HighRiskInternational => "High-risk international sourcing",
        }
    }
}

/// Outcome of a ranking: either a non-empty list or an explicit reason.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankingOutcome<'r, 'a> {
    Ranked(&'r [RankedSupplier<'a>]),
    Empty(EmptyReason),
}

/// Ranked alternatives for one SKU.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierRanking<'a> {
    pub sku: &'a Sku,
    pub ranked: Vec<RankedSupplier<'a>>,
}

impl<'a> SupplierRanking<'a> {
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn outcome(&self) -> RankingOutcome<'_, 'a> {
        if self.ranked.is_empty() {
            RankingOutcome::Empty(EmptyReason::for_sku(self.sku))
        } else {
            RankingOutcome::Ranked(&self.ranked)
        }
    }

    /// Ranked entries matching `filter`, in rank order.
    pub fn filtered(&self, filter: SupplierTypeFilter) -> Vec<&RankedSupplier<'a>> {
        self.ranked
            .iter()
            .filter(|r| filter.matches(r.supplier))
            .collect()
    }

    /// Top entry for `filter`: the headline recommendation.
    pub fn best(&self, filter: SupplierTypeFilter) -> Option<&RankedSupplier<'a>> {
        self.ranked.iter().find(|r| filter.matches(r.supplier))
    }

    pub fn counts(&self) -> SupplierTypeCounts {
        let count = |kind| {
            self.ranked
                .iter()
                .filter(|r| SupplierTypeFilter::Only(kind).matches(r.supplier))
                .count()
        };
        SupplierTypeCounts {
            all: self.ranked.len(),
            domestic: count(SupplierType::Domestic),
            regional_treaty: count(SupplierType::RegionalTreaty),
            international: count(SupplierType::International),
        }
    }

    pub fn sourcing_status(&self) -> SourcingStatus {
        SourcingStatus::for_sku(self.sku)
    }
}

/// Rank the eligible alternative suppliers for `sku`.
///
/// Candidates keep supplier-collection order before sorting; mapped ids
/// missing from `suppliers` are skipped.
pub fn rank_suppliers<'a>(
    sku: &'a Sku,
    suppliers: &'a [Supplier],
    mapping: &SkuSupplierMapping,
) -> SupplierRanking<'a> {
    let eligible = mapping.suppliers_for(&sku.id);

    let mut candidates: Vec<&'a Supplier> = suppliers
        .iter()
        .filter(|s| eligible.contains(&s.id))
        .collect();
    candidates.sort_by(|a, b| compare_suppliers(a, b));

    if candidates.len() < eligible.len() {
        tracing::debug!(
            sku = %sku.id,
            mapped = eligible.len(),
            resolved = candidates.len(),
            "some mapped suppliers did not resolve"
        );
    }

    let ranked = candidates
        .into_iter()
        .enumerate()
        .map(|(i, supplier)| RankedSupplier {
            rank: i + 1,
            supplier,
            annual_savings: annual_savings(sku, supplier),
            projected_margin: sku.current_margin + supplier.margin_change,
            sustainability_score: supplier.sustainability_or_default(),
            carbon_footprint: supplier.carbon_footprint_or_default(),
        })
        .collect();

    SupplierRanking { sku, ranked }
}
