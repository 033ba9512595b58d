//! Fixture provider: the immutable SKU, supplier and category collections.
//!
//! The default fixture set is embedded at compile time. A JSON file with the
//! same shape can replace it (see `Catalog::from_path`).

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tariffwatch_core::{DomainError, Entity, SkuId, SupplierId};

use crate::category::Category;
use crate::mapping::SkuSupplierMapping;
use crate::sku::{RiskScore, Sku};
use crate::supplier::{Supplier, SupplierType};

/// The fixture set compiled into the crate.
pub const EMBEDDED_FIXTURES: &str = include_str!("../fixtures/catalog.json");

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixtures from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid fixture data: {0}")]
    Invalid(#[from] DomainError),
}

/// Read-only access to the sourcing fixtures.
///
/// Every consumer shares the same immutable collections; nothing here hands
/// out mutable access.
pub trait FixtureProvider: Send + Sync {
    fn skus(&self) -> &[Sku];
    fn suppliers(&self) -> &[Supplier];
    fn categories(&self) -> &[Category];
    fn mapping(&self) -> &SkuSupplierMapping;

    fn find_sku(&self, id: &str) -> Option<&Sku> {
        self.skus().iter().find(|s| s.id.as_str() == id)
    }

    fn find_supplier(&self, id: &str) -> Option<&Supplier> {
        self.suppliers().iter().find(|s| s.id.as_str() == id)
    }
}

impl<P> FixtureProvider for Arc<P>
where
    P: FixtureProvider + ?Sized,
{
    fn skus(&self) -> &[Sku] {
        (**self).skus()
    }

    fn suppliers(&self) -> &[Supplier] {
        (**self).suppliers()
    }

    fn categories(&self) -> &[Category] {
        (**self).categories()
    }

    fn mapping(&self) -> &SkuSupplierMapping {
        (**self).mapping()
    }
}

/// Serialized form of the fixtures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    pub as_of: DateTime<Utc>,
    pub skus: Vec<Sku>,
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub sku_suppliers: SkuSupplierMapping,
}

/// Validated, in-memory fixture provider.
#[derive(Debug, Clone)]
pub struct Catalog {
    as_of: DateTime<Utc>,
    skus: Vec<Sku>,
    suppliers: Vec<Supplier>,
    categories: Vec<Category>,
    mapping: SkuSupplierMapping,
}

impl Catalog {
    /// Load the fixture set compiled into the binary.
    pub fn embedded() -> Result<Self, FixtureError> {
        Self::from_json_str(EMBEDDED_FIXTURES)
    }

    pub fn from_json_str(json: &str) -> Result<Self, FixtureError> {
        let set: FixtureSet = serde_json::from_str(json)?;
        Self::from_fixture_set(set)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Validate and wrap a fixture set.
    ///
    /// Mapping entries that reference unknown suppliers are kept (lookups
    /// skip them) and reported at `warn`.
    pub fn from_fixture_set(set: FixtureSet) -> Result<Self, FixtureError> {
        validate_skus(&set.skus)?;
        validate_suppliers(&set.suppliers)?;
        for category in &set.categories {
            RiskScore::new(category.risk_score.value()).map_err(|e| {
                DomainError::validation(format!("category {}: {e}", category.name))
            })?;
        }

        for (sku, supplier) in set.sku_suppliers.dangling_references(&set.suppliers) {
            tracing::warn!(%sku, %supplier, "mapping references unknown supplier; it will be skipped");
        }
        let known_skus: HashSet<&SkuId> = set.skus.iter().map(|s| &s.id).collect();
        for (sku, _) in set.sku_suppliers.iter() {
            if !known_skus.contains(sku) {
                tracing::warn!(%sku, "mapping entry for unknown sku");
            }
        }

        tracing::info!(
            skus = set.skus.len(),
            suppliers = set.suppliers.len(),
            categories = set.categories.len(),
            mapped_skus = set.sku_suppliers.len(),
            as_of = %set.as_of,
            "catalog loaded"
        );

        Ok(Self {
            as_of: set.as_of,
            skus: set.skus,
            suppliers: set.suppliers,
            categories: set.categories,
            mapping: set.sku_suppliers,
        })
    }

    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }
}

impl FixtureProvider for Catalog {
    fn skus(&self) -> &[Sku] {
        &self.skus
    }

    fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn mapping(&self) -> &SkuSupplierMapping {
        &self.mapping
    }
}

/// Reject records sharing an identifier.
fn ensure_unique<E>(records: &[E], what: &str) -> Result<(), DomainError>
where
    E: Entity,
    E::Id: core::fmt::Display,
{
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            return Err(DomainError::invariant(format!("duplicate {what} id {}", record.id())));
        }
    }
    Ok(())
}

fn validate_skus(skus: &[Sku]) -> Result<(), DomainError> {
    for sku in skus {
        sku.id.as_str().parse::<SkuId>()?;
        RiskScore::new(sku.total_risk.value())
            .map_err(|e| DomainError::validation(format!("sku {}: {e}", sku.id)))?;
        for (field, value) in [
            ("spend", sku.spend),
            ("current_margin", sku.current_margin),
            ("tariff_impact", sku.tariff_impact),
        ] {
            if !value.is_finite() {
                return Err(DomainError::validation(format!(
                    "sku {}: {field} is not a finite number",
                    sku.id
                )));
            }
        }
        if sku.spend < 0.0 {
            return Err(DomainError::validation(format!(
                "sku {}: spend must not be negative",
                sku.id
            )));
        }
    }
    ensure_unique(skus, "sku")
}

fn validate_suppliers(suppliers: &[Supplier]) -> Result<(), DomainError> {
    for supplier in suppliers {
        supplier.id.as_str().parse::<SupplierId>()?;
        // Ranking relies on the flag and the type agreeing.
        if supplier.is_domestic != (supplier.supplier_type == SupplierType::Domestic) {
            return Err(DomainError::invariant(format!(
                "supplier {}: is_domestic={} disagrees with type {}",
                supplier.id, supplier.is_domestic, supplier.supplier_type
            )));
        }
        if !supplier.margin_change.is_finite() {
            return Err(DomainError::validation(format!(
                "supplier {}: margin_change is not a finite number",
                supplier.id
            )));
        }
    }
    ensure_unique(suppliers, "supplier")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_set() -> serde_json::Value {
        serde_json::json!({
            "as_of": "2025-06-30T00:00:00Z",
            "skus": [{
                "id": "SKU-1", "name": "Kettle", "category": "Home & Kitchen",
                "origin": "China", "is_domestic": false, "spend": 1000000,
                "current_margin": 30.0, "tariff_impact": 25.0, "total_risk": 70,
                "action": "monitor"
            }],
            "suppliers": [{
                "id": "SUP-1", "name": "Great Lakes Housewares", "country": "USA - Michigan",
                "supplier_type": "domestic", "is_domestic": true, "margin_change": 2.6,
                "transit_days": 3, "quality_score": 93, "cost_per_unit": 11.75,
                "capacity": 60000, "tariff_rate": 0.0, "annual_savings": 1100000
            }],
            "sku_suppliers": { "SKU-1": ["SUP-1", "SUP-404"] }
        })
    }

    #[test]
    fn embedded_fixtures_load() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.skus().len(), 37);
        assert_eq!(catalog.suppliers().len(), 14);
        assert_eq!(catalog.categories().len(), 6);
        assert!(catalog.mapping().contains(&SkuId::new("SKU-1001")));
        assert!(catalog.find_sku("SKU-4004").unwrap().is_domestic);
        assert!(catalog.find_supplier("SUP-005").is_some());
    }

    #[test]
    fn dangling_mapping_reference_is_tolerated() {
        let catalog = Catalog::from_json_str(&minimal_set().to_string()).unwrap();
        assert_eq!(
            catalog.mapping().suppliers_for(&SkuId::new("SKU-1")).len(),
            2
        );
        assert!(catalog.categories().is_empty());
    }

    #[test]
    fn duplicate_sku_ids_are_rejected() {
        let mut set = minimal_set();
        let sku = set["skus"][0].clone();
        set["skus"].as_array_mut().unwrap().push(sku);
        let err = Catalog::from_json_str(&set.to_string()).unwrap_err();
        assert!(matches!(err, FixtureError::Invalid(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn out_of_range_risk_is_rejected() {
        let mut set = minimal_set();
        set["skus"][0]["total_risk"] = serde_json::json!(140);
        let err = Catalog::from_json_str(&set.to_string()).unwrap_err();
        assert!(matches!(err, FixtureError::Invalid(DomainError::Validation(_))));
    }

    #[test]
    fn inconsistent_domestic_flag_is_rejected() {
        let mut set = minimal_set();
        set["suppliers"][0]["is_domestic"] = serde_json::json!(false);
        let err = Catalog::from_json_str(&set.to_string()).unwrap_err();
        assert!(err.to_string().contains("disagrees"));
    }

    #[test]
    fn whitespace_in_ids_is_rejected() {
        let mut set = minimal_set();
        set["skus"][0]["id"] = serde_json::json!("SKU 1");
        let err = Catalog::from_json_str(&set.to_string()).unwrap_err();
        assert!(matches!(err, FixtureError::Invalid(DomainError::InvalidId(_))));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Catalog::from_json_str("{ not json"),
            Err(FixtureError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = Catalog::from_path("/nonexistent/catalog.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn shared_provider_delegates() {
        let shared: Arc<Catalog> = Arc::new(Catalog::embedded().unwrap());
        assert_eq!(FixtureProvider::skus(&shared).len(), 37);
        assert!(shared.find_sku("SKU-1001").is_some());
    }
}
