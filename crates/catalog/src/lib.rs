//! Sourcing catalog: SKU, supplier and category records plus the fixture
//! provider that serves them.
//!
//! Everything here is immutable once loaded. Records are read models: plain
//! data with public fields, validated once at load time.

pub mod category;
pub mod fixtures;
pub mod mapping;
pub mod sku;
pub mod supplier;

pub use category::Category;
pub use fixtures::{Catalog, FixtureError, FixtureProvider, FixtureSet};
pub use mapping::SkuSupplierMapping;
pub use sku::{RiskLevel, RiskScore, Sku, SourcingAction};
pub use supplier::{Supplier, SupplierType, DEFAULT_CARBON_FOOTPRINT, DEFAULT_SUSTAINABILITY_SCORE};
