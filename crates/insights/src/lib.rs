//! `tariffwatch-insights`
//!
//! Pure, synchronous computations over the sourcing catalog: the dashboard
//! query pipeline, alternative-supplier ranking, overview KPIs, tariff
//! scenarios and display formatting.
//!
//! Nothing here holds state or performs I/O. Callers pass the catalog
//! collections in and get borrowed views back.

pub mod format;
pub mod overview;
pub mod query;
pub mod ranking;
pub mod scenario;

pub use overview::{NewProductOption, OverviewKpis, QuickSearch, kpis, quick_search};
pub use query::{
    ActionFilter, DEFAULT_PAGE_SIZE, QueryPage, QueryParams, SortDirection, SortField, query,
};
pub use ranking::{
    EmptyReason, RankedSupplier, RankingOutcome, SourcingStatus, SupplierRanking,
    SupplierTypeCounts, SupplierTypeFilter, rank_suppliers,
};
pub use scenario::{TariffScenario, tariff_scenario};
