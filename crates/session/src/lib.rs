//! `tariffwatch-session`
//!
//! Transient per-viewer UI state: which page of the dashboard is showing,
//! which SKU is open, which tab and filter are selected, and whether a
//! simulated load is still pending.
//!
//! Views hold parameters only. Results are recomputed from the catalog on
//! demand by `tariffwatch-insights`.

pub mod dashboard;
pub mod detail;
pub mod latency;
pub mod overview;

pub use dashboard::DashboardView;
pub use detail::{AlternativesState, DetailTab, DetailView};
pub use latency::{DelayedLoad, LatencyProfile, LoadGate, LoadPhase, LoadTicket};
pub use overview::OverviewView;
