//! HTTP API: a read-only JSON view of the sourcing insights.

pub mod app;
pub mod config;
pub mod middleware;

pub use config::ApiConfig;
