//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers (one file per page of the product)
//! - `dto.rs`: query-string DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;
use std::time::Duration;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use tariffwatch_catalog::{Catalog, FixtureError};
use tariffwatch_session::{DelayedLoad, LatencyProfile};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub page_size: usize,
    pub latency: LatencyProfile,
}

impl AppState {
    pub fn new(catalog: Catalog, page_size: usize) -> Self {
        Self {
            catalog: Arc::new(catalog),
            page_size,
            latency: LatencyProfile::instant(),
        }
    }

    pub fn with_latency(mut self, latency: LatencyProfile) -> Self {
        self.latency = latency;
        self
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, FixtureError> {
        let catalog = match &config.fixtures {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading fixtures from file");
                Catalog::from_path(path)?
            }
            None => Catalog::embedded()?,
        };
        let latency = if config.simulate_latency {
            LatencyProfile::default()
        } else {
            LatencyProfile::instant()
        };
        Ok(Self::new(catalog, config.page_size).with_latency(latency))
    }
}

/// Compute a response section after its configured loading delay.
///
/// Each request gets its own load, so concurrent requests never supersede
/// one another; a `None` from the load is reported as unavailable.
pub(crate) async fn load_section<T>(
    name: &'static str,
    delay: Duration,
    compute: impl FnOnce() -> T,
) -> Result<T, axum::response::Response> {
    DelayedLoad::new(name, delay).run(compute).await.ok_or_else(|| {
        errors::json_error(
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            "load_superseded",
            format!("{name} load was superseded"),
        )
    })
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_request))
                .layer(Extension(Arc::new(state))),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sections_wait_out_their_delay() {
        let latency = LatencyProfile::default();
        let start = tokio::time::Instant::now();
        let value = load_section("alternatives", latency.alternatives, || 3).await;
        assert_eq!(value.ok(), Some(3));
        assert!(start.elapsed() >= Duration::from_millis(2200));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_requests_do_not_supersede_each_other() {
        let delay = LatencyProfile::default().table;
        let (a, b) = tokio::join!(
            load_section("table", delay, || "a"),
            load_section("table", delay, || "b"),
        );
        assert_eq!(a.ok(), Some("a"));
        assert_eq!(b.ok(), Some("b"));
    }
}
