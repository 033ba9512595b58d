//! Environment-driven server configuration.
//!
//! Missing values take defaults. Invalid values also take defaults and are
//! reported at `warn`; configuration never stops the server from starting.

use std::net::SocketAddr;
use std::path::PathBuf;

use tariffwatch_insights::DEFAULT_PAGE_SIZE;

pub const BIND_ENV: &str = "TARIFFWATCH_BIND";
pub const PAGE_SIZE_ENV: &str = "TARIFFWATCH_PAGE_SIZE";
pub const FIXTURES_ENV: &str = "TARIFFWATCH_FIXTURES";
pub const SIMULATE_LATENCY_ENV: &str = "TARIFFWATCH_SIMULATE_LATENCY";

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub page_size: usize,
    /// JSON fixture file; the embedded set is used when unset.
    pub fixtures: Option<PathBuf>,
    /// Delay responses by the dashboard's loading times.
    pub simulate_latency: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            page_size: DEFAULT_PAGE_SIZE,
            fixtures: None,
            simulate_latency: false,
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind = match lookup(BIND_ENV) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid {BIND_ENV}; using {DEFAULT_BIND}");
                default_bind()
            }),
            None => default_bind(),
        };

        let page_size = match lookup(PAGE_SIZE_ENV) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(value = %raw, "invalid {PAGE_SIZE_ENV}; using {DEFAULT_PAGE_SIZE}");
                    DEFAULT_PAGE_SIZE
                }
            },
            None => DEFAULT_PAGE_SIZE,
        };

        let fixtures = lookup(FIXTURES_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        let simulate_latency = match lookup(SIMULATE_LATENCY_ENV) {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    tracing::warn!(value = %raw, "invalid {SIMULATE_LATENCY_ENV}; latency simulation off");
                    false
                }
            },
            None => false,
        };

        Self {
            bind,
            page_size,
            fixtures,
            simulate_latency,
        }
    }
}
