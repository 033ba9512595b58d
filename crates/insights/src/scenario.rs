//! "What if tariffs rise further?" projection for a single imported SKU.

use serde::Serialize;

use tariffwatch_catalog::Sku;

pub const MIN_TARIFF_INCREASE: f64 = 5.0;
pub const MAX_TARIFF_INCREASE: f64 = 20.0;
pub const DEFAULT_TARIFF_INCREASE: f64 = MIN_TARIFF_INCREASE;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TariffScenario {
    /// Additional tariff, percentage points.
    pub increase: f64,
    /// Spend lost to the additional tariff, dollars per year.
    pub projected_loss: f64,
    /// Change to the SKU margin, percentage points.
    pub margin_impact: f64,
}

/// Clamp a requested increase to 5..=20; non-finite input falls back to the default.
pub fn clamp_increase(raw: f64) -> f64 {
    if raw.is_finite() {
        raw.clamp(MIN_TARIFF_INCREASE, MAX_TARIFF_INCREASE)
    } else {
        DEFAULT_TARIFF_INCREASE
    }
}

/// Project the effect of a further tariff increase. Domestic SKUs pay no
/// tariff and get no scenario.
pub fn tariff_scenario(sku: &Sku, increase: f64) -> Option<TariffScenario> {
    if sku.is_domestic {
        return None;
    }
    let increase = clamp_increase(increase);
    Some(TariffScenario {
        increase,
        projected_loss: sku.spend * increase / 100.0,
        margin_impact: -increase,
    })
}
