use serde::{Deserialize, Serialize};

use crate::sku::{RiskScore, SourcingAction};

/// Aggregate risk view of a product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub risk_score: RiskScore,
    /// Spend exposed to the category's risk, dollars.
    pub amount_at_risk: f64,
    pub action: SourcingAction,
    #[serde(default)]
    pub high_risk_countries: Vec<String>,
}

impl Category {
    /// Categories needing attention on the overview: risk ≥ 70 and an action
    /// other than maintain.
    pub fn needs_attention(&self) -> bool {
        self.risk_score.value() >= 70 && self.action != SourcingAction::Maintain
    }
}
