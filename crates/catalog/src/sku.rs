use serde::{Deserialize, Serialize};

use tariffwatch_core::{DomainError, DomainResult, Entity, SkuId, ValueObject};

/// Risk score at or above which a SKU is considered for alternative sourcing.
pub const ELEVATED_RISK_THRESHOLD: u8 = 60;

/// Risk score at or above which a SKU is high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 80;

/// Recommended sourcing action for a SKU or category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcingAction {
    Shift,
    Monitor,
    Maintain,
}

impl SourcingAction {
    pub const ALL: [SourcingAction; 3] = [
        SourcingAction::Shift,
        SourcingAction::Monitor,
        SourcingAction::Maintain,
    ];

    /// Wire name (`shift`, `monitor`, `maintain`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SourcingAction::Shift => "shift",
            SourcingAction::Monitor => "monitor",
            SourcingAction::Maintain => "maintain",
        }
    }

    /// Human-readable label shown on action pills.
    pub fn label(&self) -> &'static str {
        match self {
            SourcingAction::Shift => "Shift Sourcing",
            SourcingAction::Monitor => "Monitor",
            SourcingAction::Maintain => "Maintain",
        }
    }

    /// Lenient parse of a wire name; unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
    }
}

impl core::fmt::Display for SourcingAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk band derived from a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Composite risk rating in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskScore(u8);

impl ValueObject for RiskScore {}

impl RiskScore {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> DomainResult<Self> {
        if value > Self::MAX {
            return Err(DomainError::validation(format!(
                "risk score {value} exceeds {}",
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn level(&self) -> RiskLevel {
        if self.0 >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if self.0 >= ELEVATED_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Whether the score is high enough that alternative sourcing is expected.
    pub fn is_elevated(&self) -> bool {
        self.0 >= ELEVATED_RISK_THRESHOLD
    }

    pub fn is_high(&self) -> bool {
        self.0 >= HIGH_RISK_THRESHOLD
    }
}

impl core::fmt::Display for RiskScore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stock-keeping unit tracked for sourcing risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub id: SkuId,
    pub name: String,
    pub category: String,
    /// Origin country or region (`"China"`, `"USA - Ohio"`).
    pub origin: String,
    pub is_domestic: bool,
    /// Annual spend in dollars.
    pub spend: f64,
    /// Current margin, percent.
    pub current_margin: f64,
    /// Cost increase attributable to import duties, percent.
    pub tariff_impact: f64,
    pub total_risk: RiskScore,
    pub action: SourcingAction,
}

impl Entity for Sku {
    type Id = SkuId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Sku {
    pub fn risk_level(&self) -> RiskLevel {
        self.total_risk.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_follow_thresholds() {
        assert_eq!(RiskScore::new(80).unwrap().level(), RiskLevel::High);
        assert_eq!(RiskScore::new(79).unwrap().level(), RiskLevel::Medium);
        assert_eq!(RiskScore::new(60).unwrap().level(), RiskLevel::Medium);
        assert_eq!(RiskScore::new(59).unwrap().level(), RiskLevel::Low);
        assert_eq!(RiskScore::new(0).unwrap().level(), RiskLevel::Low);
    }

    #[test]
    fn risk_score_rejects_values_above_100() {
        assert!(RiskScore::new(100).is_ok());
        assert!(matches!(RiskScore::new(101), Err(DomainError::Validation(_))));
    }

    #[test]
    fn action_parse_is_lenient() {
        assert_eq!(SourcingAction::parse("shift"), Some(SourcingAction::Shift));
        assert_eq!(SourcingAction::parse(" Monitor "), Some(SourcingAction::Monitor));
        assert_eq!(SourcingAction::parse("MAINTAIN"), Some(SourcingAction::Maintain));
        assert_eq!(SourcingAction::parse("all"), None);
        assert_eq!(SourcingAction::parse("relocate"), None);
    }

    #[test]
    fn action_labels() {
        assert_eq!(SourcingAction::Shift.label(), "Shift Sourcing");
        assert_eq!(SourcingAction::Maintain.to_string(), "maintain");
    }

    #[test]
    fn sku_deserializes_from_fixture_shape() {
        let json = r#"{
            "id": "SKU-9",
            "name": "Desk Lamp",
            "category": "Home & Kitchen",
            "origin": "China",
            "is_domestic": false,
            "spend": 1500000,
            "current_margin": 33.5,
            "tariff_impact": 25.0,
            "total_risk": 72,
            "action": "monitor"
        }"#;
        let sku: Sku = serde_json::from_str(json).unwrap();
        assert_eq!(sku.id.as_str(), "SKU-9");
        assert_eq!(sku.spend, 1_500_000.0);
        assert_eq!(sku.risk_level(), RiskLevel::Medium);
        assert_eq!(sku.action, SourcingAction::Monitor);
    }
}
