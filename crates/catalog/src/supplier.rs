use serde::{Deserialize, Serialize};

use tariffwatch_core::{Entity, SupplierId};

/// Sustainability score assumed when a supplier has none on record.
pub const DEFAULT_SUSTAINABILITY_SCORE: u8 = 75;

/// Carbon footprint (tonnes CO₂) assumed when a supplier has none on record.
pub const DEFAULT_CARBON_FOOTPRINT: f64 = 5.2;

/// Where a supplier sits relative to current trade agreements.
///
/// Variant order is ranking order: domestic first, then regional-treaty
/// (e.g. USMCA), then other international suppliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierType {
    Domestic,
    #[serde(alias = "nafta")]
    RegionalTreaty,
    International,
}

impl SupplierType {
    pub const ALL: [SupplierType; 3] = [
        SupplierType::Domestic,
        SupplierType::RegionalTreaty,
        SupplierType::International,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierType::Domestic => "domestic",
            SupplierType::RegionalTreaty => "regional_treaty",
            SupplierType::International => "international",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SupplierType::Domestic => "Domestic",
            SupplierType::RegionalTreaty => "NAFTA/USMCA",
            SupplierType::International => "International",
        }
    }

    /// Lenient parse; accepts `nafta`, `regional`, `regional-treaty` for the
    /// treaty tier.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domestic" => Some(SupplierType::Domestic),
            "regional_treaty" | "regional-treaty" | "regional" | "nafta" | "usmca" => {
                Some(SupplierType::RegionalTreaty)
            }
            "international" => Some(SupplierType::International),
            _ => None,
        }
    }
}

impl core::fmt::Display for SupplierType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate supplier for one or more SKUs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    #[serde(alias = "supplier_name")]
    pub name: String,
    pub country: String,
    pub supplier_type: SupplierType,
    pub is_domestic: bool,
    /// Margin change relative to current sourcing, signed percent.
    pub margin_change: f64,
    pub transit_days: u32,
    pub quality_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_score: Option<u8>,
    /// Tonnes CO₂ per year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_footprint: Option<f64>,
    pub cost_per_unit: f64,
    /// Units per month.
    pub capacity: u32,
    /// Applicable tariff rate, percent.
    pub tariff_rate: f64,
    /// Supplier-reported annual savings estimate, dollars.
    pub annual_savings: f64,
    #[serde(default)]
    pub is_recommended: bool,
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Supplier {
    pub fn sustainability_or_default(&self) -> u8 {
        self.sustainability_score
            .unwrap_or(DEFAULT_SUSTAINABILITY_SCORE)
    }

    pub fn carbon_footprint_or_default(&self) -> f64 {
        self.carbon_footprint.unwrap_or(DEFAULT_CARBON_FOOTPRINT)
    }

    /// Domestic is decided by the `is_domestic` flag; the other kinds by
    /// `supplier_type`.
    pub fn is_of_type(&self, kind: SupplierType) -> bool {
        match kind {
            SupplierType::Domestic => self.is_domestic,
            other => self.supplier_type == other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(extra: &str) -> String {
        format!(
            r#"{{
                "id": "SUP-1",
                "supplier_name": "Monterrey Electronica",
                "country": "Mexico",
                "supplier_type": "nafta",
                "is_domestic": false,
                "margin_change": 5.4,
                "transit_days": 6,
                "quality_score": 88,
                "cost_per_unit": 10.1,
                "capacity": 90000,
                "tariff_rate": 2.5,
                "annual_savings": 2400000
                {extra}
            }}"#
        )
    }

    #[test]
    fn accepts_legacy_field_and_type_names() {
        let s: Supplier = serde_json::from_str(&sample_json("")).unwrap();
        assert_eq!(s.name, "Monterrey Electronica");
        assert_eq!(s.supplier_type, SupplierType::RegionalTreaty);
        assert!(!s.is_recommended);
    }

    #[test]
    fn optional_scores_fall_back_to_defaults() {
        let s: Supplier = serde_json::from_str(&sample_json("")).unwrap();
        assert_eq!(s.sustainability_or_default(), 75);
        assert_eq!(s.carbon_footprint_or_default(), 5.2);

        let s: Supplier =
            serde_json::from_str(&sample_json(r#", "sustainability_score": 91, "carbon_footprint": 3.0"#))
                .unwrap();
        assert_eq!(s.sustainability_or_default(), 91);
        assert_eq!(s.carbon_footprint_or_default(), 3.0);
    }

    #[test]
    fn type_order_is_ranking_order() {
        assert!(SupplierType::Domestic < SupplierType::RegionalTreaty);
        assert!(SupplierType::RegionalTreaty < SupplierType::International);
    }

    #[test]
    fn type_membership_uses_domestic_flag() {
        let s: Supplier = serde_json::from_str(&sample_json("")).unwrap();
        assert!(s.is_of_type(SupplierType::RegionalTreaty));
        assert!(!s.is_of_type(SupplierType::International));
        assert!(!s.is_of_type(SupplierType::Domestic));

        let s = Supplier {
            is_domestic: true,
            ..s
        };
        assert!(s.is_of_type(SupplierType::Domestic));
    }

    #[test]
    fn type_parse_accepts_aliases() {
        assert_eq!(SupplierType::parse("NAFTA"), Some(SupplierType::RegionalTreaty));
        assert_eq!(SupplierType::parse("regional-treaty"), Some(SupplierType::RegionalTreaty));
        assert_eq!(SupplierType::parse("domestic"), Some(SupplierType::Domestic));
        assert_eq!(SupplierType::parse("all"), None);
    }
}
