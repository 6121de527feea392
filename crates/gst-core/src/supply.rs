//! # Supply Classification
//!
//! A supply is intra-state when goods ship to the domestic country and the
//! destination province equals the seller's origin province. Every other
//! destination, domestic or foreign, takes the integrated rate.

use serde::{Deserialize, Serialize};

use crate::rate::GstComponent;
use crate::region::{CountryCode, ProvinceCode};

/// The jurisdictional kind of a supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyKind {
    /// Domestic, same province as the origin.
    IntraState,
    /// Domestic, different province.
    InterState,
    /// Destination outside the domestic country.
    International,
}

impl SupplyKind {
    /// Classify a shipment from `origin` to `country`/`province`.
    pub fn classify(
        country: &CountryCode,
        province: &ProvinceCode,
        origin: &ProvinceCode,
    ) -> Self {
        if !country.is_domestic() {
            Self::International
        } else if province == origin {
            Self::IntraState
        } else {
            Self::InterState
        }
    }

    /// Components applied to this kind of supply, in canonical order.
    pub fn components(&self) -> &'static [GstComponent] {
        match self {
            Self::IntraState => &[GstComponent::Cgst, GstComponent::Sgst],
            Self::InterState | Self::International => &[GstComponent::Igst],
        }
    }

    /// Whether `component` applies to this kind of supply.
    pub fn applies(&self, component: GstComponent) -> bool {
        self.components().contains(&component)
    }

    /// Return the string representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntraState => "intra_state",
            Self::InterState => "inter_state",
            Self::International => "international",
        }
    }
}

impl std::fmt::Display for SupplyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn province(code: &str) -> ProvinceCode {
        ProvinceCode::parse(code).unwrap()
    }

    fn country(code: &str) -> CountryCode {
        CountryCode::parse(code).unwrap()
    }

    #[test]
    fn same_province_domestic_is_intra_state() {
        let kind = SupplyKind::classify(&country("IN"), &province("BR"), &province("BR"));
        assert_eq!(kind, SupplyKind::IntraState);
        assert_eq!(kind.components(), &[GstComponent::Cgst, GstComponent::Sgst]);
    }

    #[test]
    fn other_province_domestic_is_inter_state() {
        let kind = SupplyKind::classify(&country("IN"), &province("MH"), &province("BR"));
        assert_eq!(kind, SupplyKind::InterState);
        assert!(kind.applies(GstComponent::Igst));
        assert!(!kind.applies(GstComponent::Cgst));
    }

    #[test]
    fn foreign_country_is_international_even_with_matching_province() {
        let kind = SupplyKind::classify(&country("US"), &province("BR"), &province("BR"));
        assert_eq!(kind, SupplyKind::International);
        assert_eq!(kind.components(), &[GstComponent::Igst]);
    }

    #[test]
    fn display_is_snake_case() {
        assert_eq!(SupplyKind::IntraState.to_string(), "intra_state");
        assert_eq!(
            serde_json::to_string(&SupplyKind::International).unwrap(),
            "\"international\""
        );
    }
}
