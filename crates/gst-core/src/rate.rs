//! # Candidate Rates and GST Components
//!
//! A [`TaxRate`] is a candidate proposed by the orchestrator's jurisdiction
//! engine. Its code decides whether it is one of the three [`GstComponent`]s
//! the provider knows how to select; every other code is ignored.

use serde::{Deserialize, Serialize};

/// The three Goods and Services Tax components.
///
/// CGST and SGST are co-applied on intra-state supplies; IGST alone applies
/// to inter-state and international supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GstComponent {
    /// Central GST.
    Cgst,
    /// State GST.
    Sgst,
    /// Integrated GST.
    Igst,
}

impl GstComponent {
    /// Return the rate code used on candidate rates.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cgst => "CGST",
            Self::Sgst => "SGST",
            Self::Igst => "IGST",
        }
    }

    /// Map a candidate rate code to a component.
    ///
    /// Matching is exact: `"cgst"` is not `CGST`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CGST" => Some(Self::Cgst),
            "SGST" => Some(Self::Sgst),
            "IGST" => Some(Self::Igst),
            _ => None,
        }
    }

    /// Return all component variants.
    pub fn all() -> &'static [GstComponent] {
        &[Self::Cgst, Self::Sgst, Self::Igst]
    }
}

impl std::fmt::Display for GstComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate tax rate attached to a tax-calculation line.
///
/// Both `code` and `rate` may be absent on malformed input. A missing code
/// never matches a component; a missing rate is reported as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    /// Rate code, e.g. `"CGST"`.
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable rate name.
    #[serde(default)]
    pub name: String,
    /// Rate value. Opaque to the provider (percentage or fraction).
    #[serde(default)]
    pub rate: Option<f64>,
}

impl TaxRate {
    /// Create a fully-specified candidate rate.
    pub fn new(code: impl Into<String>, name: impl Into<String>, rate: f64) -> Self {
        Self {
            code: Some(code.into()),
            name: name.into(),
            rate: Some(rate),
        }
    }

    /// The GST component this candidate represents, if any.
    pub fn component(&self) -> Option<GstComponent> {
        self.code.as_deref().and_then(GstComponent::from_code)
    }

    /// The rate value, `0` when absent.
    pub fn rate_value(&self) -> f64 {
        self.rate.unwrap_or(0.0)
    }
}
