//! # Tax-Calculation Lines
//!
//! Input and output records of a tax provider call. Inputs are supplied by
//! the orchestrator per request; outputs are built fresh and handed back.
//! Nothing here outlives a single calculation.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::rate::{GstComponent, TaxRate};
use crate::region::{CountryCode, ProvinceCode};

fn default_quantity() -> u32 {
    1
}

/// An order item together with its candidate rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTaxLine {
    /// Line item identifier.
    pub item_id: String,
    /// Price of a single unit.
    #[serde(default)]
    pub unit_price: f64,
    /// Ordered quantity. Absent in a request means 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Candidate rates, in the order proposed by the jurisdiction engine.
    #[serde(default)]
    pub rates: Vec<TaxRate>,
}

impl ItemTaxLine {
    /// Create an item line.
    pub fn new(
        item_id: impl Into<String>,
        unit_price: f64,
        quantity: u32,
        rates: Vec<TaxRate>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            unit_price,
            quantity,
            rates,
        }
    }

    /// Amount the rates would be applied to: unit price times quantity.
    pub fn taxable_base(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// A shipping charge together with its candidate rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingTaxLine {
    /// Shipping line identifier.
    pub shipping_line_id: String,
    /// Shipping charge.
    #[serde(default)]
    pub unit_price: f64,
    /// Candidate rates, in the order proposed by the jurisdiction engine.
    #[serde(default)]
    pub rates: Vec<TaxRate>,
}

impl ShippingTaxLine {
    /// Create a shipping line.
    pub fn new(
        shipping_line_id: impl Into<String>,
        unit_price: f64,
        rates: Vec<TaxRate>,
    ) -> Self {
        Self {
            shipping_line_id: shipping_line_id.into(),
            unit_price,
            rates,
        }
    }

    /// Amount the rates would be applied to: the shipping charge.
    pub fn taxable_base(&self) -> f64 {
        self.unit_price
    }
}

/// Destination address as supplied by the orchestrator.
///
/// Codes are raw caller input; use [`Address::country`] and
/// [`Address::province`] to obtain normalized codes with defaults applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// ISO country code, if known.
    #[serde(default)]
    pub country_code: Option<String>,
    /// Province code, if known.
    #[serde(default)]
    pub province_code: Option<String>,
}

impl Address {
    /// Create an address from optional raw codes.
    pub fn new(country_code: Option<&str>, province_code: Option<&str>) -> Self {
        Self {
            country_code: country_code.map(str::to_string),
            province_code: province_code.map(str::to_string),
        }
    }

    /// Normalized destination country. Absent or blank means `IN`.
    pub fn country(&self) -> CountryCode {
        self.country_code
            .as_deref()
            .and_then(|raw| CountryCode::parse(raw).ok())
            .unwrap_or_else(CountryCode::domestic)
    }

    /// Normalized destination province. Absent or blank means `fallback`.
    pub fn province(&self, fallback: &ProvinceCode) -> ProvinceCode {
        self.province_code
            .as_deref()
            .and_then(|raw| ProvinceCode::parse(raw).ok())
            .unwrap_or_else(|| fallback.clone())
    }
}

/// The line a tax line is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaxLineTarget {
    /// An order item, by item id.
    Item(String),
    /// A shipping line, by shipping line id.
    Shipping(String),
}

impl TaxLineTarget {
    /// The item or shipping line identifier.
    pub fn id(&self) -> &str {
        match self {
            Self::Item(id) | Self::Shipping(id) => id,
        }
    }

    /// Whether the target is a shipping line.
    pub fn is_shipping(&self) -> bool {
        matches!(self, Self::Shipping(_))
    }
}

/// A selected tax line, ready for the orchestrator to price.
///
/// Serializes in the orchestrator's wire shape: item lines carry both
/// `item_id` and `line_item_id`, shipping lines carry `shipping_line_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxLine {
    /// The item or shipping line this tax applies to.
    pub target: TaxLineTarget,
    /// Selected component.
    pub code: GstComponent,
    /// Name copied from the candidate rate.
    pub name: String,
    /// Rate value copied from the candidate rate (`0` if it had none).
    pub rate: f64,
    /// Identifier of the provider that produced the line.
    pub provider_id: String,
}

impl TaxLine {
    /// Identifier of the item or shipping line.
    pub fn target_id(&self) -> &str {
        self.target.id()
    }

    /// Whether this line applies to a shipping charge.
    pub fn is_shipping(&self) -> bool {
        self.target.is_shipping()
    }
}

impl Serialize for TaxLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.is_shipping() { 5 } else { 6 };
        let mut state = serializer.serialize_struct("TaxLine", fields)?;
        match &self.target {
            TaxLineTarget::Item(id) => {
                state.serialize_field("item_id", id)?;
                state.serialize_field("line_item_id", id)?;
            }
            TaxLineTarget::Shipping(id) => {
                state.serialize_field("shipping_line_id", id)?;
            }
        }
        state.serialize_field("code", &self.code)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("rate", &self.rate)?;
        state.serialize_field("provider_id", &self.provider_id)?;
        state.end()
    }
}
