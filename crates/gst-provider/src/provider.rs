//! # Provider Contract
//!
//! The seam between the orchestrator and a tax provider. The orchestrator
//! resolves a provider by identifier and calls [`TaxProvider::tax_lines`]
//! once per calculation.

use gst_core::{Address, ItemTaxLine, ShippingTaxLine, TaxLine};
use serde::{Deserialize, Serialize};

/// Per-call context supplied by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationContext {
    /// Destination address of the shipment.
    #[serde(default)]
    pub address: Address,
}

impl TaxCalculationContext {
    /// Create a context for a destination address.
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

/// A tax provider: selects the tax lines that apply to an order.
///
/// Implementations must be pure: identical inputs yield identical,
/// order-preserving output, and nothing is mutated.
pub trait TaxProvider: Send + Sync + std::fmt::Debug {
    /// Stable identifier under which the provider is registered.
    fn identifier(&self) -> &str;

    /// Select tax lines for every item line followed by every shipping line.
    fn tax_lines(
        &self,
        items: &[ItemTaxLine],
        shipping: &[ShippingTaxLine],
        context: &TaxCalculationContext,
    ) -> Vec<TaxLine>;
}
