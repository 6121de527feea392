//! # Indian GST Tax-Line Selector
//!
//! Chooses which candidate rates apply to each line of an order shipped
//! from a fixed origin province:
//!
//! 1. The destination country defaults to `IN` and the province to a
//!    configured fallback. Both are upper-cased.
//! 2. A domestic destination in the origin province is an intra-state
//!    supply and takes the CGST and SGST candidates.
//! 3. Every other destination takes the IGST candidate.
//! 4. Candidates with any other code, or with no code, are dropped.
//!
//! Item lines are emitted before shipping lines; input order and candidate
//! order are preserved. No tax amount is computed here.

pub use gst_core::{DEFAULT_FALLBACK_PROVINCE, INDIAN_GST_PROVIDER_ID};
use gst_core::{
    Address, GstComponent, GstError, ItemTaxLine, ProvinceCode, ShippingTaxLine, SupplyKind,
    TaxLine, TaxLineTarget, TaxRate,
};

use crate::provider::{TaxCalculationContext, TaxProvider};

/// Tax provider for the Indian GST regime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndianGstProvider {
    origin: ProvinceCode,
    fallback_province: ProvinceCode,
}

impl IndianGstProvider {
    /// Create a provider shipping from `origin`.
    pub fn new(origin: ProvinceCode, fallback_province: ProvinceCode) -> Self {
        Self {
            origin,
            fallback_province,
        }
    }

    /// Create a provider from raw configuration codes.
    ///
    /// # Errors
    ///
    /// Returns [`GstError::EmptyRegionCode`] if either code is blank.
    pub fn from_codes(origin: &str, fallback_province: &str) -> Result<Self, GstError> {
        Ok(Self::new(
            ProvinceCode::parse(origin)?,
            ProvinceCode::parse(fallback_province)?,
        ))
    }

    /// The seller's origin province.
    pub fn origin(&self) -> &ProvinceCode {
        &self.origin
    }

    /// The province assumed for addresses without one.
    pub fn fallback_province(&self) -> &ProvinceCode {
        &self.fallback_province
    }

    /// Classify a shipment to `address`.
    pub fn classify(&self, address: &Address) -> SupplyKind {
        let country = address.country();
        let province = address.province(&self.fallback_province);
        SupplyKind::classify(&country, &province, &self.origin)
    }

    /// Select tax lines for the given item and shipping lines.
    pub fn compute_tax_lines(
        &self,
        items: &[ItemTaxLine],
        shipping: &[ShippingTaxLine],
        address: &Address,
    ) -> Vec<TaxLine> {
        let supply = self.classify(address);

        tracing::debug!(
            origin = %self.origin,
            country = ?address.country_code,
            province = ?address.province_code,
            supply = %supply,
            items = items.len(),
            shipping = shipping.len(),
            "selecting GST tax lines"
        );

        let item_lines = items.iter().flat_map(|item| {
            select(&item.rates, supply).map(move |(code, rate)| {
                build_line(TaxLineTarget::Item(item.item_id.clone()), code, rate)
            })
        });
        let shipping_lines = shipping.iter().flat_map(|line| {
            select(&line.rates, supply).map(move |(code, rate)| {
                build_line(
                    TaxLineTarget::Shipping(line.shipping_line_id.clone()),
                    code,
                    rate,
                )
            })
        });

        item_lines.chain(shipping_lines).collect()
    }
}

impl TaxProvider for IndianGstProvider {
    fn identifier(&self) -> &str {
        INDIAN_GST_PROVIDER_ID
    }

    fn tax_lines(
        &self,
        items: &[ItemTaxLine],
        shipping: &[ShippingTaxLine],
        context: &TaxCalculationContext,
    ) -> Vec<TaxLine> {
        self.compute_tax_lines(items, shipping, &context.address)
    }
}

/// Candidates that apply to `supply`, in candidate order.
fn select(
    rates: &[TaxRate],
    supply: SupplyKind,
) -> impl Iterator<Item = (GstComponent, &TaxRate)> + '_ {
    rates.iter().filter_map(move |rate| match rate.component() {
        Some(component) if supply.applies(component) => Some((component, rate)),
        _ => {
            tracing::trace!(code = ?rate.code, supply = %supply, "candidate rate not applicable");
            None
        }
    })
}

fn build_line(target: TaxLineTarget, code: GstComponent, rate: &TaxRate) -> TaxLine {
    TaxLine {
        target,
        code,
        name: rate.name.clone(),
        rate: rate.rate_value(),
        provider_id: INDIAN_GST_PROVIDER_ID.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(origin: &str) -> IndianGstProvider {
        IndianGstProvider::from_codes(origin, DEFAULT_FALLBACK_PROVINCE).unwrap()
    }

    fn gst_candidates() -> Vec<TaxRate> {
        vec![
            TaxRate::new("CGST", "CGST 9%", 9.0),
            TaxRate::new("SGST", "SGST 9%", 9.0),
            TaxRate::new("IGST", "IGST 18%", 18.0),
        ]
    }

    fn codes(lines: &[TaxLine]) -> Vec<&'static str> {
        lines.iter().map(|l| l.code.as_str()).collect()
    }

    #[test]
    fn intra_state_selects_cgst_and_sgst_in_order() {
        let items = vec![ItemTaxLine::new("item_1", 100.0, 2, gst_candidates())];
        let address = Address::new(Some("IN"), Some("BR"));

        let lines = provider("BR").compute_tax_lines(&items, &[], &address);

        assert_eq!(codes(&lines), vec!["CGST", "SGST"]);
        assert_eq!(lines[0].rate, 9.0);
        assert_eq!(lines[1].rate, 9.0);
        assert!(lines.iter().all(|l| l.target_id() == "item_1" && !l.is_shipping()));
    }

    #[test]
    fn inter_state_selects_igst() {
        let items = vec![ItemTaxLine::new("item_1", 100.0, 1, gst_candidates())];
        let address = Address::new(Some("IN"), Some("MH"));

        let lines = provider("BR").compute_tax_lines(&items, &[], &address);

        assert_eq!(codes(&lines), vec!["IGST"]);
        assert_eq!(lines[0].rate, 18.0);
        assert_eq!(lines[0].name, "IGST 18%");
    }

    #[test]
    fn foreign_destination_selects_igst() {
        let items = vec![ItemTaxLine::new("item_1", 100.0, 1, gst_candidates())];
        let address = Address::new(Some("US"), None);

        let lines = provider("BR").compute_tax_lines(&items, &[], &address);

        assert_eq!(codes(&lines), vec!["IGST"]);
    }

    #[test]
    fn missing_address_uses_domestic_fallback_province() {
        let items = vec![ItemTaxLine::new("item_1", 100.0, 1, gst_candidates())];

        let lines = provider("BR").compute_tax_lines(&items, &[], &Address::default());
        assert_eq!(codes(&lines), vec!["CGST", "SGST"]);

        let lines = provider("MH").compute_tax_lines(&items, &[], &Address::default());
        assert_eq!(codes(&lines), vec!["IGST"]);
    }

    #[test]
    fn codes_compare_case_insensitively_on_address_and_origin() {
        let items = vec![ItemTaxLine::new("item_1", 100.0, 1, gst_candidates())];
        let address = Address::new(Some("in"), Some("br"));

        let lines = provider("br").compute_tax_lines(&items, &[], &address);

        assert_eq!(codes(&lines), vec!["CGST", "SGST"]);
    }

    #[test]
    fn items_precede_shipping_and_input_order_is_kept() {
        let items = vec![
            ItemTaxLine::new("item_a", 10.0, 1, gst_candidates()),
            ItemTaxLine::new("item_b", 20.0, 1, gst_candidates()),
        ];
        let shipping = vec![ShippingTaxLine::new("ship_1", 5.0, gst_candidates())];
        let address = Address::new(Some("IN"), Some("BR"));

        let lines = provider("BR").compute_tax_lines(&items, &shipping, &address);

        let targets: Vec<(&str, bool)> =
            lines.iter().map(|l| (l.target_id(), l.is_shipping())).collect();
        assert_eq!(
            targets,
            vec![
                ("item_a", false),
                ("item_a", false),
                ("item_b", false),
                ("item_b", false),
                ("ship_1", true),
                ("ship_1", true),
            ]
        );
    }

    #[test]
    fn zero_quantity_and_zero_price_lines_still_get_tax_lines() {
        let items = vec![ItemTaxLine::new("free", 0.0, 0, gst_candidates())];
        let shipping = vec![ShippingTaxLine::new("free_ship", 0.0, gst_candidates())];
        let address = Address::new(Some("IN"), Some("MH"));

        let lines = provider("BR").compute_tax_lines(&items, &shipping, &address);

        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn unrecognized_and_missing_codes_are_dropped() {
        let rates = vec![
            TaxRate::new("VAT", "VAT", 20.0),
            TaxRate {
                code: None,
                name: "nameless".into(),
                rate: Some(5.0),
            },
            TaxRate::new("cgst", "lowercase", 9.0),
        ];
        let items = vec![ItemTaxLine::new("item_1", 100.0, 1, rates)];

        for address in [
            Address::new(Some("IN"), Some("BR")),
            Address::new(Some("IN"), Some("MH")),
            Address::new(Some("US"), None),
        ] {
            assert!(provider("BR").compute_tax_lines(&items, &[], &address).is_empty());
        }
    }

    #[test]
    fn missing_rate_value_is_emitted_as_zero() {
        let rates = vec![TaxRate {
            code: Some("IGST".into()),
            name: "IGST".into(),
            rate: None,
        }];
        let items = vec![ItemTaxLine::new("item_1", 100.0, 1, rates)];

        let lines = provider("BR").compute_tax_lines(&items, &[], &Address::new(Some("US"), None));

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].rate, 0.0);
    }

    #[test]
    fn empty_inputs_yield_empty_result() {
        let lines = provider("BR").compute_tax_lines(&[], &[], &Address::default());
        assert!(lines.is_empty());

        let items = vec![ItemTaxLine::new("item_1", 100.0, 1, vec![])];
        assert!(provider("BR").compute_tax_lines(&items, &[], &Address::default()).is_empty());
    }

    #[test]
    fn every_line_carries_provider_id() {
        let items = vec![ItemTaxLine::new("item_1", 100.0, 1, gst_candidates())];
        let p = provider("BR");
        let lines = p.tax_lines(&items, &[], &TaxCalculationContext::default());
        assert!(lines.iter().all(|l| l.provider_id == INDIAN_GST_PROVIDER_ID));
        assert_eq!(p.identifier(), "indian-gst");
    }

    #[test]
    fn blank_origin_is_rejected() {
        assert!(IndianGstProvider::from_codes("  ", DEFAULT_FALLBACK_PROVINCE).is_err());
        assert!(IndianGstProvider::from_codes("BR", "").is_err());
    }

    #[test]
    fn classify_reports_supply_kind() {
        let p = provider("KA");
        assert_eq!(p.classify(&Address::new(Some("IN"), Some("ka"))), SupplyKind::IntraState);
        assert_eq!(p.classify(&Address::new(Some("IN"), Some("TN"))), SupplyKind::InterState);
        assert_eq!(p.classify(&Address::new(Some("GB"), Some("KA"))), SupplyKind::International);
    }
}
