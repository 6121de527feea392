//! # Per-Line Summary
//!
//! Groups selected tax lines by the item or shipping line they apply to and
//! reports the taxable base next to the combined rate. Pricing (rate times
//! base, rounding, currency) stays with the caller.

use std::collections::HashMap;

use gst_core::{ItemTaxLine, ShippingTaxLine, TaxLine, TaxLineTarget};
use serde::Serialize;

/// Selected rates for one item or shipping line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetSummary {
    /// Item id or shipping line id.
    pub target_id: String,
    /// Whether the target is a shipping line.
    pub is_shipping: bool,
    /// Unit price times quantity for items; the charge for shipping.
    pub taxable_base: f64,
    /// Number of tax lines selected for the target.
    pub line_count: usize,
    /// Sum of the selected rates.
    pub combined_rate: f64,
}

/// Summarize `lines` per target, items first, in input order.
///
/// Every target appears once, including those with no selected rate. Input
/// lines sharing an id are merged into one summary: their bases add up and
/// each tax line is counted exactly once.
pub fn summarize(
    items: &[ItemTaxLine],
    shipping: &[ShippingTaxLine],
    lines: &[TaxLine],
) -> Vec<TargetSummary> {
    let targets = items
        .iter()
        .map(|item| (TaxLineTarget::Item(item.item_id.clone()), item.taxable_base()))
        .chain(shipping.iter().map(|line| {
            (
                TaxLineTarget::Shipping(line.shipping_line_id.clone()),
                line.taxable_base(),
            )
        }));

    let mut summaries: Vec<TargetSummary> = Vec::new();
    let mut index: HashMap<TaxLineTarget, usize> = HashMap::new();
    for (target, taxable_base) in targets {
        if let Some(&i) = index.get(&target) {
            summaries[i].taxable_base += taxable_base;
            continue;
        }
        index.insert(target.clone(), summaries.len());
        summaries.push(TargetSummary {
            target_id: target.id().to_string(),
            is_shipping: target.is_shipping(),
            taxable_base,
            line_count: 0,
            combined_rate: 0.0,
        });
    }

    for line in lines {
        if let Some(&i) = index.get(&line.target) {
            summaries[i].line_count += 1;
            summaries[i].combined_rate += line.rate;
        }
    }

    summaries
}
