//! # Tax Subcommand
//!
//! Reads an order (`address`, `items`, `shipping`) from a JSON or YAML file,
//! resolves the configured tax provider from the registry and prints the
//! selected tax lines as JSON.
//!
//! Flags override the corresponding environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use gst_config::TaxModuleConfig;
use gst_core::{Address, ItemTaxLine, ShippingTaxLine, TaxLine};
use gst_provider::{summarize, ProviderRegistry, TargetSummary, TaxCalculationContext};

use crate::env::EnvSource;

/// Arguments for the `gst tax` subcommand.
#[derive(Args, Debug)]
pub struct TaxArgs {
    /// Path to the order file (`.json`, `.yaml` or `.yml`).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Origin province code. Overrides GST_ORIGIN_PROVINCE_CODE.
    #[arg(long, value_name = "CODE")]
    pub origin: Option<String>,

    /// Province assumed for addresses without one. Overrides GST_FALLBACK_PROVINCE_CODE.
    #[arg(long, value_name = "CODE")]
    pub fallback_province: Option<String>,

    /// Provider identifier. Overrides TAX_PROVIDER_ID.
    #[arg(long, value_name = "ID")]
    pub provider: Option<String>,

    /// Include a per-line summary of taxable base and combined rate.
    #[arg(long)]
    pub summary: bool,
}

/// An order to select tax lines for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxRequest {
    /// Destination address.
    #[serde(default)]
    pub address: Address,
    /// Item lines with their candidate rates.
    #[serde(default)]
    pub items: Vec<ItemTaxLine>,
    /// Shipping lines with their candidate rates.
    #[serde(default)]
    pub shipping: Vec<ShippingTaxLine>,
}

/// Output of the `tax` subcommand.
#[derive(Debug, Serialize)]
pub struct TaxResponse {
    /// Provider that selected the lines.
    pub provider_id: String,
    /// Selected tax lines, items first.
    pub tax_lines: Vec<TaxLine>,
    /// Per-target summary, with `--summary`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<TargetSummary>>,
}

/// Execute the tax subcommand.
pub fn run_tax(args: &TaxArgs, env: &EnvSource) -> Result<u8> {
    let config = TaxModuleConfig::from_lookup(|key| {
        let flag = match key {
            "GST_ORIGIN_PROVINCE_CODE" => args.origin.clone(),
            "GST_FALLBACK_PROVINCE_CODE" => args.fallback_province.clone(),
            "TAX_PROVIDER_ID" => args.provider.clone(),
            _ => None,
        };
        flag.or_else(|| env.get(key))
    })
    .context("invalid tax module configuration")?;

    let request = load_request(&args.file)?;
    let response = evaluate(&request, &config, args.summary)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("failed to serialize tax lines")?
    );
    Ok(0)
}

/// Read an order file, choosing the format by extension.
pub fn load_request(path: &Path) -> Result<TaxRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))
    }
}

/// Resolve the configured provider and select tax lines for `request`.
pub fn evaluate(
    request: &TaxRequest,
    config: &TaxModuleConfig,
    include_summary: bool,
) -> Result<TaxResponse> {
    let registry = ProviderRegistry::with_indian_gst(
        config.origin_province.clone(),
        config.fallback_province.clone(),
    );
    let provider = registry.resolve(&config.provider_id)?;

    let context = TaxCalculationContext::new(request.address.clone());
    let tax_lines = provider.tax_lines(&request.items, &request.shipping, &context);

    tracing::info!(
        provider = provider.identifier(),
        items = request.items.len(),
        shipping = request.shipping.len(),
        tax_lines = tax_lines.len(),
        "tax lines selected"
    );

    let summary = include_summary.then(|| summarize(&request.items, &request.shipping, &tax_lines));

    Ok(TaxResponse {
        provider_id: provider.identifier().to_string(),
        tax_lines,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ORDER_JSON: &str = r#"{
        "address": { "country_code": "in", "province_code": "br" },
        "items": [
            {
                "item_id": "item_1",
                "unit_price": 499.0,
                "quantity": 2,
                "rates": [
                    { "code": "CGST", "name": "CGST 9%", "rate": 9 },
                    { "code": "SGST", "name": "SGST 9%", "rate": 9 },
                    { "code": "IGST", "name": "IGST 18%", "rate": 18 }
                ]
            }
        ],
        "shipping": [
            {
                "shipping_line_id": "ship_1",
                "unit_price": 60.0,
                "rates": [{ "code": "IGST", "name": "IGST 18%", "rate": 18 }]
            }
        ]
    }"#;

    fn config(origin: &str) -> TaxModuleConfig {
        TaxModuleConfig::from_lookup(|key| {
            (key == "GST_ORIGIN_PROVINCE_CODE").then(|| origin.to_string())
        })
        .unwrap()
    }

    #[test]
    fn json_request_is_evaluated() {
        let request: TaxRequest = serde_json::from_str(ORDER_JSON).unwrap();
        let response = evaluate(&request, &config("BR"), false).unwrap();

        assert_eq!(response.provider_id, "indian-gst");
        assert_eq!(response.tax_lines.len(), 2);
        assert!(response.tax_lines.iter().all(|l| !l.is_shipping()));
        assert!(response.summary.is_none());
    }

    #[test]
    fn inter_state_request_taxes_shipping_too() {
        let request: TaxRequest = serde_json::from_str(ORDER_JSON).unwrap();
        let response = evaluate(&request, &config("MH"), true).unwrap();

        let targets: Vec<&str> = response.tax_lines.iter().map(|l| l.target_id()).collect();
        assert_eq!(targets, vec!["item_1", "ship_1"]);

        let summary = response.summary.unwrap();
        assert_eq!(summary[0].taxable_base, 998.0);
        assert_eq!(summary[1].combined_rate, 18.0);
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let request = TaxRequest::default();
        let mut config = config("BR");
        config.provider_id = "avalara".into();
        let err = evaluate(&request, &config, false).unwrap_err();
        assert!(err.to_string().contains("avalara"));
    }

    #[test]
    fn yaml_file_is_loaded_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "address:\n  country_code: US\nitems:\n  - item_id: item_1\n    unit_price: 10\n    rates:\n      - code: IGST\n        name: IGST\n        rate: 18\n"
        )
        .unwrap();

        let request = load_request(file.path()).unwrap();
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 1);
        assert!(request.shipping.is_empty());
    }

    #[test]
    fn malformed_json_reports_path() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_request(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse JSON"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_request(Path::new("/nonexistent/order.json")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read file"));
    }
}
