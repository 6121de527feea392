//! Tax module configuration.

use gst_core::{ProvinceCode, DEFAULT_FALLBACK_PROVINCE, INDIAN_GST_PROVIDER_ID};

use crate::error::ConfigError;
use crate::vars::Vars;

/// Options for the tax module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxModuleConfig {
    /// Identifier of the provider to resolve from the registry.
    pub provider_id: String,
    /// Seller's origin province.
    pub origin_province: ProvinceCode,
    /// Province assumed for addresses without one.
    pub fallback_province: ProvinceCode,
}

impl TaxModuleConfig {
    /// Load from the process environment.
    ///
    /// Variables:
    /// - `GST_ORIGIN_PROVINCE_CODE` (required)
    /// - `GST_FALLBACK_PROVINCE_CODE` (default: `BR`)
    /// - `TAX_PROVIDER_ID` (default: `indian-gst`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Self::load(&Vars::new(&lookup))
    }

    pub(crate) fn load(vars: &Vars<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            provider_id: vars.or_default("TAX_PROVIDER_ID", INDIAN_GST_PROVIDER_ID),
            origin_province: province(vars, "GST_ORIGIN_PROVINCE_CODE", None)?,
            fallback_province: province(
                vars,
                "GST_FALLBACK_PROVINCE_CODE",
                Some(DEFAULT_FALLBACK_PROVINCE),
            )?,
        })
    }
}

fn province(vars: &Vars<'_>, key: &str, default: Option<&str>) -> Result<ProvinceCode, ConfigError> {
    let raw = match (vars.optional(key), default) {
        (Some(raw), _) => raw,
        (None, Some(default)) => default.to_string(),
        (None, None) => return Err(ConfigError::Missing(key.to_string())),
    };
    ProvinceCode::parse(&raw).map_err(|source| ConfigError::Region {
        key: key.to_string(),
        source,
    })
}
