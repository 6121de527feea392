//! # Region Codes
//!
//! Newtype wrappers for the two region identifiers the selector compares:
//! the destination country and the province (state or union territory).
//! Both are trimmed and upper-cased at construction so that `"mh"`,
//! `" MH "` and `"MH"` are the same code. No other validation is applied:
//! an unrecognized code simply never equals the origin or `IN`.

use serde::{Deserialize, Serialize};

use crate::error::GstError;

/// ISO 3166-1 alpha-2 code of the only country where the intra-state
/// split can apply.
pub const DOMESTIC_COUNTRY: &str = "IN";

/// Destination country code, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

/// Province (state) code, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProvinceCode(String);

fn normalize(kind: &'static str, raw: &str) -> Result<String, GstError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GstError::EmptyRegionCode { kind });
    }
    Ok(trimmed.to_ascii_uppercase())
}

impl CountryCode {
    /// Parse and normalize a country code.
    pub fn parse(raw: &str) -> Result<Self, GstError> {
        normalize("country", raw).map(Self)
    }

    /// The domestic country (`IN`).
    pub fn domestic() -> Self {
        Self(DOMESTIC_COUNTRY.to_string())
    }

    /// Whether this is the domestic country.
    pub fn is_domestic(&self) -> bool {
        self.0 == DOMESTIC_COUNTRY
    }

    /// Access the normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ProvinceCode {
    /// Parse and normalize a province code.
    pub fn parse(raw: &str) -> Result<Self, GstError> {
        normalize("province", raw).map(Self)
    }

    /// Access the normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = GstError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<String> for ProvinceCode {
    type Error = GstError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl From<ProvinceCode> for String {
    fn from(code: ProvinceCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ProvinceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CountryCode {
    type Err = GstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::str::FromStr for ProvinceCode {
    type Err = GstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
