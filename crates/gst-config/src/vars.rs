//! Typed access to configuration variables through a lookup function.

use std::str::FromStr;

use url::Url;

use crate::error::ConfigError;

/// A lookup over configuration variables. Blank values count as unset.
pub(crate) struct Vars<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl<'a> Vars<'a> {
    pub(crate) fn new(lookup: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self { lookup }
    }

    pub(crate) fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub(crate) fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    pub(crate) fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    pub(crate) fn parsed<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    pub(crate) fn url(&self, key: &str) -> Result<Option<Url>, ConfigError> {
        self.optional(key).map(|raw| parse_url(key, &raw)).transpose()
    }

    pub(crate) fn required_url(&self, key: &str) -> Result<Url, ConfigError> {
        parse_url(key, &self.required(key)?)
    }

    /// Comma-separated list, empty entries dropped.
    pub(crate) fn list(&self, key: &str) -> Option<Vec<String>> {
        self.optional(key).map(|raw| split_list(&raw))
    }

    pub(crate) fn required_list(&self, key: &str) -> Result<Vec<String>, ConfigError> {
        let items = self.list(key).unwrap_or_default();
        if items.is_empty() {
            return Err(ConfigError::Missing(key.to_string()));
        }
        Ok(items)
    }
}

pub(crate) fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(key.to_string(), e.to_string()))
}

pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
