//! # Provider Registry
//!
//! Maps provider identifiers to implementations. Built once at startup from
//! configuration, then shared read-only with whatever orchestrates tax
//! calculation.

use std::collections::BTreeMap;
use std::sync::Arc;

use gst_core::ProvinceCode;

use crate::indian_gst::IndianGstProvider;
use crate::provider::TaxProvider;

/// Registry errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A provider with this identifier is already registered.
    #[error("tax provider {0:?} is already registered")]
    Duplicate(String),
    /// No provider is registered under the requested identifier.
    #[error("no tax provider registered under {id:?} (known: {known})")]
    Unknown {
        /// The identifier that was requested.
        id: String,
        /// Comma-separated registered identifiers.
        known: String,
    },
}

/// Identifier → provider map.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn TaxProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding only the Indian GST provider.
    pub fn with_indian_gst(origin: ProvinceCode, fallback_province: ProvinceCode) -> Self {
        let mut registry = Self::new();
        registry.providers.insert(
            crate::INDIAN_GST_PROVIDER_ID.to_string(),
            Arc::new(IndianGstProvider::new(origin, fallback_province)),
        );
        registry
    }

    /// Register a provider under its own identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the identifier is taken.
    pub fn register(&mut self, provider: Arc<dyn TaxProvider>) -> Result<(), RegistryError> {
        let id = provider.identifier().to_string();
        if self.providers.contains_key(&id) {
            return Err(RegistryError::Duplicate(id));
        }
        tracing::debug!(provider = %id, "registered tax provider");
        self.providers.insert(id, provider);
        Ok(())
    }

    /// Look up a provider by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] if nothing is registered under `id`.
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn TaxProvider>, RegistryError> {
        self.providers
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::Unknown {
                id: id.to_string(),
                known: self.identifiers().join(", "),
            })
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.identifiers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::TaxCalculationContext;
    use gst_core::{ItemTaxLine, ShippingTaxLine, TaxLine};

    #[derive(Debug)]
    struct ExemptProvider;

    impl TaxProvider for ExemptProvider {
        fn identifier(&self) -> &str {
            "exempt"
        }

        fn tax_lines(
            &self,
            _items: &[ItemTaxLine],
            _shipping: &[ShippingTaxLine],
            _context: &TaxCalculationContext,
        ) -> Vec<TaxLine> {
            Vec::new()
        }
    }

    fn code(raw: &str) -> ProvinceCode {
        ProvinceCode::parse(raw).unwrap()
    }

    #[test]
    fn default_registry_resolves_indian_gst() {
        let registry = ProviderRegistry::with_indian_gst(code("BR"), code("BR"));
        let provider = registry.resolve("indian-gst").unwrap();
        assert_eq!(provider.identifier(), "indian-gst");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_rejects_duplicates() {
        let mut registry = ProviderRegistry::with_indian_gst(code("BR"), code("BR"));
        let err = registry
            .register(Arc::new(IndianGstProvider::new(code("MH"), code("BR"))))
            .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("indian-gst".into()));
    }

    #[test]
    fn identifiers_are_sorted() {
        let mut registry = ProviderRegistry::with_indian_gst(code("BR"), code("BR"));
        registry.register(Arc::new(ExemptProvider)).unwrap();
        assert_eq!(registry.identifiers(), vec!["exempt", "indian-gst"]);
    }

    #[test]
    fn unknown_identifier_lists_known_providers() {
        let registry = ProviderRegistry::with_indian_gst(code("BR"), code("BR"));
        let err = registry.resolve("avalara").unwrap_err();
        assert_eq!(
            err.to_string(),
            "no tax provider registered under \"avalara\" (known: indian-gst)"
        );
    }

    #[test]
    fn empty_registry() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve("indian-gst").is_err());
    }
}
