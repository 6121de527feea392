//! Identifiers and defaults shared by the provider and its configuration.

/// Registry identifier of the Indian GST provider, and the default
/// `TAX_PROVIDER_ID`.
pub const INDIAN_GST_PROVIDER_ID: &str = "indian-gst";

/// Province assumed when the destination address has none.
pub const DEFAULT_FALLBACK_PROVINCE: &str = "BR";
