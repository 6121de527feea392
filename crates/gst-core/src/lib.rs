//! # gst-core — Foundational Types for the GST Tax Provider
//!
//! Defines the data model shared by every crate in the workspace: the
//! tax-calculation lines an orchestrator hands to a tax provider, the
//! candidate rates attached to them, the destination address, and the tax
//! lines a provider returns.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for region codes.** `CountryCode` and `ProvinceCode` are
//!    trimmed and upper-cased at construction, so comparisons never depend
//!    on caller casing.
//!
//! 2. **Single `GstComponent` enum.** CGST, SGST and IGST are the only codes
//!    a provider ever emits. Anything else is not a component.
//!
//! 3. **Classification before selection.** `SupplyKind` captures the
//!    jurisdiction decision (intra-state, inter-state, international) and
//!    owns the mapping to the applicable component set.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gst-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod defaults;
pub mod error;
pub mod line;
pub mod rate;
pub mod region;
pub mod supply;

pub use defaults::{DEFAULT_FALLBACK_PROVINCE, INDIAN_GST_PROVIDER_ID};
pub use error::GstError;
pub use line::{Address, ItemTaxLine, ShippingTaxLine, TaxLine, TaxLineTarget};
pub use rate::{GstComponent, TaxRate};
pub use region::{CountryCode, ProvinceCode, DOMESTIC_COUNTRY};
pub use supply::SupplyKind;
