#![warn(missing_docs)]

//! # gst-provider — Pluggable Tax Providers
//!
//! The commerce platform asks a tax provider which of the candidate rates
//! on each item and shipping line actually apply. This crate supplies:
//!
//! - **Provider contract** (`provider.rs`): the [`TaxProvider`] trait and
//!   the per-call [`TaxCalculationContext`].
//!
//! - **Indian GST** (`indian_gst.rs`): [`IndianGstProvider`], which picks
//!   CGST + SGST for intra-state supplies and IGST otherwise.
//!
//! - **Registry** (`registry.rs`): identifier → provider map, resolved once
//!   at startup and shared by reference.
//!
//! - **Summary** (`summary.rs`): per-line taxable base and combined rate,
//!   for callers that price the selected lines.
//!
//! ## Crate Policy
//!
//! - Providers are pure: no I/O, no interior mutability, `Send + Sync`.
//! - Selection never fails. Unrecognized candidate codes are dropped.

pub mod indian_gst;
pub mod provider;
pub mod registry;
pub mod summary;

pub use indian_gst::{IndianGstProvider, DEFAULT_FALLBACK_PROVINCE, INDIAN_GST_PROVIDER_ID};
pub use provider::{TaxCalculationContext, TaxProvider};
pub use registry::{ProviderRegistry, RegistryError};
pub use summary::{summarize, TargetSummary};
