//! # gst-cli — GST Tax Provider Command-Line Interface
//!
//! ## Subcommands
//!
//! - `tax` — Select tax lines for an order described in a JSON or YAML file
//! - `config` — Validate the platform configuration and print it redacted
//! - `keep-alive` — Ping the configured endpoints on a fixed schedule
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `gst-provider` and `gst-config`; the only logic
//!   here is I/O.

pub mod config;
pub mod env;
pub mod keep_alive;
pub mod tax;
