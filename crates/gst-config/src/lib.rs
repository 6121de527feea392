#![warn(missing_docs)]

//! # gst-config — Platform Configuration
//!
//! One explicit configuration struct, [`PlatformConfig`], replaces the
//! environment plumbing of the platform manifest. It is loaded and validated
//! once at process start; nothing in the tax provider depends on its values
//! beyond the tax module section.
//!
//! Every loader has two entry points:
//!
//! - `from_env()` reads the process environment.
//! - `from_lookup(f)` reads through any `Fn(&str) -> Option<String>`. The
//!   `gst` binary uses it to layer a dotenv file under the environment;
//!   tests use it to avoid touching process state.
//!
//! Loading dotenv files is left to the binary, so the library never reads
//! a file the caller did not choose.
//!
//! Secrets are held in [`Secret`] and never appear in `Debug` output.

pub mod error;
pub mod keep_alive;
pub mod platform;
pub mod secret;
pub mod tax;
pub(crate) mod vars;

pub use error::ConfigError;
pub use keep_alive::{KeepAliveConfig, DEFAULT_KEEP_ALIVE_URL};
pub use platform::{
    DatabaseConfig, HttpConfig, ModulesConfig, PlatformConfig, RedisConfig, RedisModuleConfig,
    S3FileProviderConfig, WorkerMode,
};
pub use secret::Secret;
pub use tax::TaxModuleConfig;
