//! # Config Subcommand
//!
//! Loads [`PlatformConfig`] the way the server would at startup and reports
//! whether it is valid. `--show` prints the loaded configuration with all
//! credentials redacted.

use anyhow::{Context, Result};
use clap::Args;

use gst_config::PlatformConfig;

use crate::env::EnvSource;

/// Arguments for the `gst config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the loaded configuration (credentials redacted).
    #[arg(long)]
    pub show: bool,
}

/// Execute the config subcommand.
pub fn run_config(args: &ConfigArgs, env: &EnvSource) -> Result<u8> {
    let config = load_platform(env)?;

    println!("OK: {}", describe(&config));
    if args.show {
        println!("{config:#?}");
    }
    Ok(0)
}

/// Load and validate the platform configuration from `env`.
pub fn load_platform(env: &EnvSource) -> Result<PlatformConfig> {
    PlatformConfig::from_lookup(|key| env.get(key)).context("invalid platform configuration")
}

/// One-line description of a loaded configuration.
pub fn describe(config: &PlatformConfig) -> String {
    format!(
        "worker_mode={} tax_provider={} origin={} file_storage={} keep_alive_targets={}",
        config.worker_mode,
        config.modules.tax.provider_id,
        config.modules.tax.origin_province,
        config
            .modules
            .file
            .as_ref()
            .map(|file| file.id.as_str())
            .unwrap_or("none"),
        config.keep_alive.urls.len(),
    )
}
