//! # Keep-Alive Subcommand
//!
//! GETs every configured URL on a fixed interval so that idle hosting
//! platforms do not put the admin backend to sleep. A failed ping is logged
//! and the schedule continues; nothing here can stop the job except the
//! shutdown signal.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tokio::time::MissedTickBehavior;
use url::Url;

use gst_config::KeepAliveConfig;

use crate::env::EnvSource;

/// Per-request timeout. Kept below the default interval so a hung target
/// cannot delay the next tick.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Arguments for the `gst keep-alive` subcommand.
#[derive(Args, Debug)]
pub struct KeepAliveArgs {
    /// URL to ping. Repeatable. Overrides KEEP_ALIVE_URLS.
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Seconds between pings. Overrides KEEP_ALIVE_INTERVAL_SECS.
    #[arg(long, value_name = "N")]
    pub interval_secs: Option<u64>,

    /// Ping every target once and exit (status 1 if any was unreachable).
    #[arg(long)]
    pub once: bool,
}

/// Outcome of one round of pings.
#[derive(Debug, Default)]
pub struct PingReport {
    /// Targets that answered with a success status.
    pub reachable: Vec<Url>,
    /// Targets that failed, with the reason.
    pub unreachable: Vec<(Url, String)>,
}

impl PingReport {
    /// True when every target answered with a success status.
    pub fn all_healthy(&self) -> bool {
        self.unreachable.is_empty()
    }
}

/// Scheduled HTTP pinger.
#[derive(Debug, Clone)]
pub struct KeepAliveJob {
    client: reqwest::Client,
    urls: Vec<Url>,
    interval: Duration,
}

impl KeepAliveJob {
    /// Create a job pinging `urls` every `interval`.
    pub fn new(urls: Vec<Url>, interval: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            urls,
            interval,
        })
    }

    pub fn from_config(config: &KeepAliveConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.urls.clone(), config.interval)
    }

    pub fn urls(&self) -> &[Url] {
        &self.urls
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// GET every target once. Never fails; problems land in the report.
    pub async fn ping_once(&self) -> PingReport {
        let mut report = PingReport::default();

        for url in &self.urls {
            match self.ping(url).await {
                Ok(body) => {
                    tracing::info!(url = %url, body = %body.trim(), "Keep-alive!");
                    report.reachable.push(url.clone());
                }
                Err(reason) => {
                    tracing::warn!(url = %url, %reason, "keep-alive ping failed");
                    report.unreachable.push((url.clone(), reason));
                }
            }
        }

        report
    }

    async fn ping(&self, url: &Url) -> Result<String, String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }
        response.text().await.map_err(|e| e.to_string())
    }

    /// Ping on every tick until `shutdown` resolves. The first tick fires
    /// immediately. Shutdown also cancels a round in flight. Returns the
    /// number of completed rounds.
    pub async fn run(&self, shutdown: impl Future<Output = ()>) -> usize {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        tracing::info!(
            targets = self.urls.len(),
            interval_secs = self.interval.as_secs_f64(),
            "keep-alive job started"
        );

        let mut rounds = 0;
        loop {
            let round = async {
                ticker.tick().await;
                self.ping_once().await
            };
            tokio::select! {
                _ = &mut shutdown => break,
                report = round => {
                    rounds += 1;
                    tracing::debug!(
                        round = rounds,
                        reachable = report.reachable.len(),
                        unreachable = report.unreachable.len(),
                        "keep-alive round finished"
                    );
                }
            }
        }

        tracing::info!(rounds, "keep-alive job stopped");
        rounds
    }
}

/// Execute the keep-alive subcommand.
pub fn run_keep_alive(args: &KeepAliveArgs, env: &EnvSource) -> Result<u8> {
    let joined_urls = (!args.urls.is_empty()).then(|| args.urls.join(","));
    let config = KeepAliveConfig::from_lookup(|key| {
        let flag = match key {
            "KEEP_ALIVE_URLS" => joined_urls.clone(),
            "KEEP_ALIVE_INTERVAL_SECS" => args.interval_secs.map(|secs| secs.to_string()),
            _ => None,
        };
        flag.or_else(|| env.get(key))
    })
    .context("invalid keep-alive configuration")?;

    let job = KeepAliveJob::from_config(&config).context("failed to build HTTP client")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    if args.once {
        let report = runtime.block_on(job.ping_once());
        for (url, reason) in &report.unreachable {
            println!("UNREACHABLE: {url} ({reason})");
        }
        for url in &report.reachable {
            println!("OK: {url}");
        }
        return Ok(if report.all_healthy() { 0 } else { 1 });
    }

    runtime.block_on(job.run(shutdown_signal()));
    Ok(0)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl-C, running until killed: {e}");
        std::future::pending::<()>().await;
    }
}
