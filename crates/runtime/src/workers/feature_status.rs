//! Remote feature status check.
//!
//! A plaintext endpoint can switch leasing off without a release. The worker
//! polls it off the decision path and caches the answer in a [`FeatureGate`]
//! that ticks read without locking.
//!
//! Reading the body:
//! - trimmed and lower-cased, starts with `enabled`: enabled
//! - anything else: disabled, and every lease is suspended
//! - transport error or non-success status: enabled, with a warning

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::api::{Result, RuntimeError};
use crate::lease::LeaseGateway;

/// Lock-free cache of the last status check.
#[derive(Debug)]
pub struct FeatureGate {
    enabled: AtomicBool,
    checks: AtomicU64,
    /// Milliseconds after `created` of the last check, `u64::MAX` before any.
    last_checked_ms: AtomicU64,
    created: Instant,
}

impl Default for FeatureGate {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureGate {
    /// Starts enabled: nothing is refused before the first check.
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            checks: AtomicU64::new(0),
            last_checked_ms: AtomicU64::new(u64::MAX),
            created: Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Records a check result and returns the previous status.
    pub fn record(&self, enabled: bool) -> bool {
        self.checks.fetch_add(1, Ordering::Relaxed);
        let elapsed = self.created.elapsed().as_millis() as u64;
        self.last_checked_ms.store(elapsed, Ordering::Relaxed);
        self.enabled.swap(enabled, Ordering::Relaxed)
    }

    /// Number of completed checks.
    pub fn checks(&self) -> u64 {
        self.checks.load(Ordering::Relaxed)
    }

    /// Time since the last check, `None` before the first one.
    pub fn since_last_check(&self) -> Option<Duration> {
        match self.last_checked_ms.load(Ordering::Relaxed) {
            u64::MAX => None,
            at => {
                let now = self.created.elapsed().as_millis() as u64;
                Some(Duration::from_millis(now.saturating_sub(at)))
            }
        }
    }
}

/// Interprets a status body.
pub fn parse_status(body: &str) -> bool {
    body.trim().to_lowercase().starts_with("enabled")
}

/// Source of the status body.
#[async_trait]
pub trait StatusEndpoint: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

/// Plain HTTP GET against the status URL.
#[derive(Debug, Clone)]
pub struct HttpStatusEndpoint {
    client: Client,
    url: String,
}

impl HttpStatusEndpoint {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(RuntimeError::HttpClient)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatusEndpoint for HttpStatusEndpoint {
    async fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(RuntimeError::StatusRequest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RuntimeError::StatusCode(status.as_u16()));
        }
        response.text().await.map_err(RuntimeError::StatusRequest)
    }
}

/// Shortest polling interval the worker accepts.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Background worker refreshing the [`FeatureGate`].
pub struct FeatureStatusWorker {
    endpoint: Arc<dyn StatusEndpoint>,
    gate: Arc<FeatureGate>,
    leases: Arc<LeaseGateway>,
    interval: Duration,
}

impl FeatureStatusWorker {
    pub fn new(
        endpoint: Arc<dyn StatusEndpoint>,
        gate: Arc<FeatureGate>,
        leases: Arc<LeaseGateway>,
        interval: Duration,
    ) -> Self {
        if interval < MIN_REFRESH_INTERVAL {
            warn!(
                target: "ipc",
                "Status refresh interval {:?} is too short, using {:?}",
                interval,
                MIN_REFRESH_INTERVAL
            );
        }
        Self {
            endpoint,
            gate,
            leases,
            interval: interval.max(MIN_REFRESH_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Main worker loop. Checks once right away, then every `interval`.
    pub async fn run(mut self) {
        info!(
            target: "ipc",
            "FeatureStatusWorker started (interval: {}s)",
            self.interval.as_secs()
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.refresh().await;
        }
    }

    /// Runs one check and applies it, then sweeps expired leases. Returns the
    /// new status.
    pub async fn refresh(&mut self) -> bool {
        let enabled = match self.endpoint.fetch().await {
            Ok(body) => parse_status(&body),
            Err(e) => {
                warn!(
                    target: "ipc",
                    "Failed to check feature status, assuming it is enabled: {}",
                    e
                );
                true
            }
        };

        let was_enabled = self.gate.record(enabled);
        debug!(target: "ipc", "Feature status: {}", if enabled { "enabled" } else { "disabled" });

        if !enabled {
            self.leases.suspend_all();
        } else if !was_enabled {
            info!(target: "ipc", "Feature re-enabled");
            self.leases.resume();
        }
        self.leases.purge_expired();
        enabled
    }
}
