use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use combat_content::{PolicyConfig, Preset};
use rotation_runtime::{
    Engine, FeatureGate, FeatureStatusWorker, LeaseGateway, LeaseValidation, MIN_REFRESH_INTERVAL,
    Result, RuntimeConfig, RuntimeError, SetResult, StatusEndpoint,
};

/// Answers with queued bodies, then keeps repeating the last one.
struct ScriptedEndpoint {
    replies: Mutex<VecDeque<Option<&'static str>>>,
}

impl ScriptedEndpoint {
    fn new(replies: &[Option<&'static str>]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().copied().collect()),
        })
    }
}

#[async_trait]
impl StatusEndpoint for ScriptedEndpoint {
    async fn fetch(&self) -> Result<String> {
        let mut replies = self.replies.lock().unwrap();
        let reply = if replies.len() > 1 {
            replies.pop_front().flatten()
        } else {
            replies.front().copied().flatten()
        };
        reply
            .map(str::to_string)
            .ok_or(RuntimeError::StatusCode(503))
    }
}

fn worker(endpoint: Arc<ScriptedEndpoint>) -> (FeatureStatusWorker, Arc<FeatureGate>, Arc<LeaseGateway>) {
    let gate = Arc::new(FeatureGate::new());
    let leases = Arc::new(LeaseGateway::new(Duration::from_secs(600)));
    let worker = FeatureStatusWorker::new(
        endpoint,
        Arc::clone(&gate),
        Arc::clone(&leases),
        Duration::from_secs(1200),
    );
    (worker, gate, leases)
}

#[tokio::test]
async fn enabled_body_keeps_leases() {
    let (mut worker, gate, leases) = worker(ScriptedEndpoint::new(&[Some("Enabled\n")]));
    let lease = leases.register("autoduty", "dungeon").unwrap();

    assert!(worker.refresh().await);
    assert!(gate.is_enabled());
    assert_eq!(gate.checks(), 1);
    assert_eq!(leases.validate(lease), LeaseValidation::Ok);
}

#[tokio::test]
async fn disabled_body_suspends_leasing() {
    let (mut worker, gate, leases) = worker(ScriptedEndpoint::new(&[Some("disabled")]));
    let lease = leases.register("autoduty", "dungeon").unwrap();

    assert!(!worker.refresh().await);
    assert!(!gate.is_enabled());
    assert!(leases.is_suspended());
    assert_eq!(leases.validate(lease), LeaseValidation::FeatureDisabled);
}

#[tokio::test]
async fn transport_errors_fail_open() {
    let (mut worker, gate, leases) = worker(ScriptedEndpoint::new(&[None]));
    let lease = leases.register("autoduty", "dungeon").unwrap();

    assert!(worker.refresh().await);
    assert!(gate.is_enabled());
    assert_eq!(leases.validate(lease), LeaseValidation::Ok);
}

#[tokio::test]
async fn re_enabling_resumes_registrations() {
    let endpoint = ScriptedEndpoint::new(&[Some("disabled"), Some("enabled")]);
    let (mut worker, gate, leases) = worker(endpoint);

    worker.refresh().await;
    assert_eq!(leases.register("autoduty", "dungeon"), Err(SetResult::IpcDisabled));

    worker.refresh().await;
    assert!(gate.is_enabled());
    assert!(!leases.is_suspended());
    assert!(leases.register("autoduty", "dungeon").is_ok());
}

#[tokio::test]
async fn refresh_sweeps_expired_leases() {
    let gate = Arc::new(FeatureGate::new());
    let leases = Arc::new(LeaseGateway::new(Duration::from_millis(1)));
    let mut worker = FeatureStatusWorker::new(
        ScriptedEndpoint::new(&[Some("enabled")]),
        gate,
        Arc::clone(&leases),
        Duration::from_secs(1200),
    );
    for i in 0..50 {
        leases.register(&format!("holder-{i}"), "burst").unwrap();
    }
    assert_eq!(leases.stored(), 50);

    std::thread::sleep(Duration::from_millis(5));
    assert!(worker.refresh().await);
    assert_eq!(leases.stored(), 0);
}

#[test]
fn zero_interval_is_raised_to_the_minimum() {
    let (_, gate, leases) = worker(ScriptedEndpoint::new(&[Some("enabled")]));
    let worker = FeatureStatusWorker::new(
        ScriptedEndpoint::new(&[Some("enabled")]),
        gate,
        leases,
        Duration::ZERO,
    );
    assert_eq!(worker.interval(), MIN_REFRESH_INTERVAL);
}

#[tokio::test(start_paused = true)]
async fn engine_with_zero_refresh_interval_still_polls() {
    let config = RuntimeConfig {
        refresh_interval: Duration::ZERO,
        ..RuntimeConfig::default()
    };
    let engine = Engine::builder().config(config).build();
    let handle = engine.spawn_feature_status(ScriptedEndpoint::new(&[Some("enabled")]));

    tokio::time::sleep(MIN_REFRESH_INTERVAL * 3 + Duration::from_millis(10)).await;
    assert!(engine.gate().checks() >= 3);

    Engine::stop_worker(handle).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn engine_worker_polls_until_stopped() {
    let engine = Engine::builder().build();
    let lease = engine.leases().register("autoduty", "dungeon").unwrap();
    engine.leases().set_preset(lease, Preset::GnbStSimple, true);

    let handle = engine.spawn_feature_status(ScriptedEndpoint::new(&[Some("disabled")]));
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(!engine.gate().is_enabled());
    assert!(!engine
        .effective_policy(&PolicyConfig::default())
        .is_enabled(Preset::GnbStSimple));

    Engine::stop_worker(handle).await.unwrap();
}
