//! Long-lived decision engine.
//!
//! The engine owns everything that outlives a tick: the rule cache, the
//! opener run of each role, the lease gateway and the feature gate. A tick
//! itself is synchronous and reads one snapshot.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use combat_content::gnb::{SPEED_TIERS, actions, openers};
use combat_content::{PolicyConfig, Preset};
use combat_core::{CombatSnapshot, EngineConfig, Job, OpenerDefinition};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{GameBinding, Result, RuntimeError, WorkerKind};
use crate::context::DecisionContext;
use crate::ipc::{AutoRotationPresets, PolicyView};
use crate::lease::{LeaseGateway, LeaseeNotifier, NoopNotifier, PresetOverrides};
use crate::opener::{OpenerOutput, OpenerRun};
use crate::rotation::{self, ActiveCombo, Decision, Mode, Role, RuleCache};
use crate::workers::{FeatureGate, FeatureStatusWorker, HttpStatusEndpoint, StatusEndpoint};

pub const DEFAULT_STATUS_ENDPOINT: &str =
    "https://raw.githubusercontent.com/PunishXIV/WrathCombo/main/res/ipc_status.txt";

/// Runtime configuration shared across the engine and its workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub lease_ttl: Duration,
    pub status_endpoint: String,
    pub refresh_interval: Duration,
    pub http_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            lease_ttl: Duration::from_secs(10 * 60),
            status_endpoint: DEFAULT_STATUS_ENDPOINT.to_string(),
            refresh_interval: Duration::from_secs(20 * 60),
            http_timeout: Duration::from_secs(5),
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `ROTATION_*` environment variables.
    ///
    /// | variable | field |
    /// |---|---|
    /// | `ROTATION_LEASE_TTL_SECS` | `lease_ttl` |
    /// | `ROTATION_STATUS_ENDPOINT` | `status_endpoint` |
    /// | `ROTATION_STATUS_REFRESH_SECS` | `refresh_interval` |
    /// | `ROTATION_HTTP_TIMEOUT_SECS` | `http_timeout` |
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(secs) = env_secs("ROTATION_LEASE_TTL_SECS")? {
            config.lease_ttl = secs;
        }
        if let Ok(endpoint) = env::var("ROTATION_STATUS_ENDPOINT") {
            if endpoint.trim().is_empty() {
                return Err(RuntimeError::InvalidEnv {
                    name: "ROTATION_STATUS_ENDPOINT",
                    value: endpoint,
                });
            }
            config.status_endpoint = endpoint;
        }
        if let Some(secs) = env_secs("ROTATION_STATUS_REFRESH_SECS")? {
            config.refresh_interval = secs;
        }
        if let Some(secs) = env_secs("ROTATION_HTTP_TIMEOUT_SECS")? {
            config.http_timeout = secs;
        }
        Ok(config)
    }
}

fn env_secs(name: &'static str) -> Result<Option<Duration>> {
    let Ok(value) = env::var(name) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(RuntimeError::InvalidEnv { name, value }),
    }
}

/// Decision engine.
///
/// One engine serves every role of the player; keep it for the whole
/// session so rule tables are built once.
pub struct Engine {
    config: RuntimeConfig,
    tunables: EngineConfig,
    cache: RuleCache,
    openers: HashMap<Role, OpenerRun>,
    catalog: Arc<[OpenerDefinition]>,
    auto_rotation: AutoRotationPresets,
    leases: Arc<LeaseGateway>,
    gate: Arc<FeatureGate>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn tunables(&self) -> &EngineConfig {
        &self.tunables
    }

    pub fn leases(&self) -> Arc<LeaseGateway> {
        Arc::clone(&self.leases)
    }

    pub fn gate(&self) -> Arc<FeatureGate> {
        Arc::clone(&self.gate)
    }

    pub fn cache(&self) -> &RuleCache {
        &self.cache
    }

    /// Drops cached tables and preset lists after job content changed.
    pub fn invalidate_content(&mut self, job: Option<Job>) {
        info!("Invalidating rule content ({:?})", job);
        self.cache.invalidate(job);
        self.auto_rotation.invalidate(job);
    }

    /// Presets that make `job` auto-rotation ready.
    pub fn auto_rotation_presets(&mut self, job: Job, include_options: bool) -> &[Preset] {
        self.auto_rotation.get(job, include_options)
    }

    /// Lease overrides currently in force. Empty while the feature is off.
    pub fn overrides(&self) -> PresetOverrides {
        if self.gate.is_enabled() {
            self.leases.overrides()
        } else {
            PresetOverrides::default()
        }
    }

    /// The user policy with lease overrides applied.
    pub fn effective_policy(&self, policy: &PolicyConfig) -> PolicyConfig {
        let overrides = self.overrides();
        PolicyView::new(policy, &overrides).effective()
    }

    pub fn opener(&self, role: Role) -> Option<&OpenerRun> {
        self.openers.get(&role)
    }

    /// Aborts the role's running opener. Returns `false` if none was running.
    pub fn cancel_opener(&mut self, role: Role) -> bool {
        self.openers.get_mut(&role).is_some_and(OpenerRun::cancel)
    }

    // ========================================================================
    // Decisions
    // ========================================================================

    /// Decides the action for the pressed `combo` on one snapshot.
    ///
    /// Never fails: an unusable snapshot, an unknown combo or a disabled one
    /// all yield [`Decision::none`].
    pub fn decide(
        &mut self,
        combo: Preset,
        snapshot: &CombatSnapshot,
        policy: &PolicyConfig,
    ) -> Decision {
        if let Err(e) = snapshot.validate() {
            warn!("Rejected snapshot: {}", e);
            return Decision::none();
        }
        if !snapshot.player.in_combat && !self.openers.is_empty() {
            debug!("Combat ended, dropping {} opener runs", self.openers.len());
            self.openers.clear();
        }

        let Some(role) = Role::from_preset(combo) else {
            debug!("{} does not drive a rotation", combo);
            return Decision::none();
        };
        if role.job != snapshot.player.job {
            debug!("{} pressed as {}", combo, snapshot.player.job);
            return Decision::none();
        }

        let policy = self.effective_policy(policy);
        let Some(active) = ActiveCombo::resolve(role, &policy) else {
            debug!("{:?} has no enabled combo", role);
            return Decision::none();
        };
        let ctx = active.context(snapshot.clone(), policy, self.tunables.clone());

        if let Some(decision) = self.opener_decision(role, &ctx) {
            return decision;
        }
        rotation::evaluate(self.cache.tables(role), role, &ctx)
    }

    /// Consults (and on the first combat tick, starts) the role's opener.
    fn opener_decision(&mut self, role: Role, ctx: &DecisionContext) -> Option<Decision> {
        let cond = ctx.cond();
        let applicable = role.mode == Mode::SingleTarget
            && cond.in_combat()
            && ctx.preset_enabled(Preset::GnbStOpener)
            && cond.level_checked(actions::DOUBLE_DOWN);
        if !applicable {
            return None;
        }

        let catalog = Arc::clone(&self.catalog);
        let run = self
            .openers
            .entry(role)
            .or_insert_with(|| OpenerRun::new(catalog, SPEED_TIERS));
        match run.tick(&cond, &ctx.gnb().opener, &self.tunables) {
            OpenerOutput::Play { action, step } => {
                debug!("Opener step {} -> {:?}", step, action);
                Some(Decision::opener(action, step))
            }
            OpenerOutput::Hold { step } => Some(Decision::opener_hold(step)),
            OpenerOutput::Finished(_) => None,
        }
    }

    /// Reads one snapshot from `binding`, decides, and submits the action.
    pub fn tick(
        &mut self,
        binding: &mut dyn GameBinding,
        combo: Preset,
        policy: &PolicyConfig,
    ) -> Decision {
        let snapshot = binding.snapshot();
        let decision = self.decide(combo, &snapshot, policy);
        if let Some(action) = decision.action {
            binding.submit(action);
        }
        decision
    }

    // ========================================================================
    // Workers
    // ========================================================================

    /// Spawns the feature status worker against `endpoint`.
    pub fn spawn_feature_status(&self, endpoint: Arc<dyn StatusEndpoint>) -> JoinHandle<()> {
        let worker = FeatureStatusWorker::new(
            endpoint,
            Arc::clone(&self.gate),
            Arc::clone(&self.leases),
            self.config.refresh_interval,
        );
        tokio::spawn(worker.run())
    }

    /// Spawns the feature status worker against the configured HTTP endpoint.
    pub fn spawn_http_feature_status(&self) -> Result<JoinHandle<()>> {
        let endpoint =
            HttpStatusEndpoint::new(self.config.status_endpoint.clone(), self.config.http_timeout)?;
        Ok(self.spawn_feature_status(Arc::new(endpoint)))
    }

    /// Stops a worker spawned by this engine.
    pub async fn stop_worker(handle: JoinHandle<()>) -> Result<()> {
        handle.abort();
        match handle.await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => Ok(()),
            Err(source) => Err(RuntimeError::WorkerJoin {
                kind: WorkerKind::FeatureStatus,
                source,
            }),
        }
    }
}

/// Builder for [`Engine`].
pub struct EngineBuilder {
    config: RuntimeConfig,
    tunables: EngineConfig,
    notifier: Arc<dyn LeaseeNotifier>,
    gate: Option<Arc<FeatureGate>>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            tunables: EngineConfig::default(),
            notifier: Arc::new(NoopNotifier),
            gate: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Weave thresholds and opener tolerances.
    pub fn tunables(mut self, tunables: EngineConfig) -> Self {
        self.tunables = tunables;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn LeaseeNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Shares an existing gate instead of creating one.
    pub fn gate(mut self, gate: Arc<FeatureGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn build(self) -> Engine {
        let leases = Arc::new(LeaseGateway::with_notifier(self.config.lease_ttl, self.notifier));
        info!(
            "Engine ready (lease ttl: {}s, status refresh: {}s)",
            self.config.lease_ttl.as_secs(),
            self.config.refresh_interval.as_secs()
        );
        Engine {
            config: self.config,
            tunables: self.tunables,
            cache: RuleCache::new(),
            openers: HashMap::new(),
            catalog: openers().into(),
            auto_rotation: AutoRotationPresets::new(),
            leases,
            gate: self.gate.unwrap_or_default(),
        }
    }
}
