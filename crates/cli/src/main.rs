//! Scenario replay binary.
//!
//! Loads a policy and a recorded scenario from a data directory, feeds the
//! snapshots to an [`Engine`] one tick at a time and logs every decision.
//!
//! ```bash
//! rotation pull --data-dir ./data
//! RUST_LOG=debug,ipc=info rotation pull --combo GnbStSimple
//! ```

mod dirs;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use combat_content::gnb::GNB;
use combat_content::{ContentFactory, Preset};
use combat_core::{AbilityOracle, ActionId};
use rotation_runtime::{
    DecisionSource, Engine, FeatureStatusWorker, HttpStatusEndpoint, ReplayBinding, RuntimeConfig,
};

/// Replay a recorded combat scenario against a policy
#[derive(Parser, Debug)]
#[command(name = "rotation")]
#[command(about = "Replay a combat scenario against a policy", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario name under `scenarios/`, without the `.ron` extension
    scenario: String,

    /// Directory holding `policy.toml`, `engine.toml` and `scenarios/`
    #[arg(long, env = "ROTATION_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Press this combo instead of the one recorded in the scenario
    #[arg(long)]
    combo: Option<Preset>,

    /// Check the remote feature status once before replaying
    #[arg(long)]
    check_status: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(dirs::data_dir);
    tracing::info!("Data directory: {}", data_dir.display());

    let factory = ContentFactory::new(&data_dir);
    let policy = factory.load_policy().context("Failed to load policy")?;
    let tunables = factory.load_engine().context("Failed to load engine tunables")?;
    let scenario = factory
        .load_scenario(&cli.scenario)
        .with_context(|| format!("Failed to load scenario '{}'", cli.scenario))?;

    let config = RuntimeConfig::from_env()?;
    let mut engine = Engine::builder().config(config).tunables(tunables).build();

    if cli.check_status {
        let config = engine.config();
        let endpoint = HttpStatusEndpoint::new(config.status_endpoint.clone(), config.http_timeout)?;
        let mut worker = FeatureStatusWorker::new(
            Arc::new(endpoint),
            engine.gate(),
            engine.leases(),
            config.refresh_interval,
        );
        let enabled = worker.refresh().await;
        tracing::info!("Feature status: {}", if enabled { "enabled" } else { "disabled" });
    }

    let combo = cli.combo.unwrap_or(scenario.combo);
    tracing::info!(
        "Replaying '{}' ({} ticks) on {}",
        scenario.name,
        scenario.ticks.len(),
        combo
    );

    let mut binding = ReplayBinding::new(scenario.ticks);
    let mut tick = 0;
    while binding.remaining() > 0 {
        let decision = engine.tick(&mut binding, combo, &policy);
        match decision.action {
            Some(action) => tracing::info!(
                "tick {:>3}: {} ({})",
                tick,
                action_name(action),
                describe(decision.source)
            ),
            None => tracing::info!("tick {:>3}: -", tick),
        }
        tick += 1;
    }

    let pressed: Vec<&str> = binding.submitted().iter().map(|a| action_name(*a)).collect();
    tracing::info!("Submitted {} actions: {}", pressed.len(), pressed.join(" > "));
    Ok(())
}

fn action_name(action: ActionId) -> &'static str {
    GNB.ability(action).map_or("unknown", |ability| ability.name)
}

fn describe(source: DecisionSource) -> String {
    match source {
        DecisionSource::Opener { step } => format!("opener step {}", step),
        DecisionSource::Rule { domain, rank, rule } => {
            format!("{} #{} {}", domain.as_str(), rank, rule)
        }
        DecisionSource::RangedFallback => "ranged".to_string(),
        DecisionSource::BaseCombo => "combo".to_string(),
        DecisionSource::NoEligibleAction => "none".to_string(),
    }
}
