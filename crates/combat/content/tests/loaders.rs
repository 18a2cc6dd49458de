use std::fs;

use combat_content::{ContentFactory, Preset};
use combat_core::{ActionId, EngineConfig, GaugeKind, Job, TargetKind};
use tempfile::TempDir;

const POLICY: &str = r#"
enabled = ["GnbStAdvanced", "GnbStOpener", "GnbStNoMercy"]
auto_mode = ["GnbStAdvanced"]

[gnb]
st_no_mercy_stop = 7.5

[gnb.opener]
variant = "Early"
start_choice = "Melee"
"#;

const SCENARIO: &str = r#"
(
    name: "pull",
    combo: GnbStAdvanced,
    ticks: [
        (
            now: 0.0,
            player: (job: Gunbreaker, level: 100, hp_percent: 100.0, in_combat: true,
                     in_party: false, base_recast: 2.5),
            gcd: (remaining: 0.0, total: 2.5),
            target: Some((kind: Hostile, hp_percent: 100.0, in_melee_range: true)),
        ),
        (
            now: 2.5,
            player: (job: Gunbreaker, level: 100, hp_percent: 98.0, in_combat: true,
                     in_party: false, base_recast: 2.5),
            gcd: (remaining: 1.9, total: 2.5),
            target: Some((kind: Hostile, hp_percent: 99.0, in_melee_range: true)),
            gauges: [(kind: Cartridges, value: 3)],
            cooldowns: [(action: 16164, remaining: 119.0, charges: 0)],
            history: [(action: 16164, at: 2.0)],
        ),
    ],
)
"#;

fn data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("policy.toml"), POLICY).unwrap();
    fs::create_dir(dir.path().join("scenarios")).unwrap();
    fs::write(dir.path().join("scenarios").join("pull.ron"), SCENARIO).unwrap();
    dir
}

#[test]
fn loads_policy_from_data_dir() {
    let dir = data_dir();
    let factory = ContentFactory::new(dir.path());

    let policy = factory.load_policy().unwrap();
    assert!(policy.is_enabled(Preset::GnbStOpener));
    assert!(policy.is_auto_mode(Preset::GnbStAdvanced));
    assert_eq!(policy.gnb.st_no_mercy_stop, 7.5);
    assert_eq!(policy.gnb.opener.variant, combat_core::OpenerVariant::Early);
    assert_eq!(policy.gnb.opener.start_choice, combat_core::StartChoice::Melee);
}

#[test]
fn missing_engine_file_uses_defaults() {
    let dir = data_dir();
    let factory = ContentFactory::new(dir.path());

    assert_eq!(factory.load_engine().unwrap(), EngineConfig::default());
}

#[test]
fn engine_file_overrides_thresholds() {
    let dir = data_dir();
    fs::write(
        dir.path().join("engine.toml"),
        "[weave]\nmin_weave = 0.7\n",
    )
    .unwrap();

    let engine = ContentFactory::new(dir.path()).load_engine().unwrap();
    assert_eq!(engine.weave.min_weave, 0.7);
    assert_eq!(
        engine.weave.late_weave_start,
        EngineConfig::DEFAULT_LATE_WEAVE_START
    );
}

#[test]
fn loads_scenario_snapshots() {
    let dir = data_dir();
    let scenario = ContentFactory::new(dir.path()).load_scenario("pull").unwrap();

    assert_eq!(scenario.name, "pull");
    assert_eq!(scenario.combo, Preset::GnbStAdvanced);
    assert_eq!(scenario.ticks.len(), 2);

    let second = &scenario.ticks[1];
    assert_eq!(second.player.job, Job::Gunbreaker);
    assert_eq!(second.gauge(GaugeKind::Cartridges), 3);
    assert_eq!(second.cooldown(ActionId(16164)).map(|c| c.remaining), Some(119.0));
    assert_eq!(second.target.map(|t| t.kind), Some(TargetKind::Hostile));
    assert_eq!(second.history().len(), 1);
}

#[test]
fn rejects_non_finite_snapshots() {
    let dir = data_dir();
    let broken = SCENARIO.replace("hp_percent: 98.0", "hp_percent: NaN");
    fs::write(dir.path().join("scenarios").join("broken.ron"), broken).unwrap();

    assert!(ContentFactory::new(dir.path()).load_scenario("broken").is_err());
}

#[test]
fn missing_policy_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(ContentFactory::new(dir.path()).load_policy().is_err());
}
