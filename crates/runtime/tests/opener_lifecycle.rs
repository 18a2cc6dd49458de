use combat_content::gnb::actions;
use combat_content::{PolicyConfig, Preset};
use combat_core::{CombatSnapshot, GaugeKind, Job, OpenerDefinition, StartChoice, TargetState};
use rotation_runtime::{DecisionSource, Engine, Mode, OpenerAbort, OpenerOutcome, Role};

const ST: Role = Role::new(Job::Gunbreaker, Mode::SingleTarget);

fn pull(now: f64) -> CombatSnapshot {
    CombatSnapshot::new(Job::Gunbreaker, 100)
        .at(now)
        .in_combat()
        .with_target(TargetState::hostile(100.0).boss())
        .with_base_recast(2.40)
}

/// The pull and Bloodfest went out; the gauge reads `cartridges`.
fn after_bloodfest(cartridges: u8) -> CombatSnapshot {
    pull(11.0)
        .with_used(actions::LIGHTNING_SHOT, 10.1)
        .with_used(actions::BLOODFEST, 10.6)
        .with_cooldown(actions::BLOODFEST, 119.6)
        .with_gauge(GaugeKind::Cartridges, cartridges)
        .with_gcd(1.5, 2.4)
}

/// Every step before `done` went out on schedule with its effects visible.
fn after_steps(def: &OpenerDefinition, done: usize) -> CombatSnapshot {
    let mut snapshot = pull(10.2 + 0.6 * done as f64).with_gcd(0.0, 2.4);
    for (i, step) in def.steps[..done].iter().enumerate() {
        snapshot = snapshot
            .with_used(step.action, 10.1 + 0.6 * i as f64)
            .with_cooldown(step.action, 30.0);
        if let Some((kind, value)) = step.expect_gauge {
            snapshot = snapshot.with_gauge(kind, value);
        }
    }
    snapshot
}

fn policy() -> PolicyConfig {
    PolicyConfig::default().enable_tree(Preset::GnbStAdvanced)
}

#[test]
fn steps_advance_as_history_confirms_them() {
    let mut engine = Engine::builder().build();
    let policy = policy();

    let first = engine.decide(Preset::GnbStAdvanced, &pull(10.0), &policy);
    assert_eq!(first.action, Some(actions::LIGHTNING_SHOT));

    let weave = pull(10.5)
        .with_used(actions::LIGHTNING_SHOT, 10.1)
        .with_gcd(1.9, 2.4);
    let second = engine.decide(Preset::GnbStAdvanced, &weave, &policy);
    assert_eq!(second.action, Some(actions::BLOODFEST));
    assert_eq!(second.source, DecisionSource::Opener { step: 1 });

    let third = engine.decide(Preset::GnbStAdvanced, &after_bloodfest(3), &policy);
    assert_eq!(third.action, Some(actions::KEEN_EDGE));
    assert_eq!(third.source, DecisionSource::Opener { step: 2 });

    let run = engine.opener(ST).expect("opener run");
    assert_eq!(run.definition().map(|d| d.name), Some("Lv100 Fast Normal No Mercy"));
    assert!(!run.is_finished());
}

#[test]
fn gauge_disagreement_hands_over_to_the_rotation() {
    let mut engine = Engine::builder().build();
    let policy = policy();
    engine.decide(Preset::GnbStAdvanced, &pull(10.0), &policy);

    let decision = engine.decide(Preset::GnbStAdvanced, &after_bloodfest(0), &policy);
    assert!(!matches!(decision.source, DecisionSource::Opener { .. }));
    assert_eq!(
        engine.opener(ST).and_then(|run| run.outcome()),
        Some(OpenerOutcome::Aborted(OpenerAbort::GaugeMismatch {
            step: 1,
            kind: GaugeKind::Cartridges,
            expected: 3,
            found: 0,
        }))
    );
}

#[test]
fn a_stalled_step_times_out() {
    let mut engine = Engine::builder().build();
    let policy = policy();
    engine.decide(Preset::GnbStAdvanced, &pull(10.0), &policy);

    let decision = engine.decide(Preset::GnbStAdvanced, &pull(17.0), &policy);
    assert_eq!(decision.action, Some(actions::KEEN_EDGE));
    assert_eq!(decision.source, DecisionSource::BaseCombo);
    assert_eq!(
        engine.opener(ST).and_then(|run| run.outcome()),
        Some(OpenerOutcome::Aborted(OpenerAbort::StepTimedOut { step: 0 }))
    );
}

#[test]
fn melee_start_skips_the_pull() {
    let mut engine = Engine::builder().build();
    let mut policy = policy();
    policy.gnb.opener.start_choice = StartChoice::Melee;

    let decision = engine.decide(Preset::GnbStAdvanced, &pull(10.0), &policy);
    assert_eq!(decision.action, Some(actions::BLOODFEST));
    assert_eq!(decision.source, DecisionSource::Opener { step: 1 });
}

#[test]
fn cancelled_opener_stays_cancelled_until_combat_ends() {
    let mut engine = Engine::builder().build();
    let policy = policy();
    engine.decide(Preset::GnbStAdvanced, &pull(10.0), &policy);

    assert!(engine.cancel_opener(ST));
    assert!(!engine.cancel_opener(ST));

    let decision = engine.decide(Preset::GnbStAdvanced, &pull(10.5), &policy);
    assert_eq!(decision.source, DecisionSource::BaseCombo);
    assert_eq!(
        engine.opener(ST).and_then(|run| run.outcome()),
        Some(OpenerOutcome::Aborted(OpenerAbort::Cancelled))
    );

    // A new pull gets a fresh run.
    let idle = CombatSnapshot::new(Job::Gunbreaker, 100).at(30.0);
    engine.decide(Preset::GnbStAdvanced, &idle, &policy);
    let decision = engine.decide(Preset::GnbStAdvanced, &pull(40.0), &policy);
    assert_eq!(decision.source, DecisionSource::Opener { step: 0 });
}

#[test]
fn opener_needs_its_option_enabled() {
    let mut engine = Engine::builder().build();
    let mut policy = policy();
    policy.enabled.remove(&Preset::GnbStOpener);

    let decision = engine.decide(Preset::GnbStAdvanced, &pull(10.0), &policy);
    assert_eq!(decision.source, DecisionSource::BaseCombo);
    assert!(engine.opener(ST).is_none());
}

#[test]
fn full_opener_hands_over_when_complete() {
    let mut engine = Engine::builder().build();
    let policy = policy();
    engine.decide(Preset::GnbStAdvanced, &pull(10.0), &policy);
    let def = engine
        .opener(ST)
        .and_then(|run| run.definition())
        .cloned()
        .expect("opener selected");

    for done in 1..def.len() {
        let decision = engine.decide(Preset::GnbStAdvanced, &after_steps(&def, done), &policy);
        assert_eq!(decision.source, DecisionSource::Opener { step: done }, "after {done} steps");
    }

    let decision = engine.decide(Preset::GnbStAdvanced, &after_steps(&def, def.len()), &policy);
    assert!(!matches!(decision.source, DecisionSource::Opener { .. }));
    assert_eq!(
        engine.opener(ST).and_then(|run| run.outcome()),
        Some(OpenerOutcome::Completed)
    );
}

#[test]
fn no_mercy_waits_for_the_late_weave_window() {
    let mut engine = Engine::builder().build();
    let policy = policy();
    engine.decide(Preset::GnbStAdvanced, &pull(10.0), &policy);
    let def = engine
        .opener(ST)
        .and_then(|run| run.definition())
        .cloned()
        .expect("opener selected");

    let early = after_steps(&def, 4).with_gcd(1.5, 2.4);
    let decision = engine.decide(Preset::GnbStAdvanced, &early, &policy);
    assert_eq!(decision.action, None);
    assert_eq!(decision.source, DecisionSource::Opener { step: 4 });

    let late = after_steps(&def, 4).with_gcd(0.3, 2.4);
    let decision = engine.decide(Preset::GnbStAdvanced, &late, &policy);
    assert_eq!(decision.action, Some(actions::NO_MERCY));
    assert_eq!(decision.source, DecisionSource::Opener { step: 4 });
}
