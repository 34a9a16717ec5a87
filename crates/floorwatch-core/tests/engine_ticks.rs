//! Integration tests for the engine's clocks, control events and snapshot.
//!
//! Every engine is seeded, so each run replays the same jitter and drift.

use std::time::Duration;

use chrono::Utc;
use floorwatch_core::prelude::*;
use floorwatch_logic::model::WellbeingStats;
use floorwatch_logic::tick::HAZARD_REASON;

// ── Helpers ────────────────────────────────────────────────────────────

fn run_seconds(engine: &mut SimulationEngine, seconds: u32) {
    for _ in 0..seconds * 10 {
        engine.update(Duration::from_millis(100));
    }
}

fn fingerprint(engine: &SimulationEngine) -> Vec<(String, f32, f32, String, WellbeingStats)> {
    engine
        .people()
        .into_iter()
        .map(|p| (p.id, p.position.x, p.position.y, p.zone_id, p.wellbeing))
        .collect()
}

// ── Clocks ─────────────────────────────────────────────────────────────

#[test]
fn same_seed_replays_identically() {
    let scenario = Scenario::warehouse(Utc::now());
    let mut a = SimulationEngine::with_seed(FloorConfig::default(), scenario.clone(), 42).unwrap();
    let mut b = SimulationEngine::with_seed(FloorConfig::default(), scenario, 42).unwrap();

    run_seconds(&mut a, 120);
    run_seconds(&mut b, 120);

    assert_eq!(fingerprint(&a), fingerprint(&b));
    assert_eq!(a.assets(), b.assets());
    assert_eq!(a.metrics(), b.metrics());
}

#[test]
fn tick_counts_follow_periods() {
    let mut engine = SimulationEngine::warehouse(7).unwrap();
    run_seconds(&mut engine, 30);
    assert_eq!(engine.asset_ticks(), 300);
    assert_eq!(engine.person_ticks(), 30);

    // One big step runs the same ticks as many small ones
    let mut bulk = SimulationEngine::warehouse(7).unwrap();
    bulk.update(Duration::from_secs(30));
    assert_eq!(bulk.asset_ticks(), 300);
    assert_eq!(bulk.person_ticks(), 30);
}

#[test]
fn custom_periods_are_honored() {
    let config = FloorConfig {
        asset_tick_ms: 50,
        person_tick_ms: 500,
        ..Default::default()
    };
    let mut engine =
        SimulationEngine::with_seed(config, Scenario::warehouse(Utc::now()), 3).unwrap();
    engine.update(Duration::from_secs(2));
    assert_eq!(engine.asset_ticks(), 40);
    assert_eq!(engine.person_ticks(), 4);
}

#[test]
fn forklift_moves_ten_steps_per_second() {
    let mut engine = SimulationEngine::warehouse(1).unwrap();
    engine.update(Duration::from_secs(1));
    let forklift = &engine.assets()[0];
    assert!((forklift.position.x - 362.0).abs() < 1e-3);
    assert!((forklift.position.y - 288.0).abs() < 1e-3);
}

// ── Invariants over a long run ─────────────────────────────────────────

#[test]
fn people_and_stability_stay_in_range() {
    let mut engine = SimulationEngine::warehouse(99).unwrap();
    let config = engine.config().clone();
    let bounds = config.bounds();

    for _ in 0..600 {
        engine.update(Duration::from_secs(1));
        for p in engine.people() {
            assert!(bounds.contains(p.position), "{} left the floor: {:?}", p.id, p.position);
            assert!(
                (config.stability_floor..=config.stability_ceiling)
                    .contains(&p.wellbeing.stability_score),
                "{} stability {}",
                p.id,
                p.wellbeing.stability_score
            );
        }
    }
}

#[test]
fn isolation_alert_never_clears() {
    let mut engine = SimulationEngine::warehouse(5).unwrap();
    engine.update(Duration::from_secs(1));
    let isolated: Vec<String> = engine
        .people()
        .into_iter()
        .filter(|p| p.wellbeing.isolation_alert)
        .map(|p| p.id)
        .collect();
    // Visitor_04 (4500 s alone) and Worker_02 (420 s alone)
    assert!(isolated.contains(&"p2".to_string()));
    assert!(isolated.contains(&"p4".to_string()));

    for _ in 0..300 {
        engine.update(Duration::from_secs(1));
        let people = engine.people();
        for id in &isolated {
            let p = people.iter().find(|p| &p.id == id).unwrap();
            assert!(p.wellbeing.isolation_alert, "{id} lost its alert");
        }
    }
}

#[test]
fn violation_reason_matches_flags() {
    let mut engine = SimulationEngine::warehouse(11).unwrap();
    for _ in 0..120 {
        engine.update(Duration::from_secs(1));
        for p in engine.people() {
            assert_eq!(p.safety_violation, p.violation_reason.is_some());
            if p.safety_status != SafetyStatus::Safe {
                assert_eq!(p.violation_reason.as_deref(), Some(HAZARD_REASON));
            }
        }
    }
}

#[test]
fn metrics_match_fresh_aggregation() {
    let mut engine = SimulationEngine::warehouse(8).unwrap();
    run_seconds(&mut engine, 45);
    let fresh = floorwatch_logic::metrics::aggregate(
        &engine.layout().zones,
        &engine.people(),
        engine.config(),
    );
    assert_eq!(engine.metrics(), &fresh);
    assert_eq!(engine.metrics().bottlenecks.len(), engine.layout().zones.len());
}

// ── Control events ─────────────────────────────────────────────────────

#[test]
fn nudges_never_leave_the_floor() {
    let mut engine = SimulationEngine::warehouse(1).unwrap();
    let bounds = engine.config().bounds();

    for _ in 0..100 {
        engine.nudge_asset(Direction::Right).unwrap();
    }
    let pos = engine.nudge_asset(Direction::Down).unwrap();
    assert_eq!(pos.x, bounds.max_x());
    assert!(bounds.contains(pos));

    for _ in 0..100 {
        engine.nudge_asset(Direction::Up).unwrap();
        engine.nudge_asset(Direction::Left).unwrap();
    }
    let forklift = &engine.assets()[0];
    assert_eq!(forklift.position.x, bounds.min_x());
    assert_eq!(forklift.position.y, bounds.min_y());
}

#[test]
fn nudging_onto_a_person_triggers_danger_next_tick() {
    let mut engine = SimulationEngine::warehouse(1).unwrap();
    // Tech_John starts at (200, 200); the forklift starts at (350, 280)
    for _ in 0..15 {
        engine.nudge_asset(Direction::Left).unwrap();
    }
    for _ in 0..8 {
        engine.nudge_asset(Direction::Up).unwrap();
    }
    engine.update(Duration::from_secs(1));

    let john = engine.people().into_iter().find(|p| p.id == "p1").unwrap();
    assert_ne!(john.safety_status, SafetyStatus::Safe);
    assert!(john.safety_violation);
    assert_eq!(engine.metrics().system_status, SystemStatus::Stormy);
}

#[test]
fn selection_does_not_touch_people() {
    let scenario = Scenario::warehouse(Utc::now());
    let mut plain = SimulationEngine::with_seed(FloorConfig::default(), scenario.clone(), 21).unwrap();
    let mut selecting = SimulationEngine::with_seed(FloorConfig::default(), scenario, 21).unwrap();

    for second in 0..60 {
        let id = ["p1", "p2", "p3"][second % 3];
        selecting.select_person(Some(id)).unwrap();
        assert!(selecting.select_person(Some("ghost")).is_err());
        plain.update(Duration::from_secs(1));
        selecting.update(Duration::from_secs(1));
    }

    assert_eq!(fingerprint(&plain), fingerprint(&selecting));
}

// ── Snapshot ───────────────────────────────────────────────────────────

#[test]
fn snapshot_serializes_in_camel_case() {
    let mut engine = SimulationEngine::warehouse(2).unwrap();
    engine.select_person(Some("p2")).unwrap();
    engine.update(Duration::from_millis(1500));

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.sim_time_ms, 1500);
    assert_eq!(snapshot.selected().map(|v| v.person.name.as_str()), Some("Visitor_04"));

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["simTimeMs"], 1500);
    assert_eq!(json["selectedPersonId"], "p2");
    assert_eq!(json["accessPoints"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["metrics"]["systemStatus"], "STORMY");
    assert_eq!(json["people"][1]["isAuthenticated"], false);
    assert!(json["people"][0]["efficiency"]["level"].is_string());
}

#[test]
fn extra_personnel_join_the_tick() {
    let mut engine = SimulationEngine::warehouse(4).unwrap();
    let ids = engine.add_personnel(20);
    assert_eq!(ids.len(), 20);

    run_seconds(&mut engine, 10);
    let people = engine.people();
    assert_eq!(people.len(), 25);
    assert!(people.iter().all(|p| p.last_seen == people[0].last_seen));
    assert_eq!(engine.metrics().active_personnel, 25);
}
