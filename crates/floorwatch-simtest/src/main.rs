//! Floorwatch Headless Simulation Harness
//!
//! Runs the floor engine for a number of simulated seconds and checks the
//! floor invariants after every person tick. No rendering, no networking.
//!
//! Usage:
//!   cargo run -p floorwatch-simtest
//!   cargo run -p floorwatch-simtest -- --seconds 600 --seed 42 --verbose
//!   cargo run -p floorwatch-simtest -- --config floor.json --json
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use floorwatch_core::prelude::*;
use floorwatch_logic::geometry::format_time;
use floorwatch_logic::metrics::aggregate;
use floorwatch_logic::model::ZoneType;
use floorwatch_logic::tick::resolve_zone;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Frame length the harness drives the engine with
const FRAME: Duration = Duration::from_millis(100);

// ── Command line ────────────────────────────────────────────────────────

struct Args {
    seconds: u64,
    seed: Option<u64>,
    config: Option<PathBuf>,
    extra_people: u32,
    json: bool,
    verbose: bool,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args {
        seconds: 60,
        seed: None,
        config: None,
        extra_people: 0,
        json: false,
        verbose: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--seconds" => args.seconds = value_of(&flag, iter.next())?.parse()?,
            "--seed" => args.seed = Some(value_of(&flag, iter.next())?.parse()?),
            "--config" => args.config = Some(PathBuf::from(value_of(&flag, iter.next())?)),
            "--extra-people" => args.extra_people = value_of(&flag, iter.next())?.parse()?,
            "--json" => args.json = true,
            "--verbose" => args.verbose = true,
            other => return Err(format!("unknown argument `{other}`").into()),
        }
    }
    Ok(args)
}

fn value_of(flag: &str, value: Option<String>) -> Result<String, Box<dyn Error>> {
    value.ok_or_else(|| format!("{flag} needs a value").into())
}

/// Missing fields fall back to the defaults
fn load_config(path: Option<&PathBuf>) -> Result<FloorConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let config: FloorConfig = serde_json::from_str(&text)?;
            info!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(FloorConfig::default()),
    }
}

// ── Invariant tracking ──────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// Violation count and first offending detail per invariant
#[derive(Default)]
struct Checks {
    order: Vec<&'static str>,
    failures: HashMap<&'static str, (usize, String)>,
}

impl Checks {
    fn check(&mut self, name: &'static str, ok: bool, detail: impl FnOnce() -> String) {
        if !self.order.contains(&name) {
            self.order.push(name);
        }
        if !ok {
            let entry = self.failures.entry(name).or_insert_with(|| (0, detail()));
            entry.0 += 1;
        }
    }

    fn results(&self, ticks: u64) -> Vec<TestResult> {
        self.order
            .iter()
            .map(|name| match self.failures.get(name) {
                Some((count, first)) => TestResult {
                    name: name.to_string(),
                    passed: false,
                    detail: format!("{count} violations, first: {first}"),
                },
                None => TestResult {
                    name: name.to_string(),
                    passed: true,
                    detail: format!("held for {ticks} person ticks"),
                },
            })
            .collect()
    }
}

/// What the previous person tick looked like, for monotonicity checks
#[derive(Default)]
struct History {
    isolated: HashSet<String>,
    counters: HashMap<String, (u32, u32, u32)>,
}

fn validate_tick(engine: &SimulationEngine, history: &mut History, checks: &mut Checks) {
    let config = engine.config();
    let bounds = config.bounds();
    let zones = &engine.layout().zones;
    let people = engine.people();

    for p in &people {
        checks.check("people_in_bounds", bounds.contains(p.position), || {
            format!("{} at ({:.1}, {:.1})", p.id, p.position.x, p.position.y)
        });

        let stability = p.wellbeing.stability_score;
        checks.check(
            "stability_in_range",
            (config.stability_floor..=config.stability_ceiling).contains(&stability),
            || format!("{} stability {stability}", p.id),
        );

        let in_work_zone =
            resolve_zone(p.position, zones).is_some_and(|z| z.zone_type == ZoneType::Work);
        let expected = !p.safety_status.is_safe() || (!p.is_authenticated && in_work_zone);
        checks.check("violation_matches_status", p.safety_violation == expected, || {
            format!("{} violation={} expected={expected}", p.id, p.safety_violation)
        });

        checks.check(
            "isolation_is_sticky",
            !history.isolated.contains(&p.id) || p.wellbeing.isolation_alert,
            || format!("{} lost its isolation alert", p.id),
        );
        if p.wellbeing.isolation_alert {
            history.isolated.insert(p.id.clone());
        }

        let now = (p.wellbeing.alone_time, p.total_work_time, p.total_rest_time);
        if let Some(before) = history.counters.insert(p.id.clone(), now) {
            checks.check(
                "counters_never_decrease",
                now.0 >= before.0 && now.1 >= before.1 && now.2 >= before.2,
                || format!("{} went from {before:?} to {now:?}", p.id),
            );
        }
    }

    for asset in engine.assets() {
        // A bounce is committed one step past the edge before it reverses
        let slack = asset.velocity.magnitude();
        let inside = asset.position.x >= bounds.min_x() - slack
            && asset.position.x <= bounds.max_x() + slack
            && asset.position.y >= bounds.min_y() - slack
            && asset.position.y <= bounds.max_y() + slack;
        checks.check("assets_within_one_step", inside, || {
            format!("{} at ({:.1}, {:.1})", asset.id, asset.position.x, asset.position.y)
        });
    }

    let fresh = aggregate(zones, &people, config);
    checks.check("metrics_match_aggregation", &fresh == engine.metrics(), || {
        "cached metrics differ from a fresh aggregation".to_string()
    });
    checks.check(
        "one_bottleneck_per_zone",
        fresh.bottlenecks.len() == zones.len(),
        || format!("{} bottlenecks for {} zones", fresh.bottlenecks.len(), zones.len()),
    );
}

// ── Dashboard summary ───────────────────────────────────────────────────

fn print_dashboard(engine: &SimulationEngine) {
    let metrics = engine.metrics();
    let elapsed = format_time(engine.sim_time().as_secs_f64());

    println!("--- Floor after {elapsed} ---");
    println!(
        "  Status: {} ({})",
        metrics.system_status.label(),
        metrics.system_status.subtitle()
    );
    println!(
        "  Safety: {} - {}",
        metrics.safety_banner.headline(),
        metrics.safety_banner.detail()
    );
    println!("  Global efficiency: {}%", metrics.global_efficiency);
    println!(
        "  Active personnel: {}, isolated workers: {}",
        metrics.active_personnel, metrics.isolated_workers
    );

    println!("  Zones:");
    for b in &metrics.bottlenecks {
        let marker = if b.is_overloaded {
            " OVERLOADED"
        } else if b.is_high_intensity() {
            " high intensity"
        } else {
            ""
        };
        println!(
            "    {:<16} {:>2} people  density {:>4.0}%  avg dwell {:.1} min{}",
            b.zone_name,
            b.occupant_count,
            b.density * 100.0,
            b.avg_dwell_time,
            marker
        );
    }

    for asset in engine.assets() {
        println!(
            "  Asset {} at ({:.1}, {:.1})",
            asset.id, asset.position.x, asset.position.y
        );
    }
    println!("  Edge bounces: {}", engine.asset_bounces());
}

fn print_people(engine: &SimulationEngine) {
    println!("  Personnel:");
    for view in engine.snapshot().people {
        let p = &view.person;
        println!(
            "    {:<12} {:<8} zone {:<7} dwell {:>5}  stability {:>5.1}  {:?}  {}",
            p.name,
            format!("{:?}", p.safety_status),
            p.zone_id,
            format_time(f64::from(p.dwell_time)),
            p.wellbeing.stability_score,
            view.efficiency.level,
            view.assessment.message
        );
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args = parse_args()?;
    let config = load_config(args.config.as_ref())?;
    let scenario = Scenario::warehouse(Utc::now());

    let mut engine = match args.seed {
        Some(seed) => SimulationEngine::with_seed(config, scenario, seed)?,
        None => SimulationEngine::new(config, scenario)?,
    };
    if args.extra_people > 0 {
        engine.add_personnel(args.extra_people);
    }

    info!(
        seconds = args.seconds,
        seed = ?args.seed,
        people = engine.person_count(),
        "simulation starting"
    );
    println!("=== Floorwatch Simulation Harness ===\n");

    let mut history = History::default();
    let mut checks = Checks::default();
    let target = Duration::from_secs(args.seconds);
    let mut last_person_tick = engine.person_ticks();

    while engine.sim_time() < target {
        engine.update(FRAME);
        if engine.person_ticks() != last_person_tick {
            last_person_tick = engine.person_ticks();
            validate_tick(&engine, &mut history, &mut checks);
            debug!(
                tick = last_person_tick,
                status = engine.metrics().system_status.label(),
                "person tick validated"
            );
        }
    }

    print_dashboard(&engine);
    if args.verbose {
        print_people(&engine);
    }

    // ── Summary ──
    let results = checks.results(engine.person_ticks());
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    println!();
    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }
    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed,
        results.len(),
        failed
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
