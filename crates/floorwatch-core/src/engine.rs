//! Simulation engine - main entry point for running the floor

use std::time::Duration;

use chrono::{DateTime, Utc};
use floorwatch_logic::config::FloorConfig;
use floorwatch_logic::geometry::Point;
use floorwatch_logic::metrics::{aggregate, FloorMetrics};
use floorwatch_logic::model::{Asset, Person};
use floorwatch_logic::scenario::Scenario;
use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::components::*;
use crate::control::Direction;
use crate::error::EngineError;
use crate::generation::{generate_floor, generate_personnel, FloorLayout};
use crate::snapshot::{FloorSnapshot, PersonView};
use crate::systems::*;

/// Main simulation engine
pub struct SimulationEngine {
    /// ECS world containing people and assets
    world: World,
    /// Zones and access points
    layout: FloorLayout,
    config: FloorConfig,
    rng: StdRng,
    /// Recomputed after every person tick
    metrics: FloorMetrics,
    selected: Option<String>,

    /// Wall-clock instant that sim time zero maps to
    epoch: DateTime<Utc>,
    sim_time: Duration,
    asset_ticks: u64,
    person_ticks: u64,
    /// Edge bounces across all assets since start
    asset_bounces: u64,
}

impl SimulationEngine {
    /// Create an engine seeded from OS entropy
    pub fn new(config: FloorConfig, scenario: Scenario) -> Result<Self, EngineError> {
        Self::build(config, scenario, StdRng::from_entropy())
    }

    /// Create an engine whose jitter and drift replay identically for `seed`
    pub fn with_seed(config: FloorConfig, scenario: Scenario, seed: u64) -> Result<Self, EngineError> {
        Self::build(config, scenario, StdRng::seed_from_u64(seed))
    }

    /// The default warehouse floor with the default configuration
    pub fn warehouse(seed: u64) -> Result<Self, EngineError> {
        Self::with_seed(FloorConfig::default(), Scenario::warehouse(Utc::now()), seed)
    }

    fn build(config: FloorConfig, scenario: Scenario, rng: StdRng) -> Result<Self, EngineError> {
        scenario.validate(&config)?;

        let mut world = World::new();
        let layout = generate_floor(&mut world, &scenario);
        let metrics = aggregate(&layout.zones, &scenario.people, &config);
        log::info!("floor opens {}", metrics.system_status.label());

        Ok(Self {
            world,
            layout,
            config,
            rng,
            metrics,
            selected: None,
            epoch: Utc::now(),
            sim_time: Duration::ZERO,
            asset_ticks: 0,
            person_ticks: 0,
            asset_bounces: 0,
        })
    }

    /// Advance simulated time by `delta`, running every tick that falls due.
    ///
    /// Due ticks run in time order. When an asset tick and a person tick are
    /// due at the same instant the asset tick runs first, so the hazard scan
    /// sees the forklift where it is now.
    pub fn update(&mut self, delta: Duration) {
        let target = self.sim_time.saturating_add(delta);

        loop {
            let asset_due = due_at(self.config.asset_tick_ms, self.asset_ticks + 1);
            let person_due = due_at(self.config.person_tick_ms, self.person_ticks + 1);

            if asset_due <= person_due && asset_due <= target {
                self.sim_time = asset_due;
                self.tick_assets();
            } else if person_due <= target {
                self.sim_time = person_due;
                self.tick_people();
            } else {
                break;
            }
        }

        self.sim_time = target;
    }

    fn tick_assets(&mut self) {
        let bounced = asset_motion_system(&mut self.world, &self.config.bounds());
        self.asset_ticks += 1;
        if bounced > 0 {
            self.asset_bounces += bounced as u64;
            log::debug!(
                "asset tick {}: {bounced} bounced, {} total",
                self.asset_ticks,
                self.asset_bounces
            );
        }
    }

    fn tick_people(&mut self) {
        let now = self.now();
        let report = person_state_system(
            &mut self.world,
            &self.layout.zones,
            &self.config,
            &mut self.rng,
            now,
        );
        self.person_ticks += 1;

        for id in &report.new_isolation_alerts {
            log::info!("isolation alert raised for {id}");
        }
        for id in &report.entered_danger {
            log::warn!("{id} entered a danger radius");
        }

        self.recompute_metrics();
    }

    fn recompute_metrics(&mut self) {
        let people = self.people();
        let metrics = aggregate(&self.layout.zones, &people, &self.config);
        if metrics.system_status != self.metrics.system_status {
            log::info!(
                "system status {} -> {}",
                self.metrics.system_status.label(),
                metrics.system_status.label()
            );
        }
        self.metrics = metrics;
    }

    /// Floor time for `last_seen` stamps: the start instant plus simulated
    /// time, not the wall clock
    fn now(&self) -> DateTime<Utc> {
        let offset = chrono::Duration::from_std(self.sim_time).unwrap_or_else(|_| chrono::Duration::zero());
        self.epoch + offset
    }

    /// Spawn `count` generated people and refresh metrics. Returns their ids.
    pub fn add_personnel(&mut self, count: u32) -> Vec<String> {
        let now = self.now();
        let entities = generate_personnel(
            &mut self.world,
            count,
            &self.layout.zones,
            &self.config,
            &mut self.rng,
            now,
        );
        let ids = entities
            .into_iter()
            .filter_map(|e| self.world.get::<&Identity>(e).ok().map(|i| i.id.clone()))
            .collect();
        self.recompute_metrics();
        ids
    }

    /// Set or clear the selected person. Unknown ids leave the selection as it was.
    pub fn select_person(&mut self, id: Option<&str>) -> Result<(), EngineError> {
        match id {
            Some(id) => {
                if find_person(&self.world, id).is_none() {
                    return Err(EngineError::UnknownPerson(id.to_string()));
                }
                self.selected = Some(id.to_string());
            }
            None => self.selected = None,
        }
        Ok(())
    }

    pub fn selected_person(&self) -> Option<Person> {
        let id = self.selected.as_deref()?;
        self.people().into_iter().find(|p| p.id == id)
    }

    /// Move the controllable asset one nudge step, clamped into the padded
    /// world. Returns its new position.
    pub fn nudge_asset(&mut self, direction: Direction) -> Result<Point, EngineError> {
        let id = &self.config.controllable_asset;
        let entity =
            find_asset(&self.world, id).ok_or_else(|| EngineError::MissingAsset(id.clone()))?;

        let (dx, dy) = direction.offset();
        let step = self.config.nudge_step;
        let bounds = self.config.bounds();

        let mut pos = self
            .world
            .get::<&mut Position>(entity)
            .map_err(|_| EngineError::MissingAsset(id.clone()))?;
        let next = bounds.clamp(pos.point().offset(dx * step, dy * step));
        *pos = Position(next);

        log::debug!("nudged {id} {direction:?} to ({:.1}, {:.1})", next.x, next.y);
        Ok(next)
    }

    pub fn snapshot(&self) -> FloorSnapshot {
        let people = self.people();
        let views = people
            .iter()
            .map(|p| PersonView::new(p, &people, &self.layout))
            .collect();

        FloorSnapshot {
            sim_time_ms: u64::try_from(self.sim_time.as_millis()).unwrap_or(u64::MAX),
            people: views,
            assets: self.assets(),
            zones: self.layout.zones.clone(),
            access_points: self.layout.access_points.clone(),
            metrics: self.metrics.clone(),
            selected_person_id: self.selected.clone(),
        }
    }

    /// People in roster order
    pub fn people(&self) -> Vec<Person> {
        read_people(&self.world).into_iter().map(|(_, p)| p).collect()
    }

    pub fn assets(&self) -> Vec<Asset> {
        read_assets(&self.world).into_iter().map(|(_, a)| a).collect()
    }

    pub fn metrics(&self) -> &FloorMetrics {
        &self.metrics
    }

    pub fn layout(&self) -> &FloorLayout {
        &self.layout
    }

    pub fn config(&self) -> &FloorConfig {
        &self.config
    }

    pub fn sim_time(&self) -> Duration {
        self.sim_time
    }

    pub fn asset_ticks(&self) -> u64 {
        self.asset_ticks
    }

    pub fn person_ticks(&self) -> u64 {
        self.person_ticks
    }

    pub fn asset_bounces(&self) -> u64 {
        self.asset_bounces
    }

    pub fn person_count(&self) -> usize {
        self.world.query::<&Identity>().iter().count()
    }
}

/// Sim time at which the `n`th tick of a `period_ms` clock is due
fn due_at(period_ms: u64, n: u64) -> Duration {
    Duration::from_millis(period_ms.saturating_mul(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorwatch_logic::metrics::SystemStatus;

    #[test]
    fn test_engine_creation() {
        let engine = SimulationEngine::warehouse(1).unwrap();
        assert_eq!(engine.person_count(), 5);
        assert_eq!(engine.assets().len(), 1);
        assert_eq!(engine.sim_time(), Duration::ZERO);
        assert_eq!(engine.metrics().system_status, SystemStatus::Stormy);
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let mut scenario = Scenario::warehouse(Utc::now());
        scenario.people[2].id = "p1".into();
        let err = SimulationEngine::with_seed(FloorConfig::default(), scenario, 1).err();
        assert!(matches!(err, Some(EngineError::Scenario(_))));
    }

    #[test]
    fn test_one_second_runs_both_clocks() {
        let mut engine = SimulationEngine::warehouse(1).unwrap();
        engine.update(Duration::from_secs(1));
        assert_eq!(engine.asset_ticks(), 10);
        assert_eq!(engine.person_ticks(), 1);
    }

    #[test]
    fn test_small_steps_accumulate() {
        let mut engine = SimulationEngine::warehouse(1).unwrap();
        for _ in 0..25 {
            engine.update(Duration::from_millis(40));
        }
        assert_eq!(engine.sim_time(), Duration::from_millis(1000));
        assert_eq!(engine.asset_ticks(), 10);
        assert_eq!(engine.person_ticks(), 1);

        engine.update(Duration::from_millis(50));
        assert_eq!(engine.asset_ticks(), 10);
        engine.update(Duration::from_millis(50));
        assert_eq!(engine.asset_ticks(), 11);
    }

    #[test]
    fn test_last_seen_follows_sim_time() {
        let mut engine = SimulationEngine::warehouse(1).unwrap();
        engine.update(Duration::from_secs(3));
        let expected = engine.epoch + chrono::Duration::seconds(3);
        assert!(engine.people().iter().all(|p| p.last_seen == expected));
    }

    #[test]
    fn test_nudge_moves_forklift() {
        let mut engine = SimulationEngine::warehouse(1).unwrap();
        let pos = engine.nudge_asset(Direction::Left).unwrap();
        assert_eq!(pos, Point::new(340.0, 280.0));
        assert_eq!(engine.assets()[0].position, pos);
    }

    #[test]
    fn test_nudge_without_controllable_asset() {
        let config = FloorConfig {
            controllable_asset: "a9".into(),
            ..Default::default()
        };
        let mut engine = SimulationEngine::with_seed(config, Scenario::warehouse(Utc::now()), 1).unwrap();
        assert_eq!(
            engine.nudge_asset(Direction::Up),
            Err(EngineError::MissingAsset("a9".into()))
        );
    }

    #[test]
    fn test_bounces_are_counted() {
        let mut engine = SimulationEngine::warehouse(1).unwrap();
        engine.update(Duration::from_secs(1));
        assert_eq!(engine.asset_bounces(), 0);

        // Park the forklift on the east edge; its next step crosses it
        for _ in 0..50 {
            engine.nudge_asset(Direction::Right).unwrap();
        }
        engine.update(Duration::from_millis(100));
        assert_eq!(engine.asset_bounces(), 1);
        assert!(engine.assets()[0].velocity.vx < 0.0);
    }

    #[test]
    fn test_selection() {
        let mut engine = SimulationEngine::warehouse(1).unwrap();
        engine.select_person(Some("p3")).unwrap();
        assert_eq!(engine.selected_person().map(|p| p.name), Some("Sup_Sarah".to_string()));

        assert_eq!(
            engine.select_person(Some("p99")),
            Err(EngineError::UnknownPerson("p99".into()))
        );
        assert_eq!(engine.selected_person().map(|p| p.id), Some("p3".to_string()));

        engine.select_person(None).unwrap();
        assert!(engine.selected_person().is_none());
    }

    #[test]
    fn test_add_personnel() {
        let mut engine = SimulationEngine::warehouse(1).unwrap();
        let ids = engine.add_personnel(4);
        assert_eq!(ids, vec!["p6", "p7", "p8", "p9"]);
        assert_eq!(engine.person_count(), 9);
        assert_eq!(engine.metrics().active_personnel, 9);
    }
}
