//! Person state system - one second of floor time for everybody
//!
//! Snapshots people and assets out of the world, steps them with the pure
//! rules from `floorwatch-logic`, then writes every person back. Assets are
//! read after the latest motion tick, so the hazard scan always sees their
//! committed positions.

use chrono::{DateTime, Utc};
use floorwatch_logic::config::FloorConfig;
use floorwatch_logic::model::{SafetyStatus, Zone};
use floorwatch_logic::tick::{advance_people, PersonDraw, TickContext};
use hecs::World;
use rand::Rng;

use crate::components::{read_assets, read_people, write_person};

/// What changed during one person tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonTickReport {
    pub updated: usize,
    /// Ids whose isolation alert was raised this tick.
    pub new_isolation_alerts: Vec<String>,
    /// Ids that moved into `Danger` this tick.
    pub entered_danger: Vec<String>,
}

/// Draw one person's jitter and stability drift.
pub fn sample_draw(rng: &mut impl Rng, config: &FloorConfig) -> PersonDraw {
    let jitter = config.jitter.abs();
    let drift = config.stability_drift.abs();
    PersonDraw {
        jitter_x: rng.gen_range(-jitter..=jitter),
        jitter_y: rng.gen_range(-jitter..=jitter),
        stability_delta: rng.gen_range(-drift..=drift),
    }
}

pub fn person_state_system(
    world: &mut World,
    zones: &[Zone],
    config: &FloorConfig,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> PersonTickReport {
    let (entities, previous): (Vec<_>, Vec<_>) = read_people(world).into_iter().unzip();
    if previous.is_empty() {
        return PersonTickReport::default();
    }

    let assets: Vec<_> = read_assets(world).into_iter().map(|(_, a)| a).collect();

    // Draws are taken in roster order so a seed replays identically
    let draws: Vec<PersonDraw> = previous.iter().map(|_| sample_draw(&mut *rng, config)).collect();

    let ctx = TickContext {
        previous: &previous,
        assets: &assets,
        zones,
        config,
        now,
    };
    let next = advance_people(&draws, &ctx);

    let mut report = PersonTickReport {
        updated: next.len(),
        ..Default::default()
    };
    for ((entity, before), after) in entities.into_iter().zip(&previous).zip(&next) {
        if after.wellbeing.isolation_alert && !before.wellbeing.isolation_alert {
            report.new_isolation_alerts.push(after.id.clone());
        }
        if after.safety_status == SafetyStatus::Danger && before.safety_status != SafetyStatus::Danger {
            report.entered_danger.push(after.id.clone());
        }
        write_person(world, entity, after);
    }
    report
}
