//! Generated personnel for larger floors

use chrono::{DateTime, Utc};
use floorwatch_logic::config::FloorConfig;
use floorwatch_logic::geometry::{Bounds, Point};
use floorwatch_logic::model::{Person, Role, Zone};
use floorwatch_logic::scenario::PersonSeed;
use hecs::{Entity, World};
use rand::Rng;

use super::names::generate_name;
use crate::components::{person_bundle, Identity, RosterIndex};

/// Spawn `count` generated people, appended after the existing roster.
/// Ids continue after the highest existing `p<n>`.
pub fn generate_personnel(
    world: &mut World,
    count: u32,
    zones: &[Zone],
    config: &FloorConfig,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Vec<Entity> {
    let mut serial = world
        .query::<&Identity>()
        .iter()
        .filter_map(|(_, identity)| id_serial(&identity.id))
        .max()
        .unwrap_or(0);
    let mut next_index = world
        .query::<(&Identity, &RosterIndex)>()
        .iter()
        .map(|(_, (_, index))| index.0 + 1)
        .max()
        .unwrap_or(0);

    let mut entities = Vec::with_capacity(count as usize);
    for _ in 0..count {
        serial += 1;
        let person = generate_person(&format!("p{serial}"), zones, config, rng, now);
        entities.push(world.spawn(person_bundle(&person, RosterIndex(next_index))));
        next_index += 1;
    }

    log::info!("generated {} extra personnel", entities.len());
    entities
}

/// Numeric suffix of a `p<n>` id. Other id shapes don't take part in the sequence.
fn id_serial(id: &str) -> Option<u32> {
    id.strip_prefix('p')?.parse().ok()
}

/// One fresh person somewhere inside a random zone.
pub fn generate_person(
    id: &str,
    zones: &[Zone],
    config: &FloorConfig,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Person {
    let role = random_role(rng);
    let name = generate_name(role, rng);

    let (position, zone_id) = match pick_zone(zones, rng) {
        Some((zone, bounds)) => (random_point(&bounds, rng), zone.id.clone()),
        None => {
            let world = config.bounds();
            let bounds = Bounds {
                min_x: world.min_x(),
                max_x: world.max_x(),
                min_y: world.min_y(),
                max_y: world.max_y(),
            };
            (random_point(&bounds, rng), String::new())
        }
    };

    let stability = rng.gen_range(60.0..=95.0);
    let edge_zone = rng.gen_range(0.0..=100.0);
    let seed = PersonSeed::new(id, name, role, position.x, position.y, zone_id)
        .wellbeing(0, edge_zone, false, stability);
    let seed = if role == Role::Visitor {
        seed.unauthenticated()
    } else {
        seed
    };
    seed.build(now)
}

/// Roughly 70% workers, 15% supervisors, 15% visitors
fn random_role(rng: &mut impl Rng) -> Role {
    let roll: f32 = rng.gen();
    if roll < 0.70 {
        Role::Worker
    } else if roll < 0.85 {
        Role::Supervisor
    } else {
        Role::Visitor
    }
}

fn pick_zone<'a>(zones: &'a [Zone], rng: &mut impl Rng) -> Option<(&'a Zone, Bounds)> {
    if zones.is_empty() {
        return None;
    }
    let zone = &zones[rng.gen_range(0..zones.len())];
    Bounds::from_points(&zone.points).map(|b| (zone, b))
}

fn random_point(bounds: &Bounds, rng: &mut impl Rng) -> Point {
    Point::new(
        rng.gen_range(bounds.min_x..=bounds.max_x),
        rng.gen_range(bounds.min_y..=bounds.max_y),
    )
}
