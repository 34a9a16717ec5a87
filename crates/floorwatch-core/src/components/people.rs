//! People-related components: Identity, Badge, Occupancy, SafetyState.
//!
//! `WellbeingStats` from `floorwatch-logic` is attached to people as-is.

use chrono::{DateTime, Utc};
use floorwatch_logic::model::{Person, Role, SafetyStatus, WellbeingStats};
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use super::{Position, RosterIndex};

/// Who a person is. Present on every person entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Authentication state of a person's badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub authenticated: bool,
}

/// Zone tracking and time accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occupancy {
    pub zone_id: String,
    pub dwell_time: u32,
    pub total_work_time: u32,
    pub total_rest_time: u32,
    pub last_seen: DateTime<Utc>,
}

/// Result of the last hazard/access evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyState {
    pub status: SafetyStatus,
    pub violation: bool,
    pub reason: Option<String>,
}

pub type PersonBundle = (
    Identity,
    RosterIndex,
    Position,
    Badge,
    Occupancy,
    SafetyState,
    WellbeingStats,
);

/// Split a person record into its components
pub fn person_bundle(person: &Person, index: RosterIndex) -> PersonBundle {
    (
        Identity {
            id: person.id.clone(),
            name: person.name.clone(),
            role: person.role,
        },
        index,
        Position(person.position),
        Badge {
            authenticated: person.is_authenticated,
        },
        Occupancy {
            zone_id: person.zone_id.clone(),
            dwell_time: person.dwell_time,
            total_work_time: person.total_work_time,
            total_rest_time: person.total_rest_time,
            last_seen: person.last_seen,
        },
        SafetyState {
            status: person.safety_status,
            violation: person.safety_violation,
            reason: person.violation_reason.clone(),
        },
        person.wellbeing,
    )
}

/// All people in roster order, with their entity handles
pub fn read_people(world: &World) -> Vec<(Entity, Person)> {
    let mut rows: Vec<(RosterIndex, Entity, Person)> = world
        .query::<(
            &Identity,
            &RosterIndex,
            &Position,
            &Badge,
            &Occupancy,
            &SafetyState,
            &WellbeingStats,
        )>()
        .iter()
        .map(|(entity, (identity, index, pos, badge, occ, safety, wellbeing))| {
            let person = Person {
                id: identity.id.clone(),
                name: identity.name.clone(),
                position: pos.point(),
                zone_id: occ.zone_id.clone(),
                last_seen: occ.last_seen,
                dwell_time: occ.dwell_time,
                total_work_time: occ.total_work_time,
                total_rest_time: occ.total_rest_time,
                safety_status: safety.status,
                safety_violation: safety.violation,
                violation_reason: safety.reason.clone(),
                is_authenticated: badge.authenticated,
                role: identity.role,
                wellbeing: *wellbeing,
            };
            (*index, entity, person)
        })
        .collect();

    rows.sort_by_key(|(index, _, _)| *index);
    rows.into_iter().map(|(_, e, p)| (e, p)).collect()
}

/// Write the mutable parts of a person record back onto its entity.
/// Identity and badge never change during a tick.
pub fn write_person(world: &mut World, entity: Entity, person: &Person) {
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        *pos = Position(person.position);
    }
    if let Ok(mut occ) = world.get::<&mut Occupancy>(entity) {
        occ.zone_id.clone_from(&person.zone_id);
        occ.dwell_time = person.dwell_time;
        occ.total_work_time = person.total_work_time;
        occ.total_rest_time = person.total_rest_time;
        occ.last_seen = person.last_seen;
    }
    if let Ok(mut safety) = world.get::<&mut SafetyState>(entity) {
        safety.status = person.safety_status;
        safety.violation = person.safety_violation;
        safety.reason.clone_from(&person.violation_reason);
    }
    if let Ok(mut wellbeing) = world.get::<&mut WellbeingStats>(entity) {
        *wellbeing = person.wellbeing;
    }
}

/// Entity of the person with `id`
pub fn find_person(world: &World, id: &str) -> Option<Entity> {
    world
        .query::<&Identity>()
        .iter()
        .find(|(_, identity)| identity.id == id)
        .map(|(entity, _)| entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorwatch_logic::scenario::PersonSeed;

    fn sample(id: &str, x: f32) -> Person {
        PersonSeed::new(id, id, Role::Worker, x, 100.0, "zone-a")
            .times(10, 2)
            .build(Utc::now())
    }

    #[test]
    fn bundle_round_trip() {
        let mut world = World::new();
        let person = sample("p1", 100.0);
        world.spawn(person_bundle(&person, RosterIndex(0)));

        let rows = read_people(&world);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1, person);
    }

    #[test]
    fn read_people_follows_roster_order() {
        let mut world = World::new();
        world.spawn(person_bundle(&sample("late", 1.0), RosterIndex(2)));
        world.spawn(person_bundle(&sample("first", 2.0), RosterIndex(0)));
        world.spawn(person_bundle(&sample("middle", 3.0), RosterIndex(1)));

        let ids: Vec<String> = read_people(&world).into_iter().map(|(_, p)| p.id).collect();
        assert_eq!(ids, vec!["first", "middle", "late"]);
    }

    #[test]
    fn write_person_updates_components() {
        let mut world = World::new();
        let person = sample("p1", 100.0);
        let entity = world.spawn(person_bundle(&person, RosterIndex(0)));

        let mut next = person.clone();
        next.position.x = 140.0;
        next.dwell_time = 9;
        next.safety_status = SafetyStatus::Warning;
        next.safety_violation = true;
        next.wellbeing.alone_time = 77;
        write_person(&mut world, entity, &next);

        assert_eq!(read_people(&world)[0].1, next);
    }

    #[test]
    fn find_by_id() {
        let mut world = World::new();
        let entity = world.spawn(person_bundle(&sample("p7", 0.0), RosterIndex(0)));
        assert_eq!(find_person(&world, "p7"), Some(entity));
        assert_eq!(find_person(&world, "nobody"), None);
    }
}
