//! Generation - populating the floor from a scenario

mod names;
mod roster;

pub use names::*;
pub use roster::*;

use floorwatch_logic::model::{AccessPoint, Zone};
use floorwatch_logic::scenario::Scenario;
use hecs::World;
use serde::Serialize;

use crate::components::{asset_bundle, person_bundle, RosterIndex};

/// Static parts of the floor. Zones and access points never move, so they
/// live here instead of in the world.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorLayout {
    /// Layout order; zone lookup takes the first match.
    pub zones: Vec<Zone>,
    pub access_points: Vec<AccessPoint>,
}

impl FloorLayout {
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }
}

/// Spawn every asset and person of `scenario` into `world`
pub fn generate_floor(world: &mut World, scenario: &Scenario) -> FloorLayout {
    for (i, asset) in scenario.assets.iter().enumerate() {
        world.spawn(asset_bundle(asset, RosterIndex(i as u32)));
    }
    for (i, person) in scenario.people.iter().enumerate() {
        world.spawn(person_bundle(person, RosterIndex(i as u32)));
    }

    log::info!(
        "floor generated: {} zones, {} access points, {} assets, {} people",
        scenario.zones.len(),
        scenario.access_points.len(),
        scenario.assets.len(),
        scenario.people.len()
    );

    FloorLayout {
        zones: scenario.zones.clone(),
        access_points: scenario.access_points.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{read_assets, read_people};
    use chrono::Utc;

    #[test]
    fn warehouse_spawns_everything() {
        let mut world = World::new();
        let scenario = Scenario::warehouse(Utc::now());
        let layout = generate_floor(&mut world, &scenario);

        assert_eq!(layout.zones.len(), 4);
        assert_eq!(layout.access_points.len(), 4);
        assert_eq!(read_assets(&world).len(), 1);

        let people: Vec<_> = read_people(&world).into_iter().map(|(_, p)| p).collect();
        assert_eq!(people, scenario.people);
    }

    #[test]
    fn zone_lookup_by_id() {
        let mut world = World::new();
        let layout = generate_floor(&mut world, &Scenario::warehouse(Utc::now()));
        assert_eq!(layout.zone("zone-c").map(|z| z.name.as_str()), Some("Break Area"));
        assert!(layout.zone("zone-z").is_none());
    }
}
