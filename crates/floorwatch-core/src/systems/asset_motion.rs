//! Asset motion system - straight-line travel with edge bounce

use floorwatch_logic::geometry::WorldBounds;
use floorwatch_logic::hazard::advance_asset;
use hecs::World;

use crate::components::{read_assets, write_asset_motion};

/// Move every asset one step. Returns how many assets bounced this tick.
pub fn asset_motion_system(world: &mut World, bounds: &WorldBounds) -> usize {
    let mut updates = Vec::new();

    for (entity, asset) in read_assets(world) {
        let next = advance_asset(&asset, bounds);
        updates.push((entity, asset.velocity != next.velocity, next));
    }

    let mut bounced = 0;
    for (entity, did_bounce, next) in updates {
        if did_bounce {
            log::debug!(
                "asset {} bounced at ({:.1}, {:.1})",
                next.id,
                next.position.x,
                next.position.y
            );
            bounced += 1;
        }
        write_asset_motion(world, entity, &next);
    }
    bounced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{asset_bundle, RosterIndex};
    use floorwatch_logic::geometry::Point;
    use floorwatch_logic::model::{Asset, AssetKind, Velocity};

    fn forklift(id: &str, x: f32, y: f32, vx: f32, vy: f32) -> Asset {
        Asset {
            id: id.into(),
            kind: AssetKind::Forklift,
            position: Point::new(x, y),
            velocity: Velocity::new(vx, vy),
            warning_radius: 120.0,
            danger_radius: 60.0,
        }
    }

    #[test]
    fn moves_by_velocity() {
        let mut world = World::new();
        world.spawn(asset_bundle(&forklift("a1", 350.0, 280.0, 1.2, 0.8), RosterIndex(0)));
        let bounds = WorldBounds::new(800.0, 600.0, 20.0);

        assert_eq!(asset_motion_system(&mut world, &bounds), 0);
        let a = &read_assets(&world)[0].1;
        assert!((a.position.x - 351.2).abs() < 1e-4);
        assert!((a.position.y - 280.8).abs() < 1e-4);
    }

    #[test]
    fn bounce_flips_velocity_after_commit() {
        let mut world = World::new();
        world.spawn(asset_bundle(&forklift("a1", 779.5, 300.0, 1.0, 0.0), RosterIndex(0)));
        world.spawn(asset_bundle(&forklift("a2", 100.0, 100.0, 0.0, 1.0), RosterIndex(1)));
        let bounds = WorldBounds::new(800.0, 600.0, 20.0);

        assert_eq!(asset_motion_system(&mut world, &bounds), 1);
        let assets = read_assets(&world);
        let a1 = &assets[0].1;
        assert_eq!(a1.position.x, 780.5);
        assert_eq!(a1.velocity.vx, -1.0);
        assert_eq!(assets[1].1.velocity.vy, 1.0);
    }
}
