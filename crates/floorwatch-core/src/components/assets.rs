//! Asset components: AssetTag, Motion, HazardRadii.

use floorwatch_logic::model::{Asset, AssetKind, Velocity};
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use super::{Position, RosterIndex};

/// Identifies a hazard-source entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetTag {
    pub id: String,
    pub kind: AssetKind,
}

/// Straight-line motion, applied once per asset tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub velocity: Velocity,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardRadii {
    pub warning: f32,
    pub danger: f32,
}

pub type AssetBundle = (AssetTag, RosterIndex, Position, Motion, HazardRadii);

pub fn asset_bundle(asset: &Asset, index: RosterIndex) -> AssetBundle {
    (
        AssetTag {
            id: asset.id.clone(),
            kind: asset.kind,
        },
        index,
        Position(asset.position),
        Motion {
            velocity: asset.velocity,
        },
        HazardRadii {
            warning: asset.warning_radius,
            danger: asset.danger_radius,
        },
    )
}

/// All assets in spawn order
pub fn read_assets(world: &World) -> Vec<(Entity, Asset)> {
    let mut rows: Vec<(RosterIndex, Entity, Asset)> = world
        .query::<(&AssetTag, &RosterIndex, &Position, &Motion, &HazardRadii)>()
        .iter()
        .map(|(entity, (tag, index, pos, motion, radii))| {
            let asset = Asset {
                id: tag.id.clone(),
                kind: tag.kind,
                position: pos.point(),
                velocity: motion.velocity,
                warning_radius: radii.warning,
                danger_radius: radii.danger,
            };
            (*index, entity, asset)
        })
        .collect();

    rows.sort_by_key(|(index, _, _)| *index);
    rows.into_iter().map(|(_, e, a)| (e, a)).collect()
}

/// Commit position and velocity after a motion step
pub fn write_asset_motion(world: &mut World, entity: Entity, asset: &Asset) {
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        *pos = Position(asset.position);
    }
    if let Ok(mut motion) = world.get::<&mut Motion>(entity) {
        motion.velocity = asset.velocity;
    }
}

pub fn find_asset(world: &World, id: &str) -> Option<Entity> {
    world
        .query::<&AssetTag>()
        .iter()
        .find(|(_, tag)| tag.id == id)
        .map(|(entity, _)| entity)
}
