//! Asset motion and proximity hazard scan.
//!
//! Assets move in straight lines and bounce off the padded world edge: an
//! axis whose next coordinate leaves `[padding, dimension - padding]` has its
//! velocity component inverted. The proposed position is still committed, so
//! the bounce shows up on the following tick.

use crate::geometry::{calculate_distance, Point, WorldBounds};
use crate::model::{Asset, SafetyStatus};

/// One motion tick for one asset.
pub fn advance_asset(asset: &Asset, bounds: &WorldBounds) -> Asset {
    let next = asset.position.offset(asset.velocity.vx, asset.velocity.vy);
    let mut velocity = asset.velocity;

    if !bounds.x_in_range(next.x) {
        velocity.vx = -velocity.vx;
    }
    if !bounds.y_in_range(next.y) {
        velocity.vy = -velocity.vy;
    }

    Asset {
        position: next,
        velocity,
        ..asset.clone()
    }
}

pub fn advance_assets(assets: &[Asset], bounds: &WorldBounds) -> Vec<Asset> {
    assets.iter().map(|a| advance_asset(a, bounds)).collect()
}

/// Most severe classification of `position` against every asset.
///
/// The first asset within its danger radius ends the scan; warnings keep
/// scanning since a later asset may still be a danger.
pub fn scan_hazards(position: Point, assets: &[Asset]) -> SafetyStatus {
    let mut status = SafetyStatus::Safe;
    for asset in assets {
        let d = calculate_distance(position, asset.position);
        if d <= asset.danger_radius {
            return SafetyStatus::Danger;
        } else if d <= asset.warning_radius {
            status = SafetyStatus::Warning;
        }
    }
    status
}
