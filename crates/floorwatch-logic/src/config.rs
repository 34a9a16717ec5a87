//! Floor configuration: world size, clock periods, radii and thresholds.
//!
//! `FloorConfig::default()` holds the reference values the dashboard runs
//! with. The struct deserializes with every field optional, so a config file
//! only needs to list what it overrides.
//!
//! ```
//! use floorwatch_logic::config::FloorConfig;
//!
//! let config: FloorConfig = serde_json::from_str(r#"{ "world_width": 1000.0 }"#).unwrap();
//! assert_eq!(config.world_width, 1000.0);
//! assert_eq!(config.world_height, 600.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;
use crate::geometry::WorldBounds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Distance from the world edge that assets bounce off and people clamp to.
    pub boundary_padding: f32,

    /// Asset motion clock period.
    pub asset_tick_ms: u64,
    /// Person motion/state clock period. One person tick counts as one second.
    pub person_tick_ms: u64,

    /// Max per-axis random step for a person per tick.
    pub jitter: f32,
    /// Others closer than this keep a person from being alone.
    pub social_radius: f32,
    /// Alone seconds after which the isolation alert fires (strictly greater).
    pub isolation_threshold: u32,
    pub stability_floor: f32,
    pub stability_ceiling: f32,
    /// Max stability change per tick, either direction.
    pub stability_drift: f32,

    /// Occupants a zone is sized for; density is occupants / capacity.
    pub zone_capacity: f32,
    /// Overload is only considered above this many occupants.
    pub overload_min_occupants: usize,
    /// Close neighbors one occupant needs for the zone to count as overloaded.
    pub overload_neighbors: usize,
    pub cluster_radius: f32,

    /// Distance one directional nudge moves the controllable asset.
    pub nudge_step: f32,
    pub controllable_asset: String,
    /// Zone where an unauthenticated person turns the system status stormy.
    pub restricted_zone: String,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            boundary_padding: 20.0,
            asset_tick_ms: 100,
            person_tick_ms: 1000,
            jitter: 10.0,
            social_radius: 100.0,
            isolation_threshold: 300,
            stability_floor: 30.0,
            stability_ceiling: 100.0,
            stability_drift: 1.0,
            zone_capacity: 5.0,
            overload_min_occupants: 3,
            overload_neighbors: 3,
            cluster_radius: 100.0,
            nudge_step: 10.0,
            controllable_asset: "a1".into(),
            restricted_zone: "zone-b".into(),
        }
    }
}

impl FloorConfig {
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.world_width, self.world_height, self.boundary_padding)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.asset_tick_ms == 0 {
            return Err(ScenarioError::NonPositivePeriod("asset_tick_ms"));
        }
        if self.person_tick_ms == 0 {
            return Err(ScenarioError::NonPositivePeriod("person_tick_ms"));
        }
        let padding = self.boundary_padding.max(0.0);
        if self.world_width <= padding * 2.0 || self.world_height <= padding * 2.0 {
            return Err(ScenarioError::WorldTooSmall {
                width: self.world_width,
                height: self.world_height,
                padding: self.boundary_padding,
            });
        }
        if self.stability_floor > self.stability_ceiling {
            return Err(ScenarioError::InvertedStabilityRange {
                floor: self.stability_floor,
                ceiling: self.stability_ceiling,
            });
        }
        if self.zone_capacity <= 0.0 {
            return Err(ScenarioError::NonPositiveCapacity(self.zone_capacity));
        }
        Ok(())
    }
}
