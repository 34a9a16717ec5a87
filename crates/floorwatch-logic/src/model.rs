//! Floor data model: zones, access points, assets and people.
//!
//! Field names serialize in camelCase so a snapshot can be handed straight
//! to the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Zone category. `Work` zones are the restricted ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneType {
    Rest,
    Work,
    Blind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: ZoneType,
    /// Display color, e.g. `#0ea5e933`
    pub color: String,
    /// Boundary points; only their bounding box matters for membership.
    pub points: Vec<Point>,
}

impl Zone {
    /// Rectangular zone from two opposite corners.
    pub fn rect(
        id: impl Into<String>,
        name: impl Into<String>,
        zone_type: ZoneType,
        color: impl Into<String>,
        top_left: Point,
        bottom_right: Point,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            zone_type,
            color: color.into(),
            points: vec![
                top_left,
                Point::new(bottom_right.x, top_left.y),
                bottom_right,
                Point::new(top_left.x, bottom_right.y),
            ],
        }
    }

    pub fn is_restricted(&self) -> bool {
        self.zone_type == ZoneType::Work
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessPointStatus {
    Online,
    Offline,
}

/// Wireless access point on the map. Static for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessPoint {
    pub id: String,
    pub label: String,
    pub position: Point,
    pub status: AccessPointStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetKind {
    Forklift,
    Pallet,
    Hazmat,
}

/// Per-tick displacement of an asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f32,
    pub vy: f32,
}

impl Velocity {
    pub fn new(vx: f32, vy: f32) -> Self {
        Self { vx, vy }
    }

    pub fn magnitude(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

/// A moving hazard source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    pub position: Point,
    pub velocity: Velocity,
    pub warning_radius: f32,
    /// Always strictly below `warning_radius`.
    pub danger_radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Worker,
    Supervisor,
    Visitor,
}

/// Hazard classification, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyStatus {
    Safe,
    Warning,
    Danger,
}

impl SafetyStatus {
    pub fn is_safe(&self) -> bool {
        *self == SafetyStatus::Safe
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellbeingStats {
    /// Seconds spent with nobody else within the social radius. Never decreases.
    pub alone_time: u32,
    pub edge_zone_percentage: f32,
    /// Sticky: once alone time passes the threshold it stays set.
    pub isolation_alert: bool,
    pub stability_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub position: Point,
    /// Last zone occupied; kept when the person walks outside every zone.
    pub zone_id: String,
    /// Stamp of the last person tick. The engine uses floor time (its start
    /// instant plus simulated time), which only matches wall time when the
    /// floor runs at real speed.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_seen: DateTime<Utc>,
    /// Seconds in the current zone; zero while outside every zone.
    pub dwell_time: u32,
    pub total_work_time: u32,
    pub total_rest_time: u32,
    pub safety_status: SafetyStatus,
    pub safety_violation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation_reason: Option<String>,
    pub is_authenticated: bool,
    pub role: Role,
    pub wellbeing: WellbeingStats,
}
