//! The default warehouse floor and scenario validation.
//!
//! [`Scenario::warehouse`] reproduces the dashboard's opening state: four
//! zones, four access points, one forklift and five people. Worker_02 starts
//! outside the world on purpose; the first person tick clamps them back in.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::FloorConfig;
use crate::error::ScenarioError;
use crate::geometry::Point;
use crate::model::{
    AccessPoint, AccessPointStatus, Asset, AssetKind, Person, Role, SafetyStatus, Velocity,
    WellbeingStats, Zone, ZoneType,
};

/// Initial contents of a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Layout order matters: zone lookup takes the first match.
    pub zones: Vec<Zone>,
    pub access_points: Vec<AccessPoint>,
    pub assets: Vec<Asset>,
    pub people: Vec<Person>,
}

impl Scenario {
    pub fn warehouse(now: DateTime<Utc>) -> Self {
        Self {
            zones: warehouse_zones(),
            access_points: warehouse_access_points(),
            assets: vec![Asset {
                id: "a1".into(),
                kind: AssetKind::Forklift,
                position: Point::new(350.0, 280.0),
                velocity: Velocity::new(1.2, 0.8),
                warning_radius: 120.0,
                danger_radius: 60.0,
            }],
            people: vec![
                PersonSeed::new("p1", "Tech_John", Role::Worker, 200.0, 200.0, "zone-a")
                    .times(4000, 300)
                    .wellbeing(0, 15.0, false, 92.0)
                    .build(now),
                PersonSeed::new("p2", "Visitor_04", Role::Visitor, 600.0, 150.0, "zone-b")
                    .times(0, 120)
                    .unauthenticated()
                    .wellbeing(4500, 80.0, false, 45.0)
                    .build(now),
                PersonSeed::new("p3", "Sup_Sarah", Role::Supervisor, 500.0, 450.0, "zone-c")
                    .times(8000, 500)
                    .wellbeing(0, 10.0, false, 80.0)
                    .build(now),
                PersonSeed::new("p4", "Worker_02", Role::Worker, 880.0, 520.0, "zone-c")
                    .times(6000, 200)
                    .wellbeing(420, 85.0, true, 55.0)
                    .build(now),
                PersonSeed::new("p5", "Worker_05", Role::Worker, 400.0, 450.0, "zone-c")
                    .times(8000, 500)
                    .wellbeing(0, 10.0, false, 88.0)
                    .build(now),
            ],
        }
    }

    /// Check ids are unique and every asset's danger radius sits inside its warning radius.
    pub fn validate(&self, config: &FloorConfig) -> Result<(), ScenarioError> {
        config.validate()?;

        let mut seen = HashSet::new();
        for zone in &self.zones {
            if !seen.insert(zone.id.as_str()) {
                return Err(ScenarioError::DuplicateZone(zone.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for asset in &self.assets {
            if !seen.insert(asset.id.as_str()) {
                return Err(ScenarioError::DuplicateAsset(asset.id.clone()));
            }
            if asset.danger_radius >= asset.warning_radius {
                return Err(ScenarioError::InvalidHazardRadii {
                    asset: asset.id.clone(),
                    warning: asset.warning_radius,
                    danger: asset.danger_radius,
                });
            }
        }

        let mut seen = HashSet::new();
        for person in &self.people {
            if !seen.insert(person.id.as_str()) {
                return Err(ScenarioError::DuplicatePerson(person.id.clone()));
            }
        }

        Ok(())
    }
}

pub fn warehouse_zones() -> Vec<Zone> {
    vec![
        Zone::rect(
            "zone-a",
            "Picking Aisles",
            ZoneType::Work,
            "#0ea5e933",
            Point::new(60.0, 60.0),
            Point::new(380.0, 300.0),
        ),
        Zone::rect(
            "zone-b",
            "Loading Dock",
            ZoneType::Work,
            "#f9731633",
            Point::new(420.0, 60.0),
            Point::new(740.0, 300.0),
        ),
        Zone::rect(
            "zone-c",
            "Break Area",
            ZoneType::Rest,
            "#22c55e33",
            Point::new(300.0, 340.0),
            Point::new(740.0, 540.0),
        ),
        Zone::rect(
            "zone-d",
            "Blind Corner",
            ZoneType::Blind,
            "#64748b33",
            Point::new(60.0, 340.0),
            Point::new(260.0, 540.0),
        ),
    ]
}

pub fn warehouse_access_points() -> Vec<AccessPoint> {
    let ap = |id: &str, label: &str, x: f32, y: f32, status: AccessPointStatus| AccessPoint {
        id: id.into(),
        label: label.into(),
        position: Point::new(x, y),
        status,
    };
    vec![
        ap("ap-1", "AP North-West", 120.0, 40.0, AccessPointStatus::Online),
        ap("ap-2", "AP North-East", 680.0, 40.0, AccessPointStatus::Online),
        ap("ap-3", "AP South", 520.0, 570.0, AccessPointStatus::Online),
        ap("ap-4", "AP Blind Corner", 160.0, 440.0, AccessPointStatus::Offline),
    ]
}

/// Builder for a person in their initial, all-safe state.
#[derive(Debug, Clone)]
pub struct PersonSeed {
    id: String,
    name: String,
    role: Role,
    position: Point,
    zone_id: String,
    total_work_time: u32,
    total_rest_time: u32,
    is_authenticated: bool,
    wellbeing: WellbeingStats,
}

impl PersonSeed {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        x: f32,
        y: f32,
        zone_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            position: Point::new(x, y),
            zone_id: zone_id.into(),
            total_work_time: 0,
            total_rest_time: 0,
            is_authenticated: true,
            wellbeing: WellbeingStats {
                alone_time: 0,
                edge_zone_percentage: 0.0,
                isolation_alert: false,
                stability_score: 80.0,
            },
        }
    }

    pub fn times(mut self, work: u32, rest: u32) -> Self {
        self.total_work_time = work;
        self.total_rest_time = rest;
        self
    }

    pub fn unauthenticated(mut self) -> Self {
        self.is_authenticated = false;
        self
    }

    pub fn wellbeing(mut self, alone_time: u32, edge_zone: f32, isolation: bool, stability: f32) -> Self {
        self.wellbeing = WellbeingStats {
            alone_time,
            edge_zone_percentage: edge_zone,
            isolation_alert: isolation,
            stability_score: stability,
        };
        self
    }

    pub fn build(self, now: DateTime<Utc>) -> Person {
        Person {
            id: self.id,
            name: self.name,
            position: self.position,
            zone_id: self.zone_id,
            last_seen: now,
            dwell_time: 0,
            total_work_time: self.total_work_time,
            total_rest_time: self.total_rest_time,
            safety_status: SafetyStatus::Safe,
            safety_violation: false,
            violation_reason: None,
            is_authenticated: self.is_authenticated,
            role: self.role,
            wellbeing: self.wellbeing,
        }
    }
}
