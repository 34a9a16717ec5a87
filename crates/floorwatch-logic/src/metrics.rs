//! Derived floor metrics.
//!
//! Everything here is recomputed from scratch out of the current person
//! snapshot; there is no incremental path, so running [`aggregate`] twice on
//! the same people gives the same result.
//!
//! # Overload
//!
//! A zone is only considered for overload once it holds more than
//! `overload_min_occupants` people. It is overloaded when at least one
//! occupant has `overload_neighbors` or more other occupants within
//! `cluster_radius`, which flags a local cluster rather than raw headcount.
//!
//! # System status
//!
//! | Status | When |
//! |--------|------|
//! | `STORMY` | anyone in `DANGER`, or anyone unauthenticated in the restricted zone |
//! | `CLOUDY` | anyone in `WARNING`, or any isolation alert |
//! | `SUNNY` | otherwise |

use serde::Serialize;

use crate::config::FloorConfig;
use crate::geometry::calculate_distance;
use crate::model::{Person, SafetyStatus, Zone};

/// Density above which a zone is drawn as a high-intensity bottleneck.
pub const HIGH_INTENSITY_DENSITY: f32 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bottleneck {
    pub zone_name: String,
    /// Occupants over zone capacity.
    pub density: f32,
    pub is_overloaded: bool,
    pub occupant_count: usize,
    /// Mean occupant dwell, in minutes.
    pub avg_dwell_time: f32,
}

impl Bottleneck {
    pub fn is_high_intensity(&self) -> bool {
        self.density > HIGH_INTENSITY_DENSITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemStatus {
    Sunny,
    Cloudy,
    Stormy,
}

impl SystemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SystemStatus::Sunny => "NORMAL",
            SystemStatus::Cloudy => "ATTENTION REQUIRED",
            SystemStatus::Stormy => "CRITICAL",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            SystemStatus::Sunny => "All systems operating normally",
            SystemStatus::Cloudy => "Efficiency or wellbeing deviation detected",
            SystemStatus::Stormy => "Immediate safety review required",
        }
    }
}

/// Headline shown on the safety panel. First matching variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyBanner {
    Critical,
    ProximityWarning,
    AccessWarning,
    AllClear,
}

impl SafetyBanner {
    pub fn headline(&self) -> &'static str {
        match self {
            SafetyBanner::Critical => "CRITICAL ALERT",
            SafetyBanner::ProximityWarning => "PROXIMITY WARNING",
            SafetyBanner::AccessWarning => "ACCESS WARNING",
            SafetyBanner::AllClear => "ALL CLEAR",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            SafetyBanner::Critical => {
                "Collision risk detected: personnel within forklift danger zone."
            }
            SafetyBanner::ProximityWarning => {
                "Forklift operating near personnel. Maintain safe distance."
            }
            SafetyBanner::AccessWarning => "Unauthorized visitor detected in restricted work zone.",
            SafetyBanner::AllClear => "All monitored areas are operating safely.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DensityStatus {
    Ideal,
    Varies,
}

/// Everything the dashboard derives from one person snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorMetrics {
    pub bottlenecks: Vec<Bottleneck>,
    pub system_status: SystemStatus,
    pub global_efficiency: u32,
    pub safety_banner: SafetyBanner,
    pub active_personnel: usize,
    pub isolated_workers: usize,
    pub density_status: DensityStatus,
}

/// True when some occupant has enough close neighbors.
pub fn zone_overloaded(occupants: &[&Person], config: &FloorConfig) -> bool {
    if occupants.len() <= config.overload_min_occupants {
        return false;
    }
    occupants.iter().enumerate().any(|(i, a)| {
        let close = occupants
            .iter()
            .enumerate()
            .filter(|(j, b)| {
                i != *j && calculate_distance(a.position, b.position) < config.cluster_radius
            })
            .count();
        close >= config.overload_neighbors
    })
}

pub fn zone_bottleneck(zone: &Zone, people: &[Person], config: &FloorConfig) -> Bottleneck {
    let occupants: Vec<&Person> = people.iter().filter(|p| p.zone_id == zone.id).collect();
    let count = occupants.len();
    let avg_dwell_seconds = if count > 0 {
        occupants.iter().map(|p| p.dwell_time as f32).sum::<f32>() / count as f32
    } else {
        0.0
    };

    Bottleneck {
        zone_name: zone.name.clone(),
        density: count as f32 / config.zone_capacity,
        is_overloaded: zone_overloaded(&occupants, config),
        occupant_count: count,
        avg_dwell_time: avg_dwell_seconds / 60.0,
    }
}

/// One bottleneck per zone, in layout order.
pub fn compute_bottlenecks(zones: &[Zone], people: &[Person], config: &FloorConfig) -> Vec<Bottleneck> {
    zones
        .iter()
        .map(|z| zone_bottleneck(z, people, config))
        .collect()
}

pub fn system_status(people: &[Person], restricted_zone: &str) -> SystemStatus {
    let stormy = people.iter().any(|p| {
        p.safety_status == SafetyStatus::Danger
            || (!p.is_authenticated && p.zone_id == restricted_zone)
    });
    if stormy {
        return SystemStatus::Stormy;
    }

    let cloudy = people
        .iter()
        .any(|p| p.safety_status == SafetyStatus::Warning || p.wellbeing.isolation_alert);
    if cloudy {
        return SystemStatus::Cloudy;
    }

    SystemStatus::Sunny
}

/// Mean stability score, rounded. Zero for an empty floor.
pub fn global_efficiency(people: &[Person]) -> u32 {
    if people.is_empty() {
        return 0;
    }
    let sum: f32 = people.iter().map(|p| p.wellbeing.stability_score).sum();
    (sum / people.len() as f32).round().max(0.0) as u32
}

pub fn safety_banner(people: &[Person]) -> SafetyBanner {
    if people.iter().any(|p| p.safety_status == SafetyStatus::Danger) {
        SafetyBanner::Critical
    } else if people.iter().any(|p| p.safety_status == SafetyStatus::Warning) {
        SafetyBanner::ProximityWarning
    } else if people.iter().any(|p| p.safety_violation && !p.is_authenticated) {
        SafetyBanner::AccessWarning
    } else {
        SafetyBanner::AllClear
    }
}

pub fn aggregate(zones: &[Zone], people: &[Person], config: &FloorConfig) -> FloorMetrics {
    let system_status = system_status(people, &config.restricted_zone);
    FloorMetrics {
        bottlenecks: compute_bottlenecks(zones, people, config),
        system_status,
        global_efficiency: global_efficiency(people),
        safety_banner: safety_banner(people),
        active_personnel: people.len(),
        isolated_workers: people
            .iter()
            .filter(|p| p.wellbeing.isolation_alert)
            .count(),
        density_status: if system_status == SystemStatus::Sunny {
            DensityStatus::Ideal
        } else {
            DensityStatus::Varies
        },
    }
}
