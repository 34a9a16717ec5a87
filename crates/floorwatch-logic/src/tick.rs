//! Per-person state step for one person tick.
//!
//! A person tick counts as one second of floor time. Every person is stepped
//! against the *previous* snapshot of everybody else, so the order in which
//! people are processed never changes the outcome.
//!
//! Randomness is drawn by the caller and passed in as a [`PersonDraw`],
//! which keeps this module deterministic.
//!
//! # Step order
//!
//! 1. Jitter the position and clamp it into the padded world
//! 2. Resolve the zone (first match in layout order, else keep the old id
//!    and reset dwell)
//! 3. Hazard scan against the latest asset positions
//! 4. Access flag: unauthenticated inside a `Work` zone
//! 5. Violation: hazard not safe, or access flag
//! 6. Social scan: anyone else within the social radius?
//! 7. Wellbeing: alone time, sticky isolation alert, stability drift
//! 8. Bookkeeping: dwell, work and rest time, last seen

use chrono::{DateTime, Utc};

use crate::config::FloorConfig;
use crate::geometry::{calculate_distance, is_point_in_zone, Point};
use crate::hazard::scan_hazards;
use crate::model::{Asset, Person, SafetyStatus, WellbeingStats, Zone, ZoneType};

pub const HAZARD_REASON: &str = "Hazard proximity";
pub const ACCESS_REASON: &str = "Unauthenticated access";

/// Random values one person consumes in one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PersonDraw {
    /// In `[-jitter, jitter]`.
    pub jitter_x: f32,
    /// In `[-jitter, jitter]`.
    pub jitter_y: f32,
    /// In `[-stability_drift, stability_drift]`.
    pub stability_delta: f32,
}

/// Everything a person step reads besides the person itself.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// People as they were before this tick.
    pub previous: &'a [Person],
    /// Latest committed asset positions.
    pub assets: &'a [Asset],
    pub zones: &'a [Zone],
    pub config: &'a FloorConfig,
    pub now: DateTime<Utc>,
}

/// First zone, in layout order, containing `position`.
pub fn resolve_zone(position: Point, zones: &[Zone]) -> Option<&Zone> {
    zones.iter().find(|z| is_point_in_zone(position, z))
}

/// Other people (by id) strictly closer than `radius`.
pub fn count_neighbors(position: Point, self_id: &str, people: &[Person], radius: f32) -> usize {
    people
        .iter()
        .filter(|o| o.id != self_id && calculate_distance(position, o.position) < radius)
        .count()
}

/// Advance wellbeing by one second.
///
/// Alone time only ever grows. The isolation alert is raised once alone time
/// is strictly above the threshold and is latched from then on, including
/// an alert the person was loaded with.
pub fn update_wellbeing(
    stats: &WellbeingStats,
    alone: bool,
    stability_delta: f32,
    config: &FloorConfig,
) -> WellbeingStats {
    let alone_time = stats.alone_time.saturating_add(u32::from(alone));
    WellbeingStats {
        alone_time,
        edge_zone_percentage: stats.edge_zone_percentage,
        isolation_alert: stats.isolation_alert || alone_time > config.isolation_threshold,
        stability_score: (stats.stability_score + stability_delta)
            .clamp(config.stability_floor, config.stability_ceiling),
    }
}

pub fn step_person(person: &Person, draw: PersonDraw, ctx: &TickContext<'_>) -> Person {
    let config = ctx.config;

    let position = config
        .bounds()
        .clamp(person.position.offset(draw.jitter_x, draw.jitter_y));

    let zone = resolve_zone(position, ctx.zones);
    let zone_type = zone.map(|z| z.zone_type);
    let zone_id = zone.map_or_else(|| person.zone_id.clone(), |z| z.id.clone());

    let safety_status = scan_hazards(position, ctx.assets);
    let access_warning = zone_type == Some(ZoneType::Work) && !person.is_authenticated;
    let safety_violation = !safety_status.is_safe() || access_warning;
    let violation_reason = if safety_status != SafetyStatus::Safe {
        Some(HAZARD_REASON.to_string())
    } else if access_warning {
        Some(ACCESS_REASON.to_string())
    } else {
        None
    };

    let alone = count_neighbors(position, &person.id, ctx.previous, config.social_radius) == 0;
    let wellbeing = update_wellbeing(&person.wellbeing, alone, draw.stability_delta, config);

    // A miss keeps the old zone id but still resets dwell
    let dwell_time = if zone.map(|z| z.id.as_str()) != Some(person.zone_id.as_str()) {
        0
    } else {
        person.dwell_time.saturating_add(1)
    };
    let work = u32::from(zone_type == Some(ZoneType::Work));
    let rest = u32::from(zone_type == Some(ZoneType::Rest));

    Person {
        id: person.id.clone(),
        name: person.name.clone(),
        position,
        zone_id,
        last_seen: ctx.now,
        dwell_time,
        total_work_time: person.total_work_time.saturating_add(work),
        total_rest_time: person.total_rest_time.saturating_add(rest),
        safety_status,
        safety_violation,
        violation_reason,
        is_authenticated: person.is_authenticated,
        role: person.role,
        wellbeing,
    }
}

/// Step everybody against the same previous snapshot. `draws` pairs with `previous` by index.
pub fn advance_people(draws: &[PersonDraw], ctx: &TickContext<'_>) -> Vec<Person> {
    ctx.previous
        .iter()
        .zip(draws.iter().copied().chain(std::iter::repeat(PersonDraw::default())))
        .map(|(p, d)| step_person(p, d, ctx))
        .collect()
}
