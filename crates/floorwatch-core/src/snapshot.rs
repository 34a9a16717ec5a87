//! Presentation contract: what a dashboard reads each frame.
//!
//! A [`FloorSnapshot`] is a detached copy; mutating it never touches the
//! engine. Field names serialize in camelCase to match the dashboard.

use floorwatch_logic::efficiency::{person_efficiency, EfficiencyReport};
use floorwatch_logic::geometry::calculate_distance;
use floorwatch_logic::metrics::FloorMetrics;
use floorwatch_logic::model::{AccessPoint, Asset, Person, Zone};
use floorwatch_logic::safety::{overall_safety_assessment, RuleSubject, RuleZone, SafetyFinding};
use serde::Serialize;

use crate::generation::FloorLayout;

/// A person plus everything derived from them for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonView {
    #[serde(flatten)]
    pub person: Person,
    pub efficiency: EfficiencyReport,
    pub assessment: SafetyFinding,
}

impl PersonView {
    /// `everyone` is the full roster, used for the following-distance check.
    pub fn new(person: &Person, everyone: &[Person], layout: &FloorLayout) -> Self {
        let zone = layout
            .zone(&person.zone_id)
            .map_or(RuleZone::Open, |z| RuleZone::from_zone_type(z.zone_type));
        let distances: Vec<f32> = everyone
            .iter()
            .filter(|other| other.id != person.id)
            .map(|other| calculate_distance(person.position, other.position))
            .collect();

        Self {
            person: person.clone(),
            efficiency: person_efficiency(person),
            assessment: overall_safety_assessment(&RuleSubject::from(person), zone, &distances),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorSnapshot {
    pub sim_time_ms: u64,
    pub people: Vec<PersonView>,
    pub assets: Vec<Asset>,
    pub zones: Vec<Zone>,
    pub access_points: Vec<AccessPoint>,
    pub metrics: FloorMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_person_id: Option<String>,
}

impl FloorSnapshot {
    pub fn person(&self, id: &str) -> Option<&PersonView> {
        self.people.iter().find(|v| v.person.id == id)
    }

    pub fn selected(&self) -> Option<&PersonView> {
        self.selected_person_id.as_deref().and_then(|id| self.person(id))
    }
}
