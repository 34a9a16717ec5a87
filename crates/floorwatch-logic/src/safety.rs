//! Standalone safety rule set.
//!
//! These rules are evaluated outside the tick: the tick engine has its own
//! inline hazard and access logic, and the two are intentionally not merged.
//! The rule set speaks a two-word zone vocabulary (`restricted` / `open`);
//! [`RuleZone::from_zone_type`] is the single place where the floor's zone
//! types are mapped onto it.
//!
//! # Priority
//!
//! [`overall_safety_assessment`] reports the first finding in this order:
//!
//! | Order | Rule | Level |
//! |-------|------|-------|
//! | 1 | Unauthenticated access | alert |
//! | 2 | Following too close | alert |
//! | 3 | Isolation / low stability | warning |
//! | 4 | Zone violations | alert |
//! | - | All clear | safe |
//!
//! ```
//! use floorwatch_logic::safety::{overall_safety_assessment, FindingLevel, RuleSubject, RuleZone};
//!
//! let visitor = RuleSubject {
//!     is_authenticated: false,
//!     isolation_alert: true,
//!     stability_score: 35.0,
//!     safety_violation: true,
//! };
//! let finding = overall_safety_assessment(&visitor, RuleZone::Restricted, &[]);
//! assert_eq!(finding.level, FindingLevel::Alert);
//! assert_eq!(finding.message, "Unauthenticated access");
//! ```

use serde::Serialize;

use crate::model::{Person, ZoneType};

/// Neighbors closer than this inside a restricted zone are tailgating.
pub const FOLLOWING_DISTANCE: f32 = 2.0;

/// Stability scores below this raise a wellbeing warning.
pub const LOW_STABILITY: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingLevel {
    Alert,
    Warning,
    Safe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyFinding {
    pub level: FindingLevel,
    pub message: String,
}

impl SafetyFinding {
    fn new(level: FindingLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn all_clear() -> Self {
        Self::new(FindingLevel::Safe, "All clear")
    }
}

/// Zone as the rule set sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleZone {
    Restricted,
    Open,
}

impl RuleZone {
    /// `Work` zones are restricted; rest and blind zones are open.
    pub fn from_zone_type(zone_type: ZoneType) -> Self {
        match zone_type {
            ZoneType::Work => RuleZone::Restricted,
            ZoneType::Rest | ZoneType::Blind => RuleZone::Open,
        }
    }

    /// Parse the rule set's own label. Anything but `restricted` is open.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("restricted") {
            RuleZone::Restricted
        } else {
            RuleZone::Open
        }
    }

    pub fn is_restricted(&self) -> bool {
        *self == RuleZone::Restricted
    }
}

/// The slice of a person the rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSubject {
    pub is_authenticated: bool,
    pub isolation_alert: bool,
    pub stability_score: f32,
    pub safety_violation: bool,
}

impl From<&Person> for RuleSubject {
    fn from(p: &Person) -> Self {
        Self {
            is_authenticated: p.is_authenticated,
            isolation_alert: p.wellbeing.isolation_alert,
            stability_score: p.wellbeing.stability_score,
            safety_violation: p.safety_violation,
        }
    }
}

pub fn check_access(subject: &RuleSubject, zone: RuleZone) -> Option<SafetyFinding> {
    if !subject.is_authenticated && zone.is_restricted() {
        return Some(SafetyFinding::new(FindingLevel::Alert, "Unauthenticated access"));
    }
    None
}

/// `neighbors` are raw distances to the people around the subject.
pub fn check_following_distance(zone: RuleZone, neighbors: &[f32]) -> Option<SafetyFinding> {
    if zone.is_restricted() && neighbors.iter().any(|d| *d < FOLLOWING_DISTANCE) {
        return Some(SafetyFinding::new(FindingLevel::Alert, "Following too close"));
    }
    None
}

/// Access first, then tailgating.
pub fn check_security(
    subject: &RuleSubject,
    zone: RuleZone,
    neighbors: &[f32],
) -> Option<SafetyFinding> {
    check_access(subject, zone).or_else(|| check_following_distance(zone, neighbors))
}

pub fn assess_wellbeing(subject: &RuleSubject) -> Option<SafetyFinding> {
    if subject.isolation_alert {
        return Some(SafetyFinding::new(FindingLevel::Warning, "Isolation detected"));
    }
    if subject.stability_score < LOW_STABILITY {
        return Some(SafetyFinding::new(FindingLevel::Warning, "Low stability score"));
    }
    None
}

pub fn evaluate_zone_safety(occupants: &[RuleSubject]) -> Option<SafetyFinding> {
    let violations = occupants.iter().filter(|o| o.safety_violation).count();
    if violations > 0 {
        return Some(SafetyFinding::new(
            FindingLevel::Alert,
            format!("{} safety violations", violations),
        ));
    }
    None
}

/// First finding by priority, or all clear.
pub fn overall_safety_assessment(
    subject: &RuleSubject,
    zone: RuleZone,
    neighbors: &[f32],
) -> SafetyFinding {
    check_security(subject, zone, neighbors)
        .or_else(|| assess_wellbeing(subject))
        .or_else(|| evaluate_zone_safety(std::slice::from_ref(subject)))
        .unwrap_or_else(SafetyFinding::all_clear)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> RuleSubject {
        RuleSubject {
            is_authenticated: true,
            isolation_alert: false,
            stability_score: 80.0,
            safety_violation: false,
        }
    }

    #[test]
    fn access_only_in_restricted_zone() {
        let visitor = RuleSubject {
            is_authenticated: false,
            ..subject()
        };
        assert_eq!(
            check_access(&visitor, RuleZone::Restricted).map(|f| f.message),
            Some("Unauthenticated access".to_string())
        );
        assert_eq!(check_access(&visitor, RuleZone::Open), None);
        assert_eq!(check_access(&subject(), RuleZone::Restricted), None);
    }

    #[test]
    fn following_too_close() {
        let f = check_following_distance(RuleZone::Restricted, &[15.0, 1.9]).unwrap();
        assert_eq!(f.level, FindingLevel::Alert);
        assert_eq!(f.message, "Following too close");
        assert_eq!(check_following_distance(RuleZone::Restricted, &[2.0, 50.0]), None);
        assert_eq!(check_following_distance(RuleZone::Open, &[0.5]), None);
        assert_eq!(check_following_distance(RuleZone::Restricted, &[]), None);
    }

    #[test]
    fn security_prefers_access() {
        let visitor = RuleSubject {
            is_authenticated: false,
            ..subject()
        };
        let f = check_security(&visitor, RuleZone::Restricted, &[0.1]).unwrap();
        assert_eq!(f.message, "Unauthenticated access");
        let f = check_security(&subject(), RuleZone::Restricted, &[0.1]).unwrap();
        assert_eq!(f.message, "Following too close");
    }

    #[test]
    fn wellbeing_isolation_before_stability() {
        let s = RuleSubject {
            isolation_alert: true,
            stability_score: 31.0,
            ..subject()
        };
        assert_eq!(assess_wellbeing(&s).unwrap().message, "Isolation detected");

        let s = RuleSubject {
            stability_score: 39.9,
            ..subject()
        };
        let f = assess_wellbeing(&s).unwrap();
        assert_eq!(f.level, FindingLevel::Warning);
        assert_eq!(f.message, "Low stability score");

        let s = RuleSubject {
            stability_score: 40.0,
            ..subject()
        };
        assert_eq!(assess_wellbeing(&s), None);
    }

    #[test]
    fn zone_counts_violations() {
        let bad = RuleSubject {
            safety_violation: true,
            ..subject()
        };
        let f = evaluate_zone_safety(&[bad, subject(), bad]).unwrap();
        assert_eq!(f.message, "2 safety violations");
        assert_eq!(evaluate_zone_safety(&[subject()]), None);
        assert_eq!(evaluate_zone_safety(&[]), None);
    }

    #[test]
    fn composite_priority() {
        // access outranks wellbeing
        let s = RuleSubject {
            is_authenticated: false,
            isolation_alert: true,
            ..subject()
        };
        assert_eq!(
            overall_safety_assessment(&s, RuleZone::Restricted, &[]).message,
            "Unauthenticated access"
        );

        // wellbeing outranks zone aggregate
        let s = RuleSubject {
            isolation_alert: true,
            safety_violation: true,
            ..subject()
        };
        assert_eq!(
            overall_safety_assessment(&s, RuleZone::Open, &[]).message,
            "Isolation detected"
        );

        let s = RuleSubject {
            safety_violation: true,
            ..subject()
        };
        assert_eq!(
            overall_safety_assessment(&s, RuleZone::Open, &[]).message,
            "1 safety violations"
        );

        assert_eq!(
            overall_safety_assessment(&subject(), RuleZone::Restricted, &[50.0]),
            SafetyFinding::all_clear()
        );
    }

    #[test]
    fn zone_vocabulary_mapping() {
        assert_eq!(RuleZone::from_zone_type(ZoneType::Work), RuleZone::Restricted);
        assert_eq!(RuleZone::from_zone_type(ZoneType::Rest), RuleZone::Open);
        assert_eq!(RuleZone::from_zone_type(ZoneType::Blind), RuleZone::Open);
        assert_eq!(RuleZone::from_label("restricted"), RuleZone::Restricted);
        assert_eq!(RuleZone::from_label("WORK"), RuleZone::Open);
    }
}
