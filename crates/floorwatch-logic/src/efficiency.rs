//! Work/rest balance classifier.
//!
//! ```
//! use floorwatch_logic::efficiency::{compute_efficiency, EfficiencyLevel};
//!
//! let report = compute_efficiency(4000, 300);
//! assert_eq!(report.level, EfficiencyLevel::Warning);
//! assert_eq!(report.suggestion, Some("Rest recommended"));
//! ```

use serde::Serialize;

use crate::model::Person;

/// Work seconds per rest second above which rest is recommended.
pub const MAX_WORK_REST_RATIO: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyLevel {
    Normal,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EfficiencyReport {
    pub level: EfficiencyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'static str>,
}

/// Classify cumulative work/rest time. Rest is floored at one second.
pub fn compute_efficiency(total_work_time: u32, total_rest_time: u32) -> EfficiencyReport {
    let ratio = f64::from(total_work_time) / f64::from(total_rest_time.max(1));
    if ratio > MAX_WORK_REST_RATIO {
        EfficiencyReport {
            level: EfficiencyLevel::Warning,
            suggestion: Some("Rest recommended"),
        }
    } else {
        EfficiencyReport {
            level: EfficiencyLevel::Normal,
            suggestion: None,
        }
    }
}

pub fn person_efficiency(person: &Person) -> EfficiencyReport {
    compute_efficiency(person.total_work_time, person.total_rest_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overworked_needs_rest() {
        // 4000 / 300 ≈ 13.3
        let r = compute_efficiency(4000, 300);
        assert_eq!(r.level, EfficiencyLevel::Warning);
        assert_eq!(r.suggestion, Some("Rest recommended"));
    }

    #[test]
    fn rested_is_normal() {
        let r = compute_efficiency(100, 500);
        assert_eq!(r.level, EfficiencyLevel::Normal);
        assert_eq!(r.suggestion, None);
    }

    #[test]
    fn ratio_of_exactly_ten_is_normal() {
        assert_eq!(compute_efficiency(1000, 100).level, EfficiencyLevel::Normal);
        assert_eq!(compute_efficiency(1001, 100).level, EfficiencyLevel::Warning);
    }

    #[test]
    fn zero_rest_is_guarded() {
        assert_eq!(compute_efficiency(10, 0).level, EfficiencyLevel::Normal);
        assert_eq!(compute_efficiency(11, 0).level, EfficiencyLevel::Warning);
        assert_eq!(compute_efficiency(0, 0).level, EfficiencyLevel::Normal);
    }

    #[test]
    fn serializes_without_empty_suggestion() {
        let json = serde_json::to_string(&compute_efficiency(1, 1)).unwrap();
        assert_eq!(json, r#"{"level":"normal"}"#);
    }
}
