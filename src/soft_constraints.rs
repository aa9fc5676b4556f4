//! Tagged-variant normalization for the soft-constraint block (§3 `SoftConstraints`,
//! §4.8, §9 "Dynamic polymorphism in soft rules").
//!
//! Each scalar-limit rule arrives as one of four shapes: absent, a bare
//! number, a stringly-typed number, or an object carrying a default plus a
//! list of per-entity exceptions. `LimitRule` is the single canonical shape
//! the auditor consumes; `parse_limit_field` does the normalization once, at
//! the request boundary, so nothing downstream re-derives it.
//!
//! A boolean `true` for one of these fields has no numeric counterpart to
//! normalize to (flagged, not guessed, per §9's "Open questions" policy) —
//! it is treated the same as the field being absent. `false` disables the
//! rule explicitly, same as absent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Scalar-limit rules
// ============================================================================

/// A normalized `scalar | {default, exceptions}` soft-limit field.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitRule {
    pub default: Option<f64>,
    /// entity id -> overridden limit
    pub exceptions: HashMap<String, f64>,
}

impl LimitRule {
    pub fn disabled() -> Self {
        Self {
            default: None,
            exceptions: HashMap::new(),
        }
    }

    pub fn limit_for(&self, entity_id: &str) -> Option<f64> {
        self.exceptions
            .get(entity_id)
            .copied()
            .or(self.default)
    }

    /// True when neither a default nor any per-entity exception is set —
    /// lets the auditor skip a rule entirely without enumerating entities.
    pub fn disabled_everywhere(&self) -> bool {
        self.default.is_none() && self.exceptions.is_empty()
    }
}

/// Parses one of the four admissible shapes for a scalar-limit rule.
///
/// `default_key` names the object-shape field carrying the base limit
/// (e.g. `"max_hours"`); `exceptions_key` names the exception list
/// (e.g. `"teacher_exceptions"`); `exception_id_key` and
/// `exception_value_key` name the id/value fields within each exception
/// entry.
pub fn parse_limit_field(
    raw: &serde_json::Value,
    default_key: &str,
    exceptions_key: &str,
    exception_id_key: &str,
    exception_value_key: &str,
) -> LimitRule {
    match raw {
        serde_json::Value::Null => LimitRule::disabled(),
        serde_json::Value::Bool(_) => LimitRule::disabled(),
        serde_json::Value::Number(n) => LimitRule {
            default: n.as_f64(),
            exceptions: HashMap::new(),
        },
        serde_json::Value::String(s) => LimitRule {
            default: s.trim().parse::<f64>().ok(),
            exceptions: HashMap::new(),
        },
        serde_json::Value::Object(map) => {
            let default = map.get(default_key).and_then(|v| v.as_f64());
            let exceptions = map
                .get(exceptions_key)
                .and_then(|v| v.as_array())
                .map(|arr| {
                    arr.iter()
                        .filter_map(|entry| {
                            let id = entry.get(exception_id_key)?.as_str()?.to_string();
                            let value = entry.get(exception_value_key)?.as_f64()?;
                            Some((id, value))
                        })
                        .collect()
                })
                .unwrap_or_default();
            LimitRule { default, exceptions }
        }
        serde_json::Value::Array(_) => LimitRule::disabled(),
    }
}

// ============================================================================
// List-shaped rules
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestedWindowDto {
    pub day: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CourseRequestedTimeSlotsDto {
    pub course_id: String,
    pub slots: Vec<RequestedWindowDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeacherRequestedWindowsDto {
    pub teacher_id: String,
    pub windows: Vec<RequestedWindowDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HallRequestedWindowsDto {
    pub hall_id: String,
    pub windows: Vec<RequestedWindowDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestedAssignmentDto {
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
    #[serde(default)]
    pub hall: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestedFreePeriodDto {
    pub day: String,
    pub start: String,
    pub end: String,
}

// ============================================================================
// Wire shape (§6 request body: `soft_constrains`)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SoftConstraintsDto {
    #[serde(default)]
    pub teacher_max_daily_hours: serde_json::Value,
    #[serde(default)]
    pub teacher_max_weekly_hours: serde_json::Value,
    #[serde(default)]
    pub schedule_max_periods_per_day: serde_json::Value,
    #[serde(default)]
    pub schedule_max_free_periods_per_day: serde_json::Value,
    #[serde(default)]
    pub course_max_daily_frequency: serde_json::Value,
    #[serde(default)]
    pub course_requested_time_slots: Vec<CourseRequestedTimeSlotsDto>,
    #[serde(default)]
    pub teacher_requested_time_windows: Vec<TeacherRequestedWindowsDto>,
    #[serde(default)]
    pub hall_requested_time_windows: Vec<HallRequestedWindowsDto>,
    #[serde(default)]
    pub requested_assignments: Vec<RequestedAssignmentDto>,
    #[serde(default)]
    pub requested_free_periods: Vec<RequestedFreePeriodDto>,
}

/// The fully normalized soft-constraint configuration the auditor consumes.
#[derive(Debug, Clone)]
pub struct SoftConstraints {
    pub teacher_max_daily_hours: LimitRule,
    pub teacher_max_weekly_hours: LimitRule,
    pub schedule_max_periods_per_day: LimitRule,
    pub schedule_max_free_periods_per_day: LimitRule,
    pub course_max_daily_frequency: LimitRule,
    pub course_requested_time_slots: Vec<CourseRequestedTimeSlotsDto>,
    pub teacher_requested_time_windows: Vec<TeacherRequestedWindowsDto>,
    pub hall_requested_time_windows: Vec<HallRequestedWindowsDto>,
    pub requested_assignments: Vec<RequestedAssignmentDto>,
    pub requested_free_periods: Vec<RequestedFreePeriodDto>,
}

impl From<SoftConstraintsDto> for SoftConstraints {
    fn from(dto: SoftConstraintsDto) -> Self {
        Self {
            teacher_max_daily_hours: parse_limit_field(
                &dto.teacher_max_daily_hours,
                "max_hours",
                "teacher_exceptions",
                "teacher_id",
                "max_hours",
            ),
            teacher_max_weekly_hours: parse_limit_field(
                &dto.teacher_max_weekly_hours,
                "max_hours",
                "teacher_exceptions",
                "teacher_id",
                "max_hours",
            ),
            schedule_max_periods_per_day: parse_limit_field(
                &dto.schedule_max_periods_per_day,
                "max_periods",
                "day_exceptions",
                "day",
                "max_periods",
            ),
            schedule_max_free_periods_per_day: parse_limit_field(
                &dto.schedule_max_free_periods_per_day,
                "max_periods",
                "day_exceptions",
                "day",
                "max_periods",
            ),
            course_max_daily_frequency: parse_limit_field(
                &dto.course_max_daily_frequency,
                "max_frequency",
                "course_exceptions",
                "course_id",
                "max_frequency",
            ),
            course_requested_time_slots: dto.course_requested_time_slots,
            teacher_requested_time_windows: dto.teacher_requested_time_windows,
            hall_requested_time_windows: dto.hall_requested_time_windows,
            requested_assignments: dto.requested_assignments,
            requested_free_periods: dto.requested_free_periods,
        }
    }
}
