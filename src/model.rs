//! Domain entities and the request/response wire contracts (§3, §6).
//!
//! Two layers live here: the `*Dto` structs mirror the JSON shape clients
//! send and receive verbatim (field names, including the upstream's own
//! `prefered` / `constrains` spellings, are part of the external contract
//! and are not "fixed"); the plain structs below them (`Teacher`, `Course`,
//! ...) are the validated, typed domain model every other module builds on.
//! `validation.rs` is the only place that converts one into the other.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::Interval;

// ============================================================================
// Weekday
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn parse(s: &str) -> Option<Weekday> {
        match s.to_ascii_lowercase().as_str() {
            "monday" => Some(Weekday::Monday),
            "tuesday" => Some(Weekday::Tuesday),
            "wednesday" => Some(Weekday::Wednesday),
            "thursday" => Some(Weekday::Thursday),
            "friday" => Some(Weekday::Friday),
            "saturday" => Some(Weekday::Saturday),
            "sunday" => Some(Weekday::Sunday),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    /// Title-cased form used in the rendered timetable (`"Monday"`, ...).
    pub fn display_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Domain entities (§3)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub teacher_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseType {
    Theory,
    Practical,
}

impl CourseType {
    pub fn parse(s: &str) -> Option<CourseType> {
        match s.to_ascii_lowercase().as_str() {
            "theory" => Some(CourseType::Theory),
            "practical" => Some(CourseType::Practical),
            _ => None,
        }
    }

    pub fn matching_hall_type(self) -> HallType {
        match self {
            CourseType::Theory => HallType::Lecture,
            CourseType::Practical => HallType::Lab,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub course_id: String,
    pub title: String,
    pub credit: u32,
    pub course_type: CourseType,
    /// Retained from the request for display purposes; does not itself
    /// drive the session count (see GLOSSARY / §9 open question).
    pub hours: u32,
    pub teacher_id: String,
}

impl Course {
    /// `sessions_required = max(1, credit)` (§4.3 / §9 open question: the
    /// relationship between `credit` and `hours` is left unresolved by the
    /// source; this implementation follows the documented heuristic).
    pub fn sessions_required(&self) -> u32 {
        self.credit.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HallType {
    Lecture,
    Lab,
}

impl HallType {
    pub fn parse(s: &str) -> Option<HallType> {
        match s.to_ascii_lowercase().as_str() {
            "lecture" => Some(HallType::Lecture),
            "lab" => Some(HallType::Lab),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hall {
    pub hall_id: String,
    pub name: String,
    pub capacity: u32,
    pub hall_type: HallType,
}

/// A busy window for a teacher or a hall. `day: None` (halls only) applies
/// to every active day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyWindow {
    pub day: Option<Weekday>,
    pub interval: Interval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayOverride {
    pub day: Weekday,
    pub interval: Interval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationalPeriod {
    pub default: Interval,
    pub active_days: Vec<Weekday>,
    pub day_exceptions: Vec<DayOverride>,
}

impl OperationalPeriod {
    /// Resolves the operational window for `day` (per-day override, else
    /// default). Caller is responsible for checking `day` is active.
    pub fn window_for(&self, day: Weekday) -> Interval {
        self.day_exceptions
            .iter()
            .find(|o| o.day == day)
            .map(|o| o.interval)
            .unwrap_or(self.default)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakPolicy {
    pub default: Option<Interval>,
    pub daily: bool,
    pub no_break_days: Vec<Weekday>,
    pub fixed_break_days: Vec<DayOverride>,
}

impl BreakPolicy {
    /// Resolves the effective break window for `day`, per §4.5's ordering:
    /// no-break override, then fixed-break override, then the default
    /// (when active), else none.
    pub fn effective_window_for(&self, day: Weekday) -> Option<Interval> {
        if self.no_break_days.contains(&day) {
            return None;
        }
        if let Some(o) = self.fixed_break_days.iter().find(|o| o.day == day) {
            return Some(o.interval);
        }
        if self.daily {
            return self.default;
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayDurationOverride {
    pub day: Weekday,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodPolicy {
    pub default_minutes: u32,
    pub day_exceptions: Vec<DayDurationOverride>,
}

impl Default for PeriodPolicy {
    fn default() -> Self {
        Self {
            default_minutes: 30,
            day_exceptions: Vec::new(),
        }
    }
}

impl PeriodPolicy {
    pub fn duration_for(&self, day: Weekday) -> u32 {
        self.day_exceptions
            .iter()
            .find(|o| o.day == day)
            .map(|o| o.minutes)
            .unwrap_or(self.default_minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredPeriod {
    pub day: Weekday,
    pub interval: Interval,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredJointPeriod {
    pub course_id: String,
    pub teacher_id: String,
    pub periods: Vec<RequiredPeriod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeacherPreferred {
    pub day: Weekday,
    pub interval: Interval,
}

// ============================================================================
// Wire DTOs (request body, §6)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeacherDto {
    pub teacher_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CourseDto {
    pub course_id: String,
    pub course_title: String,
    pub course_credit: u32,
    pub course_type: String,
    #[serde(default)]
    pub course_hours: u32,
    pub teacher_id: String,
    #[serde(default)]
    pub teacher_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HallDto {
    pub hall_id: String,
    pub hall_name: String,
    #[serde(default)]
    pub hall_capacity: u32,
    pub hall_type: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeacherBusyPeriodDto {
    pub teacher_id: String,
    #[serde(default)]
    pub teacher_name: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeacherPreferredPeriodDto {
    pub teacher_id: String,
    #[serde(default)]
    pub teacher_name: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HallBusyPeriodDto {
    pub hall_id: String,
    #[serde(default)]
    pub hall_name: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub day: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DayWindowExceptionDto {
    pub day: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BreakPeriodDto {
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_true")]
    pub daily: bool,
    #[serde(default)]
    pub no_break_exceptions: Vec<String>,
    #[serde(default)]
    pub day_exceptions: Vec<DayWindowExceptionDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OperationalPeriodDto {
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_true")]
    pub daily: bool,
    pub days: Vec<String>,
    #[serde(default)]
    pub day_exceptions: Vec<DayWindowExceptionDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DayDurationExceptionDto {
    pub day: String,
    pub minutes: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PeriodsDto {
    #[serde(default = "default_true")]
    pub daily: bool,
    pub duration_minutes: u32,
    #[serde(default)]
    pub day_exceptions: Vec<DayDurationExceptionDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequiredPeriodDto {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequiredJointCoursePeriodDto {
    pub course_id: String,
    pub teacher_id: String,
    pub periods: Vec<RequiredPeriodDto>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimetableRequest {
    pub teachers: Vec<TeacherDto>,
    pub teacher_courses: Vec<CourseDto>,
    pub halls: Vec<HallDto>,
    #[serde(default)]
    pub teacher_busy_period: Vec<TeacherBusyPeriodDto>,
    #[serde(default)]
    pub teacher_prefered_teaching_period: Vec<TeacherPreferredPeriodDto>,
    #[serde(default)]
    pub hall_busy_periods: Vec<HallBusyPeriodDto>,
    pub break_period: BreakPeriodDto,
    pub operational_period: OperationalPeriodDto,
    #[serde(default)]
    pub periods: Option<PeriodsDto>,
    #[serde(default)]
    pub soft_constrains: crate::soft_constraints::SoftConstraintsDto,
    #[serde(default)]
    pub required_joint_course_periods: Vec<RequiredJointCoursePeriodDto>,
}

// ============================================================================
// Response DTOs (§6)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OPTIMAL")]
    Optimal,
    #[serde(rename = "PARTIAL")]
    Partial,
    #[serde(rename = "ERROR")]
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "break")]
    pub is_break: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hall_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayTimetable {
    pub day: String,
    pub slots: Vec<ScheduleSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Conflict {
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Evidence {
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Suggestion {
    pub parameter: String,
    pub proposed_value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blocker {
    #[serde(rename = "type")]
    pub blocker_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<Entity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<Conflict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Evidence>,
}

/// The `constraint_failed` object (§6): a stable rule identifier plus the
/// per-rule identifying details (course/teacher/hall ids, limits, …) a
/// client reads off `constraint_failed.type` / `constraint_failed.details`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConstraintFailed {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl ConstraintFailed {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            details: serde_json::Map::new(),
        }
    }

    pub fn with_details(
        kind: impl Into<String>,
        details: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            kind: kind.into(),
            details,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintFailure {
    pub constraint_failed: ConstraintFailed,
    pub blockers: Vec<Blocker>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Constraints {
    pub hard: Vec<ConstraintFailure>,
    pub soft: Vec<ConstraintFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub message: String,
    pub hard_constraints_met: bool,
    pub soft_constraints_met: bool,
    pub failed_hard_constraints_count: usize,
    pub failed_soft_constraints_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostics {
    pub constraints: Constraints,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub solve_time_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableResponse {
    pub status: Status,
    pub timetable: Vec<DayTimetable>,
    pub diagnostics: Diagnostics,
    pub metadata: Metadata,
}
