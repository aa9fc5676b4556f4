//! Soft-constraint auditor (§4.8): post-solve verification of every soft
//! rule against the solver's placements.
//!
//! `schedule_max_periods_per_day`, `schedule_max_free_periods_per_day`, and
//! `course_max_daily_frequency` stop at the first offending entity, matching
//! the source's own behaviour. Every other rule audits every listed entity
//! rather than just the first — the source only ever inspected list index
//! `0` for `course_requested_time_slots` / `teacher_requested_time_windows`
//! / `hall_requested_time_windows`, which silently ignored every other
//! entry; that omission is not carried forward here.

use std::collections::HashMap;

use crate::grid::Grid;
use crate::model::{
    Blocker, Conflict, ConstraintFailed, ConstraintFailure, Course, Entity, Evidence, Hall,
    Suggestion, Teacher, Weekday,
};
use crate::soft_constraints::SoftConstraints;
use crate::solver::PlacedSession;
use crate::time::Interval;

struct Resolved<'a> {
    day: Weekday,
    interval: Interval,
    course: &'a Course,
    hall: &'a Hall,
}

fn resolve<'a>(
    placements: &[PlacedSession],
    courses: &'a [Course],
    halls: &'a [Hall],
    grid: &Grid,
) -> Vec<Resolved<'a>> {
    placements
        .iter()
        .filter_map(|p| {
            let interval = *grid.day(p.day)?.slots.get(p.slot)?;
            Some(Resolved {
                day: p.day,
                interval,
                course: &courses[p.course_idx],
                hall: &halls[p.hall_idx],
            })
        })
        .collect()
}

fn evidence_slot(r: &Resolved) -> serde_json::Value {
    serde_json::json!({
        "day": r.day.display_name(),
        "start_time": r.interval.start.to_hh_mm(),
        "end_time": r.interval.end.to_hh_mm(),
        "course_id": r.course.course_id,
        "hall_id": r.hall.hall_id,
    })
}

fn evidence_of(slots: Vec<serde_json::Value>) -> Evidence {
    let mut fields = serde_json::Map::new();
    fields.insert("slots".to_string(), serde_json::Value::Array(slots));
    Evidence { fields }
}

fn conflict_of(pairs: &[(&str, serde_json::Value)]) -> Conflict {
    let mut fields = serde_json::Map::new();
    for (k, v) in pairs {
        fields.insert((*k).to_string(), v.clone());
    }
    Conflict { fields }
}

/// Builds the `constraint_failed.details` object (§6) from `(key, value)`
/// pairs, dropping any pair whose value is `null` so an absent default
/// limit doesn't surface as a spurious field.
fn details_of(pairs: &[(&str, serde_json::Value)]) -> serde_json::Map<String, serde_json::Value> {
    let mut fields = serde_json::Map::new();
    for (k, v) in pairs {
        if !v.is_null() {
            fields.insert((*k).to_string(), v.clone());
        }
    }
    fields
}

pub fn audit_soft_constraints(
    placements: &[PlacedSession],
    courses: &[Course],
    teachers: &[Teacher],
    halls: &[Hall],
    grid: &Grid,
    soft: &SoftConstraints,
) -> Vec<ConstraintFailure> {
    let resolved = resolve(placements, courses, halls, grid);
    let mut failures = Vec::new();

    audit_teacher_max_daily_hours(&resolved, teachers, soft, &mut failures);
    audit_teacher_max_weekly_hours(&resolved, teachers, soft, &mut failures);
    audit_schedule_max_periods_per_day(&resolved, grid, soft, &mut failures);
    audit_schedule_max_free_periods_per_day(&resolved, grid, soft, &mut failures);
    audit_course_max_daily_frequency(&resolved, courses, soft, &mut failures);
    audit_course_requested_time_slots(&resolved, soft, &mut failures);
    audit_teacher_requested_time_windows(&resolved, soft, &mut failures);
    audit_hall_requested_time_windows(&resolved, soft, &mut failures);
    audit_requested_assignments(&resolved, soft, &mut failures);
    audit_requested_free_periods(&resolved, soft, &mut failures);

    failures
}

fn audit_teacher_max_daily_hours(
    resolved: &[Resolved],
    teachers: &[Teacher],
    soft: &SoftConstraints,
    failures: &mut Vec<ConstraintFailure>,
) {
    if soft.teacher_max_daily_hours.disabled_everywhere() {
        return;
    }
    let mut by_teacher_day: HashMap<(String, Weekday), Vec<&Resolved>> = HashMap::new();
    for r in resolved {
        by_teacher_day
            .entry((r.course.teacher_id.clone(), r.day))
            .or_default()
            .push(r);
    }
    let mut blockers = Vec::new();
    let mut keys: Vec<_> = by_teacher_day.keys().cloned().collect();
    keys.sort();
    for key in keys {
        let (teacher_id, day) = key.clone();
        let Some(limit) = soft.teacher_max_daily_hours.limit_for(&teacher_id) else {
            continue;
        };
        let group = &by_teacher_day[&key];
        let actual: f64 = group.iter().map(|r| r.interval.duration_hours()).sum();
        if actual > limit {
            let name = teachers.iter().find(|t| t.teacher_id == teacher_id).map(|t| t.name.clone());
            blockers.push(Blocker {
                blocker_type: "TEACHER_MAX_DAILY_HOURS_EXCEEDED".to_string(),
                entity: Some(Entity { entity_type: "teacher".to_string(), id: teacher_id.clone(), name }),
                conflict: Some(conflict_of(&[
                    ("day", serde_json::json!(day.display_name())),
                    ("max_allowed_hours", serde_json::json!(limit)),
                    ("actual_hours", serde_json::json!(actual)),
                    ("excess_hours", serde_json::json!(actual - limit)),
                ])),
                evidence: Some(evidence_of(group.iter().map(|r| evidence_slot(r)).collect())),
            });
        }
    }
    if !blockers.is_empty() {
        failures.push(ConstraintFailure {
            constraint_failed: ConstraintFailed::with_details(
                "teacher_max_daily_hours",
                details_of(&[(
                    "max_daily_hours",
                    serde_json::json!(soft.teacher_max_daily_hours.default),
                )]),
            ),
            blockers,
            suggestions: vec![],
        });
    }
}

fn audit_teacher_max_weekly_hours(
    resolved: &[Resolved],
    teachers: &[Teacher],
    soft: &SoftConstraints,
    failures: &mut Vec<ConstraintFailure>,
) {
    if soft.teacher_max_weekly_hours.disabled_everywhere() {
        return;
    }
    let mut by_teacher: HashMap<String, Vec<&Resolved>> = HashMap::new();
    for r in resolved {
        by_teacher.entry(r.course.teacher_id.clone()).or_default().push(r);
    }
    let mut blockers = Vec::new();
    let mut teacher_ids: Vec<_> = by_teacher.keys().cloned().collect();
    teacher_ids.sort();
    for teacher_id in teacher_ids {
        let Some(limit) = soft.teacher_max_weekly_hours.limit_for(&teacher_id) else {
            continue;
        };
        let group = &by_teacher[&teacher_id];
        let actual: f64 = group.iter().map(|r| r.interval.duration_hours()).sum();
        if actual > limit {
            let name = teachers.iter().find(|t| t.teacher_id == teacher_id).map(|t| t.name.clone());
            blockers.push(Blocker {
                blocker_type: "TEACHER_MAX_WEEKLY_HOURS_EXCEEDED".to_string(),
                entity: Some(Entity { entity_type: "teacher".to_string(), id: teacher_id.clone(), name }),
                conflict: Some(conflict_of(&[
                    ("max_allowed_hours", serde_json::json!(limit)),
                    ("actual_hours", serde_json::json!(actual)),
                    ("excess_hours", serde_json::json!(actual - limit)),
                ])),
                evidence: Some(evidence_of(group.iter().map(|r| evidence_slot(r)).collect())),
            });
        }
    }
    if !blockers.is_empty() {
        failures.push(ConstraintFailure {
            constraint_failed: ConstraintFailed::with_details(
                "teacher_max_weekly_hours",
                details_of(&[(
                    "max_weekly_hours",
                    serde_json::json!(soft.teacher_max_weekly_hours.default),
                )]),
            ),
            blockers,
            suggestions: vec![],
        });
    }
}

fn audit_schedule_max_periods_per_day(
    resolved: &[Resolved],
    grid: &Grid,
    soft: &SoftConstraints,
    failures: &mut Vec<ConstraintFailure>,
) {
    if soft.schedule_max_periods_per_day.disabled_everywhere() {
        return;
    }
    for day_grid in &grid.days {
        let Some(limit) = soft.schedule_max_periods_per_day.limit_for(day_grid.day.as_str()) else {
            continue;
        };
        let group: Vec<&Resolved> = resolved.iter().filter(|r| r.day == day_grid.day).collect();
        let actual = group.len() as f64;
        if actual > limit {
            let blocker = Blocker {
                blocker_type: "MAX_PERIODS_PER_DAY_EXCEEDED".to_string(),
                entity: Some(Entity {
                    entity_type: "day".to_string(),
                    id: day_grid.day.as_str().to_string(),
                    name: Some(day_grid.day.display_name().to_string()),
                }),
                conflict: Some(conflict_of(&[
                    ("max_allowed_periods", serde_json::json!(limit)),
                    ("actual_periods", serde_json::json!(actual)),
                    ("excess_periods", serde_json::json!(actual - limit)),
                ])),
                evidence: Some(evidence_of(group.iter().map(|r| evidence_slot(r)).collect())),
            };
            failures.push(ConstraintFailure {
                constraint_failed: ConstraintFailed::with_details(
                    "schedule_max_periods_per_day",
                    details_of(&[("max_periods", serde_json::json!(limit))]),
                ),
                blockers: vec![blocker],
                suggestions: vec![Suggestion {
                    parameter: "schedule_max_periods_per_day".to_string(),
                    proposed_value: serde_json::json!(actual),
                }],
            });
            // First offender only, matching source behaviour.
            return;
        }
    }
}

fn audit_schedule_max_free_periods_per_day(
    resolved: &[Resolved],
    grid: &Grid,
    soft: &SoftConstraints,
    failures: &mut Vec<ConstraintFailure>,
) {
    if soft.schedule_max_free_periods_per_day.disabled_everywhere() {
        return;
    }
    for day_grid in &grid.days {
        let Some(limit) = soft.schedule_max_free_periods_per_day.limit_for(day_grid.day.as_str()) else {
            continue;
        };
        let teaching = resolved.iter().filter(|r| r.day == day_grid.day).count();
        let actual = (day_grid.slots.len().saturating_sub(teaching)) as f64;
        if actual > limit {
            let blocker = Blocker {
                blocker_type: "MAX_FREE_PERIODS_PER_DAY_EXCEEDED".to_string(),
                entity: Some(Entity {
                    entity_type: "day".to_string(),
                    id: day_grid.day.as_str().to_string(),
                    name: Some(day_grid.day.display_name().to_string()),
                }),
                conflict: Some(conflict_of(&[
                    ("max_allowed_free_periods", serde_json::json!(limit)),
                    ("actual_free_periods", serde_json::json!(actual)),
                    ("excess_free_periods", serde_json::json!(actual - limit)),
                ])),
                evidence: None,
            };
            failures.push(ConstraintFailure {
                constraint_failed: ConstraintFailed::with_details(
                    "schedule_max_free_periods_per_day",
                    details_of(&[("max_free_periods", serde_json::json!(limit))]),
                ),
                blockers: vec![blocker],
                suggestions: vec![],
            });
            return;
        }
    }
}

fn audit_course_max_daily_frequency(
    resolved: &[Resolved],
    courses: &[Course],
    soft: &SoftConstraints,
    failures: &mut Vec<ConstraintFailure>,
) {
    if soft.course_max_daily_frequency.disabled_everywhere() {
        return;
    }
    let mut by_course_day: HashMap<(String, Weekday), Vec<&Resolved>> = HashMap::new();
    for r in resolved {
        by_course_day.entry((r.course.course_id.clone(), r.day)).or_default().push(r);
    }
    let mut keys: Vec<_> = by_course_day.keys().cloned().collect();
    keys.sort();
    for key in keys {
        let (course_id, day) = key.clone();
        let Some(limit) = soft.course_max_daily_frequency.limit_for(&course_id) else {
            continue;
        };
        let group = &by_course_day[&key];
        let actual = group.len() as f64;
        if actual > limit {
            let name = courses.iter().find(|c| c.course_id == course_id).map(|c| c.title.clone());
            let blocker = Blocker {
                blocker_type: "MAX_COURSE_DAILY_FREQUENCY_EXCEEDED".to_string(),
                entity: Some(Entity { entity_type: "course".to_string(), id: course_id, name }),
                conflict: Some(conflict_of(&[
                    ("day", serde_json::json!(day.display_name())),
                    ("max_allowed_frequency", serde_json::json!(limit)),
                    ("actual_frequency", serde_json::json!(actual)),
                ])),
                evidence: Some(evidence_of(group.iter().map(|r| evidence_slot(r)).collect())),
            };
            failures.push(ConstraintFailure {
                constraint_failed: ConstraintFailed::with_details(
                    "course_max_daily_frequency",
                    details_of(&[("max_frequency", serde_json::json!(limit))]),
                ),
                blockers: vec![blocker],
                suggestions: vec![],
            });
            return;
        }
    }
}

fn audit_course_requested_time_slots(
    resolved: &[Resolved],
    soft: &SoftConstraints,
    failures: &mut Vec<ConstraintFailure>,
) {
    let mut blockers = Vec::new();
    let mut offending_course_ids = Vec::new();
    for entry in &soft.course_requested_time_slots {
        let windows: Vec<(Weekday, Interval)> = entry
            .slots
            .iter()
            .filter_map(|w| Some((Weekday::parse(&w.day)?, Interval::parse(&w.start, &w.end).ok()?)))
            .collect();
        let sessions: Vec<&Resolved> = resolved.iter().filter(|r| r.course.course_id == entry.course_id).collect();
        let offending: Vec<&Resolved> = sessions
            .iter()
            .copied()
            .filter(|r| !windows.iter().any(|(d, w)| *d == r.day && r.interval.contained_in(*w)))
            .collect();
        if !offending.is_empty() {
            offending_course_ids.push(entry.course_id.clone());
            blockers.push(Blocker {
                blocker_type: "COURSE_SCHEDULED_OUTSIDE_REQUESTED_SLOTS".to_string(),
                entity: Some(Entity { entity_type: "course".to_string(), id: entry.course_id.clone(), name: None }),
                conflict: Some(conflict_of(&[("offending_sessions", serde_json::json!(offending.len()))])),
                evidence: Some(evidence_of(offending.iter().map(|r| evidence_slot(r)).collect())),
            });
        }
    }
    if !blockers.is_empty() {
        failures.push(ConstraintFailure {
            constraint_failed: ConstraintFailed::with_details(
                "course_requested_time_slots",
                details_of(&[("course_ids", serde_json::json!(offending_course_ids))]),
            ),
            blockers,
            suggestions: vec![],
        });
    }
}

fn audit_teacher_requested_time_windows(
    resolved: &[Resolved],
    soft: &SoftConstraints,
    failures: &mut Vec<ConstraintFailure>,
) {
    let mut blockers = Vec::new();
    let mut offending_teacher_ids = Vec::new();
    for entry in &soft.teacher_requested_time_windows {
        let windows: Vec<(Weekday, Interval)> = entry
            .windows
            .iter()
            .filter_map(|w| Some((Weekday::parse(&w.day)?, Interval::parse(&w.start, &w.end).ok()?)))
            .collect();
        let sessions: Vec<&Resolved> =
            resolved.iter().filter(|r| r.course.teacher_id == entry.teacher_id).collect();
        let offending: Vec<&Resolved> = sessions
            .iter()
            .copied()
            .filter(|r| !windows.iter().any(|(d, w)| *d == r.day && r.interval.contained_in(*w)))
            .collect();
        if !offending.is_empty() {
            offending_teacher_ids.push(entry.teacher_id.clone());
            blockers.push(Blocker {
                blocker_type: "TEACHER_SCHEDULED_OUTSIDE_REQUESTED_WINDOWS".to_string(),
                entity: Some(Entity { entity_type: "teacher".to_string(), id: entry.teacher_id.clone(), name: None }),
                conflict: Some(conflict_of(&[("offending_sessions", serde_json::json!(offending.len()))])),
                evidence: Some(evidence_of(offending.iter().map(|r| evidence_slot(r)).collect())),
            });
        }
    }
    if !blockers.is_empty() {
        failures.push(ConstraintFailure {
            constraint_failed: ConstraintFailed::with_details(
                "teacher_requested_time_windows",
                details_of(&[("teacher_ids", serde_json::json!(offending_teacher_ids))]),
            ),
            blockers,
            suggestions: vec![],
        });
    }
}

fn audit_hall_requested_time_windows(
    resolved: &[Resolved],
    soft: &SoftConstraints,
    failures: &mut Vec<ConstraintFailure>,
) {
    let mut blockers = Vec::new();
    let mut offending_hall_ids = Vec::new();
    for entry in &soft.hall_requested_time_windows {
        let windows: Vec<(Weekday, Interval)> = entry
            .windows
            .iter()
            .filter_map(|w| Some((Weekday::parse(&w.day)?, Interval::parse(&w.start, &w.end).ok()?)))
            .collect();
        let sessions: Vec<&Resolved> = resolved.iter().filter(|r| r.hall.hall_id == entry.hall_id).collect();
        let offending: Vec<&Resolved> = sessions
            .iter()
            .copied()
            .filter(|r| !windows.iter().any(|(d, w)| *d == r.day && r.interval.contained_in(*w)))
            .collect();
        if !offending.is_empty() {
            offending_hall_ids.push(entry.hall_id.clone());
            blockers.push(Blocker {
                blocker_type: "HALL_SCHEDULED_OUTSIDE_REQUESTED_WINDOWS".to_string(),
                entity: Some(Entity { entity_type: "hall".to_string(), id: entry.hall_id.clone(), name: None }),
                conflict: Some(conflict_of(&[("offending_sessions", serde_json::json!(offending.len()))])),
                evidence: Some(evidence_of(offending.iter().map(|r| evidence_slot(r)).collect())),
            });
        }
    }
    if !blockers.is_empty() {
        failures.push(ConstraintFailure {
            constraint_failed: ConstraintFailed::with_details(
                "hall_requested_time_windows",
                details_of(&[("hall_ids", serde_json::json!(offending_hall_ids))]),
            ),
            blockers,
            suggestions: vec![],
        });
    }
}

fn audit_requested_assignments(
    resolved: &[Resolved],
    soft: &SoftConstraints,
    failures: &mut Vec<ConstraintFailure>,
) {
    let mut blockers = Vec::new();
    let mut first_unsatisfied = None;
    for (idx, entry) in soft.requested_assignments.iter().enumerate() {
        let day = entry.day.as_deref().and_then(Weekday::parse);
        let interval = match (&entry.start, &entry.end) {
            (Some(s), Some(e)) => Interval::parse(s, e).ok(),
            _ => None,
        };
        let satisfied = resolved.iter().any(|r| {
            entry.course.as_deref().map_or(true, |c| c == r.course.course_id)
                && entry.teacher.as_deref().map_or(true, |t| t == r.course.teacher_id)
                && entry.hall.as_deref().map_or(true, |h| h == r.hall.hall_id)
                && day.map_or(true, |d| d == r.day)
                && interval.map_or(true, |iv| r.interval == iv)
        });
        if !satisfied {
            if first_unsatisfied.is_none() {
                first_unsatisfied = Some(entry);
            }
            blockers.push(Blocker {
                blocker_type: "REQUESTED_ASSIGNMENT_NOT_SATISFIED".to_string(),
                entity: Some(Entity {
                    entity_type: "requested_assignment".to_string(),
                    id: idx.to_string(),
                    name: None,
                }),
                conflict: Some(conflict_of(&[
                    ("course", serde_json::json!(entry.course)),
                    ("teacher", serde_json::json!(entry.teacher)),
                    ("hall", serde_json::json!(entry.hall)),
                ])),
                evidence: None,
            });
        }
    }
    if !blockers.is_empty() {
        let entry = first_unsatisfied.expect("blockers non-empty implies at least one unsatisfied entry");
        failures.push(ConstraintFailure {
            constraint_failed: ConstraintFailed::with_details(
                "requested_assignments",
                details_of(&[
                    ("course_id", serde_json::json!(entry.course)),
                    ("teacher_id", serde_json::json!(entry.teacher)),
                    ("hall_id", serde_json::json!(entry.hall)),
                    ("day", serde_json::json!(entry.day)),
                    ("start_time", serde_json::json!(entry.start)),
                    ("end_time", serde_json::json!(entry.end)),
                ]),
            ),
            blockers,
            suggestions: vec![],
        });
    }
}

fn audit_requested_free_periods(
    resolved: &[Resolved],
    soft: &SoftConstraints,
    failures: &mut Vec<ConstraintFailure>,
) {
    let mut blockers = Vec::new();
    let mut first_occupied = None;
    for entry in &soft.requested_free_periods {
        let (Some(day), Ok(window)) = (Weekday::parse(&entry.day), Interval::parse(&entry.start, &entry.end)) else {
            continue;
        };
        let occupying: Vec<&Resolved> = resolved
            .iter()
            .filter(|r| r.day == day && r.interval.overlaps(window))
            .collect();
        if !occupying.is_empty() {
            if first_occupied.is_none() {
                first_occupied = Some(entry);
            }
            blockers.push(Blocker {
                blocker_type: "REQUESTED_FREE_PERIOD_OCCUPIED".to_string(),
                entity: Some(Entity {
                    entity_type: "day".to_string(),
                    id: day.as_str().to_string(),
                    name: Some(day.display_name().to_string()),
                }),
                conflict: Some(conflict_of(&[
                    ("requested_start", serde_json::json!(entry.start)),
                    ("requested_end", serde_json::json!(entry.end)),
                ])),
                evidence: Some(evidence_of(occupying.iter().map(|r| evidence_slot(r)).collect())),
            });
        }
    }
    if !blockers.is_empty() {
        let entry = first_occupied.expect("blockers non-empty implies at least one occupied period");
        failures.push(ConstraintFailure {
            constraint_failed: ConstraintFailed::with_details(
                "requested_free_periods",
                details_of(&[
                    ("day", serde_json::json!(entry.day)),
                    ("start_time", serde_json::json!(entry.start)),
                    ("end_time", serde_json::json!(entry.end)),
                ]),
            ),
            blockers,
            suggestions: vec![],
        });
    }
}

#[cfg(test)]
#[path = "auditor_test.rs"]
mod auditor_test;
