//! Top-level solve pipeline (§2 Flow, §4.4 required-joint-period pinning,
//! §7 error taxonomy): `Validate → BuildGrid → PrefilterCells →
//! ResolveRequiredPins → Solve → ExtractAssignment → AuditSoftConstraints →
//! ComposeResponse`.

use std::time::{Duration, Instant};

use crate::diagnostics::{compose_summary, map_status};
use crate::extraction::extract_timetable;
use crate::grid::{build_grid, Grid};
use crate::model::{
    Blocker, Conflict, ConstraintFailed, ConstraintFailure, Diagnostics, Entity, Metadata, Status,
    TimetableRequest, TimetableResponse,
};
use crate::prefilter::build_prefilter;
use crate::solver::{backtrack, Pin, SolverConfig, SolverOutcome};
use crate::validation::{validate, ValidationError};

pub struct SolveOptions {
    pub respect_preferences: bool,
    pub time_limit: Duration,
    pub random_seed: u64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            respect_preferences: false,
            time_limit: Duration::from_secs(30),
            random_seed: 42,
        }
    }
}

pub fn solve_timetable(request: &TimetableRequest, options: &SolveOptions) -> TimetableResponse {
    let started = Instant::now();

    let validated = match validate(request) {
        Ok(v) => v,
        Err(errors) => {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            let hard = vec![ConstraintFailure {
                constraint_failed: ConstraintFailed::with_details(
                    "request_validation",
                    serde_json::Map::from_iter([(
                        "errors".to_string(),
                        serde_json::json!(messages),
                    )]),
                ),
                blockers: errors.iter().map(validation_error_blocker).collect(),
                suggestions: vec![],
            }];
            return compose_error_response(hard, started);
        }
    };

    let grid = build_grid(
        &validated.operational_period,
        &validated.period_policy,
        &validated.break_policy,
    );

    let prefilter = build_prefilter(
        &validated.courses,
        &validated.halls,
        &grid,
        &validated.teacher_busy,
        &validated.hall_busy,
        &validated.teacher_preferences,
        options.respect_preferences,
    );

    let (pins, pin_failures) = resolve_required_pins(&validated, &grid, &prefilter);
    if !pin_failures.is_empty() {
        let mut details = serde_json::Map::new();
        if let Some(first) = pin_failures.first() {
            if let Some(entity) = &first.entity {
                details.insert("course_id".to_string(), serde_json::json!(entity.id));
            }
            if let Some(conflict) = &first.conflict {
                for (k, v) in &conflict.fields {
                    details.insert(k.clone(), v.clone());
                }
            }
        }
        let hard = vec![ConstraintFailure {
            constraint_failed: ConstraintFailed::with_details(
                "REQUIRED_JOINT_COURSE_PERIODS",
                details,
            ),
            blockers: pin_failures,
            suggestions: vec![],
        }];
        return compose_error_response(hard, started);
    }

    let solver_config = SolverConfig {
        num_search_workers: 1,
        random_seed: options.random_seed,
        time_limit: options.time_limit,
        ..SolverConfig::default()
    };

    let outcome = backtrack::solve(
        &validated.courses,
        &prefilter,
        &pins,
        &solver_config,
        &grid,
        &validated.teacher_preferences,
    );

    let placements = match outcome {
        SolverOutcome::Optimal(placements) => placements,
        SolverOutcome::Infeasible => {
            let hard = vec![ConstraintFailure {
                constraint_failed: ConstraintFailed::with_details(
                    "INFEASIBLE_SCHEDULE",
                    serde_json::Map::from_iter([(
                        "errors".to_string(),
                        serde_json::json!(Vec::<String>::new()),
                    )]),
                ),
                blockers: vec![Blocker {
                    blocker_type: "INFEASIBLE_SCHEDULE".to_string(),
                    entity: None,
                    conflict: None,
                    evidence: None,
                }],
                suggestions: vec![],
            }];
            return compose_error_response(hard, started);
        }
        SolverOutcome::Timeout => {
            let reason = "timed out before a solution was found";
            let hard = vec![ConstraintFailure {
                constraint_failed: ConstraintFailed::with_details(
                    "SOLVER_ERROR",
                    serde_json::Map::from_iter([(
                        "message".to_string(),
                        serde_json::json!(reason),
                    )]),
                ),
                blockers: vec![Blocker {
                    blocker_type: "SOLVER_ERROR".to_string(),
                    entity: None,
                    conflict: Some(Conflict {
                        fields: serde_json::Map::from_iter([(
                            "reason".to_string(),
                            serde_json::json!(reason),
                        )]),
                    }),
                    evidence: None,
                }],
                suggestions: vec![],
            }];
            return compose_error_response(hard, started);
        }
    };

    let timetable = extract_timetable(
        &placements,
        &validated.courses,
        &validated.teachers,
        &validated.halls,
        &grid,
    );

    let soft_failures = crate::diagnostics::audit_soft_constraints(
        &placements,
        &validated.courses,
        &validated.teachers,
        &validated.halls,
        &grid,
        &validated.soft_constraints,
    );

    let status = map_status(0, soft_failures.len());
    let summary = compose_summary(0, soft_failures.len());

    TimetableResponse {
        status,
        timetable,
        diagnostics: Diagnostics {
            constraints: crate::model::Constraints {
                hard: vec![],
                soft: soft_failures,
            },
            summary,
        },
        metadata: Metadata {
            solve_time_seconds: started.elapsed().as_secs_f64(),
        },
    }
}

/// Resolves each required-joint-period pin to a concrete `(course, day,
/// slot, hall)` cell, collecting every failure before returning (§4.4,
/// §7 "Required-pin failure").
fn resolve_required_pins(
    validated: &crate::validation::ValidatedInput,
    grid: &Grid,
    prefilter: &crate::prefilter::Prefilter,
) -> (Vec<Pin>, Vec<Blocker>) {
    let mut pins = Vec::new();
    let mut failures = Vec::new();

    for entry in &validated.required_joint_periods {
        let course_idx = validated
            .courses
            .iter()
            .position(|c| c.course_id == entry.course_id && c.teacher_id == entry.teacher_id);

        let Some(course_idx) = course_idx else {
            failures.push(Blocker {
                blocker_type: "TEACHER_COURSE_MISMATCH".to_string(),
                entity: Some(Entity {
                    entity_type: "required_joint_course_period".to_string(),
                    id: entry.course_id.clone(),
                    name: None,
                }),
                conflict: Some(Conflict {
                    fields: serde_json::Map::from_iter([(
                        "teacher_id".to_string(),
                        serde_json::json!(entry.teacher_id),
                    )]),
                }),
                evidence: None,
            });
            continue;
        };

        for period in &entry.periods {
            let Some(day) = crate::model::Weekday::parse(&period.day) else {
                failures.push(slot_not_found_blocker(entry, period));
                continue;
            };
            let Ok(wanted) = crate::time::Interval::parse(&period.start_time, &period.end_time) else {
                failures.push(slot_not_found_blocker(entry, period));
                continue;
            };

            let day_grid = grid.day(day);
            let slot_idx = day_grid.and_then(|dg| dg.slots.iter().position(|s| *s == wanted));

            let Some(slot_idx) = slot_idx else {
                failures.push(slot_not_found_blocker(entry, period));
                continue;
            };

            let hall_idx = prefilter
                .for_course(course_idx)
                .iter()
                .find(|c| c.day == day && c.slot == slot_idx)
                .map(|c| c.hall_idx);

            match hall_idx {
                Some(hall_idx) => pins.push(Pin {
                    course_idx,
                    day,
                    slot: slot_idx,
                    hall_idx,
                }),
                None => failures.push(Blocker {
                    blocker_type: "HALL_UNAVAILABLE".to_string(),
                    entity: Some(Entity {
                        entity_type: "required_joint_course_period".to_string(),
                        id: entry.course_id.clone(),
                        name: None,
                    }),
                    conflict: Some(Conflict {
                        fields: serde_json::Map::from_iter([
                            ("day".to_string(), serde_json::json!(period.day)),
                            ("start_time".to_string(), serde_json::json!(period.start_time)),
                            ("end_time".to_string(), serde_json::json!(period.end_time)),
                        ]),
                    }),
                    evidence: None,
                }),
            }
        }
    }

    (pins, failures)
}

fn slot_not_found_blocker(
    entry: &crate::model::RequiredJointCoursePeriodDto,
    period: &crate::model::RequiredPeriodDto,
) -> Blocker {
    Blocker {
        blocker_type: "SLOT_NOT_FOUND".to_string(),
        entity: Some(Entity {
            entity_type: "required_joint_course_period".to_string(),
            id: entry.course_id.clone(),
            name: None,
        }),
        conflict: Some(Conflict {
            fields: serde_json::Map::from_iter([
                ("day".to_string(), serde_json::json!(period.day)),
                ("start_time".to_string(), serde_json::json!(period.start_time)),
                ("end_time".to_string(), serde_json::json!(period.end_time)),
            ]),
        }),
        evidence: None,
    }
}

fn validation_error_blocker(error: &ValidationError) -> Blocker {
    Blocker {
        blocker_type: "VALIDATION_ERROR".to_string(),
        entity: None,
        conflict: Some(Conflict {
            fields: serde_json::Map::from_iter([(
                "message".to_string(),
                serde_json::json!(error.to_string()),
            )]),
        }),
        evidence: None,
    }
}

fn compose_error_response(hard: Vec<ConstraintFailure>, started: Instant) -> TimetableResponse {
    let summary = compose_summary(hard.len(), 0);
    TimetableResponse {
        status: Status::Error,
        timetable: vec![],
        diagnostics: Diagnostics {
            constraints: crate::model::Constraints { hard, soft: vec![] },
            summary,
        },
        metadata: Metadata {
            solve_time_seconds: started.elapsed().as_secs_f64(),
        },
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod orchestrator_test;
