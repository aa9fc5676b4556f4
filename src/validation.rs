//! Stateless request validation (§4.1).
//!
//! Every check below appends to a shared error list rather than returning on
//! the first failure — the core must report every malformed field in one
//! response, not just the first one it happens to trip over. If the list is
//! non-empty, the caller emits an ERROR response with one hard diagnostic
//! per error and skips solving entirely.

use thiserror::Error;

use crate::model::*;
use crate::soft_constraints::SoftConstraints;
use crate::time::Interval;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("teachers must not be empty")]
    NoTeachers,
    #[error("teacher_courses must not be empty")]
    NoCourses,
    #[error("halls must not be empty")]
    NoHalls,
    #[error("course {course_id:?} references unknown teacher {teacher_id:?}")]
    UnknownCourseTeacher { course_id: String, teacher_id: String },
    #[error("course {course_id:?} has invalid course_type {course_type:?}")]
    InvalidCourseType { course_id: String, course_type: String },
    #[error("hall {hall_id:?} has invalid hall_type {hall_type:?}")]
    InvalidHallType { hall_id: String, hall_type: String },
    #[error("malformed time {value:?} in {context}")]
    MalformedTime { context: String, value: String },
    #[error("interval start must be before end in {context} ({start:?}..{end:?})")]
    StartNotBeforeEnd {
        context: String,
        start: String,
        end: String,
    },
    #[error("unrecognised day {value:?} in {context}")]
    InvalidDay { context: String, value: String },
    #[error("period duration must be greater than zero, got {minutes}")]
    NonPositiveDuration { minutes: i64 },
}

pub struct ValidatedInput {
    pub teachers: Vec<Teacher>,
    pub courses: Vec<Course>,
    pub halls: Vec<Hall>,
    pub teacher_busy: Vec<(String, BusyWindow)>,
    pub hall_busy: Vec<(String, BusyWindow)>,
    pub teacher_preferences: Vec<(String, TeacherPreferred)>,
    pub operational_period: OperationalPeriod,
    pub break_policy: BreakPolicy,
    pub period_policy: PeriodPolicy,
    pub required_joint_periods: Vec<RequiredJointCoursePeriodDto>,
    pub soft_constraints: SoftConstraints,
}

/// Validates and converts a raw request into the typed domain model.
/// Collects every violation before returning; never short-circuits.
pub fn validate(request: &TimetableRequest) -> Result<ValidatedInput, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if request.teachers.is_empty() {
        errors.push(ValidationError::NoTeachers);
    }
    if request.teacher_courses.is_empty() {
        errors.push(ValidationError::NoCourses);
    }
    if request.halls.is_empty() {
        errors.push(ValidationError::NoHalls);
    }

    let teachers: Vec<Teacher> = request
        .teachers
        .iter()
        .map(|t| Teacher {
            teacher_id: t.teacher_id.clone(),
            name: t.name.clone(),
        })
        .collect();
    let known_teacher_ids: std::collections::HashSet<&str> =
        teachers.iter().map(|t| t.teacher_id.as_str()).collect();

    let courses: Vec<Course> = request
        .teacher_courses
        .iter()
        .filter_map(|c| {
            let course_type = match CourseType::parse(&c.course_type) {
                Some(t) => t,
                None => {
                    errors.push(ValidationError::InvalidCourseType {
                        course_id: c.course_id.clone(),
                        course_type: c.course_type.clone(),
                    });
                    return None;
                }
            };
            if !known_teacher_ids.contains(c.teacher_id.as_str()) {
                errors.push(ValidationError::UnknownCourseTeacher {
                    course_id: c.course_id.clone(),
                    teacher_id: c.teacher_id.clone(),
                });
            }
            Some(Course {
                course_id: c.course_id.clone(),
                title: c.course_title.clone(),
                credit: c.course_credit,
                course_type,
                hours: c.course_hours,
                teacher_id: c.teacher_id.clone(),
            })
        })
        .collect();

    let halls: Vec<Hall> = request
        .halls
        .iter()
        .filter_map(|h| {
            let hall_type = match HallType::parse(&h.hall_type) {
                Some(t) => t,
                None => {
                    errors.push(ValidationError::InvalidHallType {
                        hall_id: h.hall_id.clone(),
                        hall_type: h.hall_type.clone(),
                    });
                    return None;
                }
            };
            Some(Hall {
                hall_id: h.hall_id.clone(),
                name: h.hall_name.clone(),
                capacity: h.hall_capacity,
                hall_type,
            })
        })
        .collect();

    let teacher_busy = request
        .teacher_busy_period
        .iter()
        .filter_map(|b| {
            let day = parse_day(&b.day, "teacher_busy_period.day", &mut errors)?;
            let interval = parse_interval(
                &b.start_time,
                &b.end_time,
                "teacher_busy_period",
                &mut errors,
            )?;
            Some((
                b.teacher_id.clone(),
                BusyWindow {
                    day: Some(day),
                    interval,
                },
            ))
        })
        .collect();

    let teacher_preferences = request
        .teacher_prefered_teaching_period
        .iter()
        .filter_map(|p| {
            let day = parse_day(
                &p.day,
                "teacher_prefered_teaching_period.day",
                &mut errors,
            )?;
            let interval = parse_interval(
                &p.start_time,
                &p.end_time,
                "teacher_prefered_teaching_period",
                &mut errors,
            )?;
            Some((p.teacher_id.clone(), TeacherPreferred { day, interval }))
        })
        .collect();

    let hall_busy = request
        .hall_busy_periods
        .iter()
        .filter_map(|b| {
            let day = match &b.day {
                Some(d) => Some(parse_day(d, "hall_busy_periods.day", &mut errors)?),
                None => None,
            };
            let interval = parse_interval(
                &b.start_time,
                &b.end_time,
                "hall_busy_periods",
                &mut errors,
            )?;
            Some((b.hall_id.clone(), BusyWindow { day, interval }))
        })
        .collect();

    let operational_period = parse_operational_period(&request.operational_period, &mut errors);
    let break_policy = parse_break_policy(&request.break_period, &mut errors);
    let period_policy = request
        .periods
        .as_ref()
        .map(|p| parse_period_policy(p, &mut errors))
        .unwrap_or_default();

    if errors.is_empty() {
        Ok(ValidatedInput {
            teachers,
            courses,
            halls,
            teacher_busy,
            hall_busy,
            teacher_preferences,
            operational_period,
            break_policy,
            period_policy,
            required_joint_periods: request.required_joint_course_periods.clone(),
            soft_constraints: request.soft_constrains.clone().into(),
        })
    } else {
        Err(errors)
    }
}

fn parse_day(value: &str, context: &str, errors: &mut Vec<ValidationError>) -> Option<Weekday> {
    match Weekday::parse(value) {
        Some(d) => Some(d),
        None => {
            errors.push(ValidationError::InvalidDay {
                context: context.to_string(),
                value: value.to_string(),
            });
            None
        }
    }
}

fn parse_interval(
    start: &str,
    end: &str,
    context: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Interval> {
    match Interval::parse(start, end) {
        Ok(i) => Some(i),
        Err(crate::time::TimeError::Malformed(value)) => {
            errors.push(ValidationError::MalformedTime {
                context: context.to_string(),
                value,
            });
            None
        }
        Err(crate::time::TimeError::NotBeforeEnd { start, end }) => {
            errors.push(ValidationError::StartNotBeforeEnd {
                context: context.to_string(),
                start,
                end,
            });
            None
        }
    }
}

fn parse_operational_period(
    dto: &OperationalPeriodDto,
    errors: &mut Vec<ValidationError>,
) -> OperationalPeriod {
    let default = parse_interval(
        &dto.start_time,
        &dto.end_time,
        "operational_period",
        errors,
    )
    .unwrap_or(Interval {
        start: crate::time::Minutes(0),
        end: crate::time::Minutes(crate::time::MINUTES_PER_DAY),
    });

    let active_days = dto
        .days
        .iter()
        .filter_map(|d| parse_day(d, "operational_period.days", errors))
        .collect();

    let day_exceptions = dto
        .day_exceptions
        .iter()
        .filter_map(|e| {
            let day = parse_day(&e.day, "operational_period.day_exceptions.day", errors)?;
            let interval = parse_interval(
                &e.start,
                &e.end,
                "operational_period.day_exceptions",
                errors,
            )?;
            Some(DayOverride { day, interval })
        })
        .collect();

    OperationalPeriod {
        default,
        active_days,
        day_exceptions,
    }
}

fn parse_break_policy(dto: &BreakPeriodDto, errors: &mut Vec<ValidationError>) -> BreakPolicy {
    let default = parse_interval(&dto.start_time, &dto.end_time, "break_period", errors);

    let no_break_days = dto
        .no_break_exceptions
        .iter()
        .filter_map(|d| parse_day(d, "break_period.no_break_exceptions", errors))
        .collect();

    let fixed_break_days = dto
        .day_exceptions
        .iter()
        .filter_map(|e| {
            let day = parse_day(&e.day, "break_period.day_exceptions.day", errors)?;
            let interval = parse_interval(&e.start, &e.end, "break_period.day_exceptions", errors)?;
            Some(DayOverride { day, interval })
        })
        .collect();

    BreakPolicy {
        default,
        daily: dto.daily,
        no_break_days,
        fixed_break_days,
    }
}

fn parse_period_policy(dto: &PeriodsDto, errors: &mut Vec<ValidationError>) -> PeriodPolicy {
    if dto.duration_minutes == 0 {
        errors.push(ValidationError::NonPositiveDuration {
            minutes: dto.duration_minutes as i64,
        });
    }

    let day_exceptions = dto
        .day_exceptions
        .iter()
        .filter_map(|e| {
            let day = parse_day(&e.day, "periods.day_exceptions.day", errors)?;
            if e.minutes == 0 {
                errors.push(ValidationError::NonPositiveDuration {
                    minutes: e.minutes as i64,
                });
                return None;
            }
            Some(DayDurationOverride {
                day,
                minutes: e.minutes,
            })
        })
        .collect();

    PeriodPolicy {
        default_minutes: dto.duration_minutes,
        day_exceptions,
    }
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;
