//! Feasibility pre-filter (§4.3): eliminates impossible
//! `(course, day, slot, hall)` tuples before the solver ever sees them.
//! Variable *existence* is how type matching, busy windows, breaks and
//! preference windows are enforced — no extra hard constraint in the model
//! itself polices these (§4.4).

use crate::grid::Grid;
use crate::model::{BusyWindow, Course, Hall, Weekday};

/// One admissible placement for a course: a grid cell plus a hall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub day: Weekday,
    pub slot: usize,
    pub hall_idx: usize,
}

/// The admissible candidate set for every course, indexed by course
/// position in the validated course list.
#[derive(Debug, Clone, Default)]
pub struct Prefilter {
    pub candidates: Vec<Vec<Candidate>>,
}

impl Prefilter {
    pub fn for_course(&self, course_idx: usize) -> &[Candidate] {
        self.candidates
            .get(course_idx)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

pub fn build_prefilter(
    courses: &[Course],
    halls: &[Hall],
    grid: &Grid,
    teacher_busy: &[(String, BusyWindow)],
    hall_busy: &[(String, BusyWindow)],
    teacher_preferences: &[(String, crate::model::TeacherPreferred)],
    preference_mode: bool,
) -> Prefilter {
    let candidates = courses
        .iter()
        .map(|course| candidates_for_course(course, halls, grid, teacher_busy, hall_busy, teacher_preferences, preference_mode))
        .collect();

    Prefilter { candidates }
}

fn candidates_for_course(
    course: &Course,
    halls: &[Hall],
    grid: &Grid,
    teacher_busy: &[(String, BusyWindow)],
    hall_busy: &[(String, BusyWindow)],
    teacher_preferences: &[(String, crate::model::TeacherPreferred)],
    preference_mode: bool,
) -> Vec<Candidate> {
    let suitable_halls = suitable_halls_for(course, halls);

    let mut out = Vec::new();
    for day_grid in &grid.days {
        let day = day_grid.day;

        let prefs_for_day: Vec<_> = teacher_preferences
            .iter()
            .filter(|(tid, p)| tid == &course.teacher_id && p.day == day)
            .collect();

        for (slot_idx, &slot) in day_grid.slots.iter().enumerate() {
            if day_grid
                .break_window
                .is_some_and(|bw| slot.overlaps(bw))
            {
                continue;
            }

            let teacher_blocked = teacher_busy.iter().any(|(tid, bw)| {
                tid == &course.teacher_id
                    && bw.day == Some(day)
                    && slot.overlaps(bw.interval)
            });
            if teacher_blocked {
                continue;
            }

            if preference_mode && !prefs_for_day.is_empty() {
                let within_preference = prefs_for_day
                    .iter()
                    .any(|(_, p)| slot.contained_in(p.interval));
                if !within_preference {
                    continue;
                }
            }

            for (hall_idx, hall) in suitable_halls.iter() {
                let hall_blocked = hall_busy.iter().any(|(hid, bw)| {
                    hid == &hall.hall_id
                        && (bw.day.is_none() || bw.day == Some(day))
                        && slot.overlaps(bw.interval)
                });
                if hall_blocked {
                    continue;
                }
                out.push(Candidate {
                    day,
                    slot: slot_idx,
                    hall_idx: *hall_idx,
                });
            }
        }
    }
    out
}

/// Halls matching the course's required type; falls back to every hall
/// (in input order) when none match — documented behaviour, not a bug
/// (§9 "Type-match fallback").
fn suitable_halls_for<'a>(course: &Course, halls: &'a [Hall]) -> Vec<(usize, &'a Hall)> {
    let required = course.course_type.matching_hall_type();
    let matching: Vec<(usize, &Hall)> = halls
        .iter()
        .enumerate()
        .filter(|(_, h)| h.hall_type == required)
        .collect();
    if matching.is_empty() {
        halls.iter().enumerate().collect()
    } else {
        matching
    }
}

#[cfg(test)]
#[path = "prefilter_test.rs"]
mod prefilter_test;
