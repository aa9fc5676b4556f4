//! Recursive backtracking search over the pre-filtered candidate set.
//!
//! Mirrors the teacher's `backtrack_search` / `try_place_curriculum` shape:
//! walk courses in order, place each course's required sessions by trying
//! candidates in their canonical (day, slot, hall) order, backtrack on
//! conflict, and accumulate complete solutions up to a cap before picking
//! the best one by objective score. Candidates are already sorted
//! deterministically by the pre-filter, so no explicit tie-break rule is
//! needed beyond "first found wins" among equally scored solutions.

use std::collections::HashSet;
use std::time::Instant;

use super::objective;
use super::{Pin, PlacedSession, SolverConfig, SolverOutcome};
use crate::grid::Grid;
use crate::model::{Course, TeacherPreferred, Weekday};
use crate::prefilter::Prefilter;

type TeacherSlotKey = (String, Weekday, usize);
type HallSlotKey = (usize, Weekday, usize);

struct SearchCtx<'a> {
    courses: &'a [Course],
    prefilter: &'a Prefilter,
    deadline: Instant,
    max_solutions: usize,
    solutions: Vec<Vec<PlacedSession>>,
    timed_out: bool,
}

pub fn solve(
    courses: &[Course],
    prefilter: &Prefilter,
    pins: &[Pin],
    config: &SolverConfig,
    grid: &Grid,
    teacher_preferences: &[(String, TeacherPreferred)],
) -> SolverOutcome {
    let deadline = Instant::now() + config.time_limit;

    let mut occupied_teacher: HashSet<TeacherSlotKey> = HashSet::new();
    let mut occupied_hall: HashSet<HallSlotKey> = HashSet::new();
    let mut base = Vec::new();
    for pin in pins {
        occupied_teacher.insert((courses[pin.course_idx].teacher_id.clone(), pin.day, pin.slot));
        occupied_hall.insert((pin.hall_idx, pin.day, pin.slot));
        base.push(PlacedSession {
            course_idx: pin.course_idx,
            day: pin.day,
            slot: pin.slot,
            hall_idx: pin.hall_idx,
        });
    }

    let mut needed_per_course: Vec<usize> = courses
        .iter()
        .map(|c| c.sessions_required() as usize)
        .collect();
    for pin in pins {
        needed_per_course[pin.course_idx] = needed_per_course[pin.course_idx].saturating_sub(1);
    }

    let mut ctx = SearchCtx {
        courses,
        prefilter,
        deadline,
        max_solutions: config.max_solutions,
        solutions: Vec::new(),
        timed_out: false,
    };

    let mut current = base;
    search_from_course(
        &mut ctx,
        0,
        &needed_per_course,
        &mut current,
        &mut occupied_teacher,
        &mut occupied_hall,
    );

    if ctx.solutions.is_empty() {
        if ctx.timed_out {
            SolverOutcome::Timeout
        } else {
            SolverOutcome::Infeasible
        }
    } else {
        let best = ctx
            .solutions
            .iter()
            .enumerate()
            .max_by_key(|(i, sol)| {
                (
                    objective::score(sol, courses, grid, teacher_preferences),
                    std::cmp::Reverse(*i),
                )
            })
            .map(|(_, sol)| sol.clone())
            .expect("solutions is non-empty");
        SolverOutcome::Optimal(best)
    }
}

fn search_from_course(
    ctx: &mut SearchCtx,
    course_idx: usize,
    needed_per_course: &[usize],
    current: &mut Vec<PlacedSession>,
    occupied_teacher: &mut HashSet<TeacherSlotKey>,
    occupied_hall: &mut HashSet<HallSlotKey>,
) {
    if check_deadline(ctx) {
        return;
    }

    if course_idx == ctx.courses.len() {
        ctx.solutions.push(current.clone());
        return;
    }

    let needed = needed_per_course[course_idx];
    if needed == 0 {
        search_from_course(
            ctx,
            course_idx + 1,
            needed_per_course,
            current,
            occupied_teacher,
            occupied_hall,
        );
        return;
    }

    place_sessions(
        ctx,
        course_idx,
        needed_per_course,
        needed,
        0,
        current,
        occupied_teacher,
        occupied_hall,
    );
}

#[allow(clippy::too_many_arguments)]
fn place_sessions(
    ctx: &mut SearchCtx,
    course_idx: usize,
    needed_per_course: &[usize],
    remaining: usize,
    start_idx: usize,
    current: &mut Vec<PlacedSession>,
    occupied_teacher: &mut HashSet<TeacherSlotKey>,
    occupied_hall: &mut HashSet<HallSlotKey>,
) {
    if check_deadline(ctx) {
        return;
    }

    if remaining == 0 {
        search_from_course(
            ctx,
            course_idx + 1,
            needed_per_course,
            current,
            occupied_teacher,
            occupied_hall,
        );
        return;
    }

    let teacher_id = ctx.courses[course_idx].teacher_id.clone();
    let candidates = ctx.prefilter.for_course(course_idx);

    for i in start_idx..candidates.len() {
        if ctx.timed_out || ctx.solutions.len() >= ctx.max_solutions {
            return;
        }
        let candidate = candidates[i];
        let teacher_key = (teacher_id.clone(), candidate.day, candidate.slot);
        let hall_key = (candidate.hall_idx, candidate.day, candidate.slot);
        if occupied_teacher.contains(&teacher_key) || occupied_hall.contains(&hall_key) {
            continue;
        }

        occupied_teacher.insert(teacher_key.clone());
        occupied_hall.insert(hall_key);
        current.push(PlacedSession {
            course_idx,
            day: candidate.day,
            slot: candidate.slot,
            hall_idx: candidate.hall_idx,
        });

        place_sessions(
            ctx,
            course_idx,
            needed_per_course,
            remaining - 1,
            i + 1,
            current,
            occupied_teacher,
            occupied_hall,
        );

        current.pop();
        occupied_teacher.remove(&teacher_key);
        occupied_hall.remove(&(candidate.hall_idx, candidate.day, candidate.slot));
    }
}

fn check_deadline(ctx: &mut SearchCtx) -> bool {
    if ctx.timed_out {
        return true;
    }
    if Instant::now() >= ctx.deadline {
        ctx.timed_out = true;
        return true;
    }
    false
}

#[cfg(test)]
#[path = "backtrack_test.rs"]
mod backtrack_test;
