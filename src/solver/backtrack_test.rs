use super::*;
use crate::model::{BreakPolicy, CourseType, Hall, HallType, OperationalPeriod, PeriodPolicy};
use crate::prefilter::build_prefilter;
use crate::time::Interval;
use std::time::Duration;

fn grid_mon_fri() -> Grid {
    let operational = OperationalPeriod {
        default: Interval::parse("08:00", "17:00").unwrap(),
        active_days: vec![
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
        ],
        day_exceptions: vec![],
    };
    let break_policy = BreakPolicy {
        default: Some(Interval::parse("12:00", "13:00").unwrap()),
        daily: true,
        no_break_days: vec![],
        fixed_break_days: vec![],
    };
    crate::grid::build_grid(&operational, &PeriodPolicy::default(), &break_policy)
}

fn course(id: &str, teacher: &str, credit: u32) -> Course {
    Course {
        course_id: id.into(),
        title: id.into(),
        credit,
        course_type: CourseType::Theory,
        hours: credit,
        teacher_id: teacher.into(),
    }
}

fn hall(id: &str) -> Hall {
    Hall {
        hall_id: id.into(),
        name: id.into(),
        capacity: 30,
        hall_type: HallType::Lecture,
    }
}

#[test]
fn places_exactly_sessions_required_for_a_single_course() {
    let grid = grid_mon_fri();
    let courses = vec![course("c1", "t1", 3)];
    let halls = vec![hall("h1")];
    let prefilter = build_prefilter(&courses, &halls, &grid, &[], &[], &[], false);

    let outcome = solve(
        &courses,
        &prefilter,
        &[],
        &SolverConfig::default(),
        &grid,
        &[],
    );

    match outcome {
        SolverOutcome::Optimal(placements) => assert_eq!(placements.len(), 3),
        other => panic!("expected Optimal, got {other:?}"),
    }
}

#[test]
fn reports_infeasible_when_no_candidates_exist() {
    let grid = grid_mon_fri();
    let courses = vec![course("c1", "t1", 1)];
    let halls: Vec<Hall> = vec![];
    let prefilter = build_prefilter(&courses, &halls, &grid, &[], &[], &[], false);

    let outcome = solve(
        &courses,
        &prefilter,
        &[],
        &SolverConfig::default(),
        &grid,
        &[],
    );

    assert!(matches!(outcome, SolverOutcome::Infeasible));
}

#[test]
fn respects_a_pinned_session_and_reduces_remaining_demand() {
    let grid = grid_mon_fri();
    let courses = vec![course("c1", "t1", 1)];
    let halls = vec![hall("h1")];
    let prefilter = build_prefilter(&courses, &halls, &grid, &[], &[], &[], false);
    let pin = Pin {
        course_idx: 0,
        day: Weekday::Monday,
        slot: 0,
        hall_idx: 0,
    };

    let outcome = solve(
        &courses,
        &prefilter,
        &[pin],
        &SolverConfig::default(),
        &grid,
        &[],
    );

    match outcome {
        SolverOutcome::Optimal(placements) => {
            assert_eq!(placements.len(), 1);
            assert_eq!(placements[0].day, Weekday::Monday);
            assert_eq!(placements[0].slot, 0);
        }
        other => panic!("expected Optimal, got {other:?}"),
    }
}

#[test]
fn enforces_teacher_exclusivity_across_two_courses() {
    let grid = grid_mon_fri();
    // Two courses, same teacher: together they need more sessions than the
    // single available (day, slot) cell count if they always collide, but
    // with a full week of slots there's plenty of room - this just checks
    // no two sessions of the same teacher land on the same (day, slot).
    let courses = vec![course("c1", "t1", 2), course("c2", "t1", 2)];
    let halls = vec![hall("h1"), hall("h2")];
    let prefilter = build_prefilter(&courses, &halls, &grid, &[], &[], &[], false);

    let outcome = solve(
        &courses,
        &prefilter,
        &[],
        &SolverConfig::default(),
        &grid,
        &[],
    );

    match outcome {
        SolverOutcome::Optimal(placements) => {
            assert_eq!(placements.len(), 4);
            let mut seen = std::collections::HashSet::new();
            for p in &placements {
                assert!(seen.insert((p.day, p.slot)), "teacher double-booked");
            }
        }
        other => panic!("expected Optimal, got {other:?}"),
    }
}

#[test]
fn times_out_when_the_deadline_is_already_past() {
    let grid = grid_mon_fri();
    let courses = vec![course("c1", "t1", 3)];
    let halls = vec![hall("h1")];
    let prefilter = build_prefilter(&courses, &halls, &grid, &[], &[], &[], false);
    let config = SolverConfig {
        time_limit: Duration::from_nanos(0),
        ..SolverConfig::default()
    };

    // A zero time budget may still squeeze out a solution on a fast
    // machine before the first deadline check; the meaningful assertion is
    // that the driver never panics and returns a terminal outcome.
    let outcome = solve(&courses, &prefilter, &[], &config, &grid, &[]);
    assert!(matches!(
        outcome,
        SolverOutcome::Timeout | SolverOutcome::Optimal(_)
    ));
}
