use super::*;
use crate::grid::build_grid;
use crate::model::{BreakPolicy, CourseType, HallType, OperationalPeriod, PeriodPolicy, TeacherPreferred};
use crate::time::Interval;

fn course(course_type: CourseType) -> Course {
    Course {
        course_id: "c1".into(),
        title: "Algorithms".into(),
        credit: 3,
        course_type,
        hours: 3,
        teacher_id: "t1".into(),
    }
}

fn hall(id: &str, hall_type: HallType) -> Hall {
    Hall {
        hall_id: id.into(),
        name: id.into(),
        capacity: 30,
        hall_type,
    }
}

fn weekday_grid() -> crate::grid::Grid {
    let operational = OperationalPeriod {
        default: Interval::parse("08:00", "17:00").unwrap(),
        active_days: vec![Weekday::Monday, Weekday::Tuesday],
        day_exceptions: vec![],
    };
    let break_policy = BreakPolicy {
        default: Some(Interval::parse("12:00", "13:00").unwrap()),
        daily: true,
        no_break_days: vec![],
        fixed_break_days: vec![],
    };
    build_grid(&operational, &PeriodPolicy::default(), &break_policy)
}

#[test]
fn prefers_matching_hall_type() {
    let halls = vec![hall("lec1", HallType::Lecture), hall("lab1", HallType::Lab)];
    let grid = weekday_grid();
    let prefilter = build_prefilter(&[course(CourseType::Theory)], &halls, &grid, &[], &[], &[], false);
    let candidates = prefilter.for_course(0);
    assert!(candidates.iter().all(|c| c.hall_idx == 0));
}

#[test]
fn falls_back_to_any_hall_when_no_type_match_exists() {
    let halls = vec![hall("lab1", HallType::Lab)];
    let grid = weekday_grid();
    let prefilter = build_prefilter(&[course(CourseType::Theory)], &halls, &grid, &[], &[], &[], false);
    let candidates = prefilter.for_course(0);
    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|c| c.hall_idx == 0));
}

#[test]
fn excludes_slots_overlapping_the_break_window() {
    let halls = vec![hall("lec1", HallType::Lecture)];
    let grid = weekday_grid();
    let prefilter = build_prefilter(&[course(CourseType::Theory)], &halls, &grid, &[], &[], &[], false);
    let candidates = prefilter.for_course(0);
    let break_window = Interval::parse("12:00", "13:00").unwrap();
    let slots = &grid.day(Weekday::Monday).unwrap().slots;
    assert!(candidates
        .iter()
        .filter(|c| c.day == Weekday::Monday)
        .all(|c| !slots[c.slot].overlaps(break_window)));
}

#[test]
fn excludes_slots_overlapping_teacher_busy_window() {
    let halls = vec![hall("lec1", HallType::Lecture)];
    let grid = weekday_grid();
    let busy = vec![(
        "t1".to_string(),
        crate::model::BusyWindow {
            day: Some(Weekday::Monday),
            interval: Interval::parse("14:00", "17:00").unwrap(),
        },
    )];
    let prefilter = build_prefilter(&[course(CourseType::Theory)], &halls, &grid, &busy, &[], &[], false);
    let candidates = prefilter.for_course(0);
    let slots = &grid.day(Weekday::Monday).unwrap().slots;
    assert!(candidates
        .iter()
        .filter(|c| c.day == Weekday::Monday)
        .all(|c| slots[c.slot].end.0 <= 14 * 60));
}

#[test]
fn excludes_slots_overlapping_dayless_hall_busy_window_every_day() {
    let halls = vec![hall("lec1", HallType::Lecture)];
    let grid = weekday_grid();
    let busy = vec![(
        "lec1".to_string(),
        crate::model::BusyWindow {
            day: None,
            interval: Interval::parse("08:00", "09:00").unwrap(),
        },
    )];
    let prefilter = build_prefilter(&[course(CourseType::Theory)], &halls, &grid, &[], &busy, &[], false);
    let candidates = prefilter.for_course(0);
    let monday_slots = &grid.day(Weekday::Monday).unwrap().slots;
    let tuesday_slots = &grid.day(Weekday::Tuesday).unwrap().slots;
    assert!(candidates
        .iter()
        .filter(|c| c.day == Weekday::Monday)
        .all(|c| monday_slots[c.slot].start.0 >= 9 * 60));
    assert!(candidates
        .iter()
        .filter(|c| c.day == Weekday::Tuesday)
        .all(|c| tuesday_slots[c.slot].start.0 >= 9 * 60));
}

#[test]
fn preference_mode_restricts_to_preferred_window_when_teacher_has_one() {
    let halls = vec![hall("lec1", HallType::Lecture)];
    let grid = weekday_grid();
    let prefs = vec![(
        "t1".to_string(),
        TeacherPreferred {
            day: Weekday::Monday,
            interval: Interval::parse("09:00", "12:00").unwrap(),
        },
    )];
    let prefilter = build_prefilter(&[course(CourseType::Theory)], &halls, &grid, &[], &[], &prefs, true);
    let candidates = prefilter.for_course(0);
    let slots = &grid.day(Weekday::Monday).unwrap().slots;
    assert!(candidates
        .iter()
        .filter(|c| c.day == Weekday::Monday)
        .all(|c| slots[c.slot].contained_in(Interval::parse("09:00", "12:00").unwrap())));
    // Tuesday has no preference entry for this teacher, so every slot passes.
    assert!(candidates.iter().any(|c| c.day == Weekday::Tuesday));
}

#[test]
fn preference_mode_is_a_no_op_outside_preference_mode() {
    let halls = vec![hall("lec1", HallType::Lecture)];
    let grid = weekday_grid();
    let prefs = vec![(
        "t1".to_string(),
        TeacherPreferred {
            day: Weekday::Monday,
            interval: Interval::parse("09:00", "12:00").unwrap(),
        },
    )];
    let with_pref_ignored = build_prefilter(&[course(CourseType::Theory)], &halls, &grid, &[], &[], &prefs, false);
    let without_prefs = build_prefilter(&[course(CourseType::Theory)], &halls, &grid, &[], &[], &[], false);
    assert_eq!(
        with_pref_ignored.for_course(0).len(),
        without_prefs.for_course(0).len()
    );
}
