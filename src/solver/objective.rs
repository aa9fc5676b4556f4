//! Objective scoring (§4.8, §9 "Preference encoding").
//!
//! In preference mode every surviving candidate already lies inside a
//! preferred window (the pre-filter removed the rest), so this reward
//! rarely distinguishes between solutions in practice — it is kept as a
//! tie-breaker among accumulated complete solutions, matching the source's
//! own `var * 10` objective term.

use super::PlacedSession;
use crate::grid::Grid;
use crate::model::{Course, TeacherPreferred};

const PREFERENCE_WEIGHT: i64 = 10;

pub fn score(
    placements: &[PlacedSession],
    courses: &[Course],
    grid: &Grid,
    teacher_preferences: &[(String, TeacherPreferred)],
) -> i64 {
    placements
        .iter()
        .map(|p| {
            let teacher_id = &courses[p.course_idx].teacher_id;
            let day_grid = match grid.day(p.day) {
                Some(d) => d,
                None => return 0,
            };
            let slot = match day_grid.slots.get(p.slot) {
                Some(s) => *s,
                None => return 0,
            };
            let in_preference = teacher_preferences
                .iter()
                .any(|(tid, pref)| tid == teacher_id && pref.day == p.day && slot.contained_in(pref.interval));
            if in_preference {
                PREFERENCE_WEIGHT
            } else {
                0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BreakPolicy, CourseType, OperationalPeriod, PeriodPolicy, Weekday};
    use crate::time::Interval;

    fn grid() -> Grid {
        let operational = OperationalPeriod {
            default: Interval::parse("08:00", "17:00").unwrap(),
            active_days: vec![Weekday::Monday],
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

    fn course() -> Course {
        Course {
            course_id: "c1".into(),
            title: "Algorithms".into(),
            credit: 1,
            course_type: CourseType::Theory,
            hours: 1,
            teacher_id: "t1".into(),
        }
    }

    #[test]
    fn rewards_placements_inside_a_preferred_window() {
        let grid = grid();
        let courses = vec![course()];
        let slot_idx = 0;
        let placement = PlacedSession {
            course_idx: 0,
            day: Weekday::Monday,
            slot: slot_idx,
            hall_idx: 0,
        };
        let prefs = vec![(
            "t1".to_string(),
            TeacherPreferred {
                day: Weekday::Monday,
                interval: Interval::parse("08:00", "09:00").unwrap(),
            },
        )];
        assert_eq!(score(&[placement], &courses, &grid, &prefs), 10);
    }

    #[test]
    fn scores_zero_with_no_preferences_configured() {
        let grid = grid();
        let courses = vec![course()];
        let placement = PlacedSession {
            course_idx: 0,
            day: Weekday::Monday,
            slot: 0,
            hall_idx: 0,
        };
        assert_eq!(score(&[placement], &courses, &grid, &[]), 0);
    }
}
