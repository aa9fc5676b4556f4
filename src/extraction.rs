//! Solution extraction (§4.7): renders the solver's placement list into the
//! structured per-day timetable returned to the client.

use crate::grid::Grid;
use crate::model::{Course, DayTimetable, Hall, ScheduleSlot, Teacher};
use crate::solver::PlacedSession;
use crate::time::format_duration_minutes;

pub fn extract_timetable(
    placements: &[PlacedSession],
    courses: &[Course],
    teachers: &[Teacher],
    halls: &[Hall],
    grid: &Grid,
) -> Vec<DayTimetable> {
    let mut result = Vec::new();

    for day_grid in &grid.days {
        let mut slots: Vec<ScheduleSlot> = placements
            .iter()
            .filter(|p| p.day == day_grid.day)
            .map(|p| {
                let interval = day_grid.slots[p.slot];
                let course = &courses[p.course_idx];
                let teacher = teachers.iter().find(|t| t.teacher_id == course.teacher_id);
                let hall = &halls[p.hall_idx];
                ScheduleSlot {
                    day: day_grid.day.display_name().to_string(),
                    start_time: interval.start.to_hh_mm(),
                    end_time: interval.end.to_hh_mm(),
                    is_break: false,
                    duration: Some(format_duration_minutes(interval.duration_minutes())),
                    teacher_id: Some(course.teacher_id.clone()),
                    teacher_name: teacher.map(|t| t.name.clone()),
                    course_id: Some(course.course_id.clone()),
                    course_name: Some(course.title.clone()),
                    hall_id: Some(hall.hall_id.clone()),
                    hall_name: Some(hall.name.clone()),
                }
            })
            .collect();

        let non_break_count = slots.len();
        if non_break_count == 0 {
            // Break-only (or entirely empty) days are suppressed from the
            // rendered timetable (§4.7, §9 "Timetable omission of empty days").
            continue;
        }

        if let Some(break_window) = day_grid.break_window {
            slots.push(ScheduleSlot {
                day: day_grid.day.display_name().to_string(),
                start_time: break_window.start.to_hh_mm(),
                end_time: break_window.end.to_hh_mm(),
                is_break: true,
                duration: Some(format_duration_minutes(break_window.duration_minutes())),
                teacher_id: None,
                teacher_name: None,
                course_id: None,
                course_name: None,
                hall_id: None,
                hall_name: None,
            });
        }

        slots.sort_by(|a, b| {
            a.start_time.cmp(&b.start_time).then_with(|| {
                (a.teacher_id.as_deref(), a.course_id.as_deref())
                    .cmp(&(b.teacher_id.as_deref(), b.course_id.as_deref()))
            })
        });

        result.push(DayTimetable {
            day: day_grid.day.display_name().to_string(),
            slots,
        });
    }

    result
}

#[cfg(test)]
#[path = "extraction_test.rs"]
mod extraction_test;
