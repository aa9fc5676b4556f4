//! Time-grid builder (§4.2): turns operational hours, per-day slot-duration
//! overrides, and the break policy into the canonical `(day, slot)`
//! coordinate system every other component refers to.

use crate::model::{BreakPolicy, OperationalPeriod, PeriodPolicy, Weekday};
use crate::time::Interval;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGrid {
    pub day: Weekday,
    /// Ordered `[start, end)` bounds for each slot index on this day.
    pub slots: Vec<Interval>,
    /// The effective break window for this day, if any (§4.5).
    pub break_window: Option<Interval>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    pub days: Vec<DayGrid>,
}

impl Grid {
    pub fn day(&self, day: Weekday) -> Option<&DayGrid> {
        self.days.iter().find(|d| d.day == day)
    }
}

/// Builds the grid, iterating days in canonical Monday-to-Sunday order
/// restricted to the operational period's active-day set.
pub fn build_grid(
    operational: &OperationalPeriod,
    period_policy: &PeriodPolicy,
    break_policy: &BreakPolicy,
) -> Grid {
    let mut days = Vec::new();

    for &day in Weekday::ALL.iter() {
        if !operational.active_days.contains(&day) {
            continue;
        }

        let window = operational.window_for(day);
        let aligned_start = window.start.align_up_to_quarter_hour();
        if aligned_start.0 >= window.end.0 {
            // The aligned start no longer fits inside the window; the day
            // contributes no grid cells at all.
            continue;
        }

        let duration = period_policy.duration_for(day);
        let slots = enumerate_slots(aligned_start, window.end, duration);
        let break_window = break_policy.effective_window_for(day);

        days.push(DayGrid {
            day,
            slots,
            break_window,
        });
    }

    Grid { days }
}

fn enumerate_slots(
    start: crate::time::Minutes,
    day_end: crate::time::Minutes,
    duration_minutes: u32,
) -> Vec<Interval> {
    let mut slots = Vec::new();
    let mut t = start.0;
    while t + duration_minutes <= day_end.0 {
        slots.push(Interval {
            start: crate::time::Minutes(t),
            end: crate::time::Minutes(t + duration_minutes),
        });
        t += duration_minutes;
    }
    slots
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
