//! Status mapping (§4.9): OPTIMAL / PARTIAL / ERROR plus the fixed summary
//! message that mirrors it.

use crate::model::{Status, Summary};

pub fn map_status(hard_failure_count: usize, soft_failure_count: usize) -> Status {
    if hard_failure_count > 0 {
        Status::Error
    } else if soft_failure_count > 0 {
        Status::Partial
    } else {
        Status::Optimal
    }
}

pub fn compose_summary(hard_failure_count: usize, soft_failure_count: usize) -> Summary {
    let status = map_status(hard_failure_count, soft_failure_count);
    let message = match status {
        Status::Optimal => "Timetable generated successfully; all constraints satisfied.",
        Status::Partial => "Timetable generated; some soft constraints were violated.",
        Status::Error => "Unable to generate a valid timetable.",
    };
    Summary {
        message: message.to_string(),
        hard_constraints_met: hard_failure_count == 0,
        soft_constraints_met: matches!(status, Status::Optimal),
        failed_hard_constraints_count: hard_failure_count,
        failed_soft_constraints_count: soft_failure_count,
    }
}
