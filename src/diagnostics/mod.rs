//! Diagnostics engine (§4.8, §4.9, §7): post-solve soft-constraint auditing
//! and status mapping.

pub mod auditor;
pub mod status;

pub use auditor::audit_soft_constraints;
pub use status::{compose_summary, map_status};
