//! Academic timetable scheduler core.
//!
//! Given teachers, teacher-course assignments, halls, operational hours,
//! break policy, hard availability constraints, and a library of soft
//! preferences, [`orchestrator::solve_timetable`] produces a weekly
//! timetable satisfying every hard constraint and maximising satisfied
//! soft preferences, or a structured diagnostic explaining why it could
//! not.
//!
//! Module organisation follows the solve pipeline, leaves first:
//! - [`time`]: `HH:MM` parsing, overlap, alignment, duration formatting
//! - [`model`]: request/response wire contracts and the validated domain model
//! - [`validation`]: request validation
//! - [`soft_constraints`]: tagged-variant normalisation for soft rules
//! - [`grid`]: time-grid builder and break-policy resolution
//! - [`prefilter`]: feasibility pre-filter over `(course, day, slot, hall)`
//! - [`solver`]: decision-variable model and the backtracking driver
//! - [`extraction`]: assignment -> rendered timetable
//! - [`diagnostics`]: blocker assembly, soft-constraint auditor, status mapping
//! - [`orchestrator`]: the top-level solve pipeline
//! - [`http`]: axum adaptor exposing the two scheduling endpoints
//! - [`config`] / [`logging`]: process-wide settings and structured logging

pub mod config;
pub mod diagnostics;
pub mod extraction;
pub mod grid;
pub mod http;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod prefilter;
pub mod soft_constraints;
pub mod solver;
pub mod time;
pub mod validation;

pub use logging::{init_logging, LogConfig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
