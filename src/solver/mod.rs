//! Constraint model and solver driver (§4.4, §4.6).
//!
//! Adopts a CP-SAT-style contract — single search worker, fixed random
//! seed, wall-clock budget — over a deterministic backtracking search
//! rather than an external solver crate: every candidate cell already
//! survived the feasibility pre-filter (§4.3), so the backtracking driver
//! only has to enforce teacher/hall exclusivity and required-joint-period
//! pins while it places sessions.
//!
//! Module organisation:
//! - `backtrack`: the recursive placement search and its public entry point
//! - `objective`: the preference-reward tie-breaker among accumulated
//!   complete solutions (§9 "Preference encoding")

pub mod backtrack;
pub mod objective;

use std::time::Duration;

use crate::model::Weekday;

/// Parameters fixed for determinism (§4.6, §5).
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Always 1 — the backtracking search has no internal parallelism.
    pub num_search_workers: u8,
    /// Accepted for parity with the original CP-SAT driver's
    /// `random_seed`; the backtracking search makes no randomized choice,
    /// so this has no effect on the outcome (documented in DESIGN.md).
    pub random_seed: u64,
    pub time_limit: Duration,
    /// Upper bound on the number of complete candidate solutions
    /// accumulated before picking the best by objective score (mirrors the
    /// teacher's 100-solution cap).
    pub max_solutions: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            num_search_workers: 1,
            random_seed: 42,
            time_limit: Duration::from_secs(30),
            max_solutions: 100,
        }
    }
}

/// One scheduled session: a course placed into a specific grid cell and
/// hall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSession {
    pub course_idx: usize,
    pub day: Weekday,
    pub slot: usize,
    pub hall_idx: usize,
}

/// A required-joint-period pin already resolved to a concrete cell (§4.4).
#[derive(Debug, Clone, Copy)]
pub struct Pin {
    pub course_idx: usize,
    pub day: Weekday,
    pub slot: usize,
    pub hall_idx: usize,
}

/// Terminal outcomes of a solve (§4.6). `Optimal` covers both the CP-SAT
/// `OPTIMAL` and `FEASIBLE` statuses — the source reports both the same
/// way (§9 open question: this may under-report sub-optimality).
#[derive(Debug, Clone)]
pub enum SolverOutcome {
    Optimal(Vec<PlacedSession>),
    Infeasible,
    Timeout,
}
