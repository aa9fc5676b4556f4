//! Thin HTTP adaptor over the scheduling core (§6, explicitly out of scope
//! for the core's own spec — request/response serialisation, CORS, and
//! validation-error prettification live here, not in the solver).

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
