//! HTTP-only DTOs that have no counterpart in the core's request/response
//! contract (§6). The request and response bodies themselves are
//! `crate::model::TimetableRequest` / `TimetableResponse` — the core's wire
//! contract, reused verbatim by the handlers.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "healthy" }
    }
}
