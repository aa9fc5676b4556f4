//! HTTP handlers (§6). Each one delegates straight to the orchestrator;
//! the solve itself runs on a blocking task since it is CPU-bound and can
//! legitimately take the full wall-clock budget.

use std::time::Duration;

use axum::{extract::State, Json};

use super::dto::HealthResponse;
use super::error::{AppError, ValidatedJson};
use super::state::AppState;
use crate::model::TimetableRequest;
use crate::orchestrator::{solve_timetable, SolveOptions};

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

pub async fn schedule_with_preference(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TimetableRequest>,
) -> Result<Json<crate::model::TimetableResponse>, AppError> {
    schedule(state, request, true).await
}

pub async fn schedule_without_preference(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TimetableRequest>,
) -> Result<Json<crate::model::TimetableResponse>, AppError> {
    schedule(state, request, false).await
}

async fn schedule(
    state: AppState,
    request: TimetableRequest,
    respect_preferences: bool,
) -> Result<Json<crate::model::TimetableResponse>, AppError> {
    let options = SolveOptions {
        respect_preferences,
        time_limit: Duration::from_secs(state.config.solver_timeout_seconds as u64),
        random_seed: state.config.solver_seed,
    };

    let response = tokio::task::spawn_blocking(move || solve_timetable(&request, &options))
        .await
        .expect("solver task panicked");

    Ok(Json(response))
}
