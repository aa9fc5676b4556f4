//! HTTP error handling.
//!
//! Per §6 "Exit policy": every *completed* solve returns HTTP 200, including
//! a core `status: "ERROR"` body — that is not an HTTP-layer error at all.
//! The only error this adaptor itself produces is 422 for a request body
//! the serialisation layer rejects before the core ever runs.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    UnprocessableEntity(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::UnprocessableEntity(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError {
                    code: "SCHEMA_VIOLATION",
                    message,
                },
            ),
        };
        (status, Json(error)).into_response()
    }
}

/// A `Json<T>` extractor whose rejection maps to 422 instead of axum's
/// default 400/415, per the core's exit policy.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidatedJson(value)),
            Err(rejection) => Err(match rejection {
                JsonRejection::JsonDataError(e) => AppError::UnprocessableEntity(e.to_string()),
                JsonRejection::JsonSyntaxError(e) => AppError::UnprocessableEntity(e.to_string()),
                JsonRejection::MissingJsonContentType(e) => {
                    AppError::UnprocessableEntity(e.to_string())
                }
                other => AppError::UnprocessableEntity(other.to_string()),
            }),
        }
    }
}
