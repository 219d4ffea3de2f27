//! Axum Handlers for the Skill Endpoint
//!
//! The skill endpoint accepts the platform's request envelope and returns the
//! response envelope produced by `homecover_core::Skill`. It uses `utoipa`
//! doc comments to generate OpenAPI documentation.

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use homecover_core::{request::RequestEnvelope, response::ResponseEnvelope};
use std::sync::Arc;
use tracing::{error, warn};

use crate::{
    models::{ErrorResponse, HealthResponse},
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    Forbidden(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::Forbidden(message) => {
                (StatusCode::FORBIDDEN, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_) => {
                warn!(error = %rejection.body_text(), "Rejected skill request body");
                Self::BadRequest(rejection.body_text())
            }
            other => Self::InternalServerError(anyhow::Error::new(other)),
        }
    }
}

/// Handle one turn of a skill conversation.
#[utoipa::path(
    post,
    path = "/alexa",
    request_body = RequestEnvelope,
    responses(
        (status = 200, description = "Skill response for this turn", body = ResponseEnvelope),
        (status = 400, description = "Malformed request envelope", body = ErrorResponse),
        (status = 403, description = "Request is for a different skill", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn handle_skill_request(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let Json(envelope) = payload?;

    state
        .config
        .verify_application_id(envelope.application_id())
        .map_err(|message| {
            warn!(%message, "Rejected skill request");
            ApiError::Forbidden(message)
        })?;

    let response = state.skill.invoke(envelope).await;
    Ok(Json(response))
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
