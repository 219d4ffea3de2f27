//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the skill endpoint, the health probe, and OpenAPI documentation.

use crate::{
    handlers,
    models::{ErrorResponse, HealthResponse},
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use homecover_core::{
    attributes::SessionAttributes,
    request::{
        Application, Context, Device, IntentRef, RequestBody, RequestEnvelope, Session,
        SessionEndedError, SystemState,
    },
    response::{Directive, OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope, SpeechType},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::handle_skill_request, handlers::health),
    components(
        schemas(
            RequestEnvelope, Session, Application, Context, SystemState, Device, RequestBody,
            IntentRef, SessionEndedError, SessionAttributes, ResponseEnvelope, ResponseBody,
            OutputSpeech, Reprompt, SpeechType, Directive, ErrorResponse, HealthResponse
        )
    ),
    tags(
        (name = "HomeCover Skill", description = "Voice skill endpoint for home insurance questions")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/alexa", post(handlers::handle_skill_request))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health))
        .merge(api_router)
}
