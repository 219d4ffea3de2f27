//! Request Handlers
//!
//! Every request the skill can receive maps to exactly one [`Handler`]
//! variant through the exhaustive match in [`Handler::route`]. Adding a new
//! intent therefore means adding a variant, and the compiler points at every
//! place that must learn about it.

use crate::{
    attributes::SessionAttributes,
    document::{DocumentStore, SIMPLE_DISPLAY_TEMPLATE},
    error::SkillError,
    request::{Intent, RequestEnvelope, RequestKind},
    response::{Directive, ResponseBody, ResponseBuilder},
    script::{self, Script},
};
use serde_json::json;
use tracing::{info, warn};

/// Everything a handler may read or mutate during one turn.
#[derive(Debug, Clone)]
pub struct HandlerInput {
    pub kind: RequestKind,
    pub request_id: String,
    pub session_id: Option<String>,
    pub new_session: bool,
    pub supports_apl: bool,
    pub attributes: SessionAttributes,
    /// Why the platform ended the session, for `SessionEndedRequest`s.
    pub end_reason: Option<String>,
    pub end_error: Option<String>,
}

impl HandlerInput {
    pub fn from_envelope(envelope: RequestEnvelope) -> Self {
        let kind = envelope.request.kind();
        let supports_apl = envelope.supports_apl();
        let (session_id, new_session, attributes) = match envelope.session {
            Some(session) => (
                Some(session.session_id),
                session.new,
                session.attributes.unwrap_or_default(),
            ),
            None => (None, false, SessionAttributes::default()),
        };
        let end_error = envelope.request.error.map(|e| match e.message {
            Some(message) => format!("{}: {}", e.error_type, message),
            None => e.error_type,
        });

        Self {
            kind,
            request_id: envelope.request.request_id,
            session_id,
            new_session,
            supports_apl,
            attributes,
            end_reason: envelope.request.reason,
            end_error,
        }
    }
}

/// The closed set of handlers the skill dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Launch,
    Ornament,
    ScheduleLoss,
    Perils,
    Help,
    CancelOrStop,
    Fallback,
    Repeat,
    SessionEnded,
    Unsupported,
}

impl Handler {
    /// Selects the handler for a request. Every request kind has exactly one.
    pub fn route(kind: &RequestKind) -> Self {
        match kind {
            RequestKind::Launch => Self::Launch,
            RequestKind::Intent(intent) => match intent {
                Intent::Ornament => Self::Ornament,
                Intent::ScheduleLoss => Self::ScheduleLoss,
                Intent::Perils => Self::Perils,
                Intent::Help => Self::Help,
                Intent::Cancel | Intent::Stop => Self::CancelOrStop,
                Intent::Repeat => Self::Repeat,
                Intent::Fallback | Intent::Other(_) => Self::Fallback,
            },
            RequestKind::SessionEnded => Self::SessionEnded,
            RequestKind::Unsupported(_) => Self::Unsupported,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Launch => "LaunchRequestHandler",
            Self::Ornament => "OrnamentIntentHandler",
            Self::ScheduleLoss => "ScheduleLossIntentHandler",
            Self::Perils => "PerilsIntentHandler",
            Self::Help => "HelpIntentHandler",
            Self::CancelOrStop => "CancelOrStopIntentHandler",
            Self::Fallback => "FallbackIntentHandler",
            Self::Repeat => "RepeatIntentHandler",
            Self::SessionEnded => "SessionEndedRequestHandler",
            Self::Unsupported => "UnsupportedRequestHandler",
        }
    }

    /// Produces the response for this turn, updating session attributes in place.
    pub async fn handle(
        self,
        input: &mut HandlerInput,
        documents: &dyn DocumentStore,
    ) -> Result<ResponseBody, SkillError> {
        info!(handler = self.name(), "Handling request");
        match self {
            Self::Launch => answer(script::LAUNCH, input, documents).await,
            Self::Ornament => answer(script::ORNAMENT, input, documents).await,
            Self::ScheduleLoss => answer(script::SCHEDULE_LOSS, input, documents).await,
            Self::Perils => answer(script::PERILS, input, documents).await,
            Self::Help => Ok(say(script::HELP)),
            Self::Fallback => Ok(say(script::FALLBACK)),
            Self::CancelOrStop => Ok(ResponseBuilder::new()
                .speak(script::GOODBYE)
                .end_session(true)
                .build()),
            Self::Repeat => repeat(input),
            Self::SessionEnded => {
                info!(
                    reason = input.end_reason.as_deref().unwrap_or("unknown"),
                    error = input.end_error.as_deref(),
                    "Session ended"
                );
                Ok(ResponseBody::default())
            }
            Self::Unsupported => {
                warn!(request = %input.kind, "No handler for request type");
                Ok(ResponseBody::default())
            }
        }
    }
}

fn say(script: Script) -> ResponseBody {
    ResponseBuilder::new()
        .speak(script.speech)
        .ask(script.reprompt)
        .build()
}

/// Speaks an informational script, remembers it for repeat, and renders it on screen devices.
async fn answer(
    script: Script,
    input: &mut HandlerInput,
    documents: &dyn DocumentStore,
) -> Result<ResponseBody, SkillError> {
    let mut builder = ResponseBuilder::new()
        .speak(script.speech)
        .ask(script.reprompt);

    if input.supports_apl {
        let document = documents
            .load(SIMPLE_DISPLAY_TEMPLATE)
            .await
            .map_err(|source| SkillError::Document {
                name: SIMPLE_DISPLAY_TEMPLATE.to_string(),
                source,
            })?;
        builder = builder.add_directive(Directive::render_document(
            SIMPLE_DISPLAY_TEMPLATE,
            document,
            json!({ "message": { "text": script.speech } }),
        ));
    }

    input.attributes.remember(script.speech, script.reprompt);
    Ok(builder.build())
}

fn repeat(input: &HandlerInput) -> Result<ResponseBody, SkillError> {
    match input.attributes.repeat_state()? {
        Some(state) => Ok(ResponseBuilder::new()
            .speak(&state.speech_output)
            .ask(&state.reprompt)
            .build()),
        None => {
            info!("Repeat requested before anything was said");
            Ok(say(script::NOTHING_TO_REPEAT))
        }
    }
}
