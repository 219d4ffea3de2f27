//! Skill Dispatcher
//!
//! A `Skill` is the fully-configured request pipeline, assembled once at
//! startup with [`SkillBuilder`] and then shared read-only by every
//! invocation. `invoke` never fails: handler and interceptor errors are
//! turned into the apology response by the catch-all exception handler.

use crate::{
    document::DocumentStore,
    error::SkillError,
    handlers::{Handler, HandlerInput},
    interceptor::{RequestInterceptor, ResponseInterceptor},
    request::RequestEnvelope,
    response::{ResponseBody, ResponseBuilder, ResponseEnvelope},
    script,
};
use std::sync::Arc;
use tracing::{error, instrument, warn};

/// The configured skill: document source plus interceptor chains.
pub struct Skill {
    documents: Arc<dyn DocumentStore>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

/// Assembles a [`Skill`].
pub struct SkillBuilder {
    documents: Arc<dyn DocumentStore>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl SkillBuilder {
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            documents,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// Adds an interceptor that runs before routing. Interceptors run in the order added.
    pub fn request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Adds an interceptor that runs after the response is produced.
    pub fn response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> Skill {
        Skill {
            documents: self.documents,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
        }
    }
}

impl Skill {
    pub fn builder(documents: Arc<dyn DocumentStore>) -> SkillBuilder {
        SkillBuilder::new(documents)
    }

    /// Handles one turn and returns the envelope to send back to the platform.
    #[instrument(
        name = "skill_invocation",
        skip_all,
        fields(request_id = %envelope.request.request_id, handler = tracing::field::Empty)
    )]
    pub async fn invoke(&self, envelope: RequestEnvelope) -> ResponseEnvelope {
        let mut input = HandlerInput::from_envelope(envelope);

        let response = match self.dispatch(&mut input).await {
            Ok(response) => response,
            Err(err) => handle_exception(&err),
        };

        for interceptor in &self.response_interceptors {
            if let Err(err) = interceptor.process(&input, &response) {
                warn!(error = %err, "Response interceptor failed");
            }
        }

        ResponseEnvelope::new(input.attributes, response)
    }

    async fn dispatch(&self, input: &mut HandlerInput) -> Result<ResponseBody, SkillError> {
        for interceptor in &self.request_interceptors {
            interceptor.process(input)?;
        }

        let handler = Handler::route(&input.kind);
        tracing::Span::current().record("handler", handler.name());
        handler.handle(input, self.documents.as_ref()).await
    }
}

/// Catch-all exception handler: logs the failure and asks the user to try again.
fn handle_exception(err: &SkillError) -> ResponseBody {
    error!(error = ?err, "Error handling skill request");
    ResponseBuilder::new()
        .speak(script::APOLOGY.speech)
        .ask(script::APOLOGY.reprompt)
        .build()
}
