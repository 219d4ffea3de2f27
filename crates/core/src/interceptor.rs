//! Hooks that run before and after every dispatched request.

use crate::{error::SkillError, handlers::HandlerInput, response::ResponseBody};
use tracing::debug;

/// Runs before the handler is selected.
pub trait RequestInterceptor: Send + Sync {
    fn process(&self, input: &HandlerInput) -> Result<(), SkillError>;
}

/// Runs after the handler (or the exception handler) has produced a response.
pub trait ResponseInterceptor: Send + Sync {
    fn process(&self, input: &HandlerInput, response: &ResponseBody) -> Result<(), SkillError>;
}

/// Logs every inbound request at debug level.
pub struct RequestLogger;

impl RequestInterceptor for RequestLogger {
    fn process(&self, input: &HandlerInput) -> Result<(), SkillError> {
        debug!(
            request = %input.kind,
            session_id = input.session_id.as_deref().unwrap_or("-"),
            new_session = input.new_session,
            supports_apl = input.supports_apl,
            "Skill request"
        );
        Ok(())
    }
}

/// Logs every outbound response at debug level.
pub struct ResponseLogger;

impl ResponseInterceptor for ResponseLogger {
    fn process(&self, input: &HandlerInput, response: &ResponseBody) -> Result<(), SkillError> {
        debug!(
            request = %input.kind,
            response = ?response,
            "Skill response"
        );
        Ok(())
    }
}
