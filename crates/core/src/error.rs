//! Error types raised while handling a skill request.
//!
//! Every `SkillError` is recoverable within a turn: the dispatcher converts it
//! into the apology response instead of letting it escape to the host.

/// Failures raised while loading a visual template document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Document '{0}' not found")]
    NotFound(String),
    #[error("Invalid document name: '{0}'")]
    InvalidName(String),
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures raised by handlers and interceptors during a single invocation.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("Failed to load visual document '{name}': {source}")]
    Document {
        name: String,
        #[source]
        source: DocumentError,
    },
    #[error("Session attribute '{0}' does not hold a string")]
    InvalidAttribute(String),
    #[error("Interceptor '{name}' failed: {reason}")]
    Interceptor { name: String, reason: String },
}
