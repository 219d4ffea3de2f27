//! Inbound Request Envelope
//!
//! This module mirrors the JSON envelope the voice platform posts for every
//! turn, and classifies it into the closed `RequestKind` / `Intent` variants
//! the dispatcher routes on.

use crate::attributes::SessionAttributes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

/// Name of the interface a device advertises when it can render APL documents.
pub const APL_INTERFACE: &str = "Alexa.Presentation.APL";

/// The full request envelope sent by the platform.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: RequestBody,
}

fn default_version() -> String {
    "1.0".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    pub session_id: String,
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub attributes: Option<SessionAttributes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Context {
    #[serde(rename = "System")]
    pub system: SystemState,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    #[serde(default)]
    pub application: Option<Application>,
    #[serde(default)]
    pub device: Option<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default)]
    pub device_id: Option<String>,
    /// Interfaces keyed by name; the values are interface-specific metadata.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub supported_interfaces: serde_json::Map<String, Value>,
}

/// The `request` object of the envelope.
///
/// Fields that only apply to some request types are optional; use
/// [`RequestBody::kind`] to get the classified request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub request_type: String,
    pub request_id: String,
    /// ISO 8601 time the platform sent the request, kept as received.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub intent: Option<IntentRef>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub error: Option<SessionEndedError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntentRef {
    pub name: String,
    #[serde(default)]
    pub confirmation_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionEndedError {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// The intents this skill understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Ornament,
    ScheduleLoss,
    Perils,
    Help,
    Cancel,
    Stop,
    Fallback,
    Repeat,
    /// Any intent name the interaction model sends that has no dedicated handler.
    Other(String),
}

impl Intent {
    /// Classifies a wire intent name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "OrnamentIntent" => Self::Ornament,
            "ScheduleLossIntent" => Self::ScheduleLoss,
            "PerilsIntent" => Self::Perils,
            "AMAZON.HelpIntent" => Self::Help,
            "AMAZON.CancelIntent" => Self::Cancel,
            "AMAZON.StopIntent" => Self::Stop,
            "AMAZON.FallbackIntent" => Self::Fallback,
            "AMAZON.RepeatIntent" => Self::Repeat,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire name of the intent.
    pub fn name(&self) -> &str {
        match self {
            Self::Ornament => "OrnamentIntent",
            Self::ScheduleLoss => "ScheduleLossIntent",
            Self::Perils => "PerilsIntent",
            Self::Help => "AMAZON.HelpIntent",
            Self::Cancel => "AMAZON.CancelIntent",
            Self::Stop => "AMAZON.StopIntent",
            Self::Fallback => "AMAZON.FallbackIntent",
            Self::Repeat => "AMAZON.RepeatIntent",
            Self::Other(name) => name,
        }
    }
}

/// Closed classification of the inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Launch,
    Intent(Intent),
    SessionEnded,
    /// A request type the skill does not handle (e.g. `System.ExceptionEncountered`).
    Unsupported(String),
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Launch => write!(f, "LaunchRequest"),
            RequestKind::Intent(intent) => write!(f, "IntentRequest({})", intent.name()),
            RequestKind::SessionEnded => write!(f, "SessionEndedRequest"),
            RequestKind::Unsupported(kind) => write!(f, "{}", kind),
        }
    }
}

impl RequestBody {
    pub fn kind(&self) -> RequestKind {
        match self.request_type.as_str() {
            "LaunchRequest" => RequestKind::Launch,
            // An intent request without an intent object is treated as unrecognised speech.
            "IntentRequest" => RequestKind::Intent(
                self.intent
                    .as_ref()
                    .map(|i| Intent::from_name(&i.name))
                    .unwrap_or(Intent::Fallback),
            ),
            "SessionEndedRequest" => RequestKind::SessionEnded,
            other => RequestKind::Unsupported(other.to_string()),
        }
    }
}

impl RequestEnvelope {
    /// Whether the requesting device can render APL visual documents.
    pub fn supports_apl(&self) -> bool {
        self.context
            .as_ref()
            .and_then(|c| c.system.device.as_ref())
            .is_some_and(|d| d.supported_interfaces.contains_key(APL_INTERFACE))
    }

    /// The skill application id, taken from the session or the system context.
    pub fn application_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.application.as_ref())
            .or_else(|| {
                self.context
                    .as_ref()
                    .and_then(|c| c.system.application.as_ref())
            })
            .map(|a| a.application_id.as_str())
    }
}
