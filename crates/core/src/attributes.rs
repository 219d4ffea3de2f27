//! Per-conversation session attributes.
//!
//! The host platform sends the attribute bag with every request of a session
//! and stores whatever the skill echoes back in its response.

use crate::error::SkillError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Key holding the last spoken content, read back by the repeat handler.
pub const REPEAT_SPEECH_OUTPUT: &str = "repeat_speech_output";
/// Key holding the reprompt that accompanied the last spoken content.
pub const REPEAT_REPROMPT: &str = "repeat_reprompt";

/// A string-keyed bag of JSON values scoped to one conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(value_type = Object)]
pub struct SessionAttributes(HashMap<String, Value>);

/// The utterance recovered from the session for a repeat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatState {
    pub speech_output: String,
    pub reprompt: String,
}

impl SessionAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts a value, replacing any previous value under the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a string attribute.
    ///
    /// Returns `Ok(None)` when the key is absent and
    /// `SkillError::InvalidAttribute` when it holds a non-string value.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, SkillError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(SkillError::InvalidAttribute(key.to_string())),
        }
    }

    /// Records the utterance a later repeat request should play back.
    pub fn remember(&mut self, speech_output: &str, reprompt: &str) {
        self.set(REPEAT_SPEECH_OUTPUT, speech_output);
        self.set(REPEAT_REPROMPT, reprompt);
    }

    /// Recovers the last remembered utterance, if both halves are present.
    pub fn repeat_state(&self) -> Result<Option<RepeatState>, SkillError> {
        let speech_output = self.get_str(REPEAT_SPEECH_OUTPUT)?;
        let reprompt = self.get_str(REPEAT_REPROMPT)?;
        Ok(match (speech_output, reprompt) {
            (Some(speech_output), Some(reprompt)) => Some(RepeatState {
                speech_output: speech_output.to_string(),
                reprompt: reprompt.to_string(),
            }),
            _ => None,
        })
    }
}

impl From<HashMap<String, Value>> for SessionAttributes {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}
