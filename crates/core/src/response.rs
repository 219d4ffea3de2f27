//! Outbound Response Envelope
//!
//! Defines the JSON shape returned to the platform for every turn and a small
//! builder that mirrors the platform SDK semantics: `ask` keeps the session
//! open, `end_session` closes it, and a response that does neither leaves the
//! decision to the platform.

use crate::attributes::SessionAttributes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Directive type that renders an APL document on a screen device.
pub const RENDER_DOCUMENT: &str = "Alexa.Presentation.APL.RenderDocument";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: SessionAttributes,
    pub response: ResponseBody,
}

impl ResponseEnvelope {
    pub fn new(session_attributes: SessionAttributes, response: ResponseBody) -> Self {
        Self {
            version: "1.0".to_string(),
            session_attributes,
            response,
        }
    }
}

/// The `response` object: what the device should say, show and do next.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

impl ResponseBody {
    /// The SSML payload of the main speech, if any.
    pub fn speech_ssml(&self) -> Option<&str> {
        self.output_speech.as_ref().map(|s| s.ssml.as_str())
    }

    /// The SSML payload of the reprompt, if any.
    pub fn reprompt_ssml(&self) -> Option<&str> {
        self.reprompt
            .as_ref()
            .map(|r| r.output_speech.ssml.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SpeechType {
    #[serde(rename = "SSML")]
    Ssml,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: SpeechType,
    pub ssml: String,
}

impl OutputSpeech {
    /// Wraps plain text in a `<speak>` element.
    ///
    /// The text is escaped, so markup in it is spoken rather than interpreted.
    pub fn ssml(text: &str) -> Self {
        Self {
            speech_type: SpeechType::Ssml,
            ssml: format!("<speak>{}</speak>", escape_text(text)),
        }
    }
}

/// Escapes the characters that would otherwise end or open SSML markup.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// A directive instructing the device to do something besides speaking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Directive {
    #[serde(rename = "type")]
    pub directive_type: String,
    pub token: String,
    /// The APL document, passed through unchanged.
    #[schema(value_type = Object)]
    pub document: Value,
    #[schema(value_type = Object)]
    pub datasources: Value,
}

impl Directive {
    /// Builds an APL RenderDocument directive.
    pub fn render_document(token: &str, document: Value, datasources: Value) -> Self {
        Self {
            directive_type: RENDER_DOCUMENT.to_string(),
            token: token.to_string(),
            document,
            datasources,
        }
    }
}

/// Fluent builder for a [`ResponseBody`].
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    body: ResponseBody,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, text: &str) -> Self {
        self.body.output_speech = Some(OutputSpeech::ssml(text));
        self
    }

    /// Sets the reprompt and keeps the session open for the user's answer.
    pub fn ask(mut self, text: &str) -> Self {
        self.body.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::ssml(text),
        });
        self.body.should_end_session = Some(false);
        self
    }

    pub fn add_directive(mut self, directive: Directive) -> Self {
        self.body.directives.push(directive);
        self
    }

    pub fn end_session(mut self, end: bool) -> Self {
        self.body.should_end_session = Some(end);
        self
    }

    pub fn build(self) -> ResponseBody {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_serializes_to_empty_object() {
        let body = ResponseBuilder::new().build();
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({}));
    }

    #[test]
    fn test_speak_and_ask_keep_session_open() {
        let body = ResponseBuilder::new()
            .speak("Hello")
            .ask("Anything else?")
            .build();

        assert_eq!(body.speech_ssml(), Some("<speak>Hello</speak>"));
        assert_eq!(body.reprompt_ssml(), Some("<speak>Anything else?</speak>"));
        assert_eq!(body.should_end_session, Some(false));

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["outputSpeech"]["type"], "SSML");
        assert_eq!(
            value["reprompt"]["outputSpeech"]["ssml"],
            "<speak>Anything else?</speak>"
        );
        assert_eq!(value["shouldEndSession"], false);
        assert!(value.get("directives").is_none());
    }

    #[test]
    fn test_end_session_without_reprompt() {
        let body = ResponseBuilder::new().speak("Bye").end_session(true).build();
        assert!(body.reprompt.is_none());
        assert_eq!(body.should_end_session, Some(true));
    }

    #[test]
    fn test_render_document_directive_shape() {
        let directive = Directive::render_document(
            "simpleDisplayTemplate",
            json!({"type": "APL"}),
            json!({"message": {"text": "Hi"}}),
        );
        let body = ResponseBuilder::new().add_directive(directive).build();

        let value = serde_json::to_value(&body).unwrap();
        let directive = &value["directives"][0];
        assert_eq!(directive["type"], RENDER_DOCUMENT);
        assert_eq!(directive["token"], "simpleDisplayTemplate");
        assert_eq!(directive["document"]["type"], "APL");
        assert_eq!(directive["datasources"]["message"]["text"], "Hi");
    }

    #[test]
    fn test_ssml_escapes_markup_characters() {
        let speech = OutputSpeech::ssml("Fire & theft <audio src='x'/> > 0");
        assert_eq!(
            speech.ssml,
            "<speak>Fire &amp; theft &lt;audio src='x'/&gt; &gt; 0</speak>"
        );

        let plain = OutputSpeech::ssml("I haven't said anything yet.");
        assert_eq!(plain.ssml, "<speak>I haven't said anything yet.</speak>");
    }

    #[test]
    fn test_envelope_uses_camel_case() {
        let mut attrs = SessionAttributes::new();
        attrs.remember("a", "b");
        let envelope = ResponseEnvelope::new(attrs, ResponseBody::default());

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["sessionAttributes"]["repeat_speech_output"], "a");
        assert_eq!(value["response"], json!({}));
    }
}
