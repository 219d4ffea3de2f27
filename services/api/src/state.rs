//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the configured
//! skill and the service configuration, and the startup routine that builds
//! the skill from the templates directory.

use crate::config::Config;
use anyhow::Context;
use homecover_core::{
    Skill,
    document::{DocumentStore, FsDocumentStore, SIMPLE_DISPLAY_TEMPLATE},
    interceptor::{RequestLogger, ResponseLogger},
};
use std::{path::Path, sync::Arc};
use tracing::info;

/// The shared application state, created once at startup and passed to all handlers.
/// All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub skill: Arc<Skill>,
    pub config: Arc<Config>,
}

/// Builds the skill over the templates directory.
///
/// Fails if the display template cannot be loaded, so a misconfigured
/// `TEMPLATES_PATH` stops the service instead of turning every screen-device
/// turn into the apology.
pub async fn build_skill(templates_path: &Path) -> anyhow::Result<Skill> {
    let documents = FsDocumentStore::new(templates_path);
    documents
        .load(SIMPLE_DISPLAY_TEMPLATE)
        .await
        .context("simpleDisplayTemplate.json not found in templates directory")?;
    info!(path = %templates_path.display(), "Display template loaded");

    Ok(Skill::builder(Arc::new(documents))
        .request_interceptor(Arc::new(RequestLogger))
        .response_interceptor(Arc::new(ResponseLogger))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use homecover_core::request::RequestEnvelope;
    use serde_json::json;

    fn shipped_templates() -> &'static Path {
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
    }

    #[tokio::test]
    async fn build_skill_fails_without_templates() {
        let err = build_skill(Path::new("./does-not-exist"))
            .await
            .err()
            .unwrap();
        assert!(
            err.to_string()
                .contains("simpleDisplayTemplate.json not found")
        );
    }

    #[tokio::test]
    async fn built_skill_renders_shipped_template() {
        let skill = build_skill(shipped_templates()).await.unwrap();
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "session": { "new": true, "sessionId": "amzn1.echo-api.session.boot" },
            "context": {
                "System": { "device": { "supportedInterfaces": { "Alexa.Presentation.APL": {} } } }
            },
            "request": { "type": "LaunchRequest", "requestId": "amzn1.echo-api.request.boot" }
        }))
        .unwrap();

        let out = skill.invoke(envelope).await;
        assert_eq!(out.response.directives.len(), 1);
        assert_eq!(out.response.directives[0].document["type"], "APL");
    }
}
