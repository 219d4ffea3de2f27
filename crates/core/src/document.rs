//! Visual Template Documents
//!
//! Content handlers attach an APL document to their response when the device
//! has a screen. The document itself is authored outside this crate; a
//! `DocumentStore` only resolves a reference name to its JSON.

use crate::error::DocumentError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Reference name of the template the informational handlers render.
pub const SIMPLE_DISPLAY_TEMPLATE: &str = "simpleDisplayTemplate";

/// Resolves a template reference name to its JSON document.
///
/// Implementations must be shareable across concurrent invocations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Loads the document registered under `name`.
    async fn load(&self, name: &str) -> Result<Value, DocumentError>;
}

/// Reads `<root>/<name>.json` from disk on every call.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, DocumentError> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(DocumentError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{}.json", name)))
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn load(&self, name: &str) -> Result<Value, DocumentError> {
        let path = self.path_for(name)?;
        debug!(path = %path.display(), "Loading visual document");
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DocumentError::NotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }
}

/// Serves documents from memory.
#[derive(Default, Clone)]
pub struct InMemoryDocumentStore {
    documents: HashMap<String, Value>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, name: impl Into<String>, document: Value) -> Self {
        self.documents.insert(name.into(), document);
        self
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn load(&self, name: &str) -> Result<Value, DocumentError> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| DocumentError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fs_store_loads_json_document() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("simpleDisplayTemplate.json"),
            r#"{"type": "APL", "version": "1.8"}"#,
        )
        .unwrap();

        let store = FsDocumentStore::new(dir.path());
        let doc = store.load(SIMPLE_DISPLAY_TEMPLATE).await.unwrap();
        assert_eq!(doc, json!({"type": "APL", "version": "1.8"}));
    }

    #[tokio::test]
    async fn test_fs_store_missing_document() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());

        match store.load("absent").await {
            Err(DocumentError::NotFound(name)) => assert_eq!(name, "absent"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fs_store_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let store = FsDocumentStore::new(dir.path());

        assert!(matches!(
            store.load("broken").await,
            Err(DocumentError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_fs_store_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let store = FsDocumentStore::new(dir.path());

        for name in ["../etc/passwd", "nested/doc", "", ".."] {
            assert!(
                matches!(store.load(name).await, Err(DocumentError::InvalidName(_))),
                "name {:?} should be rejected",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryDocumentStore::new().with_document("doc", json!({"a": 1}));
        assert_eq!(store.load("doc").await.unwrap(), json!({"a": 1}));
        assert!(matches!(
            store.load("other").await,
            Err(DocumentError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_shipped_display_template_loads() {
        let store = FsDocumentStore::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../services/api/templates"
        ));
        let doc = store.load(SIMPLE_DISPLAY_TEMPLATE).await.unwrap();
        assert_eq!(doc["type"], "APL");
        assert!(doc["mainTemplate"].is_object());
    }
}
