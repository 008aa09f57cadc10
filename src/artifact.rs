//! In-memory artifact registry.
//!
//! Generated artifacts are keyed by a per-request UUID; a download must
//! present the id it was given at synthesis time. The registry is the
//! hand-off point between synthesis and transfer - caller-supplied filenames
//! never take part in path construction.

use std::collections::HashMap;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::contract::GeneratedArtifact;

/// Registry of artifacts awaiting download.
#[derive(Default)]
pub struct ArtifactRegistry {
    inner: Mutex<HashMap<Uuid, GeneratedArtifact>>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly generated artifact under its id.
    pub fn register(&self, artifact: GeneratedArtifact) -> Uuid {
        let id = artifact.id;
        self.inner.lock().insert(id, artifact);
        id
    }

    /// Look up an artifact without removing it.
    pub fn get(&self, id: &Uuid) -> Option<GeneratedArtifact> {
        self.inner.lock().get(id).cloned()
    }

    /// Remove an artifact. Concurrent downloads of the same id race here;
    /// only the caller that receives `Some` owns the on-disk cleanup.
    pub fn remove(&self, id: &Uuid) -> Option<GeneratedArtifact> {
        self.inner.lock().remove(id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::DocumentKind;
    use chrono::Utc;
    use std::path::PathBuf;

    fn sample_artifact() -> GeneratedArtifact {
        GeneratedArtifact {
            id: Uuid::new_v4(),
            kind: DocumentKind::Employment,
            file_name: "Jane_Doe_Contract.docx".to_string(),
            path: PathBuf::from("/tmp/generated/x.docx"),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_register_and_get() {
        let registry = ArtifactRegistry::new();
        let artifact = sample_artifact();
        let id = registry.register(artifact);

        let found = registry.get(&id).unwrap();
        assert_eq!(found.file_name, "Jane_Doe_Contract.docx");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_yields_record_once() {
        let registry = ArtifactRegistry::new();
        let id = registry.register(sample_artifact());

        assert!(registry.remove(&id).is_some());
        assert!(registry.remove(&id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_unknown_id() {
        let registry = ArtifactRegistry::new();
        assert!(registry.get(&Uuid::new_v4()).is_none());
    }
}
