//! Template storage and per-kind output directories.

use std::fs;
use std::path::PathBuf;

use log::{debug, error};

use super::{DocumentKind, GeneratorError};

/// Read access to the document templates and the per-kind output tree.
///
/// Templates are created out-of-band and never mutated here; the store only
/// reads them and guarantees the output directory exists before a write.
pub struct TemplateStore {
    templates_dir: PathBuf,
    output_root: PathBuf,
}

impl TemplateStore {
    pub fn new(templates_dir: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            output_root: output_root.into(),
        }
    }

    /// Path of the template file for a kind.
    pub fn template_path(&self, kind: DocumentKind) -> PathBuf {
        self.templates_dir.join(kind.template_file_name())
    }

    /// Output directory for generated artifacts of a kind.
    pub fn output_dir(&self, kind: DocumentKind) -> PathBuf {
        match kind.output_subdir() {
            Some(subdir) => self.output_root.join(subdir),
            None => self.output_root.clone(),
        }
    }

    /// Idempotently create the output directory for a kind.
    ///
    /// Failures are logged and swallowed; a missing directory surfaces later
    /// as a write failure on the artifact itself.
    pub fn ensure_output_dir(&self, kind: DocumentKind) {
        let dir = self.output_dir(kind);
        if let Err(e) = fs::create_dir_all(&dir) {
            error!("Failed to create output directory {}: {}", dir.display(), e);
        }
    }

    /// Load the raw template bytes for a kind.
    ///
    /// Templates are read fresh on every call; nothing is cached between
    /// requests.
    pub fn load_template(&self, kind: DocumentKind) -> Result<Vec<u8>, GeneratorError> {
        let path = self.template_path(kind);
        if !path.is_file() {
            return Err(GeneratorError::TemplateNotFound(path));
        }
        debug!("Loading template for {} from {}", kind, path.display());
        fs::read(&path).map_err(GeneratorError::TemplateIo)
    }
}
