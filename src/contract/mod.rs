//! Contract document generation - templates, rendering, and per-kind generators.
//!
//! Each document kind owns a binary DOCX template under the configured
//! templates directory and an output directory for generated artifacts:
//! - `Employment` - employment contracts for project staff
//! - `Leave` - leave contracts

pub mod common;
pub mod employment;
pub mod engine;
pub mod handlers;
pub mod leave;
pub mod template;
pub mod traits;
pub mod validation;

pub use employment::{EmploymentContractGenerator, EmploymentContractRequest};
pub use engine::DocxRenderEngine;
pub use leave::{LeaveContractGenerator, LeaveContractRequest};
pub use template::TemplateStore;
pub use traits::{Generator, Validator};

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Document kinds served by this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Employment,
    Leave,
}

impl DocumentKind {
    /// Template file name under the templates directory.
    pub fn template_file_name(self) -> &'static str {
        match self {
            DocumentKind::Employment => "contract_template.docx",
            DocumentKind::Leave => "leave_template.docx",
        }
    }

    /// Subdirectory under the generated root, if any. Employment contracts
    /// live at the root itself; leave contracts get their own subtree.
    pub fn output_subdir(self) -> Option<&'static str> {
        match self {
            DocumentKind::Employment => None,
            DocumentKind::Leave => Some("leave_contracts"),
        }
    }

    /// Suffix appended to the sanitized subject name in client-facing
    /// attachment names.
    pub fn file_suffix(self) -> &'static str {
        match self {
            DocumentKind::Employment => "Contract",
            DocumentKind::Leave => "Leave_Contract",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Employment => write!(f, "employment_contract"),
            DocumentKind::Leave => write!(f, "leave_contract"),
        }
    }
}

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("template not found at {}", .0.display())]
    TemplateNotFound(PathBuf),
    #[error("failed to read template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("failed to open template archive: {0}")]
    ArchiveOpen(#[source] zip::result::ZipError),
    #[error("template archive operation failed: {0}")]
    Archive(#[source] zip::result::ZipError),
    #[error("failed to process archive entry {name}: {source}")]
    ArchiveIo {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write generated document: {0}")]
    OutputIo(#[source] std::io::Error),
}

/// Result of a successful document generation.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub id: Uuid,
    pub kind: DocumentKind,
    /// Client-facing attachment name.
    pub file_name: String,
    /// On-disk location, unique per generation.
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
}
