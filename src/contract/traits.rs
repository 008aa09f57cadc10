//! Traits shared by the per-kind generators.

use super::{GeneratedArtifact, GeneratorError};

/// Trait for validating request payloads.
pub trait Validator {
    /// Validate the state of the object.
    fn validate(&self) -> Result<(), String>;
}

/// Trait for contract document generators.
pub trait Generator<Req> {
    /// Generate a document artifact from the request.
    fn generate(&self, request: Req) -> Result<GeneratedArtifact, GeneratorError>;
}
