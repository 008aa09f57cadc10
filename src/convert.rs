//! Artifact format conversion.
//!
//! PDF downloads convert the DOCX artifact through the LibreOffice CLI. The
//! converter sits behind a trait so handlers and tests stay independent of
//! the external binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;
use thiserror::Error;

/// Errors that can occur during format conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no output directory for {}", .0.display())]
    NoOutputDir(PathBuf),
    #[error("failed to run converter: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("converter exited with status {0}")]
    Exit(i32),
    #[error("converter produced no output at {}", .0.display())]
    MissingOutput(PathBuf),
}

/// Converts an artifact to PDF, returning the converted file path.
pub trait FormatConverter {
    fn convert_to_pdf(&self, input: &Path) -> Result<PathBuf, ConvertError>;
}

/// PDF conversion through the LibreOffice CLI (`soffice --headless`).
///
/// The converted file lands next to the input with a `.pdf` extension, which
/// is where `--outdir` puts it.
pub struct LibreOfficeConverter {
    binary: String,
}

impl LibreOfficeConverter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl FormatConverter for LibreOfficeConverter {
    fn convert_to_pdf(&self, input: &Path) -> Result<PathBuf, ConvertError> {
        let out_dir = input
            .parent()
            .ok_or_else(|| ConvertError::NoOutputDir(input.to_path_buf()))?;
        let output = input.with_extension("pdf");

        debug!("Converting {} to PDF via {}", input.display(), self.binary);
        let status = Command::new(&self.binary)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(out_dir)
            .arg(input)
            .status()
            .map_err(ConvertError::Spawn)?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(ConvertError::Exit(code));
        }
        if !output.is_file() {
            return Err(ConvertError::MissingOutput(output));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_a_spawn_error() {
        let converter = LibreOfficeConverter::new("soffice-binary-that-does-not-exist");
        let result = converter.convert_to_pdf(Path::new("/tmp/input.docx"));
        assert!(matches!(result, Err(ConvertError::Spawn(_))));
    }
}
