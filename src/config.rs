//! Runtime configuration resolved from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::Context;

/// Server configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the binary document templates, one file per kind.
    pub templates_dir: PathBuf,
    /// Root directory for generated artifacts.
    pub output_root: PathBuf,
    pub host: String,
    pub port: u16,
    /// LibreOffice binary used for PDF conversion.
    pub soffice_bin: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let templates_dir =
            env::var("TEMPLATES_DIR").unwrap_or_else(|_| "./templates".to_string());
        let output_root = env::var("GENERATED_DIR").unwrap_or_else(|_| "./generated".to_string());
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value '{raw}'"))?,
            Err(_) => 8080,
        };
        let soffice_bin = env::var("SOFFICE_BIN").unwrap_or_else(|_| "soffice".to_string());

        Ok(Self {
            templates_dir: PathBuf::from(templates_dir),
            output_root: PathBuf::from(output_root),
            host,
            port,
            soffice_bin,
        })
    }
}
