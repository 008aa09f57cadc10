//! Shared application state.

use std::sync::Arc;

use crate::artifact::ArtifactRegistry;
use crate::config::AppConfig;
use crate::contract::TemplateStore;
use crate::convert::{FormatConverter, LibreOfficeConverter};

pub struct AppState {
    pub config: AppConfig,
    pub registry: ArtifactRegistry,
    pub converter: Arc<dyn FormatConverter + Send + Sync>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let converter = Arc::new(LibreOfficeConverter::new(config.soffice_bin.clone()));
        Self::with_converter(config, converter)
    }

    pub fn with_converter(
        config: AppConfig,
        converter: Arc<dyn FormatConverter + Send + Sync>,
    ) -> Self {
        Self {
            config,
            registry: ArtifactRegistry::new(),
            converter,
        }
    }

    /// Template store over the configured directories. Constructed per use;
    /// templates are loaded fresh on every request.
    pub fn template_store(&self) -> TemplateStore {
        TemplateStore::new(
            self.config.templates_dir.clone(),
            self.config.output_root.clone(),
        )
    }
}
