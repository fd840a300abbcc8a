//! Main generator API
//!
//! This module provides the primary interface for the library. The
//! `SignalGenerator` struct loads a schema and writes the artifact set for
//! it into a target directory.

use crate::codegen::check_target_dir;
use crate::config::GeneratorConfig;
use crate::emitters::default_artifacts;
use crate::signals::{load_schema_file, SignalSchema};
use crate::types::Result;
use std::path::{Path, PathBuf};

/// A rendered artifact, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// File name relative to the target directory
    pub file_name: String,
    /// Full file contents
    pub contents: String,
}

/// The main generator struct - entry point for all generation operations
pub struct SignalGenerator {
    config: GeneratorConfig,
}

impl SignalGenerator {
    /// Create a generator with the default configuration
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Load and validate a schema file
    ///
    /// # Example
    /// ```no_run
    /// use signal_codegen::SignalGenerator;
    /// use std::path::Path;
    ///
    /// let generator = SignalGenerator::new();
    /// let schema = generator.load_schema(Path::new("signals.json")).unwrap();
    /// println!("{} signals", schema.len());
    /// ```
    pub fn load_schema(&self, path: &Path) -> Result<SignalSchema> {
        load_schema_file(path)
    }

    /// Render every artifact in memory without touching the filesystem
    pub fn render(&self, schema: &SignalSchema) -> Vec<RenderedFile> {
        default_artifacts(&self.config)
            .into_iter()
            .map(|mut file| {
                file.render(schema);
                RenderedFile {
                    file_name: file.file_name(),
                    contents: file.contents(),
                }
            })
            .collect()
    }

    /// Render every artifact and write them into `target_dir`
    ///
    /// The target directory is checked before anything is rendered, and all
    /// files are rendered before the first one is written.
    ///
    /// # Returns
    /// * Paths of the written files, in write order
    pub fn generate(&self, schema: &SignalSchema, target_dir: &Path) -> Result<Vec<PathBuf>> {
        check_target_dir(target_dir)?;

        let rendered = self.render(schema);

        let mut written = Vec::with_capacity(rendered.len());
        for file in rendered {
            let path = target_dir.join(&file.file_name);
            std::fs::write(&path, file.contents)?;
            log::info!("Wrote {:?}", path);
            written.push(path);
        }

        log::info!(
            "Generated {} files for {} signals (schema v{})",
            written.len(),
            schema.len(),
            schema.version()
        );
        Ok(written)
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::new()
    }
}
