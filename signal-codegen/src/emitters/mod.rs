//! Artifact emitters
//!
//! Recipes that compose sections and lookup functions into the generated
//! files consumed by the runtime signal framework.

pub mod database;
pub mod identifiers;

pub use database::{database_file, format_resolution, format_scientific};
pub use identifiers::{constant_name, identifier_files, VERSION_CONSTANT};

use crate::codegen::CodeFile;
use crate::config::GeneratorConfig;

/// The canonical artifact set, in write order
pub fn default_artifacts(config: &GeneratorConfig) -> Vec<CodeFile> {
    let (header, source) = identifier_files(config);
    vec![header, source, database_file(config)]
}
