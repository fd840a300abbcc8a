//! Signal model and schema loaders
//!
//! This module contains the signal definition model, the JSON and legacy
//! CSV schema parsers and the validated signal schema.

pub mod definition;
pub mod schema;
pub mod loader;

mod csv;
mod json;

// Re-export key types for convenience
pub use definition::{
    is_valid_signal_name, resolve_resolution_alias, SignalDefinition, SignalKind,
    SignalKindTag, RESOLUTION_ALIASES,
};
pub use loader::{load_schema_file, load_schema_str, SchemaFormat};
pub use schema::{SchemaStats, SignalSchema};
