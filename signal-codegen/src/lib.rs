//! Signal Code Generator Library
//!
//! Compiles a versioned schema of signal definitions into the C++ sources
//! consumed by the runtime signal framework (`SignalID`/`SignalDef`, the
//! `SignalType*` classes and `SignalDatabase`).
//!
//! # Architecture
//!
//! - [`signals`] parses the schema (JSON or legacy CSV) and validates it
//!   into an immutable [`SignalSchema`]
//! - [`codegen`] provides the generation units: per-signal [`Section`]s,
//!   header/source [`CodeFile`]s and if/else-chain [`LookupFunction`]s
//! - [`emitters`] composes those units into the identifier table and the
//!   database initializer
//!
//! Generation is a deterministic one-shot batch: load → validate → render →
//! write. Nothing is written unless the schema is valid and the target is
//! an existing directory.
//!
//! # Example Usage
//!
//! ```no_run
//! use signal_codegen::{GeneratorConfig, IdentifierStyle, SignalGenerator};
//! use std::path::Path;
//!
//! let config = GeneratorConfig::new()
//!     .with_namespace("efis_signals")
//!     .with_identifier_style(IdentifierStyle::SignalId);
//! let generator = SignalGenerator::with_config(config);
//!
//! let schema = generator.load_schema(Path::new("signals.json")).unwrap();
//! let written = generator.generate(&schema, Path::new("generated")).unwrap();
//!
//! for path in written {
//!     println!("wrote {:?}", path);
//! }
//! ```

// Public modules
pub mod codegen;
pub mod config;
pub mod emitters;
pub mod generator;
pub mod signals;
pub mod types;

// Re-export main types for convenience
pub use codegen::{
    Branch, BranchPrinter, CodeFile, CodegenUnit, FileKind, LookupFunction, Section,
    SignalPrinter,
};
pub use config::{GeneratorConfig, IdentifierStyle};
pub use generator::{RenderedFile, SignalGenerator};
pub use signals::{
    load_schema_file, load_schema_str, SchemaFormat, SchemaStats, SignalDefinition, SignalKind,
    SignalKindTag, SignalSchema,
};
pub use types::{CodegenError, Result, UniquenessViolation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
