//! Generation units for C++ artifacts
//!
//! - [`section`] - per-signal blocks of lines ([`Section`])
//! - [`file`] - header/source assembly and writing ([`CodeFile`])
//! - [`lookup`] - if/else-chain lookup functions ([`LookupFunction`])

pub mod file;
pub mod lookup;
pub mod section;

pub use file::{check_target_dir, CodeFile, FileKind, Include};
pub use lookup::{
    Branch, BranchPrinter, LookupDeclaration, LookupDefinition, LookupFunction, LookupSections,
};
pub use section::{indent_line, CodegenUnit, NoSignalLines, Section, SignalPrinter, INDENT_UNIT};
