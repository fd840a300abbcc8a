//! Core types for the signal code generator library
//!
//! This module defines the error taxonomy shared by the loader, the
//! validator and the file writers. Every error is fatal: nothing is retried
//! and nothing is partially recovered.

use std::fmt;
use std::path::PathBuf;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur while loading a schema or writing artifacts
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// Malformed input, unknown variant tag or invalid version.
    /// Holds every structural issue found, not only the first one.
    #[error("Invalid signal schema: {}", .0.join("; "))]
    Schema(Vec<String>),

    /// Duplicate names or duplicate (category, sub) pairs
    #[error("Signal uniqueness violated: {}", join_violations(.0))]
    Uniqueness(Vec<UniquenessViolation>),

    #[error("Invalid target directory {path:?}: {reason}")]
    TargetDirectory { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CodegenError {
    /// Build a schema error from a single issue
    pub fn schema(issue: impl Into<String>) -> Self {
        CodegenError::Schema(vec![issue.into()])
    }

    pub fn is_schema_error(&self) -> bool {
        matches!(self, CodegenError::Schema(_))
    }

    pub fn is_uniqueness_error(&self) -> bool {
        matches!(self, CodegenError::Uniqueness(_))
    }

    pub fn is_target_directory_error(&self) -> bool {
        matches!(self, CodegenError::TargetDirectory { .. })
    }

    /// All uniqueness violations carried by this error (empty for other kinds)
    pub fn violations(&self) -> &[UniquenessViolation] {
        match self {
            CodegenError::Uniqueness(violations) => violations,
            _ => &[],
        }
    }
}

/// A single collision between two signal definitions
///
/// `first` and `second` identify the colliding signals in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniquenessViolation {
    /// Two signals share a name (compared case-insensitively).
    /// Positions are 1-based declaration positions.
    DuplicateName { name: String, first: usize, second: usize },

    /// Two signals share a (category, sub) identifier
    DuplicateId {
        category_id: u8,
        sub_id: u8,
        first: String,
        second: String,
    },
}

impl fmt::Display for UniquenessViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniquenessViolation::DuplicateName { name, first, second } => write!(
                f,
                "duplicate signal name '{}' (signals #{} and #{})",
                name, first, second
            ),
            UniquenessViolation::DuplicateId {
                category_id,
                sub_id,
                first,
                second,
            } => write!(
                f,
                "duplicate signal id ({}, {}) shared by '{}' and '{}'",
                category_id, sub_id, first, second
            ),
        }
    }
}

fn join_violations(violations: &[UniquenessViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
