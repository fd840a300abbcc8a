//! Generator configuration types
//!
//! This module defines the knobs that shape the generated C++ text:
//! namespace, identifier flavour, include guard prefix and banner.
//! Nothing here affects validation.

use serde::{Deserialize, Serialize};

/// Configuration for the code generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Namespace wrapping generated declarations (empty = none)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Which runtime identifier type the generated constants use
    #[serde(default)]
    pub identifier_style: IdentifierStyle,

    /// Optional prefix for include guards (e.g. "TF_")
    #[serde(default)]
    pub guard_prefix: Option<String>,

    /// License banner lines, emitted as `//` comments at the top of every file
    #[serde(default)]
    pub license_header: Vec<String>,

    /// Emit a `Creation Date` banner line (not deterministic)
    #[serde(default)]
    pub include_timestamp: bool,
}

fn default_namespace() -> String {
    "efis_signals".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            identifier_style: IdentifierStyle::default(),
            guard_prefix: None,
            license_header: Vec::new(),
            include_timestamp: false,
        }
    }
}

/// Runtime identifier type targeted by the generated constants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierStyle {
    /// `SignalID(category_id, sub_id)` constants named `SIGNAL_ID_<NAME>`
    #[default]
    SignalId,
    /// `SignalDef(category_id, sub_id, timeout)` constants named `SIGNAL_DEF_<NAME>`
    SignalDef,
}

impl IdentifierStyle {
    /// Runtime C++ type name
    pub fn type_name(&self) -> &'static str {
        match self {
            IdentifierStyle::SignalId => "SignalID",
            IdentifierStyle::SignalDef => "SignalDef",
        }
    }

    /// Prefix of generated constant names
    pub fn constant_prefix(&self) -> &'static str {
        match self {
            IdentifierStyle::SignalId => "SIGNAL_ID_",
            IdentifierStyle::SignalDef => "SIGNAL_DEF_",
        }
    }

    /// Base name of the generated identifier table files
    pub fn base_name(&self) -> &'static str {
        match self {
            IdentifierStyle::SignalId => "signal_id",
            IdentifierStyle::SignalDef => "signal_def",
        }
    }

    /// Runtime header declaring the identifier type
    pub fn runtime_header(&self) -> &'static str {
        match self {
            IdentifierStyle::SignalId => "signal_id.h",
            IdentifierStyle::SignalDef => "signal_def.h",
        }
    }

    /// Short word used in generated function and parameter names ("signal_id", "signal_def")
    pub fn function_noun(&self) -> &'static str {
        self.base_name()
    }

    /// Whether the constructor takes the timeout as a third argument
    pub fn includes_timeout(&self) -> bool {
        matches!(self, IdentifierStyle::SignalDef)
    }
}

impl GeneratorConfig {
    /// Create a new generator configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the namespace (empty disables namespacing)
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Builder method: set the identifier style
    pub fn with_identifier_style(mut self, style: IdentifierStyle) -> Self {
        self.identifier_style = style;
        self
    }

    /// Builder method: set the include guard prefix
    pub fn with_guard_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.guard_prefix = Some(prefix.into());
        self
    }

    /// Builder method: set the license banner
    pub fn with_license_header(mut self, lines: Vec<String>) -> Self {
        self.license_header = lines;
        self
    }

    /// Builder method: enable or disable the creation date banner line
    pub fn with_timestamp(mut self, enabled: bool) -> Self {
        self.include_timestamp = enabled;
        self
    }

    pub fn namespace(&self) -> Option<&str> {
        if self.namespace.is_empty() {
            None
        } else {
            Some(&self.namespace)
        }
    }

    /// Comment lines placed at the top of every generated file
    pub fn banner_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .license_header
            .iter()
            .map(|line| {
                if line.is_empty() {
                    "//".to_string()
                } else {
                    format!("// {}", line)
                }
            })
            .collect();

        if !lines.is_empty() {
            lines.push(String::new());
        }

        lines.push("// This file is auto-generated".to_string());
        if self.include_timestamp {
            lines.push(format!(
                "// Creation Date: {} UTC",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S")
            ));
        }
        lines.push(String::new());
        lines
    }
}
