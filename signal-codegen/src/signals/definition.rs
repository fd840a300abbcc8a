//! Signal definition model
//!
//! One record per signal: its wire identity, documentation, timeout and the
//! variant-specific parameters used when instantiating the runtime class.

use std::fmt;

/// Symbolic resolutions accepted in place of a numeric literal
pub const RESOLUTION_ALIASES: &[(&str, f64)] = &[
    // Semicircles to degrees
    ("semi2deg", 180.0 / 2147483648.0),
];

/// Resolve a symbolic resolution name (e.g. `semi2deg`)
pub fn resolve_resolution_alias(alias: &str) -> Option<f64> {
    RESOLUTION_ALIASES
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, value)| *value)
}

/// A single signal definition
#[derive(Debug, Clone, PartialEq)]
pub struct SignalDefinition {
    /// Category ID (first half of the wire identity)
    pub category_id: u8,
    /// Sub-category ID (second half of the wire identity)
    pub sub_id: u8,
    /// Unique symbolic name
    pub name: String,
    /// Human-readable description, echoed into generated comments
    pub description: String,
    /// Staleness threshold in milliseconds
    pub timeout_ms: u32,
    /// Variant and its parameters
    pub kind: SignalKind,
}

/// The closed set of supported signal variants
#[derive(Debug, Clone, PartialEq)]
pub enum SignalKind {
    /// Plain signal without extra parameters
    Base,
    /// Integer-valued signal
    Integer,
    /// Floating point value carried as a scaled integer
    Scaled {
        /// Multiplier from network units to engineering units
        resolution: f64,
        /// Engineering unit (e.g. "deg", "ft")
        units: Option<String>,
    },
    /// Fixed-size byte payload
    Data {
        /// Payload size in bytes
        size: u8,
    },
}

/// Discriminant of [`SignalKind`], used for dispatch and statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalKindTag {
    Base,
    Integer,
    Scaled,
    Data,
}

impl SignalKindTag {
    /// All tags, in the order used for generated include lists
    pub const ALL: [SignalKindTag; 4] = [
        SignalKindTag::Base,
        SignalKindTag::Integer,
        SignalKindTag::Scaled,
        SignalKindTag::Data,
    ];

    /// Parse a schema `type` discriminator
    pub fn from_schema_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "base" => Some(SignalKindTag::Base),
            "integer" | "int" => Some(SignalKindTag::Integer),
            "scaled" | "fixed" => Some(SignalKindTag::Scaled),
            "data" => Some(SignalKindTag::Data),
            _ => None,
        }
    }

    /// Canonical schema tag
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKindTag::Base => "base",
            SignalKindTag::Integer => "integer",
            SignalKindTag::Scaled => "scaled",
            SignalKindTag::Data => "data",
        }
    }

    /// Runtime signal class instantiated for this variant
    pub fn runtime_class(&self) -> &'static str {
        match self {
            SignalKindTag::Base => "SignalTypeBase",
            SignalKindTag::Integer => "SignalTypeInteger",
            SignalKindTag::Scaled => "SignalTypeScaled",
            SignalKindTag::Data => "SignalTypeData",
        }
    }

    /// Header declaring the runtime signal class
    pub fn runtime_header(&self) -> &'static str {
        match self {
            SignalKindTag::Base => "signal_type_base.h",
            SignalKindTag::Integer => "signal_type_int.h",
            SignalKindTag::Scaled => "signal_type_scaled.h",
            SignalKindTag::Data => "signal_type_data.h",
        }
    }
}

impl fmt::Display for SignalKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SignalKind {
    pub fn tag(&self) -> SignalKindTag {
        match self {
            SignalKind::Base => SignalKindTag::Base,
            SignalKind::Integer => SignalKindTag::Integer,
            SignalKind::Scaled { .. } => SignalKindTag::Scaled,
            SignalKind::Data { .. } => SignalKindTag::Data,
        }
    }
}

impl SignalDefinition {
    /// Create a base signal definition
    pub fn new(
        category_id: u8,
        sub_id: u8,
        name: impl Into<String>,
        description: impl Into<String>,
        timeout_ms: u32,
    ) -> Self {
        Self {
            category_id,
            sub_id,
            name: name.into(),
            description: description.into(),
            timeout_ms,
            kind: SignalKind::Base,
        }
    }

    /// Builder method: replace the variant
    pub fn with_kind(mut self, kind: SignalKind) -> Self {
        self.kind = kind;
        self
    }

    /// Index of the signal in the runtime registration array
    pub fn signal_index(&self) -> u16 {
        (self.category_id as u16) * 256 + self.sub_id as u16
    }

    /// Upper-cased name used for generated constants
    pub fn constant_suffix(&self) -> String {
        self.name.to_ascii_uppercase()
    }

    /// Lower-cased name used for generated variables
    pub fn variable_suffix(&self) -> String {
        self.name.to_ascii_lowercase()
    }

    pub fn resolution(&self) -> Option<f64> {
        match &self.kind {
            SignalKind::Scaled { resolution, .. } => Some(*resolution),
            _ => None,
        }
    }
}

/// Check that a name can be embedded in a C++ identifier
pub fn is_valid_signal_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
