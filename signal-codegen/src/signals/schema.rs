//! Validated signal schema
//!
//! Holds the signal definitions in declaration order plus a name index
//! built once at construction. A schema is immutable after it has been
//! validated; emitters only ever borrow it.

use crate::signals::definition::{SignalDefinition, SignalKindTag};
use crate::types::{CodegenError, Result, UniquenessViolation};
use std::collections::{BTreeMap, HashMap};

/// The validated, immutable signal schema
#[derive(Debug, Clone)]
pub struct SignalSchema {
    /// Schema version (always > 0)
    version: u32,

    /// Definitions in declaration order (authoritative generation order)
    definitions: Vec<SignalDefinition>,

    /// Name lookup for quick access
    /// Key: signal name, Value: index into `definitions`
    name_lookup: HashMap<String, usize>,
}

impl SignalSchema {
    /// Validate the definitions and build the schema
    ///
    /// Every check runs over the full definition set before returning, so a
    /// failure lists all duplicate names and all duplicate ids found.
    pub fn new(version: i64, definitions: Vec<SignalDefinition>) -> Result<Self> {
        Self::validated(Some(version), definitions, Vec::new())
    }

    /// Run the schema-wide checks on top of the issues already found
    ///
    /// Uniqueness is checked even when other issues exist. If there are any
    /// structural issues, duplicates are appended to them and the whole list
    /// comes back as one `Schema` error.
    pub(crate) fn validated(
        version: Option<i64>,
        definitions: Vec<SignalDefinition>,
        mut issues: Vec<String>,
    ) -> Result<Self> {
        let version = match version.map(validate_version) {
            Some(Ok(version)) => Some(version),
            Some(Err(issue)) => {
                issues.insert(0, issue);
                None
            }
            None => {
                if issues.is_empty() {
                    issues.push("missing schema version".to_string());
                }
                None
            }
        };

        let violations = find_uniqueness_violations(&definitions);

        let version = match version {
            Some(version) if issues.is_empty() => version,
            _ => {
                issues.extend(violations.iter().map(ToString::to_string));
                return Err(CodegenError::Schema(issues));
            }
        };
        if !violations.is_empty() {
            return Err(CodegenError::Uniqueness(violations));
        }

        let name_lookup = definitions
            .iter()
            .enumerate()
            .map(|(idx, def)| (def.name.clone(), idx))
            .collect();

        Ok(Self {
            version,
            definitions,
            name_lookup,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate definitions in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, SignalDefinition> {
        self.definitions.iter()
    }

    pub fn definitions(&self) -> &[SignalDefinition] {
        &self.definitions
    }

    /// Get a signal definition by its exact name
    pub fn get(&self, name: &str) -> Option<&SignalDefinition> {
        self.name_lookup
            .get(name)
            .and_then(|idx| self.definitions.get(*idx))
    }

    /// Get a signal definition by its wire identity
    pub fn get_by_id(&self, category_id: u8, sub_id: u8) -> Option<&SignalDefinition> {
        self.definitions
            .iter()
            .find(|def| def.category_id == category_id && def.sub_id == sub_id)
    }

    /// Definitions ordered by `category_id * 256 + sub_id`
    ///
    /// This is a derived view; declaration order is left untouched.
    pub fn sorted_by_id(&self) -> Vec<&SignalDefinition> {
        let mut sorted: Vec<&SignalDefinition> = self.definitions.iter().collect();
        sorted.sort_by_key(|def| def.signal_index());
        sorted
    }

    /// Get schema statistics
    pub fn stats(&self) -> SchemaStats {
        let mut per_kind = BTreeMap::new();
        for def in &self.definitions {
            *per_kind.entry(def.kind.tag()).or_insert(0) += 1;
        }

        SchemaStats {
            version: self.version,
            num_signals: self.definitions.len(),
            per_kind,
        }
    }
}

impl<'a> IntoIterator for &'a SignalSchema {
    type Item = &'a SignalDefinition;
    type IntoIter = std::slice::Iter<'a, SignalDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}

/// Schema statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStats {
    pub version: u32,
    /// Total number of signal definitions
    pub num_signals: usize,
    /// Number of signals per variant
    pub per_kind: BTreeMap<SignalKindTag, usize>,
}

/// Check that a raw version number is a positive 32-bit integer
pub(crate) fn validate_version(version: i64) -> std::result::Result<u32, String> {
    if version <= 0 {
        return Err(format!("version must be a positive integer, got {}", version));
    }
    u32::try_from(version).map_err(|_| format!("version {} is out of range", version))
}

/// Pairwise scan for duplicate names and duplicate (category, sub) pairs
///
/// Quadratic on purpose: schemas hold at most a few hundred signals.
pub(crate) fn find_uniqueness_violations(
    definitions: &[SignalDefinition],
) -> Vec<UniquenessViolation> {
    let mut violations = Vec::new();

    for (i, a) in definitions.iter().enumerate() {
        for (j, b) in definitions.iter().enumerate().skip(i + 1) {
            if a.name.eq_ignore_ascii_case(&b.name) {
                violations.push(UniquenessViolation::DuplicateName {
                    name: b.name.clone(),
                    first: i + 1,
                    second: j + 1,
                });
            }
        }
    }

    for (i, a) in definitions.iter().enumerate() {
        for b in definitions.iter().skip(i + 1) {
            if a.category_id == b.category_id && a.sub_id == b.sub_id {
                violations.push(UniquenessViolation::DuplicateId {
                    category_id: a.category_id,
                    sub_id: a.sub_id,
                    first: a.name.clone(),
                    second: b.name.clone(),
                });
            }
        }
    }

    violations
}
