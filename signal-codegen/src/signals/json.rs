//! JSON signal schema parser
//!
//! Reads the `{ "version": N, "signals": [...] }` document and converts
//! every record into a [`SignalDefinition`]. Problems are collected per
//! record instead of stopping at the first one.

use crate::signals::definition::{is_valid_signal_name, SignalDefinition};
use crate::signals::loader::{build_kind, RawResolution, RawSchema};
use serde_json::{Map, Value};

/// Parse JSON schema text into raw definitions plus every issue found
pub(crate) fn parse_json_schema(source: &str) -> RawSchema {
    let mut raw = RawSchema::default();

    let document: Value = match serde_json::from_str(source) {
        Ok(document) => document,
        Err(e) => {
            raw.issues.push(format!("malformed JSON: {}", e));
            return raw;
        }
    };

    let Some(root) = document.as_object() else {
        raw.issues
            .push("top-level JSON value must be an object".to_string());
        return raw;
    };

    match root.get("version") {
        None => raw.issues.push("missing field 'version'".to_string()),
        Some(value) => match value.as_i64() {
            Some(version) => raw.version = Some(version),
            None => raw.issues.push(format!(
                "version must be a positive integer, got {}",
                value
            )),
        },
    }

    let signals = match root.get("signals") {
        None => {
            raw.issues.push("missing field 'signals'".to_string());
            return raw;
        }
        Some(Value::Array(signals)) => signals,
        Some(other) => {
            raw.issues
                .push(format!("'signals' must be an array, got {}", type_name(other)));
            return raw;
        }
    };

    for (idx, record) in signals.iter().enumerate() {
        let position = idx + 1;
        match record.as_object() {
            Some(fields) => match convert_record(fields) {
                Ok(definition) => raw.definitions.push(definition),
                Err(errors) => {
                    let label = record_label(position, fields);
                    raw.issues
                        .extend(errors.into_iter().map(|e| format!("{}: {}", label, e)));
                }
            },
            None => raw.issues.push(format!(
                "signal #{}: record must be an object, got {}",
                position,
                type_name(record)
            )),
        }
    }

    log::debug!(
        "Parsed {} JSON signal records ({} issues)",
        raw.definitions.len(),
        raw.issues.len()
    );

    raw
}

/// Convert one JSON record, returning all of its field errors on failure
fn convert_record(fields: &Map<String, Value>) -> Result<SignalDefinition, Vec<String>> {
    let mut reader = FieldReader::new(fields);

    // Older schemas spell the category field `cat_id`
    let category_id = if fields.contains_key("category_id") {
        reader.integer("category_id", 0, u8::MAX as i64)
    } else if fields.contains_key("cat_id") {
        reader.integer("cat_id", 0, u8::MAX as i64)
    } else {
        reader.missing("category_id")
    };
    let sub_id = reader.integer("sub_id", 0, u8::MAX as i64);
    let name = reader.string("name");
    let description = reader.string("description");
    let timeout = reader.integer("timeout", 0, u32::MAX as i64);
    let tag = reader.string("type");
    let resolution = reader.resolution("resolution");
    let units = reader.optional_string("units");
    let size = reader.optional_integer("size");

    if let Some(name) = &name {
        if !is_valid_signal_name(name) {
            reader.errors.push(format!(
                "name '{}' must be a C identifier (letters, digits, '_')",
                name
            ));
        }
    }

    let kind = match tag {
        Some(tag) => match build_kind(&tag, resolution, units, size) {
            Ok(kind) => Some(kind),
            Err(e) => {
                reader.errors.push(e);
                None
            }
        },
        None => None,
    };

    match (category_id, sub_id, name, description, timeout, kind) {
        (
            Some(category_id),
            Some(sub_id),
            Some(name),
            Some(description),
            Some(timeout),
            Some(kind),
        ) if reader.errors.is_empty() => {
            Ok(SignalDefinition {
                category_id: category_id as u8,
                sub_id: sub_id as u8,
                name,
                description,
                timeout_ms: timeout as u32,
                kind,
            })
        }
        _ => Err(reader.errors),
    }
}

/// Typed access to record fields that records every problem it sees
struct FieldReader<'a> {
    fields: &'a Map<String, Value>,
    errors: Vec<String>,
}

impl<'a> FieldReader<'a> {
    fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields,
            errors: Vec::new(),
        }
    }

    fn missing<T>(&mut self, key: &str) -> Option<T> {
        self.errors.push(format!("missing field '{}'", key));
        None
    }

    fn integer(&mut self, key: &str, min: i64, max: i64) -> Option<i64> {
        let Some(value) = self.fields.get(key) else {
            return self.missing(key);
        };
        match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => Some(n),
            Some(n) => {
                self.errors.push(format!(
                    "field '{}' = {} is out of range {}..={}",
                    key, n, min, max
                ));
                None
            }
            None => {
                self.errors.push(format!(
                    "field '{}' must be an integer, got {}",
                    key, value
                ));
                None
            }
        }
    }

    fn optional_integer(&mut self, key: &str) -> Option<i64> {
        let value = self.fields.get(key)?;
        match value.as_i64() {
            Some(n) => Some(n),
            None => {
                self.errors.push(format!(
                    "field '{}' must be an integer, got {}",
                    key, value
                ));
                None
            }
        }
    }

    fn string(&mut self, key: &str) -> Option<String> {
        let Some(value) = self.fields.get(key) else {
            return self.missing(key);
        };
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.errors
                    .push(format!("field '{}' must be a string, got {}", key, value));
                None
            }
        }
    }

    fn optional_string(&mut self, key: &str) -> Option<String> {
        if self.fields.contains_key(key) {
            self.string(key)
        } else {
            None
        }
    }

    fn resolution(&mut self, key: &str) -> Option<RawResolution> {
        match self.fields.get(key)? {
            Value::Number(n) => n.as_f64().map(RawResolution::Number),
            Value::String(alias) => Some(RawResolution::Alias(alias.clone())),
            other => {
                self.errors.push(format!(
                    "field '{}' must be a number or a resolution alias, got {}",
                    key, other
                ));
                None
            }
        }
    }
}

/// Label a record for error messages, using its name when readable
fn record_label(position: usize, fields: &Map<String, Value>) -> String {
    match fields.get("name").and_then(Value::as_str) {
        Some(name) => format!("signal #{} '{}'", position, name),
        None => format!("signal #{}", position),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
