//! Legacy CSV signal list parser
//!
//! Format:
//! ```text
//! # comment lines start with '#'
//! 1,
//! CategoryID,SubID,Name,Units,Type,TimeoutMillisecond,Resolution
//! ```
//! The first data line carries the version; each following line is one
//! signal. The CSV format has no description column.

use crate::signals::definition::{is_valid_signal_name, SignalDefinition};
use crate::signals::loader::{build_kind, RawResolution, RawSchema};

const EXPECTED_COLUMNS: usize = 7;

/// Parse CSV schema text into raw definitions plus every issue found
pub(crate) fn parse_csv_schema(source: &str) -> RawSchema {
    let mut raw = RawSchema::default();
    let mut version_seen = false;

    for (line_idx, line) in source.lines().enumerate() {
        let line_no = line_idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if !version_seen {
            version_seen = true;
            let text = trimmed.replace(',', "");
            match text.trim().parse::<i64>() {
                Ok(version) => raw.version = Some(version),
                Err(_) => raw.issues.push(format!(
                    "line {}: version must be a positive integer, got '{}'",
                    line_no,
                    text.trim()
                )),
            }
            continue;
        }

        match convert_line(trimmed) {
            Ok(definition) => raw.definitions.push(definition),
            Err(errors) => raw
                .issues
                .extend(errors.into_iter().map(|e| format!("line {}: {}", line_no, e))),
        }
    }

    if !version_seen {
        raw.issues.push("missing schema version line".to_string());
    }

    log::debug!(
        "Parsed {} CSV signal lines ({} issues)",
        raw.definitions.len(),
        raw.issues.len()
    );

    raw
}

/// Convert one signal line, returning all of its column errors on failure
fn convert_line(line: &str) -> Result<SignalDefinition, Vec<String>> {
    let words: Vec<&str> = line.split(',').map(str::trim).collect();
    if words.len() != EXPECTED_COLUMNS {
        return Err(vec![format!(
            "expected {} columns, got {}",
            EXPECTED_COLUMNS,
            words.len()
        )]);
    }

    let mut errors = Vec::new();

    let category_id = parse_number::<u8>(words[0], "category_id", &mut errors);
    let sub_id = parse_number::<u8>(words[1], "sub_id", &mut errors);
    let name = words[2].to_string();
    let units = words[3].to_string();
    let timeout = parse_number::<u32>(words[5], "timeout", &mut errors);

    if !is_valid_signal_name(&name) {
        errors.push(format!(
            "name '{}' must be a C identifier (letters, digits, '_')",
            name
        ));
    }

    let resolution = match words[6] {
        "" => None,
        text => Some(match text.parse::<f64>() {
            Ok(value) => RawResolution::Number(value),
            Err(_) => RawResolution::Alias(text.to_string()),
        }),
    };

    let kind = match build_kind(words[4], resolution, Some(units), None) {
        Ok(kind) => Some(kind),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    match (category_id, sub_id, timeout, kind) {
        (Some(category_id), Some(sub_id), Some(timeout_ms), Some(kind))
            if errors.is_empty() =>
        {
            Ok(SignalDefinition {
                category_id,
                sub_id,
                name,
                description: String::new(),
                timeout_ms,
                kind,
            })
        }
        _ => Err(errors),
    }
}

fn parse_number<T: std::str::FromStr>(
    text: &str,
    field: &str,
    errors: &mut Vec<String>,
) -> Option<T> {
    match text.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(format!("invalid {} '{}'", field, text));
            None
        }
    }
}
