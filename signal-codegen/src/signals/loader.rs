//! Signal schema loading
//!
//! Dispatches on the schema format, converts records through the format
//! parsers and runs the schema-wide checks on whatever parsed. Every issue
//! found is reported together. Loading is all-or-nothing.

use crate::signals::definition::{resolve_resolution_alias, SignalKind, SignalKindTag};
use crate::signals::schema::SignalSchema;
use crate::signals::{csv, json, SignalDefinition};
use crate::types::{CodegenError, Result};
use std::path::Path;

/// Supported schema source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// `{ "version": N, "signals": [...] }`
    Json,
    /// Legacy comma-separated signal list
    Csv,
}

impl SchemaFormat {
    /// Choose the format from a file extension (`.csv` → CSV, otherwise JSON)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SchemaFormat::Csv,
            _ => SchemaFormat::Json,
        }
    }
}

/// Parser output before the schema-wide checks
#[derive(Debug, Default)]
pub(crate) struct RawSchema {
    pub version: Option<i64>,
    pub definitions: Vec<SignalDefinition>,
    pub issues: Vec<String>,
}

/// A resolution as written in the schema
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawResolution {
    Number(f64),
    Alias(String),
}

/// Load and validate a schema file
pub fn load_schema_file(path: &Path) -> Result<SignalSchema> {
    log::info!("Loading signal schema: {:?}", path);

    let source = std::fs::read_to_string(path)?;
    let schema = load_schema_str(&source, SchemaFormat::from_path(path))?;

    log::info!(
        "Loaded signal schema v{} with {} signals from {:?}",
        schema.version(),
        schema.len(),
        path
    );
    Ok(schema)
}

/// Load and validate schema text in the given format
pub fn load_schema_str(source: &str, format: SchemaFormat) -> Result<SignalSchema> {
    let raw = match format {
        SchemaFormat::Json => json::parse_json_schema(source),
        SchemaFormat::Csv => csv::parse_csv_schema(source),
    };

    let result = SignalSchema::validated(raw.version, raw.definitions, raw.issues);
    if let Err(CodegenError::Schema(issues)) = &result {
        for issue in issues {
            log::debug!("Schema issue: {}", issue);
        }
    }
    result
}

/// Build the variant payload for a `type` tag
pub(crate) fn build_kind(
    tag: &str,
    resolution: Option<RawResolution>,
    units: Option<String>,
    size: Option<i64>,
) -> std::result::Result<SignalKind, String> {
    let kind_tag = SignalKindTag::from_schema_tag(tag)
        .ok_or_else(|| format!("unknown signal type '{}'", tag))?;

    match kind_tag {
        SignalKindTag::Base => Ok(SignalKind::Base),
        SignalKindTag::Integer => Ok(SignalKind::Integer),
        SignalKindTag::Scaled => {
            let raw = resolution
                .ok_or_else(|| "missing field 'resolution' for scaled signal".to_string())?;
            Ok(SignalKind::Scaled {
                resolution: resolve_resolution(raw)?,
                units: units.filter(|u| !u.is_empty()),
            })
        }
        SignalKindTag::Data => match size {
            Some(size) if (1..=u8::MAX as i64).contains(&size) => Ok(SignalKind::Data {
                size: size as u8,
            }),
            Some(size) => Err(format!(
                "field 'size' = {} is out of range 1..={}",
                size,
                u8::MAX
            )),
            None => Err("missing field 'size' for data signal".to_string()),
        },
    }
}

/// Turn a raw resolution into a finite, non-zero multiplier
pub(crate) fn resolve_resolution(raw: RawResolution) -> std::result::Result<f64, String> {
    let value = match raw {
        RawResolution::Number(value) => value,
        RawResolution::Alias(alias) => resolve_resolution_alias(alias.trim())
            .ok_or_else(|| format!("unknown resolution alias '{}'", alias))?,
    };

    if !value.is_finite() || value == 0.0 {
        return Err(format!("resolution must be finite and non-zero, got {}", value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SchemaFormat::from_path(Path::new("signals.csv")), SchemaFormat::Csv);
        assert_eq!(SchemaFormat::from_path(Path::new("signals.CSV")), SchemaFormat::Csv);
        assert_eq!(SchemaFormat::from_path(Path::new("signals.json")), SchemaFormat::Json);
        assert_eq!(SchemaFormat::from_path(Path::new("signals")), SchemaFormat::Json);
    }

    #[test]
    fn test_version_validity() {
        let load = |version: &str| {
            load_schema_str(
                &format!(r#"{{"version": {}, "signals": []}}"#, version),
                SchemaFormat::Json,
            )
        };

        assert!(load("0").unwrap_err().is_schema_error());
        assert!(load("-4").unwrap_err().is_schema_error());
        assert!(load("2.5").unwrap_err().is_schema_error());
        assert!(load("\"1\"").unwrap_err().is_schema_error());
        assert_eq!(load("1").unwrap().version(), 1);
    }

    #[test]
    fn test_structural_issues_reported_together() {
        let source = r#"{
            "version": 0,
            "signals": [
                {"category_id": 1, "sub_id": 2, "name": "ALT", "description": "", "timeout": 500, "type": "warp"}
            ]
        }"#;

        match load_schema_str(source, SchemaFormat::Json).unwrap_err() {
            CodegenError::Schema(issues) => {
                assert_eq!(issues.len(), 2, "{:?}", issues);
                assert!(issues[0].contains("version"));
                assert!(issues[1].contains("unknown signal type 'warp'"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_duplicates_reported_alongside_structural_issues() {
        let source = r#"{
            "version": 1,
            "signals": [
                {"category_id": 1, "sub_id": 1, "name": "ALT", "description": "", "timeout": 500, "type": "base"},
                {"category_id": 1, "sub_id": 1, "name": "ALT", "description": "", "timeout": 500, "type": "base"},
                {"category_id": 2, "sub_id": 1, "name": "X", "description": "", "timeout": 500, "type": "warp"}
            ]
        }"#;

        match load_schema_str(source, SchemaFormat::Json).unwrap_err() {
            CodegenError::Schema(issues) => {
                assert_eq!(issues.len(), 3, "{:?}", issues);
                assert!(issues[0].contains("unknown signal type 'warp'"));
                assert!(issues[1].contains("duplicate signal name 'ALT'"));
                assert!(issues[2].contains("duplicate signal id (1, 1)"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_version_and_duplicates_reported_together() {
        let source = "0,\n1,1,ALT,ft,base,500,\n1,1,ALT,ft,base,500,\n";

        let err = load_schema_str(source, SchemaFormat::Csv).unwrap_err();
        assert!(err.is_schema_error());
        let message = err.to_string();
        assert!(message.contains("version must be a positive integer, got 0"));
        assert!(message.contains("duplicate signal name 'ALT'"));
    }

    #[test]
    fn test_uniqueness_reported_after_parsing() {
        let source = r#"{
            "version": 1,
            "signals": [
                {"category_id": 1, "sub_id": 2, "name": "ALT", "description": "", "timeout": 500, "type": "base"},
                {"category_id": 1, "sub_id": 2, "name": "ALT2", "description": "", "timeout": 500, "type": "base"}
            ]
        }"#;

        let err = load_schema_str(source, SchemaFormat::Json).unwrap_err();
        assert!(err.is_uniqueness_error());
        assert!(err.to_string().contains("'ALT' and 'ALT2'"));
    }

    #[test]
    fn test_build_kind() {
        assert_eq!(build_kind("base", None, None, None), Ok(SignalKind::Base));
        assert_eq!(build_kind("integer", None, None, None), Ok(SignalKind::Integer));
        assert_eq!(
            build_kind("data", None, None, Some(16)),
            Ok(SignalKind::Data { size: 16 })
        );
        assert!(build_kind("data", None, None, Some(0)).is_err());
        assert!(build_kind("data", None, None, None).is_err());
        assert!(build_kind("scaled", None, None, None).is_err());
        assert_eq!(
            build_kind("scaled", Some(RawResolution::Number(0.01)), Some(String::new()), None),
            Ok(SignalKind::Scaled {
                resolution: 0.01,
                units: None,
            })
        );
        assert!(build_kind("scaled", Some(RawResolution::Number(0.0)), None, None).is_err());
        let bogus = Some(RawResolution::Alias("bogus".into()));
        assert!(build_kind("scaled", bogus, None, None).is_err());
    }

    #[test]
    fn test_load_schema_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(
            br#"{"version": 2, "signals": [
                {"category_id": 20, "sub_id": 10, "name": "ENGINE_RPM",
                 "description": "the RPM of the engine", "timeout": 1000, "type": "integer"}
            ]}"#,
        )
        .unwrap();
        file.flush().unwrap();

        let schema = load_schema_file(file.path()).unwrap();
        assert_eq!(schema.version(), 2);
        assert_eq!(schema.get("ENGINE_RPM").unwrap().kind, SignalKind::Integer);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_schema_file(Path::new("/nonexistent/signals.json")).unwrap_err();
        assert!(matches!(err, CodegenError::IoError(_)));
    }
}
