// End-to-end generation from schema text to files on disk

use signal_codegen::{
    load_schema_file, load_schema_str, CodegenError, GeneratorConfig, IdentifierStyle,
    SchemaFormat, SignalGenerator, SignalSchema,
};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const ALT_SCHEMA: &str = r#"{
    "version": 1,
    "signals": [
        {"category_id": 1, "sub_id": 2, "name": "ALT", "description": "altitude",
         "timeout": 500, "type": "base"}
    ]
}"#;

const AVIONICS_SCHEMA: &str = r#"{
    "version": 3,
    "signals": [
        {"category_id": 10, "sub_id": 10, "name": "gps_latitude", "description": "the GPS latitude of the aircraft",
         "timeout": 1000, "type": "scaled", "units": "deg", "resolution": "semi2deg"},
        {"category_id": 10, "sub_id": 20, "name": "altitude_msl", "description": "the MSL altitude of the aircraft",
         "timeout": 1000, "type": "scaled", "units": "ft", "resolution": 0.01},
        {"category_id": 20, "sub_id": 10, "name": "engine_rpm", "description": "the RPM of the engine",
         "timeout": 1000, "type": "integer"},
        {"category_id": 5, "sub_id": 1, "name": "flight_plan", "description": "",
         "timeout": 5000, "type": "data", "size": 64}
    ]
}"#;

fn load(source: &str) -> SignalSchema {
    load_schema_str(source, SchemaFormat::Json).unwrap()
}

fn rendered(generator: &SignalGenerator, schema: &SignalSchema) -> HashMap<String, String> {
    generator
        .render(schema)
        .into_iter()
        .map(|f| (f.file_name, f.contents))
        .collect()
}

/// Extract `(condition, statements)` for every branch of a generated lookup
fn parse_chain(contents: &str, function: &str) -> Vec<(String, Vec<String>)> {
    let mut lines = contents
        .lines()
        .skip_while(|l| !(l.starts_with("bool ") && l.contains(&format!("{}(", function))));
    assert!(lines.next().is_some(), "function {} not found", function);

    let mut branches = Vec::new();
    for line in lines {
        if line == "}" {
            break;
        }
        let trimmed = line.trim();
        if let Some(rest) = trimmed
            .strip_prefix("else if (")
            .or_else(|| trimmed.strip_prefix("if ("))
        {
            let condition = rest.strip_suffix(')').unwrap().to_string();
            branches.push((condition, Vec::new()));
        } else if line.starts_with("        ") {
            if let Some((_, statements)) = branches.last_mut() {
                statements.push(trimmed.to_string());
            }
        }
    }
    branches
}

#[test]
fn test_alt_scenario_source() {
    init_logging();
    let files = rendered(&SignalGenerator::new(), &load(ALT_SCHEMA));

    let expected = "\
// This file is auto-generated

#include \"gen_signal_id.h\"

using namespace efis_signals;

const uint32_t efis_signals::SIGNAL_LIST_VERSION_NUM = 1;

const SignalID efis_signals::SIGNAL_ID_ALT(1, 2);

bool efis_signals::get_signal_id_for_name(const std::string& name, SignalID& signal_id)
{
    if (name == \"ALT\")
    {
        signal_id = SIGNAL_ID_ALT;
        return true;
    }
    else
    {
        return false;
    }
}

bool efis_signals::get_name_for_signal_id(const SignalID& signal_id, std::string& name)
{
    if (signal_id == SIGNAL_ID_ALT)
    {
        name = \"ALT\";
        return true;
    }
    else
    {
        return false;
    }
}

bool efis_signals::get_signal_id_for_cat_sub_id(const uint8_t cat_id, const uint8_t sub_id, SignalID& signal_id)
{
    if (cat_id == 1 && sub_id == 2)
    {
        signal_id = SIGNAL_ID_ALT;
        return true;
    }
    else
    {
        return false;
    }
}
";
    assert_eq!(files["gen_signal_id.cpp"], expected);

    let by_name = parse_chain(&files["gen_signal_id.cpp"], "get_signal_id_for_name");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].0, "name == \"ALT\"");
}

#[test]
fn test_alt_scenario_header_and_database() {
    let files = rendered(&SignalGenerator::new(), &load(ALT_SCHEMA));

    let header = &files["gen_signal_id.h"];
    assert!(header.starts_with(
        "// This file is auto-generated\n\n\
         #include \"signal_id.h\"\n\
         #include <cstdint>\n\
         #include <string>\n\n\
         #ifndef GEN_SIGNAL_ID_H\n\
         #define GEN_SIGNAL_ID_H\n\n\
         namespace efis_signals\n{\n\n\
         extern const uint32_t SIGNAL_LIST_VERSION_NUM;\n\n\
         /**\n * @brief SIGNAL_ID_ALT is the signal for altitude\n */\n\
         extern const SignalID SIGNAL_ID_ALT;\n"
    ));
    assert!(header.contains(
        " * @brief get_signal_id_for_name provides the signal_id for the provided name\n"
    ));
    assert!(header.contains(
        "bool get_name_for_signal_id(const SignalID& signal_id, std::string& name);\n"
    ));
    assert!(header.ends_with("\n}\n\n#endif // GEN_SIGNAL_ID_H\n"));

    let expected_database = "\
// This file is auto-generated

#include \"signal_database.h\"
#include \"signal_type_base.h\"
#include \"signal_type_int.h\"
#include \"signal_type_scaled.h\"
#include \"signal_type_data.h\"
#include \"gen_signal_id.h\"

using namespace efis_signals;

void SignalDatabase::init_signals()
{
    static SignalTypeBase signal_alt(SIGNAL_ID_ALT);
    signal_array[SIGNAL_ID_ALT.signal_index()] = dynamic_cast<SignalTypeBase*>(&signal_alt);
}
";
    assert_eq!(files["gen_signal_database.cpp"], expected_database);
}

#[test]
fn test_semi2deg_scenario() {
    let files = rendered(&SignalGenerator::new(), &load(AVIONICS_SCHEMA));
    let database = &files["gen_signal_database.cpp"];

    assert!(database.contains(
        "    static SignalTypeScaled signal_gps_latitude(SIGNAL_ID_GPS_LATITUDE, 8.381903171539306640625000e-08);\n"
    ));
    assert!(database.contains(
        "    static SignalTypeScaled signal_altitude_msl(SIGNAL_ID_ALTITUDE_MSL, 1.000000000000000020816682e-02);\n"
    ));
    assert!(database.contains(
        "    static SignalTypeInteger signal_engine_rpm(SIGNAL_ID_ENGINE_RPM);\n"
    ));
    assert!(database.contains(
        "    static SignalTypeData signal_flight_plan(SIGNAL_ID_FLIGHT_PLAN, 64);\n"
    ));

    // Multi-line registrations are separated by one blank line
    assert!(database.contains(
        "dynamic_cast<SignalTypeBase*>(&signal_gps_latitude);\n\n    static SignalTypeScaled signal_altitude_msl"
    ));
}

#[test]
fn test_lookup_round_trip() {
    let schema = load(AVIONICS_SCHEMA);
    let files = rendered(&SignalGenerator::new(), &schema);
    let source = &files["gen_signal_id.cpp"];

    let by_name: HashMap<String, Vec<String>> =
        parse_chain(source, "get_signal_id_for_name").into_iter().collect();
    let to_name: HashMap<String, Vec<String>> =
        parse_chain(source, "get_name_for_signal_id").into_iter().collect();

    for signal in schema.iter() {
        let statements = &by_name[&format!("name == \"{}\"", signal.name)];
        let identifier = statements[0]
            .strip_prefix("signal_id = ")
            .and_then(|s| s.strip_suffix(';'))
            .unwrap();

        let statements = &to_name[&format!("signal_id == {}", identifier)];
        assert_eq!(statements[0], format!("name = \"{}\";", signal.name));
    }
}

#[test]
fn test_chains_follow_declaration_order() {
    let schema = load(AVIONICS_SCHEMA);
    let files = rendered(&SignalGenerator::new(), &schema);
    let source = &files["gen_signal_id.cpp"];

    let declared: Vec<String> = schema.iter().map(|s| format!("name == \"{}\"", s.name)).collect();
    let chain: Vec<String> = parse_chain(source, "get_signal_id_for_name")
        .into_iter()
        .map(|(condition, _)| condition)
        .collect();
    assert_eq!(chain, declared);

    let by_id: Vec<String> = parse_chain(source, "get_signal_id_for_cat_sub_id")
        .into_iter()
        .map(|(condition, _)| condition)
        .collect();
    assert_eq!(
        by_id,
        vec![
            "cat_id == 10 && sub_id == 10",
            "cat_id == 10 && sub_id == 20",
            "cat_id == 20 && sub_id == 10",
            "cat_id == 5 && sub_id == 1",
        ]
    );

    // The first conditional is an `if`, the rest are `else if`
    assert!(source.contains("    if (name == \"gps_latitude\")\n"));
    assert!(source.contains("    else if (name == \"flight_plan\")\n"));
}

#[test]
fn test_generation_is_deterministic() {
    init_logging();
    let schema = load(AVIONICS_SCHEMA);
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let generator = SignalGenerator::new();
    let written_first = generator.generate(&schema, first.path()).unwrap();
    let written_second = generator.generate(&schema, second.path()).unwrap();
    assert_eq!(written_first.len(), 3);

    for (a, b) in written_first.iter().zip(&written_second) {
        assert_eq!(a.file_name(), b.file_name());
        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }

    // Regenerating into the same directory gives the same bytes
    let before = std::fs::read(&written_first[0]).unwrap();
    generator.generate(&schema, first.path()).unwrap();
    assert_eq!(std::fs::read(&written_first[0]).unwrap(), before);
}

#[test]
fn test_invalid_target_writes_nothing() {
    let schema = load(ALT_SCHEMA);
    let dir = tempfile::tempdir().unwrap();
    let generator = SignalGenerator::new();

    let err = generator
        .generate(&schema, &dir.path().join("missing"))
        .unwrap_err();
    assert!(matches!(err, CodegenError::TargetDirectory { .. }));

    let file_target = dir.path().join("not_a_dir");
    std::fs::write(&file_target, "").unwrap();
    let err = generator.generate(&schema, &file_target).unwrap_err();
    assert!(err.is_target_directory_error());

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_signal_def_style() {
    let config = GeneratorConfig::new()
        .with_identifier_style(IdentifierStyle::SignalDef)
        .with_guard_prefix("TF_")
        .with_license_header(vec!["TeaFIS is a cockpit display for aircraft".to_string()]);
    let files = rendered(&SignalGenerator::with_config(config), &load(ALT_SCHEMA));

    let source = &files["gen_signal_def.cpp"];
    assert!(source.starts_with(
        "// TeaFIS is a cockpit display for aircraft\n\n// This file is auto-generated\n"
    ));
    assert!(source.contains("const SignalDef efis_signals::SIGNAL_DEF_ALT(1, 2, 500);\n"));
    assert!(source.contains(
        "bool efis_signals::get_signal_def_for_name(const std::string& name, SignalDef& signal_def)\n"
    ));

    let header = &files["gen_signal_def.h"];
    assert!(header.contains("#include \"signal_def.h\"\n"));
    assert!(header.contains("#ifndef TF_GEN_SIGNAL_DEF_H\n#define TF_GEN_SIGNAL_DEF_H\n"));

    assert!(files["gen_signal_database.cpp"].contains("#include \"gen_signal_def.h\"\n"));
}

#[test]
fn test_no_namespace() {
    let config = GeneratorConfig::new().with_namespace("");
    let files = rendered(&SignalGenerator::with_config(config), &load(ALT_SCHEMA));

    let source = &files["gen_signal_id.cpp"];
    assert!(!source.contains("using namespace"));
    assert!(source.contains("const SignalID SIGNAL_ID_ALT(1, 2);\n"));
    assert!(source.contains("bool get_signal_id_for_name("));

    let header = &files["gen_signal_id.h"];
    assert!(!header.contains("namespace"));
}

#[test]
fn test_empty_schema_lookups() {
    let files = rendered(
        &SignalGenerator::new(),
        &load(r#"{"version": 1, "signals": []}"#),
    );
    assert!(files["gen_signal_id.cpp"].contains(
        "bool efis_signals::get_signal_id_for_name(const std::string& name, SignalID& signal_id)\n{\n    return false;\n}\n"
    ));
    assert!(files["gen_signal_database.cpp"]
        .contains("void SignalDatabase::init_signals()\n{\n}\n"));
}

#[test]
fn test_lines_have_no_trailing_whitespace() {
    let files = rendered(&SignalGenerator::new(), &load(AVIONICS_SCHEMA));
    for (name, contents) in &files {
        assert!(contents.ends_with('\n'), "{} lacks a trailing newline", name);
        assert!(!contents.ends_with("\n\n"), "{} ends with extra blank lines", name);
        for line in contents.lines() {
            assert_eq!(line, line.trim_end(), "trailing whitespace in {}", name);
        }
    }
}

#[test]
fn test_duplicates_fail_before_generation() {
    let duplicate_name = r#"{"version": 1, "signals": [
        {"category_id": 1, "sub_id": 1, "name": "ALT", "description": "", "timeout": 1, "type": "base"},
        {"category_id": 1, "sub_id": 2, "name": "ALT", "description": "", "timeout": 1, "type": "base"}
    ]}"#;
    let err = load_schema_str(duplicate_name, SchemaFormat::Json).unwrap_err();
    assert!(err.is_uniqueness_error());
    assert!(err.to_string().contains("duplicate signal name 'ALT'"));

    let duplicate_id = r#"{"version": 1, "signals": [
        {"category_id": 1, "sub_id": 1, "name": "ALT", "description": "", "timeout": 1, "type": "base"},
        {"category_id": 1, "sub_id": 1, "name": "SPEED", "description": "", "timeout": 1, "type": "base"}
    ]}"#;
    let err = load_schema_str(duplicate_id, SchemaFormat::Json).unwrap_err();
    assert!(err.is_uniqueness_error());
    assert!(err.to_string().contains("(1, 1) shared by 'ALT' and 'SPEED'"));
}

#[test]
fn test_csv_schema_file_end_to_end() {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    write!(
        file,
        "# legacy signal list\n1,\n10,10,gps_latitude,deg,fixed,1000,semi2deg\n20,10,engine_rpm,rpm,fixed,1000,0.01\n"
    )
    .unwrap();
    file.flush().unwrap();

    let schema = load_schema_file(file.path()).unwrap();
    assert_eq!(schema.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let written = SignalGenerator::new().generate(&schema, dir.path()).unwrap();
    let database = std::fs::read_to_string(&written[2]).unwrap();
    assert!(database.contains(
        "signal_gps_latitude(SIGNAL_ID_GPS_LATITUDE, 8.381903171539306640625000e-08);"
    ));
}
