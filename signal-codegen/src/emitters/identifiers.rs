//! Identifier table artifacts (`gen_signal_id.h` / `gen_signal_id.cpp`)
//!
//! One constant per signal plus three lookup functions:
//! name → identifier, identifier → name and (category, sub) → identifier.

use crate::codegen::{
    Branch, BranchPrinter, CodeFile, CodegenUnit, LookupFunction, Section, SignalPrinter,
};
use crate::config::{GeneratorConfig, IdentifierStyle};
use crate::signals::{SignalDefinition, SignalSchema};

/// Name of the generated schema version constant
pub const VERSION_CONSTANT: &str = "SIGNAL_LIST_VERSION_NUM";

/// Generated constant name for a signal, e.g. `SIGNAL_ID_ALT`
pub fn constant_name(style: IdentifierStyle, signal: &SignalDefinition) -> String {
    format!("{}{}", style.constant_prefix(), signal.constant_suffix())
}

fn qualified(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(namespace) => format!("{}::{}", namespace, name),
        None => name.to_string(),
    }
}

/// `extern` declaration of each constant, documented when a description exists
struct ExternDeclaration {
    style: IdentifierStyle,
}

impl SignalPrinter for ExternDeclaration {
    fn print(&self, _index: usize, signal: &SignalDefinition) -> Vec<String> {
        let constant = constant_name(self.style, signal);
        let declaration = format!("extern const {} {};", self.style.type_name(), constant);

        let description = doc_comment_text(&signal.description);
        if description.is_empty() {
            return vec![declaration];
        }

        vec![
            "/**".to_string(),
            format!(" * @brief {} is the signal for {}", constant, description),
            " */".to_string(),
            declaration,
        ]
    }
}

/// Collapse whitespace and break up `*/` so text stays inside a `/** */` block
fn doc_comment_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "* /")
}

/// Constructor call defining each constant
struct ConstantDefinition {
    style: IdentifierStyle,
    namespace: Option<String>,
}

impl SignalPrinter for ConstantDefinition {
    fn print(&self, _index: usize, signal: &SignalDefinition) -> Vec<String> {
        let mut args = vec![signal.category_id.to_string(), signal.sub_id.to_string()];
        if self.style.includes_timeout() {
            args.push(signal.timeout_ms.to_string());
        }

        vec![format!(
            "const {} {}({});",
            self.style.type_name(),
            qualified(self.namespace.as_deref(), &constant_name(self.style, signal)),
            args.join(", ")
        )]
    }
}

/// The schema version constant
struct VersionConstant {
    namespace: Option<String>,
}

impl CodegenUnit for VersionConstant {
    fn generate(&self, schema: &SignalSchema) -> Vec<String> {
        vec![format!(
            "const uint32_t {} = {};",
            qualified(self.namespace.as_deref(), VERSION_CONSTANT),
            schema.version()
        )]
    }
}

/// `name == "ALT"` → identifier
struct NameToIdentifier {
    style: IdentifierStyle,
}

impl BranchPrinter for NameToIdentifier {
    fn branch(&self, signal: &SignalDefinition) -> Branch {
        Branch::new(
            format!("name == \"{}\"", signal.name),
            [
                format!("{} = {};", self.style.function_noun(), constant_name(self.style, signal)),
                "return true;".to_string(),
            ],
        )
    }
}

/// identifier → `name = "ALT"`
struct IdentifierToName {
    style: IdentifierStyle,
}

impl BranchPrinter for IdentifierToName {
    fn branch(&self, signal: &SignalDefinition) -> Branch {
        Branch::new(
            format!("{} == {}", self.style.function_noun(), constant_name(self.style, signal)),
            [format!("name = \"{}\";", signal.name), "return true;".to_string()],
        )
    }
}

/// `cat_id == 1 && sub_id == 2` → identifier
struct CategorySubToIdentifier {
    style: IdentifierStyle,
}

impl BranchPrinter for CategorySubToIdentifier {
    fn branch(&self, signal: &SignalDefinition) -> Branch {
        Branch::new(
            format!("cat_id == {} && sub_id == {}", signal.category_id, signal.sub_id),
            [
                format!("{} = {};", self.style.function_noun(), constant_name(self.style, signal)),
                "return true;".to_string(),
            ],
        )
    }
}

/// The three lookup functions, in declaration order
fn lookup_functions(config: &GeneratorConfig) -> Vec<LookupFunction> {
    let style = config.identifier_style;
    let noun = style.function_noun();
    let type_name = style.type_name();

    vec![
        LookupFunction::new(format!("get_{}_for_name", noun), "bool", NameToIdentifier { style })
            .with_namespace(config.namespace())
            .with_parameters([
                "const std::string& name".to_string(),
                format!("{}& {}", type_name, noun),
            ])
            .with_default(["return false;"])
            .with_description([
                "/**".to_string(),
                format!(" * @brief <NAME> provides the {} for the provided name", noun),
                " * @param name is the name of the signal to find".to_string(),
                format!(" * @param {} provides the resulting {} if found", noun, noun),
                " * @return true if a signal for the given name is found".to_string(),
                " */".to_string(),
            ]),
        LookupFunction::new(format!("get_name_for_{}", noun), "bool", IdentifierToName { style })
            .with_namespace(config.namespace())
            .with_parameters([
                format!("const {}& {}", type_name, noun),
                "std::string& name".to_string(),
            ])
            .with_default(["return false;"])
            .with_description([
                "/**".to_string(),
                " * @brief <NAME> provides the name of the signal".to_string(),
                format!(" * @param {} is the {} to find a name for", noun, noun),
                " * @param name provides the name of the signal if found".to_string(),
                " * @return true if a name for the given signal is found".to_string(),
                " */".to_string(),
            ]),
        LookupFunction::new(
            format!("get_{}_for_cat_sub_id", noun),
            "bool",
            CategorySubToIdentifier { style },
        )
        .with_namespace(config.namespace())
        .with_parameters([
            "const uint8_t cat_id".to_string(),
            "const uint8_t sub_id".to_string(),
            format!("{}& {}", type_name, noun),
        ])
        .with_default(["return false;"])
        .with_description([
            "/**".to_string(),
            format!(" * @brief <NAME> provides the {} for the category and sub-category IDs", noun),
            " * @param cat_id is the category ID of the signal to search for".to_string(),
            " * @param sub_id is the subcategory ID of the signal to search for".to_string(),
            format!(" * @param {} provides the resulting {} if found", noun, noun),
            " * @return true if a signal for the given IDs is found".to_string(),
            " */".to_string(),
        ]),
    ]
}

/// Build the identifier table header and source files
pub fn identifier_files(config: &GeneratorConfig) -> (CodeFile, CodeFile) {
    let style = config.identifier_style;
    let namespace = config.namespace();

    let mut header = CodeFile::header(style.base_name())
        .with_namespace(namespace)
        .with_guard_prefix(config.guard_prefix.as_deref())
        .with_banner(config.banner_lines());
    header.add_include(style.runtime_header());
    header.add_system_include("cstdint");
    header.add_system_include("string");

    let mut source = CodeFile::source(style.base_name())
        .with_namespace(namespace)
        .with_banner(config.banner_lines());
    source.add_include(header.file_name());

    header.add_section(Section::fixed([format!("extern const uint32_t {};", VERSION_CONSTANT)]));
    header.add_section(Section::new(ExternDeclaration { style }));

    source.add_section(VersionConstant {
        namespace: namespace.map(str::to_string),
    });
    source.add_section(
        Section::new(ConstantDefinition {
            style,
            namespace: namespace.map(str::to_string),
        })
        .with_item_separation(false),
    );

    for function in lookup_functions(config) {
        let sections = function.build();
        header.add_section(sections.header_decl);
        source.add_section(sections.source_def);
    }

    (header, source)
}
