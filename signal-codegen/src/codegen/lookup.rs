//! If/else-chain lookup functions
//!
//! A [`LookupFunction`] turns a per-signal [`Branch`] (condition plus the
//! statements run when it holds) into a C++ function whose body tests every
//! signal in declaration order, followed by a default block.
//!
//! The same generator serves every lookup kind (name → identifier,
//! identifier → name, category/sub → identifier); only the
//! [`BranchPrinter`] differs.

use crate::codegen::section::{indent_line, CodegenUnit};
use crate::signals::{SignalDefinition, SignalSchema};
use std::rc::Rc;

/// Placeholder replaced by the function name in description lines
pub const NAME_PLACEHOLDER: &str = "<NAME>";

/// One arm of the conditional chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Expression placed inside `if (...)`
    pub condition: String,
    /// Statements executed when the condition holds
    pub statements: Vec<String>,
}

impl Branch {
    pub fn new<S: Into<String>>(
        condition: impl Into<String>,
        statements: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            condition: condition.into(),
            statements: statements.into_iter().map(Into::into).collect(),
        }
    }
}

/// Produces the branch tested for one signal
pub trait BranchPrinter {
    fn branch(&self, signal: &SignalDefinition) -> Branch;
}

impl<F> BranchPrinter for F
where
    F: Fn(&SignalDefinition) -> Branch,
{
    fn branch(&self, signal: &SignalDefinition) -> Branch {
        self(signal)
    }
}

/// A generated lookup function
pub struct LookupFunction {
    name: String,
    namespace: Option<String>,
    result_type: String,
    parameters: Vec<String>,
    printer: Box<dyn BranchPrinter>,
    default: Vec<String>,
    description: Vec<String>,
}

/// Header declaration and source definition of one lookup function
pub struct LookupSections {
    pub header_decl: LookupDeclaration,
    pub source_def: LookupDefinition,
}

impl LookupFunction {
    pub fn new(
        name: impl Into<String>,
        result_type: impl Into<String>,
        printer: impl BranchPrinter + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            result_type: result_type.into(),
            parameters: Vec::new(),
            printer: Box::new(printer),
            default: Vec::new(),
            description: Vec::new(),
        }
    }

    /// Builder method: namespace used to qualify the source definition
    pub fn with_namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace.filter(|n| !n.is_empty()).map(str::to_string);
        self
    }

    pub fn with_parameters<S: Into<String>>(
        mut self,
        parameters: impl IntoIterator<Item = S>,
    ) -> Self {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: statements run when no branch matches
    pub fn with_default<S: Into<String>>(
        mut self,
        statements: impl IntoIterator<Item = S>,
    ) -> Self {
        self.default = statements.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: description lines; `<NAME>` becomes the function name
    pub fn with_description<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.description = lines.into_iter().map(Into::into).collect();
        self
    }

    /// `result name(params)`, optionally qualified with the namespace
    pub fn signature(&self, qualified: bool) -> String {
        let namespace_part = match (&self.namespace, qualified) {
            (Some(namespace), true) => format!("{}::", namespace),
            _ => String::new(),
        };

        format!(
            "{} {}{}({})",
            self.result_type,
            namespace_part,
            self.name,
            self.parameters.join(", ")
        )
    }

    /// Description block followed by the bare declaration
    pub fn declaration_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .description
            .iter()
            .map(|line| line.replace(NAME_PLACEHOLDER, &self.name))
            .collect();
        lines.push(format!("{};", self.signature(false)));
        lines
    }

    /// Full definition with the conditional chain in schema order
    pub fn definition_lines(&self, schema: &SignalSchema) -> Vec<String> {
        let mut lines = vec![self.signature(true), "{".to_string()];

        for (i, signal) in schema.iter().enumerate() {
            let branch = self.printer.branch(signal);
            let keyword = if i == 0 { "if" } else { "else if" };

            lines.push(indent_line(&format!("{} ({})", keyword, branch.condition), 1));
            lines.push(indent_line("{", 1));
            lines.extend(branch.statements.iter().map(|s| indent_line(s, 2)));
            lines.push(indent_line("}", 1));
        }

        if schema.is_empty() {
            lines.extend(self.default.iter().map(|s| indent_line(s, 1)));
        } else if !self.default.is_empty() {
            lines.push(indent_line("else", 1));
            lines.push(indent_line("{", 1));
            lines.extend(self.default.iter().map(|s| indent_line(s, 2)));
            lines.push(indent_line("}", 1));
        }

        lines.push("}".to_string());
        lines
    }

    /// Split into the generation units for the header and the source file
    pub fn build(self) -> LookupSections {
        let function = Rc::new(self);
        LookupSections {
            header_decl: LookupDeclaration(Rc::clone(&function)),
            source_def: LookupDefinition(function),
        }
    }
}

/// Header-side unit: description and declaration
pub struct LookupDeclaration(Rc<LookupFunction>);

impl CodegenUnit for LookupDeclaration {
    fn generate(&self, _schema: &SignalSchema) -> Vec<String> {
        self.0.declaration_lines()
    }
}

/// Source-side unit: the full definition
pub struct LookupDefinition(Rc<LookupFunction>);

impl CodegenUnit for LookupDefinition {
    fn generate(&self, schema: &SignalSchema) -> Vec<String> {
        self.0.definition_lines(schema)
    }
}
