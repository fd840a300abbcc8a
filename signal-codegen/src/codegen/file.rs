//! Generated file assembly
//!
//! A [`CodeFile`] concatenates its sections between a fixed prologue
//! (banner, includes, include guard / namespace) and epilogue, then writes
//! the result to `<target_dir>/gen_<base_name>.<h|cpp>`.

use crate::codegen::section::CodegenUnit;
use crate::signals::SignalSchema;
use crate::types::{CodegenError, Result};
use std::path::{Path, PathBuf};

/// Kind of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Header,
    Source,
}

impl FileKind {
    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Header => "h",
            FileKind::Source => "cpp",
        }
    }
}

/// A preprocessor include
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Include {
    /// `#include "file"`
    Local(String),
    /// `#include <file>`
    System(String),
}

impl Include {
    pub fn directive(&self) -> String {
        match self {
            Include::Local(file) => format!("#include \"{}\"", file),
            Include::System(file) => format!("#include <{}>", file),
        }
    }
}

/// Fail unless `path` is an existing directory
pub fn check_target_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CodegenError::TargetDirectory {
            path: path.to_path_buf(),
            reason: "does not exist".to_string(),
        });
    }
    if !path.is_dir() {
        return Err(CodegenError::TargetDirectory {
            path: path.to_path_buf(),
            reason: "is not a directory".to_string(),
        });
    }
    Ok(())
}

/// One generated header or source file
pub struct CodeFile {
    base_name: String,
    kind: FileKind,
    namespace: Option<String>,
    guard_prefix: Option<String>,
    banner: Vec<String>,
    includes: Vec<Include>,
    sections: Vec<Box<dyn CodegenUnit>>,
    /// Output buffer, cleared before every render
    lines: Vec<String>,
}

impl CodeFile {
    pub fn new(base_name: impl Into<String>, kind: FileKind) -> Self {
        Self {
            base_name: base_name.into(),
            kind,
            namespace: None,
            guard_prefix: None,
            banner: vec!["// This file is auto-generated".to_string(), String::new()],
            includes: Vec::new(),
            sections: Vec::new(),
            lines: Vec::new(),
        }
    }

    pub fn header(base_name: impl Into<String>) -> Self {
        Self::new(base_name, FileKind::Header)
    }

    pub fn source(base_name: impl Into<String>) -> Self {
        Self::new(base_name, FileKind::Source)
    }

    /// Builder method: set the namespace (None or empty disables it)
    pub fn with_namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace.filter(|n| !n.is_empty()).map(str::to_string);
        self
    }

    /// Builder method: prefix for the include guard token
    pub fn with_guard_prefix(mut self, prefix: Option<&str>) -> Self {
        self.guard_prefix = prefix.map(str::to_string);
        self
    }

    /// Builder method: replace the banner lines at the top of the file
    pub fn with_banner(mut self, banner: Vec<String>) -> Self {
        self.banner = banner;
        self
    }

    pub fn add_include(&mut self, file: impl Into<String>) {
        self.includes.push(Include::Local(file.into()));
    }

    pub fn add_system_include(&mut self, file: impl Into<String>) {
        self.includes.push(Include::System(file.into()));
    }

    pub fn add_section(&mut self, section: impl CodegenUnit + 'static) {
        self.sections.push(Box::new(section));
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// `gen_<base_name>`
    pub fn generated_base_name(&self) -> String {
        format!("gen_{}", self.base_name)
    }

    /// `gen_<base_name>.<ext>`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.generated_base_name(), self.kind.extension())
    }

    /// Include guard token, e.g. `GEN_SIGNAL_ID_H`
    pub fn header_guard(&self) -> String {
        format!(
            "{}{}_H",
            self.guard_prefix.as_deref().unwrap_or(""),
            self.generated_base_name().to_uppercase()
        )
    }

    /// Rebuild the line buffer for a schema
    pub fn render(&mut self, schema: &SignalSchema) -> &[String] {
        self.lines.clear();

        self.print_init();

        let mut section_lines = Vec::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                section_lines.push(String::new());
            }
            section_lines.extend(section.generate(schema));
        }
        self.lines.extend(section_lines);

        self.print_end();

        for line in self.lines.iter_mut() {
            let trimmed_len = line.trim_end().len();
            line.truncate(trimmed_len);
        }

        log::debug!(
            "Rendered {} ({} sections, {} lines)",
            self.file_name(),
            self.sections.len(),
            self.lines.len()
        );

        &self.lines
    }

    /// The current buffer as file contents
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    /// Render against `schema` and write to `target_dir`
    pub fn generate(&mut self, target_dir: &Path, schema: &SignalSchema) -> Result<PathBuf> {
        check_target_dir(target_dir)?;

        self.render(schema);
        let path = target_dir.join(self.file_name());
        std::fs::write(&path, self.contents())?;

        log::info!("Wrote {:?}", path);
        Ok(path)
    }

    fn print_init(&mut self) {
        self.lines.extend(self.banner.iter().cloned());

        if !self.includes.is_empty() {
            let directives: Vec<String> =
                self.includes.iter().map(Include::directive).collect();
            self.lines.extend(directives);
            self.lines.push(String::new());
        }

        match self.kind {
            FileKind::Header => {
                let guard = self.header_guard();
                self.lines.push(format!("#ifndef {}", guard));
                self.lines.push(format!("#define {}", guard));
                self.lines.push(String::new());

                if let Some(namespace) = &self.namespace {
                    self.lines.push(format!("namespace {}", namespace));
                    self.lines.push("{".to_string());
                    self.lines.push(String::new());
                }
            }
            FileKind::Source => {
                if let Some(namespace) = &self.namespace {
                    self.lines.push(format!("using namespace {};", namespace));
                    self.lines.push(String::new());
                }
            }
        }
    }

    fn print_end(&mut self) {
        if self.kind == FileKind::Header {
            if self.namespace.is_some() {
                self.lines.push(String::new());
                self.lines.push("}".to_string());
            }

            let guard = self.header_guard();
            self.lines.push(String::new());
            self.lines.push(format!("#endif // {}", guard));
            self.lines.push(String::new());
        }

        if self.lines.last().map_or(true, |line| !line.is_empty()) {
            self.lines.push(String::new());
        }
    }
}
