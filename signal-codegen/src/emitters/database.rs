//! Database initializer artifact (`gen_signal_database.cpp`)
//!
//! Defines `SignalDatabase::init_signals()`: one static signal instance per
//! definition, registered at its `signal_index()` slot. The runtime class
//! and its constructor arguments depend on the signal variant.

use crate::codegen::{CodeFile, Section, SignalPrinter};
use crate::config::{GeneratorConfig, IdentifierStyle};
use crate::emitters::identifiers::constant_name;
use crate::signals::{SignalDefinition, SignalKind, SignalKindTag};

/// Base name of the initializer source
pub const DATABASE_BASE_NAME: &str = "signal_database";

/// Digits after the decimal point for scaled resolutions
pub const RESOLUTION_DIGITS: usize = 24;

/// Format a value like C's `%.<digits>e` (two-digit signed exponent)
pub fn format_scientific(value: f64, digits: usize) -> String {
    let formatted = format!("{:.*e}", digits, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, magnitude) = match exponent.strip_prefix('-') {
                Some(magnitude) => ('-', magnitude),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, magnitude)
        }
        None => formatted,
    }
}

/// Resolution literal as written into generated constructor calls
pub fn format_resolution(resolution: f64) -> String {
    format_scientific(resolution, RESOLUTION_DIGITS)
}

/// Static instance + registration statement for each signal
struct SignalRegistration {
    style: IdentifierStyle,
}

impl SignalRegistration {
    fn constructor_args(&self, signal: &SignalDefinition) -> Vec<String> {
        let mut args = vec![constant_name(self.style, signal)];
        match &signal.kind {
            SignalKind::Base | SignalKind::Integer => {}
            SignalKind::Scaled { resolution, .. } => args.push(format_resolution(*resolution)),
            SignalKind::Data { size } => args.push(size.to_string()),
        }
        args
    }
}

impl SignalPrinter for SignalRegistration {
    fn print(&self, _index: usize, signal: &SignalDefinition) -> Vec<String> {
        let constant = constant_name(self.style, signal);
        let variable = format!("signal_{}", signal.variable_suffix());

        vec![
            format!(
                "static {} {}({});",
                signal.kind.tag().runtime_class(),
                variable,
                self.constructor_args(signal).join(", ")
            ),
            format!(
                "signal_array[{}.signal_index()] = dynamic_cast<{}*>(&{});",
                constant,
                SignalKindTag::Base.runtime_class(),
                variable
            ),
        ]
    }
}

/// Build the database initializer source file
pub fn database_file(config: &GeneratorConfig) -> CodeFile {
    let style = config.identifier_style;

    let mut file = CodeFile::source(DATABASE_BASE_NAME)
        .with_namespace(config.namespace())
        .with_banner(config.banner_lines());

    file.add_include("signal_database.h");
    for tag in SignalKindTag::ALL {
        file.add_include(tag.runtime_header());
    }
    file.add_include(CodeFile::header(style.base_name()).file_name());

    file.add_section(
        Section::new(SignalRegistration { style })
            .with_indent(1)
            .with_init_lines(["void SignalDatabase::init_signals()", "{"])
            .with_end_lines(["}"]),
    );

    file
}
