//! Compiler pipeline for Jet templates.
//!
//! - Frontend: parses the source with swc and lowers it into [`crate::ast`]
//! - Validate: the logic-free whitelist
//! - Transform: elements into `Easley.Jet.create` calls
//! - Driver: per-file orchestration
//! - Codegen: prints the output program as JavaScript

mod codegen;
mod driver;
pub(crate) mod error_fmt;
mod frontend;
mod transform;
mod validate;
#[cfg(test)]
mod tests;

pub use codegen::print_program;
pub use driver::{compile_program, root_elements};
pub use frontend::parse;
pub use transform::{Transformer, is_identifier_name};
pub use validate::{ViolationSink, validate_binding, validate_expression, validate_top_level};

use tracing::trace;

use crate::error::JetError;

/// What to do when the policy finds a disallowed construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort on the first violation.
    #[default]
    FirstViolation,
    /// Finish the pass and report every violation together.
    Collect,
}

/// Host dialect the template is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceSyntax {
    /// JavaScript with JSX.
    #[default]
    Jsx,
    /// TypeScript with JSX. Type-level expression forms are still rejected.
    Tsx,
}

/// Configuration for one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileConfig {
    pub syntax: SourceSyntax,
    pub error_mode: ErrorMode,
    /// Shown in rendered diagnostics.
    pub filename: String,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            syntax: SourceSyntax::default(),
            error_mode: ErrorMode::default(),
            filename: "template.jsx".to_string(),
        }
    }
}

impl CompileConfig {
    pub fn syntax(mut self, syntax: SourceSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}

/// Parses, validates, transforms and prints a template file.
pub fn compile_template(source: &str, config: &CompileConfig) -> Result<String, JetError> {
    let program = parse(source, config)?;
    let output = compile_program(&program, config)?;
    let code = print_program(&output);
    trace!(file = %config.filename, %code, "compiled template");
    Ok(code)
}
