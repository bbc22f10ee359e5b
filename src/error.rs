//! Errors raised while compiling a template.
//!
//! There are exactly two classes. A [`JetError::Syntax`] comes from the host
//! parser and is passed through; a [`JetError::Policy`] means the template
//! parsed but contains something other than structure and plain data reads.

use std::fmt;

use thiserror::Error;

use crate::ast::Span;
use crate::compiler::error_fmt::{ErrorFormat, SourceLocation};

/// Message carried by every policy failure.
pub const LOGIC_FREE_MESSAGE: &str = "Jet templates are logic free";

/// The node shape that tripped the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    ImportDeclaration,
    ExportDefault,
    ExportAll,
    NamedExport,
    ExportSpecifier,
    Statement(&'static str),
    DestructuringBinding,
    Call,
    Binary(&'static str),
    Logical(&'static str),
    Unary(&'static str),
    Conditional,
    Assignment,
    ArrowFunction,
    TemplateLiteral,
    ComputedMember,
    PrivateMember,
    SpreadAttribute,
    Unsupported(&'static str),
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::ImportDeclaration => f.write_str("import declaration"),
            Construct::ExportDefault => f.write_str("export default declaration"),
            Construct::ExportAll => f.write_str("export all declaration"),
            Construct::NamedExport => f.write_str("named export declaration"),
            Construct::ExportSpecifier => f.write_str("re-export declaration"),
            Construct::Statement(kind) => write!(f, "{kind} statement"),
            Construct::DestructuringBinding => f.write_str("destructuring binding"),
            Construct::Call => f.write_str("call expression"),
            Construct::Binary(op) => write!(f, "`{op}` operator"),
            Construct::Logical(op) => write!(f, "logical `{op}` operator"),
            Construct::Unary(op) => write!(f, "`{op}` operator"),
            Construct::Conditional => f.write_str("conditional expression"),
            Construct::Assignment => f.write_str("assignment"),
            Construct::ArrowFunction => f.write_str("arrow function"),
            Construct::TemplateLiteral => f.write_str("template literal"),
            Construct::ComputedMember => f.write_str("computed member access"),
            Construct::PrivateMember => f.write_str("private member access"),
            Construct::SpreadAttribute => f.write_str("spread attribute"),
            Construct::Unsupported(kind) => f.write_str(kind),
        }
    }
}

/// A single disallowed node and where it sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Jet templates are logic free")]
pub struct PolicyViolation {
    pub construct: Construct,
    pub span: Span,
}

impl PolicyViolation {
    pub fn new(construct: Construct, span: Span) -> Self {
        Self { construct, span }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JetError {
    /// The host parser rejected the input.
    #[error("Unexpected token ({line}:{column}): {diagnostic}")]
    Syntax {
        diagnostic: String,
        line: usize,
        column: usize,
        span: Span,
    },
    /// The input parsed but is not logic free. Never empty; ordered by
    /// position in the source.
    #[error("Jet templates are logic free")]
    Policy { violations: Vec<PolicyViolation> },
}

impl JetError {
    pub(crate) fn syntax(diagnostic: impl Into<String>, source: &str, span: Span) -> Self {
        let loc = SourceLocation::from_offset(source, span.start);
        JetError::Syntax {
            diagnostic: diagnostic.into(),
            line: loc.line,
            column: loc.column,
            span,
        }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, JetError::Syntax { .. })
    }

    pub fn is_policy(&self) -> bool {
        matches!(self, JetError::Policy { .. })
    }

    pub fn violations(&self) -> &[PolicyViolation] {
        match self {
            JetError::Policy { violations } => violations,
            JetError::Syntax { .. } => &[],
        }
    }

    /// Renders the error with source context, one block per violation.
    pub fn render(&self, source: &str, filename: &str) -> String {
        match self {
            JetError::Syntax {
                diagnostic, span, ..
            } => ErrorFormat::new("Unexpected token", source, span.start)
                .filename(filename)
                .annotation(diagnostic.clone())
                .format(),
            JetError::Policy { violations } => violations
                .iter()
                .map(|violation| {
                    ErrorFormat::new(LOGIC_FREE_MESSAGE, source, violation.span.start)
                        .filename(filename)
                        .annotation(violation.construct.to_string())
                        .help("templates may only contain elements, attributes, literals and member reads")
                        .format()
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<PolicyViolation> for JetError {
    fn from(violation: PolicyViolation) -> Self {
        JetError::Policy {
            violations: vec![violation],
        }
    }
}
