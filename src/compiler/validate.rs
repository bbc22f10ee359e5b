//! Policy validation: the whitelist of node shapes a template may contain.
//!
//! Only identifiers, string/number/boolean literals and dotted member chains
//! over those are allowed as expressions. Module declarations are never
//! allowed. Anything not listed here is rejected, including shapes added to
//! the node model later.

use crate::ast::{
    Binding, Expression, MemberProperty, ModuleDeclKind, Program, Reference, Statement,
};
use crate::compiler::ErrorMode;
use crate::error::{Construct, JetError, PolicyViolation};
use tracing::debug;

/// Rejects module-level declarations among the direct statements of a file.
///
/// Every other statement form passes here; expression sites inside them are
/// checked by [`validate_expression`] when the driver reaches them.
pub fn validate_top_level(program: &Program) -> Result<(), PolicyViolation> {
    program.body.iter().try_for_each(validate_statement_kind)
}

/// Rejects a single statement if it is a module declaration.
pub fn validate_statement_kind(statement: &Statement) -> Result<(), PolicyViolation> {
    match statement {
        Statement::ModuleDecl { kind, span } => {
            let construct = match kind {
                ModuleDeclKind::Import => Construct::ImportDeclaration,
                ModuleDeclKind::ExportDefault => Construct::ExportDefault,
                ModuleDeclKind::ExportAll => Construct::ExportAll,
                ModuleDeclKind::ExportNamed => Construct::NamedExport,
                ModuleDeclKind::ExportSpecifier => Construct::ExportSpecifier,
            };
            Err(PolicyViolation::new(construct, *span))
        }
        Statement::Expression { .. }
        | Statement::Variable(_)
        | Statement::Empty { .. }
        | Statement::Unsupported { .. } => Ok(()),
    }
}

/// Checks that a declarator binds a plain name.
pub fn validate_binding(binding: &Binding) -> Result<&str, PolicyViolation> {
    match binding {
        Binding::Identifier(ident) => Ok(&ident.name),
        Binding::Pattern { span } => Err(PolicyViolation::new(Construct::DestructuringBinding, *span)),
    }
}

/// Checks an embedded expression and returns it as a plain data read.
///
/// Elements are not expressions in this sense; the transformer handles them
/// before asking here.
pub fn validate_expression(expr: &Expression) -> Result<Reference, PolicyViolation> {
    match expr {
        Expression::Identifier(ident) => Ok(Reference::Identifier(ident.name.clone())),
        Expression::Literal(lit) => Ok(Reference::Literal(lit.clone())),
        Expression::Member(member) => {
            let property = match &member.property {
                MemberProperty::Named(ident) => ident.name.clone(),
                MemberProperty::Computed(_) => {
                    return Err(PolicyViolation::new(Construct::ComputedMember, member.span));
                }
                MemberProperty::Private(span) => {
                    return Err(PolicyViolation::new(Construct::PrivateMember, *span));
                }
            };
            let object = validate_member_object(&member.object)?;
            Ok(Reference::Member {
                object: Box::new(object),
                property,
            })
        }
        Expression::Call(call) => Err(PolicyViolation::new(Construct::Call, call.span)),
        Expression::Binary(bin) if bin.is_logical() => {
            Err(PolicyViolation::new(Construct::Logical(bin.operator), bin.span))
        }
        Expression::Binary(bin) => Err(PolicyViolation::new(Construct::Binary(bin.operator), bin.span)),
        Expression::Unary(unary) => {
            Err(PolicyViolation::new(Construct::Unary(unary.operator), unary.span))
        }
        Expression::Conditional(cond) => Err(PolicyViolation::new(Construct::Conditional, cond.span)),
        Expression::Assignment(assign) => {
            Err(PolicyViolation::new(Construct::Assignment, assign.span))
        }
        Expression::Arrow(arrow) => Err(PolicyViolation::new(Construct::ArrowFunction, arrow.span)),
        Expression::Template(tpl) => Err(PolicyViolation::new(Construct::TemplateLiteral, tpl.span)),
        Expression::Element(element) => {
            Err(PolicyViolation::new(Construct::Unsupported("element in expression position"), element.span))
        }
        Expression::Unsupported { kind, span } => {
            Err(PolicyViolation::new(Construct::Unsupported(kind), *span))
        }
    }
}

/// The object of a member chain must itself be an identifier or a chain.
/// `"foo".length` is a literal receiver and is refused along with calls.
fn validate_member_object(object: &Expression) -> Result<Reference, PolicyViolation> {
    match object {
        Expression::Literal(lit) => Err(PolicyViolation::new(
            Construct::Unsupported("member access on a literal"),
            lit.span(),
        )),
        other => validate_expression(other),
    }
}

/// Applies the configured [`ErrorMode`] to validation results.
///
/// In [`ErrorMode::FirstViolation`] the first violation becomes the error.
/// In [`ErrorMode::Collect`] violations are stored and compilation carries on
/// so one pass can report all of them.
#[derive(Debug)]
pub struct ViolationSink {
    mode: ErrorMode,
    violations: Vec<PolicyViolation>,
}

impl ViolationSink {
    pub fn new(mode: ErrorMode) -> Self {
        Self {
            mode,
            violations: Vec::new(),
        }
    }

    /// Passes `Ok` through as `Some`. A violation is either returned as the
    /// error or recorded, in which case the caller gets `None` and skips the
    /// node.
    pub fn check<T>(&mut self, result: Result<T, PolicyViolation>) -> Result<Option<T>, JetError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(violation) => {
                self.reject(violation)?;
                Ok(None)
            }
        }
    }

    pub fn reject(&mut self, violation: PolicyViolation) -> Result<(), JetError> {
        debug!(
            construct = %violation.construct,
            start = violation.span.start,
            end = violation.span.end,
            "policy violation"
        );
        match self.mode {
            ErrorMode::FirstViolation => Err(violation.into()),
            ErrorMode::Collect => {
                self.violations.push(violation);
                Ok(())
            }
        }
    }

    /// Fails with every recorded violation in source order.
    pub fn finish(mut self) -> Result<(), JetError> {
        if self.violations.is_empty() {
            return Ok(());
        }
        self.violations.sort_by_key(|violation| violation.span.start);
        Err(JetError::Policy {
            violations: self.violations,
        })
    }
}
