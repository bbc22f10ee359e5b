//! Per-file driver: top-level policy, then transformation of every template
//! element found at a statement's expression site.

use tracing::debug;

use super::transform::Transformer;
use super::validate::{validate_binding, validate_statement_kind, validate_top_level};
use super::{CompileConfig, ErrorMode};
use crate::ast::{
    Expression, OutputProgram, OutputStatement, Program, Statement, TemplateElement,
};
use crate::error::{Construct, JetError, PolicyViolation};

/// Compiles one parsed file.
///
/// Module declarations are checked across the whole file before any element
/// is touched, so in the default error mode a stray `export` is reported even
/// when an earlier element is also at fault.
pub fn compile_program(program: &Program, config: &CompileConfig) -> Result<OutputProgram, JetError> {
    debug!(
        statements = program.body.len(),
        roots = root_elements(program).count(),
        mode = ?config.error_mode,
        "compiling template file"
    );

    let mut transformer = Transformer::new(config.error_mode);
    match config.error_mode {
        ErrorMode::FirstViolation => validate_top_level(program)?,
        ErrorMode::Collect => {
            for statement in &program.body {
                transformer.sink().check(validate_statement_kind(statement))?;
            }
        }
    }

    let mut body = Vec::with_capacity(program.body.len());
    for statement in &program.body {
        if let Some(output) = compile_statement(&mut transformer, statement)? {
            body.push(output);
        }
    }

    let elements = transformer.elements();
    transformer.finish()?;
    debug!(elements, "template file compiled");
    Ok(OutputProgram { body })
}

/// Template elements written directly at a statement's expression site.
pub fn root_elements(program: &Program) -> impl Iterator<Item = &TemplateElement> {
    program.body.iter().flat_map(|statement| {
        let exprs: Vec<&Expression> = match statement {
            Statement::Expression { expr, .. } => vec![expr],
            Statement::Variable(decl) => decl
                .declarators
                .iter()
                .filter_map(|declarator| declarator.init.as_ref())
                .collect(),
            Statement::ModuleDecl { .. } | Statement::Empty { .. } | Statement::Unsupported { .. } => {
                Vec::new()
            }
        };
        exprs.into_iter().filter_map(|expr| match expr {
            Expression::Element(element) => Some(&**element),
            _ => None,
        })
    })
}

fn compile_statement(
    transformer: &mut Transformer,
    statement: &Statement,
) -> Result<Option<OutputStatement>, JetError> {
    match statement {
        // Already reported by the top-level pass.
        Statement::ModuleDecl { .. } | Statement::Empty { .. } => Ok(None),
        Statement::Expression { expr, .. } => {
            Ok(transformer.embed(expr)?.map(OutputStatement::Expression))
        }
        Statement::Variable(decl) => {
            let mut declarators = Vec::with_capacity(decl.declarators.len());
            for declarator in &decl.declarators {
                let name = transformer.sink().check(validate_binding(&declarator.binding))?;
                let init = match &declarator.init {
                    Some(expr) => transformer.embed(expr)?,
                    None => None,
                };
                if let Some(name) = name {
                    declarators.push((name.to_owned(), init));
                }
            }
            Ok(Some(OutputStatement::Variable {
                kind: decl.kind,
                declarators,
            }))
        }
        Statement::Unsupported { kind, span } => {
            transformer
                .sink()
                .reject(PolicyViolation::new(Construct::Statement(kind), *span))?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        Argument, Binding, CallExpression, Declarator, Identifier, Literal, ModuleDeclKind,
        Reference, Span, VariableDeclaration, VariableKind,
    };

    fn program(body: Vec<Statement>) -> Program {
        Program {
            body,
            span: Span::default(),
        }
    }

    fn div() -> Statement {
        Statement::Expression {
            expr: Expression::Element(Box::new(TemplateElement {
                name: "div".into(),
                attributes: vec![],
                children: vec![],
                self_closing: true,
                span: Span::new(0, 7),
            })),
            span: Span::new(0, 7),
        }
    }

    fn call_stmt(start: usize) -> Statement {
        Statement::Expression {
            expr: Expression::Call(CallExpression {
                span: Span::new(start, start + 3),
            }),
            span: Span::new(start, start + 3),
        }
    }

    fn export(start: usize) -> Statement {
        Statement::ModuleDecl {
            kind: ModuleDeclKind::ExportDefault,
            span: Span::new(start, start + 20),
        }
    }

    #[test]
    fn root_element_becomes_create_call() {
        let output = compile_program(&program(vec![div()]), &CompileConfig::default()).unwrap();
        assert_eq!(output.body.len(), 1);
        match &output.body[0] {
            OutputStatement::Expression(Argument::Create(call)) => assert_eq!(call.tag, "div"),
            other => panic!("unexpected statement {other:?}"),
        }
    }

    #[test]
    fn module_declarations_win_over_earlier_expression_violations() {
        let err = compile_program(&program(vec![call_stmt(0), export(10)]), &CompileConfig::default())
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].construct, Construct::ExportDefault);
    }

    #[test]
    fn first_violation_mode_reports_the_first_module_declaration() {
        let import = Statement::ModuleDecl {
            kind: ModuleDeclKind::Import,
            span: Span::new(30, 50),
        };
        let err = compile_program(&program(vec![div(), export(10), import]), &CompileConfig::default())
            .unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].construct, Construct::ExportDefault);
        assert_eq!(err.violations()[0].span, Span::new(10, 30));
    }

    #[test]
    fn collect_mode_reports_everything() {
        let config = CompileConfig::default().error_mode(ErrorMode::Collect);
        let err = compile_program(
            &program(vec![
                call_stmt(0),
                export(10),
                Statement::Unsupported {
                    kind: "if",
                    span: Span::new(40, 50),
                },
            ]),
            &config,
        )
        .unwrap_err();
        let constructs: Vec<_> = err.violations().iter().map(|v| v.construct).collect();
        assert_eq!(
            constructs,
            vec![Construct::Call, Construct::ExportDefault, Construct::Statement("if")]
        );
    }

    #[test]
    fn plain_variable_declarations_pass_through() {
        let decl = Statement::Variable(VariableDeclaration {
            kind: VariableKind::Const,
            declarators: vec![Declarator {
                binding: Binding::Identifier(Identifier {
                    name: "title".into(),
                    span: Span::default(),
                }),
                init: Some(Expression::Literal(Literal::String {
                    value: "Home".into(),
                    span: Span::default(),
                })),
                span: Span::default(),
            }],
            span: Span::default(),
        });
        let output = compile_program(&program(vec![decl, div()]), &CompileConfig::default()).unwrap();
        assert_eq!(
            output.body[0],
            OutputStatement::Variable {
                kind: VariableKind::Const,
                declarators: vec![(
                    "title".into(),
                    Some(Argument::Reference(Reference::Literal(Literal::String {
                        value: "Home".into(),
                        span: Span::default(),
                    })))
                )],
            }
        );
    }

    #[test]
    fn finds_roots_in_statements_and_initializers() {
        let decl = Statement::Variable(VariableDeclaration {
            kind: VariableKind::Let,
            declarators: vec![Declarator {
                binding: Binding::Identifier(Identifier {
                    name: "page".into(),
                    span: Span::default(),
                }),
                init: Some(Expression::Element(Box::new(TemplateElement {
                    name: "main".into(),
                    attributes: vec![],
                    children: vec![],
                    self_closing: true,
                    span: Span::default(),
                }))),
                span: Span::default(),
            }],
            span: Span::default(),
        });
        let program = program(vec![div(), Statement::Empty { span: Span::default() }, decl]);
        let names: Vec<_> = root_elements(&program).map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["div", "main"]);
    }
}
