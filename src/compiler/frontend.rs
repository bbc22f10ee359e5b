//! Host-parser boundary.
//!
//! Parses template source with swc and lowers the swc module into the
//! compiler's own node model. Nothing past this file knows about swc.

use swc_core::common::{BytePos, FileName, SourceMap, Span as SwcSpan, Spanned, sync::Lrc};
use swc_core::ecma::ast as swc;
use swc_core::ecma::parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax, error, lexer::Lexer};
use tracing::debug;

use super::{CompileConfig, SourceSyntax};
use crate::ast::{
    ArrowFunction, AssignmentExpression, Attribute, AttributeValue, BinaryExpression, Binding,
    CallExpression, Child, ConditionalExpression, Declarator, Expression, Identifier, Literal,
    MemberExpression, MemberProperty, ModuleDeclKind, Program, Span, Statement, TemplateElement,
    TemplateLiteral, UnaryExpression, VariableDeclaration, VariableKind,
};
use crate::error::JetError;

/// Parses a template file.
///
/// Any diagnostic from the parser, recoverable or not, fails with
/// [`JetError::Syntax`].
pub fn parse(source: &str, config: &CompileConfig) -> Result<Program, JetError> {
    let cm: Lrc<SourceMap> = Lrc::new(SourceMap::default());
    let fm = cm.new_source_file(
        FileName::Custom(config.filename.clone()).into(),
        source.to_string(),
    );
    let syntax = match config.syntax {
        SourceSyntax::Jsx => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
        SourceSyntax::Tsx => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
    };
    let lexer = Lexer::new(syntax, swc::EsVersion::latest(), StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);

    let lowering = Lowering {
        source,
        base: fm.start_pos,
    };
    let module = parser
        .parse_module()
        .map_err(|err| lowering.syntax_error(&err))?;
    if let Some(err) = parser.take_errors().first() {
        return Err(lowering.syntax_error(err));
    }

    let program = lowering.module(&module);
    debug!(
        file = %config.filename,
        statements = program.body.len(),
        "parsed template"
    );
    Ok(program)
}

struct Lowering<'a> {
    source: &'a str,
    base: BytePos,
}

impl Lowering<'_> {
    fn offset(&self, pos: BytePos) -> usize {
        pos.0.saturating_sub(self.base.0) as usize
    }

    fn span(&self, span: SwcSpan) -> Span {
        Span::new(self.offset(span.lo), self.offset(span.hi))
    }

    /// Source text under a span, empty if the span does not fall on char
    /// boundaries.
    fn text(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or_default()
    }

    fn syntax_error(&self, err: &error::Error) -> JetError {
        JetError::syntax(err.kind().msg(), self.source, self.span(err.span()))
    }

    fn module(&self, module: &swc::Module) -> Program {
        Program {
            body: module.body.iter().map(|item| self.module_item(item)).collect(),
            span: self.span(module.span),
        }
    }

    fn module_item(&self, item: &swc::ModuleItem) -> Statement {
        match item {
            swc::ModuleItem::ModuleDecl(decl) => {
                let kind = match decl {
                    swc::ModuleDecl::Import(_) | swc::ModuleDecl::TsImportEquals(_) => {
                        ModuleDeclKind::Import
                    }
                    swc::ModuleDecl::ExportDefaultDecl(_)
                    | swc::ModuleDecl::ExportDefaultExpr(_)
                    | swc::ModuleDecl::TsExportAssignment(_) => ModuleDeclKind::ExportDefault,
                    swc::ModuleDecl::ExportAll(_) => ModuleDeclKind::ExportAll,
                    swc::ModuleDecl::ExportNamed(named) if named.src.is_some() => {
                        ModuleDeclKind::ExportSpecifier
                    }
                    swc::ModuleDecl::ExportNamed(_)
                    | swc::ModuleDecl::ExportDecl(_)
                    | swc::ModuleDecl::TsNamespaceExport(_) => ModuleDeclKind::ExportNamed,
                };
                Statement::ModuleDecl {
                    kind,
                    span: self.span(decl.span()),
                }
            }
            swc::ModuleItem::Stmt(stmt) => self.stmt(stmt),
        }
    }

    fn stmt(&self, stmt: &swc::Stmt) -> Statement {
        let span = self.span(stmt.span());
        match stmt {
            swc::Stmt::Expr(expr_stmt) => Statement::Expression {
                expr: self.expr(&expr_stmt.expr),
                span,
            },
            swc::Stmt::Decl(swc::Decl::Var(var)) => Statement::Variable(self.var_decl(var)),
            swc::Stmt::Empty(_) => Statement::Empty { span },
            other => Statement::Unsupported {
                kind: stmt_kind(other),
                span,
            },
        }
    }

    fn var_decl(&self, var: &swc::VarDecl) -> VariableDeclaration {
        let kind = match var.kind {
            swc::VarDeclKind::Var => VariableKind::Var,
            swc::VarDeclKind::Let => VariableKind::Let,
            swc::VarDeclKind::Const => VariableKind::Const,
        };
        let declarators = var
            .decls
            .iter()
            .map(|decl| Declarator {
                binding: match &decl.name {
                    swc::Pat::Ident(binding) => Binding::Identifier(Identifier {
                        name: binding.id.sym.to_string(),
                        span: self.span(binding.id.span),
                    }),
                    other => Binding::Pattern {
                        span: self.span(other.span()),
                    },
                },
                init: decl.init.as_ref().map(|init| self.expr(init)),
                span: self.span(decl.span),
            })
            .collect();
        VariableDeclaration {
            kind,
            declarators,
            span: self.span(var.span),
        }
    }

    fn expr(&self, expr: &swc::Expr) -> Expression {
        let span = self.span(expr.span());
        match expr {
            swc::Expr::Ident(ident) => Expression::Identifier(Identifier {
                name: ident.sym.to_string(),
                span,
            }),
            swc::Expr::Lit(lit) => self.lit(lit, span),
            swc::Expr::Paren(paren) => self.expr(&paren.expr),
            swc::Expr::Member(member) => Expression::Member(MemberExpression {
                object: Box::new(self.expr(&member.obj)),
                property: match &member.prop {
                    swc::MemberProp::Ident(name) => MemberProperty::Named(Identifier {
                        name: name.sym.to_string(),
                        span: self.span(name.span),
                    }),
                    swc::MemberProp::Computed(computed) => {
                        MemberProperty::Computed(Box::new(self.expr(&computed.expr)))
                    }
                    swc::MemberProp::PrivateName(private) => {
                        MemberProperty::Private(self.span(private.span))
                    }
                },
                span,
            }),
            swc::Expr::Call(_) => Expression::Call(CallExpression { span }),
            swc::Expr::Bin(bin) => Expression::Binary(BinaryExpression {
                operator: binary_op(bin.op),
                span,
            }),
            swc::Expr::Unary(unary) => Expression::Unary(UnaryExpression {
                operator: unary_op(unary.op),
                span,
            }),
            swc::Expr::Update(update) => Expression::Unary(UnaryExpression {
                operator: match update.op {
                    swc::UpdateOp::PlusPlus => "++",
                    swc::UpdateOp::MinusMinus => "--",
                },
                span,
            }),
            swc::Expr::Cond(_) => Expression::Conditional(ConditionalExpression { span }),
            swc::Expr::Assign(_) => Expression::Assignment(AssignmentExpression { span }),
            swc::Expr::Arrow(_) => Expression::Arrow(ArrowFunction { span }),
            swc::Expr::Tpl(_) | swc::Expr::TaggedTpl(_) => {
                Expression::Template(TemplateLiteral { span })
            }
            swc::Expr::JSXElement(element) => Expression::Element(Box::new(self.element(element))),
            other => Expression::Unsupported {
                kind: expr_kind(other),
                span,
            },
        }
    }

    fn lit(&self, lit: &swc::Lit, span: Span) -> Expression {
        let literal = match lit {
            swc::Lit::Str(s) => match s.value.as_str() {
                Some(value) => Literal::String {
                    value: value.to_owned(),
                    span,
                },
                None => {
                    return Expression::Unsupported {
                        kind: "string with lone surrogates",
                        span,
                    };
                }
            },
            swc::Lit::Num(num) => Literal::Number {
                value: num.value,
                raw: self.text(span).to_owned(),
                span,
            },
            swc::Lit::Bool(b) => Literal::Boolean {
                value: b.value,
                span,
            },
            swc::Lit::Null(_) => {
                return Expression::Unsupported {
                    kind: "null literal",
                    span,
                };
            }
            swc::Lit::BigInt(_) => {
                return Expression::Unsupported {
                    kind: "bigint literal",
                    span,
                };
            }
            swc::Lit::Regex(_) => {
                return Expression::Unsupported {
                    kind: "regular expression",
                    span,
                };
            }
            swc::Lit::JSXText(_) => {
                return Expression::Unsupported {
                    kind: "markup text",
                    span,
                };
            }
        };
        Expression::Literal(literal)
    }

    fn element(&self, element: &swc::JSXElement) -> TemplateElement {
        TemplateElement {
            name: self.element_name(&element.opening.name),
            attributes: element
                .opening
                .attrs
                .iter()
                .map(|attr| self.attribute(attr))
                .collect(),
            children: element
                .children
                .iter()
                .map(|child| self.child(child))
                .collect(),
            self_closing: element.opening.self_closing,
            span: self.span(element.span),
        }
    }

    fn element_name(&self, name: &swc::JSXElementName) -> String {
        match name {
            swc::JSXElementName::Ident(ident) => ident.sym.to_string(),
            swc::JSXElementName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
            swc::JSXElementName::JSXMemberExpr(member) => {
                self.text(self.span(member.span())).to_owned()
            }
        }
    }

    fn attribute(&self, attr: &swc::JSXAttrOrSpread) -> Attribute {
        match attr {
            swc::JSXAttrOrSpread::JSXAttr(attr) => Attribute::Named {
                name: match &attr.name {
                    swc::JSXAttrName::Ident(ident) => ident.sym.to_string(),
                    swc::JSXAttrName::JSXNamespacedName(ns) => {
                        format!("{}:{}", ns.ns.sym, ns.name.sym)
                    }
                },
                value: attr.value.as_ref().map(|value| self.attribute_value(value)),
                span: self.span(attr.span),
            },
            swc::JSXAttrOrSpread::SpreadElement(spread) => Attribute::Spread {
                span: Span::new(
                    self.offset(spread.dot3_token.lo),
                    self.offset(spread.expr.span().hi),
                ),
            },
        }
    }

    fn attribute_value(&self, value: &swc::JSXAttrValue) -> AttributeValue {
        match value {
            swc::JSXAttrValue::Str(s) => {
                let span = self.span(s.span);
                // Character references are already decoded by the parser.
                match s.value.as_str() {
                    Some(value) => AttributeValue::String {
                        value: value.to_owned(),
                        span,
                    },
                    None => AttributeValue::Expression(Expression::Unsupported {
                        kind: "string with lone surrogates",
                        span,
                    }),
                }
            }
            swc::JSXAttrValue::JSXExprContainer(container) => match &container.expr {
                swc::JSXExpr::Expr(expr) => AttributeValue::Expression(self.expr(expr)),
                swc::JSXExpr::JSXEmptyExpr(empty) => AttributeValue::Empty {
                    span: self.span(empty.span),
                },
            },
            swc::JSXAttrValue::JSXElement(element) => {
                AttributeValue::Expression(Expression::Element(Box::new(self.element(element))))
            }
            swc::JSXAttrValue::JSXFragment(fragment) => {
                AttributeValue::Expression(Expression::Unsupported {
                    kind: "fragment",
                    span: self.span(fragment.span),
                })
            }
        }
    }

    fn child(&self, child: &swc::JSXElementChild) -> Child {
        match child {
            swc::JSXElementChild::JSXText(text) => {
                Child::Text {
                    value: text.value.to_string(),
                    span: self.span(text.span),
                }
            }
            swc::JSXElementChild::JSXExprContainer(container) => match &container.expr {
                swc::JSXExpr::Expr(expr) => Child::Expression(self.expr(expr)),
                swc::JSXExpr::JSXEmptyExpr(_) => Child::Empty {
                    span: self.span(container.span),
                },
            },
            swc::JSXElementChild::JSXElement(element) => {
                Child::Element(Box::new(self.element(element)))
            }
            swc::JSXElementChild::JSXFragment(fragment) => Child::Unsupported {
                kind: "fragment",
                span: self.span(fragment.span),
            },
            swc::JSXElementChild::JSXSpreadChild(spread) => Child::Unsupported {
                kind: "spread child",
                span: self.span(spread.span),
            },
        }
    }
}

fn stmt_kind(stmt: &swc::Stmt) -> &'static str {
    match stmt {
        swc::Stmt::Block(_) => "block",
        swc::Stmt::Debugger(_) => "debugger",
        swc::Stmt::With(_) => "with",
        swc::Stmt::Return(_) => "return",
        swc::Stmt::Labeled(_) => "labeled",
        swc::Stmt::Break(_) => "break",
        swc::Stmt::Continue(_) => "continue",
        swc::Stmt::If(_) => "if",
        swc::Stmt::Switch(_) => "switch",
        swc::Stmt::Throw(_) => "throw",
        swc::Stmt::Try(_) => "try",
        swc::Stmt::While(_) => "while",
        swc::Stmt::DoWhile(_) => "do-while",
        swc::Stmt::For(_) | swc::Stmt::ForIn(_) | swc::Stmt::ForOf(_) => "for",
        swc::Stmt::Decl(swc::Decl::Fn(_)) => "function",
        swc::Stmt::Decl(swc::Decl::Class(_)) => "class",
        swc::Stmt::Decl(swc::Decl::Using(_)) => "using",
        swc::Stmt::Decl(_) => "type declaration",
        swc::Stmt::Expr(_) => "expression",
        swc::Stmt::Empty(_) => "empty",
    }
}

fn expr_kind(expr: &swc::Expr) -> &'static str {
    match expr {
        swc::Expr::This(_) => "this",
        swc::Expr::Array(_) => "array literal",
        swc::Expr::Object(_) => "object literal",
        swc::Expr::Fn(_) => "function expression",
        swc::Expr::Class(_) => "class expression",
        swc::Expr::New(_) => "new expression",
        swc::Expr::Seq(_) => "sequence expression",
        swc::Expr::SuperProp(_) => "super property",
        swc::Expr::Yield(_) => "yield expression",
        swc::Expr::Await(_) => "await expression",
        swc::Expr::MetaProp(_) => "meta property",
        swc::Expr::OptChain(_) => "optional chain",
        swc::Expr::JSXFragment(_) => "fragment",
        swc::Expr::PrivateName(_) => "private name",
        swc::Expr::TsTypeAssertion(_)
        | swc::Expr::TsConstAssertion(_)
        | swc::Expr::TsNonNull(_)
        | swc::Expr::TsAs(_)
        | swc::Expr::TsInstantiation(_)
        | swc::Expr::TsSatisfies(_) => "type expression",
        _ => "expression",
    }
}

fn binary_op(op: swc::BinaryOp) -> &'static str {
    use swc::BinaryOp::*;
    match op {
        EqEq => "==",
        NotEq => "!=",
        EqEqEq => "===",
        NotEqEq => "!==",
        Lt => "<",
        LtEq => "<=",
        Gt => ">",
        GtEq => ">=",
        LShift => "<<",
        RShift => ">>",
        ZeroFillRShift => ">>>",
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Mod => "%",
        BitOr => "|",
        BitXor => "^",
        BitAnd => "&",
        LogicalOr => "||",
        LogicalAnd => "&&",
        In => "in",
        InstanceOf => "instanceof",
        Exp => "**",
        NullishCoalescing => "??",
    }
}

fn unary_op(op: swc::UnaryOp) -> &'static str {
    match op {
        swc::UnaryOp::Minus => "-",
        swc::UnaryOp::Plus => "+",
        swc::UnaryOp::Bang => "!",
        swc::UnaryOp::Tilde => "~",
        swc::UnaryOp::TypeOf => "typeof",
        swc::UnaryOp::Void => "void",
        swc::UnaryOp::Delete => "delete",
    }
}
