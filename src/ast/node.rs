//! Input side of the node model: what the frontend hands to the compiler.
//!
//! The shapes here are deliberately small. Anything the host parser can
//! express that has no dedicated variant arrives as [`Expression::Unsupported`]
//! or [`Statement::Unsupported`] and is rejected by the validator.

use super::Span;

/// A parsed template file.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Statement>,
    pub span: Span,
}

/// Module-level declaration kinds. None of them is ever allowed in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleDeclKind {
    /// `import Foo from "foo"`
    Import,
    /// `export default "foo"`
    ExportDefault,
    /// `export * from "foo"`
    ExportAll,
    /// `export { a, b as c }` and `export const a = 1`
    ExportNamed,
    /// `export { a } from "foo"`
    ExportSpecifier,
}

/// One top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    ModuleDecl { kind: ModuleDeclKind, span: Span },
    Expression { expr: Expression, span: Span },
    Variable(VariableDeclaration),
    Empty { span: Span },
    Unsupported { kind: &'static str, span: Span },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarators: Vec<Declarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub binding: Binding,
    pub init: Option<Expression>,
    pub span: Span,
}

/// Left-hand side of a declarator. Destructuring patterns are kept opaque.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Identifier(Identifier),
    Pattern { span: Span },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String { value: String, span: Span },
    /// `raw` is the literal exactly as written in the source.
    Number { value: f64, raw: String, span: Span },
    Boolean { value: bool, span: Span },
}

impl Literal {
    pub fn span(&self) -> Span {
        match self {
            Literal::String { span, .. }
            | Literal::Number { span, .. }
            | Literal::Boolean { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// `obj.name`
    Named(Identifier),
    /// `obj[expr]`
    Computed(Box<Expression>),
    /// `obj.#name`
    Private(Span),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: MemberProperty,
    pub span: Span,
}

// The shapes below exist only to be rejected, so they carry no operands.

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub span: Span,
}

/// Arithmetic, comparison and logical (`&&`, `||`, `??`) operators.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub operator: &'static str,
    pub span: Span,
}

impl BinaryExpression {
    pub fn is_logical(&self) -> bool {
        matches!(self.operator, "&&" | "||" | "??")
    }
}

/// Prefix and postfix operators, including `typeof`, `delete` and `++`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub operator: &'static str,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunction {
    pub span: Span,
}

/// A backtick literal, tagged or not.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Literal(Literal),
    Member(MemberExpression),
    Call(CallExpression),
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Conditional(ConditionalExpression),
    Assignment(AssignmentExpression),
    Arrow(ArrowFunction),
    Template(TemplateLiteral),
    Element(Box<TemplateElement>),
    Unsupported { kind: &'static str, span: Span },
}

/// A markup element: `<tag attr="v">children</tag>` or `<tag />`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    /// Tag name as written, namespace prefix included (`svg:rect`).
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Child>,
    pub self_closing: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Named {
        /// Attribute name as written, namespace prefix included (`xlink:href`).
        name: String,
        value: Option<AttributeValue>,
        span: Span,
    },
    /// `{...props}`
    Spread { span: Span },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// `name="text"`; the text is taken verbatim, without the quotes.
    String { value: String, span: Span },
    /// `name={expr}`
    Expression(Expression),
    /// `name={}`
    Empty { span: Span },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Text { value: String, span: Span },
    Element(Box<TemplateElement>),
    Expression(Expression),
    /// `{}` or `{/* comment */}`
    Empty { span: Span },
    /// `<>...</>` or `{...items}`
    Unsupported { kind: &'static str, span: Span },
}
