//! Output side of the node model.
//!
//! Nothing in here can hold a call, an operator or a function, so a value of
//! [`OutputProgram`] is logic free by construction.

use super::{Literal, Span, VariableKind};

/// Namespace object the constructor hangs off.
pub const FACTORY_NAMESPACE: &str = "Easley";
/// Inner object under [`FACTORY_NAMESPACE`].
pub const FACTORY_MODULE: &str = "Jet";
/// Constructor function name.
pub const FACTORY_FUNCTION: &str = "create";

/// A plain data read that passed validation: identifier, literal or a
/// dotted member chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    Identifier(String),
    Literal(Literal),
    Member {
        object: Box<Reference>,
        property: String,
    },
}

impl Reference {
    /// Dotted path for identifiers and member chains, `None` for literals.
    pub fn path(&self) -> Option<String> {
        match self {
            Reference::Identifier(name) => Some(name.clone()),
            Reference::Literal(_) => None,
            Reference::Member { object, property } => {
                object.path().map(|base| format!("{base}.{property}"))
            }
        }
    }
}

/// `Easley.Jet.create(tag, attributes, ...children)`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCall {
    pub tag: String,
    /// `None` prints as `null`.
    pub attributes: Option<Vec<Property>>,
    pub children: Vec<Argument>,
    pub span: Span,
}

impl CreateCall {
    /// Number of positional arguments the printed call has.
    pub fn arity(&self) -> usize {
        2 + self.children.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Argument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey {
    /// Printed bare: `class: ...`
    Ident(String),
    /// Printed quoted: `"xlink:href": ...`
    Str(String),
}

impl PropertyKey {
    pub fn name(&self) -> &str {
        match self {
            PropertyKey::Ident(name) | PropertyKey::Str(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Str(String),
    Bool(bool),
    Reference(Reference),
    Create(Box<CreateCall>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputStatement {
    Expression(Argument),
    Variable {
        kind: VariableKind,
        declarators: Vec<(String, Option<Argument>)>,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputProgram {
    pub body: Vec<OutputStatement>,
}
