//! Element transformation: one template element becomes one
//! `Easley.Jet.create(tag, attributes, ...children)` call.

use tracing::trace;

use super::ErrorMode;
use super::validate::{ViolationSink, validate_expression};
use crate::ast::{
    Argument, Attribute, AttributeValue, Child, CreateCall, Expression, Property, PropertyKey,
    TemplateElement,
};
use crate::error::{Construct, JetError, PolicyViolation};

/// Recursive element-to-call transformer.
///
/// Owns the [`ViolationSink`] for one file so the driver and the transformer
/// report through the same error mode.
#[derive(Debug)]
pub struct Transformer {
    sink: ViolationSink,
    elements: usize,
}

impl Transformer {
    pub fn new(mode: ErrorMode) -> Self {
        Self {
            sink: ViolationSink::new(mode),
            elements: 0,
        }
    }

    pub fn sink(&mut self) -> &mut ViolationSink {
        &mut self.sink
    }

    /// Number of elements transformed so far, nested ones included.
    pub fn elements(&self) -> usize {
        self.elements
    }

    pub fn finish(self) -> Result<(), JetError> {
        self.sink.finish()
    }

    pub fn transform_element(&mut self, element: &TemplateElement) -> Result<CreateCall, JetError> {
        trace!(
            tag = %element.name,
            attributes = element.attributes.len(),
            children = element.children.len(),
            self_closing = element.self_closing,
            "transforming element"
        );
        self.elements += 1;

        let attributes = self.transform_attributes(&element.attributes)?;
        let mut children = Vec::with_capacity(element.children.len());
        for child in &element.children {
            if let Some(argument) = self.transform_child(child)? {
                children.push(argument);
            }
        }

        Ok(CreateCall {
            tag: element.name.clone(),
            attributes,
            children,
            span: element.span,
        })
    }

    /// Lowers an embedded expression: nested elements are transformed, every
    /// other shape has to pass the validator.
    pub fn embed(&mut self, expr: &Expression) -> Result<Option<Argument>, JetError> {
        if let Expression::Element(element) = expr {
            let call = self.transform_element(element)?;
            return Ok(Some(Argument::Create(Box::new(call))));
        }
        let reference = self.sink.check(validate_expression(expr))?;
        Ok(reference.map(Argument::Reference))
    }

    fn transform_attributes(
        &mut self,
        attributes: &[Attribute],
    ) -> Result<Option<Vec<Property>>, JetError> {
        if attributes.is_empty() {
            return Ok(None);
        }

        let mut properties = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            let (name, value) = match attribute {
                Attribute::Named { name, value, .. } => (name, value),
                Attribute::Spread { span } => {
                    self.sink
                        .reject(PolicyViolation::new(Construct::SpreadAttribute, *span))?;
                    continue;
                }
            };

            let value = match value {
                // `<input disabled />`
                None => Some(Argument::Bool(true)),
                Some(AttributeValue::String { value, .. }) => Some(Argument::Str(value.clone())),
                Some(AttributeValue::Expression(expr)) => self.embed(expr)?,
                Some(AttributeValue::Empty { span }) => {
                    self.sink.reject(PolicyViolation::new(
                        Construct::Unsupported("empty attribute expression"),
                        *span,
                    ))?;
                    None
                }
            };

            if let Some(value) = value {
                properties.push(Property {
                    key: property_key(name),
                    value,
                });
            }
        }

        Ok(Some(properties))
    }

    fn transform_child(&mut self, child: &Child) -> Result<Option<Argument>, JetError> {
        match child {
            Child::Text { value, .. } if is_markup_whitespace(value) => Ok(None),
            Child::Text { value, .. } => Ok(Some(Argument::Str(value.clone()))),
            Child::Element(element) => {
                let call = self.transform_element(element)?;
                Ok(Some(Argument::Create(Box::new(call))))
            }
            Child::Expression(expr) => self.embed(expr),
            Child::Empty { .. } => Ok(None),
            Child::Unsupported { kind, span } => {
                self.sink
                    .reject(PolicyViolation::new(Construct::Unsupported(kind), *span))?;
                Ok(None)
            }
        }
    }
}

/// Text made only of spaces, tabs and line breaks separates siblings and is
/// not content.
fn is_markup_whitespace(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
}

fn property_key(name: &str) -> PropertyKey {
    if is_identifier_name(name) {
        PropertyKey::Ident(name.to_owned())
    } else {
        PropertyKey::Str(name.to_owned())
    }
}

/// Whether `name` can be written as an unquoted object key.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '$' || first == '_' || first.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '$' || c == '_' || c.is_alphanumeric())
}
