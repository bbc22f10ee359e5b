//! Prints an [`OutputProgram`] as JavaScript source.

use std::fmt::Write;

use crate::ast::{
    Argument, CreateCall, FACTORY_FUNCTION, FACTORY_MODULE, FACTORY_NAMESPACE, Literal,
    OutputProgram, OutputStatement, Property, PropertyKey, Reference,
};

/// Prints one statement per line, each terminated with `;`.
pub fn print_program(program: &OutputProgram) -> String {
    let mut out = String::new();
    for statement in &program.body {
        print_statement(&mut out, statement);
        out.push_str(";\n");
    }
    out
}

fn print_statement(out: &mut String, statement: &OutputStatement) {
    match statement {
        OutputStatement::Expression(argument) => print_argument(out, argument),
        OutputStatement::Variable { kind, declarators } => {
            out.push_str(kind.as_str());
            out.push(' ');
            for (idx, (name, init)) in declarators.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                out.push_str(name);
                if let Some(init) = init {
                    out.push_str(" = ");
                    print_argument(out, init);
                }
            }
        }
    }
}

fn print_argument(out: &mut String, argument: &Argument) {
    match argument {
        Argument::Str(value) => print_str(out, value),
        Argument::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
        Argument::Reference(reference) => print_reference(out, reference),
        Argument::Create(call) => print_create(out, call),
    }
}

fn print_create(out: &mut String, call: &CreateCall) {
    let _ = write!(out, "{FACTORY_NAMESPACE}.{FACTORY_MODULE}.{FACTORY_FUNCTION}(");
    print_str(out, &call.tag);
    out.push_str(", ");
    match &call.attributes {
        None => out.push_str("null"),
        Some(properties) => print_object(out, properties),
    }
    for child in &call.children {
        out.push_str(", ");
        print_argument(out, child);
    }
    out.push(')');
}

fn print_object(out: &mut String, properties: &[Property]) {
    if properties.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{ ");
    for (idx, property) in properties.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        match &property.key {
            PropertyKey::Ident(name) => out.push_str(name),
            PropertyKey::Str(name) => print_str(out, name),
        }
        out.push_str(": ");
        print_argument(out, &property.value);
    }
    out.push_str(" }");
}

fn print_reference(out: &mut String, reference: &Reference) {
    match reference {
        Reference::Identifier(name) => out.push_str(name),
        Reference::Literal(Literal::String { value, .. }) => print_str(out, value),
        Reference::Literal(Literal::Number { raw, .. }) => out.push_str(raw),
        Reference::Literal(Literal::Boolean { value, .. }) => {
            out.push_str(if *value { "true" } else { "false" })
        }
        Reference::Member { object, property } => {
            print_reference(out, object);
            out.push('.');
            out.push_str(property);
        }
    }
}

/// Double-quoted string literal with JSON-style escapes. U+2028 and U+2029
/// are escaped too since older engines treat them as line terminators.
fn print_str(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' | '\u{2029}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
