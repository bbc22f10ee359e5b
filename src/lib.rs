//! Compiler for Jet, a logic-free markup template language.
//!
//! A Jet template is written in element syntax:
//!
//! ```ignore
//! <div class="card">
//!     <h2>{ user.name }</h2>
//!     <img src={ user.avatar } />
//! </div>
//! ```
//!
//! and compiles to nested constructor calls:
//!
//! ```ignore
//! Easley.Jet.create("div", { class: "card" },
//!     Easley.Jet.create("h2", null, user.name),
//!     Easley.Jet.create("img", { src: user.avatar }));
//! ```
//!
//! Templates hold structure and plain data reads only. Identifiers, literals
//! and dotted member chains may be embedded; calls, operators, conditionals,
//! assignments, functions and template literals are rejected with
//! "Jet templates are logic free", as are module imports and exports.
//!
//! # Usage
//!
//! ```ignore
//! let code = easley_jet::compile(r#"<div class="foo">Foo</div>"#)?;
//! assert_eq!(code, "Easley.Jet.create(\"div\", { class: \"foo\" }, \"Foo\");\n");
//! ```
//!
//! Rust hosts can compile templates at build time with the `jet!` and
//! `jet_file!` macros from `easley_jet_macros`.

pub mod ast;
pub mod compiler;
mod error;

pub use compiler::{
    CompileConfig, ErrorMode, SourceSyntax, compile_program, parse, print_program,
};
pub use error::{Construct, JetError, LOGIC_FREE_MESSAGE, PolicyViolation};

/// Compiles a template with the default configuration.
pub fn compile(source: &str) -> Result<String, JetError> {
    compile_with_config(source, &CompileConfig::default())
}

/// Compiles a template into JavaScript source.
pub fn compile_with_config(source: &str, config: &CompileConfig) -> Result<String, JetError> {
    compiler::compile_template(source, config)
}
