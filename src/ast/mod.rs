//! Node model shared by the frontend, the compiler and the printer.
//!
//! The compiler never sees the host parser's own tree. The frontend lowers it
//! into node shapes, the compiler produces output shapes.

mod node;
mod output;

pub use node::*;
pub use output::*;

/// Byte range into the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}
