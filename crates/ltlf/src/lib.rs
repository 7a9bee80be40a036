//! Linear temporal logic over finite traces (LTLf).
//!
//! Formulas are parsed from the usual textual syntax, normalized into
//! negation normal form and compiled into deterministic automata by formula
//! progression. The automata are printed in the MONA description format so
//! that they can be read back with [`dfa::description::parse`].

extern crate plex;

pub mod compiler;
pub mod expression;
mod nodes;
pub mod parser;
#[cfg(test)]
pub mod testing;

pub use compiler::{CompileError, Compiler, EventSemantics};
pub use expression::{Literal, LtlfExpression, NnfLtlf};
pub use parser::ParseError;
