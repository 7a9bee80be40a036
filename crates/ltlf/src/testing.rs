//! Helpers shared by the unit tests of this crate.

use std::collections::BTreeSet;

use crate::{Compiler, Literal, LtlfExpression};

/// `expect!(@"...")` is a closure asserting an inline snapshot of its
/// argument.
#[macro_export]
macro_rules! expect_ {
    ($($t:tt)*) => {
        |res| ::insta::assert_snapshot!(res, $($t)*)
    };
}

pub use expect_ as expect;

/// A trace where position `i` holds exactly the propositions in `events[i]`.
pub fn trace(events: &[&[&str]]) -> Vec<BTreeSet<Literal>> {
    events
        .iter()
        .map(|e| e.iter().map(|p| Literal::from(*p)).collect())
        .collect()
}

pub fn holds(src: &str, events: &[&[&str]]) -> bool {
    LtlfExpression::parse(src).unwrap().nnf().holds(&trace(events))
}

pub fn check_nnf(src: &str, f: impl FnOnce(String)) {
    f(LtlfExpression::parse(src).unwrap().nnf().to_string())
}

pub fn check_automaton(compiler: &Compiler, formula: &str, f: impl FnOnce(String)) {
    f(compiler.compile_automaton(formula).unwrap().to_string())
}
