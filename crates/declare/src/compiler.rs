//! The boundary to the formula-to-automaton compiler.

use dfa::{Automaton, AutomatonError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not compile `{formula}`: {reason}")]
pub struct CompilerFailure {
    pub formula: String,
    pub reason: String,
}

/// Turns an LTLf formula into the text of an automaton description.
pub trait FormulaCompiler {
    fn compile(&self, formula: &str) -> Result<String, CompilerFailure>;
}

impl FormulaCompiler for ltlf::Compiler {
    fn compile(&self, formula: &str) -> Result<String, CompilerFailure> {
        ltlf::Compiler::compile(self, formula).map_err(|e| CompilerFailure {
            formula: formula.to_string(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, Error)]
pub enum OracleError {
    #[error(transparent)]
    Compiler(#[from] CompilerFailure),
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

/// Compile `formula` and read back the resulting description.
pub fn automaton_for<C: FormulaCompiler + ?Sized>(
    compiler: &C,
    formula: &str,
) -> Result<Automaton, OracleError> {
    let description = compiler.compile(formula)?;
    Ok(dfa::description::parse(&description)?)
}

/// Whether some sequence satisfies `formula`.
pub fn is_satisfiable<C: FormulaCompiler + ?Sized>(
    compiler: &C,
    formula: &str,
) -> Result<bool, OracleError> {
    let satisfiable = !automaton_for(compiler, formula)?.is_empty();
    tracing::debug!(formula, satisfiable, "checked satisfiability");
    Ok(satisfiable)
}
