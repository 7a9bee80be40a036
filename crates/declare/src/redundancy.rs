use dfa::Automaton;
use indexmap::IndexSet;
use itertools::Itertools;
use thiserror::Error;

use crate::{
    compiler::{automaton_for, FormulaCompiler, OracleError},
    template::ConstraintFormula,
};

#[derive(Debug, Clone, Error)]
pub enum RedundancyError {
    #[error("failed to build the automaton of the whole model: {source}")]
    Model { source: OracleError },
    #[error("failed to build the automaton without constraint {index} ({template}): {source}")]
    WithoutConstraint {
        index: usize,
        template: String,
        source: OracleError,
    },
    #[error("failed to compare the automaton without constraint {index} ({template}): {source}")]
    Comparison {
        index: usize,
        template: String,
        source: dfa::AutomatonError,
    },
}

impl RedundancyError {
    /// The constraint being left out when the error happened, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            RedundancyError::Model { .. } => None,
            RedundancyError::WithoutConstraint { index, .. }
            | RedundancyError::Comparison { index, .. } => Some(*index),
        }
    }
}

/// `(f1) & (f2) & ...`, or `true` for no formulas.
pub fn conjunction<'a>(formulas: impl IntoIterator<Item = &'a str>) -> String {
    let conj = formulas.into_iter().map(|f| format!("({f})")).join(" & ");
    if conj.is_empty() {
        "true".to_string()
    } else {
        conj
    }
}

/// Finds the constraints implied by the conjunction of all the others.
///
/// Every automaton is produced by the same compiler, so all of them are built
/// over one alphabet.
pub struct RedundancyAnalyzer<'a, C: ?Sized> {
    compiler: &'a C,
}

impl<'a, C: FormulaCompiler + ?Sized> RedundancyAnalyzer<'a, C> {
    pub fn new(compiler: &'a C) -> Self {
        RedundancyAnalyzer { compiler }
    }

    /// The automaton of the conjunction of every formula.
    pub fn model_automaton(
        &self,
        formulas: &[ConstraintFormula],
    ) -> Result<Automaton, RedundancyError> {
        automaton_for(
            self.compiler,
            &conjunction(formulas.iter().map(|f| f.formula.as_str())),
        )
        .map_err(|source| RedundancyError::Model { source })
    }

    /// The redundant constraints of `formulas`, without repeated formulas and
    /// in the order they first appear.
    pub fn redundant_constraints(
        &self,
        formulas: &[ConstraintFormula],
    ) -> Result<Vec<ConstraintFormula>, RedundancyError> {
        if formulas.is_empty() {
            return Ok(Vec::new());
        }
        let original = self.model_automaton(formulas)?;
        self.redundant_constraints_of(&original, formulas)
    }

    /// Like [`redundant_constraints`](Self::redundant_constraints), with
    /// `original` already built by [`model_automaton`](Self::model_automaton).
    #[tracing::instrument(skip_all, fields(constraints = formulas.len()))]
    pub fn redundant_constraints_of(
        &self,
        original: &Automaton,
        formulas: &[ConstraintFormula],
    ) -> Result<Vec<ConstraintFormula>, RedundancyError> {
        let mut seen = IndexSet::new();
        let mut redundant = Vec::new();

        for (index, record) in formulas.iter().enumerate() {
            let others = formulas
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != index)
                .map(|(_, f)| f.formula.as_str());
            let combined = automaton_for(self.compiler, &conjunction(others)).map_err(|source| {
                RedundancyError::WithoutConstraint {
                    index,
                    template: record.template.clone(),
                    source,
                }
            })?;

            let counterexample = dfa::counterexample(original, &combined).map_err(|source| {
                RedundancyError::Comparison {
                    index,
                    template: record.template.clone(),
                    source,
                }
            })?;
            match counterexample {
                None => {
                    tracing::debug!(index, template = %record.template, "implied by the other constraints");
                    if seen.insert(record.formula.clone()) {
                        redundant.push(record.clone());
                    }
                }
                Some(word) => {
                    tracing::debug!(
                        index,
                        template = %record.template,
                        counterexample = %word.iter().format(", "),
                        "not redundant"
                    );
                }
            }
        }

        Ok(redundant)
    }
}
