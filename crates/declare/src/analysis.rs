use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    compiler::{FormulaCompiler, OracleError},
    config::AnalysisOptions,
    model::DeclareModel,
    redundancy::{RedundancyAnalyzer, RedundancyError},
    template::{build_formula, proposition, ConstraintFormula, TemplateError},
};

/// The report of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub satisfiable: bool,
    pub redundant_constraints: Vec<ConstraintFormula>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("constraint on line {line}: {source}")]
    Template { line: usize, source: TemplateError },
    #[error("satisfiability check failed: {0}")]
    Satisfiability(#[source] OracleError),
    #[error(transparent)]
    Redundancy(#[from] RedundancyError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub satisfiable: bool,
    pub redundant_constraints: Vec<ConstraintFormula>,
}

/// Expand every constraint of `model` into its formula.
pub fn formulas(model: &DeclareModel) -> Result<Vec<ConstraintFormula>, AnalysisError> {
    model
        .constraints
        .iter()
        .map(|c| {
            build_formula(&c.template, &c.activities).map_err(|source| AnalysisError::Template {
                line: c.line,
                source,
            })
        })
        .collect()
}

/// Propositions of every declared and constrained activity.
fn universe(model: &DeclareModel, formulas: &[ConstraintFormula]) -> BTreeSet<String> {
    model
        .activities
        .iter()
        .chain(formulas.iter().flat_map(|f| &f.activities))
        .map(|a| proposition(a))
        .collect()
}

#[tracing::instrument(skip_all, fields(constraints = model.constraints.len()))]
pub fn try_analyze(
    model: &DeclareModel,
    options: &AnalysisOptions,
) -> Result<Analysis, AnalysisError> {
    let formulas = formulas(model)?;
    let compiler = options.compiler(universe(model, &formulas));
    analyze_formulas(&compiler, &formulas)
}

/// Satisfiability and redundancy of `formulas`. The automaton of the whole
/// model is built once and serves both checks.
pub fn analyze_formulas<C: FormulaCompiler + ?Sized>(
    compiler: &C,
    formulas: &[ConstraintFormula],
) -> Result<Analysis, AnalysisError> {
    let analyzer = RedundancyAnalyzer::new(compiler);
    let whole = analyzer
        .model_automaton(formulas)
        .map_err(|err| match err {
            RedundancyError::Model { source } => AnalysisError::Satisfiability(source),
            err => AnalysisError::Redundancy(err),
        })?;
    let satisfiable = !whole.is_empty();
    tracing::debug!(satisfiable, "checked satisfiability");

    let redundant_constraints = analyzer.redundant_constraints_of(&whole, formulas)?;

    tracing::info!(
        satisfiable,
        redundant = redundant_constraints.len(),
        "analysis finished"
    );
    Ok(Analysis {
        satisfiable,
        redundant_constraints,
    })
}

/// Analyze `model`, turning any failure into an unsuccessful report.
pub fn analyze(model: &DeclareModel, options: &AnalysisOptions) -> AnalysisResult {
    match try_analyze(model, options) {
        Ok(analysis) => AnalysisResult {
            success: true,
            satisfiable: analysis.satisfiable,
            redundant_constraints: analysis.redundant_constraints,
            error: None,
            timestamp: Utc::now(),
        },
        Err(err) => {
            tracing::error!(error = %err, "analysis failed");
            AnalysisResult {
                success: false,
                satisfiable: false,
                redundant_constraints: Vec::new(),
                error: Some(err.to_string()),
                timestamp: Utc::now(),
            }
        }
    }
}
