//! Redundancy and satisfiability analysis of Declare process models.
//!
//! Every constraint of a model is expanded into an LTLf formula through the
//! template catalog. A constraint is redundant when dropping it does not
//! change the language accepted by the automaton of the whole model.

pub mod analysis;
pub mod compiler;
pub mod config;
pub mod model;
pub mod redundancy;
pub mod template;

pub use analysis::{analyze, analyze_formulas, AnalysisError, AnalysisResult};
pub use compiler::{is_satisfiable, CompilerFailure, FormulaCompiler};
pub use config::{AnalysisOptions, ConfigError};
pub use model::{Constraint, DeclareModel, ModelError};
pub use redundancy::{RedundancyAnalyzer, RedundancyError};
pub use template::{build_formula, ConstraintFormula, Template, TemplateError};
