use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Template {
    Init,
    Existence,
    Existence2,
    Existence3,
    Absence,
    Absence2,
    Absence3,
    Exactly1,
    Exactly2,
    Choice,
    ExclusiveChoice,
    RespondedExistence,
    CoExistence,
    Response,
    AlternateResponse,
    ChainResponse,
    Precedence,
    AlternatePrecedence,
    ChainPrecedence,
    Succession,
    AlternateSuccession,
    ChainSuccession,
    NotCoExistence,
    NotRespondedExistence,
    NotResponse,
    NotPrecedence,
    NotSuccession,
    NotChainResponse,
    NotChainPrecedence,
    NotChainSuccession,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown template `{0}`")]
    UnknownTemplate(String),
    #[error("template `{template}` takes {expected} activities, got {actual}")]
    ArityMismatch {
        template: Template,
        expected: usize,
        actual: usize,
    },
}

/// A constraint expanded into its LTLf formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstraintFormula {
    pub template: String,
    pub activities: Vec<String>,
    pub formula: String,
}

static CATALOG: Lazy<IndexMap<&'static str, Template>> = Lazy::new(|| {
    let catalog: IndexMap<_, _> = Template::ALL.iter().map(|t| (t.name(), *t)).collect();
    if catalog.len() != Template::ALL.len() {
        tracing::error!(
            templates = Template::ALL.len(),
            names = catalog.len(),
            "template names are not unique"
        );
    }
    catalog
});

impl Template {
    pub const ALL: [Template; 30] = [
        Template::Init,
        Template::Existence,
        Template::Existence2,
        Template::Existence3,
        Template::Absence,
        Template::Absence2,
        Template::Absence3,
        Template::Exactly1,
        Template::Exactly2,
        Template::Choice,
        Template::ExclusiveChoice,
        Template::RespondedExistence,
        Template::CoExistence,
        Template::Response,
        Template::AlternateResponse,
        Template::ChainResponse,
        Template::Precedence,
        Template::AlternatePrecedence,
        Template::ChainPrecedence,
        Template::Succession,
        Template::AlternateSuccession,
        Template::ChainSuccession,
        Template::NotCoExistence,
        Template::NotRespondedExistence,
        Template::NotResponse,
        Template::NotPrecedence,
        Template::NotSuccession,
        Template::NotChainResponse,
        Template::NotChainPrecedence,
        Template::NotChainSuccession,
    ];

    /// The name used for the template in `.decl` files.
    pub fn name(self) -> &'static str {
        match self {
            Template::Init => "Init",
            Template::Existence => "Existence",
            Template::Existence2 => "Existence2",
            Template::Existence3 => "Existence3",
            Template::Absence => "Absence",
            Template::Absence2 => "Absence2",
            Template::Absence3 => "Absence3",
            Template::Exactly1 => "Exactly1",
            Template::Exactly2 => "Exactly2",
            Template::Choice => "Choice",
            Template::ExclusiveChoice => "Exclusive Choice",
            Template::RespondedExistence => "Responded Existence",
            Template::CoExistence => "Co-Existence",
            Template::Response => "Response",
            Template::AlternateResponse => "Alternate Response",
            Template::ChainResponse => "Chain Response",
            Template::Precedence => "Precedence",
            Template::AlternatePrecedence => "Alternate Precedence",
            Template::ChainPrecedence => "Chain Precedence",
            Template::Succession => "Succession",
            Template::AlternateSuccession => "Alternate Succession",
            Template::ChainSuccession => "Chain Succession",
            Template::NotCoExistence => "Not Co-Existence",
            Template::NotRespondedExistence => "Not Responded Existence",
            Template::NotResponse => "Not Response",
            Template::NotPrecedence => "Not Precedence",
            Template::NotSuccession => "Not Succession",
            Template::NotChainResponse => "Not Chain Response",
            Template::NotChainPrecedence => "Not Chain Precedence",
            Template::NotChainSuccession => "Not Chain Succession",
        }
    }

    pub fn from_name(name: &str) -> Option<Template> {
        CATALOG.get(name.trim()).copied()
    }

    /// Every template, in catalog order.
    pub fn catalog() -> impl Iterator<Item = Template> {
        CATALOG.values().copied()
    }

    pub fn arity(self) -> usize {
        match self {
            Template::Init
            | Template::Existence
            | Template::Existence2
            | Template::Existence3
            | Template::Absence
            | Template::Absence2
            | Template::Absence3
            | Template::Exactly1
            | Template::Exactly2 => 1,
            _ => 2,
        }
    }

    /// The LTLf formula of the template over the propositions `a`
    /// (activation) and `b` (target). `b` is ignored by unary templates.
    fn formula(self, a: &str, b: &str) -> String {
        let twice = |a: &str| format!("F({a} & X(F({a})))");
        let thrice = |a: &str| format!("F({a} & X(F({a} & X(F({a})))))");
        let precedence = format!("(!{b} U {a}) | G(!{b})");

        match self {
            Template::Init => a.to_string(),
            Template::Existence => format!("F({a})"),
            Template::Existence2 => twice(a),
            Template::Existence3 => thrice(a),
            Template::Absence => format!("!F({a})"),
            Template::Absence2 => format!("!{}", twice(a)),
            Template::Absence3 => format!("!{}", thrice(a)),
            Template::Exactly1 => format!("F({a}) & !{}", twice(a)),
            Template::Exactly2 => format!("{} & !{}", twice(a), thrice(a)),
            Template::Choice => format!("F({a}) | F({b})"),
            Template::ExclusiveChoice => format!("(F({a}) | F({b})) & !(F({a}) & F({b}))"),
            Template::RespondedExistence => format!("F({a}) -> F({b})"),
            Template::CoExistence => format!("(F({a}) -> F({b})) & (F({b}) -> F({a}))"),
            Template::Response => format!("G({a} -> F({b}))"),
            Template::AlternateResponse => format!("G({a} -> X(!{a} U {b}))"),
            Template::ChainResponse => format!("G({a} -> X({b}))"),
            Template::Precedence => precedence,
            Template::AlternatePrecedence => {
                format!("({precedence}) & G({b} -> WX({precedence}))")
            }
            Template::ChainPrecedence => format!("G(X({b}) -> {a}) & !{b}"),
            Template::Succession => format!(
                "({}) & ({})",
                Template::Response.formula(a, b),
                Template::Precedence.formula(a, b)
            ),
            Template::AlternateSuccession => format!(
                "({}) & ({})",
                Template::AlternateResponse.formula(a, b),
                Template::AlternatePrecedence.formula(a, b)
            ),
            Template::ChainSuccession => format!(
                "({}) & ({})",
                Template::ChainResponse.formula(a, b),
                Template::ChainPrecedence.formula(a, b)
            ),
            Template::NotCoExistence => format!("!(F({a}) & F({b}))"),
            Template::NotRespondedExistence => format!("F({a}) -> !F({b})"),
            Template::NotResponse | Template::NotPrecedence | Template::NotSuccession => {
                format!("G({a} -> !F({b}))")
            }
            Template::NotChainResponse | Template::NotChainSuccession => {
                format!("G({a} -> !X({b}))")
            }
            Template::NotChainPrecedence => format!("G(X({b}) -> !{a})"),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Turn an activity name into a proposition: spaces are removed, the name is
/// lower-cased, characters outside `[a-z0-9_]` are dropped, and an `_` is
/// prepended unless the result starts with a letter or `_`.
pub fn proposition(activity: &str) -> String {
    let mut prop: String = activity
        .chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();
    let starts_well = prop
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    // `true` and `false` are constants in formulas
    if !starts_well || prop == "true" || prop == "false" {
        prop.insert(0, '_');
    }
    prop
}

/// Expand the template `template_name` over `activities`.
pub fn build_formula<S: AsRef<str>>(
    template_name: &str,
    activities: &[S],
) -> Result<ConstraintFormula, TemplateError> {
    let template = Template::from_name(template_name)
        .ok_or_else(|| TemplateError::UnknownTemplate(template_name.trim().to_string()))?;
    if activities.len() != template.arity() {
        return Err(TemplateError::ArityMismatch {
            template,
            expected: template.arity(),
            actual: activities.len(),
        });
    }

    let props = activities
        .iter()
        .map(|a| proposition(a.as_ref()))
        .collect_vec();
    let a = &props[0];
    let b = props.get(1).unwrap_or(a);

    Ok(ConstraintFormula {
        template: template.name().to_string(),
        activities: activities
            .iter()
            .map(|a| a.as_ref().trim().to_string())
            .collect(),
        formula: template.formula(a, b),
    })
}

#[cfg(test)]
mod tests;
