//! Reader for the line oriented `.decl` format.
//!
//! ```text
//! activity Send Invoice
//! bind Send Invoice: amount
//! amount: integer between 0 and 1000
//! Response[Send Invoice, Receive Payment] | A.amount > 10 | |
//! ```

use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareModel {
    pub activities: IndexSet<String>,
    pub constraints: Vec<Constraint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub template: String,
    pub activities: Vec<String>,
    /// Activation, correlation and time conditions, as written.
    pub conditions: Vec<String>,
    /// 1-based line number in the source.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("line {line}: cannot read `{text}`")]
    InvalidLine { line: usize, text: String },
}

impl DeclareModel {
    pub fn parse(text: &str) -> Result<DeclareModel, ModelError> {
        let mut model = DeclareModel::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let invalid = || ModelError::InvalidLine {
                line,
                text: trimmed.to_string(),
            };

            if let Some(name) = keyword(trimmed, "activity") {
                if name.is_empty() {
                    return Err(invalid());
                }
                model.activities.insert(name.to_string());
            } else if keyword(trimmed, "bind").is_some() {
                continue;
            } else if let Some(constraint) = constraint(trimmed, line) {
                model.constraints.push(constraint);
            } else if trimmed.contains(':') {
                // attribute domain, e.g. `amount: integer between 0 and 10`
                continue;
            } else {
                return Err(invalid());
            }
        }

        tracing::debug!(
            activities = model.activities.len(),
            constraints = model.constraints.len(),
            "read declare model"
        );
        Ok(model)
    }
}

impl FromStr for DeclareModel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeclareModel::parse(s)
    }
}

/// The rest of `line` if it starts with the word `kw`.
fn keyword<'a>(line: &'a str, kw: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(kw)?;
    if rest.is_empty() {
        Some(rest)
    } else if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// `Template[A, B] | cond | cond | time`
fn constraint(line: &str, line_no: usize) -> Option<Constraint> {
    let mut parts = line.split('|');
    let head = parts.next()?.trim();
    let open = head.find('[')?;
    let close = head.rfind(']')?;
    if close < open || !head[close + 1..].trim().is_empty() {
        return None;
    }
    let template = head[..open].trim();
    if template.is_empty() || template.contains(':') {
        return None;
    }
    let inner = head[open + 1..close].trim();
    let activities = if inner.is_empty() {
        vec![]
    } else {
        inner.split(',').map(|a| a.trim().to_string()).collect()
    };
    let conditions = parts
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    Some(Constraint {
        template: template.to_string(),
        activities,
        conditions,
        line: line_no,
    })
}

#[cfg(test)]
mod tests;
