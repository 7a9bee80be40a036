#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("malformed automaton description{}: {reason}", line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    MalformedDescription {
        reason: String,
        line: Option<usize>,
    },
    #[error("automaton invariant violated: {0}")]
    InvariantViolation(String),
}

impl AutomatonError {
    pub(crate) fn malformed(reason: impl std::fmt::Display) -> Self {
        AutomatonError::MalformedDescription {
            reason: reason.to_string(),
            line: None,
        }
    }

    pub(crate) fn malformed_at(line: usize, reason: impl std::fmt::Display) -> Self {
        AutomatonError::MalformedDescription {
            reason: reason.to_string(),
            line: Some(line),
        }
    }

    pub(crate) fn invariant(reason: impl std::fmt::Display) -> Self {
        AutomatonError::InvariantViolation(reason.to_string())
    }
}
