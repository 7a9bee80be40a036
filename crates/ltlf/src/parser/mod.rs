use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::expression::LtlfExpression;

pub mod lexer;
pub mod parser;

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid Token")]
    #[diagnostic(help("Propositions are lowercase identifiers such as `a` or `send_invoice`"))]
    InvalidToken {
        #[source_code]
        src: String,
        #[label = "The character \"{token}\" is not valid in a formula."]
        err_span: SourceSpan,
        token: String,
    },
    #[error("Unrecognized Token")]
    #[diagnostic()]
    UnrecognizedToken {
        #[source_code]
        src: String,
        #[label = "The token \"{token}\" is unrecognized in this context."]
        err_span: SourceSpan,
        token: String,
    },
    #[error("Unrecognized EOF")]
    #[diagnostic()]
    UnrecognizedEOF {
        #[source_code]
        src: String,
        #[label = "The formula ends too early. Are you missing an operand?"]
        err_span: SourceSpan,
    },
}

impl ParseError {
    fn new(src: &str, (token, _): (Option<(lexer::Token, lexer::Span)>, &'static str)) -> Self {
        let prep_src = || format!("{src}\n");

        match token {
            Some((lexer::Token::Unexpected(token), span)) => ParseError::InvalidToken {
                src: prep_src(),
                err_span: (span.lo, span.hi - span.lo).into(),
                token,
            },
            Some((token, span)) => ParseError::UnrecognizedToken {
                src: prep_src(),
                err_span: (span.lo, span.hi - span.lo).into(),
                token: token.to_string(),
            },
            None => ParseError::UnrecognizedEOF {
                src: prep_src(),
                err_span: (src.len(), 0).into(),
            },
        }
    }

    /// Byte offset of the offending token.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::InvalidToken { err_span, .. }
            | ParseError::UnrecognizedToken { err_span, .. }
            | ParseError::UnrecognizedEOF { err_span, .. } => err_span.offset(),
        }
    }
}

pub fn parse(src: &str) -> Result<LtlfExpression, ParseError> {
    parser::parse(lexer::Lexer::new(src))
        .map(|span| span.expr)
        .map_err(|e| ParseError::new(src, e))
}
