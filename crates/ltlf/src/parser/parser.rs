#![allow(
    clippy::type_complexity,
    clippy::redundant_field_names,
    clippy::ptr_arg,
    clippy::redundant_closure_call,
    clippy::enum_variant_names,
    clippy::let_unit_value
)]

use plex::parser;

use super::lexer::{Span, Token, Token::*};
use crate::expression::LtlfExpression;

#[derive(Debug)]
pub struct LtlfExpressionSpan {
    pub span: Span,
    pub expr: LtlfExpression,
}

parser! {
    fn parse_(Token, Span);

    (a, b) {
        Span {
            lo: a.lo,
            hi: b.hi,
        }
    }

    formula: LtlfExpressionSpan {
        equiv[e] => LtlfExpressionSpan {
            span: span!(),
            expr: e,
        },
    }

    equiv: LtlfExpression {
        implies[p] Equiv equiv[q] => p.equiv(q),
        implies[e] => e,
    }

    implies: LtlfExpression {
        or[p] Implies implies[q] => p.implies(q),
        or[e] => e,
    }

    or: LtlfExpression {
        or[p] Or and[q] => p | q,
        and[e] => e,
    }

    and: LtlfExpression {
        and[p] And until[q] => p & q,
        until[e] => e,
    }

    until: LtlfExpression {
        unary[p] U until[q] => p.U(q),
        unary[p] R until[q] => p.R(q),
        unary[p] W until[q] => p.W(q),
        unary[e] => e,
    }

    unary: LtlfExpression {
        Not unary[e] => !e,
        G unary[e] => e.G(),
        F unary[e] => e.F(),
        X unary[e] => e.X(),
        WX unary[e] => e.WX(),
        atom[e] => e,
    }

    atom: LtlfExpression {
        Ident(i) => LtlfExpression::Literal(i.into()),
        True => LtlfExpression::True,
        False => LtlfExpression::False,
        LParen equiv[e] RParen => e,
    }
}

pub fn parse<I: Iterator<Item = (Token, Span)>>(
    i: I,
) -> Result<LtlfExpressionSpan, (Option<(Token, Span)>, &'static str)> {
    parse_(i)
}
