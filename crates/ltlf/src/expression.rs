use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

use crate::parser::{self, ParseError};

#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Literal(pub SmolStr);

impl Literal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal(s.into())
    }
}
impl From<SmolStr> for Literal {
    fn from(s: SmolStr) -> Self {
        Literal(s)
    }
}
impl<'a> From<&'a String> for Literal {
    fn from(s: &'a String) -> Self {
        Literal(s.into())
    }
}
impl<'a> From<&'a str> for Literal {
    fn from(s: &'a str) -> Self {
        Literal(s.into())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The inductive set of LTLf formulas over a set of propositions.
#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum LtlfExpression {
    True,
    False,
    Literal(Literal),
    Not(Box<LtlfExpression>),
    And(Box<LtlfExpression>, Box<LtlfExpression>),
    Or(Box<LtlfExpression>, Box<LtlfExpression>),
    Implies(Box<LtlfExpression>, Box<LtlfExpression>),
    Equiv(Box<LtlfExpression>, Box<LtlfExpression>),
    /// Strong next: there is a next position and it satisfies the operand.
    X(Box<LtlfExpression>),
    /// Weak next: the current position is the last, or the next one
    /// satisfies the operand.
    WX(Box<LtlfExpression>),
    G(Box<LtlfExpression>),
    F(Box<LtlfExpression>),
    U(Box<LtlfExpression>, Box<LtlfExpression>),
    R(Box<LtlfExpression>, Box<LtlfExpression>),
    /// Weak until.
    W(Box<LtlfExpression>, Box<LtlfExpression>),
}

impl LtlfExpression {
    pub fn parse(formula: &str) -> Result<Self, ParseError> {
        parser::parse(formula)
    }
}

impl FromStr for LtlfExpression {
    type Err = ParseError;

    fn from_str(formula: &str) -> Result<Self, Self::Err> {
        Self::parse(formula)
    }
}

/// Prints a fully parenthesized formula that parses back to the same tree.
impl fmt::Display for LtlfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LtlfExpression::True => write!(f, "true"),
            LtlfExpression::False => write!(f, "false"),
            LtlfExpression::Literal(l) => write!(f, "{}", l),
            LtlfExpression::Not(e) => write!(f, "!{}", e),
            LtlfExpression::And(p, q) => write!(f, "({} & {})", p, q),
            LtlfExpression::Or(p, q) => write!(f, "({} | {})", p, q),
            LtlfExpression::Implies(p, q) => write!(f, "({} -> {})", p, q),
            LtlfExpression::Equiv(p, q) => write!(f, "({} <-> {})", p, q),
            LtlfExpression::X(e) => write!(f, "X {}", e),
            LtlfExpression::WX(e) => write!(f, "WX {}", e),
            LtlfExpression::G(e) => write!(f, "G {}", e),
            LtlfExpression::F(e) => write!(f, "F {}", e),
            LtlfExpression::U(p, q) => write!(f, "({} U {})", p, q),
            LtlfExpression::R(p, q) => write!(f, "({} R {})", p, q),
            LtlfExpression::W(p, q) => write!(f, "({} W {})", p, q),
        }
    }
}

impl std::ops::BitOr for LtlfExpression {
    type Output = LtlfExpression;

    fn bitor(self, rhs: LtlfExpression) -> LtlfExpression {
        LtlfExpression::Or(Box::new(self), Box::new(rhs))
    }
}
impl std::ops::BitAnd for LtlfExpression {
    type Output = LtlfExpression;

    fn bitand(self, rhs: LtlfExpression) -> LtlfExpression {
        LtlfExpression::And(Box::new(self), Box::new(rhs))
    }
}
impl std::ops::Not for LtlfExpression {
    type Output = LtlfExpression;

    fn not(self) -> LtlfExpression {
        LtlfExpression::Not(Box::new(self))
    }
}
impl std::ops::Not for &LtlfExpression {
    type Output = LtlfExpression;

    fn not(self) -> LtlfExpression {
        LtlfExpression::Not(Box::new(self.clone()))
    }
}

impl LtlfExpression {
    pub fn lit(s: impl fmt::Display) -> LtlfExpression {
        LtlfExpression::Literal(s.to_string().into())
    }

    pub fn implies(self, other: LtlfExpression) -> LtlfExpression {
        LtlfExpression::Implies(Box::new(self), Box::new(other))
    }

    pub fn equiv(self, other: LtlfExpression) -> LtlfExpression {
        LtlfExpression::Equiv(Box::new(self), Box::new(other))
    }

    #[allow(non_snake_case)]
    pub fn X(self) -> LtlfExpression {
        LtlfExpression::X(Box::new(self))
    }

    #[allow(non_snake_case)]
    pub fn WX(self) -> LtlfExpression {
        LtlfExpression::WX(Box::new(self))
    }

    #[allow(non_snake_case)]
    pub fn G(self) -> LtlfExpression {
        LtlfExpression::G(Box::new(self))
    }

    #[allow(non_snake_case)]
    pub fn F(self) -> LtlfExpression {
        LtlfExpression::F(Box::new(self))
    }

    #[allow(non_snake_case)]
    pub fn U(self, other: LtlfExpression) -> LtlfExpression {
        LtlfExpression::U(Box::new(self), Box::new(other))
    }

    #[allow(non_snake_case)]
    pub fn R(self, other: LtlfExpression) -> LtlfExpression {
        LtlfExpression::R(Box::new(self), Box::new(other))
    }

    #[allow(non_snake_case)]
    pub fn W(self, other: LtlfExpression) -> LtlfExpression {
        LtlfExpression::W(Box::new(self), Box::new(other))
    }

    /// A version of `std::ops::Not` that takes `self` by reference.
    pub fn neg(&self) -> Self {
        Self::Not(Box::new(self.clone()))
    }

    /// Every proposition mentioned in the formula.
    pub fn propositions(&self) -> BTreeSet<Literal> {
        let mut props = BTreeSet::new();
        self.propositions_(&mut props);
        props
    }

    fn propositions_(&self, props: &mut BTreeSet<Literal>) {
        use LtlfExpression::*;

        match self {
            True | False => {}
            Literal(l) => {
                props.insert(l.clone());
            }
            Not(e) | X(e) | WX(e) | G(e) | F(e) => e.propositions_(props),
            And(p, q)
            | Or(p, q)
            | Implies(p, q)
            | Equiv(p, q)
            | U(p, q)
            | R(p, q)
            | W(p, q) => {
                p.propositions_(props);
                q.propositions_(props);
            }
        }
    }

    pub fn nnf(&self) -> NnfLtlf<Literal> {
        use LtlfExpression::*;

        match self {
            True => NnfLtlf::Bool(true),
            False => NnfLtlf::Bool(false),
            Literal(l) => NnfLtlf::lit(l.clone()),
            Not(e) => match e.as_ref() {
                True => NnfLtlf::Bool(false),
                False => NnfLtlf::Bool(true),
                Literal(l) => NnfLtlf::neg_lit(l.clone()),
                And(p, q) => p.neg().nnf() | q.neg().nnf(),
                Or(p, q) => p.neg().nnf() & q.neg().nnf(),
                Implies(p, q) => p.nnf() & q.neg().nnf(),
                Equiv(p, q) => (p.nnf() & q.neg().nnf()) | (p.neg().nnf() & q.nnf()),
                X(p) => NnfLtlf::WX(Box::new(p.neg().nnf())),
                WX(p) => NnfLtlf::X(Box::new(p.neg().nnf())),
                G(p) => p.neg().nnf().F(),
                F(p) => p.neg().nnf().G(),
                U(p, q) => p.neg().nnf().R(q.neg().nnf()),
                R(p, q) => p.neg().nnf().U(q.neg().nnf()),
                // ¬(p W q) ≡ ¬q U (¬p ∧ ¬q)
                W(p, q) => q.neg().nnf().U(p.neg().nnf() & q.neg().nnf()),
                Not(p) => p.nnf(),
            },
            And(p, q) => p.nnf() & q.nnf(),
            Or(p, q) => p.nnf() | q.nnf(),
            Implies(p, q) => p.neg().nnf() | q.nnf(),
            Equiv(p, q) => (p.neg().nnf() | q.nnf()) & (p.nnf() | q.neg().nnf()),
            X(e) => NnfLtlf::X(Box::new(e.nnf())),
            WX(e) => NnfLtlf::WX(Box::new(e.nnf())),
            G(e) => e.nnf().G(),
            F(e) => e.nnf().F(),
            U(p, q) => p.nnf().U(q.nnf()),
            R(p, q) => p.nnf().R(q.nnf()),
            // p W q ≡ q R (p ∨ q)
            W(p, q) => q.nnf().R(p.nnf() | q.nnf()),
        }
    }
}

/// An LTLf formula in negation normal form. `G` and `F` are expressed with
/// `R` and `U`.
#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum NnfLtlf<L> {
    Literal { negated: bool, name: L },
    Bool(bool),
    U(Box<NnfLtlf<L>>, Box<NnfLtlf<L>>),
    R(Box<NnfLtlf<L>>, Box<NnfLtlf<L>>),
    Or(Box<NnfLtlf<L>>, Box<NnfLtlf<L>>),
    And(Box<NnfLtlf<L>>, Box<NnfLtlf<L>>),
    X(Box<NnfLtlf<L>>),
    WX(Box<NnfLtlf<L>>),
}

impl<L> NnfLtlf<L> {
    pub(crate) fn lit(name: impl Into<L>) -> Self {
        NnfLtlf::Literal {
            negated: false,
            name: name.into(),
        }
    }

    pub(crate) fn neg_lit(name: impl Into<L>) -> Self {
        NnfLtlf::Literal {
            negated: true,
            name: name.into(),
        }
    }

    #[allow(non_snake_case)]
    pub fn U(self, other: NnfLtlf<L>) -> NnfLtlf<L> {
        NnfLtlf::U(Box::new(self), Box::new(other))
    }

    #[allow(non_snake_case)]
    pub fn R(self, other: NnfLtlf<L>) -> NnfLtlf<L> {
        NnfLtlf::R(Box::new(self), Box::new(other))
    }

    #[allow(non_snake_case)]
    pub fn G(self) -> NnfLtlf<L> {
        NnfLtlf::Bool(false).R(self)
    }

    #[allow(non_snake_case)]
    pub fn F(self) -> NnfLtlf<L> {
        NnfLtlf::Bool(true).U(self)
    }

    /// Whether the suffix of `trace` starting at `position` satisfies the
    /// formula. `position == trace.len()` is the empty suffix, on which
    /// propositions, `X` and `U` are false and their duals are true.
    pub fn holds_at(&self, trace: &[BTreeSet<L>], position: usize) -> bool
    where
        L: Ord,
    {
        let n = trace.len();
        match self {
            NnfLtlf::Literal { negated, name } => match trace.get(position) {
                Some(event) => event.contains(name) != *negated,
                None => *negated,
            },
            NnfLtlf::Bool(b) => *b,
            NnfLtlf::And(p, q) => p.holds_at(trace, position) && q.holds_at(trace, position),
            NnfLtlf::Or(p, q) => p.holds_at(trace, position) || q.holds_at(trace, position),
            NnfLtlf::X(p) => position + 1 < n && p.holds_at(trace, position + 1),
            NnfLtlf::WX(p) => position + 1 >= n || p.holds_at(trace, position + 1),
            NnfLtlf::U(p, q) => (position..n).any(|k| {
                q.holds_at(trace, k) && (position..k).all(|j| p.holds_at(trace, j))
            }),
            NnfLtlf::R(p, q) => (position..n).all(|k| {
                q.holds_at(trace, k) || (position..k).any(|j| p.holds_at(trace, j))
            }),
        }
    }

    /// Whether the whole of `trace` satisfies the formula.
    pub fn holds(&self, trace: &[BTreeSet<L>]) -> bool
    where
        L: Ord,
    {
        self.holds_at(trace, 0)
    }
}

impl<L> std::ops::BitOr for NnfLtlf<L> {
    type Output = NnfLtlf<L>;

    fn bitor(self, rhs: NnfLtlf<L>) -> NnfLtlf<L> {
        NnfLtlf::Or(Box::new(self), Box::new(rhs))
    }
}
impl<L> std::ops::BitAnd for NnfLtlf<L> {
    type Output = NnfLtlf<L>;

    fn bitand(self, rhs: NnfLtlf<L>) -> NnfLtlf<L> {
        NnfLtlf::And(Box::new(self), Box::new(rhs))
    }
}

impl<L: fmt::Display> fmt::Display for NnfLtlf<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NnfLtlf::Literal { negated, name } => {
                if *negated {
                    write!(f, "¬{}", name)
                } else {
                    write!(f, "{}", name)
                }
            }
            NnfLtlf::Bool(true) => write!(f, "T"),
            NnfLtlf::Bool(false) => write!(f, "⊥"),
            NnfLtlf::U(p, q) => write!(f, "({} U {})", p, q),
            NnfLtlf::R(p, q) => write!(f, "({} R {})", p, q),
            NnfLtlf::Or(p, q) => write!(f, "({} ∨ {})", p, q),
            NnfLtlf::And(p, q) => write!(f, "({} ∧ {})", p, q),
            NnfLtlf::X(p) => write!(f, "X {}", p),
            NnfLtlf::WX(p) => write!(f, "WX {}", p),
        }
    }
}

#[cfg(test)]
mod tests;
