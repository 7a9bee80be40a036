//! Compilation of LTLf formulas into deterministic automata by formula
//! progression.
//!
//! A state of the compiled automaton is a positive boolean combination, kept
//! in disjunctive normal form, of obligations on the rest of the trace:
//! `X φ` (there must be a next position and it must satisfy `φ`) or `WX φ`
//! (if there is a next position it must satisfy `φ`). Reading a symbol
//! replaces every obligation by the progression of its argument over that
//! symbol. The trace may end in a state iff one of its clauses only holds
//! weak obligations.

use std::collections::{hash_map::Entry, BTreeSet};

use ahash::AHashMap;
use dfa::{Automaton, AutomatonError, Label};
use itertools::Itertools;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    expression::{Literal, LtlfExpression, NnfLtlf},
    nodes::{Interner, NodeId},
    parser::ParseError,
};

pub const DEFAULT_MAX_STATES: usize = 50_000;
/// Upper bound on the universe size under [`EventSemantics::Unrestricted`].
pub const MAX_UNRESTRICTED_PROPOSITIONS: usize = 16;

/// Which sets of propositions may hold at a single position of a trace.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum EventSemantics {
    /// At most one proposition holds per position: every event is exactly
    /// one activity, or an activity outside the universe.
    Single,
    /// Any subset of the propositions may hold at a position.
    #[default]
    Unrestricted,
}

#[derive(Debug, Error, Diagnostic, Clone)]
pub enum CompileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
    #[error("the automaton for `{formula}` exceeds {limit} states")]
    StateExplosion { formula: String, limit: usize },
    #[error("unrestricted semantics over {count} propositions exceeds the limit of {limit}")]
    TooManyPropositions { count: usize, limit: usize },
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

#[derive(Debug, Clone)]
pub struct Compiler {
    universe: BTreeSet<Literal>,
    semantics: EventSemantics,
    max_states: usize,
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new(Vec::<Literal>::new())
    }
}

impl Compiler {
    /// A compiler whose labels range over at least `universe`. Propositions
    /// of the compiled formula are added to it for that formula.
    pub fn new<L: Into<Literal>>(universe: impl IntoIterator<Item = L>) -> Self {
        Compiler {
            universe: universe.into_iter().map(Into::into).collect(),
            semantics: EventSemantics::default(),
            max_states: DEFAULT_MAX_STATES,
        }
    }

    pub fn with_semantics(mut self, semantics: EventSemantics) -> Self {
        self.semantics = semantics;
        self
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    pub fn universe(&self) -> impl Iterator<Item = &Literal> + '_ {
        self.universe.iter()
    }

    pub fn semantics(&self) -> EventSemantics {
        self.semantics
    }

    pub fn max_states(&self) -> usize {
        self.max_states
    }

    /// Compile `formula` and print the automaton as a MONA description.
    pub fn compile(&self, formula: &str) -> Result<String, CompileError> {
        Ok(self.compile_automaton(formula)?.to_description())
    }

    pub fn compile_automaton(&self, formula: &str) -> Result<Automaton, CompileError> {
        let expr = LtlfExpression::parse(formula)?;
        self.compile_expression(&expr)
    }

    #[tracing::instrument(skip_all, fields(formula = %expr, semantics = ?self.semantics))]
    pub fn compile_expression(&self, expr: &LtlfExpression) -> Result<Automaton, CompileError> {
        let mut universe = self.universe.clone();
        universe.extend(expr.propositions());
        let symbols = self.symbols(&universe)?;

        let mut progression = Progression::new(symbols);
        let root = progression.intern(&expr.nnf());

        let mut states = vec![StateKey::Initial];
        let mut ids: AHashMap<StateKey, usize> = AHashMap::new();
        ids.insert(StateKey::Initial, 0);
        let mut transitions = Vec::new();

        let mut next = 0;
        while next < states.len() {
            let src = next;
            next += 1;
            for symbol in 0..progression.symbols.len() {
                let succ = match &states[src] {
                    StateKey::Initial => progression.progress(root, symbol),
                    StateKey::Residual(dnf) => progression.successor(dnf, symbol),
                };
                if succ.is_bottom() {
                    continue;
                }
                let dst = match ids.entry(StateKey::Residual(succ)) {
                    Entry::Occupied(e) => *e.get(),
                    Entry::Vacant(e) => {
                        let id = states.len();
                        if id >= self.max_states {
                            return Err(CompileError::StateExplosion {
                                formula: expr.to_string(),
                                limit: self.max_states,
                            });
                        }
                        states.push(e.key().clone());
                        e.insert(id);
                        id
                    }
                };
                transitions.push((src, progression.symbols[symbol].label.clone(), dst));
            }
        }

        let name = |idx: usize| (idx + 1).to_string();
        let finals = states
            .iter()
            .enumerate()
            .filter(|(_, key)| match key {
                StateKey::Initial => progression.holds_on_empty(root),
                StateKey::Residual(dnf) => dnf.accepts_at_end(),
            })
            .map(|(idx, _)| name(idx))
            .collect_vec();

        tracing::debug!(
            states = states.len(),
            transitions = transitions.len(),
            formulas = progression.nodes.len(),
            "compiled formula"
        );

        let automaton = Automaton::new(
            (0..states.len()).map(name),
            transitions
                .into_iter()
                .map(|(src, label, dst)| (name(src), label, name(dst))),
            &name(0),
            finals,
        )?;
        Ok(automaton)
    }

    fn symbols(&self, universe: &BTreeSet<Literal>) -> Result<Vec<Symbol>, CompileError> {
        let props = universe.iter().cloned().collect_vec();
        let valuations: Vec<SmallVec<[Literal; 2]>> = match self.semantics {
            EventSemantics::Single => props
                .iter()
                .map(|p| SmallVec::from_iter([p.clone()]))
                .chain([SmallVec::new()])
                .collect(),
            EventSemantics::Unrestricted => {
                if props.len() > MAX_UNRESTRICTED_PROPOSITIONS {
                    return Err(CompileError::TooManyPropositions {
                        count: props.len(),
                        limit: MAX_UNRESTRICTED_PROPOSITIONS,
                    });
                }
                (0..1usize << props.len())
                    .map(|mask| {
                        props
                            .iter()
                            .enumerate()
                            .filter(|(i, _)| mask & (1 << i) != 0)
                            .map(|(_, p)| p.clone())
                            .collect()
                    })
                    .collect()
            }
        };
        Ok(valuations
            .into_iter()
            .map(|holds| Symbol::new(&props, holds))
            .collect())
    }
}

/// One letter of the compiled automaton's alphabet.
#[derive(Debug, Clone)]
struct Symbol {
    holds: SmallVec<[Literal; 2]>,
    label: Label,
}

impl Symbol {
    fn new(universe: &[Literal], holds: SmallVec<[Literal; 2]>) -> Self {
        let label = if universe.is_empty() {
            "true".to_string()
        } else {
            universe
                .iter()
                .map(|p| {
                    if holds.contains(p) {
                        p.to_string()
                    } else {
                        format!("~{p}")
                    }
                })
                .join(" & ")
        };
        Symbol {
            holds,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Node {
    Lit { negated: bool, prop: Literal },
    Bool(bool),
    And(FormulaId, FormulaId),
    Or(FormulaId, FormulaId),
    X(FormulaId),
    WX(FormulaId),
    U(FormulaId, FormulaId),
    R(FormulaId, FormulaId),
}

type FormulaId = NodeId<Node>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Obligation {
    Next(FormulaId),
    WeakNext(FormulaId),
}

impl Obligation {
    fn formula(self) -> FormulaId {
        match self {
            Obligation::Next(f) | Obligation::WeakNext(f) => f,
        }
    }
}

/// A disjunction of conjunctions of obligations. `{∅}` is `true` and `{}`
/// is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Dnf(BTreeSet<BTreeSet<Obligation>>);

impl Dnf {
    fn top() -> Self {
        Dnf([BTreeSet::new()].into_iter().collect())
    }

    fn bottom() -> Self {
        Dnf(BTreeSet::new())
    }

    fn obligation(o: Obligation) -> Self {
        Dnf([[o].into_iter().collect()].into_iter().collect())
    }

    fn is_bottom(&self) -> bool {
        self.0.is_empty()
    }

    fn or(&self, other: &Dnf) -> Dnf {
        Dnf::normalized(self.0.iter().chain(&other.0).cloned())
    }

    fn and(&self, other: &Dnf) -> Dnf {
        Dnf::normalized(
            self.0
                .iter()
                .cartesian_product(&other.0)
                .map(|(a, b)| a.union(b).copied().collect()),
        )
    }

    fn normalized(clauses: impl IntoIterator<Item = BTreeSet<Obligation>>) -> Dnf {
        let clauses: BTreeSet<BTreeSet<Obligation>> = clauses
            .into_iter()
            .map(|clause| {
                // X φ already implies WX φ
                clause
                    .iter()
                    .copied()
                    .filter(|o| match o {
                        Obligation::WeakNext(f) => !clause.contains(&Obligation::Next(*f)),
                        Obligation::Next(_) => true,
                    })
                    .collect()
            })
            .collect();
        let minimal = clauses
            .iter()
            .filter(|c| {
                !clauses
                    .iter()
                    .any(|other| other != *c && other.is_subset(c))
            })
            .cloned()
            .collect();
        Dnf(minimal)
    }

    fn accepts_at_end(&self) -> bool {
        self.0
            .iter()
            .any(|clause| clause.iter().all(|o| matches!(o, Obligation::WeakNext(_))))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum StateKey {
    /// Nothing has been read yet.
    Initial,
    Residual(Dnf),
}

struct Progression {
    nodes: Interner<Node>,
    symbols: Vec<Symbol>,
    memo: AHashMap<(FormulaId, usize), Dnf>,
}

impl Progression {
    fn new(symbols: Vec<Symbol>) -> Self {
        Progression {
            nodes: Interner::new(),
            symbols,
            memo: AHashMap::new(),
        }
    }

    fn intern(&mut self, f: &NnfLtlf<Literal>) -> FormulaId {
        let node = match f {
            NnfLtlf::Literal { negated, name } => Node::Lit {
                negated: *negated,
                prop: name.clone(),
            },
            NnfLtlf::Bool(b) => Node::Bool(*b),
            NnfLtlf::And(p, q) => Node::And(self.intern(p), self.intern(q)),
            NnfLtlf::Or(p, q) => Node::Or(self.intern(p), self.intern(q)),
            NnfLtlf::X(p) => Node::X(self.intern(p)),
            NnfLtlf::WX(p) => Node::WX(self.intern(p)),
            NnfLtlf::U(p, q) => Node::U(self.intern(p), self.intern(q)),
            NnfLtlf::R(p, q) => Node::R(self.intern(p), self.intern(q)),
        };
        self.nodes.intern(node)
    }

    /// Obligations `f` leaves for the rest of the trace after `symbol`.
    fn progress(&mut self, f: FormulaId, symbol: usize) -> Dnf {
        if let Some(dnf) = self.memo.get(&(f, symbol)) {
            return dnf.clone();
        }
        let dnf = match self.nodes[f].clone() {
            Node::Lit { negated, prop } => {
                if self.symbols[symbol].holds.contains(&prop) != negated {
                    Dnf::top()
                } else {
                    Dnf::bottom()
                }
            }
            Node::Bool(true) => Dnf::top(),
            Node::Bool(false) => Dnf::bottom(),
            Node::And(p, q) => self.progress(p, symbol).and(&self.progress(q, symbol)),
            Node::Or(p, q) => self.progress(p, symbol).or(&self.progress(q, symbol)),
            Node::X(p) => Dnf::obligation(Obligation::Next(p)),
            Node::WX(p) => Dnf::obligation(Obligation::WeakNext(p)),
            Node::U(p, q) => {
                let now = self.progress(q, symbol);
                let later = self
                    .progress(p, symbol)
                    .and(&Dnf::obligation(Obligation::Next(f)));
                now.or(&later)
            }
            Node::R(p, q) => {
                let now = self.progress(q, symbol);
                let released = self
                    .progress(p, symbol)
                    .or(&Dnf::obligation(Obligation::WeakNext(f)));
                now.and(&released)
            }
        };
        self.memo.insert((f, symbol), dnf.clone());
        dnf
    }

    /// The state reached from `state` after reading `symbol`.
    fn successor(&mut self, state: &Dnf, symbol: usize) -> Dnf {
        let mut result = Dnf::bottom();
        for clause in &state.0 {
            let mut conj = Dnf::top();
            for o in clause {
                conj = conj.and(&self.progress(o.formula(), symbol));
                if conj.is_bottom() {
                    break;
                }
            }
            result = result.or(&conj);
        }
        result
    }

    fn holds_on_empty(&self, f: FormulaId) -> bool {
        match &self.nodes[f] {
            Node::Lit { negated, .. } => *negated,
            Node::Bool(b) => *b,
            Node::And(p, q) => self.holds_on_empty(*p) && self.holds_on_empty(*q),
            Node::Or(p, q) => self.holds_on_empty(*p) || self.holds_on_empty(*q),
            Node::X(_) | Node::U(_, _) => false,
            Node::WX(_) | Node::R(_, _) => true,
        }
    }
}
