//! Language equivalence of partial automata over possibly different
//! alphabets.
//!
//! Both automata are read as if completed with a non-accepting sink over the
//! union of their alphabets. The sink is never materialized: a component of
//! `None` in a product state stands for it.

use std::collections::{hash_map::Entry, VecDeque};

use ahash::AHashMap;
use indexmap::IndexSet;

use crate::{
    automaton::{Automaton, Label, LabelIdx, StateId},
    error::AutomatonError,
};

type Pair = (Option<StateId>, Option<StateId>);

/// One automaton seen through the shared alphabet.
struct View<'a> {
    dfa: &'a Automaton,
    symbols: Vec<Option<LabelIdx>>,
}

impl<'a> View<'a> {
    fn new(dfa: &'a Automaton, alphabet: &IndexSet<&Label>) -> Self {
        let symbols = alphabet.iter().map(|l| dfa.label_idx(l.as_str())).collect();
        View { dfa, symbols }
    }

    fn step(&self, state: Option<StateId>, symbol: usize) -> Option<StateId> {
        self.dfa.step_idx(state?, self.symbols[symbol]?)
    }

    fn accepting(&self, state: Option<StateId>) -> bool {
        state.is_some_and(|s| self.dfa.is_final(s))
    }
}

/// A shortest word accepted by exactly one of `a` and `b`, or `None` if they
/// accept the same language.
pub fn counterexample(a: &Automaton, b: &Automaton) -> Result<Option<Vec<Label>>, AutomatonError> {
    let alphabet: IndexSet<&Label> = a.alphabet().chain(b.alphabet()).collect();
    let left = View::new(a, &alphabet);
    let right = View::new(b, &alphabet);

    let bound = (a.num_states() + 1) * (b.num_states() + 1);
    let start: Pair = (Some(a.initial()), Some(b.initial()));

    let mut parents: AHashMap<Pair, Option<(Pair, usize)>> = AHashMap::new();
    parents.insert(start, None);
    let mut queue = VecDeque::from([start]);

    while let Some(pair) = queue.pop_front() {
        if left.accepting(pair.0) != right.accepting(pair.1) {
            let word = trace_back(&parents, pair)
                .into_iter()
                .map(|symbol| alphabet[symbol].clone())
                .collect();
            return Ok(Some(word));
        }
        for symbol in 0..alphabet.len() {
            let next = (left.step(pair.0, symbol), right.step(pair.1, symbol));
            // both in the sink: nothing downstream can be accepted
            if next == (None, None) {
                continue;
            }
            if let Entry::Vacant(entry) = parents.entry(next) {
                entry.insert(Some((pair, symbol)));
                queue.push_back(next);
            }
        }
        if parents.len() > bound {
            return Err(AutomatonError::invariant(format!(
                "product search visited {} pairs, more than the {bound} possible",
                parents.len()
            )));
        }
    }

    tracing::trace!(pairs = parents.len(), "automata are equivalent");
    Ok(None)
}

/// Whether `a` and `b` accept exactly the same words.
pub fn equivalent(a: &Automaton, b: &Automaton) -> Result<bool, AutomatonError> {
    Ok(counterexample(a, b)?.is_none())
}

fn trace_back(parents: &AHashMap<Pair, Option<(Pair, usize)>>, mut pair: Pair) -> Vec<usize> {
    let mut symbols = Vec::new();
    while let Some(Some((prev, symbol))) = parents.get(&pair) {
        symbols.push(*symbol);
        pair = *prev;
    }
    symbols.reverse();
    symbols
}
