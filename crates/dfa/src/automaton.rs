use std::{borrow::Borrow, collections::VecDeque, fmt};

use ahash::AHashMap;
use indexmap::IndexSet;
use itertools::Itertools;
use smol_str::SmolStr;

use crate::error::AutomatonError;

/// A transition guard. Labels are compared as opaque strings, so `a & ~b`
/// and `~b & a` are different symbols.
#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Label(pub SmolStr);

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label(s.into())
    }
}
impl From<SmolStr> for Label {
    fn from(s: SmolStr) -> Self {
        Label(s)
    }
}
impl<'a> From<&'a str> for Label {
    fn from(s: &'a str) -> Self {
        Label(s.into())
    }
}
impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct StateId(u32);

impl StateId {
    fn new(idx: usize) -> Self {
        StateId(idx as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Index of a label in the alphabet of one automaton.
pub(crate) type LabelIdx = usize;

/// A deterministic, possibly partial, finite automaton.
///
/// States keep the names they were declared with, but are addressed by dense
/// [`StateId`]s. The alphabet contains exactly the labels that appear on some
/// transition.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: IndexSet<SmolStr>,
    alphabet: IndexSet<Label>,
    transitions: AHashMap<(StateId, LabelIdx), StateId>,
    initial: StateId,
    accepting: Vec<bool>,
}

impl Automaton {
    /// Build an automaton from its components.
    ///
    /// Every state referenced by `initial`, `finals` or a transition must be
    /// listed in `states`, and no state may have two different successors
    /// for the same label. The name `init` is reserved for the initial state
    /// marker of the textual description.
    pub fn new<S, T, F>(
        states: impl IntoIterator<Item = S>,
        transitions: impl IntoIterator<Item = (T, Label, T)>,
        initial: &str,
        finals: impl IntoIterator<Item = F>,
    ) -> Result<Self, AutomatonError>
    where
        S: Into<SmolStr>,
        T: AsRef<str>,
        F: AsRef<str>,
    {
        let states: IndexSet<SmolStr> = states.into_iter().map(Into::into).collect();
        if states.is_empty() {
            return Err(AutomatonError::invariant("automaton has no states"));
        }
        if states.contains(crate::description::INIT) {
            return Err(AutomatonError::invariant(format!(
                "state name `{}` is reserved for the initial state marker",
                crate::description::INIT
            )));
        }
        let lookup = |name: &str, role: &str| {
            states
                .get_index_of(name)
                .map(StateId::new)
                .ok_or_else(|| {
                    AutomatonError::invariant(format!("{role} `{name}` is not a declared state"))
                })
        };

        let initial = lookup(initial, "initial state")?;

        let mut accepting = vec![false; states.len()];
        for f in finals {
            accepting[lookup(f.as_ref(), "final state")?.index()] = true;
        }

        let mut alphabet = IndexSet::new();
        let mut edges = AHashMap::new();
        for (src, label, dst) in transitions {
            let src = lookup(src.as_ref(), "transition source")?;
            let dst = lookup(dst.as_ref(), "transition target")?;
            let (label_idx, _) = alphabet.insert_full(label);
            if let Some(prev) = edges.insert((src, label_idx), dst) {
                if prev != dst {
                    return Err(AutomatonError::invariant(format!(
                        "state `{}` has two successors on label `{}`",
                        states[src.index()],
                        alphabet[label_idx]
                    )));
                }
            }
        }

        Ok(Automaton {
            states,
            alphabet,
            transitions: edges,
            initial,
            accepting,
        })
    }

    /// The automaton with one accepting state and a self-loop on every label
    /// of `alphabet`.
    pub fn universal(alphabet: impl IntoIterator<Item = Label>) -> Self {
        let alphabet: IndexSet<Label> = alphabet.into_iter().collect();
        let initial = StateId::new(0);
        let transitions = (0..alphabet.len())
            .map(|label| ((initial, label), initial))
            .collect();
        Automaton {
            states: [SmolStr::new("0")].into_iter().collect(),
            alphabet,
            transitions,
            initial,
            accepting: vec![true],
        }
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.states.len()).map(StateId::new)
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn state_name(&self, state: StateId) -> &str {
        &self.states[state.index()]
    }

    pub fn state(&self, name: &str) -> Option<StateId> {
        self.states.get_index_of(name).map(StateId::new)
    }

    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.accepting[state.index()]
    }

    pub fn finals(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states().filter(|s| self.is_final(*s))
    }

    pub fn alphabet(&self) -> impl Iterator<Item = &Label> + Clone + '_ {
        self.alphabet.iter()
    }

    pub(crate) fn label_idx(&self, label: &str) -> Option<LabelIdx> {
        self.alphabet.get_index_of(label)
    }

    pub(crate) fn step_idx(&self, state: StateId, label: LabelIdx) -> Option<StateId> {
        self.transitions.get(&(state, label)).copied()
    }

    /// The successor of `state` on `label`, or `None` if the edge is missing.
    pub fn step(&self, state: StateId, label: &str) -> Option<StateId> {
        self.step_idx(state, self.label_idx(label)?)
    }

    /// All transitions ordered by source state and then by alphabet order.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, &Label, StateId)> + '_ {
        self.states().flat_map(move |src| {
            self.alphabet
                .iter()
                .enumerate()
                .filter_map(move |(idx, label)| Some((src, label, self.step_idx(src, idx)?)))
        })
    }

    /// Run the automaton on `word`. A missing edge rejects immediately.
    pub fn accepts<L: AsRef<str>>(&self, word: impl IntoIterator<Item = L>) -> bool {
        let mut current = self.initial;
        for label in word {
            match self.step(current, label.as_ref()) {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.is_final(current)
    }

    /// States reachable from the initial state.
    pub fn reachable(&self) -> Vec<StateId> {
        let mut seen = vec![false; self.num_states()];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([self.initial]);
        seen[self.initial.index()] = true;
        while let Some(state) = queue.pop_front() {
            order.push(state);
            for label in 0..self.alphabet.len() {
                if let Some(next) = self.step_idx(state, label) {
                    if !seen[next.index()] {
                        seen[next.index()] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        order
    }

    /// Whether the automaton accepts no word at all.
    pub fn is_empty(&self) -> bool {
        !self.reachable().into_iter().any(|s| self.is_final(s))
    }

    /// Materialize the implicit sink: the result has an edge for every pair
    /// of state and label from the union of this alphabet and `extra`.
    ///
    /// The sink is only added when some edge is actually missing.
    pub fn complete<'a>(&self, extra: impl IntoIterator<Item = &'a Label>) -> Automaton {
        let mut alphabet = self.alphabet.clone();
        alphabet.extend(extra.into_iter().cloned());

        let mut states = self.states.clone();
        let mut accepting = self.accepting.clone();
        let mut transitions = AHashMap::with_capacity(states.len() * alphabet.len());
        let mut sink = None;

        for src in self.states() {
            for (idx, label) in alphabet.iter().enumerate() {
                let dst = match self.step(src, label.as_str()) {
                    Some(dst) => dst,
                    None => *sink.get_or_insert_with(|| {
                        let name = fresh_name(&states, "sink");
                        let (id, _) = states.insert_full(name);
                        accepting.push(false);
                        StateId::new(id)
                    }),
                };
                transitions.insert((src, idx), dst);
            }
        }
        if let Some(sink) = sink {
            for idx in 0..alphabet.len() {
                transitions.insert((sink, idx), sink);
            }
        }

        Automaton {
            states,
            alphabet,
            transitions,
            initial: self.initial,
            accepting,
        }
    }
}

fn fresh_name(taken: &IndexSet<SmolStr>, base: &str) -> SmolStr {
    (0..)
        .map(|n| {
            if n == 0 {
                SmolStr::new(base)
            } else {
                SmolStr::from(format!("{base}{n}"))
            }
        })
        .find(|name| !taken.contains(name))
        .unwrap_or_else(|| SmolStr::new(base))
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "States:")?;
        for state in self.states() {
            writeln!(
                f,
                " {}{}",
                self.state_name(state),
                if self.is_final(state) { " (accepting)" } else { "" }
            )?;
            for (_, label, dst) in self.transitions().filter(|(src, _, _)| *src == state) {
                writeln!(f, "   =[{label}]=> {}", self.state_name(dst))?;
            }
        }
        writeln!(f, "Initial: {}", self.state_name(self.initial))?;
        writeln!(
            f,
            "Accept:  [{}]",
            self.finals().map(|s| self.state_name(s)).format(", ")
        )
    }
}
