//! Deterministic finite automata over opaque transition labels.
//!
//! Automata may be *partial*: a state without an edge for some label rejects
//! every word that needs that edge. All operations in this crate treat a
//! missing edge as a transition into an implicit, non-accepting sink.

extern crate plex;

pub mod automaton;
pub mod description;
pub mod equivalence;
mod error;
#[cfg(test)]
mod testing;

pub use automaton::{Automaton, Label, StateId};
pub use equivalence::{counterexample, equivalent};
pub use error::AutomatonError;
