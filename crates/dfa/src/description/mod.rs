//! Reader and writer for the Graphviz dialect MONA uses to print automata.
//!
//! ```text
//! digraph MONA_DFA {
//!  node [shape = doublecircle]; 2;
//!  node [shape = circle]; 1;
//!  init [shape = plaintext, label = ""];
//!  init -> 1;
//!  1 -> 2 [label="a"];
//! }
//! ```

use std::fmt;

use indexmap::IndexSet;
use itertools::Itertools;

use crate::{
    automaton::{Automaton, Label, StateId},
    error::AutomatonError,
};

mod lexer;
mod parser;

use parser::Stmt;

/// Name of the pseudo node whose single outgoing edge marks the initial state.
pub(crate) const INIT: &str = "init";

/// Parse one automaton description.
pub fn parse(text: &str) -> Result<Automaton, AutomatonError> {
    if text.trim().is_empty() {
        return Err(AutomatonError::malformed("empty automaton description"));
    }

    let stmts = parser::parse(lexer::Lexer::new(text)).map_err(|(tok, msg)| match tok {
        Some((lexer::Token::Unexpected(c), span)) => {
            AutomatonError::malformed_at(line_of(text, span.lo), format!("unexpected `{c}`"))
        }
        Some((tok, span)) => AutomatonError::malformed_at(
            line_of(text, span.lo),
            format!("unexpected {tok:?}: {msg}"),
        ),
        None => AutomatonError::malformed(format!("unexpected end of input: {msg}")),
    })?;

    let mut shape: Option<String> = None;
    let mut states: IndexSet<String> = IndexSet::new();
    let mut finals = Vec::new();
    let mut initial: Option<String> = None;
    let mut transitions = Vec::new();

    for stmt in stmts {
        match stmt {
            Stmt::NodeDefaults(attrs) => {
                if let Some(s) = attr(&attrs, "shape") {
                    shape = Some(s.to_owned());
                }
            }
            Stmt::Node { id, attrs, .. } => {
                if id == INIT {
                    continue;
                }
                let node_shape = attr(&attrs, "shape").or(shape.as_deref());
                if node_shape == Some("doublecircle") {
                    finals.push(id.clone());
                }
                states.insert(id);
            }
            Stmt::Edge {
                src,
                dst,
                attrs,
                span,
            } => {
                let line = line_of(text, span.lo);
                if src == INIT {
                    if let Some(prev) = &initial {
                        return Err(AutomatonError::malformed_at(
                            line,
                            format!("second initial state marker `init -> {dst}` (already `{prev}`)"),
                        ));
                    }
                    states.insert(dst.clone());
                    initial = Some(dst);
                    continue;
                }
                let Some(label) = attr(&attrs, "label") else {
                    return Err(AutomatonError::malformed_at(
                        line,
                        format!("transition `{src} -> {dst}` has no label"),
                    ));
                };
                states.insert(src.clone());
                states.insert(dst.clone());
                transitions.push((src, Label::from(label), dst));
            }
            Stmt::Ignored => {}
        }
    }

    let Some(initial) = initial else {
        return Err(AutomatonError::malformed("no initial state marker"));
    };

    let dfa = Automaton::new(states, transitions, &initial, finals)?;
    tracing::trace!(
        states = dfa.num_states(),
        labels = dfa.alphabet().count(),
        "parsed automaton description"
    );
    Ok(dfa)
}

fn attr<'a>(attrs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attrs
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset.min(text.len())].matches('\n').count() + 1
}

fn quote(id: &str) -> String {
    let plain = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && !matches!(id, "digraph" | "node" | "edge");
    if plain {
        id.to_owned()
    } else {
        format!("\"{}\"", escape(id))
    }
}

/// Backslash-escape the characters that would end or break a quoted string.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

impl Automaton {
    /// Print the automaton in the same dialect [`parse`] reads.
    pub fn to_description(&self) -> String {
        Description(self).to_string()
    }
}

struct Description<'a>(&'a Automaton);

impl fmt::Display for Description<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dfa = self.0;
        let name = |s: StateId| quote(dfa.state_name(s));

        writeln!(f, "digraph MONA_DFA {{")?;
        writeln!(f, " rankdir = LR;")?;
        writeln!(f, " center = true;")?;
        writeln!(f, " size = \"7.5,10.5\";")?;
        writeln!(f, " edge [fontname = Courier];")?;
        writeln!(f, " node [height = .5, width = .5];")?;
        let (finals, others): (Vec<_>, Vec<_>) = dfa.states().partition(|s| dfa.is_final(*s));
        if !finals.is_empty() {
            writeln!(
                f,
                " node [shape = doublecircle]; {};",
                finals.iter().map(|s| name(*s)).format("; ")
            )?;
        }
        if !others.is_empty() {
            writeln!(
                f,
                " node [shape = circle]; {};",
                others.iter().map(|s| name(*s)).format("; ")
            )?;
        }
        writeln!(f, " init [shape = plaintext, label = \"\"];")?;
        writeln!(f, " init -> {};", name(dfa.initial()))?;
        for (src, label, dst) in dfa.transitions() {
            writeln!(
                f,
                " {} -> {} [label=\"{}\"];",
                name(src),
                name(dst),
                escape(label.as_str())
            )?;
        }
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests;
