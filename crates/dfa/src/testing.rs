//! Strategies shared by the unit tests of this crate.

use proptest::prelude::*;

use crate::automaton::{Automaton, Label};

pub const LABELS: [&str; 3] = ["a", "b", "c"];

/// State `i` is named `names(i)`; edge `j` leaves state `j / labels.len()`.
fn build(
    names: impl Fn(usize) -> String,
    labels: &[String],
    edges: &[Option<usize>],
    finals: &[bool],
) -> Automaton {
    let n = finals.len();
    let transitions = edges.iter().enumerate().filter_map(|(i, dst)| {
        let dst = (*dst)?;
        Some((
            names(i / labels.len()),
            Label::from(labels[i % labels.len()].as_str()),
            names(dst),
        ))
    });
    Automaton::new(
        (0..n).map(&names),
        transitions,
        &names(0),
        (0..n).filter(|s| finals[*s]).map(&names),
    )
    .unwrap()
}

prop_compose! {
    /// Up to three states with arbitrary partial edges and final states.
    fn arb_shape()(n in 1usize..4)(
        edges in proptest::collection::vec(proptest::option::of(0..n), n * LABELS.len()),
        finals in proptest::collection::vec(any::<bool>(), n),
    ) -> (Vec<Option<usize>>, Vec<bool>) {
        (edges, finals)
    }
}

prop_compose! {
    /// States `0`, `1`, ... over [`LABELS`].
    pub fn arb_automaton()((edges, finals) in arb_shape()) -> Automaton {
        let labels = LABELS.map(String::from);
        build(|s| s.to_string(), &labels, &edges, &finals)
    }
}

prop_compose! {
    /// Like [`arb_automaton`], but state names and labels contain quotes,
    /// backslashes, newlines and the punctuation of the description format.
    pub fn arb_oddly_named_automaton()(
        (edges, finals) in arb_shape(),
        state in r#"[a-z"\\ \n_.;{}>=-]{0,4}|node|edge|digraph|init"#,
        label in r#"[a-z"\\ \n&~;\]\[]{0,4}"#,
    ) -> Automaton {
        let labels = (0..LABELS.len()).map(|i| format!("{label}{i}")).collect::<Vec<_>>();
        build(|s| format!("{state}{s}"), &labels, &edges, &finals)
    }
}
