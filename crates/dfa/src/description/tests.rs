use proptest::prelude::*;

use super::*;
use crate::{
    equivalence::equivalent,
    testing::{arb_automaton, arb_oddly_named_automaton},
};

const MONA: &str = r#"digraph MONA_DFA {
 rankdir = LR;
 center = true;
 size = "7.5,10.5";
 edge [fontname = Courier];
 node [height = .5, width = .5];
 node [shape = doublecircle]; 2; 3;
 node [shape = circle]; 1;
 init [shape = plaintext, label = ""];
 init -> 1;
 1 -> 2 [label="a & ~b"];
 1 -> 3 [label="~a & b"];
 2 -> 2 [label="a & ~b"];
 3 -> 1 [label="a & ~b"];
}
"#;

fn malformed_line(err: AutomatonError) -> Option<usize> {
    match err {
        AutomatonError::MalformedDescription { line, .. } => line,
        err => panic!("expected a malformed description, got {err:?}"),
    }
}

#[test]
fn mona_output() {
    let dfa = parse(MONA).unwrap();
    assert_eq!(dfa.num_states(), 3);
    assert_eq!(dfa.state_name(dfa.initial()), "1");
    assert_eq!(
        dfa.finals().map(|s| dfa.state_name(s)).collect::<Vec<_>>(),
        ["2", "3"]
    );
    assert_eq!(
        dfa.alphabet().map(|l| l.as_str()).collect::<Vec<_>>(),
        ["a & ~b", "~a & b"]
    );
    assert!(dfa.accepts(["a & ~b", "a & ~b"]));
    assert!(dfa.accepts(["~a & b"]));
    assert!(!dfa.accepts(["~a & b", "a & ~b"]));
    assert!(!dfa.accepts(Vec::<&str>::new()));
}

#[test]
fn every_listed_final_state_is_taken() {
    let dfa = parse(
        r#"digraph MONA_DFA {
 node [shape = doublecircle]; 1; 2; 3;
 init -> 1;
 1 -> 2 [label="a"];
 2 -> 3 [label="a"];
}"#,
    )
    .unwrap();
    assert_eq!(dfa.finals().count(), 3);
    assert!(dfa.accepts(Vec::<&str>::new()));
    assert!(dfa.accepts(["a", "a"]));
}

#[test]
fn declarations_in_any_order() {
    let dfa = parse(
        r#"digraph MONA_DFA {
 2 -> 2 [label="b"];
 1 -> 2 [label="a"];
 init -> 1;
 node [shape = doublecircle]; 2;
}"#,
    )
    .unwrap();
    assert_eq!(dfa.state_name(dfa.initial()), "1");
    assert!(dfa.accepts(["a", "b", "b"]));
    assert!(!dfa.accepts(["a", "a"]));
}

#[test]
fn missing_initial_marker() {
    let err = parse(
        r#"digraph MONA_DFA {
 node [shape = doublecircle]; 1;
 1 -> 1 [label="a"];
}"#,
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed automaton description: no initial state marker"
    );
}

#[test]
fn two_initial_markers() {
    let err = parse("digraph MONA_DFA {\n init -> 1;\n init -> 2;\n}").unwrap_err();
    assert_eq!(malformed_line(err), Some(3));
}

#[test]
fn empty_text() {
    assert!(matches!(
        parse("").unwrap_err(),
        AutomatonError::MalformedDescription { line: None, .. }
    ));
    assert!(parse("  \n\t\n").is_err());
}

#[test]
fn unterminated_label() {
    let err = parse("digraph MONA_DFA {\n init -> 1;\n 1 -> 1 [label=\"a];\n}").unwrap_err();
    assert_eq!(malformed_line(err), Some(3));
}

#[test]
fn edge_without_label() {
    let err = parse("digraph MONA_DFA {\n init -> 1;\n 1 -> 2;\n}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed automaton description (line 3): transition `1 -> 2` has no label"
    );
}

#[test]
fn conflicting_edges_violate_determinism() {
    let err = parse(
        "digraph MONA_DFA {\n init -> 1;\n 1 -> 1 [label=\"a\"];\n 1 -> 2 [label=\"a\"];\n}",
    )
    .unwrap_err();
    assert!(matches!(err, AutomatonError::InvariantViolation(_)));
}

#[test]
fn round_trip() {
    let dfa = parse(MONA).unwrap();
    let printed = dfa.to_description();
    let reparsed = parse(&printed).unwrap();
    assert_eq!(reparsed.to_description(), printed);
    assert_eq!(reparsed.num_states(), dfa.num_states());
    for word in [
        vec![],
        vec!["a & ~b"],
        vec!["~a & b", "a & ~b"],
        vec!["~a & b", "a & ~b", "~a & b"],
    ] {
        assert_eq!(dfa.accepts(&word), reparsed.accepts(&word), "{word:?}");
    }
}

#[test]
fn printed_description() {
    let dfa = Automaton::new(
        ["1", "sink state"],
        [
            ("1", Label::from("a"), "1"),
            ("1", Label::from("b"), "sink state"),
        ],
        "1",
        ["1"],
    )
    .unwrap();
    insta::assert_snapshot!(dfa.to_description(), @r###"
    digraph MONA_DFA {
     rankdir = LR;
     center = true;
     size = "7.5,10.5";
     edge [fontname = Courier];
     node [height = .5, width = .5];
     node [shape = doublecircle]; 1;
     node [shape = circle]; "sink state";
     init [shape = plaintext, label = ""];
     init -> 1;
     1 -> 1 [label="a"];
     1 -> "sink state" [label="b"];
    }
    "###);
}

#[test]
fn quotes_and_backslashes_are_escaped() {
    let dfa = Automaton::new(
        ["q\"0", "back\\slash", "two\nlines"],
        [
            ("q\"0", Label::from("say \"hi\""), "back\\slash"),
            ("back\\slash", Label::from("a \\ b"), "two\nlines"),
        ],
        "q\"0",
        ["two\nlines"],
    )
    .unwrap();
    let printed = dfa.to_description();
    assert!(printed.contains(r#" "q\"0" -> "back\\slash" [label="say \"hi\""];"#));

    let reparsed = parse(&printed).unwrap();
    assert_eq!(
        reparsed.states().map(|s| reparsed.state_name(s)).collect::<Vec<_>>(),
        ["two\nlines", "q\"0", "back\\slash"]
    );
    assert_eq!(reparsed.state_name(reparsed.initial()), "q\"0");
    assert!(reparsed.accepts(["say \"hi\"", "a \\ b"]));
    assert!(equivalent(&reparsed, &dfa).unwrap());
}

#[test]
fn keywords_are_quoted() {
    let dfa = Automaton::new(
        ["node", "edge"],
        [("node", Label::from("a"), "edge")],
        "node",
        ["edge"],
    )
    .unwrap();
    let reparsed = parse(&dfa.to_description()).unwrap();
    assert_eq!(reparsed.state_name(reparsed.initial()), "node");
    assert!(reparsed.accepts(["a"]));
}

#[test]
fn init_is_a_reserved_state_name() {
    let err = Automaton::new(
        ["init"],
        [("init", Label::from("a"), "init")],
        "init",
        ["init"],
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "automaton invariant violated: state name `init` is reserved for the initial state marker"
    );

    let err =
        parse("digraph MONA_DFA {\n init -> 1;\n 1 -> init [label=\"a\"];\n}").unwrap_err();
    assert!(matches!(err, AutomatonError::InvariantViolation(_)));
}

proptest! {
    #[test]
    fn printed_descriptions_parse_back(a in arb_automaton()) {
        let reparsed = parse(&a.to_description()).unwrap();
        prop_assert!(equivalent(&reparsed, &a).unwrap());
        prop_assert_eq!(reparsed.num_states(), a.num_states());
    }

    #[test]
    fn odd_names_survive_printing(a in arb_oddly_named_automaton()) {
        let reparsed = parse(&a.to_description()).unwrap();
        prop_assert!(equivalent(&reparsed, &a).unwrap());
        prop_assert_eq!(
            reparsed.state_name(reparsed.initial()),
            a.state_name(a.initial())
        );
    }
}
