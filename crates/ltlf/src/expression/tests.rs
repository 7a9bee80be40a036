use super::*;
use crate::testing::{check_nnf, expect, holds};

#[test]
fn nnf_basic() {
    check_nnf("p", expect!(@"p"));
    check_nnf("p U q", expect!(@"(p U q)"));
    check_nnf("G p", expect!(@"(⊥ R p)"));
    check_nnf("F p", expect!(@"(T U p)"));
}

#[test]
fn nnf_pushes_negation_inwards() {
    check_nnf("!(p & q)", expect!(@"(¬p ∨ ¬q)"));
    check_nnf("!X p", expect!(@"WX ¬p"));
    check_nnf("!WX p", expect!(@"X ¬p"));
    check_nnf("!G p", expect!(@"(T U ¬p)"));
    check_nnf("!(p U q)", expect!(@"(¬p R ¬q)"));
    check_nnf("!!p", expect!(@"p"));
}

#[test]
fn nnf_derived_operators() {
    check_nnf("p -> q", expect!(@"(¬p ∨ q)"));
    check_nnf("!(p -> q)", expect!(@"(p ∧ ¬q)"));
    check_nnf("p W q", expect!(@"(q R (p ∨ q))"));
    check_nnf("!(p W q)", expect!(@"(¬q U (¬p ∧ ¬q))"));
    check_nnf("G (a -> F b)", expect!(@"(⊥ R (¬a ∨ (T U b)))"));
}

#[test]
fn propositions() {
    let expr = LtlfExpression::parse("G (b -> F a) & !c U b").unwrap();
    assert_eq!(
        expr.propositions().iter().map(|l| l.as_str()).collect::<Vec<_>>(),
        ["a", "b", "c"]
    );
    assert!(LtlfExpression::True.propositions().is_empty());
}

#[test]
fn next_is_strong_and_weak_next_is_weak() {
    assert!(!holds("X a", &[&["a"]]));
    assert!(holds("X a", &[&[], &["a"]]));
    assert!(holds("WX a", &[&["a"]]));
    assert!(!holds("WX a", &[&[], &[]]));
}

#[test]
fn empty_trace() {
    assert!(!holds("a", &[]));
    assert!(holds("!a", &[]));
    assert!(!holds("F a", &[]));
    assert!(holds("G a", &[]));
    assert!(!holds("X true", &[]));
    assert!(holds("WX false", &[]));
    assert!(holds("a W b", &[]));
    assert!(holds("true", &[]));
    assert!(!holds("false", &[]));
}

#[test]
fn response() {
    let f = "G (a -> F b)";
    assert!(holds(f, &[&["a"], &["b"]]));
    assert!(holds(f, &[&["c"]]));
    assert!(!holds(f, &[&["a"], &["c"]]));
    assert!(!holds(f, &[&["b"], &["a"]]));
}

#[test]
fn weak_until() {
    let f = "a W b";
    assert!(holds(f, &[&["a"], &["a"]]));
    assert!(holds(f, &[&["a"], &["b"], &["c"]]));
    assert!(!holds(f, &[&["a"], &["c"], &["b"]]));
}
