use std::collections::BTreeSet;

use itertools::Itertools;
use ltlf::{Literal, LtlfExpression};

use super::*;

fn holds(formula: &str, events: &[&str]) -> bool {
    let trace: Vec<BTreeSet<Literal>> = events
        .iter()
        .map(|e| [Literal::from(*e)].into_iter().collect())
        .collect();
    LtlfExpression::parse(formula).unwrap().nnf().holds(&trace)
}

fn formula(template: &str, activities: &[&str]) -> String {
    build_formula(template, activities).unwrap().formula
}

#[test]
fn catalog_covers_every_template_once() {
    assert_eq!(Template::catalog().count(), Template::ALL.len());
    assert!(Template::ALL.iter().all_unique());
    for t in Template::ALL {
        assert_eq!(Template::from_name(t.name()), Some(t));
    }
}

#[test]
fn catalog_formulas() {
    let listing = Template::catalog()
        .map(|t| {
            let activities = ["A", "B"];
            let f = build_formula(t.name(), &activities[..t.arity()]).unwrap();
            format!("{}/{}: {}", t, t.arity(), f.formula)
        })
        .join("\n");
    insta::assert_snapshot!(listing, @r###"
    Init/1: a
    Existence/1: F(a)
    Existence2/1: F(a & X(F(a)))
    Existence3/1: F(a & X(F(a & X(F(a)))))
    Absence/1: !F(a)
    Absence2/1: !F(a & X(F(a)))
    Absence3/1: !F(a & X(F(a & X(F(a)))))
    Exactly1/1: F(a) & !F(a & X(F(a)))
    Exactly2/1: F(a & X(F(a))) & !F(a & X(F(a & X(F(a)))))
    Choice/2: F(a) | F(b)
    Exclusive Choice/2: (F(a) | F(b)) & !(F(a) & F(b))
    Responded Existence/2: F(a) -> F(b)
    Co-Existence/2: (F(a) -> F(b)) & (F(b) -> F(a))
    Response/2: G(a -> F(b))
    Alternate Response/2: G(a -> X(!a U b))
    Chain Response/2: G(a -> X(b))
    Precedence/2: (!b U a) | G(!b)
    Alternate Precedence/2: ((!b U a) | G(!b)) & G(b -> WX((!b U a) | G(!b)))
    Chain Precedence/2: G(X(b) -> a) & !b
    Succession/2: (G(a -> F(b))) & ((!b U a) | G(!b))
    Alternate Succession/2: (G(a -> X(!a U b))) & (((!b U a) | G(!b)) & G(b -> WX((!b U a) | G(!b))))
    Chain Succession/2: (G(a -> X(b))) & (G(X(b) -> a) & !b)
    Not Co-Existence/2: !(F(a) & F(b))
    Not Responded Existence/2: F(a) -> !F(b)
    Not Response/2: G(a -> !F(b))
    Not Precedence/2: G(a -> !F(b))
    Not Succession/2: G(a -> !F(b))
    Not Chain Response/2: G(a -> !X(b))
    Not Chain Precedence/2: G(X(b) -> !a)
    Not Chain Succession/2: G(a -> !X(b))
    "###);
}

#[test]
fn every_formula_parses() {
    for t in Template::catalog() {
        let activities = ["Send Invoice", "2nd reminder"];
        let f = build_formula(t.name(), &activities[..t.arity()]).unwrap();
        let expr = LtlfExpression::parse(&f.formula).unwrap();
        let props = expr.propositions();
        assert!(props.contains(&Literal::from("sendinvoice")), "{t}");
        assert!(props.len() <= t.arity(), "{t}");
    }
}

#[test]
fn unknown_template() {
    assert_eq!(
        build_formula("Eventually", &["A"]).unwrap_err(),
        TemplateError::UnknownTemplate("Eventually".to_string())
    );
}

#[test]
fn arity_mismatch() {
    assert_eq!(
        build_formula("Response", &["A"]).unwrap_err(),
        TemplateError::ArityMismatch {
            template: Template::Response,
            expected: 2,
            actual: 1
        }
    );
    assert!(matches!(
        build_formula("Existence", &["A", "B"]),
        Err(TemplateError::ArityMismatch { actual: 2, .. })
    ));
    assert_eq!(
        build_formula("Init", &Vec::<String>::new())
            .unwrap_err()
            .to_string(),
        "template `Init` takes 1 activities, got 0"
    );
}

#[test]
fn building_is_idempotent() {
    let first = build_formula("Chain Succession", &["A", "B"]).unwrap();
    let second = build_formula(" Chain Succession ", &[" A", "B "]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.template, "Chain Succession");
    assert_eq!(first.activities, ["A", "B"]);
}

#[test]
fn activity_names_become_propositions() {
    assert_eq!(proposition("Send Invoice"), "sendinvoice");
    assert_eq!(proposition("check-credit"), "checkcredit");
    assert_eq!(proposition("2nd Reminder"), "_2ndreminder");
    assert_eq!(proposition("_internal"), "_internal");
    assert_eq!(proposition("Ünïcode ok"), "ncodeok");
    assert_eq!(proposition("!!!"), "_");
    assert_eq!(proposition("True"), "_true");
}

#[test]
fn precedence() {
    let f = formula("Precedence", &["a", "b"]);
    assert!(holds(&f, &["a", "b"]));
    assert!(holds(&f, &["c"]));
    assert!(!holds(&f, &["b"]));
    assert!(!holds(&f, &["b", "a"]));
}

#[test]
fn alternate_precedence() {
    let f = formula("Alternate Precedence", &["a", "b"]);
    assert!(holds(&f, &["a", "b", "a", "b"]));
    assert!(!holds(&f, &["a", "b", "b"]));
}

#[test]
fn alternate_response() {
    let f = formula("Alternate Response", &["a", "b"]);
    assert!(holds(&f, &["a", "b", "a", "b"]));
    assert!(!holds(&f, &["a", "a", "b"]));
}

#[test]
fn chain_precedence() {
    let f = formula("Chain Precedence", &["a", "b"]);
    assert!(holds(&f, &["a", "b"]));
    assert!(!holds(&f, &["c", "b"]));
    assert!(!holds(&f, &["b"]));
}

#[test]
fn exactly_once() {
    let f = formula("Exactly1", &["a"]);
    assert!(holds(&f, &["a"]));
    assert!(holds(&f, &["b", "a", "b"]));
    assert!(!holds(&f, &["a", "a"]));
    assert!(!holds(&f, &[]));
}

#[test]
fn not_chain_succession() {
    let f = formula("Not Chain Succession", &["a", "b"]);
    assert!(!holds(&f, &["a", "b"]));
    assert!(holds(&f, &["a", "c", "b"]));
}

/// Position of `t` in declaration order. No wildcard arm, so a new variant
/// does not compile until it is numbered here.
fn ordinal(t: Template) -> usize {
    match t {
        Template::Init => 0,
        Template::Existence => 1,
        Template::Existence2 => 2,
        Template::Existence3 => 3,
        Template::Absence => 4,
        Template::Absence2 => 5,
        Template::Absence3 => 6,
        Template::Exactly1 => 7,
        Template::Exactly2 => 8,
        Template::Choice => 9,
        Template::ExclusiveChoice => 10,
        Template::RespondedExistence => 11,
        Template::CoExistence => 12,
        Template::Response => 13,
        Template::AlternateResponse => 14,
        Template::ChainResponse => 15,
        Template::Precedence => 16,
        Template::AlternatePrecedence => 17,
        Template::ChainPrecedence => 18,
        Template::Succession => 19,
        Template::AlternateSuccession => 20,
        Template::ChainSuccession => 21,
        Template::NotCoExistence => 22,
        Template::NotRespondedExistence => 23,
        Template::NotResponse => 24,
        Template::NotPrecedence => 25,
        Template::NotSuccession => 26,
        Template::NotChainResponse => 27,
        Template::NotChainPrecedence => 28,
        Template::NotChainSuccession => 29,
    }
}

#[test]
fn all_lists_every_variant_once() {
    const VARIANTS: usize = 30;
    assert_eq!(Template::ALL.len(), VARIANTS);
    assert_eq!(
        Template::ALL.iter().map(|t| ordinal(*t)).collect_vec(),
        (0..VARIANTS).collect_vec()
    );
}
