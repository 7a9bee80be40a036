#![allow(
    clippy::type_complexity,
    clippy::redundant_field_names,
    clippy::ptr_arg,
    clippy::redundant_closure_call,
    clippy::enum_variant_names,
    clippy::let_unit_value
)]

use plex::parser;

use super::lexer::{Span, Token, Token::*};

pub type Attrs = Vec<(String, String)>;

/// One statement of the Graphviz dialect emitted by MONA.
#[derive(Debug, Clone)]
pub enum Stmt {
    /// `node [shape = doublecircle];` sets the defaults for the node
    /// statements that follow it.
    NodeDefaults(Attrs),
    Node {
        id: String,
        attrs: Attrs,
        span: Span,
    },
    Edge {
        src: String,
        dst: String,
        attrs: Attrs,
        span: Span,
    },
    /// Graph attributes and `edge [...]` defaults.
    Ignored,
}

parser! {
    fn parse_(Token, Span);

    (a, b) {
        Span {
            lo: a.lo,
            hi: b.hi,
        }
    }

    graph: Vec<Stmt> {
        Digraph id LBrace stmts[s] RBrace => s,
        Digraph LBrace stmts[s] RBrace => s,
    }

    stmts: Vec<Stmt> {
        => vec![],
        stmts[mut s] stmt[x] => {
            s.push(x);
            s
        },
    }

    stmt: Stmt {
        Node attr_list[a] Semi => Stmt::NodeDefaults(a),
        Edge attr_list Semi => Stmt::Ignored,
        Ident(_) Equals value Semi => Stmt::Ignored,
        id[id] Semi => Stmt::Node {
            id,
            attrs: vec![],
            span: span!(),
        },
        id[id] attr_list[attrs] Semi => Stmt::Node {
            id,
            attrs,
            span: span!(),
        },
        id[src] Arrow id[dst] Semi => Stmt::Edge {
            src,
            dst,
            attrs: vec![],
            span: span!(),
        },
        id[src] Arrow id[dst] attr_list[attrs] Semi => Stmt::Edge {
            src,
            dst,
            attrs,
            span: span!(),
        },
    }

    attr_list: Attrs {
        LBracket RBracket => vec![],
        LBracket attrs[a] RBracket => a,
    }

    attrs: Attrs {
        attr[a] => vec![a],
        attrs[mut v] Comma attr[a] => {
            v.push(a);
            v
        },
    }

    attr: (String, String) {
        Ident(k) Equals value[v] => (k, v),
    }

    id: String {
        Ident(v) => v,
        Str(v) => v,
    }

    value: String {
        Ident(v) => v,
        Str(v) => v,
    }
}

pub fn parse<I: Iterator<Item = (Token, Span)>>(
    i: I,
) -> Result<Vec<Stmt>, (Option<(Token, Span)>, &'static str)> {
    parse_(i)
}
