use plex::lexer;

#[derive(Debug, Clone)]
pub enum Token {
    Whitespace,
    Comment,

    Digraph,
    Node,
    Edge,
    Ident(String),
    Str(String),

    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Equals,
    Arrow,

    Unexpected(String),
}

lexer! {
    fn next_token(text: 'a) -> Token;
    r#"[ \t\r\n]+"# => Token::Whitespace,
    r#"//[^\n]*"# => Token::Comment,

    r#"digraph"# => Token::Digraph,
    r#"node"# => Token::Node,
    r#"edge"# => Token::Edge,

    r#"\{"# => Token::LBrace,
    r#"\}"# => Token::RBrace,
    r#"\["# => Token::LBracket,
    r#"\]"# => Token::RBracket,
    r#";"# => Token::Semi,
    r#","# => Token::Comma,
    r#"="# => Token::Equals,
    r#"->"# => Token::Arrow,

    r#""([^"\\]|\\(.|\n))*""# => Token::Str(unescape(&text[1..text.len() - 1])),
    r#"[A-Za-z0-9_.]+"# => Token::Ident(text.to_owned()),

    r#"."# => Token::Unexpected(text.to_owned()),
}

/// A backslash takes the next character literally.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

pub struct Lexer<'a> {
    original: &'a str,
    remaining: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(s: &'a str) -> Lexer<'a> {
        Lexer {
            original: s,
            remaining: s,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
}

impl Iterator for Lexer<'_> {
    type Item = (Token, Span);
    fn next(&mut self) -> Option<(Token, Span)> {
        loop {
            let (tok, span) = if let Some((tok, new_remaining)) = next_token(self.remaining) {
                let lo = self.original.len() - self.remaining.len();
                let hi = self.original.len() - new_remaining.len();
                self.remaining = new_remaining;
                (tok, Span { lo, hi })
            } else {
                return None;
            };
            match tok {
                Token::Whitespace | Token::Comment => {
                    continue;
                }
                tok => {
                    return Some((tok, span));
                }
            }
        }
    }
}
