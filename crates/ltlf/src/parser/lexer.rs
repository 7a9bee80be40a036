use std::fmt;

use plex::lexer;

#[derive(Debug, Clone)]
pub enum Token {
    Ident(String),
    Whitespace,
    LParen,
    RParen,

    True,
    False,
    Not,
    And,
    Or,
    Implies,
    Equiv,
    X,
    WX,
    G,
    F,
    U,
    R,
    W,

    Unexpected(String),
}

lexer! {
    fn next_token(text: 'a) -> Token;
    r#"[ \t\r\n]+"# => Token::Whitespace,

    r#"\("# => Token::LParen,
    r#"\)"# => Token::RParen,
    r#"true|True|TRUE"# => Token::True,
    r#"false|False|FALSE"# => Token::False,

    r#"!|\~"# => Token::Not,
    r#"\&|\&\&"# => Token::And,
    r#"\||\|\|"# => Token::Or,
    r#"->"# => Token::Implies,
    r#"<->"# => Token::Equiv,
    r#"X"# => Token::X,
    r#"WX"# => Token::WX,
    r#"G"# => Token::G,
    r#"F"# => Token::F,
    r#"U"# => Token::U,
    r#"R"# => Token::R,
    r#"W"# => Token::W,

    r#"[a-z_][a-z0-9_]*"# => Token::Ident(text.to_owned()),

    r#"."# => Token::Unexpected(text.to_owned()),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(i) => write!(f, "{i}"),
            Token::Whitespace => write!(f, " "),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Not => write!(f, "!"),
            Token::And => write!(f, "&"),
            Token::Or => write!(f, "|"),
            Token::Implies => write!(f, "->"),
            Token::Equiv => write!(f, "<->"),
            Token::X => write!(f, "X"),
            Token::WX => write!(f, "WX"),
            Token::G => write!(f, "G"),
            Token::F => write!(f, "F"),
            Token::U => write!(f, "U"),
            Token::R => write!(f, "R"),
            Token::W => write!(f, "W"),
            Token::Unexpected(c) => write!(f, "{c}"),
        }
    }
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
                Token::Whitespace => {
                    continue;
                }
                tok => {
                    return Some((tok, span));
                }
            }
        }
    }
}
