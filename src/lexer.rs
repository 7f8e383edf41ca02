use logos::Logos;
use std::fmt::Display;
use std::num::ParseIntError;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Default, Clone, PartialEq, Eq, Debug)]
pub enum LexErrorKind {
    #[default]
    #[error("unknown character")]
    UnknownCharacter,
    #[error("integer error")]
    IntError(#[from] ParseIntError),
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("error tokenising lexeme '{lexeme}'")]
pub struct LexError {
    pub lexeme: String,
    pub span: Range<usize>,
    pub source: LexErrorKind,
}

#[derive(Logos, Hash, PartialEq, Eq, Clone, Copy, Debug)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'source> {
    #[token("=")]
    Assign,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("fn")]
    #[regex(r"λ|\\")]
    Lambda,
    #[regex(r"->|→")]
    Arrow,
    #[token("rec")]
    Rec,
    #[token("let")]
    Let,
    #[token("in")]
    In,
    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("else")]
    Else,
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    #[regex(r"[0-9]+", |lex| lex.slice().parse())]
    Int(i64),
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice())]
    Real(&'source str),
    #[regex(r"==|!=|<=|>=|&&|\|\||[-+*/%<>!]", |lex| lex.slice())]
    Operator(&'source str),
    #[regex(r"[A-Za-z_][A-Za-z0-9_']*", |lex| lex.slice())]
    Ident(&'source str),
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assign => "=".fmt(f),
            Self::LeftParen => "(".fmt(f),
            Self::RightParen => ")".fmt(f),
            Self::Lambda => "fn".fmt(f),
            Self::Arrow => "->".fmt(f),
            Self::Rec => "rec".fmt(f),
            Self::Let => "let".fmt(f),
            Self::In => "in".fmt(f),
            Self::If => "if".fmt(f),
            Self::Then => "then".fmt(f),
            Self::Else => "else".fmt(f),
            Self::Bool(b) => b.fmt(f),
            Self::Int(n) => n.fmt(f),
            Self::Real(s) | Self::Operator(s) | Self::Ident(s) => s.fmt(f),
        }
    }
}

pub fn lex(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        let token = token.map_err(|source| LexError {
            lexeme: lexer.slice().to_owned(),
            span: lexer.span(),
            source,
        })?;
        tokens.push((token, lexer.span()));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        lex(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(
            tokens("let letter = fn x -> x in letter"),
            [
                Token::Let,
                Token::Ident("letter"),
                Token::Assign,
                Token::Lambda,
                Token::Ident("x"),
                Token::Arrow,
                Token::Ident("x"),
                Token::In,
                Token::Ident("letter"),
            ]
        );
    }

    #[test]
    fn operators_take_the_longest_match() {
        assert_eq!(
            tokens("a<=b==c->d-e"),
            [
                Token::Ident("a"),
                Token::Operator("<="),
                Token::Ident("b"),
                Token::Operator("=="),
                Token::Ident("c"),
                Token::Arrow,
                Token::Ident("d"),
                Token::Operator("-"),
                Token::Ident("e"),
            ]
        );
    }

    #[test]
    fn numbers_and_booleans() {
        assert_eq!(
            tokens("12 3.25 true false"),
            [Token::Int(12), Token::Real("3.25"), Token::Bool(true), Token::Bool(false)]
        );
    }

    #[test]
    fn lambda_aliases() {
        assert_eq!(tokens("λ \\ fn →"), [Token::Lambda, Token::Lambda, Token::Lambda, Token::Arrow]);
    }

    #[test]
    fn spans_point_into_the_source() {
        let tokens = lex("x + 10").unwrap();
        assert_eq!(tokens[2], (Token::Int(10), 4..6));
    }

    #[test]
    fn unknown_characters_are_reported() {
        let e = lex("1 + $").unwrap_err();
        assert_eq!(e.lexeme, "$");
        assert_eq!(e.source, LexErrorKind::UnknownCharacter);
    }

    #[test]
    fn oversized_integers_are_reported() {
        let e = lex("99999999999999999999").unwrap_err();
        assert!(matches!(e.source, LexErrorKind::IntError(_)));
    }
}
