use crate::lexer::Token;
use crate::model::operator::{BinaryOp, UnaryOp};
use crate::model::term::Term;
use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use chumsky::Stream;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("syntax error at '{fragment}': {message}")]
pub struct ParseError {
    pub fragment: String,
    pub span: Range<usize>,
    pub message: String,
}

/// Trees deeper than this are rejected, as every pass after parsing recurses
/// once per level.
pub const MAX_DEPTH: usize = 256;

/// How many brackets and keyword forms may be open at once while parsing.
pub const MAX_NESTING: usize = 32;

const TOO_DEEP: &str = "expression nested too deeply";

/// A parsed term and the depth of its tree.
type Node = (Term, usize);

/// Parses one expression from `tokens`, which were lexed from `source`.
pub fn parse<'a>(source: &str, tokens: Vec<(Token<'a>, Range<usize>)>) -> Result<Term, ParseError> {
    check_nesting(source, &tokens)?;
    let eoi = source.len()..source.len() + 1;
    expr_parser()
        .map(|(term, _)| term)
        .then_ignore(end())
        .parse(Stream::from_iter(eoi, tokens.into_iter()))
        .map_err(|errors| {
            let mut errors = errors.into_iter();
            match errors.next() {
                Some(e) => ParseError::new(source, e),
                None => ParseError {
                    fragment: source.trim().to_owned(),
                    span: 0..source.len(),
                    message: "unrecognised input".to_owned(),
                },
            }
        })
}

/// Rejects input that would make the recursive descent itself too deep.
fn check_nesting(source: &str, tokens: &[(Token, Range<usize>)]) -> Result<(), ParseError> {
    let mut open = Vec::new();
    let mut depth = 0;
    for (token, span) in tokens {
        match token {
            Token::LeftParen => {
                open.push(depth);
                depth += 1;
            }
            Token::RightParen => depth = open.pop().unwrap_or(0),
            Token::Lambda | Token::Rec | Token::If | Token::Let => depth += 1,
            _ => continue,
        }
        if depth > MAX_NESTING {
            return Err(ParseError {
                fragment: source.get(span.clone()).unwrap_or_default().to_owned(),
                span: span.clone(),
                message: TOO_DEEP.to_owned(),
            });
        }
    }
    Ok(())
}

fn deepen<'a>(term: Term, depth: usize, span: Range<usize>) -> Result<Node, Simple<Token<'a>>> {
    if depth > MAX_DEPTH {
        Err(Simple::custom(span, TOO_DEEP))
    } else {
        Ok((term, depth))
    }
}

impl ParseError {
    fn new(source: &str, e: Simple<Token>) -> Self {
        let span = e.span();
        let fragment = match source.get(span.clone()) {
            Some(s) if !s.is_empty() => s.to_owned(),
            _ => "end of input".to_owned(),
        };
        let message = match e.reason() {
            SimpleReason::Custom(message) => message.clone(),
            SimpleReason::Unclosed { delimiter, .. } => format!("unclosed delimiter '{delimiter}'"),
            SimpleReason::Unexpected => {
                let mut expected = (e.expected())
                    .map(|t| match t {
                        Some(t) => format!("'{t}'"),
                        None => "end of input".to_owned(),
                    })
                    .collect::<Vec<_>>();
                expected.sort();
                expected.dedup();
                match expected.as_slice() {
                    [] => "unexpected input".to_owned(),
                    [t] => format!("expected {t}"),
                    ts => format!("expected one of {}", ts.join(", ")),
                }
            }
        };
        Self {
            fragment,
            span,
            message,
        }
    }
}

fn ident_parser<'a>() -> impl Parser<Token<'a>, String, Error = Simple<Token<'a>>> + Clone {
    select! {Token::Ident(x) => x.to_owned()}
}

fn unary_op_parser<'a>() -> impl Parser<Token<'a>, UnaryOp, Error = Simple<Token<'a>>> + Clone {
    filter_map(|span, token: Token<'a>| match token {
        Token::Operator(s) => UnaryOp::from_symbol(s).ok_or_else(|| Simple::expected_input_found(span, Vec::new(), Some(token))),
        _ => Err(Simple::expected_input_found(span, Vec::new(), Some(token))),
    })
}

fn binary_op_parser<'a>(precedence: u8) -> impl Parser<Token<'a>, BinaryOp, Error = Simple<Token<'a>>> + Clone {
    filter_map(move |span, token: Token<'a>| match token {
        Token::Operator(s) => BinaryOp::from_symbol(s)
            .filter(|op| op.precedence() == precedence)
            .ok_or_else(|| Simple::expected_input_found(span, Vec::new(), Some(token))),
        _ => Err(Simple::expected_input_found(span, Vec::new(), Some(token))),
    })
}

fn expr_parser<'a>() -> impl Parser<Token<'a>, Node, Error = Simple<Token<'a>>> + Clone {
    recursive(|expr_parser: Recursive<'a, Token<'a>, Node, Simple<Token<'a>>>| {
        let var_parser = select! {Token::Ident(x) => (Term::var(x), 1)};

        let literal_parser = select! {
            Token::Int(n) => (Term::int(n), 1),
            Token::Bool(b) => (Term::bool(b), 1),
        };

        let real_parser = select! {Token::Real(s) => s}.try_map(|s: &str, span| {
            s.parse()
                .map(|x| (Term::real(x), 1))
                .map_err(|e| Simple::custom(span, format!("invalid real literal: {e}")))
        });

        let paren_parser = expr_parser
            .clone()
            .delimited_by(just(Token::LeftParen), just(Token::RightParen));

        let abs_parser = just(Token::Lambda)
            .map_with_span(|_, span| span)
            .then(ident_parser())
            .then_ignore(just(Token::Arrow))
            .then(expr_parser.clone())
            .try_map(|((span, x), (e, d)), _| deepen(Term::abs(x, e), d + 1, span));

        let rec_parser = just(Token::Rec)
            .map_with_span(|_, span| span)
            .then(ident_parser())
            .then_ignore(just(Token::Arrow))
            .then(expr_parser.clone())
            .try_map(|((span, f), (e, d)), _| deepen(Term::rec(f, e), d + 1, span));

        let if_parser = just(Token::If)
            .map_with_span(|_, span| span)
            .then(expr_parser.clone())
            .then_ignore(just(Token::Then))
            .then(expr_parser.clone())
            .then_ignore(just(Token::Else))
            .then(expr_parser.clone())
            .try_map(|(((span, (c, d0)), (e1, d1)), (e2, d2)), _| {
                deepen(Term::cond(c, e1, e2), d0.max(d1).max(d2) + 1, span)
            });

        let let_parser = just(Token::Let)
            .map_with_span(|_, span| span)
            .then(ident_parser())
            .then_ignore(just(Token::Assign))
            .then(expr_parser.clone())
            .then_ignore(just(Token::In))
            .then(expr_parser.clone())
            .try_map(|(((span, x), (e1, d1)), (e2, d2)), _| {
                deepen(Term::let_in(x, e1, e2), d1.max(d2) + 1, span)
            });

        let atom_parser = choice((literal_parser, real_parser, var_parser, paren_parser));

        let app_parser = atom_parser
            .clone()
            .then(atom_parser.map_with_span(|a, span| (a, span)).repeated())
            .try_map(|(first, rest), _| {
                (rest.into_iter()).try_fold(first, |(t1, d1), ((t2, d2), span)| {
                    deepen(Term::app(t1, t2), d1.max(d2) + 1, span)
                })
            });

        let keyword_parser = choice((abs_parser, rec_parser, if_parser, let_parser));

        let unary_parser = unary_op_parser()
            .map_with_span(|op, span| (op, span))
            .repeated()
            .then(app_parser.or(keyword_parser))
            .try_map(|(ops, operand), _| {
                (ops.into_iter().rev()).try_fold(operand, |(t, d), (op, span)| deepen(Term::unary(op, t), d + 1, span))
            })
            .boxed();

        (BinaryOp::MIN_PRECEDENCE..=BinaryOp::MAX_PRECEDENCE)
            .rev()
            .fold(unary_parser, |operand, precedence| {
                operand
                    .clone()
                    .then(binary_op_parser(precedence).map_with_span(|op, span| (op, span)).then(operand).repeated())
                    .try_map(|(first, rest), _| {
                        (rest.into_iter()).try_fold(first, |(t1, d1), ((op, span), (t2, d2))| {
                            deepen(Term::binary(op, t1, t2), d1.max(d2) + 1, span)
                        })
                    })
                    .boxed()
            })
    })
}
