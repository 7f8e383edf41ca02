pub mod denotation;
mod value;

pub use value::{Value, ValueConversionError};

use crate::interpreter::{self, EvalError};
use crate::lexer::{self, LexError};
use crate::model::term::Term;
use crate::model::typing::MonoType;
use crate::parser::{self, ParseError};
use crate::type_inference::{self, TypeError};
use thiserror::Error;

/// A source text holding one or more expressions separated by `;`.
#[derive(Clone, Debug)]
pub struct Program {
    entries: Vec<String>,
}

/// Everything produced for an entry that made it through every phase.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub term: Term,
    pub typed: Term<MonoType>,
    pub value: Value,
}

#[derive(Error, Debug)]
pub enum ProgramError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("type error: {0}")]
    Type(#[from] TypeError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, ProgramError>;

impl Outcome {
    pub fn ty(&self) -> &MonoType {
        self.typed.ty()
    }
}

impl Program {
    pub fn new(source: impl AsRef<str>) -> Self {
        let entries = (source.as_ref().split(';'))
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| entry.trim().to_owned())
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Runs every entry independently; a failure in one never affects the rest.
    pub fn run(&self) -> Vec<Result<Outcome>> {
        self.entries.iter().map(|entry| run_entry(entry)).collect()
    }
}

/// Lexes, parses, type checks and evaluates a single expression. Evaluation
/// only happens once inference has succeeded.
pub fn run_entry(source: &str) -> Result<Outcome> {
    let tokens = lexer::lex(source)?;
    let term = parser::parse(source, tokens)?;
    log::debug!("parsed '{source}' as {term:?}");
    let typed = type_inference::infer_type(&term)?;
    log::debug!("'{term}' has type {}", typed.ty());
    let value = interpreter::eval(&term)?;
    log::debug!("'{term}' evaluated to {value}");
    Ok(Outcome { term, typed, value })
}
