pub mod algorithm;

mod constraint;
mod unification;

pub use constraint::{Constraint, ConstraintSet, Obligation};
pub use unification::unify;

use crate::model::term::Term;
use crate::model::typing::{MonoType, Variable};
use crate::model::{Environment, Substitute};
use thiserror::Error;

#[derive(Clone, Error, PartialEq, Debug)]
pub enum TypeError {
    #[error("variable '{0}' is not defined")]
    UnknownVariable(String),
    #[error("cannot construct infinite type {0} = {1}")]
    InfiniteType(Variable, MonoType),
    #[error("expected type {0}, found {1}")]
    UnificationConflict(MonoType, MonoType),
    #[error("expected a numeric type, found {0}")]
    NotNumeric(MonoType),
    #[error("values of type {0} cannot be compared for equality")]
    NotComparable(MonoType),
    #[error("{1} in '{0}'")]
    InTerm(String, Box<TypeError>),
}

pub type Result<T> = std::result::Result<T, TypeError>;

/// The types of the variables in scope.
pub type Context = Environment<MonoType>;

impl TypeError {
    pub fn within(self, origin: impl Into<String>) -> Self {
        Self::InTerm(origin.into(), Box::new(self))
    }

    /// The error with any location wrappers removed.
    pub fn cause(&self) -> &Self {
        match self {
            Self::InTerm(_, e) => e.cause(),
            e => e,
        }
    }
}

impl Term<MonoType> {
    pub fn ty(&self) -> &MonoType {
        &self.info
    }
}

pub fn infer_type(term: &Term) -> Result<Term<MonoType>> {
    infer_type_in(&Context::new(), term)
}

/// Annotates every node of `term` with its type, solving the constraints
/// generated along the way.
pub fn infer_type_in(context: &Context, term: &Term) -> Result<Term<MonoType>> {
    let n = (context.values())
        .flat_map(MonoType::vars)
        .map(|v| v.0 + 1)
        .max()
        .unwrap_or(0);
    let (typed, constraints, n) = algorithm::infer(context, term, n)?;
    log::debug!(
        "generated {} constraints over {n} type variables for '{term}'",
        constraints.len()
    );
    let s = constraints.solve()?;
    log::debug!("solved constraints: {s}");
    Ok(typed.substitute(&s))
}
