use crate::model::term::{Literal, Term};
use crate::model::Environment;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone)]
pub enum Value {
    Lit(Literal),
    /// A function's parameter and body, with the environment it was created in.
    Closure(String, Term, Environment<Value>),
}

#[derive(Clone, Error, Debug)]
#[error("failed to convert value {value} to type {type_name}")]
pub struct ValueConversionError {
    value: String,
    type_name: String,
}

impl TryFrom<Value> for i64 {
    type Error = ValueConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Lit(Literal::Int(n)) => Ok(n),
            v => Err(ValueConversionError::new(&v, "Int")),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = ValueConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Lit(Literal::Real(x)) => Ok(x),
            v => Err(ValueConversionError::new(&v, "Real")),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = ValueConversionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Lit(Literal::Bool(b)) => Ok(b),
            v => Err(ValueConversionError::new(&v, "Bool")),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Lit(Literal::Int(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Lit(Literal::Real(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Lit(Literal::Bool(value))
    }
}

impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        Self::Lit(value)
    }
}

impl PartialEq for Value {
    /// Literals compare by value; closures are never equal.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Lit(l1), Self::Lit(l2)) => l1 == l2,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lit(lit) => lit.fmt(f),
            Self::Closure(..) => "<function>".fmt(f),
        }
    }
}

impl ValueConversionError {
    pub fn new(value: &Value, type_name: impl AsRef<str>) -> Self {
        Self {
            value: value.to_string(),
            type_name: type_name.as_ref().to_owned(),
        }
    }
}
