use super::Variable;
use std::{fmt::Display, iter};

#[derive(Hash, Clone, Copy, PartialEq, Eq, Debug)]
pub enum BaseType {
    Int,
    Real,
    Bool,
}

#[derive(Hash, Clone, PartialEq, Eq, Debug)]
pub enum MonoType {
    Var(Variable),
    Base(BaseType),
    Arrow(Box<MonoType>, Box<MonoType>),
}

impl Display for BaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int => "Int".fmt(f),
            Self::Real => "Real".fmt(f),
            Self::Bool => "Bool".fmt(f),
        }
    }
}

impl Display for MonoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Var(v) => v.fmt(f),
            Self::Base(b) => b.fmt(f),
            Self::Arrow(l, r) => match l.as_ref() {
                Self::Var(_) | Self::Base(_) => write!(f, "{l} → {r}"),
                Self::Arrow(..) => write!(f, "({l}) → {r}"),
            },
        }
    }
}

impl From<Variable> for MonoType {
    fn from(value: Variable) -> Self {
        Self::Var(value)
    }
}

impl From<BaseType> for MonoType {
    fn from(value: BaseType) -> Self {
        Self::Base(value)
    }
}

impl MonoType {
    pub const INT: Self = Self::Base(BaseType::Int);
    pub const REAL: Self = Self::Base(BaseType::Real);
    pub const BOOL: Self = Self::Base(BaseType::Bool);

    pub fn function(m1: impl Into<Self>, m2: impl Into<Self>) -> Self {
        Self::Arrow(Box::new(m1.into()), Box::new(m2.into()))
    }

    pub fn traverse(&mut self, f: &mut impl FnMut(&mut Self)) {
        f(self);
        match self {
            Self::Var(_) | Self::Base(_) => {}
            Self::Arrow(m1, m2) => {
                m1.traverse(f);
                m2.traverse(f);
            }
        }
    }

    pub fn vars(&self) -> impl Iterator<Item = &Variable> {
        let iter: Box<dyn Iterator<Item = _>> = match self {
            Self::Var(v) => Box::new(iter::once(v)),
            Self::Base(_) => Box::new(iter::empty()),
            Self::Arrow(m1, m2) => Box::new(m1.vars().chain(m2.vars())),
        };
        iter
    }

    /// Replaces every occurrence of `target` (a whole subtree, usually a
    /// type variable) by `with`.
    pub fn replace(&self, target: &MonoType, with: &MonoType) -> MonoType {
        if self == target {
            return with.clone();
        }
        match self {
            Self::Var(_) | Self::Base(_) => self.clone(),
            Self::Arrow(m1, m2) => Self::function(m1.replace(target, with), m2.replace(target, with)),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Base(BaseType::Int | BaseType::Real))
    }
}
