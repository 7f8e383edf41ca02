use crate::model::term::Term;
use crate::model::typing::MonoType;
use std::collections::{vec_deque, VecDeque};
use std::fmt::Display;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Obligation {
    /// The two types must be made equal.
    Equal(MonoType, MonoType),
    /// The type must be `Int` or `Real`.
    Numeric(MonoType),
    /// Values of the type must be comparable with `==`.
    Equatable(MonoType),
}

/// An obligation together with the node that raised it. The node is only
/// rendered if the obligation turns out to be unsatisfiable.
#[derive(Clone, PartialEq, Debug)]
pub struct Constraint<'t> {
    pub obligation: Obligation,
    pub origin: &'t Term,
}

#[derive(Default, Clone, PartialEq, Debug)]
pub struct ConstraintSet<'t> {
    constraints: VecDeque<Constraint<'t>>,
}

impl Display for Obligation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equal(m1, m2) => write!(f, "{m1} = {m2}"),
            Self::Numeric(m) => write!(f, "Numeric {m}"),
            Self::Equatable(m) => write!(f, "Eq {m}"),
        }
    }
}

impl Display for ConstraintSet<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let obligations = (self.iter())
            .map(|c| c.obligation.to_string())
            .collect::<Vec<_>>();
        write!(f, "{{{}}}", obligations.join(", "))
    }
}

impl<'t> ConstraintSet<'t> {
    pub fn new() -> Self {
        Self {
            constraints: VecDeque::new(),
        }
    }

    pub fn equal(&mut self, expected: MonoType, found: MonoType, origin: &'t Term) {
        if expected != found {
            self.require(Obligation::Equal(expected, found), origin);
        }
    }

    pub fn numeric(&mut self, m: MonoType, origin: &'t Term) {
        self.require(Obligation::Numeric(m), origin);
    }

    pub fn equatable(&mut self, m: MonoType, origin: &'t Term) {
        self.require(Obligation::Equatable(m), origin);
    }

    fn require(&mut self, obligation: Obligation, origin: &'t Term) {
        self.constraints.push_back(Constraint { obligation, origin });
    }

    /// Every obligation of `self` followed by every obligation of `other`.
    /// Only the smaller side is moved.
    pub fn union(mut self, mut other: Self) -> Self {
        if self.len() >= other.len() {
            self.constraints.append(&mut other.constraints);
            self
        } else {
            while let Some(c) = self.constraints.pop_back() {
                other.constraints.push_front(c);
            }
            other
        }
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, Constraint<'t>> {
        self.constraints.iter()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn contains(&self, obligation: &Obligation) -> bool {
        self.iter().any(|c| &c.obligation == obligation)
    }
}
