use super::term::Term;
use super::typing::{MonoType, Variable};
use std::collections::{hash_map, HashMap};
use std::fmt::Display;

#[derive(Default, PartialEq, Eq, Clone, Debug)]
pub struct Substitution {
    map: HashMap<Variable, MonoType>,
}

pub trait Substitute {
    fn substitute_mut(&mut self, subst: &Substitution);

    fn substitute(mut self, subst: &Substitution) -> Self
    where
        Self: Sized,
    {
        self.substitute_mut(subst);
        self
    }
}

impl IntoIterator for Substitution {
    type Item = (Variable, MonoType);
    type IntoIter = hash_map::IntoIter<Variable, MonoType>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_iter()
    }
}

impl FromIterator<(Variable, MonoType)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Variable, MonoType)>>(iter: I) -> Self {
        Self {
            map: HashMap::from_iter(iter),
        }
    }
}

impl Display for Substitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut mappings = self.iter().collect::<Vec<_>>();
        mappings.sort_by_key(|(v, _)| **v);
        let mappings = (mappings.into_iter())
            .map(|(v, m)| format!("{v} -> {m}"))
            .collect::<Vec<_>>();
        write!(f, "{{{}}}", mappings.join(", "))
    }
}

impl Substitution {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn get(&self, v: &Variable) -> Option<&MonoType> {
        self.map.get(v)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, Variable, MonoType> {
        self.map.iter()
    }

    /// Applies `other` after `self`: the result maps each variable the way
    /// applying `self` then `other` would.
    pub fn combine_mut(&mut self, other: &Self) {
        self.map.values_mut().for_each(|m| m.substitute_mut(other));
        self.map.extend(other.to_owned());
    }

    pub fn combine(mut self, other: &Self) -> Self {
        self.combine_mut(other);
        self
    }
}

impl Substitute for MonoType {
    fn substitute_mut(&mut self, subst: &Substitution) {
        self.traverse(&mut |m1| {
            if let Self::Var(v) = m1 {
                if let Some(m2) = subst.map.get(v) {
                    *m1 = m2.clone();
                }
            }
        });
    }
}

impl Substitute for Term<MonoType> {
    fn substitute_mut(&mut self, subst: &Substitution) {
        self.traverse_mut(&mut |t| t.info.substitute_mut(subst));
    }
}
