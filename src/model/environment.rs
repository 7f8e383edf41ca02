use std::collections::{hash_map, HashMap};
use std::fmt::Display;
use std::ops::{Add, AddAssign};

/// A scope from names to `T`. Inserting an existing name shadows the
/// previous binding.
#[derive(Default, PartialEq, Eq, Clone, Debug)]
pub struct Environment<T> {
    map: HashMap<String, T>,
}

impl<T, U: Into<T>> AddAssign<(String, U)> for Environment<T> {
    fn add_assign(&mut self, (name, x): (String, U)) {
        self.map.insert(name, x.into());
    }
}

impl<T, U: Into<T>> Add<(String, U)> for Environment<T> {
    type Output = Self;

    fn add(mut self, rhs: (String, U)) -> Self::Output {
        self += rhs;
        self
    }
}

impl<T: Display> Display for Environment<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bindings = (self.iter())
            .map(|(n, x)| format!("{n}={x}"))
            .collect::<Vec<_>>();
        bindings.sort();
        write!(f, "[{}]", bindings.join(","))
    }
}

impl<T> Environment<T> {
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    /// Returns this scope extended with `name`, leaving any outer binding of
    /// the same name shadowed.
    pub fn augment(self, name: impl Into<String>, x: impl Into<T>) -> Self {
        let x: T = x.into();
        self + (name.into(), x)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.map.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<T> {
        self.map.remove(name)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, T> {
        self.map.iter()
    }

    pub fn values(&self) -> hash_map::Values<'_, String, T> {
        self.map.values()
    }
}
