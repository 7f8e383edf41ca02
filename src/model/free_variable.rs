use super::term::{Term, TermKind};
use super::typing::{MonoType, Variable};
use std::collections::HashSet;

pub trait FreeVariable<V> {
    fn free_vars(&self) -> HashSet<&V>;
}

impl FreeVariable<Variable> for MonoType {
    fn free_vars(&self) -> HashSet<&Variable> {
        self.vars().collect()
    }
}

impl<A> FreeVariable<String> for Term<A> {
    fn free_vars(&self) -> HashSet<&String> {
        use TermKind::*;
        match &self.kind {
            Lit(_) => HashSet::new(),
            Var(x) => [x].into(),
            Unary(_, t) => t.free_vars(),
            Binary(_, t1, t2) | App(t1, t2) => &t1.free_vars() | &t2.free_vars(),
            If(c, t1, t2) => &(&c.free_vars() | &t1.free_vars()) | &t2.free_vars(),
            Abs(x, t) | Rec(x, t) => &t.free_vars() - &[x].into(),
            Let(b, t) => &(&t.free_vars() - &[&b.name].into()) | &b.value.free_vars(),
        }
    }
}
