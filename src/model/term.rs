use super::operator::{BinaryOp, UnaryOp};
use super::FreeVariable;
use std::collections::HashSet;
use std::fmt::Display;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Literal {
    Int(i64),
    Real(f64),
    Bool(bool),
}

/// The `x = e` part of `let x = e in body`.
#[derive(PartialEq, Clone, Debug)]
pub struct Binding<A = ()> {
    pub name: String,
    pub value: Box<Term<A>>,
}

/// A syntax tree node. `info` is `()` straight out of the parser and the
/// node's inferred type once inference has run.
#[derive(PartialEq, Clone, Debug)]
pub struct Term<A = ()> {
    pub kind: TermKind<A>,
    pub info: A,
}

#[derive(PartialEq, Clone, Debug)]
pub enum TermKind<A = ()> {
    Lit(Literal),
    Var(String),
    Unary(UnaryOp, Box<Term<A>>),
    Binary(BinaryOp, Box<Term<A>>, Box<Term<A>>),
    If(Box<Term<A>>, Box<Term<A>>, Box<Term<A>>),
    Abs(String, Box<Term<A>>),
    App(Box<Term<A>>, Box<Term<A>>),
    Rec(String, Box<Term<A>>),
    Let(Binding<A>, Box<Term<A>>),
}

impl From<Literal> for Term {
    fn from(value: Literal) -> Self {
        Self::new(TermKind::Lit(value))
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Finite reals are written in plain positional notation, so they lex back
/// to the same literal. Infinities and NaN have no literal form and are
/// written as `inf`, `-inf` and `NaN`.
impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(n) => n.fmt(f),
            Literal::Real(x) if x.is_finite() => {
                let s = x.to_string();
                if s.contains('.') {
                    s.fmt(f)
                } else {
                    write!(f, "{s}.0")
                }
            }
            Literal::Real(x) => x.fmt(f),
            Literal::Bool(b) => b.fmt(f),
        }
    }
}

impl<A> Display for Term<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TermKind::*;
        match &self.kind {
            Lit(lit) => lit.fmt(f),
            Var(x) => x.fmt(f),
            Unary(op, t) => match t.kind {
                Lit(_) | Var(_) => write!(f, "{op}{t}"),
                _ => write!(f, "{op}({t})"),
            },
            Binary(op, t1, t2) => {
                fmt_operand(t1, f)?;
                write!(f, " {op} ")?;
                fmt_operand(t2, f)
            }
            If(c, t1, t2) => write!(f, "if {c} then {t1} else {t2}"),
            Abs(x, t) => write!(f, "fn {x} -> {t}"),
            App(t1, t2) => match (&t1.kind, &t2.kind) {
                (Lit(_) | Var(_) | App(..), Lit(_) | Var(_)) => write!(f, "{t1} {t2}"),
                (Lit(_) | Var(_) | App(..), _) => write!(f, "{t1} ({t2})"),
                (_, Lit(_) | Var(_)) => write!(f, "({t1}) {t2}"),
                _ => write!(f, "({t1}) ({t2})"),
            },
            Rec(x, t) => write!(f, "rec {x} -> {t}"),
            Let(b, t) => write!(f, "let {} = {} in {t}", b.name, b.value),
        }
    }
}

fn fmt_operand<A>(t: &Term<A>, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match t.kind {
        TermKind::Lit(_) | TermKind::Var(_) | TermKind::Unary(..) | TermKind::App(..) => t.fmt(f),
        _ => write!(f, "({t})"),
    }
}

impl Term {
    pub fn new(kind: TermKind) -> Self {
        Self { kind, info: () }
    }

    pub fn lit(lit: Literal) -> Self {
        Self::new(TermKind::Lit(lit))
    }

    pub fn int(n: i64) -> Self {
        Self::lit(Literal::Int(n))
    }

    pub fn real(x: f64) -> Self {
        Self::lit(Literal::Real(x))
    }

    pub fn bool(b: bool) -> Self {
        Self::lit(Literal::Bool(b))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(TermKind::Var(name.into()))
    }

    pub fn unary(op: UnaryOp, t: Self) -> Self {
        Self::new(TermKind::Unary(op, Box::new(t)))
    }

    pub fn binary(op: BinaryOp, t1: Self, t2: Self) -> Self {
        Self::new(TermKind::Binary(op, Box::new(t1), Box::new(t2)))
    }

    pub fn cond(c: Self, t1: Self, t2: Self) -> Self {
        Self::new(TermKind::If(Box::new(c), Box::new(t1), Box::new(t2)))
    }

    pub fn abs(x: impl Into<String>, t: Self) -> Self {
        Self::new(TermKind::Abs(x.into(), Box::new(t)))
    }

    pub fn app(t1: Self, t2: Self) -> Self {
        Self::new(TermKind::App(Box::new(t1), Box::new(t2)))
    }

    pub fn rec(f: impl Into<String>, t: Self) -> Self {
        Self::new(TermKind::Rec(f.into(), Box::new(t)))
    }

    pub fn let_in(x: impl Into<String>, t1: Self, t2: Self) -> Self {
        let binding = Binding {
            name: x.into(),
            value: Box::new(t1),
        };
        Self::new(TermKind::Let(binding, Box::new(t2)))
    }
}

impl<A> Term<A> {
    pub fn traverse_mut(&mut self, f: &mut impl FnMut(&mut Self)) {
        use TermKind::*;
        f(self);
        match &mut self.kind {
            Lit(_) | Var(_) => {}
            Unary(_, t) | Abs(_, t) | Rec(_, t) => t.traverse_mut(f),
            Binary(_, t1, t2) | App(t1, t2) => {
                t1.traverse_mut(f);
                t2.traverse_mut(f);
            }
            If(c, t1, t2) => {
                c.traverse_mut(f);
                t1.traverse_mut(f);
                t2.traverse_mut(f);
            }
            Let(b, t) => {
                b.value.traverse_mut(f);
                t.traverse_mut(f);
            }
        }
    }

    /// Every name occurring in the tree, bound or free, binders included.
    pub fn names(&self) -> HashSet<&String> {
        use TermKind::*;
        match &self.kind {
            Lit(_) => HashSet::new(),
            Var(x) => [x].into(),
            Unary(_, t) => t.names(),
            Binary(_, t1, t2) | App(t1, t2) => &t1.names() | &t2.names(),
            If(c, t1, t2) => &(&c.names() | &t1.names()) | &t2.names(),
            Abs(x, t) | Rec(x, t) => t.names().into_iter().chain([x]).collect(),
            Let(b, t) => (b.value.names().into_iter())
                .chain(t.names())
                .chain([&b.name])
                .collect(),
        }
    }

    pub fn is_free(&self, name: &str) -> bool {
        self.free_vars().iter().any(|x| x.as_str() == name)
    }
}

impl<A: Clone> Term<A> {
    fn map_children(&self, mut f: impl FnMut(&Self) -> Self) -> TermKind<A> {
        use TermKind::*;
        let mut g = |t: &Self| Box::new(f(t));
        match &self.kind {
            Lit(lit) => Lit(*lit),
            Var(x) => Var(x.clone()),
            Unary(op, t) => Unary(*op, g(t)),
            Binary(op, t1, t2) => Binary(*op, g(t1), g(t2)),
            If(c, t1, t2) => If(g(c), g(t1), g(t2)),
            Abs(x, t) => Abs(x.clone(), g(t)),
            App(t1, t2) => App(g(t1), g(t2)),
            Rec(x, t) => Rec(x.clone(), g(t)),
            Let(b, t) => {
                let binding = Binding {
                    name: b.name.clone(),
                    value: g(&b.value),
                };
                Let(binding, g(t))
            }
        }
    }

    /// Renames the free occurrences of `from`. `to` must not occur anywhere
    /// in the tree.
    pub fn rename(&self, from: &str, to: &str) -> Self {
        use TermKind::*;
        let kind = match &self.kind {
            Var(x) if x == from => Var(to.to_owned()),
            Abs(x, _) | Rec(x, _) if x == from => self.kind.clone(),
            Let(b, t) if b.name == from => {
                let binding = Binding {
                    name: b.name.clone(),
                    value: Box::new(b.value.rename(from, to)),
                };
                Let(binding, t.clone())
            }
            _ => self.map_children(|t| t.rename(from, to)),
        };
        Self {
            kind,
            info: self.info.clone(),
        }
    }

    /// Replaces every free occurrence of `x` with `replacement`, renaming
    /// binders that would otherwise capture one of its free variables.
    pub fn substitute(&self, x: &str, replacement: &Self) -> Self {
        let free = replacement.free_vars();
        self.substitute_avoiding(x, replacement, &free)
    }

    fn substitute_avoiding(&self, x: &str, replacement: &Self, free: &HashSet<&String>) -> Self {
        use TermKind::*;
        let kind = match &self.kind {
            Var(y) if y == x => return replacement.clone(),
            Abs(y, t) => {
                let (y, t) = Self::substitute_under(y, t, x, replacement, free);
                Abs(y, Box::new(t))
            }
            Rec(y, t) => {
                let (y, t) = Self::substitute_under(y, t, x, replacement, free);
                Rec(y, Box::new(t))
            }
            Let(b, t) => {
                let value = b.value.substitute_avoiding(x, replacement, free);
                let (y, t) = Self::substitute_under(&b.name, t, x, replacement, free);
                let binding = Binding {
                    name: y,
                    value: Box::new(value),
                };
                Let(binding, Box::new(t))
            }
            _ => self.map_children(|t| t.substitute_avoiding(x, replacement, free)),
        };
        Self {
            kind,
            info: self.info.clone(),
        }
    }

    fn substitute_under(
        binder: &String,
        body: &Self,
        x: &str,
        replacement: &Self,
        free: &HashSet<&String>,
    ) -> (String, Self) {
        if binder == x || !body.is_free(x) {
            return (binder.clone(), body.clone());
        }
        if !free.contains(binder) {
            return (binder.clone(), body.substitute_avoiding(x, replacement, free));
        }
        let taken = &(&body.names() | free) | &replacement.names();
        let fresh = fresh_name(binder, &taken);
        log::trace!("renaming binder {binder} to {fresh} to substitute for {x}");
        let body = body.rename(binder, &fresh);
        (fresh, body.substitute_avoiding(x, replacement, free))
    }
}

fn fresh_name(base: &str, taken: &HashSet<&String>) -> String {
    let mut name = format!("{base}'");
    while taken.iter().any(|x| **x == name) {
        name.push('\'');
    }
    name
}
