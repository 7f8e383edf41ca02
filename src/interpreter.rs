use crate::model::operator::{BinaryOp, UnaryOp};
use crate::model::term::{Literal, Term, TermKind};
use crate::model::Environment;
use crate::program::{denotation, Value};
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone)]
pub enum Control {
    Val(Value),
    Expr(Term),
}

#[derive(Debug, Clone)]
pub enum Frame {
    HApp(Term, Environment<Value>),
    AppH(Value),
    UnaryH(UnaryOp),
    HBinary(BinaryOp, Term, Environment<Value>),
    BinaryH(BinaryOp, Value),
    IfH(Term, Term, Environment<Value>),
}

type Continuation = Vec<Frame>;

type State = (Control, Environment<Value>, Continuation);

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("variable '{0}' is not defined")]
    UnknownVariable(String),
    #[error("invalid state: control = {0}; environment = {1}; next frame = {2}")]
    InvalidState(Control, Environment<Value>, Frame),
    #[error("error in operator '{0}'")]
    Operator(String, #[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EvalError>;

impl Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Val(v) => v.fmt(f),
            Self::Expr(e) => e.fmt(f),
        }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HApp(e, env) => write!(f, "HApp ({e}) {env}"),
            Self::AppH(v) => write!(f, "AppH ({v})"),
            Self::UnaryH(op) => write!(f, "{op}H"),
            Self::HBinary(op, e, env) => write!(f, "H{op} ({e}) {env}"),
            Self::BinaryH(op, v) => write!(f, "({v}) {op}H"),
            Self::IfH(e1, e2, env) => write!(f, "IfH ({e1}) ({e2}) {env}"),
        }
    }
}

/// Evaluates a closed term call-by-value, left to right.
///
/// The continuation is an explicit stack, so deeply recursive programs
/// grow the heap rather than the native stack.
pub fn eval(term: &Term) -> Result<Value> {
    let mut s = (Control::Expr(term.clone()), Environment::new(), Vec::new());
    let mut steps = 0usize;
    loop {
        steps += 1;
        s = match eval1(s)? {
            (Control::Val(v), _, k) if k.is_empty() => {
                log::trace!("evaluated '{term}' to {v} in {steps} steps");
                break Ok(v);
            }
            s => s,
        }
    }
}

fn eval1((c, mut env, mut k): State) -> Result<State> {
    use Control::{Expr, Val};
    let term = match c {
        Val(v) => return continue_with(v, env, k),
        Expr(term) => term,
    };
    match term.kind {
        TermKind::Lit(lit) => Ok((Val(Value::Lit(lit)), env, k)),
        TermKind::Var(x) => (env.remove(&x).map(Val))
            .ok_or(EvalError::UnknownVariable(x))
            .map(|c| (c, env, k)),
        TermKind::Unary(op, t) => {
            k.push(Frame::UnaryH(op));
            Ok((Expr(*t), env, k))
        }
        TermKind::Binary(op, t1, t2) => {
            k.push(Frame::HBinary(op, *t2, env.clone()));
            Ok((Expr(*t1), env, k))
        }
        TermKind::If(c, t1, t2) => {
            k.push(Frame::IfH(*t1, *t2, env.clone()));
            Ok((Expr(*c), env, k))
        }
        TermKind::Abs(x, t) => Ok((Val(Value::Closure(x, *t, env)), Environment::new(), k)),
        TermKind::App(t1, t2) => {
            k.push(Frame::HApp(*t2, env.clone()));
            Ok((Expr(*t1), env, k))
        }
        TermKind::Rec(f, t) => {
            let unfolded = t.substitute(&f, &Term::rec(f.clone(), (*t).clone()));
            log::trace!("unfolding 'rec {f}'");
            Ok((Expr(unfolded), env, k))
        }
        TermKind::Let(b, t) => Ok((Expr(Term::app(Term::abs(b.name, *t), *b.value)), env, k)),
    }
}

fn continue_with(v: Value, env: Environment<Value>, mut k: Continuation) -> Result<State> {
    use Control::{Expr, Val};
    match k.pop() {
        Some(Frame::HApp(e, env)) => {
            k.push(Frame::AppH(v));
            Ok((Expr(e), env, k))
        }
        Some(Frame::AppH(Value::Closure(x, e, mut env))) => {
            env += (x, v);
            Ok((Expr(e), env, k))
        }
        Some(Frame::UnaryH(op)) => {
            let v = denotation::apply_unary(op, v).map_err(|e| EvalError::Operator(op.to_string(), e))?;
            Ok((Val(v), env, k))
        }
        Some(Frame::HBinary(op, e, env)) => {
            k.push(Frame::BinaryH(op, v));
            Ok((Expr(e), env, k))
        }
        Some(Frame::BinaryH(op, v1)) => {
            let v = denotation::apply_binary(op, v1, v).map_err(|e| EvalError::Operator(op.to_string(), e))?;
            Ok((Val(v), env, k))
        }
        Some(Frame::IfH(e1, e2, env)) => match v {
            Value::Lit(Literal::Bool(b)) => Ok((Expr(if b { e1 } else { e2 }), env, k)),
            v => Err(EvalError::InvalidState(Val(v), env.clone(), Frame::IfH(e1, e2, env))),
        },
        Some(f @ Frame::AppH(_)) => Err(EvalError::InvalidState(Val(v), env, f)),
        None => Ok((Val(v), env, k)),
    }
}
