use super::{ConstraintSet, Context, Result, TypeError};
use crate::model::operator::{OperatorClass, UnaryOp};
use crate::model::term::{Binding, Literal, Term, TermKind};
use crate::model::typing::MonoType;

/// Annotates each node of `term` with a type built from its children's
/// types, returning the constraints that must hold for the annotations to be
/// consistent and the next unused type variable. Each constraint borrows the
/// node that raised it.
///
/// Bindings introduced by functions, recursions and lets extend a copy of
/// `context` for the scope they cover.
pub fn infer<'t>(context: &Context, term: &'t Term, n: usize) -> Result<(Term<MonoType>, ConstraintSet<'t>, usize)> {
    let mut own = ConstraintSet::new();
    match &term.kind {
        TermKind::Lit(lit) => {
            let m = match lit {
                Literal::Int(_) => MonoType::INT,
                Literal::Real(_) => MonoType::REAL,
                Literal::Bool(_) => MonoType::BOOL,
            };
            Ok((typed(TermKind::Lit(*lit), m), own, n))
        }
        TermKind::Var(x) => match context.get(x) {
            Some(m) => Ok((typed(TermKind::Var(x.clone()), m.clone()), own, n)),
            None => Err(TypeError::UnknownVariable(x.clone())),
        },
        TermKind::Unary(op, t) => {
            let (t, c, n) = infer(context, t, n)?;
            let m = match op {
                UnaryOp::Neg => {
                    own.numeric(t.info.clone(), term);
                    t.info.clone()
                }
                UnaryOp::Not => {
                    own.equal(MonoType::BOOL, t.info.clone(), term);
                    MonoType::BOOL
                }
            };
            Ok((typed(TermKind::Unary(*op, Box::new(t)), m), c.union(own), n))
        }
        TermKind::Binary(op, t1, t2) => {
            let (t1, c1, n) = infer(context, t1, n)?;
            let (t2, c2, n) = infer(context, t2, n)?;
            let (m1, m2) = (t1.info.clone(), t2.info.clone());
            let m = match op.class() {
                OperatorClass::Arithmetic => {
                    own.equal(m1.clone(), m2, term);
                    own.numeric(m1.clone(), term);
                    m1
                }
                OperatorClass::Ordering => {
                    own.equal(m1.clone(), m2, term);
                    own.numeric(m1, term);
                    MonoType::BOOL
                }
                OperatorClass::Equality => {
                    own.equal(m1.clone(), m2, term);
                    own.equatable(m1, term);
                    MonoType::BOOL
                }
                OperatorClass::Logical => {
                    own.equal(MonoType::BOOL, m1, term);
                    own.equal(MonoType::BOOL, m2, term);
                    MonoType::BOOL
                }
            };
            let t = typed(TermKind::Binary(*op, Box::new(t1), Box::new(t2)), m);
            Ok((t, c1.union(c2).union(own), n))
        }
        TermKind::If(c, t1, t2) => {
            let (c, c0, n) = infer(context, c, n)?;
            let (t1, c1, n) = infer(context, t1, n)?;
            let (t2, c2, n) = infer(context, t2, n)?;
            own.equal(MonoType::BOOL, c.info.clone(), term);
            own.equal(t1.info.clone(), t2.info.clone(), term);
            let m = t1.info.clone();
            let t = typed(TermKind::If(Box::new(c), Box::new(t1), Box::new(t2)), m);
            Ok((t, c0.union(c1).union(c2).union(own), n))
        }
        TermKind::Abs(x, t) => {
            let beta = MonoType::Var(n.into());
            let context = context.clone().augment(x.clone(), beta.clone());
            let (t, c, n) = infer(&context, t, n + 1)?;
            let m = MonoType::function(beta, t.info.clone());
            Ok((typed(TermKind::Abs(x.clone(), Box::new(t)), m), c, n))
        }
        TermKind::App(t1, t2) => {
            let (t1, c1, n) = infer(context, t1, n)?;
            let (t2, c2, n) = infer(context, t2, n)?;
            let beta = MonoType::Var(n.into());
            own.equal(MonoType::function(t2.info.clone(), beta.clone()), t1.info.clone(), term);
            let t = typed(TermKind::App(Box::new(t1), Box::new(t2)), beta);
            Ok((t, c1.union(c2).union(own), n + 1))
        }
        TermKind::Rec(f, t) => {
            let beta = MonoType::Var(n.into());
            let context = context.clone().augment(f.clone(), beta.clone());
            let (t, c, n) = infer(&context, t, n + 1)?;
            own.equal(beta.clone(), t.info.clone(), term);
            Ok((typed(TermKind::Rec(f.clone(), Box::new(t)), beta), c.union(own), n))
        }
        TermKind::Let(b, t) => {
            let (value, c1, n) = infer(context, &b.value, n)?;
            let context = context.clone().augment(b.name.clone(), value.info.clone());
            let (t, c2, n) = infer(&context, t, n)?;
            let m = t.info.clone();
            let binding = Binding {
                name: b.name.clone(),
                value: Box::new(value),
            };
            Ok((typed(TermKind::Let(binding, Box::new(t)), m), c1.union(c2), n))
        }
    }
}

fn typed(kind: TermKind<MonoType>, m: MonoType) -> Term<MonoType> {
    Term { kind, info: m }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::operator::BinaryOp;
    use crate::type_inference::Obligation;

    #[test]
    fn literals_need_no_constraints() {
        let term = Term::real(1.5);
        let (t, c, n) = infer(&Context::new(), &term, 0).unwrap();
        assert_eq!(t.info, MonoType::REAL);
        assert!(c.is_empty());
        assert_eq!(n, 0);
    }

    #[test]
    fn function_parameter_gets_a_fresh_variable() {
        let term = Term::abs("x", Term::var("x"));
        let (t, _, n) = infer(&Context::new(), &term, 4).unwrap();
        assert_eq!(t.info, MonoType::function(MonoType::Var(4.into()), MonoType::Var(4.into())));
        assert_eq!(n, 5);
    }

    #[test]
    fn conditional_constrains_condition_and_branches() {
        let context = Context::new()
            .augment("c", MonoType::Var(0.into()))
            .augment("a", MonoType::Var(1.into()));
        let term = Term::cond(Term::var("c"), Term::var("a"), Term::int(2));
        let (_, c, _) = infer(&context, &term, 2).unwrap();
        assert!(c.contains(&Obligation::Equal(MonoType::BOOL, MonoType::Var(0.into()))));
        assert!(c.contains(&Obligation::Equal(MonoType::Var(1.into()), MonoType::INT)));
    }

    #[test]
    fn unknown_variables_fail_immediately() {
        let term = Term::binary(BinaryOp::Add, Term::var("y"), Term::int(1));
        let e = infer(&Context::new(), &term, 0).unwrap_err();
        assert_eq!(e, TypeError::UnknownVariable("y".to_owned()));
    }

    #[test]
    fn inner_bindings_shadow_outer_ones() {
        let context = Context::new().augment("x", MonoType::BOOL);
        let term = Term::let_in("x", Term::int(1), Term::var("x"));
        let (t, _, _) = infer(&context, &term, 0).unwrap();
        assert_eq!(t.info, MonoType::INT);
    }
}
