use super::{ConstraintSet, Obligation, Result, TypeError};
use crate::model::typing::MonoType;
use crate::model::{Substitute, Substitution};

pub fn unify(m1: MonoType, m2: MonoType) -> Result<Substitution> {
    match (m1, m2) {
        (m1, m2) if m1 == m2 => Ok(Substitution::new()),
        (MonoType::Var(v), m) => {
            if m.vars().any(|v2| &v == v2) {
                Err(TypeError::InfiniteType(v, m))
            } else {
                Ok([(v, m)].into_iter().collect())
            }
        }
        (MonoType::Arrow(l1, r1), MonoType::Arrow(l2, r2)) => {
            let s1 = unify(*l1, *l2)?;
            let s2 = unify(r1.substitute(&s1), r2.substitute(&s1))?;
            Ok(s1.combine(&s2))
        }
        (m1, m2 @ MonoType::Var(_)) => unify(m2, m1),
        (m1, m2) => Err(TypeError::UnificationConflict(m1, m2)),
    }
}

impl ConstraintSet<'_> {
    /// Finds the most general substitution satisfying every obligation.
    ///
    /// Equalities are unified first. Numeric obligations left on a bare type
    /// variable then default it to `Int`; equality obligations only reject
    /// function types.
    pub fn solve(&self) -> Result<Substitution> {
        let mut s = Substitution::new();
        for c in self.iter() {
            if let Obligation::Equal(m1, m2) = &c.obligation {
                let (m1, m2) = (m1.clone().substitute(&s), m2.clone().substitute(&s));
                log::trace!("unifying {m1} with {m2} from '{}'", c.origin);
                let s2 = unify(m1, m2).map_err(|e| e.within(c.origin.to_string()))?;
                s.combine_mut(&s2);
            }
        }
        for c in self.iter() {
            if let Obligation::Numeric(m) = &c.obligation {
                match m.clone().substitute(&s) {
                    MonoType::Var(v) => {
                        log::trace!("defaulting {v} to Int in '{}'", c.origin);
                        s.combine_mut(&[(v, MonoType::INT)].into_iter().collect());
                    }
                    m if m.is_numeric() => {}
                    m => return Err(TypeError::NotNumeric(m).within(c.origin.to_string())),
                }
            }
        }
        for c in self.iter() {
            if let Obligation::Equatable(m) = &c.obligation {
                if let m @ MonoType::Arrow(..) = m.clone().substitute(&s) {
                    return Err(TypeError::NotComparable(m).within(c.origin.to_string()));
                }
            }
        }
        Ok(s)
    }
}
