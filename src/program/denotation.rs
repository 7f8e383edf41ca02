use super::Value;
use crate::model::operator::{BinaryOp, UnaryOp};
use crate::model::term::Literal;
use anyhow::{anyhow, bail};

pub fn apply_unary(op: UnaryOp, v: Value) -> anyhow::Result<Value> {
    match (op, v) {
        (UnaryOp::Neg, Value::Lit(Literal::Int(n))) => Ok(n.checked_neg().ok_or_else(overflow)?.into()),
        (UnaryOp::Neg, Value::Lit(Literal::Real(x))) => Ok((-x).into()),
        (UnaryOp::Not, v) => Ok((!bool::try_from(v)?).into()),
        (op, v) => bail!("cannot apply '{op}' to {v}"),
    }
}

/// Both operands have already been evaluated, so `&&` and `||` never
/// short-circuit.
pub fn apply_binary(op: BinaryOp, v1: Value, v2: Value) -> anyhow::Result<Value> {
    use BinaryOp::*;
    match (op, v1, v2) {
        (And, v1, v2) => Ok((bool::try_from(v1)? && bool::try_from(v2)?).into()),
        (Or, v1, v2) => Ok((bool::try_from(v1)? || bool::try_from(v2)?).into()),
        (Eq, Value::Lit(l1), Value::Lit(l2)) => Ok((l1 == l2).into()),
        (Ne, Value::Lit(l1), Value::Lit(l2)) => Ok((l1 != l2).into()),
        (op, v1 @ Value::Lit(Literal::Int(_)), v2) => int_op(op, v1.try_into()?, v2.try_into()?),
        (op, v1 @ Value::Lit(Literal::Real(_)), v2) => real_op(op, v1.try_into()?, v2.try_into()?),
        (op, v1, v2) => bail!("cannot apply '{op}' to {v1} and {v2}"),
    }
}

fn int_op(op: BinaryOp, x: i64, y: i64) -> anyhow::Result<Value> {
    use BinaryOp::*;
    let n = match op {
        Add => x.checked_add(y),
        Sub => x.checked_sub(y),
        Mul => x.checked_mul(y),
        Div | Rem if y == 0 => bail!("division by zero"),
        Div => x.checked_div(y),
        Rem => x.checked_rem(y),
        Lt => return Ok((x < y).into()),
        Le => return Ok((x <= y).into()),
        Gt => return Ok((x > y).into()),
        Ge => return Ok((x >= y).into()),
        op => bail!("cannot apply '{op}' to integers"),
    };
    Ok(n.ok_or_else(overflow)?.into())
}

fn real_op(op: BinaryOp, x: f64, y: f64) -> anyhow::Result<Value> {
    use BinaryOp::*;
    Ok(match op {
        Add => (x + y).into(),
        Sub => (x - y).into(),
        Mul => (x * y).into(),
        Div => (x / y).into(),
        Rem => (x % y).into(),
        Lt => (x < y).into(),
        Le => (x <= y).into(),
        Gt => (x > y).into(),
        Ge => (x >= y).into(),
        op => bail!("cannot apply '{op}' to reals"),
    })
}

fn overflow() -> anyhow::Error {
    anyhow!("integer overflow")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_division_by_zero_fails() {
        let e = apply_binary(BinaryOp::Div, Value::from(1_i64), Value::from(0_i64)).unwrap_err();
        assert_eq!(e.to_string(), "division by zero");
    }

    #[test]
    fn integer_overflow_fails() {
        let e = apply_binary(BinaryOp::Add, Value::from(i64::MAX), Value::from(1_i64)).unwrap_err();
        assert_eq!(e.to_string(), "integer overflow");
        assert!(apply_unary(UnaryOp::Neg, Value::from(i64::MIN)).is_err());
    }

    #[test]
    fn real_division_follows_ieee() {
        let v = apply_binary(BinaryOp::Div, Value::from(1.0_f64), Value::from(0.0_f64)).unwrap();
        assert_eq!(v, Value::from(f64::INFINITY));
    }

    #[test]
    fn integer_division_truncates() {
        assert_eq!(apply_binary(BinaryOp::Div, Value::from(-7_i64), Value::from(2_i64)).unwrap(), Value::from(-3_i64));
        assert_eq!(apply_binary(BinaryOp::Rem, Value::from(-7_i64), Value::from(2_i64)).unwrap(), Value::from(-1_i64));
    }

    #[test]
    fn arithmetic_operands_must_share_a_type() {
        let e = apply_binary(BinaryOp::Add, Value::from(1_i64), Value::from(2.0_f64)).unwrap_err();
        assert_eq!(e.to_string(), "failed to convert value 2.0 to type Int");
        let e = apply_binary(BinaryOp::Lt, Value::from(1.5_f64), Value::from(true)).unwrap_err();
        assert_eq!(e.to_string(), "failed to convert value true to type Real");
    }

    #[test]
    fn equality_compares_literals() {
        assert_eq!(apply_binary(BinaryOp::Eq, Value::from(true), Value::from(true)).unwrap(), Value::from(true));
        assert_eq!(apply_binary(BinaryOp::Ne, Value::from(2.5_f64), Value::from(2.5_f64)).unwrap(), Value::from(false));
    }
}
