use jam::interpreter::{eval, EvalError};
use jam::lexer::lex;
use jam::model::term::Term;
use jam::parser::parse;
use jam::program::Value;

fn eval_str(source: &str) -> Result<Value, EvalError> {
    eval(&parse(source, lex(source).unwrap()).unwrap())
}

#[test]
fn untaken_branch_is_never_evaluated() {
    assert_eq!(eval_str("if true then 1 else (1/0)").unwrap(), Value::from(1_i64));
}

#[test]
fn let_binding() {
    assert_eq!(eval_str("let x = 3 in x + x").unwrap(), Value::from(6_i64));
}

#[test]
fn factorial() {
    let source = "(rec f -> fn n -> if n == 0 then 1 else n * (f (n - 1))) 5";
    assert_eq!(eval_str(source).unwrap(), Value::from(120_i64));
}

#[test]
fn deep_recursion_does_not_exhaust_the_stack() {
    let source = "(rec sum -> fn n -> if n == 0 then 0 else n + sum (n - 1)) 20000";
    assert_eq!(eval_str(source).unwrap(), Value::from(200010000_i64));
}

#[test]
fn inner_bindings_shadow_outer_ones() {
    assert_eq!(eval_str("let x = 1 in let x = x + 1 in x * 10").unwrap(), Value::from(20_i64));
}

#[test]
fn static_scoping() {
    let source = "let y = 1 in let f = fn x -> x + y in let y = 100 in f 0";
    assert_eq!(eval_str(source).unwrap(), Value::from(1_i64));
}

#[test]
fn recursion_with_free_variables() {
    let source = "let k = 3 in (rec f -> fn n -> if n <= 0 then k else f (n - 1)) 4";
    assert_eq!(eval_str(source).unwrap(), Value::from(3_i64));
}

#[test]
fn real_arithmetic() {
    assert_eq!(eval_str("1.5 * 2.0 - 0.5").unwrap(), Value::from(2.5_f64));
    assert_eq!(eval_str("-2.0").unwrap().to_string(), "-2.0");
}

#[test]
fn logical_and_comparison_operators() {
    assert_eq!(eval_str("!(1 < 2) || 3 >= 3 && 4 != 5").unwrap(), Value::from(true));
    assert_eq!(eval_str("7 % 3 == 1").unwrap(), Value::from(true));
}

#[test]
fn both_logical_operands_are_evaluated() {
    let e = eval_str("false && 1 / 0 == 0").unwrap_err();
    assert!(matches!(e, EvalError::Operator(..)), "{e}");
}

#[test]
fn functions_render_opaquely() {
    assert_eq!(eval_str("fn x -> x").unwrap().to_string(), "<function>");
}

#[test]
fn division_by_zero() {
    let e = eval_str("10 / (5 - 5)").unwrap_err();
    let EvalError::Operator(op, cause) = e else {
        panic!("expected an operator error");
    };
    assert_eq!(op, "/");
    assert_eq!(cause.to_string(), "division by zero");
}

#[test]
fn evaluation_is_deterministic() {
    let term = Term::app(Term::abs("x", Term::var("x")), Term::int(7));
    assert_eq!(eval(&term).unwrap(), eval(&term).unwrap());
}
