use jam::lexer::lex;
use jam::model::term::{Term, TermKind};
use jam::model::typing::{MonoType, Variable};
use jam::parser::parse;
use jam::type_inference::{infer_type, infer_type_in, Context, TypeError};

fn type_of(source: &str) -> Result<MonoType, TypeError> {
    let term = parse(source, lex(source).unwrap()).unwrap();
    infer_type(&term).map(|t| t.ty().clone())
}

fn var(n: usize) -> MonoType {
    MonoType::Var(Variable(n))
}

#[test]
fn identity_maps_a_variable_to_itself() {
    assert_eq!(type_of("fn x -> x").unwrap(), MonoType::function(var(0), var(0)));
}

#[test]
fn let_binding_is_int() {
    assert_eq!(type_of("let x = 3 in x + x").unwrap(), MonoType::INT);
}

#[test]
fn factorial_is_int() {
    let source = "(rec f -> fn n -> if n == 0 then 1 else n * (f (n - 1))) 5";
    assert_eq!(type_of(source).unwrap(), MonoType::INT);
}

#[test]
fn recursive_function_type() {
    let source = "rec f -> fn n -> if n == 0 then 1 else n * (f (n - 1))";
    assert_eq!(type_of(source).unwrap(), MonoType::function(MonoType::INT, MonoType::INT));
}

#[test]
fn arithmetic_on_reals() {
    assert_eq!(type_of("fn x -> x * 2.0").unwrap(), MonoType::function(MonoType::REAL, MonoType::REAL));
}

#[test]
fn unconstrained_arithmetic_defaults_to_int() {
    assert_eq!(type_of("fn x -> x + x").unwrap(), MonoType::function(MonoType::INT, MonoType::INT));
}

#[test]
fn comparisons_are_bool() {
    assert_eq!(type_of("1.5 < 2.5").unwrap(), MonoType::BOOL);
    assert_eq!(type_of("true == false").unwrap(), MonoType::BOOL);
    assert_eq!(type_of("!(1 != 2) || false").unwrap(), MonoType::BOOL);
}

#[test]
fn higher_order_functions() {
    assert_eq!(
        type_of("fn f -> fn x -> f (f x)").unwrap(),
        MonoType::function(
            MonoType::function(var(1), var(1)),
            MonoType::function(var(1), var(1))
        )
    );
}

#[test]
fn unknown_variable_is_a_type_error() {
    let e = type_of("y + 1").unwrap_err();
    assert_eq!(e, TypeError::UnknownVariable("y".to_owned()));
}

#[test]
fn mixing_int_and_real_is_rejected() {
    let e = type_of("1 + 2.0").unwrap_err();
    assert!(matches!(e.cause(), TypeError::UnificationConflict(..)), "{e}");
}

#[test]
fn adding_booleans_is_rejected() {
    let e = type_of("true + false").unwrap_err();
    assert_eq!(e.cause(), &TypeError::NotNumeric(MonoType::BOOL));
}

#[test]
fn conditions_must_be_bool() {
    let e = type_of("if 1 then 2 else 3").unwrap_err();
    assert_eq!(e.to_string(), "expected type Bool, found Int in 'if 1 then 2 else 3'");
}

#[test]
fn branches_must_agree() {
    assert!(type_of("if true then 1 else false").is_err());
}

#[test]
fn functions_are_not_comparable() {
    let e = type_of("(fn x -> x) == (fn y -> y)").unwrap_err();
    assert!(matches!(e.cause(), TypeError::NotComparable(_)), "{e}");
}

#[test]
fn self_application_is_an_infinite_type() {
    let e = type_of("fn x -> x x").unwrap_err();
    assert!(matches!(e.cause(), TypeError::InfiniteType(..)), "{e}");
}

#[test]
fn let_bound_functions_are_monomorphic() {
    assert!(type_of("let id = fn x -> x in if id true then id 1 else 2").is_err());
}

#[test]
fn every_node_is_annotated() {
    let source = "let x = 3 in x + x";
    let term = parse(source, lex(source).unwrap()).unwrap();
    let typed = infer_type(&term).unwrap();
    let TermKind::Let(b, body) = &typed.kind else {
        panic!("expected a let, found {typed}");
    };
    assert_eq!(b.value.info, MonoType::INT);
    assert_eq!(body.info, MonoType::INT);
}

#[test]
fn inference_in_a_context() {
    let context = Context::new().augment("b", MonoType::BOOL);
    let term = Term::cond(Term::var("b"), Term::real(1.0), Term::real(2.0));
    assert_eq!(infer_type_in(&context, &term).unwrap().info, MonoType::REAL);
}

#[test]
fn inference_is_deterministic() {
    let source = "fn f -> fn g -> fn x -> g (f x)";
    assert_eq!(type_of(source).unwrap(), type_of(source).unwrap());
}
