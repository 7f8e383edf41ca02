use jam::model::typing::MonoType;
use jam::parser::MAX_DEPTH;
use jam::program::Value;
use jam::type_inference::TypeError;
use jam::{run, Program, ProgramError};
use std::time::{Duration, Instant};

#[test]
fn entries_are_independent() {
    let results = run("1 + true; 2");
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Err(ProgramError::Type(_))));
    assert_eq!(results[1].as_ref().unwrap().value, Value::from(2_i64));
}

#[test]
fn unknown_variable_fails_before_evaluation() {
    let results = run("y + 1");
    let Err(ProgramError::Type(e)) = &results[0] else {
        panic!("expected a type error");
    };
    assert_eq!(e, &TypeError::UnknownVariable("y".to_owned()));
}

#[test]
fn ill_typed_entries_are_not_evaluated() {
    // Would divide by zero if it were evaluated.
    let results = run("if 1 / 0 == 0 then 1 else true");
    assert!(matches!(results[0], Err(ProgramError::Type(_))));
}

#[test]
fn outcome_carries_every_phase() {
    let results = Program::new("let x = 3 in x + x").run();
    let outcome = results[0].as_ref().unwrap();
    assert_eq!(outcome.term.to_string(), "let x = 3 in x + x");
    assert_eq!(outcome.ty(), &MonoType::INT);
    assert_eq!(outcome.value, Value::from(6_i64));
}

#[test]
fn results_follow_entry_order() {
    let rendered = (run("fn x -> x; 2.0 / 4.0; 3 < 4; 1 / 0").iter())
        .map(|r| match r {
            Ok(o) => format!("{} : {}", o.value, o.ty()),
            Err(e) => format!("error: {e}"),
        })
        .collect::<Vec<_>>();
    assert_eq!(rendered[0], "<function> : τ0 → τ0");
    assert_eq!(rendered[1], "0.5 : Real");
    assert_eq!(rendered[2], "true : Bool");
    assert_eq!(rendered[3], "error: evaluation error: error in operator '/'");
}

#[test]
fn long_sums_are_rejected_instead_of_overflowing() {
    let results = run(&vec!["1"; 20_000].join(" + "));
    let Err(ProgramError::Parse(e)) = &results[0] else {
        panic!("expected a syntax error");
    };
    assert_eq!(e.message, "expression nested too deeply");
}

#[test]
fn deeply_bracketed_entries_are_rejected() {
    let source = format!("{}1{}; 2", "(".repeat(5_000), ")".repeat(5_000));
    let results = run(&source);
    assert!(matches!(results[0], Err(ProgramError::Parse(_))));
    assert_eq!(results[1].as_ref().unwrap().value, Value::from(2_i64));
}

#[test]
fn sums_within_the_depth_limit_evaluate() {
    let source = vec!["1"; MAX_DEPTH].join(" + ");
    assert_eq!(run(&source)[0].as_ref().unwrap().value, Value::from(MAX_DEPTH as i64));
}

#[test]
fn wide_programs_are_checked_in_reasonable_time() {
    // 60 groups of 60 operands: several thousand nodes, but shallow.
    let group = format!("({})", vec!["x"; 60].join(" + "));
    let source = format!("(fn x -> {}) 1", vec![group; 60].join(" + "));
    let start = Instant::now();
    let results = run(&source);
    let outcome = results[0].as_ref().unwrap();
    assert_eq!(outcome.ty(), &MonoType::INT);
    assert_eq!(outcome.value, Value::from(3_600_i64));
    assert!(start.elapsed() < Duration::from_secs(5), "took {:?}", start.elapsed());
}
