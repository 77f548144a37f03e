use std::fs;

use stackcalc::{
    Session, StatementOutcome, error::ErrorKind, interpreter::environment::Environment,
    run_statement,
};
use walkdir::WalkDir;

/// Every `.calc` file under `tests/scripts` is one session. Each non-blank,
/// non-comment line has the form `<statement> => <expected>`, where
/// `<expected>` is the rendered value, `error: <Kind>`, or nothing for an
/// assignment.
#[test]
fn script_corpus_matches_expectations() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let mut session = Session::new();
        for (i, (statement, expected)) in extract_cases(&content).into_iter().enumerate() {
            count += 1;
            let actual = render(&session.run(&statement));
            assert_eq!(actual,
                       expected,
                       "case {} in {:?} (`{}`) rendered {:?}, expected {:?}",
                       i + 1,
                       path,
                       statement,
                       actual,
                       expected);
        }
    }

    assert!(count > 0, "No cases found in tests/scripts");
}

fn extract_cases(content: &str) -> Vec<(String, String)> {
    content.lines()
           .map(str::trim)
           .filter(|line| !line.is_empty() && !line.starts_with('#'))
           .map(|line| {
               let (statement, expected) =
                   line.split_once("=>")
                       .unwrap_or_else(|| panic!("Malformed case line: {line}"));
               (statement.trim().to_string(), expected.trim().to_string())
           })
           .collect()
}

fn render(outcome: &StatementOutcome) -> String {
    match outcome {
        StatementOutcome::Value(v) | StatementOutcome::Printed(v) => v.to_string(),
        StatementOutcome::Assigned { .. } => String::new(),
        StatementOutcome::Failure(e) => format!("error: {}", e.kind()),
    }
}

fn assert_value(src: &str, expected: f64) {
    match run_statement(src, &mut Environment::new()) {
        StatementOutcome::Value(v) => assert_eq!(v, expected, "`{src}`"),
        other => panic!("`{src}` produced {other:?}, expected value {expected}"),
    }
}

fn assert_failure(src: &str, kind: ErrorKind) {
    let outcome = run_statement(src, &mut Environment::new());
    assert_eq!(outcome.error_kind(), Some(kind), "`{src}` produced {outcome:?}");
}

#[test]
fn precedence() {
    assert_value("2 + 3 * 4", 14.0);
    assert_value("2 ^ 3 ^ 2", 512.0);
    assert_value("-2 ^ 2", -4.0);
    assert_value("(-2) ^ 2", 4.0);
    assert_value("2 * 3 ^ 2", 18.0);
}

#[test]
fn associativity() {
    assert_value("10 - 2 - 3", 5.0);
    assert_value("64 / 4 / 2", 8.0);
    assert_value("2 ^ -1", 0.5);
}

#[test]
fn unary_signs() {
    assert_value("-3 + 4 * 2", 5.0);
    assert_value("--3", 3.0);
    assert_value("+3", 3.0);
    assert_value("2 * -3", -6.0);
}

#[test]
fn true_division() {
    assert_value("7 / 2", 3.5);
    assert_value("1 / 4", 0.25);
}

#[test]
fn literals_are_exact() {
    assert_value("0.1", 0.1);
    assert_value("123456789", 123_456_789.0);
    assert_value("7.", 7.0);
}

#[test]
fn variables_persist_within_a_session() {
    let mut env = Environment::new();
    assert_eq!(run_statement("x = 2 + 3*4", &mut env),
               StatementOutcome::Assigned { name:  "x".into(),
                                            value: 14.0, });
    assert_eq!(run_statement("print x + 1", &mut env), StatementOutcome::Printed(15.0));
    assert_eq!(env.get("x"), Some(14.0));
}

#[test]
fn print_statement() {
    let mut env = Environment::new();
    assert_eq!(run_statement("print( (1+2)^3 - 4/5 )", &mut env),
               StatementOutcome::Printed(26.2));
    assert_eq!(run_statement("print -1", &mut env), StatementOutcome::Printed(-1.0));
}

#[test]
fn division_by_zero_leaves_environment_unchanged() {
    let mut env = Environment::new();
    run_statement("a = 3", &mut env);
    let before = env.clone();

    assert_eq!(run_statement("1/0", &mut env).error_kind(), Some(ErrorKind::DivisionByZero));
    assert_eq!(run_statement("a = a / (a - 3)", &mut env).error_kind(),
               Some(ErrorKind::DivisionByZero));
    assert_eq!(env, before);
}

#[test]
fn undefined_variable() {
    assert_failure("print y", ErrorKind::UndefinedVariable);
    assert_failure("z = y + 1", ErrorKind::UndefinedVariable);
}

#[test]
fn malformed_input() {
    assert_failure("2 +", ErrorKind::Parse);
    assert_failure("(1+2", ErrorKind::Parse);
    assert_failure("1 + 2)", ErrorKind::Parse);
    assert_failure("x = = 1", ErrorKind::Parse);
    assert_failure("print", ErrorKind::Parse);
    assert_failure("", ErrorKind::Parse);
    assert_failure("2 $ 3", ErrorKind::Lex);
    assert_failure("x = 1; y = 2", ErrorKind::Lex);
}

#[test]
fn error_messages_carry_positions() {
    let StatementOutcome::Failure(e) = run_statement("2 $ 3", &mut Environment::new()) else {
        panic!("expected a failure");
    };
    assert_eq!(e.to_string(), "Error at position 2: Unexpected character '$'.");

    let StatementOutcome::Failure(e) = run_statement("(1+2", &mut Environment::new()) else {
        panic!("expected a failure");
    };
    assert_eq!(e.position(), Some(4));
}

#[test]
fn read_only_expressions_are_idempotent() {
    let mut env = Environment::new();
    run_statement("r = 1.5", &mut env);
    let first = run_statement("r ^ 2 - r / 3", &mut env);
    let second = run_statement("r ^ 2 - r / 3", &mut env);
    assert_eq!(first, second);
    assert_eq!(first.value(), Some(1.75));
}

#[test]
fn reserved_commands_are_not_statements() {
    // `env` and `exit` are handled by the driver; in the pipeline they are
    // plain identifiers.
    assert_failure("env", ErrorKind::UndefinedVariable);
    assert_failure("exit", ErrorKind::UndefinedVariable);
}

#[test]
fn deep_nesting_is_a_parse_error_and_the_session_survives() {
    let mut session = Session::new();
    session.run("kept = 3");

    for line in ["(".repeat(100_000),
                 "-".repeat(100_000),
                 format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000)),
                 format!("kept = {}", vec!["1"; 100_000].join(" + "))]
    {
        assert_eq!(session.run(&line).error_kind(), Some(ErrorKind::Parse));
    }

    assert_eq!(session.variables(), vec![("kept", 3.0)]);
    assert_eq!(session.run("((((kept))))^2"), StatementOutcome::Value(9.0));
    assert_eq!(session.run(&format!("{}kept", "-".repeat(200))), StatementOutcome::Value(3.0));
}
