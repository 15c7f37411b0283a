use kinako::repl::Repl;
use kinako::{run, Error, Evaluator, Value};

fn get_result(src: &str) -> Value {
    run(&mut Evaluator::new(), src)
        .unwrap_or_else(|e| panic!("Failed to run {src:?}: {e}"))
        .unwrap_or_else(|| panic!("No value for {src:?}"))
}

fn assert_value(src: &str, expected: Value) {
    assert_eq!(get_result(src), expected, "while evaluating {src:?}");
}

#[test]
fn division_truncates() {
    for (a, b) in [(7, 2), (-7, 2), (7, -2), (-7, -2), (0, 5), (1, 3), (100, 7)] {
        assert_value(&format!("{a} / {b};"), Value::Integer(a / b));
    }
}

#[test]
fn division_by_zero_is_an_error_value() {
    for a in [0, 1, -1, 42] {
        assert_value(&format!("{a} / 0;"), Value::Error("divided by zero".into()));
    }
}

#[test]
fn precedence_and_grouping() {
    assert_value("7 + 8 - 9 * 10 / 11;", Value::Integer(15));
    assert_value("(12 + 13) / 14;", Value::Integer(1));
    assert_value("1 + 2 * 3;", Value::Integer(7));
    assert_value("(1 + 2) * 3;", Value::Integer(9));
}

#[test]
fn declarations() {
    assert_value("var x int;", Value::Integer(0));
    assert_value("var x int = 16; x;", Value::Integer(16));
}

#[test]
fn missing_semicolon_is_reported_last() {
    assert_value("0; 0", Value::Error("failed to find semicolon".into()));
}

#[test]
fn undefined_variable() {
    assert_value("y;", Value::Error("undefined variable: y".into()));
}

#[test]
fn reading_a_binding_does_not_change_it() {
    let mut evaluator = Evaluator::new();
    run(&mut evaluator, "var x int = 21;").expect("parse aborted");
    let first = run(&mut evaluator, "x;").expect("parse aborted");
    let second = run(&mut evaluator, "x;").expect("parse aborted");
    assert_eq!(first, Some(Value::Integer(21)));
    assert_eq!(first, second);
}

#[test]
fn fatal_error_only_aborts_current_run() {
    let mut evaluator = Evaluator::new();
    run(&mut evaluator, "var x int = 3;").expect("parse aborted");
    assert!(matches!(
        run(&mut evaluator, "x; 123456789012345678901234567890;"),
        Err(Error::IntegerLiteral { .. })
    ));
    assert_eq!(run(&mut evaluator, "x;").ok().flatten(), Some(Value::Integer(3)));
}

#[test]
fn repl_session() {
    let mut repl = Repl::default();
    let mut out = Vec::new();
    for line in ["var a int = 6;", "var b int = a * 7;", "", "b / 0;", "b;"] {
        repl.print_result(line, &mut out).expect("write failed");
    }
    assert_eq!(
        String::from_utf8(out).expect("utf-8 output"),
        "6\n42\ndivided by zero\n42\n"
    );
}

#[test]
fn deeply_nested_line_does_not_end_the_session() {
    let mut evaluator = Evaluator::new();
    let deep = format!("{}1{};", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(
        run(&mut evaluator, &deep).expect("parse aborted"),
        Some(Value::Error("expression nested too deeply".into()))
    );
    assert_eq!(run(&mut evaluator, "(((2)));").expect("parse aborted"), Some(Value::Integer(2)));
}
