use curly::{run_with, Error, Outcome};
use curly_interp::{Interpreter, InterpreterConfig, RuntimeError};
use insta::assert_snapshot;

/// Runs `source` and returns what it printed along with the outcome.
fn interpret(source: &str) -> (String, Result<Outcome, Error>) {
    let mut interp = Interpreter::with_output(Vec::new());
    let result = run_with(source, &mut interp);
    let output = String::from_utf8(interp.into_output()).unwrap();
    (output, result)
}

/// Runs `source`, which must succeed and declare `main`.
fn run_main(source: &str) -> (String, i64) {
    let (output, result) = interpret(source);
    let outcome = result.unwrap();
    (output, outcome.main_result.expect("program has no main"))
}

fn error(source: &str) -> String {
    interpret(source).1.unwrap_err().to_string()
}

#[test]
fn for_loop_prints_counter() {
    let (output, result) = run_main(
        r#"
        function main(): int {
          for (let i: int = 0; i < 3; i++) { print(i); }
          return 0;
        }"#,
    );
    assert_eq!(output, "0\n1\n2\n");
    assert_eq!(result, 0);
}

#[test]
fn call_with_arguments() {
    let (output, result) = run_main(
        r#"
        function add(a: int, b: int): int { return a + b; }
        function main(): int { print(add(2, 3)); return 0; }"#,
    );
    assert_eq!(output, "5\n");
    assert_eq!(result, 0);
}

#[test]
fn while_loop_counts_up() {
    let (output, result) = run_main(
        r#"
        function main(): int {
          let x: int = 0;
          while (x < 5) { x = x + 1; }
          return x;
        }"#,
    );
    assert_eq!(output, "");
    assert_eq!(result, 5);
}

#[test]
fn undefined_variable() {
    let err = error("function main(): int { return y; }");
    assert!(err.contains("Undefined variable: y"), "{}", err);
    assert_eq!(err, "Undefined variable: y at line 1:31");
}

#[test]
fn missing_semicolon() {
    let (_, result) = interpret("function main(): int { return 0 }");
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(
        err.to_string(),
        "Expected ';' after return. Got: RBrace at line 1:33"
    );
}

#[test]
fn subtraction_is_right_associative() {
    let (_, result) = run_main("function main(): int { return 10 - 3 - 2; }");
    assert_eq!(result, 9);
}

#[test]
fn program_without_main() {
    let (output, result) = interpret("let x: int = 2; print(x * 21);");
    assert_eq!(output, "42\n");
    assert_eq!(
        result.unwrap(),
        Outcome {
            main_result: None,
            functions: 0,
            statements: 2,
        }
    );
}

#[test]
fn top_level_statements_run_before_main() {
    let (output, result) = interpret(
        r#"
        let base: int = 100;
        function main(): int { print(base); return base + 1; }
        print(1);"#,
    );
    assert_eq!(output, "1\n100\n");
    assert_eq!(
        result.unwrap(),
        Outcome {
            main_result: Some(101),
            functions: 1,
            statements: 2,
        }
    );
}

#[test]
fn statements_before_syntax_error_still_run() {
    let (output, result) = interpret("print(1); print(2) print(3);");
    assert_eq!(output, "1\n");
    assert_eq!(
        result.unwrap_err().to_string(),
        "Expected ';' after print. Got: Print at line 1:20"
    );
}

#[test]
fn void_function_returns_zero() {
    let (output, result) = run_main(
        r#"
        function greet(n: int) { print(n); }
        function main(): int { return greet(7); }"#,
    );
    assert_eq!(output, "7\n");
    assert_eq!(result, 0);
}

#[test]
fn recursion_and_comments() {
    let (output, result) = run_main(
        r#"
        // naive fibonacci
        function fib(n: int): int {
          while (n < 2) { return n; } // base case
          return fib(n - 1) + fib(n - 2);
        }
        function main(): int {
          for (let i: int = 0; i < 10; i++) print(fib(i));
          return fib(20);
        }"#,
    );
    assert_snapshot!(output.trim_end(), @r"
    0
    1
    1
    2
    3
    5
    8
    13
    21
    34
    ");
    assert_eq!(result, 6765);
}

#[test]
fn return_inside_loop_leaves_function() {
    let (output, result) = run_main(
        r#"
        function main(): int {
          let i: int = 0;
          while (1) {
            i++;
            for (;;) { return i * 3; }
          }
          print(i);
          return 0;
        }"#,
    );
    assert_eq!(output, "");
    assert_eq!(result, 3);
}

#[test]
fn callee_cannot_change_caller_variables() {
    let (output, result) = run_main(
        r#"
        function bump(x: int): int { x = x + 1; total = 99; return x; }
        function main(): int {
          let x: int = 1;
          let total: int = 0;
          let y: int = bump(x);
          print(x);
          print(total);
          return y;
        }"#,
    );
    assert_eq!(output, "1\n0\n");
    assert_eq!(result, 2);
}

#[test]
fn comparisons_and_equality() {
    let (output, _) = run_main(
        r#"
        function main(): int {
          print(1 <= 1); print(2 >= 3); print(4 == 4); print(4 != 4);
          return 0;
        }"#,
    );
    assert_eq!(output, "1\n0\n1\n0\n");
}

#[test]
fn lexer_errors_surface_as_parse_errors() {
    assert_eq!(
        error("let s: int = \"oops;"),
        "Unsupported expression. Got: Unexpected (Unterminated string) at line 1:14"
    );
    assert_eq!(
        error("let x: int = 1 # 2;"),
        "Expected ';' after variable declaration. Got: Unexpected (Unexpected character) at line 1:16"
    );
}

#[test]
fn runtime_errors() {
    let (_, result) = interpret("function main(): int { return 1 / (2 - 2); }");
    assert!(matches!(
        result,
        Err(Error::Runtime(RuntimeError::DivisionByZero { .. }))
    ));
    assert_eq!(
        error("function main(): int { return nope(); }"),
        "Function not found: nope at line 1:35"
    );
    assert_eq!(
        error("function f(a: int): int { return a; } function main(): int { return f(); }"),
        "Function f expects 1 argument(s), got 0 at line 1:70"
    );
    assert_eq!(
        error("function main(): int { let xs: int[] = [1, 2]; return 0; }"),
        "Array literals not implemented at line 1:40"
    );
}

#[test]
fn main_with_parameters_is_an_arity_error() {
    assert_eq!(
        error("function main(argc: int): int { return argc; }"),
        "Function main expects 1 argument(s), got 0"
    );
}

#[test]
fn unbounded_recursion_is_reported() {
    let mut interp = Interpreter::with_output(Vec::new())
        .with_config(InterpreterConfig::default().with_max_call_depth(64));
    let err = run_with(
        "function down(n: int): int { return down(n - 1); } function main(): int { return down(0); }",
        &mut interp,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(RuntimeError::StackOverflow { limit: 64, .. })
    ));
    assert!(err
        .to_string()
        .starts_with("Stack overflow: more than 64 nested calls when calling down"));
}

#[test]
fn deeply_nested_statements_run() {
    let depth = 10_000;
    let source = format!(
        "function main(): int {{ {} return 0; {} return 1; }}",
        "for (;;) {".repeat(depth),
        "}".repeat(depth)
    );
    let (output, result) = run_main(&source);
    assert_eq!(output, "");
    assert_eq!(result, 0);
}
