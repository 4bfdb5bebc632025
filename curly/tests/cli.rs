use insta::assert_snapshot;
use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Runs the `curly` binary with `args`, feeding `stdin` to it.
fn curly(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_curly"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn run_prints_output_and_main_result() {
    let output = curly(
        &[],
        "function main(): int { for (let i: int = 0; i < 3; i++) print(i); return 10 - 3 - 2; }",
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0\n1\n2\nmain() returned: 9\n");
    assert_eq!(stderr(&output), "");
}

#[test]
fn run_without_main_prints_no_summary() {
    let output = curly(&["--emit=run", "-"], "print(4);");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "4\n");
}

#[test]
fn emit_tokens() {
    let output = curly(&["--emit=tokens"], "x = y1 >= 2;");
    assert!(output.status.success());
    assert_snapshot!(stdout(&output).trim_end(), @r"
    1:1 Identifier 'x'
    1:3 Equal '='
    1:5 Identifier 'y1'
    1:8 GreaterEqual '>='
    1:11 Number '2'
    1:12 Semicolon ';'
    ");
}

#[test]
fn emit_ast() {
    let output = curly(&["--emit=ast"], "while (n) n--;");
    assert!(output.status.success());
    assert_snapshot!(stdout(&output).trim_end(), @r"
    WhileStmt
      Condition
        Identifier: n
      Body
        ExpressionStmt
          AssignStmt n
            BinaryExpr: -
              Identifier: n
              NumberLiteral: 1
    ");
}

#[test]
fn parse_error_exits_with_status_one() {
    let output = curly(&[], "function main(): int { return 0 }");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert_eq!(
        stderr(&output),
        "Error: Expected ';' after return. Got: RBrace at line 1:33\n"
    );
}

#[test]
fn runtime_error_exits_with_status_one() {
    let output = curly(&[], "print(1); function main(): int { return y; }");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "1\n");
    assert_eq!(
        stderr(&output),
        "Error: Undefined variable: y at line 1:41\n"
    );
}

#[test]
fn max_depth_option_limits_recursion() {
    let program = "function down(n: int): int { return down(n + 1); } function main(): int { return down(0); }";
    let output = curly(&["--max-depth=10"], program);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output)
        .starts_with("Error: Stack overflow: more than 10 nested calls when calling down"));
}

#[test]
fn usage_error_prints_usage() {
    let output = curly(&["--bogus"], "");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "Error: Unknown option '--bogus'\nUsage: curly [--emit=tokens|ast|run] [--max-depth=N] [FILE]\n"
    );
}

#[test]
fn missing_file_is_reported() {
    let output = curly(&["does/not/exist.curly"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error: Could not read does/not/exist.curly: "));
}
