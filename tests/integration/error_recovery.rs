// Error recovery & malformed input tests
//
// The parser reports every error it can find in one pass, resynchronizing at
// statement boundaries and block terminators.

mod common;
use common::{invoke, run_should_fail_with};
use noir::lexer::lex;
use noir::parser::{ParseOutput, Parser};
use noir::parser::ast::Stmt;

fn parse_output(src: &str) -> ParseOutput {
    let tokens = lex(src).unwrap();
    Parser::new(&tokens, src).parse_program()
}

fn messages(src: &str) -> Vec<String> {
    match noir::parse_source(src) {
        Ok(_) => panic!("expected parse errors"),
        Err(errs) => errs.iter().map(|e| e.message().to_string()).collect(),
    }
}

// ============================================================
// Multiple errors in one pass
// ============================================================

#[test]
fn reports_every_bad_statement() {
    let errs = messages("x: Int = \ny: Int = 2\nz = )\nw: Int = 4\n");
    assert_eq!(errs, vec!["expected expression, found newline", "expected expression, found ')'"]);
}

#[test]
fn trailing_tokens_then_bad_expression() {
    let errs = messages("a: Int = 1 2\nb: Int = )\nc: Int = 3\n");
    assert_eq!(errs, vec!["expected end of statement, found 2", "expected expression, found ')'"]);
}

#[test]
fn good_statements_survive_recovery() {
    let out = parse_output("x: Int = \ny: Int = 2\nz = )\nw: Int = 4\n");
    assert_eq!(out.errors.len(), 2);
    assert_eq!(out.program.stmts.len(), 2);
}

#[test]
fn error_inside_function_body_keeps_function() {
    let out = parse_output("func f():\n  x = )\n  print(1)\n::\nf()\n");
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.program.stmts.len(), 2);
    let Stmt::Function(f) = &out.program.stmts[0].node else {
        panic!("expected function declaration");
    };
    assert_eq!(f.body.stmts.len(), 1);
}

// ============================================================
// Block terminators
// ============================================================

#[test]
fn missing_terminator_at_end_of_file() {
    let errs = messages("i: Int = 0\nwhile i < 3:\n  i = i + 1\n");
    assert_eq!(errs, vec!["missing '::' terminator for while block starting at line 2, column 1"]);
}

#[test]
fn missing_terminator_reports_innermost_block() {
    let errs = messages("func f():\n  if true:\n    return\n");
    assert_eq!(errs, vec!["missing '::' terminator for if block starting at line 2, column 3"]);
}

#[test]
fn stray_terminator() {
    let errs = messages("print(1)\n::\nprint(2)\n");
    assert_eq!(errs, vec!["unexpected '::' terminator with no matching block"]);
}

#[test]
fn missing_range_keyword() {
    let errs = messages("for i in 0 5:\n  print(i)\n::\n");
    assert_eq!(errs[0], "expected 'to' or 'thru' in for loop range, found 5");
}

#[test]
fn variable_needs_initializer() {
    assert_eq!(messages("count: Int\n"), vec!["variables must be initialized at declaration"]);
}

#[test]
fn invalid_assignment_target() {
    assert_eq!(messages("f() = 1\n"), vec!["invalid assignment target"]);
}

#[test]
fn method_without_call_parens() {
    assert_eq!(messages("xs: [Int] = [1]\nxs.count\n"), vec!["expected '(' after method name 'count'"]);
}

// ============================================================
// Lexical errors abort immediately
// ============================================================

#[test]
fn unterminated_string() {
    assert_eq!(messages("x: Int = 1\ns: String = \"open\n"), vec!["unterminated string literal"]);
}

#[test]
fn invalid_escape() {
    assert_eq!(messages("s: String = \"a\\qb\"\n"), vec!["invalid escape sequence '\\q'"]);
}

#[test]
fn multiple_decimal_points() {
    assert_eq!(messages("x: Float = 1.2.3\n"), vec!["invalid number format: multiple decimal points"]);
}

#[test]
fn invalid_character() {
    assert_eq!(messages("x: Int = 1 @ 2\n"), vec!["invalid character '@'"]);
}

// ============================================================
// Positions and the CLI
// ============================================================

#[test]
fn error_carries_line_and_column() {
    let errs = noir::parse_source("x: Int = 1\n  y = )\n").unwrap_err();
    let span = errs[0].span().unwrap();
    assert_eq!((span.line, span.column), (2, 7));
    assert_eq!(errs[0].to_string(), "Parse error at line 2, column 7: expected expression, found ')'");
}

#[test]
fn parse_errors_prevent_any_output() {
    let output = invoke("run", "print(\"should not run\")\nx: Int = )\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn check_lists_all_errors() {
    let output = invoke("check", "x: Int = \ny: Int = )\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected expression, found newline"), "{stderr}");
    assert!(stderr.contains("expected expression, found ')'"), "{stderr}");
}

#[test]
fn run_reports_lex_error() {
    run_should_fail_with("x: Int = 1 $ 2\n", "invalid character '$'");
}

#[test]
fn reports_name_the_source_file() {
    let output = invoke("run", "x: Int = )\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("main.noir:1:"), "{stderr}");

    let output = invoke("run", "missing(1)\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("main.noir"), "{stderr}");
}
