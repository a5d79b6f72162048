mod common;
use common::{run, run_should_fail_with, run_stdout};

// ============================================================
// Printing and literals
// ============================================================

#[test]
fn print_int() {
    assert_eq!(run_stdout("print(42)\n"), "42\n");
}

#[test]
fn print_multiple_arguments_joins_with_spaces() {
    assert_eq!(run("print(1, \"two\", 'c', true)"), "1 two c true\n");
}

#[test]
fn print_float_keeps_fraction() {
    assert_eq!(run("print(3.0, 2.5 * 2)"), "3.0 5.0\n");
}

#[test]
fn print_string_escapes() {
    assert_eq!(run("print(\"a\\tb\\\"c\\\"\")"), "a\tb\"c\"\n");
}

#[test]
fn comments_are_ignored() {
    let src = "// leading comment\nx: Int = 1 // trailing\nprint(x)\n";
    assert_eq!(run(src), "1\n");
}

#[test]
fn blank_lines_between_statements() {
    assert_eq!(run("\n\nx: Int = 2\n\n\nprint(x)\n\n"), "2\n");
}

// ============================================================
// Arithmetic
// ============================================================

#[test]
fn precedence_and_grouping() {
    assert_eq!(run("print(1 + 2 * 3, (1 + 2) * 3, 10 - 4 - 3)"), "7 9 3\n");
}

#[test]
fn unary_minus_and_not() {
    assert_eq!(run("x: Int = 5\nprint(-x, !true, -(2 + 3))"), "-5 false -5\n");
}

#[test]
fn integer_division_and_remainder_truncate() {
    assert_eq!(run("print(7 / 2, -7 / 2, 7 % 3, -7 % 3)"), "3 -3 1 -1\n");
}

#[test]
fn mixed_numeric_promotes_to_float() {
    assert_eq!(run("print(1 + 0.5, 3 / 2.0)"), "1.5 1.5\n");
}

#[test]
fn binary_operator_continues_after_newline() {
    assert_eq!(run("x: Int = 1 +\n  2\nprint(x)"), "3\n");
}

#[test]
fn string_concatenation() {
    assert_eq!(run("s: String = \"No\" + \"ir\"\nprint(s + '!')"), "Noir!\n");
}

#[test]
fn division_by_zero_is_runtime_error() {
    run_should_fail_with("print(1 / 0)\n", "division by zero");
}

#[test]
fn output_before_runtime_error_is_kept() {
    let output = common::invoke("run", "print(\"before\")\nprint(1 % 0)\nprint(\"after\")\n");
    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "before\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("modulo by zero"));
}

// ============================================================
// Variables
// ============================================================

#[test]
fn declare_then_assign() {
    assert_eq!(run("x: Int = 1\nx = x + 41\nprint(x)"), "42\n");
}

#[test]
fn chained_assignment() {
    assert_eq!(run("a: Int = 0\nb: Int = 0\na = b = 7\nprint(a, b)"), "7 7\n");
}

#[test]
fn undefined_variable() {
    run_should_fail_with("print(nope)\n", "undefined variable 'nope'");
}

#[test]
fn assignment_before_declaration() {
    run_should_fail_with("y = 3\n", "undefined variable 'y'");
}
