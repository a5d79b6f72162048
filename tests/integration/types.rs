mod common;
use common::{run, run_errors};

// ============================================================
// Implicit conversions on declaration and assignment
// ============================================================

#[test]
fn int_widens_to_float_and_double() {
    assert_eq!(run("f: Float = 2\nd: Double = 3\nprint(f, d)"), "2.0 3.0\n");
}

#[test]
fn char_widens_to_string() {
    assert_eq!(run("s: String = 'x'\nprint(s + \"y\")"), "xy\n");
}

#[test]
fn float_does_not_narrow_to_int() {
    assert_eq!(run_errors("n: Int = 1.5"), vec!["cannot assign value of type Float to variable of type Int"]);
}

#[test]
fn reassignment_checks_declared_type() {
    assert_eq!(
        run_errors("flag: Bool = true\nflag = 1"),
        vec!["cannot assign value of type Int to variable of type Bool"]
    );
}

#[test]
fn any_accepts_everything() {
    assert_eq!(run("v: Any = 1\nv = \"text\"\nv = [1, 2]\nprint(v)"), "[1, 2]\n");
}

#[test]
fn long_fraction_is_double() {
    assert_eq!(run("d: Double = 0.123456789\nprint(d)"), "0.123456789\n");
}

// ============================================================
// Explicit casts
// ============================================================

#[test]
fn float_to_int_truncates() {
    assert_eq!(run("print(3.99 as Int, -3.99 as Int)"), "3 -3\n");
}

#[test]
fn numeric_string_to_int() {
    assert_eq!(run("print(\"42\" as Int + 1, \"-7\" as Int)"), "43 -7\n");
}

#[test]
fn non_numeric_string_to_int_fails() {
    assert_eq!(run_errors("print(\"4x\" as Int)"), vec!["cannot cast value 4x from String to Int"]);
}

#[test]
fn scalars_to_string() {
    assert_eq!(run("print((12 as String) + \"!\", true as String)"), "12! true\n");
}

#[test]
fn numbers_to_bool() {
    assert_eq!(run("print(0 as Bool, 2 as Bool)"), "false true\n");
}

#[test]
fn single_char_string_to_char() {
    assert_eq!(run("c: Char = \"z\" as Char\nprint(c)"), "z\n");
}

#[test]
fn cast_in_initializer_bypasses_declared_check() {
    assert_eq!(run("n: Int = 9.7 as Int\nprint(n)"), "9\n");
}

#[test]
fn array_to_set_removes_duplicates() {
    assert_eq!(run("xs: [Int] = [3, 1, 3, 2, 1]\nprint(xs as Set<Int>)"), "{3, 1, 2}\n");
}

// ============================================================
// Enums and protocols
// ============================================================

#[test]
fn enum_declaration_runs() {
    let src = "enum Color:\n  Red, Green, Blue\n::\nprint(\"ok\")";
    assert_eq!(run(src), "ok\n");
}

#[test]
fn enum_conforming_to_declared_protocol() {
    let src = "\
protocol Shape:
  sides: Int
  area() -> Double
::
enum Kind conforms Shape:
  Square, Triangle
::
print(\"registered\")
";
    assert_eq!(run(src), "registered\n");
}

#[test]
fn enum_conforming_to_unknown_protocol() {
    assert_eq!(run_errors("enum Kind conforms Missing:\n  A\n::"), vec!["protocol 'Missing' is not defined"]);
}

#[test]
fn duplicate_enum() {
    assert_eq!(run_errors("enum A:\n  X\n::\nenum A:\n  Y\n::"), vec!["enum 'A' is already defined"]);
}

#[test]
fn trailing_dot_literal_is_a_float() {
    assert_eq!(run("x: Float = 2.\nprint(x / 4)"), "0.5\n");
    assert_eq!(run_errors("n: Int = 2."), vec!["cannot assign value of type Float to variable of type Int"]);
}
