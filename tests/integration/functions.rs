mod common;
use common::{run, run_errors, run_should_fail_with};

#[test]
fn call_with_return_value() {
    let src = "func add(a: Int, b: Int) -> Int:\n  return a + b\n::\nprint(add(2, 3))";
    assert_eq!(run(src), "5\n");
}

#[test]
fn function_without_parameters_or_return_type() {
    let src = "func greet():\n  print(\"hello\")\n::\ngreet()\ngreet()";
    assert_eq!(run(src), "hello\nhello\n");
}

#[test]
fn bare_return_ends_function_early() {
    let src = "\
func check(n: Int):
  if n < 0:
    return
  ::
  print(\"non-negative\")
::
check(-1)
check(1)
";
    assert_eq!(run(src), "non-negative\n");
}

#[test]
fn return_inside_loop_exits_function() {
    let src = "\
func firstOver(limit: Int) -> Int:
  for i in 0 to 100:
    if i * i > limit:
      return i
    ::
  ::
  return -1
::
print(firstOver(50))
";
    assert_eq!(run(src), "8\n");
}

#[test]
fn recursion_factorial() {
    let src = "func fact(n: Int) -> Int:\n  if n <= 1: return 1 ::\n  return n * fact(n - 1)\n::\nprint(fact(12))";
    assert_eq!(run(src), "479001600\n");
}

#[test]
fn fibonacci_sequence() {
    let src = "\
func fibonacci(n: Int) -> [Int]:
  if n <= 0:
    return [0]
  :: else if n == 1:
    return [0, 1]
  ::
  fibSeq: [Int] = [0, 1]
  for i in 2 to n:
    fibSeq.append(fibSeq[i - 1] + fibSeq[i - 2])
  ::
  return fibSeq
::
print(fibonacci(1))
print(fibonacci(8))
";
    assert_eq!(run(src), "[0, 1]\n[0, 1, 1, 2, 3, 5, 8, 13]\n");
}

#[test]
fn fibonacci_written_on_one_line() {
    let src = "func fibonacci(n: Int) -> [Int]: if n <= 0: return [0] :: else if n == 1: return [0, 1] :: \
               fibSeq: [Int] = [0, 1] for i in 2 to n: fibSeq.append(fibSeq[i-1] + fibSeq[i-2]) :: \
               return fibSeq :: print(fibonacci(6))";
    assert_eq!(run(src), "[0, 1, 1, 2, 3, 5]\n");
}

#[test]
fn functions_can_call_later_definitions_at_runtime() {
    let src = "\
func a() -> Int:
  return b() + 1
::
func b() -> Int:
  return 41
::
print(a())
";
    assert_eq!(run(src), "42\n");
}

#[test]
fn argument_coerced_to_parameter_type() {
    let src = "func half(x: Float) -> Float:\n  return x / 2\n::\nprint(half(3))";
    assert_eq!(run(src), "1.5\n");
}

#[test]
fn locals_shadow_globals_without_clobbering() {
    let src = "x: Int = 1\nfunc f():\n  x: Int = 2\n  print(x)\n::\nf()\nprint(x)";
    assert_eq!(run(src), "2\n1\n");
}

#[test]
fn assignment_reaches_enclosing_scope() {
    let src = "n: Int = 0\nfunc inc():\n  n = n + 1\n::\ninc()\ninc()\ninc()\nprint(n)";
    assert_eq!(run(src), "3\n");
}

#[test]
fn lexical_not_dynamic_scope() {
    let src = "\
x: String = \"global\"
func show():
  print(x)
::
func caller():
  x: String = \"local\"
  show()
::
caller()
";
    assert_eq!(run(src), "global\n");
}

#[test]
fn nested_function_sees_enclosing_locals() {
    let src = "\
func outer() -> Int:
  base: Int = 10
  func inner(k: Int) -> Int:
    return base + k
  ::
  return inner(5)
::
print(outer())
";
    assert_eq!(run(src), "15\n");
}

#[test]
fn function_values_can_be_stored() {
    let src = "func twice(n: Int) -> Int:\n  return n * 2\n::\nf: Function = twice\nprint(f(21))";
    assert_eq!(run(src), "42\n");
}

#[test]
fn builtin_print_is_a_value() {
    assert_eq!(run("p: Function = print\np(\"via alias\")"), "via alias\n");
}

// ============================================================
// Errors
// ============================================================

#[test]
fn wrong_argument_count() {
    let src = "func f(a: Int, b: Int) -> Int:\n  return a\n::\nf(1)";
    assert_eq!(run_errors(src), vec!["function 'f' expects 2 argument(s), found 1"]);
}

#[test]
fn wrong_argument_type() {
    let src = "func f(flag: Bool):\n::\nf(\"yes\")";
    assert_eq!(
        run_errors(src),
        vec!["type error in argument 'flag' of 'f': cannot assign value of type String to variable of type Bool"]
    );
}

#[test]
fn missing_return_value() {
    let src = "func f() -> Int:\n  print(\"no return\")\n::\nf()";
    assert_eq!(run_errors(src), vec!["function 'f' did not return a value"]);
}

#[test]
fn undefined_function() {
    run_should_fail_with("missing(1)\n", "undefined function 'missing'");
}

#[test]
fn calling_a_non_function() {
    assert_eq!(run_errors("n: Int = 3\nn(1)"), vec!["'n' is not callable (found Int)"]);
}

#[test]
fn runaway_recursion_hits_call_depth_limit() {
    let src = "func down(n: Int):\n  down(n + 1)\n::\ndown(0)";
    let config = noir::config::Config::from_toml_str("[interpreter]\nmax_call_depth = 64\n").unwrap();
    let errs = noir::run_source(src, &config, Vec::new()).unwrap_err();
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].message(), "maximum call depth of 64 exceeded");
}

#[test]
fn call_depth_is_configurable() {
    let (_dir, path) = common::write_program("func down(n: Int):\n  down(n + 1)\n::\ndown(0)\n");
    std::fs::write(
        path.parent().unwrap().join("noir.toml"),
        "[interpreter]\nmax_call_depth = 8\n\n[diagnostics]\ncolor = false\n",
    )
    .unwrap();
    let output = common::noir().arg("run").arg(&path).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("maximum call depth of 8 exceeded"));
}

const NESTED_DESCENT: &str = "func deep(n: Int) -> Int:
  if n == 0:
    return 0
  ::
  for i in 0 to 1:
    while true:
      return deep(n - 1) + 1
    ::
  ::
  return -1
::
";

#[test]
fn default_call_depth_is_reachable() {
    let src = "func down(n: Int) -> Int:\n  if n == 0:\n    return 0\n  ::\n  return down(n - 1) + 1\n::\nprint(down(255))";
    assert_eq!(run(src), "255\n");
}

#[test]
fn default_call_depth_is_reachable_through_nested_loops() {
    assert_eq!(run(&format!("{NESTED_DESCENT}print(deep(255))")), "255\n");
}

#[test]
fn default_call_depth_limit_is_an_error_not_a_crash() {
    let errs = run_errors(&format!("{NESTED_DESCENT}print(deep(256))"));
    assert_eq!(errs, vec!["maximum call depth of 256 exceeded"]);
}

#[test]
fn cli_reaches_default_call_depth_through_nested_loops() {
    let output = common::run_stdout(&format!("{NESTED_DESCENT}print(deep(255))\n"));
    assert_eq!(output, "255\n");
}
