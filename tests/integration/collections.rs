mod common;
use common::{run, run_errors};

// ============================================================
// Arrays
// ============================================================

#[test]
fn array_literal_and_index() {
    assert_eq!(run("xs: [Int] = [10, 20, 30]\nprint(xs, xs[0], xs[2])"), "[10, 20, 30] 10 30\n");
}

#[test]
fn nested_arrays() {
    assert_eq!(run("grid: [[Int]] = [[1, 2], [3]]\nprint(grid[1][0], grid)"), "3 [[1, 2], [3]]\n");
}

#[test]
fn strings_inside_collections_are_quoted() {
    assert_eq!(run("names: [String] = [\"ada\", \"bob\"]\nprint(names)"), "[\"ada\", \"bob\"]\n");
}

#[test]
fn empty_array_then_append() {
    let src = "xs: [Int] = empty\nfor i in 0 to 3:\n  xs.append(i * i)\n::\nprint(xs, xs.count())";
    assert_eq!(run(src), "[0, 1, 4] 3\n");
}

#[test]
fn array_generic_spelling() {
    assert_eq!(run("xs: Array<Int> = [1]\nys: List<Int> = [2]\nprint(xs, ys)"), "[1] [2]\n");
}

#[test]
fn int_elements_widen_into_float_array() {
    assert_eq!(run("xs: [Float] = [1, 2.5]\nprint(xs)"), "[1.0, 2.5]\n");
}

#[test]
fn mismatched_element_type_rejected() {
    assert_eq!(
        run_errors("xs: [Int] = [1, \"two\"]"),
        vec!["cannot assign value of type Array<Any> to variable of type Array<Int>"]
    );
}

#[test]
fn pop_insert_remove_contains() {
    let src = "\
xs: [Int] = [1, 2, 3]
print(xs.pop(), xs)
xs.insert(0, 9)
print(xs, xs.contains(9), xs.contains(3))
print(xs.remove(1), xs, xs.isEmpty())
";
    assert_eq!(run(src), "3 [1, 2]\n[9, 1, 2] true false\n1 [9, 2] false\n");
}

#[test]
fn index_out_of_bounds() {
    assert_eq!(run_errors("xs: [Int] = [1, 2]\nprint(xs[5])"), vec!["index 5 out of bounds for array of length 2"]);
}

#[test]
fn negative_index_is_out_of_bounds() {
    assert_eq!(run_errors("xs: [Int] = [1]\nprint(xs[-1])"), vec!["index -1 out of bounds for array of length 1"]);
}

#[test]
fn pop_from_empty() {
    assert_eq!(run_errors("xs: [Int] = empty\nxs.pop()"), vec!["cannot pop from an empty array"]);
}

#[test]
fn mutating_method_on_temporary() {
    assert_eq!(
        run_errors("[1].append(2)"),
        vec!["method 'append' modifies its receiver, which must be a variable"]
    );
}

// ============================================================
// Sets
// ============================================================

#[test]
fn set_ignores_duplicates_and_keeps_insertion_order() {
    let src = "s: Set<String> = empty\ns.add(\"b\")\ns.add(\"a\")\ns.add(\"b\")\nprint(s, s.count())";
    assert_eq!(run(src), "{\"b\", \"a\"} 2\n");
}

#[test]
fn set_remove_and_contains() {
    let src = "s: OSet<Int> = empty\ns.add(1)\ns.add(2)\nprint(s.remove(1), s.remove(7), s.contains(2), s)";
    assert_eq!(run(src), "true false true {2}\n");
}

#[test]
fn set_requires_element_type() {
    assert_eq!(run_errors("s: Set = empty"), vec!["Set types must specify their element type"]);
}

// ============================================================
// Dictionaries
// ============================================================

#[test]
fn dict_put_get_and_index() {
    let src = "ages: [String: Int] = empty\nages.put(\"ada\", 36)\nages.put(\"bob\", 41)\nprint(ages[\"bob\"], ages.get(\"ada\"), ages.count())";
    assert_eq!(run(src), "41 36 2\n");
}

#[test]
fn dict_put_overwrites() {
    let src = "d: [String: Int] = empty\nd.put(\"k\", 1)\nd.put(\"k\", 2)\nprint(d, d.keys(), d.values())";
    assert_eq!(run(src), "[\"k\": 2] [\"k\"] [2]\n");
}

#[test]
fn empty_dict_display() {
    assert_eq!(run("d: Dict<String, Int> = empty\nprint(d)"), "[:]\n");
}

#[test]
fn dict_remove_and_missing_key() {
    let src = "d: [Int: String] = empty\nd.put(1, \"one\")\nprint(d.remove(1), d.contains(1))\nprint(d[1])";
    assert_eq!(run_errors(src), vec!["key 1 not found in dictionary"]);
}

// ============================================================
// Strings
// ============================================================

#[test]
fn string_methods() {
    let src = "s: String = \"Hello\"\nprint(s.upper(), s.lower(), s.count(), s.contains(\"ell\"), s[1])";
    assert_eq!(run(src), "HELLO hello 5 true e\n");
}

#[test]
fn unknown_method() {
    assert_eq!(run_errors("b: Bool = true\nb.flip()"), vec!["type Bool has no method 'flip'"]);
}
