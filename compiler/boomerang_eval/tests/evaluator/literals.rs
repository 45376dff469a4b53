//! Self-evaluating values, templated strings and lists.

use boomerang_ir::{Node, Operator};
use pretty_assertions::assert_eq;

use crate::common::{bin, boolean, empty, eval_ok, list, num, numbers, some, string};

#[test]
fn numbers_evaluate_to_themselves() {
    for text in ["5", "3.1415928", "44.357"] {
        assert_eq!(eval_ok(&[num(text)]), vec![num(text)]);
    }
}

#[test]
fn number_literals_are_canonicalised() {
    assert_eq!(eval_ok(&[num("5.0")]), vec![num("5")]);
    assert_eq!(eval_ok(&[num("-0")]), vec![num("0")]);
}

#[test]
fn booleans_evaluate_to_themselves() {
    assert_eq!(eval_ok(&[boolean(true)]), vec![boolean(true)]);
    assert_eq!(eval_ok(&[boolean(false)]), vec![boolean(false)]);
}

#[test]
fn negative_number() {
    let node = Node::unary(Operator::Minus, num("66"));
    assert_eq!(eval_ok(&[node]), vec![num("-66")]);
}

#[test]
fn bang() {
    let not_true = Node::unary(Operator::Not, boolean(true));
    let not_false = Node::unary(Operator::Not, boolean(false));
    assert_eq!(
        eval_ok(&[not_true, not_false]),
        vec![boolean(false), boolean(true)]
    );
}

#[test]
fn monads_evaluate_to_themselves() {
    assert_eq!(eval_ok(&[empty()]), vec![empty()]);
    assert_eq!(eval_ok(&[some(num("1"))]), vec![some(num("1"))]);
}

#[test]
fn templated_strings() {
    let cases = [
        ("hello, world!", vec![], "hello, world!"),
        (
            "the time is <0>:<1>",
            vec![num("12"), num("45")],
            "the time is 12:45",
        ),
        (
            "the result is <0>",
            vec![bin(num("7"), Operator::Plus, num("6"))],
            "the result is 13",
        ),
        (
            "Hello, my name is <0>, and I am <1> years old!",
            vec![string("John"), bin(num("3"), Operator::Plus, num("2"))],
            "Hello, my name is John, and I am 5 years old!",
        ),
        (
            "My numbers are <0>!",
            vec![numbers(&["1", "2", "3", "4"])],
            "My numbers are (1, 2, 3, 4)!",
        ),
        ("<0> and <1>", vec![boolean(true)], "true and <1>"),
    ];
    for (format, params, expected) in cases {
        let node = Node::template(format, params);
        assert_eq!(eval_ok(&[node]), vec![string(expected)], "format {format:?}");
    }
}

#[test]
fn templated_string_renders_monads() {
    let node = Node::template("<0>|<1>", vec![some(num("3")), empty()]);
    assert_eq!(eval_ok(&[node]), vec![string("Monad{3}|Monad{}")]);
}

#[test]
fn list_elements_are_evaluated() {
    let cases = [
        (vec![], list(vec![])),
        (vec![num("55")], numbers(&["55"])),
        (
            vec![
                num("34"),
                bin(num("40"), Operator::Asterisk, num("3")),
                num("66"),
            ],
            numbers(&["34", "120", "66"]),
        ),
        (
            vec![num("5"), numbers(&["78"]), num("60")],
            list(vec![num("5"), numbers(&["78"]), num("60")]),
        ),
    ];
    for (items, expected) in cases {
        assert_eq!(eval_ok(&[list(items)]), vec![expected]);
    }
}

#[test]
fn one_result_per_top_level_node() {
    let results = eval_ok(&[num("1"), string("two"), boolean(true)]);
    assert_eq!(results.len(), 3);
}
