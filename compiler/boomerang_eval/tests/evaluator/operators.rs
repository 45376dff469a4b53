//! Operators evaluated through the interpreter.

use boomerang_ir::{Node, Operator};
use pretty_assertions::assert_eq;

use crate::common::{assign, bin, boolean, eval_ok, ident, num, numbers, params, string};

#[test]
fn binary_expressions() {
    let cases = [
        (bin(num("1"), Operator::Plus, num("1")), num("2")),
        (bin(num("1"), Operator::Minus, num("1")), num("0")),
        (bin(num("1"), Operator::ForwardSlash, num("2")), num("0.5")),
        (bin(num("2"), Operator::Asterisk, num("2")), num("4")),
        (bin(num("7"), Operator::Modulo, num("4")), num("3")),
        (
            bin(
                num("1"),
                Operator::Plus,
                bin(num("2"), Operator::Asterisk, num("3")),
            ),
            num("7"),
        ),
        (
            bin(
                bin(num("1"), Operator::Plus, num("2")),
                Operator::Asterisk,
                num("3"),
            ),
            num("9"),
        ),
        (bin(num("4.5"), Operator::Plus, num("5.5")), num("10")),
    ];
    for (expression, expected) in cases {
        assert_eq!(eval_ok(&[expression]), vec![expected]);
    }
}

#[test]
fn send_appends_to_lists() {
    let cases = [
        (
            bin(numbers(&["1"]), Operator::Send, num("2")),
            numbers(&["1", "2"]),
        ),
        (
            bin(numbers(&["1"]), Operator::Send, numbers(&["2", "3"])),
            numbers(&["1", "2", "3"]),
        ),
        (
            bin(
                Node::list(vec![boolean(true), boolean(false)]),
                Operator::Send,
                boolean(true),
            ),
            Node::list(vec![boolean(true), boolean(false), boolean(true)]),
        ),
    ];
    for (expression, expected) in cases {
        assert_eq!(eval_ok(&[expression]), vec![expected]);
    }
}

#[test]
fn send_does_not_mutate_the_original() {
    let results = eval_ok(&[
        assign("xs", numbers(&["1"])),
        bin(ident("xs"), Operator::Send, num("2")),
        ident("xs"),
    ]);
    assert_eq!(results[1], numbers(&["1", "2"]));
    assert_eq!(results[2], numbers(&["1"]));
}

#[test]
fn list_and_string_index() {
    let cases = [
        (
            bin(numbers(&["1", "2", "3"]), Operator::At, num("1")),
            num("2"),
        ),
        (
            bin(string("hello, world!"), Operator::At, num("2")),
            string("l"),
        ),
    ];
    for (expression, expected) in cases {
        assert_eq!(eval_ok(&[expression]), vec![expected]);
    }
}

#[test]
fn comparisons() {
    let cases = [
        (bin(num("7"), Operator::Eq, num("7")), true),
        (bin(num("146"), Operator::Eq, num("66")), false),
        (bin(boolean(true), Operator::Eq, string("true")), false),
        (bin(num("16"), Operator::Ne, num("13")), true),
        (bin(num("16"), Operator::Ne, num("16")), false),
        (bin(num("5"), Operator::Lt, num("5")), false),
        (bin(num("4"), Operator::Lt, num("5")), true),
        (bin(num("3.14159"), Operator::Lt, num("36.9")), true),
        (bin(num("3.14159"), Operator::Lt, num("3.14159")), false),
        (bin(num("3"), Operator::Le, num("3")), true),
        (bin(num("10"), Operator::Gt, num("9.5")), true),
        (bin(num("9"), Operator::Ge, num("10")), false),
    ];
    for (expression, expected) in cases {
        assert_eq!(eval_ok(&[expression]), vec![boolean(expected)]);
    }
}

#[test]
fn logical_and_membership() {
    let cases = [
        (bin(boolean(true), Operator::And, boolean(false)), false),
        (bin(boolean(false), Operator::Or, boolean(true)), true),
        (bin(num("5"), Operator::In, numbers(&["1", "3", "5"])), true),
        (bin(string("x"), Operator::In, numbers(&["1", "2"])), false),
    ];
    for (expression, expected) in cases {
        assert_eq!(eval_ok(&[expression]), vec![boolean(expected)]);
    }
}

#[test]
fn send_to_function_calls_it() {
    let add = Node::function(
        params(&["a", "b"]),
        vec![Node::return_stmt(bin(ident("a"), Operator::Plus, ident("b")))],
    );
    let results = eval_ok(&[
        assign("add", add),
        bin(ident("add"), Operator::Send, numbers(&["3", "4"])),
    ]);
    assert_eq!(results[1], Node::monad(Some(num("7"))));
}

#[test]
fn send_single_value_to_builtin() {
    let results = eval_ok(&[bin(ident("len"), Operator::Send, string("abcd"))]);
    assert_eq!(results, vec![num("4")]);
}
