//! `when`, loops and control statements.

use boomerang_ir::{Node, Operator};
use pretty_assertions::assert_eq;

use crate::common::{
    assign, bin, boolean, call, case, empty, eval_ok, eval_output, func, ident, list, num,
    numbers, some,
};

fn increment(name: &str) -> Node {
    assign(name, bin(ident(name), Operator::Plus, num("1")))
}

#[test]
fn when_expression() {
    for (subject, expected) in [("0", "5"), ("1", "10"), ("2", "15")] {
        let node = Node::when(
            num(subject),
            vec![
                case(num("0"), vec![num("5")]),
                case(num("1"), vec![num("10")]),
            ],
            vec![num("15")],
        );
        assert_eq!(eval_ok(&[node]), vec![some(num(expected))]);
    }
}

#[test]
fn when_as_if_statement() {
    for (subject, expected) in [(true, "5"), (false, "10")] {
        let node = Node::when(
            boolean(subject),
            vec![
                case(bin(ident("number"), Operator::Eq, num("0")), vec![num("5")]),
                case(bin(ident("number"), Operator::Eq, num("1")), vec![num("10")]),
            ],
            vec![num("15")],
        );
        let results = eval_ok(&[assign("number", num("0")), node]);
        assert_eq!(results, vec![num("0"), some(num(expected))]);
    }
}

#[test]
fn when_without_match_or_default() {
    let node = Node::when(num("3"), vec![case(num("0"), vec![num("5")])], vec![]);
    assert_eq!(eval_ok(&[node]), vec![empty()]);
}

#[test]
fn when_subject_is_evaluated_once() {
    let output = eval_output(&[Node::when(
        call(ident("print"), vec![num("1")]),
        vec![
            case(numbers(&["2"]), vec![num("0")]),
            case(numbers(&["3"]), vec![num("0")]),
        ],
        vec![],
    )]);
    assert_eq!(output, "1\n");
}

#[test]
fn for_loop_collects_monads() {
    let node = Node::for_loop(
        ident("e"),
        numbers(&["1", "2", "3", "4"]),
        vec![bin(ident("e"), Operator::Asterisk, ident("e"))],
    );
    assert_eq!(
        eval_ok(&[node]),
        vec![list(vec![
            some(num("1")),
            some(num("4")),
            some(num("9")),
            some(num("16")),
        ])]
    );
}

#[test]
fn for_loop_over_empty_list() {
    let node = Node::for_loop(ident("e"), numbers(&[]), vec![ident("e")]);
    assert_eq!(eval_ok(&[node]), vec![list(vec![])]);
}

#[test]
fn for_loop_unpacking() {
    let pairs = list(vec![
        list(vec![num("0"), boolean(true)]),
        list(vec![num("1"), boolean(false)]),
    ]);
    let cases = [
        (&["i"][..], "(0, true)\n(1, false)\n"),
        (&["i", "j"][..], "0 true\n1 false\n"),
        (&["i", "j", "k"][..], "0 true Monad{}\n1 false Monad{}\n"),
    ];
    for (names, expected) in cases {
        let args = names.iter().map(|name| ident(name)).collect();
        let node = Node::for_loop(
            Node::identifiers(names),
            pairs.clone(),
            vec![call(ident("print"), args)],
        );
        assert_eq!(eval_output(&[node]), expected);
    }
}

#[test]
fn for_loop_variable_does_not_escape() {
    let mut interpreter = boomerang_eval::Interpreter::new();
    interpreter
        .evaluate(&[Node::for_loop(ident("e"), numbers(&["1"]), vec![])])
        .unwrap();
    assert_eq!(interpreter.lookup("e"), None);
}

#[test]
fn while_loop() {
    let results = eval_ok(&[
        assign("i", num("0")),
        Node::while_loop(
            bin(ident("i"), Operator::Lt, num("10")),
            vec![increment("i")],
        ),
        ident("i"),
    ]);
    assert_eq!(results, vec![num("0"), empty(), num("10")]);
}

#[test]
fn break_statement() {
    let results = eval_ok(&[
        assign("i", num("0")),
        Node::while_loop(
            bin(ident("i"), Operator::Lt, num("10")),
            vec![increment("i"), Node::break_stmt()],
        ),
        ident("i"),
    ]);
    assert_eq!(results[2], num("1"));
}

#[test]
fn break_in_for_keeps_collected_values() {
    let node = Node::for_loop(
        ident("e"),
        numbers(&["1", "2", "3"]),
        vec![
            Node::when(
                ident("e"),
                vec![case(num("3"), vec![Node::break_stmt()])],
                vec![],
            ),
            ident("e"),
        ],
    );
    assert_eq!(
        eval_ok(&[node]),
        vec![list(vec![some(num("1")), some(num("2"))])]
    );
}

#[test]
fn continue_skips_iteration() {
    let is_even = bin(
        bin(ident("e"), Operator::Modulo, num("2")),
        Operator::Eq,
        num("0"),
    );
    let node = Node::for_loop(
        ident("e"),
        numbers(&["1", "2", "3", "4", "5", "6"]),
        vec![Node::when(
            boolean(true),
            vec![case(is_even, vec![ident("e")])],
            vec![Node::continue_stmt()],
        )],
    );
    // The `when` result is already a Monad; the loop does not wrap it again.
    assert_eq!(
        eval_ok(&[node]),
        vec![list(vec![some(num("2")), some(num("4")), some(num("6"))])]
    );
}

#[test]
fn continue_in_while_retests_condition() {
    let results = eval_ok(&[
        assign("i", num("0")),
        assign("evens", numbers(&[])),
        Node::while_loop(
            bin(ident("i"), Operator::Lt, num("6")),
            vec![
                increment("i"),
                Node::when(
                    bin(ident("i"), Operator::Modulo, num("2")),
                    vec![case(num("1"), vec![Node::continue_stmt()])],
                    vec![],
                ),
                assign("evens", bin(ident("evens"), Operator::Send, ident("i"))),
            ],
        ),
        ident("evens"),
    ]);
    assert_eq!(results[3], numbers(&["2", "4", "6"]));
}

#[test]
fn return_from_nested_loops() {
    let find = func(
        vec![],
        vec![Node::for_loop(
            ident("a"),
            numbers(&["1", "2"]),
            vec![Node::for_loop(
                ident("b"),
                numbers(&["10", "20"]),
                vec![Node::when(
                    bin(ident("b"), Operator::Eq, num("20")),
                    vec![case(
                        boolean(true),
                        vec![Node::return_stmt(bin(ident("a"), Operator::Plus, ident("b")))],
                    )],
                    vec![],
                )],
            )],
        )],
    );
    assert_eq!(eval_ok(&[call(find, vec![])]), vec![some(num("21"))]);
}
