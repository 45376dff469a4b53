//! Runtime errors and their rendered messages.

use boomerang_eval::{EvalErrorKind, Interpreter, InterpreterBuilder};
use boomerang_ir::{Node, Operator, Param};
use pretty_assertions::assert_eq;

use crate::common::{
    assign, bin, boolean, call, case, eval_err, func, ident, num, numbers, params, string,
};

#[test]
fn invalid_unary_operator() {
    let node = Node::unary(Operator::Plus, num("1"));
    assert_eq!(
        eval_err(&[node]),
        "error at line 1: invalid unary operator: PLUS (\"+\")"
    );
}

#[test]
fn invalid_binary_operator() {
    let node = bin(num("1"), Operator::Not, num("1"));
    assert_eq!(
        eval_err(&[node]),
        "error at line 1: invalid binary operator: NOT (\"not\")"
    );
}

#[test]
fn function_call_errors() {
    let cases = [
        (
            call(num("1"), vec![num("1"), num("2")]),
            "error at line 1: cannot make function call on type Number (\"1\")",
        ),
        (
            call(
                func(
                    vec![Param::with_default("a", num("1")), Param::new("b")],
                    vec![],
                ),
                vec![num("1")],
            ),
            "error at line 1: Function paramter \"b\" does not have a value. Either add 1 more values to the function call or assign \"b\" a default value in the function definition parameters.",
        ),
        (
            call(
                func(
                    vec![
                        Param::with_default("a", num("1")),
                        Param::with_default("b", num("2")),
                        Param::new("c"),
                    ],
                    vec![],
                ),
                vec![num("1")],
            ),
            "error at line 1: Function paramter \"c\" does not have a value. Either add 2 more values to the function call or assign \"c\" a default value in the function definition parameters.",
        ),
        (
            call(
                func(
                    vec![
                        Param::with_default("a", num("1")),
                        Param::with_default("b", num("2")),
                        Param::new("c"),
                    ],
                    vec![],
                ),
                vec![num("5"), num("5")],
            ),
            "error at line 1: Function paramter \"c\" does not have a value. Either add 1 more values to the function call or assign \"c\" a default value in the function definition parameters.",
        ),
        (
            call(func(params(&["a"]), vec![]), vec![num("1"), num("2")]),
            "error at line 1: expected 1 arguments, got 2",
        ),
    ];
    for (node, expected) in cases {
        assert_eq!(eval_err(&[node]), expected);
    }
}

#[test]
fn callee_checked_before_arguments() {
    let node = call(num("1"), vec![ident("undefined")]);
    assert_eq!(
        eval_err(&[node]),
        "error at line 1: cannot make function call on type Number (\"1\")"
    );
}

#[test]
fn index_errors() {
    let cases = [
        (
            bin(numbers(&["1"]), Operator::At, num("3.4")),
            "error at line 1: list index must be an integer",
        ),
        (
            bin(numbers(&["1"]), Operator::At, num("3")),
            "error at line 1: index of 3 out of range (0 to 0)",
        ),
        (
            bin(string("test string"), Operator::At, num("-1")),
            "error at line 1: index of -1 out of range (0 to 10)",
        ),
        (
            bin(num("3"), Operator::At, num("3")),
            "error at line 1: invalid types for index: Number (\"3\") and Number (\"3\")",
        ),
    ];
    for (node, expected) in cases {
        assert_eq!(eval_err(&[node]), expected);
    }
}

#[test]
fn arithmetic_type_errors() {
    let hello = || string("hello");
    let world = || string(" world!");
    let cases = [
        (
            bin(hello(), Operator::Plus, world()),
            "error at line 1: cannot add types String (\"hello\") and String (\" world!\")",
        ),
        (
            bin(hello(), Operator::Minus, world()),
            "error at line 1: cannot subtract types String (\"hello\") and String (\" world!\")",
        ),
        (
            bin(hello(), Operator::Asterisk, world()),
            "error at line 1: cannot multiply types String (\"hello\") and String (\" world!\")",
        ),
        (
            bin(boolean(true), Operator::ForwardSlash, boolean(false)),
            "error at line 1: cannot divide types Boolean (\"true\") and Boolean (\"false\")",
        ),
        (
            bin(num("1"), Operator::ForwardSlash, num("0")),
            "error at line 1: cannot divide by zero",
        ),
        (
            bin(boolean(true), Operator::Send, boolean(false)),
            "error at line 1: cannot use send on types Boolean (\"true\") and Boolean (\"false\")",
        ),
    ];
    for (node, expected) in cases {
        assert_eq!(eval_err(&[node]), expected);
    }
}

#[test]
fn unary_operand_errors() {
    assert_eq!(
        eval_err(&[Node::unary(Operator::Not, num("1"))]),
        "error at line 1: invalid type for bang operator: Number (\"1\")"
    );
    assert_eq!(
        eval_err(&[Node::unary(Operator::Minus, boolean(false))]),
        "error at line 1: invalid type for minus operator: Boolean (\"false\")"
    );
}

#[test]
fn control_statements_outside_their_context() {
    let when_true = |statement: Node| {
        Node::when(boolean(true), vec![case(boolean(true), vec![statement])], vec![])
    };
    let break_msg = "error at line 1: break statements not allowed outside loops";
    let continue_msg = "error at line 1: continue statements not allowed outside loops";
    let return_msg = "error at line 1: return statements not allowed outside loops";
    let cases = [
        (Node::break_stmt(), break_msg),
        (when_true(Node::break_stmt()), break_msg),
        (call(func(vec![], vec![Node::break_stmt()]), vec![]), break_msg),
        (Node::continue_stmt(), continue_msg),
        (when_true(Node::continue_stmt()), continue_msg),
        (call(func(vec![], vec![Node::continue_stmt()]), vec![]), continue_msg),
        (Node::return_stmt(num("0")), return_msg),
        (
            Node::while_loop(boolean(true), vec![Node::return_stmt(num("-1"))]),
            return_msg,
        ),
        (when_true(Node::return_stmt(num("-2"))), return_msg),
    ];
    for (node, expected) in cases {
        assert_eq!(eval_err(&[node]), expected);
    }
}

#[test]
fn break_in_function_called_from_loop() {
    let node = Node::for_loop(
        ident("e"),
        numbers(&["1"]),
        vec![call(func(vec![], vec![Node::break_stmt()]), vec![])],
    );
    assert_eq!(
        eval_err(&[node]),
        "error at line 1: break statements not allowed outside loops"
    );
}

#[test]
fn assigning_to_builtins() {
    for name in boomerang_eval::builtin_names() {
        assert_eq!(
            eval_err(&[assign(name, num("20"))]),
            format!("error at line 1: \"{name}\" is a builtin function or variable")
        );
    }
    assert_eq!(
        eval_err(&[Node::for_loop(ident("len"), numbers(&["1"]), vec![])]),
        "error at line 1: \"len\" is a builtin function or variable"
    );
}

#[test]
fn invalid_assignment_target() {
    assert_eq!(
        eval_err(&[Node::assign(num("5"), num("10"))]),
        "error at line 1: invalid type for assignment: Number (\"5\")"
    );
}

#[test]
fn unparseable_numbers() {
    assert_eq!(
        eval_err(&[bin(num("hello"), Operator::Plus, num("1"))]),
        "error at line 1: cannot convert \"hello\" to a number"
    );
    assert_eq!(
        eval_err(&[bin(num("1"), Operator::Plus, num("world"))]),
        "error at line 1: cannot convert \"world\" to a number"
    );
}

#[test]
fn undefined_variable() {
    assert_eq!(
        eval_err(&[ident("missing")]),
        "error at line 1: undefined variable: missing"
    );
}

#[test]
fn loop_operand_errors() {
    assert_eq!(
        eval_err(&[Node::while_loop(num("1"), vec![])]),
        "error at line 1: while loop condition must be a Boolean, got Number (\"1\")"
    );
    assert_eq!(
        eval_err(&[Node::for_loop(ident("e"), num("1"), vec![])]),
        "error at line 1: for loop expects a List, got Number (\"1\")"
    );
}

#[test]
fn error_reports_innermost_line() {
    let program = [
        assign("x", num("1")).with_line(1),
        Node::block(vec![
            assign("y", num("2")).with_line(3),
            bin(ident("x"), Operator::ForwardSlash, num("0").with_line(4)).with_line(4),
        ])
        .with_line(2),
    ];
    let err = Interpreter::new().evaluate(&program).unwrap_err();
    assert_eq!(err.line, Some(4));
    assert_eq!(err.to_string(), "error at line 4: cannot divide by zero");
}

#[test]
fn error_inside_function_reports_body_line() {
    let f = func(
        vec![],
        vec![bin(num("1"), Operator::Plus, boolean(true)).with_line(7)],
    );
    let err = Interpreter::new()
        .evaluate(&[call(f, vec![]).with_line(2)])
        .unwrap_err();
    assert_eq!(err.line, Some(7));
}

#[test]
fn unbounded_recursion_is_an_error() {
    let mut interpreter = InterpreterBuilder::new().max_call_depth(50).build();
    let forever = func(vec![], vec![Node::return_stmt(call(ident("forever"), vec![]))]);
    let err = interpreter
        .evaluate(&[assign("forever", forever), call(ident("forever"), vec![])])
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::RecursionLimitExceeded { limit: 50 }
    );
}

#[test]
fn evaluation_stops_at_first_error() {
    let mut interpreter = Interpreter::new();
    let result = interpreter.evaluate(&[
        assign("a", num("1")),
        ident("missing"),
        assign("b", num("2")),
    ]);
    assert!(result.is_err());
    assert_eq!(interpreter.lookup("a"), Some(num("1")));
    assert_eq!(interpreter.lookup("b"), None);
}
