//! The unified node model.
//!
//! Boomerang does not separate syntax from runtime values: the parser
//! produces `Node`s, the evaluator consumes `Node`s and produces `Node`s. A
//! literal evaluates to itself, a `Function` literal evaluates to itself plus
//! a handle to the scope it was evaluated in, and `Monad` doubles as the
//! "maybe a value" carrier for call results, `when` results and `for`
//! iteration results.
//!
//! Every node carries the source line it came from. The line is positional
//! metadata only and never takes part in equality.

use std::rc::Rc;

use crate::Operator;

/// Handle of a scope in the evaluator's scope arena.
///
/// Function values store the handle of their defining scope so that free
/// identifiers in the body resolve there at call time.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The global scope is always the first scope allocated.
    pub const GLOBAL: ScopeId = ScopeId(0);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        ScopeId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node with its source line.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub line: u32,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// Every shape a node can take.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Decimal literal, stored as text.
    Number(String),
    Boolean(bool),
    /// String with no substitutions left to perform.
    RawString(String),
    /// Format string with `<i>` placeholders filled from `params` by position.
    TemplatedString { format: String, params: Vec<Node> },
    List(Vec<Node>),
    Identifier(String),
    Function(FunctionValue),
    FunctionCall { callee: Box<Node>, args: Vec<Node> },
    BinaryExpression { left: Box<Node>, op: Operator, right: Box<Node> },
    UnaryExpression { op: Operator, operand: Box<Node> },
    /// `target` is an identifier or a list of identifiers.
    AssignStatement { target: Box<Node>, value: Box<Node> },
    ReturnStatement(Box<Node>),
    BreakStatement,
    ContinueStatement,
    WhileLoop { condition: Box<Node>, body: Vec<Node> },
    ForLoop { target: Box<Node>, iterable: Box<Node>, body: Vec<Node> },
    When { subject: Box<Node>, cases: Vec<WhenCase>, default: Vec<Node> },
    BlockStatement(Vec<Node>),
    /// Zero or one value.
    Monad(Option<Box<Node>>),
    /// Value an identifier naming a builtin function resolves to.
    BuiltinFunction(String),
}

/// A declared function parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    /// Evaluated in the callee's scope when no argument is supplied.
    pub default: Option<Node>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Node) -> Self {
        Param {
            name: name.into(),
            default: Some(default),
        }
    }
}

/// Parameters and body of a function literal.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub params: Vec<Param>,
    pub body: Vec<Node>,
}

/// A function literal, possibly closed over its defining scope.
///
/// The definition is shared and never mutated; cloning a function value is
/// cheap and calling it leaves the definition untouched.
#[derive(Clone, Debug)]
pub struct FunctionValue {
    def: Rc<FunctionDef>,
    scope: Option<ScopeId>,
}

impl FunctionValue {
    pub fn new(params: Vec<Param>, body: Vec<Node>) -> Self {
        FunctionValue {
            def: Rc::new(FunctionDef { params, body }),
            scope: None,
        }
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.def.params
    }

    #[inline]
    pub fn body(&self) -> &[Node] {
        &self.def.body
    }

    /// The defining scope, once the literal has been evaluated.
    #[inline]
    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }

    /// The same function closed over `scope`.
    #[must_use]
    pub fn closed_over(&self, scope: ScopeId) -> Self {
        FunctionValue {
            def: Rc::clone(&self.def),
            scope: Some(scope),
        }
    }
}

/// Functions are equal when their definitions are; the captured scope is
/// not part of a function's identity.
impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.def, &other.def) || *self.def == *other.def
    }
}

/// One `condition => body` arm of a `when` expression.
#[derive(Clone, Debug, PartialEq)]
pub struct WhenCase {
    pub condition: Node,
    pub body: Vec<Node>,
}

impl WhenCase {
    pub fn new(condition: Node, body: Vec<Node>) -> Self {
        WhenCase { condition, body }
    }
}

// Construction. Nodes are built at line 1; `with_line` relocates them.

impl Node {
    #[inline]
    pub fn new(kind: NodeKind) -> Self {
        Node { kind, line: 1 }
    }

    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    pub fn number(text: impl Into<String>) -> Self {
        Node::new(NodeKind::Number(text.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Node::new(NodeKind::Boolean(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::new(NodeKind::RawString(value.into()))
    }

    pub fn template(format: impl Into<String>, params: Vec<Node>) -> Self {
        Node::new(NodeKind::TemplatedString {
            format: format.into(),
            params,
        })
    }

    pub fn list(items: Vec<Node>) -> Self {
        Node::new(NodeKind::List(items))
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Node::new(NodeKind::Identifier(name.into()))
    }

    /// List of identifiers, the multiple-target form of assignments and loops.
    pub fn identifiers(names: &[&str]) -> Self {
        Node::list(names.iter().map(|name| Node::identifier(*name)).collect())
    }

    pub fn function(params: Vec<Param>, body: Vec<Node>) -> Self {
        Node::new(NodeKind::Function(FunctionValue::new(params, body)))
    }

    pub fn call(callee: Node, args: Vec<Node>) -> Self {
        Node::new(NodeKind::FunctionCall {
            callee: Box::new(callee),
            args,
        })
    }

    pub fn binary(left: Node, op: Operator, right: Node) -> Self {
        Node::new(NodeKind::BinaryExpression {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn unary(op: Operator, operand: Node) -> Self {
        Node::new(NodeKind::UnaryExpression {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn assign(target: Node, value: Node) -> Self {
        Node::new(NodeKind::AssignStatement {
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    pub fn return_stmt(value: Node) -> Self {
        Node::new(NodeKind::ReturnStatement(Box::new(value)))
    }

    pub fn break_stmt() -> Self {
        Node::new(NodeKind::BreakStatement)
    }

    pub fn continue_stmt() -> Self {
        Node::new(NodeKind::ContinueStatement)
    }

    pub fn while_loop(condition: Node, body: Vec<Node>) -> Self {
        Node::new(NodeKind::WhileLoop {
            condition: Box::new(condition),
            body,
        })
    }

    pub fn for_loop(target: Node, iterable: Node, body: Vec<Node>) -> Self {
        Node::new(NodeKind::ForLoop {
            target: Box::new(target),
            iterable: Box::new(iterable),
            body,
        })
    }

    pub fn when(subject: Node, cases: Vec<WhenCase>, default: Vec<Node>) -> Self {
        Node::new(NodeKind::When {
            subject: Box::new(subject),
            cases,
            default,
        })
    }

    pub fn block(statements: Vec<Node>) -> Self {
        Node::new(NodeKind::BlockStatement(statements))
    }

    pub fn monad(value: Option<Node>) -> Self {
        Node::new(NodeKind::Monad(value.map(Box::new)))
    }

    pub fn empty_monad() -> Self {
        Node::monad(None)
    }

    pub fn builtin(name: impl Into<String>) -> Self {
        Node::new(NodeKind::BuiltinFunction(name.into()))
    }
}

// Inspection

impl Node {
    /// Kind name as reported in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Number(_) => "Number",
            NodeKind::Boolean(_) => "Boolean",
            NodeKind::RawString(_) | NodeKind::TemplatedString { .. } => "String",
            NodeKind::List(_) => "List",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::Function(_) => "Function",
            NodeKind::FunctionCall { .. } => "FunctionCall",
            NodeKind::BinaryExpression { .. } => "BinaryExpression",
            NodeKind::UnaryExpression { .. } => "UnaryExpression",
            NodeKind::AssignStatement { .. } => "AssignStatement",
            NodeKind::ReturnStatement(_) => "ReturnStatement",
            NodeKind::BreakStatement => "BreakStatement",
            NodeKind::ContinueStatement => "ContinueStatement",
            NodeKind::WhileLoop { .. } => "WhileLoop",
            NodeKind::ForLoop { .. } => "ForLoop",
            NodeKind::When { .. } => "When",
            NodeKind::BlockStatement(_) => "BlockStatement",
            NodeKind::Monad(_) => "Monad",
            NodeKind::BuiltinFunction(_) => "BuiltinFunction",
        }
    }

    /// `Kind ("literal")`, the form diagnostics name an operand in.
    pub fn describe(&self) -> String {
        format!("{} (\"{self}\")", self.type_name())
    }

    /// Identifier name, if this is an identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self.kind {
            NodeKind::Boolean(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_monad(&self) -> bool {
        matches!(self.kind, NodeKind::Monad(_))
    }

    /// Wrap in a Monad, unless this already is one.
    ///
    /// Block results that feed a Monad-valued position (`when` arms, `for`
    /// iterations, returned values) go through here so they are wrapped
    /// exactly once.
    #[must_use]
    pub fn into_monad(self) -> Node {
        if self.is_monad() {
            return self;
        }
        let line = self.line;
        Node::monad(Some(self)).with_line(line)
    }
}
