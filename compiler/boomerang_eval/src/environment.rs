//! Lexical scopes for the interpreter.
//!
//! Scopes live in an arena owned by [`Environment`] and are addressed by
//! [`ScopeId`]. Each scope points at its lexical parent, which for a function
//! call is the scope the function literal was evaluated in, not the caller's.
//! Scopes are pushed and popped in LIFO order; a popped scope is reclaimed
//! when it is the newest scope in the arena and no function value captured
//! it. Captured scopes stay for the lifetime of the environment.

use rustc_hash::FxHashMap;

use boomerang_ir::{Node, ScopeId};

/// What a scope was opened for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// The root scope.
    Global,
    /// A block, `when` arm or loop iteration.
    Block,
    /// Parameters and locals of a function call.
    Activation,
}

impl ScopeKind {
    /// Assignment never updates a binding beyond the nearest boundary.
    #[inline]
    fn is_boundary(self) -> bool {
        matches!(self, ScopeKind::Global | ScopeKind::Activation)
    }
}

/// A single scope containing variable bindings.
#[derive(Clone, Debug)]
pub struct Scope {
    bindings: FxHashMap<String, Node>,
    parent: Option<ScopeId>,
    kind: ScopeKind,
    /// Set once a function value holds this scope.
    captured: bool,
}

impl Scope {
    fn new(parent: Option<ScopeId>, kind: ScopeKind) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent,
            kind,
            captured: false,
        }
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }
}

/// Arena of scopes plus the scope evaluation currently happens in.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl Environment {
    /// Create an environment holding only the global scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new(None, ScopeKind::Global)],
            current: ScopeId::GLOBAL,
        }
    }

    /// The scope evaluation currently happens in.
    #[inline]
    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Number of scopes held by the arena.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    /// Open a scope whose lexical parent is `parent` and make it current.
    ///
    /// Returns the scope that was current before, to be handed back to
    /// [`Environment::pop_scope`].
    pub fn push_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let previous = self.current;
        let id = ScopeId::new(u32::try_from(self.scopes.len()).unwrap_or(u32::MAX));
        self.scopes.push(Scope::new(Some(parent), kind));
        self.current = id;
        tracing::trace!(scope = id.raw(), parent = parent.raw(), ?kind, "push scope");
        previous
    }

    /// Leave the current scope and restore `previous`.
    pub fn pop_scope(&mut self, previous: ScopeId) {
        let leaving = self.current;
        let reclaim = leaving.index() + 1 == self.scopes.len()
            && leaving != ScopeId::GLOBAL
            && self.scopes.last().is_some_and(|scope| !scope.captured);
        if reclaim {
            self.scopes.pop();
        }
        tracing::trace!(scope = leaving.raw(), reclaim, "pop scope");
        self.current = previous;
    }

    /// Mark the current scope as captured by a function value and return it.
    pub fn capture(&mut self) -> ScopeId {
        if let Some(scope) = self.scopes.get_mut(self.current.index()) {
            scope.captured = true;
        }
        self.current
    }

    /// Define (or overwrite) a binding in the current scope.
    #[inline]
    pub fn define(&mut self, name: &str, value: Node) {
        if let Some(scope) = self.scopes.get_mut(self.current.index()) {
            scope.bindings.insert(name.to_string(), value);
        }
    }

    /// Look up a binding visible from the current scope.
    pub fn lookup(&self, name: &str) -> Option<&Node> {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            let scope = self.scopes.get(id.index())?;
            if let Some(value) = scope.bindings.get(name) {
                return Some(value);
            }
            cursor = scope.parent;
        }
        None
    }

    /// Assign to `name`.
    ///
    /// Updates the binding found between the current scope and the nearest
    /// global or activation scope, inclusive. Without one, the name is
    /// defined in the current scope.
    pub fn assign(&mut self, name: &str, value: Node) {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            let Some(scope) = self.scopes.get_mut(id.index()) else {
                break;
            };
            if let Some(slot) = scope.bindings.get_mut(name) {
                *slot = value;
                return;
            }
            if scope.kind.is_boundary() {
                break;
            }
            cursor = scope.parent;
        }
        self.define(name, value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
