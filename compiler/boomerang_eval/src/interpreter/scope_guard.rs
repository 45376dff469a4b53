//! RAII scope management for the interpreter.
//!
//! [`ScopedInterpreter`] opens a scope on creation and restores the previous
//! scope when dropped, so every exit path out of a block, loop iteration or
//! call (including `?` on an error) leaves the environment where it was.
//!
//! ```text
//! self.with_env_scope(parent, ScopeKind::Block, |scoped| {
//!     scoped.env.define(name, value);
//!     scoped.eval_statements(body, ctx)
//! })
//! ```

use std::ops::{Deref, DerefMut};

use boomerang_ir::{Node, ScopeId};

use super::Interpreter;
use crate::environment::ScopeKind;

/// Guard that pops its scope on drop. Derefs to the interpreter.
pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
    previous: ScopeId,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope(self.previous);
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Open a scope under `parent` that lasts as long as the returned guard.
    pub fn scoped(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopedInterpreter<'_> {
        let previous = self.env.push_scope(parent, kind);
        ScopedInterpreter {
            interpreter: self,
            previous,
        }
    }

    /// Run `f` in a fresh scope under `parent`.
    pub fn with_env_scope<T, F>(&mut self, parent: ScopeId, kind: ScopeKind, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped(parent, kind);
        f(&mut scoped)
    }

    /// Run `f` in a fresh block scope nested in the current one.
    pub fn with_block_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let parent = self.env.current();
        self.with_env_scope(parent, ScopeKind::Block, f)
    }

    /// Run `f` in a fresh block scope holding `bindings`.
    pub fn with_bindings<'n, T, F, I>(&mut self, bindings: I, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
        I: IntoIterator<Item = (&'n str, Node)>,
    {
        self.with_block_scope(|scoped| {
            for (name, value) in bindings {
                scoped.env.define(name, value);
            }
            f(scoped)
        })
    }
}
