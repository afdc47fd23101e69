//! Scope chain for the interpreter.
//!
//! Each scope owns its bindings in insertion order and links to its parent
//! through a shared handle. The chain ends at the global scope created by the
//! interpreter; callers that walk a chain are handed that root explicitly and
//! compare with [`ScopeRef::ptr_eq`].

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::Value;

/// Single-threaded shared, mutable handle (`Rc<RefCell<T>>`).
///
/// All scope and heap allocations go through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Shared handle to a scope.
pub type ScopeRef = LocalScope<Scope>;

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `var`, `let`, parameters, function declarations.
    Mutable,
    /// `const` and the built-in globals.
    Immutable,
}

/// Error returned by [`Scope::assign`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Binding exists but is `const`.
    Immutable,
    /// No binding with that name anywhere in the chain.
    Undefined,
}

#[derive(Clone, Debug)]
pub struct Binding {
    pub name: String,
    pub value: Value,
    pub mutability: Mutability,
}

/// One link of the scope chain.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: Vec<Binding>,
    index: FxHashMap<String, usize>,
    parent: Option<ScopeRef>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: ScopeRef) -> Self {
        Scope {
            parent: Some(parent),
            ..Scope::default()
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }

    /// Bindings of this scope only, in declaration order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Whether this scope (not its parents) binds `name`.
    pub fn has_own(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Define or redefine `name` in this scope. A redefinition keeps the
    /// binding's original position.
    pub fn define(&mut self, name: &str, value: Value, mutability: Mutability) {
        if let Some(&slot) = self.index.get(name) {
            let binding = &mut self.bindings[slot];
            binding.value = value;
            binding.mutability = mutability;
            return;
        }
        self.index.insert(name.to_owned(), self.bindings.len());
        self.bindings.push(Binding {
            name: name.to_owned(),
            value,
            mutability,
        });
    }

    /// Look up `name` here or in an enclosing scope.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(&slot) = self.index.get(name) {
            return Some(self.bindings[slot].value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Assign to the nearest binding of `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(&slot) = self.index.get(name) {
            let binding = &mut self.bindings[slot];
            if binding.mutability == Mutability::Immutable {
                return Err(AssignError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }
}

impl ScopeRef {
    /// New empty scope whose parent is `self`.
    pub fn child(&self) -> ScopeRef {
        LocalScope::new(Scope::with_parent(self.clone()))
    }

    /// Parent handle, if any.
    pub fn parent_scope(&self) -> Option<ScopeRef> {
        self.borrow().parent.clone()
    }
}
