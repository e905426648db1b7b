// ABOUTME: Lexical-scope environment chain — Symbol to Value bindings with parent lookup

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::BindingError;
use crate::symbol::Symbol;
use crate::value::Value;

/// One node of a lexical-scope chain. `define` writes into this node only;
/// `find` walks from this node to the root. A Session keeps two of these
/// chains side by side — one for runtime values, one for macro transformers
/// — and they never interact except by both being `Environment`s.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<Symbol, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// A fresh environment with no parent and no bindings.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// A new, empty node whose parent is `parent`. Looking up a name not
    /// defined here falls through to `parent`; defining a name here never
    /// touches `parent`.
    pub fn child(parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// A new node seeded with `bindings`, parented to `parent`. Used to build
    /// a procedure's invocation environment in one step.
    pub fn child_with(
        parent: &Rc<Environment>,
        bindings: impl IntoIterator<Item = (Symbol, Value)>,
    ) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(bindings.into_iter().collect()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Writes `value` into this node, overwriting any existing binding for
    /// `name` in this node. Never touches ancestor nodes — redefining a name
    /// shadows the parent rather than mutating it.
    pub fn define(&self, name: Symbol, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Searches this node, then ancestors; innermost binding wins.
    pub fn find(&self, name: &Symbol) -> Result<Value, BindingError> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.find(name),
            None => Err(BindingError(name.clone())),
        }
    }
}
