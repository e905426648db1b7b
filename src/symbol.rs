// ABOUTME: Symbol interning — identifier text to unique, identity-comparable symbols

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// An interned identifier. Two symbols are equal iff they were interned from
/// the same slot of the same `SymbolTable` — comparison is a pointer check,
/// never a string comparison.
#[derive(Clone)]
pub struct Symbol(Rc<str>);

impl Symbol {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as *const () as usize).hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// Interns identifier text to `Symbol`s with get-or-insert semantics: looking
/// up an absent key creates and stores a new symbol. Lives as long as the
/// owning `Session`.
#[derive(Default)]
pub struct SymbolTable {
    table: HashMap<Rc<str>, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            table: HashMap::new(),
        }
    }

    /// Interns `name`, returning the existing symbol if this table has
    /// already seen this text, or minting and storing a new one otherwise.
    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(sym) = self.table.get(name) {
            return sym.clone();
        }
        let text: Rc<str> = Rc::from(name);
        let sym = Symbol(text.clone());
        self.table.insert(text, sym.clone());
        sym
    }
}

/// The symbols naming every core special form and the quasiquote-erasure
/// helpers, interned once per `SymbolTable` so the expander and evaluator can
/// dispatch on special-form heads by symbol identity rather than by
/// comparing text at every check.
#[derive(Clone)]
pub struct CoreForms {
    pub quote: Symbol,
    pub if_: Symbol,
    pub define: Symbol,
    pub define_macro: Symbol,
    pub lambda: Symbol,
    pub begin: Symbol,
    pub quasiquote: Symbol,
    pub unquote: Symbol,
    pub unquote_splicing: Symbol,
    pub append: Symbol,
    pub cons: Symbol,
}

impl CoreForms {
    pub fn new(symbols: &mut SymbolTable) -> Self {
        CoreForms {
            quote: symbols.intern("quote"),
            if_: symbols.intern("if"),
            define: symbols.intern("define"),
            define_macro: symbols.intern("define-macro"),
            lambda: symbols.intern("lambda"),
            begin: symbols.intern("begin"),
            quasiquote: symbols.intern("quasiquote"),
            unquote: symbols.intern("unquote"),
            unquote_splicing: symbols.intern("unquote-splicing"),
            append: symbols.intern("append"),
            cons: symbols.intern("cons"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_the_same_text_twice_yields_equal_symbols() {
        let mut symbols = SymbolTable::new();
        let a = symbols.intern("foo");
        let b = symbols.intern("foo");
        assert_eq!(a, b);
    }

    #[test]
    fn interning_different_text_yields_distinct_symbols() {
        let mut symbols = SymbolTable::new();
        let a = symbols.intern("foo");
        let b = symbols.intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn symbols_from_different_tables_are_never_equal() {
        let mut t1 = SymbolTable::new();
        let mut t2 = SymbolTable::new();
        let a = t1.intern("foo");
        let b = t2.intern("foo");
        assert_ne!(a, b, "identity is scoped to a single table, not text");
    }

    #[test]
    fn name_returns_original_text() {
        let mut symbols = SymbolTable::new();
        let s = symbols.intern("hello-world?");
        assert_eq!(s.name(), "hello-world?");
    }
}
