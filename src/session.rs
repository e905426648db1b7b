// ABOUTME: Binds symbol table, environments, and the builtin primitive set into one handle

use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Environment;
use crate::error::ActinideError;
use crate::port::{Port, StringPort};
use crate::symbol::{CoreForms, Symbol, SymbolTable};
use crate::value::{Primitive, Value};

/// The running state of one interpreter instance: a symbol table, a value
/// environment, a macro environment, and the pre-interned core special-form
/// symbols. Every public entry point — reading, expanding, evaluating,
/// binding host values — goes through a `Session`.
///
/// The symbol table is `Rc<RefCell<_>>` rather than owned outright: the
/// `read`/`eval`/`expand`/`symbol` primitives (§6.3) are `'static` closures
/// bound into the value environment, and need their own handle onto the same
/// interning state the `Session` that created them uses.
pub struct Session {
    symbols: Rc<RefCell<SymbolTable>>,
    core: CoreForms,
    env: Rc<Environment>,
    macros: Rc<Environment>,
}

impl Session {
    /// A session with no builtins bound — only the six core special forms
    /// are available. Most callers want [`Session::with_builtins`] instead.
    pub fn new() -> Self {
        let mut symbols = SymbolTable::new();
        let core = CoreForms::new(&mut symbols);
        Session {
            symbols: Rc::new(RefCell::new(symbols)),
            core,
            env: Environment::new(),
            macros: Environment::new(),
        }
    }

    /// A session with the full core primitive set (§6.3) already bound.
    pub fn with_builtins() -> Self {
        let mut session = Session::new();
        crate::builtins::register_all(&mut session);
        session
    }

    pub fn symbols(&self) -> &Rc<RefCell<SymbolTable>> {
        &self.symbols
    }

    pub fn core(&self) -> &CoreForms {
        &self.core
    }

    pub fn env(&self) -> &Rc<Environment> {
        &self.env
    }

    pub fn macros(&self) -> &Rc<Environment> {
        &self.macros
    }

    /// Interns `name` through this session's symbol table.
    pub fn intern(&mut self, name: &str) -> Symbol {
        self.symbols.borrow_mut().intern(name)
    }

    /// Binds `value` under `name` in the value environment.
    pub fn bind(&mut self, name: &str, value: Value) {
        let sym = self.intern(name);
        self.env.define(sym, value);
    }

    /// Binds a host callable under `name` in the value environment.
    pub fn bind_primitive(
        &mut self,
        name: &str,
        func: impl Fn(&[Value]) -> Result<Vec<Value>, ActinideError> + 'static,
    ) {
        self.bind(name, Value::Primitive(Rc::new(Primitive::new(name, func))));
    }

    /// Binds `transformer` (a `Procedure` or `Primitive`) as a macro named
    /// `name` in the macro environment.
    pub fn macro_bind(&mut self, name: &str, transformer: Value) {
        let sym = self.intern(name);
        self.macros.define(sym, transformer);
    }

    /// Reads, expands, and evaluates every top-level form in `source` in
    /// order, returning the last form's result values (or an empty vector if
    /// `source` contained no forms, or the last form was a `define`). An
    /// error aborts immediately; whatever `define`s already took effect
    /// remain bound, matching REPL semantics.
    pub fn run(&mut self, source: &str) -> Result<Vec<Value>, ActinideError> {
        let mut port = StringPort::new(source);
        self.run_port(&mut port)
    }

    /// As [`Session::run`], but reads from an arbitrary [`Port`] — used by
    /// the `eval`/`expand` primitives which operate on already-open ports.
    pub fn run_port(&mut self, port: &mut dyn Port) -> Result<Vec<Value>, ActinideError> {
        let mut results = Vec::new();
        loop {
            let form = crate::reader::read(port, &mut self.symbols.borrow_mut())?;
            match form {
                Some(form) => results = self.eval_form(&form)?,
                None => break,
            }
        }
        Ok(results)
    }

    /// Expands and evaluates one already-read form.
    pub fn eval_form(&mut self, form: &Value) -> Result<Vec<Value>, ActinideError> {
        let expanded = self.expand_form(form)?;
        crate::eval::eval(&expanded, &self.core, &self.env, &self.macros)
    }

    /// Expands one already-read form without evaluating it — backs the
    /// `expand` primitive.
    pub fn expand_form(&mut self, form: &Value) -> Result<Value, ActinideError> {
        crate::expander::expand(form, &mut self.symbols.borrow_mut(), &self.core, &self.macros)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::display;

    #[test]
    fn run_evaluates_every_top_level_form_in_order() {
        let mut session = Session::new();
        let results = session.run("(define x 1) (define y 2) (if x y x)").unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn run_with_no_forms_yields_no_values() {
        let mut session = Session::new();
        let results = session.run("   ; just a comment\n").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn bind_makes_a_host_value_visible_to_run() {
        let mut session = Session::new();
        session.bind("answer", Value::Integer(42.into()));
        let results = session.run("answer").unwrap();
        assert_eq!(display(&results[0]), "42");
    }

    #[test]
    fn bind_primitive_makes_a_host_function_callable() {
        let mut session = Session::new();
        session.bind_primitive("inc", |args| match &args[0] {
            Value::Integer(n) => Ok(vec![Value::Integer(n + num_bigint::BigInt::from(1))]),
            _ => panic!("expected integer"),
        });
        let results = session.run("(inc 41)").unwrap();
        assert_eq!(display(&results[0]), "42");
    }

    #[test]
    fn macro_bind_makes_a_transformer_available_to_the_expander() {
        let mut session = Session::new();
        let quote = session.core().quote.clone();
        session.macro_bind(
            "always-nil",
            Value::Primitive(Rc::new(Primitive::new("always-nil", move |_| {
                Ok(vec![crate::value::list(vec![
                    Value::Symbol(quote.clone()),
                    Value::Nil,
                ])])
            }))),
        );
        let results = session.run("(always-nil 1 2 3)").unwrap();
        assert!(matches!(results[0], Value::Nil));
    }

    #[test]
    fn a_failing_form_aborts_but_earlier_defines_persist() {
        let mut session = Session::new();
        assert!(session.run("(define x 1) (undefined-name)").is_err());
        let results = session.run("x").unwrap();
        assert_eq!(display(&results[0]), "1");
    }
}
