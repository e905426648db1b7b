// ABOUTME: Reader/printer access exposed as callables — read eval expand display symbol (§6.3)

use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Environment;
use crate::error::PrimitiveError;
use crate::session::Session;
use crate::symbol::{CoreForms, SymbolTable};
use crate::value::Value;

/// Unlike every other builtin module, these primitives need a handle onto the
/// session's own interning/evaluation state rather than just their own
/// arguments — they are how Actinide source calls back into its own reader,
/// expander, and evaluator (mirroring the original's `Session.read`/`eval`
/// methods, exposed here as ordinary callables per `spec.md` §6.3 rather than
/// as host-only methods). Each closure below captures `Rc` clones of the
/// same symbol table and environments the `Session` that registers them
/// already owns, so `(eval (quote (define x 1)))` defines `x` in the same
/// global environment a direct `(define x 1)` would.
pub fn register(session: &mut Session) {
    let symbols = Rc::clone(session.symbols());
    let core = session.core().clone();
    let env = Rc::clone(session.env());
    let macros = Rc::clone(session.macros());

    register_read(session, Rc::clone(&symbols));
    register_eval(session, core.clone(), Rc::clone(&env), Rc::clone(&macros));
    register_expand(session, symbols.clone(), core, macros);
    register_display(session);
    register_symbol(session, symbols);
}

fn register_read(session: &mut Session, symbols: Rc<RefCell<SymbolTable>>) {
    session.bind_primitive("read", move |args| match args {
        [Value::Port(port)] => {
            let form = crate::reader::read(&mut *port.borrow_mut(), &mut symbols.borrow_mut())?;
            Ok(form.into_iter().collect())
        }
        [other] => Err(PrimitiveError::type_mismatch("read", "port", other).into()),
        _ => Err(PrimitiveError::arity("read", "1", args.len()).into()),
    });
}

/// Evaluates an already-expanded core form. Expansion happens once, in
/// `read`/`Session::run` — `eval` does not re-expand its argument, matching
/// the original's `Session.eval` calling `evaluator.eval` directly.
fn register_eval(
    session: &mut Session,
    core: CoreForms,
    env: Rc<Environment>,
    macros: Rc<Environment>,
) {
    session.bind_primitive("eval", move |args| match args {
        [form] => crate::eval::eval(form, &core, &env, &macros),
        _ => Err(PrimitiveError::arity("eval", "1", args.len()).into()),
    });
}

fn register_expand(
    session: &mut Session,
    symbols: Rc<RefCell<SymbolTable>>,
    core: CoreForms,
    macros: Rc<Environment>,
) {
    session.bind_primitive("expand", move |args| match args {
        [form] => {
            let expanded =
                crate::expander::expand(form, &mut symbols.borrow_mut(), &core, &macros)?;
            Ok(vec![expanded])
        }
        _ => Err(PrimitiveError::arity("expand", "1", args.len()).into()),
    });
}

fn register_display(session: &mut Session) {
    session.bind_primitive("display", |args| match args {
        [v] => Ok(vec![Value::string(crate::printer::display(v))]),
        _ => Err(PrimitiveError::arity("display", "1", args.len()).into()),
    });
}

fn register_symbol(session: &mut Session, symbols: Rc<RefCell<SymbolTable>>) {
    session.bind_primitive("symbol", move |args| match args {
        [Value::String(s)] => Ok(vec![Value::Symbol(symbols.borrow_mut().intern(s))]),
        [other] => Err(PrimitiveError::type_mismatch("symbol", "string", other).into()),
        _ => Err(PrimitiveError::arity("symbol", "1", args.len()).into()),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::display;

    fn run(source: &str) -> String {
        let mut session = Session::with_builtins();
        let results = session.run(source).unwrap();
        display(&results[0])
    }

    #[test]
    fn eval_runs_an_already_expanded_form() {
        assert_eq!(run("(eval (quote (+ 1 2)))"), "3");
    }

    #[test]
    fn eval_of_a_define_is_visible_afterward() {
        let mut session = Session::with_builtins();
        session.run("(eval (quote (define x 42)))").unwrap();
        let results = session.run("x").unwrap();
        assert_eq!(display(&results[0]), "42");
    }

    #[test]
    fn expand_desugars_without_evaluating() {
        assert_eq!(run("(expand (quote (if a b)))"), "(if a b ())");
    }

    #[test]
    fn read_parses_one_form_from_a_port() {
        assert_eq!(run("(read (string->input-port \"(1 2 3)\"))"), "(1 2 3)");
    }

    #[test]
    fn read_at_eof_yields_no_values() {
        let mut session = Session::with_builtins();
        let results = session.run("(read (string->input-port \"\"))").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn display_renders_readable_text() {
        assert_eq!(run("(display (list 1 2))"), "\"(1 2)\"");
    }

    #[test]
    fn symbol_interns_a_string() {
        assert_eq!(run("(symbol? (symbol \"foo\"))"), "#t");
    }
}
