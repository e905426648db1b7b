// ABOUTME: Desugars shorthand forms, expands macros to a fixpoint, erases quasiquote

use std::rc::Rc;

use crate::env::Environment;
use crate::error::{ActinideError, ExpansionError};
use crate::symbol::{CoreForms, SymbolTable};
use crate::value::{self, Value};

/// Expands `form` into one built only from literals, symbols, pairs, and the
/// six core special forms (`quote if define define-macro lambda begin`).
/// Macro transformers are invoked here — bound in `macros` — and their
/// single-value result is expanded again until no further macro head
/// remains (a fixpoint).
pub fn expand(
    form: &Value,
    symbols: &mut SymbolTable,
    core: &CoreForms,
    macros: &Rc<Environment>,
) -> Result<Value, ActinideError> {
    if form.is_nil() || !form.is_cons() {
        return Ok(form.clone());
    }

    let head = form.head().expect("checked is_cons above").clone();

    if let Value::Symbol(sym) = &head {
        if *sym == core.quote {
            // Rule 1: left alone, never recurse into the quoted body.
            return Ok(form.clone());
        }
        if *sym == core.if_ {
            let rewritten = expand_if(form, core)?;
            return expand_subforms(&rewritten, symbols, core, macros);
        }
        if *sym == core.define {
            let rewritten = expand_define(form, core)?;
            return expand_subforms(&rewritten, symbols, core, macros);
        }
        if *sym == core.define_macro {
            let rewritten = expand_define(form, core)?;
            return expand_subforms(&rewritten, symbols, core, macros);
        }
        if *sym == core.lambda {
            let rewritten = expand_lambda(form, core)?;
            return expand_subforms(&rewritten, symbols, core, macros);
        }
        if *sym == core.quasiquote {
            let body = form.tail().and_then(|t| t.head()).ok_or_else(|| {
                ExpansionError::Malformed {
                    context: "quasiquote",
                    form: crate::printer::display(form),
                }
            })?;
            let rewritten = expand_quasiquoted(body, core)?;
            return expand_subforms(&rewritten, symbols, core, macros);
        }
        if let Ok(transformer) = macros.find(sym) {
            let args = value::flatten_list(form.tail().expect("checked is_cons above").clone())
                .map_err(ActinideError::from)?;
            let results = crate::eval::call_callable(transformer, args)?;
            if results.len() != 1 {
                return Err(ExpansionError::MacroArity {
                    name: sym.name().to_string(),
                    actual: results.len(),
                }
                .into());
            }
            let expansion = results.into_iter().next().expect("checked len == 1 above");
            return expand(&expansion, symbols, core, macros);
        }
    }

    expand_subforms(form, symbols, core, macros)
}

/// Recurses `expand` over every element of a (possibly improper) list.
fn expand_subforms(
    form: &Value,
    symbols: &mut SymbolTable,
    core: &CoreForms,
    macros: &Rc<Environment>,
) -> Result<Value, ActinideError> {
    match form {
        Value::Nil => Ok(Value::Nil),
        Value::Cons(pair) => {
            let (head, tail) = &**pair;
            let head = expand(head, symbols, core, macros)?;
            let tail = expand_subforms(tail, symbols, core, macros)?;
            Ok(Value::cons(head, tail))
        }
        other => Ok(other.clone()),
    }
}

fn malformed(context: &'static str, form: &Value) -> ActinideError {
    ExpansionError::Malformed {
        context,
        form: crate::printer::display(form),
    }
    .into()
}

/// `(if c t)` → `(if c t ())`; `(if c t f)` is unchanged.
fn expand_if(form: &Value, core: &CoreForms) -> Result<Value, ActinideError> {
    let parts = value::flatten_list(form.clone()).map_err(|_| malformed("if", form))?;
    match parts.as_slice() {
        [head, c, t] => Ok(value::list(vec![head.clone(), c.clone(), t.clone(), Value::Nil])),
        [_, _, _, _] => Ok(form.clone()),
        _ => {
            let _ = core;
            Err(malformed("if", form))
        }
    }
}

/// `(define (f a b …) body …)` → `(define f (lambda (a b …) body …))`, and
/// analogously for `define-macro`. A plain `(define symbol expr)` is
/// unchanged.
fn expand_define(form: &Value, core: &CoreForms) -> Result<Value, ActinideError> {
    let head = form.head().expect("caller checked is_cons").clone();
    let rest = form.tail().expect("caller checked is_cons").clone();
    let target = rest.head().ok_or_else(|| malformed("define", form))?.clone();
    let body = rest.tail().ok_or_else(|| malformed("define", form))?.clone();

    if target.is_cons() {
        let name = target.head().expect("checked is_cons above").clone();
        let formals = target.tail().expect("checked is_cons above").clone();
        let lambda_form = Value::cons(
            Value::Symbol(core.lambda.clone()),
            Value::cons(formals, body),
        );
        return Ok(value::list(vec![head, name, lambda_form]));
    }

    // Plain `(define symbol expr)` — just validate shape, leave unchanged.
    if body.is_nil() || !body.tail().map(|t| t.is_nil()).unwrap_or(false) {
        return Err(malformed("define", form));
    }
    Ok(form.clone())
}

/// `(lambda F)` → `(lambda F (begin))`; `(lambda F e1 e2 …)` →
/// `(lambda F (begin e1 e2 …))`; `(lambda F e)` is unchanged.
fn expand_lambda(form: &Value, core: &CoreForms) -> Result<Value, ActinideError> {
    let head = form.head().expect("caller checked is_cons").clone();
    let rest = form.tail().expect("caller checked is_cons").clone();
    let formals = rest.head().ok_or_else(|| malformed("lambda", form))?.clone();
    let body_forms = rest.tail().ok_or_else(|| malformed("lambda", form))?.clone();

    match &body_forms {
        Value::Nil => {
            let begin_form = value::list(vec![Value::Symbol(core.begin.clone())]);
            Ok(value::list(vec![head, formals, begin_form]))
        }
        Value::Cons(pair) if pair.1.is_nil() => {
            // Exactly one body form — left as-is.
            Ok(form.clone())
        }
        Value::Cons(_) => {
            let mut begin_elems = vec![Value::Symbol(core.begin.clone())];
            begin_elems.extend(value::flatten_list(body_forms).map_err(|_| malformed("lambda", form))?);
            let begin_form = value::list(begin_elems);
            Ok(value::list(vec![head, formals, begin_form]))
        }
        _ => Err(malformed("lambda", form)),
    }
}

/// Recursively erases `quasiquote`/`unquote`/`unquote-splicing` into
/// `quote`/`cons`/`append` calls.
fn expand_quasiquoted(form: &Value, core: &CoreForms) -> Result<Value, ActinideError> {
    match form {
        Value::Nil => Ok(Value::Nil),
        Value::Cons(pair) => {
            let (first, rest) = &**pair;
            if let Value::Symbol(sym) = first {
                if *sym == core.unquote {
                    let next = rest.head().ok_or_else(|| malformed("unquote", form))?;
                    return Ok(next.clone());
                }
            }
            if let Value::Cons(inner) = first {
                let (candidate, body) = &**inner;
                if let Value::Symbol(sym) = candidate {
                    if *sym == core.unquote_splicing {
                        let spliced = body.head().ok_or_else(|| malformed("unquote-splicing", form))?;
                        let expanded_rest = expand_quasiquoted(rest, core)?;
                        return Ok(value::list(vec![
                            Value::Symbol(core.append.clone()),
                            spliced.clone(),
                            expanded_rest,
                        ]));
                    }
                }
            }
            let expanded_head = expand_quasiquoted(first, core)?;
            let expanded_tail = expand_quasiquoted(rest, core)?;
            Ok(value::list(vec![
                Value::Symbol(core.cons.clone()),
                expanded_head,
                expanded_tail,
            ]))
        }
        atom => Ok(value::list(vec![Value::Symbol(core.quote.clone()), atom.clone()])),
    }
}
