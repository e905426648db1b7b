// ABOUTME: `and`/`or` as short-circuiting macros (§9: "the variadding short-circuiting variant … is the intended contract")

use std::rc::Rc;

use crate::session::Session;
use crate::symbol::Symbol;
use crate::value::{self, Primitive, Value};

/// `and`/`or` are listed among the core primitives (§6.3), but a `Primitive`
/// can never short-circuit — its arguments are fully evaluated, left to
/// right, before the primitive function ever runs (§4.6 rule 10). Honoring
/// the variadic short-circuiting contract that §9 calls "the intended
/// contract" means binding these as macro transformers instead: each
/// expansion unfolds one step of the chain and leaves the rest for the
/// expander's fixpoint to keep unfolding.
pub fn register(session: &mut Session) {
    let if_sym = session.core().if_.clone();
    let and_sym = session.intern("and");
    session.macro_bind("and", and_transformer(if_sym.clone(), and_sym));

    let or_sym = session.intern("or");
    session.macro_bind("or", or_transformer(if_sym, or_sym));
}

/// `(and)` → `#t`; `(and e)` → `e`; `(and e1 e2 …)` → `(if e1 (and e2 …) #f)`.
fn and_transformer(if_sym: Symbol, and_sym: Symbol) -> Value {
    Value::Primitive(Rc::new(Primitive::new("and", move |args| {
        let expansion = match args {
            [] => Value::Boolean(true),
            [only] => only.clone(),
            [first, rest @ ..] => {
                let mut recur = vec![Value::Symbol(and_sym.clone())];
                recur.extend(rest.iter().cloned());
                value::list(vec![
                    Value::Symbol(if_sym.clone()),
                    first.clone(),
                    value::list(recur),
                    Value::Boolean(false),
                ])
            }
        };
        Ok(vec![expansion])
    })))
}

/// `(or)` → `#f`; `(or e)` → `e`; `(or e1 e2 …)` →
/// `((lambda (or-head) (if or-head or-head (or e2 …))) e1)` — the lambda
/// binds `e1`'s value once so it is neither re-evaluated nor duplicated in
/// the expansion (plain, non-hygienic binding is all macros are specified to
/// provide here; see spec.md §9's Non-goals on hygiene).
fn or_transformer(if_sym: Symbol, or_sym: Symbol) -> Value {
    Value::Primitive(Rc::new(Primitive::new("or", move |args| {
        let expansion = match args {
            [] => Value::Boolean(false),
            [only] => only.clone(),
            [first, rest @ ..] => {
                let tmp = Value::Symbol(or_sym.clone());
                let mut recur = vec![Value::Symbol(or_sym.clone())];
                recur.extend(rest.iter().cloned());
                let lambda_body = value::list(vec![
                    Value::Symbol(if_sym.clone()),
                    tmp.clone(),
                    tmp.clone(),
                    value::list(recur),
                ]);
                let lambda = value::list(vec![
                    Value::Symbol(crate::symbol::Symbol::clone(&or_sym)),
                    value::list(vec![tmp]),
                    lambda_body,
                ]);
                value::list(vec![lambda, first.clone()])
            }
        };
        Ok(vec![expansion])
    })))
}
