// ABOUTME: Compiles expanded forms into continuation chains — the eval_to_cont dispatcher

use std::rc::Rc;

use crate::continuation::{self, Continuation, StepResult, Target};
use crate::env::Environment;
use crate::error::{ActinideError, EvalError};
use crate::printer::display;
use crate::procedure::Procedure;
use crate::symbol::CoreForms;
use crate::value::{self, Value};

/// Compiles `form` (already expanded to the six core special forms) into a
/// continuation that, when run, evaluates it and chains its result(s) to
/// `phi`.
pub fn eval_to_cont(
    form: &Value,
    core: &CoreForms,
    phi: Option<Continuation>,
) -> Result<Continuation, ActinideError> {
    let head = match form {
        Value::Symbol(sym) => return Ok(continuation::lookup(sym.clone(), phi)),
        Value::Cons(pair) => pair.0.clone(),
        other => return Ok(continuation::literal(other.clone(), phi)),
    };

    if let Value::Symbol(sym) = &head {
        if *sym == core.quote {
            let quoted = form
                .tail()
                .and_then(|t| t.head())
                .cloned()
                .ok_or_else(|| EvalError::BadQuote(display(form)))?;
            return Ok(continuation::literal(quoted, phi));
        }
        if *sym == core.if_ {
            return compile_if(form, core, phi);
        }
        if *sym == core.define {
            return compile_define(form, core, Target::Value, phi);
        }
        if *sym == core.define_macro {
            return compile_define(form, core, Target::Macro, phi);
        }
        if *sym == core.lambda {
            return compile_lambda(form, core, phi);
        }
        if *sym == core.begin {
            let body = form.tail().expect("cons has a tail").clone();
            if !body.is_proper_list() {
                return Err(EvalError::DottedApplication(display(form)).into());
            }
            return Ok(compile_apply(body, core.clone(), continuation::begin(phi)));
        }
    }

    if !form.is_proper_list() {
        return Err(EvalError::DottedApplication(display(form)).into());
    }
    Ok(compile_apply(
        form.clone(),
        core.clone(),
        continuation::invoke(phi),
    ))
}

fn compile_if(
    form: &Value,
    core: &CoreForms,
    phi: Option<Continuation>,
) -> Result<Continuation, ActinideError> {
    let parts = value::flatten_list(form.clone()).map_err(|_| EvalError::BadIf(display(form)))?;
    let [_, cond, if_true, if_false] =
        <[Value; 4]>::try_from(parts).map_err(|_| EvalError::BadIf(display(form)))?;

    let true_cont = eval_to_cont(&if_true, core, phi.clone())?;
    let false_cont = eval_to_cont(&if_false, core, phi)?;
    let branch_cont = continuation::branch(true_cont, false_cont);
    eval_to_cont(&cond, core, Some(branch_cont))
}

fn compile_define(
    form: &Value,
    core: &CoreForms,
    target: Target,
    phi: Option<Continuation>,
) -> Result<Continuation, ActinideError> {
    let parts = value::flatten_list(form.clone())
        .map_err(|_| EvalError::BadDefineTarget(display(form)))?;
    let [_, name, expr] =
        <[Value; 3]>::try_from(parts).map_err(|_| EvalError::BadDefineTarget(display(form)))?;
    let name = match name {
        Value::Symbol(s) => s,
        other => return Err(EvalError::BadDefineTarget(display(&other)).into()),
    };
    eval_to_cont(&expr, core, Some(continuation::bind(name, target, phi)))
}

/// `(a b . c)`, a bare symbol, or `()` are the only legal formal specs.
fn validate_formals(formals: &Value) -> bool {
    let mut cursor = formals.clone();
    loop {
        match cursor {
            Value::Nil => return true,
            Value::Symbol(_) => return true,
            Value::Cons(pair) => {
                let (head, tail) = (*pair).clone();
                if !matches!(head, Value::Symbol(_)) {
                    return false;
                }
                cursor = tail;
            }
            _ => return false,
        }
    }
}

fn compile_lambda(
    form: &Value,
    core: &CoreForms,
    phi: Option<Continuation>,
) -> Result<Continuation, ActinideError> {
    let rest = form.tail().expect("cons has a tail").clone();
    let formals = rest
        .head()
        .cloned()
        .ok_or_else(|| EvalError::BadFormals(display(form)))?;
    let body = rest
        .tail()
        .and_then(|t| t.head())
        .cloned()
        .ok_or_else(|| EvalError::BadFormals(display(form)))?;

    if !validate_formals(&formals) {
        return Err(EvalError::BadFormals(display(&formals)).into());
    }

    // Compiled once, here, against a `None` target: a procedure's activation
    // always ends its own frame rather than falling through into whatever
    // continuation happened to be compiling the surrounding `lambda` form.
    let precompiled = eval_to_cont(&body, core, None)?;

    Ok(Rc::new(move |env, macros, _args| {
        let (names, tail_formal) = Procedure::parse_formals(&formals);
        let proc = Procedure {
            body: body.clone(),
            formals: names,
            tail_formal,
            captured_env: Rc::clone(&env),
            captured_macros: Rc::clone(&macros),
            precompiled: Rc::clone(&precompiled),
        };
        Ok((
            phi.clone(),
            env,
            macros,
            vec![Value::Procedure(Rc::new(proc))],
        ))
    }))
}

/// Builds a continuation that evaluates every element of a proper list
/// left-to-right, splicing any multi-value primitive results onto the
/// accumulator, and finally chains the fully-flattened argument tuple to
/// `continuation_`. Each step re-derives the continuation for its own head
/// expression at run time rather than once at compile time, because the
/// accumulated-arguments prefix it must chain to is only known once
/// evaluation actually reaches that step.
fn compile_apply(list: Value, core: CoreForms, continuation_: Continuation) -> Continuation {
    if list.is_nil() {
        return Rc::new(move |env, macros, args| {
            Ok((Some(continuation_.clone()), env, macros, args))
        });
    }

    let head = list.head().expect("checked non-nil above").clone();
    let tail = list.tail().expect("checked non-nil above").clone();
    let tail_cont = compile_apply(tail, core.clone(), continuation_);

    Rc::new(
        move |env: Rc<Environment>, macros: Rc<Environment>, args: Vec<Value>| -> StepResult {
            let target = continuation::append(args, tail_cont.clone());
            let head_cont = eval_to_cont(&head, &core, Some(target))?;
            Ok((Some(head_cont), env, macros, vec![]))
        },
    )
}

/// Compiles and runs `form` to completion against fresh, parentless
/// environments — used to invoke a macro transformer (itself a `Procedure`
/// or `Primitive`) on unevaluated argument forms. This is itself a tail call
/// (no continuation to return to), so no environment restoration applies.
pub fn call_callable(callee: Value, args: Vec<Value>) -> Result<Vec<Value>, ActinideError> {
    let env = Environment::new();
    let macros = Environment::new();
    let mut call_args = Vec::with_capacity(args.len() + 1);
    call_args.push(callee);
    call_args.extend(args);
    continuation::run(Some(continuation::invoke(None)), env, macros, call_args)
}

/// Compiles and runs a fully-expanded top-level `form` against `env`/`macros`.
pub fn eval(
    form: &Value,
    core: &CoreForms,
    env: &Rc<Environment>,
    macros: &Rc<Environment>,
) -> Result<Vec<Value>, ActinideError> {
    let compiled = eval_to_cont(form, core, None)?;
    continuation::run(Some(compiled), Rc::clone(env), Rc::clone(macros), vec![])
}
