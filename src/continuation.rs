// ABOUTME: Continuation factories and the trampoline that steps them to quiescence

use std::rc::Rc;

use crate::env::Environment;
use crate::error::ActinideError;
use crate::procedure::Procedure;
use crate::value::Value;

/// Which environment chain a `bind` continuation writes into.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Target {
    Value,
    Macro,
}

/// The evaluator never recurses the host stack to invoke the next step: a
/// continuation is called, and returns the *next* continuation (or `None`
/// for "no more work") plus the environment, macro environment, and argument
/// values that step should run with. The trampoline in [`run`] is the only
/// place that actually calls one of these in a loop.
pub type Continuation = Rc<dyn Fn(Rc<Environment>, Rc<Environment>, Vec<Value>) -> StepResult>;

pub type StepResult =
    Result<(Option<Continuation>, Rc<Environment>, Rc<Environment>, Vec<Value>), ActinideError>;

/// Reduces a continuation chain to its final values. This is the only place
/// in the crate that drives evaluation with a loop instead of recursion:
/// every continuation factory below returns control here instead of calling
/// the next step directly, so arbitrarily deep tail recursion costs no host
/// stack.
pub fn run(
    k0: Option<Continuation>,
    env0: Rc<Environment>,
    macros0: Rc<Environment>,
    args0: Vec<Value>,
) -> Result<Vec<Value>, ActinideError> {
    let mut k = k0;
    let mut env = env0;
    let mut macros = macros0;
    let mut args = args0;
    while let Some(cont) = k {
        let (next_k, next_env, next_macros, next_args) = cont(env, macros, args)?;
        k = next_k;
        env = next_env;
        macros = next_macros;
        args = next_args;
    }
    Ok(args)
}

/// Emits `value` verbatim and chains to `phi`. Implements evaluation of
/// self-evaluating literals.
pub fn literal(value: Value, phi: Option<Continuation>) -> Continuation {
    Rc::new(move |env, macros, _args| Ok((phi.clone(), env, macros, vec![value.clone()])))
}

/// Looks up `name` in the value environment, emits the result, and chains to
/// `phi`. Implements evaluation of symbol references.
pub fn lookup(name: crate::symbol::Symbol, phi: Option<Continuation>) -> Continuation {
    Rc::new(move |env, macros, _args| {
        let value = env.find(&name)?;
        Ok((phi.clone(), env, macros, vec![value]))
    })
}

/// Consumes one value; if it is truthy, chains to `on_true`, else to
/// `on_false`. No values are passed onward — each branch is itself a
/// complete continuation chain built for its side of the `if`.
pub fn branch(on_true: Continuation, on_false: Continuation) -> Continuation {
    Rc::new(move |env, macros, mut args| {
        let test = args.pop().unwrap_or(Value::Boolean(false));
        let target = if crate::value::is_truthy(&test) {
            on_true.clone()
        } else {
            on_false.clone()
        };
        Ok((Some(target), env, macros, vec![]))
    })
}

/// Consumes one value and writes it into the value or macro environment
/// (per `target`) under `name`, then chains to `phi` with no values.
/// Implements `define` and `define-macro` once their right-hand side has
/// been evaluated.
pub fn bind(
    name: crate::symbol::Symbol,
    target: Target,
    phi: Option<Continuation>,
) -> Continuation {
    Rc::new(move |env, macros, mut args| {
        let value = args.pop().unwrap_or(Value::Nil);
        match target {
            Target::Value => env.define(name.clone(), value),
            Target::Macro => macros.define(name.clone(), value),
        }
        Ok((phi.clone(), env, macros, vec![]))
    })
}

/// Prepends a precomputed value list to whatever values this continuation
/// receives, then chains to `phi`. Used while evaluating the elements of a
/// list left-to-right: each step's result is glued onto the accumulator built
/// so far, with multi-value primitive results naturally splicing in.
pub fn append(prefix: Vec<Value>, phi: Continuation) -> Continuation {
    Rc::new(move |env, macros, args| {
        let mut values = prefix.clone();
        values.extend(args);
        Ok((Some(phi.clone()), env, macros, values))
    })
}

/// Keeps only the last value received (or none, if none were received), then
/// chains to `phi`. Implements the result-collapsing of a `begin` body.
pub fn begin(phi: Option<Continuation>) -> Continuation {
    Rc::new(move |env, macros, mut args| {
        let last = args.pop();
        Ok((phi.clone(), env, macros, last.into_iter().collect()))
    })
}

/// Consumes `(callee, args...)`. A `Primitive` callee is invoked directly and
/// its result values chain to `phi`. A `Procedure` callee has its invocation
/// environment and a fresh macro-environment child built, then jumps to the
/// procedure's precompiled body continuation, wrapped so that `phi` and the
/// caller's environments are restored when that body completes (see
/// [`tail_graft`]).
pub fn invoke(phi: Option<Continuation>) -> Continuation {
    Rc::new(move |env, macros, mut args| {
        if args.is_empty() {
            return Err(crate::error::EvalError::NotCallable("()".to_string()).into());
        }
        let callee = args.remove(0);
        match callee {
            Value::Primitive(prim) => {
                let results = (prim.func)(&args)?;
                Ok((phi.clone(), env, macros, results))
            }
            Value::Procedure(proc) => {
                let call_env = proc.invocation_environment(args)?;
                let call_macros = Environment::child(&proc.captured_macros);
                let return_cont = tail_graft(
                    phi.clone(),
                    Rc::clone(&env),
                    Rc::clone(&macros),
                    Rc::clone(&proc.precompiled),
                );
                Ok((Some(return_cont), call_env, call_macros, vec![]))
            }
            other => Err(crate::error::EvalError::NotCallable(crate::printer::display(&other)).into()),
        }
    })
}

/// Wraps `guarded` so that, once it eventually chains to `None` (its body is
/// exhausted), control returns to `phi` under the caller's `caller_env` and
/// `caller_macros` instead of whatever environment the callee left behind.
/// Intermediate continuations produced by `guarded` are recursively re-wrapped
/// by the same rule, so a nested, non-tail call made partway through the
/// callee still restores the correct environment when *it* completes.
///
/// If `phi` is `None`, this is itself a tail call: the caller's frame is
/// already gone, so `guarded` is returned unchanged and runs directly against
/// the trampoline with no wrapping at all — this is the mechanism that makes
/// tail calls free of host-stack growth.
pub fn tail_graft(
    phi: Option<Continuation>,
    caller_env: Rc<Environment>,
    caller_macros: Rc<Environment>,
    guarded: Continuation,
) -> Continuation {
    let phi = match phi {
        None => return guarded,
        Some(phi) => phi,
    };
    Rc::new(move |env, macros, args| {
        let (next, env, macros, args) = guarded(env, macros, args)?;
        match next {
            None => Ok((Some(phi.clone()), Rc::clone(&caller_env), Rc::clone(&caller_macros), args)),
            Some(next) => {
                let wrapped = tail_graft(
                    Some(phi.clone()),
                    Rc::clone(&caller_env),
                    Rc::clone(&caller_macros),
                    next,
                );
                Ok((Some(wrapped), env, macros, args))
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolTable;

    #[test]
    fn literal_emits_verbatim_and_ignores_input_args() {
        let env = Environment::new();
        let macros = Environment::new();
        let k = literal(Value::Integer(7.into()), None);
        let result = run(Some(k), env, macros, vec![Value::Boolean(true)]).unwrap();
        assert_eq!(result.len(), 1);
        match &result[0] {
            Value::Integer(n) => assert_eq!(*n, 7.into()),
            _ => panic!("expected Integer(7)"),
        }
    }

    #[test]
    fn lookup_finds_bound_value() {
        let mut symbols = SymbolTable::new();
        let x = symbols.intern("x");
        let env = Environment::new();
        env.define(x.clone(), Value::Integer(10.into()));
        let macros = Environment::new();
        let k = lookup(x, None);
        let result = run(Some(k), env, macros, vec![]).unwrap();
        match &result[0] {
            Value::Integer(n) => assert_eq!(*n, 10.into()),
            _ => panic!("expected Integer(10)"),
        }
    }

    #[test]
    fn branch_picks_true_side_for_truthy_value() {
        let env = Environment::new();
        let macros = Environment::new();
        let on_true = literal(Value::string("yes"), None);
        let on_false = literal(Value::string("no"), None);
        let k = branch(on_true, on_false);
        let result = run(Some(k), env, macros, vec![Value::Boolean(true)]).unwrap();
        match &result[0] {
            Value::String(s) => assert_eq!(&**s, "yes"),
            _ => panic!("expected 'yes'"),
        }
    }

    #[test]
    fn branch_treats_only_false_boolean_as_falsy() {
        let env = Environment::new();
        let macros = Environment::new();
        let on_true = literal(Value::string("yes"), None);
        let on_false = literal(Value::string("no"), None);
        let k = branch(on_true, on_false);
        // Nil is truthy per spec.md §9.
        let result = run(Some(k), env, macros, vec![Value::Nil]).unwrap();
        match &result[0] {
            Value::String(s) => assert_eq!(&**s, "yes"),
            _ => panic!("Nil must be truthy"),
        }
    }

    #[test]
    fn bind_writes_into_value_environment() {
        let mut symbols = SymbolTable::new();
        let x = symbols.intern("x");
        let env = Environment::new();
        let macros = Environment::new();
        let k = bind(x.clone(), Target::Value, None);
        let result = run(Some(k), Rc::clone(&env), macros, vec![Value::Integer(5.into())]).unwrap();
        assert!(result.is_empty());
        assert!(matches!(env.find(&x), Ok(Value::Integer(_))));
    }

    #[test]
    fn begin_keeps_only_the_last_value() {
        let env = Environment::new();
        let macros = Environment::new();
        let k = begin(None);
        let result = run(
            Some(k),
            env,
            macros,
            vec![
                Value::Integer(1.into()),
                Value::Integer(2.into()),
                Value::Integer(3.into()),
            ],
        )
        .unwrap();
        assert_eq!(result.len(), 1);
        match &result[0] {
            Value::Integer(n) => assert_eq!(*n, 3.into()),
            _ => panic!("expected Integer(3)"),
        }
    }

    #[test]
    fn begin_with_no_values_yields_none() {
        let env = Environment::new();
        let macros = Environment::new();
        let k = begin(None);
        let result = run(Some(k), env, macros, vec![]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn append_prepends_prefix_to_received_args() {
        let env = Environment::new();
        let macros = Environment::new();
        let tail = literal(Value::Nil, None);
        // append's own literal(Nil) ignores input, so test append's splicing
        // behavior directly against a terminal continuation that just returns.
        let terminal: Continuation = Rc::new(|env, macros, args| Ok((None, env, macros, args)));
        let k = append(vec![Value::Integer(1.into())], terminal);
        let result = run(Some(k), env, macros, vec![Value::Integer(2.into())]).unwrap();
        assert_eq!(result.len(), 2);
        let _ = tail;
    }

    #[test]
    fn invoke_calls_primitive_and_chains_results() {
        let env = Environment::new();
        let macros = Environment::new();
        let prim = Value::Primitive(Rc::new(crate::value::Primitive::new("inc", |args| {
            match &args[0] {
                Value::Integer(n) => Ok(vec![Value::Integer(n + num_bigint::BigInt::from(1))]),
                _ => panic!("expected integer"),
            }
        })));
        let k = invoke(None);
        let result = run(Some(k), env, macros, vec![prim, Value::Integer(41.into())]).unwrap();
        match &result[0] {
            Value::Integer(n) => assert_eq!(*n, 42.into()),
            _ => panic!("expected Integer(42)"),
        }
    }
}
