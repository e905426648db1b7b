// ABOUTME: Compiled user procedures — parsed formals, captured environments, precompiled body

use std::rc::Rc;

use crate::continuation::Continuation;
use crate::env::Environment;
use crate::error::ProcedureError;
use crate::symbol::Symbol;
use crate::value::{self, Value};

/// A user-defined closure. Everything a `lambda` form needs to be called
/// later is captured here at construction time, including a continuation for
/// its body already compiled against the lexical environment in force when
/// the `lambda` was evaluated — calling a `Procedure` never re-walks its
/// source form.
pub struct Procedure {
    pub body: Value,
    pub formals: Vec<Symbol>,
    pub tail_formal: Option<Symbol>,
    pub captured_env: Rc<Environment>,
    pub captured_macros: Rc<Environment>,
    pub precompiled: Continuation,
}

impl Procedure {
    /// Splits a lambda formal-spec into fixed names and an optional rest
    /// name: `()` has neither; a bare symbol is entirely a rest formal;
    /// `(a b . c)` yields fixed formals `[a, b]` and rest formal `c`.
    pub fn parse_formals(formals: &Value) -> (Vec<Symbol>, Option<Symbol>) {
        let mut names = Vec::new();
        let mut cursor = formals.clone();
        loop {
            match cursor {
                Value::Nil => return (names, None),
                Value::Symbol(rest) => return (names, Some(rest)),
                Value::Cons(pair) => {
                    let (head, tail) = (*pair).clone();
                    match head {
                        Value::Symbol(s) => names.push(s),
                        _ => return (names, None),
                    }
                    cursor = tail;
                }
                _ => return (names, None),
            }
        }
    }

    /// Builds the invocation environment for a call with `args`: fixed
    /// formals bind positionally, any rest formal binds to the remaining
    /// arguments as a list, and the new environment's parent is this
    /// procedure's captured environment (not the caller's).
    pub fn invocation_environment(&self, args: Vec<Value>) -> Result<Rc<Environment>, ProcedureError> {
        let n = self.formals.len();
        let m = args.len();
        if m < n || (m > n && self.tail_formal.is_none()) {
            return Err(ProcedureError {
                procedure: self.display_signature(),
                expected: self.expected_count_description(),
                actual: m,
            });
        }

        let mut args = args;
        let rest = args.split_off(n);
        let mut bindings: Vec<(Symbol, Value)> = self
            .formals
            .iter()
            .cloned()
            .zip(args)
            .collect();
        if let Some(tail_formal) = &self.tail_formal {
            bindings.push((tail_formal.clone(), value::list(rest)));
        }
        Ok(Environment::child_with(&self.captured_env, bindings))
    }

    fn expected_count_description(&self) -> String {
        let n = self.formals.len();
        if self.tail_formal.is_some() {
            format!("at least {}", n)
        } else {
            n.to_string()
        }
    }

    fn display_signature(&self) -> String {
        let formals = self
            .formals
            .iter()
            .map(|s| s.name().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        match &self.tail_formal {
            Some(tail) if self.formals.is_empty() => format!("(lambda {} ...)", tail.name()),
            Some(tail) => format!("(lambda ({} . {}) ...)", formals, tail.name()),
            None => format!("(lambda ({}) ...)", formals),
        }
    }
}
