// ABOUTME: Binary comparisons `= != < <= > >=` plus eq?/equal?/not (§4.7, §6.3)

use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::error::{ActinideError, PrimitiveError};
use crate::session::Session;
use crate::value::{self, Value};

enum Num {
    Int(BigInt),
    Dec(BigDecimal),
}

fn as_num(name: &str, v: &Value) -> Result<Num, ActinideError> {
    match v {
        Value::Integer(n) => Ok(Num::Int(n.clone())),
        Value::Decimal(n) => Ok(Num::Dec(n.clone())),
        other => Err(PrimitiveError::type_mismatch(name, "integer or decimal", other).into()),
    }
}

fn as_decimal(n: Num) -> BigDecimal {
    match n {
        Num::Int(i) => BigDecimal::new(i, 0),
        Num::Dec(d) => d,
    }
}

fn binary<'a>(name: &str, args: &'a [Value]) -> Result<(&'a Value, &'a Value), ActinideError> {
    match args {
        [a, b] => Ok((a, b)),
        _ => Err(PrimitiveError::arity(name, "2", args.len()).into()),
    }
}

fn numeric_order(name: &str, a: &Value, b: &Value) -> Result<Ordering, ActinideError> {
    match (as_num(name, a)?, as_num(name, b)?) {
        (Num::Int(x), Num::Int(y)) => Ok(x.cmp(&y)),
        (x, y) => Ok(as_decimal(x).cmp(&as_decimal(y))),
    }
}

/// `=`'s notion of "structural equality for primitive values" (spec.md §4.7)
/// still treats `Integer` and `Decimal` as the same numeric domain — `(= 2
/// 2.0)` is `#t`, matching the original's `op.eq`, where `2 == Decimal("2.0")`
/// holds. Only when both operands are numbers does this promote; anything
/// else (including an Integer/Decimal compared against a non-number) falls
/// back to plain structural equality, which is `#f` across different kinds.
fn equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Integer(_) | Value::Decimal(_), Value::Integer(_) | Value::Decimal(_)) => {
            numeric_order("=", a, b)
                .map(|ord| ord == Ordering::Equal)
                .unwrap_or(false)
        }
        _ => value::structurally_equal(a, b),
    }
}

pub fn register(session: &mut Session) {
    session.bind_primitive("=", |args| {
        let (a, b) = binary("=", args)?;
        Ok(vec![Value::Boolean(equals(a, b))])
    });

    session.bind_primitive("!=", |args| {
        let (a, b) = binary("!=", args)?;
        Ok(vec![Value::Boolean(!equals(a, b))])
    });

    session.bind_primitive("<", |args| {
        let (a, b) = binary("<", args)?;
        Ok(vec![Value::Boolean(numeric_order("<", a, b)? == Ordering::Less)])
    });

    session.bind_primitive("<=", |args| {
        let (a, b) = binary("<=", args)?;
        Ok(vec![Value::Boolean(numeric_order("<=", a, b)? != Ordering::Greater)])
    });

    session.bind_primitive(">", |args| {
        let (a, b) = binary(">", args)?;
        Ok(vec![Value::Boolean(numeric_order(">", a, b)? == Ordering::Greater)])
    });

    session.bind_primitive(">=", |args| {
        let (a, b) = binary(">=", args)?;
        Ok(vec![Value::Boolean(numeric_order(">=", a, b)? != Ordering::Less)])
    });

    session.bind_primitive("eq?", |args| {
        let (a, b) = binary("eq?", args)?;
        Ok(vec![Value::Boolean(value::identical(a, b))])
    });

    session.bind_primitive("equal?", |args| {
        let (a, b) = binary("equal?", args)?;
        Ok(vec![Value::Boolean(value::structurally_equal(a, b))])
    });

    session.bind_primitive("not", |args| match args {
        [v] => Ok(vec![Value::Boolean(!value::is_truthy(v))]),
        _ => Err(PrimitiveError::arity("not", "1", args.len()).into()),
    });
}
