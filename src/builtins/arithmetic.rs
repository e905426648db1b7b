// ABOUTME: The four numeric primitives `+ - * /`, with Integer/Decimal promotion (§4.7)

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::{ActinideError, PrimitiveError};
use crate::session::Session;
use crate::value::Value;

/// Either operand kind `+ - * /` accept. Keeping this distinct from `Value`
/// means a caller that already knows both sides are numeric never has to
/// re-match on the other eight `Value` variants.
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

fn to_value(n: Num) -> Value {
    match n {
        Num::Int(i) => Value::Integer(i),
        Num::Dec(d) => Value::Decimal(d),
    }
}

/// Rounds toward negative infinity, unlike `BigInt`'s native `/` which
/// truncates toward zero — matches the original's reliance on Python's
/// `//` operator.
fn floor_div(a: &BigInt, b: &BigInt) -> BigInt {
    let quotient = a / b;
    let remainder = a % b;
    if !remainder.is_zero() && remainder.sign() != b.sign() {
        quotient - BigInt::from(1)
    } else {
        quotient
    }
}

fn reduce(
    name: &'static str,
    args: &[Value],
    int_op: fn(BigInt, BigInt) -> BigInt,
    dec_op: fn(BigDecimal, BigDecimal) -> BigDecimal,
) -> Result<Vec<Value>, ActinideError> {
    let mut nums = args.iter().map(|v| as_num(name, v));
    let first = nums
        .next()
        .ok_or_else(|| PrimitiveError::arity(name, "at least 1", 0))??;
    let result = nums.try_fold(first, |acc, next| {
        let next = next?;
        Ok::<Num, ActinideError>(match (acc, next) {
            (Num::Int(x), Num::Int(y)) => Num::Int(int_op(x, y)),
            (x, y) => Num::Dec(dec_op(as_decimal(x), as_decimal(y))),
        })
    })?;
    Ok(vec![to_value(result)])
}

/// Unlike `reduce`, `/` decides once over the *whole* argument list whether
/// the operation is true division or integer floor division — not per pair.
/// A Decimal appearing anywhere among the operands (not just adjacent to the
/// running accumulator) makes every step true division, matching the
/// original's `truediv if any(decimal_p(v) for v in vals) else floordiv`.
fn reduce_division(name: &'static str, args: &[Value]) -> Result<Vec<Value>, ActinideError> {
    if args.is_empty() {
        return Err(PrimitiveError::arity(name, "at least 1", 0).into());
    }
    let nums = args
        .iter()
        .map(|v| as_num(name, v))
        .collect::<Result<Vec<_>, _>>()?;
    let any_decimal = nums.iter().any(|n| matches!(n, Num::Dec(_)));

    let mut nums = nums.into_iter();
    let first = nums.next().expect("checked non-empty above");

    if any_decimal {
        let first = as_decimal(first);
        let result = nums.fold(first, |acc, next| acc / as_decimal(next));
        Ok(vec![Value::Decimal(result)])
    } else {
        let mut result = match first {
            Num::Int(n) => n,
            Num::Dec(_) => unreachable!("any_decimal already checked"),
        };
        for next in nums {
            let n = match next {
                Num::Int(n) => n,
                Num::Dec(_) => unreachable!("any_decimal already checked"),
            };
            result = floor_div(&result, &n);
        }
        Ok(vec![Value::Integer(result)])
    }
}

pub fn register(session: &mut Session) {
    session.bind_primitive("+", |args| reduce("+", args, |a, b| a + b, |a, b| a + b));

    session.bind_primitive("-", |args| match args {
        [] => Err(PrimitiveError::arity("-", "at least 1", 0).into()),
        [single] => match as_num("-", single)? {
            Num::Int(n) => Ok(vec![Value::Integer(-n)]),
            Num::Dec(n) => Ok(vec![Value::Decimal(-n)]),
        },
        _ => reduce("-", args, |a, b| a - b, |a, b| a - b),
    });

    session.bind_primitive("*", |args| reduce("*", args, |a, b| a * b, |a, b| a * b));

    session.bind_primitive("/", |args| reduce_division("/", args));
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
    fn add_reduces_left_to_right() {
        assert_eq!(run("(+ 1 2 3)"), "6");
    }

    #[test]
    fn subtract_with_one_argument_negates() {
        assert_eq!(run("(- 5)"), "-5");
    }

    #[test]
    fn subtract_with_many_arguments_reduces() {
        assert_eq!(run("(- 10 1 2)"), "7");
    }

    #[test]
    fn mixed_integer_and_decimal_promotes_to_decimal() {
        assert_eq!(run("(+ 1 2.5)"), "3.5");
    }

    #[test]
    fn division_of_integers_floors_toward_negative_infinity() {
        assert_eq!(run("(/ -7 2)"), "-4");
        assert_eq!(run("(/ 7 2)"), "3");
    }

    #[test]
    fn division_with_a_decimal_operand_is_true_division() {
        assert_eq!(run("(/ 7 2.0)"), "3.5");
    }

    #[test]
    fn a_decimal_anywhere_in_the_argument_list_makes_the_whole_division_true_division() {
        // Not per-pair: floor_div(7, 2) = 3, then 3 / 2.0 = 1.5 would be wrong.
        // The presence of 2.0 anywhere promotes every step to true division.
        assert_eq!(run("(/ 7 2 2.0)"), "1.75");
    }
}
