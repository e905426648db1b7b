// ABOUTME: Value-kind predicates — nil? boolean? integer? decimal? string? symbol? cons? list?

use crate::error::PrimitiveError;
use crate::session::Session;
use crate::value::Value;

fn check(
    name: &'static str,
    args: &[Value],
    test: impl Fn(&Value) -> bool,
) -> Result<Vec<Value>, crate::error::ActinideError> {
    match args {
        [v] => Ok(vec![Value::Boolean(test(v))]),
        _ => Err(PrimitiveError::arity(name, "1", args.len()).into()),
    }
}

pub fn register(session: &mut Session) {
    session.bind_primitive("nil?", |args| check("nil?", args, Value::is_nil));
    session.bind_primitive("boolean?", |args| {
        check("boolean?", args, |v| matches!(v, Value::Boolean(_)))
    });
    session.bind_primitive("integer?", |args| {
        check("integer?", args, |v| matches!(v, Value::Integer(_)))
    });
    session.bind_primitive("decimal?", |args| {
        check("decimal?", args, |v| matches!(v, Value::Decimal(_)))
    });
    session.bind_primitive("string?", |args| {
        check("string?", args, |v| matches!(v, Value::String(_)))
    });
    session.bind_primitive("symbol?", |args| {
        check("symbol?", args, |v| matches!(v, Value::Symbol(_)))
    });
    session.bind_primitive("cons?", |args| check("cons?", args, Value::is_cons));
    session.bind_primitive("list?", |args| check("list?", args, Value::is_proper_list));
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
    fn predicates_classify_their_own_kind_true() {
        assert_eq!(run("(nil? ())"), "#t");
        assert_eq!(run("(boolean? #t)"), "#t");
        assert_eq!(run("(integer? 1)"), "#t");
        assert_eq!(run("(decimal? 1.5)"), "#t");
        assert_eq!(run("(string? \"hi\")"), "#t");
        assert_eq!(run("(symbol? 'x)"), "#t");
        assert_eq!(run("(cons? (cons 1 2))"), "#t");
        assert_eq!(run("(list? (list 1 2))"), "#t");
    }

    #[test]
    fn predicates_reject_other_kinds() {
        assert_eq!(run("(integer? \"1\")"), "#f");
        assert_eq!(run("(list? (cons 1 2))"), "#f");
    }
}
