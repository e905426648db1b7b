// ABOUTME: List constructors and traversal — cons head tail list length append uncons

use crate::error::{ActinideError, PrimitiveError};
use crate::session::Session;
use crate::value::{self, Value};

fn append_values(name: &'static str, args: &[Value]) -> Result<Value, ActinideError> {
    match args {
        [] => Err(PrimitiveError::arity(name, "at least 1", 0).into()),
        [only] => Ok(only.clone()),
        [first, rest @ ..] => {
            let elems = value::flatten_list(first.clone())
                .map_err(|_| PrimitiveError::type_mismatch(name, "list", first))?;
            let tail = append_values(name, rest)?;
            Ok(elems
                .into_iter()
                .rev()
                .fold(tail, |acc, item| Value::cons(item, acc)))
        }
    }
}

pub fn register(session: &mut Session) {
    session.bind_primitive("cons", |args| match args {
        [a, b] => Ok(vec![Value::cons(a.clone(), b.clone())]),
        _ => Err(PrimitiveError::arity("cons", "2", args.len()).into()),
    });

    session.bind_primitive("head", |args| match args {
        [Value::Cons(pair)] => Ok(vec![pair.0.clone()]),
        [other] => Err(PrimitiveError::type_mismatch("head", "cons", other).into()),
        _ => Err(PrimitiveError::arity("head", "1", args.len()).into()),
    });

    session.bind_primitive("tail", |args| match args {
        [Value::Cons(pair)] => Ok(vec![pair.1.clone()]),
        [other] => Err(PrimitiveError::type_mismatch("tail", "cons", other).into()),
        _ => Err(PrimitiveError::arity("tail", "1", args.len()).into()),
    });

    session.bind_primitive("uncons", |args| match args {
        [Value::Cons(pair)] => Ok(vec![pair.0.clone(), pair.1.clone()]),
        [other] => Err(PrimitiveError::type_mismatch("uncons", "cons", other).into()),
        _ => Err(PrimitiveError::arity("uncons", "1", args.len()).into()),
    });

    session.bind_primitive("list", |args| Ok(vec![value::list(args.to_vec())]));

    session.bind_primitive("length", |args| match args {
        [v] => {
            let items = value::flatten_list(v.clone())
                .map_err(|_| PrimitiveError::type_mismatch("length", "list", v))?;
            Ok(vec![Value::Integer(items.len().into())])
        }
        _ => Err(PrimitiveError::arity("length", "1", args.len()).into()),
    });

    session.bind_primitive("append", |args| Ok(vec![append_values("append", args)?]));

    session.bind_primitive("concat", |args| {
        let mut out = String::new();
        for arg in args {
            match arg {
                Value::String(s) => out.push_str(s),
                other => return Err(PrimitiveError::type_mismatch("concat", "string", other).into()),
            }
        }
        Ok(vec![Value::string(out)])
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
    fn cons_head_tail_round_trip() {
        assert_eq!(run("(head (cons 1 2))"), "1");
        assert_eq!(run("(tail (cons 1 2))"), "2");
    }

    #[test]
    fn list_builds_a_proper_list() {
        assert_eq!(run("(list 1 2 3)"), "(1 2 3)");
    }

    #[test]
    fn length_counts_proper_list_elements() {
        assert_eq!(run("(length (list 1 2 3))"), "3");
    }

    #[test]
    fn append_concatenates_and_preserves_a_dotted_tail() {
        assert_eq!(run("(append (list 1 2) (list 3 4))"), "(1 2 3 4)");
        assert_eq!(run("(append (list 1) 2)"), "(1 . 2)");
    }

    #[test]
    fn concat_joins_strings() {
        assert_eq!(run("(concat \"a\" \"b\" \"c\")"), "\"abc\"");
    }
}
