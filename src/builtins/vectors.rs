// ABOUTME: Mutable vectors — vector vector? vector-length vector-get vector-set vector-add, list<->vector

use std::cell::RefCell;
use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::error::PrimitiveError;
use crate::session::Session;
use crate::value::{self, Value};

fn as_index(name: &'static str, v: &Value, len: usize) -> Result<usize, crate::error::ActinideError> {
    let Value::Integer(n) = v else {
        return Err(PrimitiveError::type_mismatch(name, "integer", v).into());
    };
    let i = n
        .to_usize()
        .ok_or_else(|| PrimitiveError::domain(name, format!("index {n} out of range")))?;
    if i >= len {
        return Err(PrimitiveError::domain(name, format!("index {i} out of range for length {len}")).into());
    }
    Ok(i)
}

pub fn register(session: &mut Session) {
    session.bind_primitive("vector", |args| {
        Ok(vec![Value::Vector(Rc::new(RefCell::new(args.to_vec())))])
    });

    session.bind_primitive("vector?", |args| match args {
        [v] => Ok(vec![Value::Boolean(matches!(v, Value::Vector(_)))]),
        _ => Err(PrimitiveError::arity("vector?", "1", args.len()).into()),
    });

    session.bind_primitive("vector-length", |args| match args {
        [Value::Vector(items)] => Ok(vec![Value::Integer(BigInt::from(items.borrow().len()))]),
        [other] => Err(PrimitiveError::type_mismatch("vector-length", "vector", other).into()),
        _ => Err(PrimitiveError::arity("vector-length", "1", args.len()).into()),
    });

    session.bind_primitive("vector-get", |args| match args {
        [Value::Vector(items), index] => {
            let items = items.borrow();
            let i = as_index("vector-get", index, items.len())?;
            Ok(vec![items[i].clone()])
        }
        [other, _] => Err(PrimitiveError::type_mismatch("vector-get", "vector", other).into()),
        _ => Err(PrimitiveError::arity("vector-get", "2", args.len()).into()),
    });

    session.bind_primitive("vector-set", |args| match args {
        [vector @ Value::Vector(items), index, elem] => {
            let i = as_index("vector-set", index, items.borrow().len())?;
            items.borrow_mut()[i] = elem.clone();
            Ok(vec![vector.clone()])
        }
        [other, _, _] => Err(PrimitiveError::type_mismatch("vector-set", "vector", other).into()),
        _ => Err(PrimitiveError::arity("vector-set", "3", args.len()).into()),
    });

    session.bind_primitive("vector-add", |args| match args {
        [vector @ Value::Vector(items), rest @ ..] => {
            items.borrow_mut().extend(rest.iter().cloned());
            Ok(vec![vector.clone()])
        }
        [other, ..] => Err(PrimitiveError::type_mismatch("vector-add", "vector", other).into()),
        [] => Err(PrimitiveError::arity("vector-add", "at least 1", 0).into()),
    });

    session.bind_primitive("list->vector", |args| match args {
        [v] => {
            let items = value::flatten_list(v.clone())
                .map_err(|_| PrimitiveError::type_mismatch("list->vector", "list", v))?;
            Ok(vec![Value::Vector(Rc::new(RefCell::new(items)))])
        }
        _ => Err(PrimitiveError::arity("list->vector", "1", args.len()).into()),
    });

    session.bind_primitive("vector->list", |args| match args {
        [Value::Vector(items)] => Ok(vec![value::list(items.borrow().clone())]),
        [other] => Err(PrimitiveError::type_mismatch("vector->list", "vector", other).into()),
        _ => Err(PrimitiveError::arity("vector->list", "1", args.len()).into()),
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
    fn vector_constructs_and_displays() {
        assert_eq!(run("(vector 1 2 3)"), "<vector: [1 2 3]>");
    }

    #[test]
    fn vector_get_and_set_mutate_in_place() {
        let mut session = Session::with_builtins();
        session.run("(define v (vector 1 2 3))").unwrap();
        let got = session.run("(vector-get v 1)").unwrap();
        assert_eq!(display(&got[0]), "2");
        session.run("(vector-set v 1 99)").unwrap();
        let got = session.run("(vector-get v 1)").unwrap();
        assert_eq!(display(&got[0]), "99");
    }

    #[test]
    fn vector_add_appends_and_returns_the_same_vector() {
        let mut session = Session::with_builtins();
        session.run("(define v (vector 1))").unwrap();
        session.run("(vector-add v 2 3)").unwrap();
        let got = session.run("(vector-length v)").unwrap();
        assert_eq!(display(&got[0]), "3");
    }

    #[test]
    fn vector_get_out_of_bounds_is_an_error() {
        let mut session = Session::with_builtins();
        assert!(session.run("(vector-get (vector 1) 5)").is_err());
    }

    #[test]
    fn list_vector_round_trip() {
        assert_eq!(run("(vector->list (list->vector (list 1 2 3)))"), "(1 2 3)");
    }
}
