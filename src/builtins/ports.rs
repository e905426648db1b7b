// ABOUTME: Character-port primitives — read-port peek-port read-port-fully string->input-port

use std::cell::RefCell;
use std::rc::Rc;

use num_traits::ToPrimitive;

use crate::error::PrimitiveError;
use crate::port::StringPort;
use crate::session::Session;
use crate::value::Value;

fn as_count(name: &'static str, v: &Value) -> Result<usize, crate::error::ActinideError> {
    match v {
        Value::Integer(n) => n
            .to_usize()
            .ok_or_else(|| PrimitiveError::domain(name, format!("count {n} out of range")).into()),
        other => Err(PrimitiveError::type_mismatch(name, "integer", other).into()),
    }
}

pub fn register(session: &mut Session) {
    session.bind_primitive("read-port", |args| match args {
        [Value::Port(port), count] => {
            let n = as_count("read-port", count)?;
            Ok(vec![Value::string(port.borrow_mut().read(n))])
        }
        [other, _] => Err(PrimitiveError::type_mismatch("read-port", "port", other).into()),
        _ => Err(PrimitiveError::arity("read-port", "2", args.len()).into()),
    });

    session.bind_primitive("peek-port", |args| match args {
        [Value::Port(port), count] => {
            let n = as_count("peek-port", count)?;
            Ok(vec![Value::string(port.borrow_mut().peek(n))])
        }
        [other, _] => Err(PrimitiveError::type_mismatch("peek-port", "port", other).into()),
        _ => Err(PrimitiveError::arity("peek-port", "2", args.len()).into()),
    });

    session.bind_primitive("read-port-fully", |args| match args {
        [Value::Port(port)] => Ok(vec![Value::string(port.borrow_mut().read_fully())]),
        [other] => Err(PrimitiveError::type_mismatch("read-port-fully", "port", other).into()),
        _ => Err(PrimitiveError::arity("read-port-fully", "1", args.len()).into()),
    });

    session.bind_primitive("string->input-port", |args| match args {
        [Value::String(s)] => Ok(vec![Value::Port(Rc::new(RefCell::new(StringPort::new(
            s.to_string(),
        ))))]),
        [other] => Err(PrimitiveError::type_mismatch("string->input-port", "string", other).into()),
        _ => Err(PrimitiveError::arity("string->input-port", "1", args.len()).into()),
    });
}
