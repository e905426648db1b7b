// ABOUTME: Renders values back to readable Actinide source text

use crate::value::Value;

/// Prints `v` as Actinide source text. For any value the reader can build
/// (nil, booleans, integers, decimals, strings, symbols, cons/list trees over
/// the same), `read(display(v)) == v` — see the round-trip tests in
/// `reader.rs`.
pub fn display(v: &Value) -> String {
    match v {
        Value::Nil => "()".to_string(),
        Value::Boolean(true) => "#t".to_string(),
        Value::Boolean(false) => "#f".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::String(s) => display_string(s),
        Value::Symbol(s) => s.name().to_string(),
        Value::Cons(_) => display_cons(v),
        Value::Vector(items) => {
            let items = items.borrow();
            let inner = items
                .iter()
                .map(display)
                .collect::<Vec<_>>()
                .join(" ");
            format!("<vector: [{}]>", inner)
        }
        Value::Procedure(proc) => {
            let formals = crate::value::list(
                proc.formals
                    .iter()
                    .cloned()
                    .map(Value::Symbol)
                    .collect::<Vec<_>>(),
            );
            let formals = match &proc.tail_formal {
                None => formals,
                Some(tail) => append_tail(formals, Value::Symbol(tail.clone())),
            };
            format!(
                "<procedure: (lambda {} {})>",
                display(&formals),
                display(&proc.body)
            )
        }
        Value::Primitive(prim) => format!("<builtin: {}>", prim.name),
        Value::Port(_) => "<port>".to_string(),
    }
}

/// Appends a (possibly non-list) tail onto a proper-list prefix, producing a
/// dotted structure for display purposes — mirrors how `(a . b)` formal
/// specs look when printed back out.
fn append_tail(prefix: Value, tail: Value) -> Value {
    match prefix {
        Value::Nil => tail,
        Value::Cons(pair) => {
            let (head, rest) = (*pair).clone();
            Value::cons(head, append_tail(rest, tail))
        }
        other => other,
    }
}

fn display_string(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// `(quote x)`/`(quasiquote x)`/`(unquote x)`/`(unquote-splicing x)` print as
/// `'x`/`` `x ``/`,x`/`,@x` instead of their full list form.
fn quote_prefix(head_name: &str) -> Option<&'static str> {
    match head_name {
        "quote" => Some("'"),
        "quasiquote" => Some("`"),
        "unquote" => Some(","),
        "unquote-splicing" => Some(",@"),
        _ => None,
    }
}

fn display_cons(v: &Value) -> String {
    if let Value::Cons(pair) = v {
        let (head, tail) = &**pair;
        if let Value::Symbol(sym) = head {
            if let Some(prefix) = quote_prefix(sym.name()) {
                if let Value::Cons(inner) = tail {
                    let (arg, rest) = &**inner;
                    if rest.is_nil() {
                        return format!("{}{}", prefix, display(arg));
                    }
                }
            }
        }
    }

    let mut parts = Vec::new();
    let mut cursor = v.clone();
    loop {
        match cursor {
            Value::Cons(pair) => {
                let (head, tail) = (*pair).clone();
                parts.push(display(&head));
                cursor = tail;
            }
            Value::Nil => break,
            other => {
                parts.push(".".to_string());
                parts.push(display(&other));
                break;
            }
        }
    }
    format!("({})", parts.join(" "))
}
