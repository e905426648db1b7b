// ABOUTME: Token stream to parsed Value — recursive descent over the tokenizer

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use std::str::FromStr;

use crate::error::{ActinideError, SyntaxError};
use crate::port::Port;
use crate::symbol::SymbolTable;
use crate::tokenizer::{read_token, Token};
use crate::value::{self, Value};

/// Reads one form from `port`, interning any symbols through `symbols`.
/// Returns `Ok(None)` at end of input — distinguished from every possible
/// user value, since it is never itself returned as a read value.
pub fn read(port: &mut dyn Port, symbols: &mut SymbolTable) -> Result<Option<Value>, ActinideError> {
    match read_token(port)? {
        None => Ok(None),
        Some(Token::CloseParen) => Err(SyntaxError::UnexpectedCloseParen.into()),
        Some(Token::OpenParen) => read_list(port, symbols).map(Some),
        Some(other) => read_form_from_token(other, port, symbols).map(Some),
    }
}

/// Reads the body of a list, having already consumed the opening `(`.
fn read_list(port: &mut dyn Port, symbols: &mut SymbolTable) -> Result<Value, ActinideError> {
    match read_token(port)? {
        None => Err(SyntaxError::UnexpectedEof.into()),
        Some(Token::CloseParen) => Ok(Value::Nil),
        Some(Token::Dot) => Err(SyntaxError::UnexpectedCloseParen.into()),
        Some(Token::OpenParen) => {
            let head = read_list(port, symbols)?;
            let tail = read_list_tail(port, symbols)?;
            Ok(Value::cons(head, tail))
        }
        Some(tok) => {
            let head = read_form_from_token(tok, port, symbols)?;
            let tail = read_list_tail(port, symbols)?;
            Ok(Value::cons(head, tail))
        }
    }
}

/// Reads the remainder of a list after its first element: either more
/// elements, the closing `)`, or, after a `.`, a single dotted tail value
/// followed by a mandatory `)`.
fn read_list_tail(port: &mut dyn Port, symbols: &mut SymbolTable) -> Result<Value, ActinideError> {
    match read_token(port)? {
        None => Err(SyntaxError::UnexpectedEof.into()),
        Some(Token::CloseParen) => Ok(Value::Nil),
        Some(Token::Dot) => {
            let tail = read(port, symbols)?.ok_or(SyntaxError::UnexpectedEof)?;
            match read_token(port)? {
                Some(Token::CloseParen) => Ok(tail),
                _ => Err(SyntaxError::ExpectedCloseParenAfterDot.into()),
            }
        }
        Some(Token::OpenParen) => {
            let head = read_list(port, symbols)?;
            let tail = read_list_tail(port, symbols)?;
            Ok(Value::cons(head, tail))
        }
        Some(tok) => {
            let head = read_form_from_token(tok, port, symbols)?;
            let tail = read_list_tail(port, symbols)?;
            Ok(Value::cons(head, tail))
        }
    }
}

fn read_form_from_token(
    token: Token,
    port: &mut dyn Port,
    symbols: &mut SymbolTable,
) -> Result<Value, ActinideError> {
    match token {
        Token::OpenParen => read_list(port, symbols),
        Token::CloseParen => Err(SyntaxError::UnexpectedCloseParen.into()),
        Token::Dot => Err(SyntaxError::UnexpectedCloseParen.into()),
        Token::Quote => read_quoted(port, symbols, "quote"),
        Token::Quasiquote => read_quoted(port, symbols, "quasiquote"),
        Token::Unquote => read_quoted(port, symbols, "unquote"),
        Token::UnquoteSplicing => read_quoted(port, symbols, "unquote-splicing"),
        Token::StringLiteral(text) => Ok(Value::string(de_escape(&text))),
        Token::Atom(text) => Ok(read_atom(&text, symbols)),
    }
}

fn read_quoted(
    port: &mut dyn Port,
    symbols: &mut SymbolTable,
    quote_name: &str,
) -> Result<Value, ActinideError> {
    let quoted = read(port, symbols)?.ok_or(SyntaxError::UnexpectedEof)?;
    let quote = Value::Symbol(symbols.intern(quote_name));
    Ok(value::list(vec![quote, quoted]))
}

/// Strips the surrounding quotes from a tokenizer string literal and
/// resolves its two legal escapes: `\"` → `"`, `\\` → `\`.
fn de_escape(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Parses a bare atom in priority order: boolean, integer, decimal, then
/// symbol — symbol always succeeds, so this never fails.
fn read_atom(text: &str, symbols: &mut SymbolTable) -> Value {
    if let Some(b) = read_boolean(text) {
        return b;
    }
    if let Ok(n) = BigInt::from_str(text) {
        return Value::Integer(n);
    }
    if is_decimal_candidate(text) {
        if let Ok(d) = BigDecimal::from_str(text) {
            return Value::Decimal(d);
        }
    }
    Value::Symbol(symbols.intern(text))
}

fn read_boolean(text: &str) -> Option<Value> {
    match text {
        "#t" => Some(Value::Boolean(true)),
        "#f" => Some(Value::Boolean(false)),
        _ => None,
    }
}

/// Integers already matched `BigInt::from_str`. A decimal candidate must
/// contain a `.` or an exponent marker so that plain symbols like `foo` or
/// `1+` never round-trip through `BigDecimal::from_str`'s more permissive
/// grammar.
fn is_decimal_candidate(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    match chars.peek() {
        Some('-') | Some('+') => {
            chars.next();
        }
        _ => {}
    }
    let rest: String = chars.collect();
    !rest.is_empty()
        && rest.chars().all(|c| c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || c == '+' || c == '-')
        && rest.chars().any(|c| c.is_ascii_digit())
        && (rest.contains('.') || rest.contains('e') || rest.contains('E'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::StringPort;
    use crate::printer::display;

    fn read_one(source: &str) -> Value {
        let mut port = StringPort::new(source);
        let mut symbols = SymbolTable::new();
        read(&mut port, &mut symbols).unwrap().unwrap()
    }

    #[test]
    fn reads_atoms() {
        assert!(matches!(read_one("#t"), Value::Boolean(true)));
        assert!(matches!(read_one("#f"), Value::Boolean(false)));
        assert!(matches!(read_one("42"), Value::Integer(_)));
        assert!(matches!(read_one("-7"), Value::Integer(_)));
        assert!(matches!(read_one("3.14"), Value::Decimal(_)));
        assert!(matches!(read_one("foo"), Value::Symbol(_)));
    }

    #[test]
    fn reads_proper_list() {
        let v = read_one("(1 2 3)");
        assert!(v.is_proper_list());
        assert_eq!(display(&v), "(1 2 3)");
    }

    #[test]
    fn reads_dotted_pair() {
        let v = read_one("(1 . 2)");
        assert!(!v.is_proper_list());
        assert_eq!(display(&v), "(1 . 2)");
    }

    #[test]
    fn reads_nested_lists() {
        let v = read_one("(1 (2 3) 4)");
        assert_eq!(display(&v), "(1 (2 3) 4)");
    }

    #[test]
    fn reads_quote_forms() {
        assert_eq!(display(&read_one("'x")), "'x");
        assert_eq!(display(&read_one("`x")), "`x");
        assert_eq!(display(&read_one(",x")), ",x");
        assert_eq!(display(&read_one(",@x")), ",@x");
    }

    #[test]
    fn reads_string_with_escapes() {
        let v = read_one(r#""a\"b\\c""#);
        match v {
            Value::String(s) => assert_eq!(&*s, "a\"b\\c"),
            _ => panic!("expected string"),
        }
    }

    #[test]
    fn unexpected_close_paren_is_a_syntax_error() {
        let mut port = StringPort::new(")");
        let mut symbols = SymbolTable::new();
        assert!(read(&mut port, &mut symbols).is_err());
    }

    #[test]
    fn unterminated_list_is_a_syntax_error() {
        let mut port = StringPort::new("(1 2");
        let mut symbols = SymbolTable::new();
        assert!(read(&mut port, &mut symbols).is_err());
    }

    #[test]
    fn eof_at_top_level_returns_none() {
        let mut port = StringPort::new("   ");
        let mut symbols = SymbolTable::new();
        assert_eq!(read(&mut port, &mut symbols).unwrap(), None);
    }

    #[test]
    fn trailing_data_is_left_unread() {
        let mut port = StringPort::new("(1 2) garbage");
        let mut symbols = SymbolTable::new();
        let v = read(&mut port, &mut symbols).unwrap().unwrap();
        assert_eq!(display(&v), "(1 2)");
        assert_eq!(port.read_fully().trim(), "garbage");
    }

    #[test]
    fn same_symbol_text_interns_to_the_same_symbol() {
        let mut port = StringPort::new("(foo foo)");
        let mut symbols = SymbolTable::new();
        let v = read(&mut port, &mut symbols).unwrap().unwrap();
        let (a, b) = (v.head().unwrap().clone(), v.tail().unwrap().head().unwrap().clone());
        assert!(crate::value::identical(&a, &b));
    }
}
