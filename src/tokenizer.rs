// ABOUTME: Character stream to token stream — a small state machine over a Port

use crate::error::TokenError;
use crate::port::Port;

/// One lexical token. String literals carry their text *verbatim*, including
/// the surrounding quotes and any backslash escapes — de-escaping is the
/// reader's job (spec.md §4.2), not the tokenizer's, so the same token text
/// can be re-tokenized identically if ever needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    OpenParen,
    CloseParen,
    Dot,
    Quote,
    Quasiquote,
    Unquote,
    UnquoteSplicing,
    StringLiteral(String),
    Atom(String),
}

const DELIMITERS: [char; 7] = ['"', '(', ')', ';', ' ', '\t', '\n'];

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Reads the next token from `port`, or `Ok(None)` at end of input. Consumes
/// exactly the characters belonging to the token it returns — never peeks or
/// reads past it — so repeated calls drain the port one token at a time.
pub fn read_token(port: &mut dyn Port) -> Result<Option<Token>, TokenError> {
    loop {
        let lookahead = port.peek(1);
        let Some(ch) = lookahead.chars().next() else {
            return Ok(None);
        };
        match ch {
            ';' => {
                consume_comment(port);
                continue;
            }
            ' ' | '\t' | '\n' => {
                port.read(1);
                continue;
            }
            '(' => {
                port.read(1);
                return Ok(Some(Token::OpenParen));
            }
            ')' => {
                port.read(1);
                return Ok(Some(Token::CloseParen));
            }
            '\'' | '`' | ',' => return Ok(Some(read_quote_prefix(port))),
            '"' => return read_string(port).map(Some),
            _ => return Ok(Some(read_atom(port))),
        }
    }
}

/// Consumes characters up to and including the next newline, or to EOF.
fn consume_comment(port: &mut dyn Port) {
    loop {
        let c = port.read(1);
        if c.is_empty() || c == "\n" {
            return;
        }
    }
}

fn read_quote_prefix(port: &mut dyn Port) -> Token {
    let consumed = port.read(1);
    match consumed.as_str() {
        "'" => Token::Quote,
        "`" => Token::Quasiquote,
        "," => {
            if port.peek(1) == "@" {
                port.read(1);
                Token::UnquoteSplicing
            } else {
                Token::Unquote
            }
        }
        other => unreachable!("read_quote_prefix called on non-quote char {:?}", other),
    }
}

fn read_string(port: &mut dyn Port) -> Result<Token, TokenError> {
    let mut text = port.read(1); // the opening quote
    debug_assert_eq!(text, "\"");
    loop {
        let c = port.read(1);
        if c.is_empty() {
            return Err(TokenError::UnterminatedString);
        }
        if c == "\"" {
            text.push('"');
            return Ok(Token::StringLiteral(text));
        }
        if c == "\\" {
            text.push('\\');
            let escaped = port.read(1);
            match escaped.as_str() {
                "\"" | "\\" => text.push_str(&escaped),
                "" => return Err(TokenError::UnterminatedString),
                other => return Err(TokenError::IllegalEscape(other.chars().next().unwrap())),
            }
            continue;
        }
        text.push_str(&c);
    }
}

fn read_atom(port: &mut dyn Port) -> Token {
    let mut text = String::new();
    loop {
        let lookahead = port.peek(1);
        match lookahead.chars().next() {
            None => break,
            Some(c) if is_delimiter(c) => break,
            Some(_) => text.push_str(&port.read(1)),
        }
    }
    if text == "." {
        Token::Dot
    } else {
        Token::Atom(text)
    }
}
