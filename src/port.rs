// ABOUTME: Character-oriented input ports with one-character lookahead

/// Character input with lookahead: `peek` never advances the port, so a
/// subsequent `read` of the same length yields the same characters. The
/// tokenizer only ever calls `peek(1)`/`read(1)`; `read_fully` exists mainly
/// for tests and for `string->input-port` round-tripping.
pub trait Port {
    /// Returns up to `n` characters without consuming them.
    fn peek(&mut self, n: usize) -> String;

    /// Consumes and returns up to `n` characters.
    fn read(&mut self, n: usize) -> String;

    /// Consumes and returns all remaining characters.
    fn read_fully(&mut self) -> String;
}

/// A port backed by an in-memory string, the only kind of port Actinide
/// constructs internally (`string->input-port`, and the `Session::run` entry
/// point).
pub struct StringPort {
    chars: Vec<char>,
    pos: usize,
}

impl StringPort {
    pub fn new(source: impl Into<String>) -> Self {
        StringPort {
            chars: source.into().chars().collect(),
            pos: 0,
        }
    }
}

impl Port for StringPort {
    fn peek(&mut self, n: usize) -> String {
        let end = (self.pos + n).min(self.chars.len());
        self.chars[self.pos..end].iter().collect()
    }

    fn read(&mut self, n: usize) -> String {
        let end = (self.pos + n).min(self.chars.len());
        let result: String = self.chars[self.pos..end].iter().collect();
        self.pos = end;
        result
    }

    fn read_fully(&mut self) -> String {
        let result: String = self.chars[self.pos..].iter().collect();
        self.pos = self.chars.len();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut port = StringPort::new("hello");
        assert_eq!(port.peek(1), "h");
        assert_eq!(port.peek(1), "h");
        assert_eq!(port.read(1), "h");
        assert_eq!(port.read(1), "e");
    }

    #[test]
    fn peek_past_end_returns_what_remains() {
        let mut port = StringPort::new("hi");
        assert_eq!(port.peek(10), "hi");
        assert_eq!(port.read(10), "hi");
        assert_eq!(port.peek(1), "");
    }

    #[test]
    fn read_fully_consumes_the_rest() {
        let mut port = StringPort::new("hello world");
        assert_eq!(port.read(6), "hello ");
        assert_eq!(port.read_fully(), "world");
        assert_eq!(port.read_fully(), "");
    }

    #[test]
    fn handles_multibyte_characters_by_char_not_byte() {
        let mut port = StringPort::new("héllo");
        assert_eq!(port.read(2), "hé");
        assert_eq!(port.read_fully(), "llo");
    }
}
