//! Character cursor over a single token

use crate::error::{Error, Result};

/// Characters that end a bare symbol
pub const STRUCTURAL_DELIMITERS: &[char] = &['=', ',', ':', '+', '_', ']', '/', '^', '<', '>'];

/// Token reader
pub struct TokenReader<'a> {
    token: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(token: &'a str) -> Self {
        Self {
            token,
            chars: token.chars().collect(),
            pos: 0,
        }
    }

    /// The whole token text
    pub fn token(&self) -> &'a str {
        self.token
    }

    /// Current position in characters
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.chars.len());
    }

    /// Unread text from the current position
    pub fn remainder(&self) -> String {
        self.chars[self.pos.min(self.chars.len())..].iter().collect()
    }

    /// Consume the next char if it equals `c`
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the next char if it equals `c` ignoring ASCII case
    pub fn eat_ignore_case(&mut self, c: char) -> bool {
        match self.peek() {
            Some(p) if p.eq_ignore_ascii_case(&c) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Consume `prefix` if the remainder starts with it, ignoring ASCII case
    pub fn eat_prefix_ignore_case(&mut self, prefix: &str) -> bool {
        let mut len = 0;
        for (i, expected) in prefix.chars().enumerate() {
            match self.peek_at(i) {
                Some(c) if c.eq_ignore_ascii_case(&expected) => len += 1,
                _ => return false,
            }
        }
        self.pos += len;
        true
    }

    /// Consume one char from `set`
    pub fn expect_char(&mut self, set: &[char]) -> Result<char> {
        match self.peek() {
            Some(c) if set.contains(&c) => {
                self.pos += 1;
                Ok(c)
            }
            found => Err(Error::unexpected(found, describe_set(set))),
        }
    }

    /// Fail unless the whole token has been consumed
    pub fn expect_end(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(found) => Err(Error::UnexpectedChar {
                found,
                expected: "end of token".into(),
            }),
        }
    }

    /// Read a run of ASCII digits containing at most one '.'
    pub fn read_digits(&mut self) -> Result<String> {
        let start = self.pos;
        let mut digits = String::new();
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if c == '.' && !seen_dot && self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) {
                seen_dot = true;
                digits.push(c);
            } else {
                break;
            }
            self.pos += 1;
        }
        if digits.is_empty() {
            self.pos = start;
            return Err(Error::MalformedNumber(self.remainder()));
        }
        Ok(digits)
    }

    /// Read at most `max` digits as an integer, if any are present
    pub fn read_small_number(&mut self, max: usize) -> Option<u32> {
        let mut value = None;
        for _ in 0..max {
            match self.peek().and_then(|c| c.to_digit(10)) {
                Some(d) => {
                    value = Some(value.unwrap_or(0) * 10 + d);
                    self.pos += 1;
                }
                None => break,
            }
        }
        value
    }

    /// Read `[SYMBOL]` or a bare symbol, returned uppercased
    pub fn read_bracketed_symbol(&mut self) -> Result<String> {
        if self.eat('[') {
            let mut symbol = String::new();
            loop {
                match self.next_char() {
                    Some(']') => break,
                    Some(c) => symbol.push(c),
                    None => return Err(Error::unexpected(None, "']'")),
                }
            }
            return Ok(symbol.to_ascii_uppercase());
        }
        let symbol = self.read_until(STRUCTURAL_DELIMITERS);
        if symbol.is_empty() {
            return Err(Error::unexpected(self.peek(), "a symbol"));
        }
        Ok(symbol.to_ascii_uppercase())
    }

    /// Read until one of `delimiters` or the end of the token
    pub fn read_until(&mut self, delimiters: &[char]) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if delimiters.contains(&c) {
                break;
            }
            text.push(c);
            self.pos += 1;
        }
        text
    }

    /// Read a numeric operand: a digit run, `[SYMBOL]`, or a bare symbol
    ///
    /// The result is unresolved; pass it to the `Environment` accessors.
    pub fn read_operand(&mut self) -> Result<String> {
        match self.peek() {
            Some('[') => self.read_bracketed_symbol(),
            Some(c) if c.is_ascii_digit() || c == '.' => self.read_digits(),
            Some(c) if c.is_alphabetic() => self.read_bracketed_symbol(),
            _ => Err(Error::MalformedNumber(self.remainder())),
        }
    }
}

fn describe_set(set: &[char]) -> String {
    let quoted: Vec<String> = set.iter().map(|c| format!("'{}'", c)).collect();
    format!("one of {}", quoted.join(", "))
}
