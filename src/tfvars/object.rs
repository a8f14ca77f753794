// src/tfvars/object.rs
//! Recursive-descent parser for a single alert object.
//!
//! hcl-rs implements the HCL grammar strictly: object items must be
//! separated by commas or newlines. Blocks written by hand (and by the
//! tooling this file format predates) sometimes put several
//! `"key" = value` pairs on one line with no separator, which the original
//! editor's parser accepted. This parser covers exactly the one supported
//! object shape — scalar pairs between braces — and tolerates whitespace,
//! newline, or comma separation interchangeably.

use crate::alerts::record::{AlertRecord, AlertValue};
use serde_json::Number;

/// Parses one `{ "key" = value ... }` object into a record. `None` on any
/// deviation from the scalar-pair shape; never panics, never errors.
#[must_use]
pub fn parse_object(text: &str) -> Option<AlertRecord> {
    let mut cursor = Cursor::new(text);
    cursor.skip_separators();
    cursor.expect(b'{')?;
    let mut record = AlertRecord::new();
    loop {
        cursor.skip_separators();
        if cursor.peek()? == b'}' {
            cursor.bump();
            break;
        }
        let key = cursor.parse_key()?;
        cursor.skip_separators();
        cursor.expect(b'=')?;
        cursor.skip_separators();
        let value = cursor.parse_value()?;
        record.set(key, value);
    }
    cursor.skip_separators();
    cursor.at_end().then_some(record)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn expect(&mut self, byte: u8) -> Option<()> {
        if self.peek()? == byte {
            self.bump();
            Some(())
        } else {
            None
        }
    }

    /// Whitespace and commas are interchangeable item separators here.
    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == b',' {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn parse_key(&mut self) -> Option<String> {
        if self.peek()? == b'"' {
            self.parse_string()
        } else {
            self.parse_bare_identifier()
        }
    }

    fn parse_bare_identifier(&mut self) -> Option<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' || c == b'-' {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return None;
        }
        String::from_utf8(self.bytes[start..self.pos].to_vec()).ok()
    }

    fn parse_string(&mut self) -> Option<String> {
        self.expect(b'"')?;
        let mut out = Vec::new();
        loop {
            let c = self.peek()?;
            self.bump();
            match c {
                b'"' => break,
                b'\\' => {
                    let escaped = self.peek()?;
                    self.bump();
                    match escaped {
                        b'n' => out.push(b'\n'),
                        b'r' => out.push(b'\r'),
                        b't' => out.push(b'\t'),
                        other => out.push(other),
                    }
                }
                other => out.push(other),
            }
        }
        String::from_utf8(out).ok()
    }

    fn parse_value(&mut self) -> Option<AlertValue> {
        match self.peek()? {
            b'"' => self.parse_string().map(AlertValue::Str),
            b't' => self.parse_keyword("true", AlertValue::Bool(true)),
            b'f' => self.parse_keyword("false", AlertValue::Bool(false)),
            b'n' => self.parse_keyword("null", AlertValue::Null),
            _ => self.parse_number(),
        }
    }

    fn parse_keyword(&mut self, word: &str, value: AlertValue) -> Option<AlertValue> {
        let end = self.pos + word.len();
        if self.bytes.get(self.pos..end)? == word.as_bytes() {
            self.pos = end;
            Some(value)
        } else {
            None
        }
    }

    fn parse_number(&mut self) -> Option<AlertValue> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, b'-' | b'+' | b'.' | b'e' | b'E') {
                self.bump();
            } else {
                break;
            }
        }
        let literal = std::str::from_utf8(&self.bytes[start..self.pos]).ok()?;
        parse_number_literal(literal).map(AlertValue::Num)
    }
}

/// Integer literals stay integers; everything else goes through f64.
/// Shared with nothing else on purpose: the serializer goes the other way
/// via `Number`'s own Display.
fn parse_number_literal(literal: &str) -> Option<Number> {
    if literal.is_empty() {
        return None;
    }
    if let Ok(i) = literal.parse::<i64>() {
        return Some(Number::from(i));
    }
    literal.parse::<f64>().ok().and_then(Number::from_f64)
}
