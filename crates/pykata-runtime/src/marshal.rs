//! Result marshaling across the interpreter boundary
//!
//! The interpreter hands results back through their canonical `repr`
//! form. The marshaler reads that text into a host [`serde_json::Value`]
//! so outcomes can be compared structurally. Reprs that do not denote a
//! plain data literal (class instances, sets, bytes) fall back to the
//! raw repr text unmodified; this step never fails outward.
//!
//! The reader is a hand-written recursive descent over the repr text:
//! numbers, strings (single or double quoted, with escapes), `True`,
//! `False`, `None`, lists, tuples, and dicts.

use serde_json::{Map, Number, Value};
use tracing::debug;

/// A marshaled interpreter result.
#[derive(Debug, Clone, PartialEq)]
pub enum Marshaled {
    /// Converted to a plain host value.
    Value(Value),
    /// Conversion failed; the raw repr text, unmodified.
    Raw(String),
    /// The interpreter produced no value (`None`).
    Absent,
}

/// Marshal an optional repr string (as produced by the session: `None`
/// when the interpreter returned `None`).
pub fn marshal(repr: Option<String>) -> Marshaled {
    let Some(text) = repr else {
        return Marshaled::Absent;
    };
    match parse_repr(&text) {
        Some(value) => Marshaled::Value(value),
        None => {
            debug!(repr = %text, "repr is not a plain data literal, keeping raw text");
            Marshaled::Raw(text)
        }
    }
}

/// Parse a Python literal repr into a JSON value. `None` when the text
/// is not a plain data literal.
pub fn parse_repr(text: &str) -> Option<Value> {
    let mut reader = ReprReader::new(text);
    reader.skip_whitespace();
    let value = reader.parse_value()?;
    reader.skip_whitespace();
    if reader.at_end() {
        Some(value)
    } else {
        None
    }
}

/// Reader state over the repr text.
struct ReprReader {
    chars: Vec<char>,
    pos: usize,
}

impl ReprReader {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    /// Consume `word` if it appears at the current position.
    fn eat_word(&mut self, word: &str) -> bool {
        let end = self.pos + word.len();
        if end <= self.chars.len() && self.chars[self.pos..end].iter().collect::<String>() == word {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        self.skip_whitespace();
        match self.peek()? {
            'N' => self.eat_word("None").then_some(Value::Null),
            'T' => self.eat_word("True").then_some(Value::Bool(true)),
            'F' => self.eat_word("False").then_some(Value::Bool(false)),
            '\'' | '"' => self.parse_string().map(Value::String),
            '[' => self.parse_sequence(']'),
            '(' => self.parse_sequence(')'),
            '{' => self.parse_dict(),
            c if c == '-' || c.is_ascii_digit() => self.parse_number(),
            _ => None,
        }
    }

    fn parse_string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(out),
                '\\' => out.push(self.parse_escape()?),
                c => out.push(c),
            }
        }
    }

    fn parse_escape(&mut self) -> Option<char> {
        match self.bump()? {
            '\\' => Some('\\'),
            '\'' => Some('\''),
            '"' => Some('"'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            '0' => Some('\0'),
            'x' => self.parse_hex_escape(2),
            'u' => self.parse_hex_escape(4),
            'U' => self.parse_hex_escape(8),
            _ => None,
        }
    }

    fn parse_hex_escape(&mut self, digits: usize) -> Option<char> {
        let mut code = 0u32;
        for _ in 0..digits {
            code = code * 16 + self.bump()?.to_digit(16)?;
        }
        char::from_u32(code)
    }

    fn parse_number(&mut self) -> Option<Value> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => self.pos += 1,
                '.' | 'e' | 'E' => {
                    is_float = true;
                    self.pos += 1;
                }
                '+' | '-' if is_float => self.pos += 1,
                _ => break,
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        if is_float {
            Number::from_f64(text.parse::<f64>().ok()?).map(Value::Number)
        } else if let Ok(n) = text.parse::<i64>() {
            Some(Value::Number(n.into()))
        } else {
            // Out of i64 range: keep the value, at double precision.
            Number::from_f64(text.parse::<f64>().ok()?).map(Value::Number)
        }
    }

    /// Lists and tuples both become JSON arrays. Tuples may carry a
    /// trailing comma (`(1,)`).
    fn parse_sequence(&mut self, close: char) -> Option<Value> {
        self.bump()?;
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek()? == close {
                self.pos += 1;
                return Some(Value::Array(items));
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek()? {
                ',' => {
                    self.pos += 1;
                }
                c if c == close => {}
                _ => return None,
            }
        }
    }

    /// Dict reprs become JSON objects. Non-string keys are rendered
    /// through their canonical JSON text. A `{1, 2}` set repr fails at
    /// the missing `:` and falls back to raw text upstream.
    fn parse_dict(&mut self) -> Option<Value> {
        self.bump()?;
        let mut map = Map::new();
        loop {
            self.skip_whitespace();
            if self.peek()? == '}' {
                self.pos += 1;
                return Some(Value::Object(map));
            }
            let key = match self.parse_value()? {
                Value::String(s) => s,
                other => other.to_string(),
            };
            self.skip_whitespace();
            if self.bump()? != ':' {
                return None;
            }
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_whitespace();
            match self.peek()? {
                ',' => {
                    self.pos += 1;
                }
                '}' => {}
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("5", json!(5))]
    #[case("-3", json!(-3))]
    #[case("2.5", json!(2.5))]
    #[case("1e3", json!(1000.0))]
    #[case("True", json!(true))]
    #[case("False", json!(false))]
    #[case("None", json!(null))]
    #[case("'hello'", json!("hello"))]
    #[case("\"hi\"", json!("hi"))]
    #[case("[1, 2, 3]", json!([1, 2, 3]))]
    #[case("[]", json!([]))]
    #[case("(1, 2)", json!([1, 2]))]
    #[case("(1,)", json!([1]))]
    #[case("()", json!([]))]
    #[case("{'a': 1, 'b': [2, 3]}", json!({"a": 1, "b": [2, 3]}))]
    #[case("{}", json!({}))]
    #[case("[[1], [2, [3]]]", json!([[1], [2, [3]]]))]
    #[case("{'k': {'n': None}}", json!({"k": {"n": null}}))]
    fn parses_data_literals(#[case] repr: &str, #[case] expected: Value) {
        assert_eq!(parse_repr(repr), Some(expected));
    }

    #[rstest]
    #[case("TreeNode(5)")]
    #[case("{1, 2}")]
    #[case("set()")]
    #[case("b'bytes'")]
    #[case("<function f at 0x0>")]
    #[case("inf")]
    #[case("[1, 2") ]
    #[case("5 extra")]
    fn rejects_non_data_literals(#[case] repr: &str) {
        assert_eq!(parse_repr(repr), None);
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(parse_repr(r"'it\'s'"), Some(json!("it's")));
        assert_eq!(parse_repr(r"'a\nb'"), Some(json!("a\nb")));
        assert_eq!(parse_repr(r"'\x41'"), Some(json!("A")));
        assert_eq!(parse_repr(r"'é'"), Some(json!("é")));
    }

    #[test]
    fn test_non_string_dict_keys_use_json_text() {
        assert_eq!(parse_repr("{1: 'a'}"), Some(json!({"1": "a"})));
        assert_eq!(parse_repr("{True: 1}"), Some(json!({"true": 1})));
    }

    #[test]
    fn test_marshal_variants() {
        assert_eq!(marshal(None), Marshaled::Absent);
        assert_eq!(marshal(Some("5".to_string())), Marshaled::Value(json!(5)));
        assert_eq!(
            marshal(Some("TreeNode(5)".to_string())),
            Marshaled::Raw("TreeNode(5)".to_string())
        );
    }

    #[test]
    fn test_big_int_degrades_to_float() {
        let parsed = parse_repr("123456789012345678901234567890");
        assert!(matches!(parsed, Some(Value::Number(n)) if n.is_f64()));
    }
}
