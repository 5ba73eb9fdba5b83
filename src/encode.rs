//! Rendering a tree back to JSON text.
//
//  Symmetric with the parser's semantics: numbers serialize as integers
//  (fractional precision was already discarded at parse time), and strings
//  re-escape only `"` and `\`, matching the verbatim escape copying on the
//  way in. `Display` renders without a bound; [`encode`] writes into a
//  caller-supplied buffer and fails distinctly when it is too small.

use std::fmt::{self, Write};

use crate::types::{JsonError, Node, Value};

/// Render `root` into `buf`, returning the number of bytes written.
pub fn encode(root: &Node, buf: &mut [u8]) -> Result<usize, JsonError> {
    let capacity = buf.len();
    let mut sink = SliceWriter { buf, len: 0 };
    match write!(sink, "{root}") {
        Ok(()) => Ok(sink.len),
        Err(_) => Err(JsonError::BufferTooSmall { capacity }),
    }
}

struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len.checked_add(s.len()).ok_or(fmt::Error)?;
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

impl fmt::Display for Node {
    /// Compact document-order rendering; the node's own name, if any, is the
    /// enclosing object's business and is not printed here.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::Null => f.write_str("null"),
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write_quoted(f, s),
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Value::Object(members) => {
                f.write_char('{')?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_quoted(f, member.name().unwrap_or(""))?;
                    f.write_char(':')?;
                    write!(f, "{member}")?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn renders_compact_document_order() {
        let root = parse(r#"{ "z": 1, "a": [true, null], "s": "hi" }"#).expect("parse failed");
        assert_eq!(root.to_string(), r#"{"z":1,"a":[true,null],"s":"hi"}"#);
    }

    #[test]
    fn encode_reports_the_byte_count() {
        let root = parse(r#"{"foo": 1}"#).expect("parse failed");
        let mut buf = [0u8; 64];
        let n = encode(&root, &mut buf).expect("encode failed");
        assert_eq!(&buf[..n], br#"{"foo":1}"#);
    }

    #[test]
    fn exact_buffer_fits_one_byte_short_fails() {
        let root = parse("[1,2,3]").expect("parse failed");
        let rendered = root.to_string();

        let mut exact = vec![0u8; rendered.len()];
        assert_eq!(encode(&root, &mut exact), Ok(rendered.len()));

        let mut short = vec![0u8; rendered.len() - 1];
        assert_eq!(
            encode(&root, &mut short),
            Err(JsonError::BufferTooSmall {
                capacity: rendered.len() - 1
            })
        );
    }

    #[test]
    fn strings_reescape_quotes_and_backslashes() {
        let root = parse(r#"{"k\\e": "v\"v"}"#).expect("parse failed");
        assert_eq!(root.to_string(), r#"{"k\\e":"v\"v"}"#);

        // and the rendering parses back to the same tree
        let again = parse(&root.to_string()).expect("re-parse failed");
        assert_eq!(again, root);
    }

    #[test]
    fn numbers_render_as_integers() {
        // precision was discarded at parse time; 3.14 went in, 3 comes out
        let root = parse("[3.14, 1e0]").expect("parse failed");
        assert_eq!(root.to_string(), "[3,1]");
    }

    #[test]
    fn round_trip_through_a_fixed_buffer() {
        let text = r#"{"a": {"b": [true, false, null]}, "c": "x y"}"#;
        let root = parse(text).expect("parse failed");

        let mut buf = [0u8; 256];
        let n = encode(&root, &mut buf).expect("encode failed");
        let rendered = std::str::from_utf8(&buf[..n]).expect("rendering is utf-8");

        let again = parse(rendered).expect("re-parse failed");
        assert_eq!(again, root);
        assert!(again.semantic_eq(&root));
    }
}
