use std::fmt;

/// One JSON value, or one object member (a value carrying a name).
///
/// Children of arrays and objects are owned in document order; member names
/// are meaningful only when the parent is an object. The root has no name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub(crate) name: Option<String>,
    pub(crate) value: Value,
}

/// The payload of a [`Node`]. Exactly one variant is ever active; only
/// arrays and objects own children, only strings own text, only numbers own
/// an integer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Truncated base-10 integer; fractional and exponent parts were
    /// discarded at parse time.
    Number(i64),
    /// Stored verbatim: escapes were copied, not decoded.
    String(String),
    Array(Vec<Node>),
    Object(Vec<Node>),
}

const NO_CHILDREN: &[Node] = &[];

impl Node {
    /// The member name, present only for object members.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The typed payload.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self.value, Value::Object(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.value, Value::String(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self.value, Value::Number(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    pub fn is_true(&self) -> bool {
        matches!(self.value, Value::Bool(true))
    }

    pub fn is_false(&self) -> bool {
        matches!(self.value, Value::Bool(false))
    }

    /// The string payload, if this is a string node.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The truncated integer payload, if this is a number node.
    pub fn as_i64(&self) -> Option<i64> {
        match self.value {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Forward iteration over children in document order. Empty for
    /// non-container nodes.
    pub fn children(&self) -> std::slice::Iter<'_, Node> {
        match &self.value {
            Value::Array(items) | Value::Object(items) => items.iter(),
            _ => NO_CHILDREN.iter(),
        }
    }

    /// Number of children; zero for non-container nodes.
    pub fn len(&self) -> usize {
        match &self.value {
            Value::Array(items) | Value::Object(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow a child by object member name or array index.
    pub fn get<K>(&self, key: K) -> Option<&Node>
    where
        K: NodeIndex,
    {
        key.at(self)
    }

    /// Structural equality that treats object member order as irrelevant,
    /// mirroring JSON object equality. Arrays stay order-sensitive.
    pub fn semantic_eq(&self, other: &Node) -> bool {
        match (&self.value, &other.value) {
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.semantic_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                if a.len() != b.len() {
                    return false;
                }
                let mut used = vec![false; b.len()];
                a.iter().all(|x| {
                    b.iter().enumerate().any(|(i, y)| {
                        if !used[i] && x.name == y.name && x.semantic_eq(y) {
                            used[i] = true;
                            true
                        } else {
                            false
                        }
                    })
                })
            }
            (x, y) => x == y,
        }
    }

    pub(crate) fn push_child(&mut self, child: Node) -> Option<()> {
        match &mut self.value {
            Value::Array(items) | Value::Object(items) => {
                items.push(child);
                Some(())
            }
            _ => None,
        }
    }
}

/* ------------------------------------------------------------------ */
/*  Generic "key" helper                                              */
/* ------------------------------------------------------------------ */

/// Anything that can address a child inside a [`Node`].
///
/// * `&str`  → object member name
/// * `usize` → array index
pub trait NodeIndex {
    fn at(self, parent: &Node) -> Option<&Node>;
}

impl NodeIndex for &str {
    fn at(self, parent: &Node) -> Option<&Node> {
        match &parent.value {
            Value::Object(members) => members.iter().find(|m| m.name() == Some(self)),
            _ => None,
        }
    }
}

impl NodeIndex for usize {
    fn at(self, parent: &Node) -> Option<&Node> {
        match &parent.value {
            Value::Array(items) | Value::Object(items) => items.get(self),
            _ => None,
        }
    }
}

use std::ops::Index;

impl Index<&str> for Node {
    type Output = Node;
    fn index(&self, key: &str) -> &Self::Output {
        self.get(key).expect("object member not found")
    }
}

impl Index<usize> for Node {
    type Output = Node;
    fn index(&self, idx: usize) -> &Self::Output {
        self.get(idx).expect("child index out of bounds")
    }
}

/* ------------------------------------------------------------------ */
/*  Errors                                                            */
/* ------------------------------------------------------------------ */

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// No transition rule matches this character in the current state.
    UnexpectedChar { ch: char, offset: usize },
    /// Input ended before the document closed.
    UnexpectedEof { offset: usize },
    /// A bare literal other than `null`, `true` or `false`.
    InvalidLiteral { literal: String, offset: usize },
    /// Nesting deeper than the configured maximum.
    DepthExceeded { limit: usize },
    /// The caller-supplied output buffer cannot hold the rendered document.
    BufferTooSmall { capacity: usize },
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::UnexpectedChar { ch, offset } => {
                write!(f, "unexpected character {ch:?} at byte {offset}")
            }
            JsonError::UnexpectedEof { offset } => {
                write!(f, "unexpected end of input at byte {offset}")
            }
            JsonError::InvalidLiteral { literal, offset } => {
                write!(f, "invalid literal {literal:?} at byte {offset}")
            }
            JsonError::DepthExceeded { limit } => {
                write!(f, "nesting exceeds the configured maximum of {limit}")
            }
            JsonError::BufferTooSmall { capacity } => {
                write!(f, "output buffer of {capacity} bytes is too small")
            }
        }
    }
}

impl std::error::Error for JsonError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, value: Value) -> Node {
        Node {
            name: Some(name.to_owned()),
            value,
        }
    }

    fn bare(value: Value) -> Node {
        Node { name: None, value }
    }

    fn object(members: Vec<Node>) -> Node {
        bare(Value::Object(members))
    }

    #[test]
    fn type_tags_are_exclusive() {
        let n = member("k", Value::Number(3));
        assert!(n.is_number());
        assert!(!n.is_string() && !n.is_null() && !n.is_true() && !n.is_false());
        assert_eq!(n.as_i64(), Some(3));
        assert_eq!(n.as_str(), None);
    }

    #[test]
    fn children_of_scalars_are_empty() {
        let n = member("k", Value::String("x".into()));
        assert_eq!(n.children().count(), 0);
        assert_eq!(n.len(), 0);
        assert!(n.is_empty());
    }

    #[test]
    fn get_by_key_and_index() {
        let root = object(vec![
            member("a", Value::Number(1)),
            member("b", Value::Bool(true)),
        ]);
        assert_eq!(root.get("a").and_then(Node::as_i64), Some(1));
        assert!(root["b"].is_true());
        assert_eq!(root[1].name(), Some("b"));
        assert!(root.get("missing").is_none());
    }

    #[test]
    fn semantic_eq_ignores_member_order() {
        let ab = object(vec![
            member("a", Value::Number(1)),
            member("b", Value::Number(2)),
        ]);
        let ba = object(vec![
            member("b", Value::Number(2)),
            member("a", Value::Number(1)),
        ]);
        assert_ne!(ab, ba);
        assert!(ab.semantic_eq(&ba));

        let ac = object(vec![
            member("a", Value::Number(1)),
            member("c", Value::Number(2)),
        ]);
        assert!(!ab.semantic_eq(&ac));
    }

    #[test]
    fn semantic_eq_keeps_array_order() {
        let a = bare(Value::Array(vec![
            bare(Value::Number(1)),
            bare(Value::Number(2)),
        ]));
        let b = bare(Value::Array(vec![
            bare(Value::Number(2)),
            bare(Value::Number(1)),
        ]));
        assert!(!a.semantic_eq(&b));
    }

    #[test]
    fn error_display_names_the_offset() {
        let msg = JsonError::UnexpectedChar { ch: '!', offset: 4 }.to_string();
        assert!(msg.contains("'!'") && msg.contains('4'));
    }
}
