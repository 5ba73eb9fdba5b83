//! Table-driven, non-recursive JSON tree parser.
//!
//! One forward scan turns a JSON buffer into an owned tree of [`Node`]s. An
//! explicit finite-state machine, driven by a fixed transition table and two
//! growable depth stacks (prior states, prior nodes), replaces recursion;
//! nesting is bounded by a configurable maximum instead of the call stack.
//!
//! The dialect is deliberately small: escapes are copied verbatim rather
//! than decoded, and numbers truncate to base-10 integers. Trees render back
//! to text via [`encode`] (into a caller-supplied buffer) or `Display`.
//!
//! ```
//! let root = tabson::parse(r#"{"foo": 1, "bar": [true, null]}"#).unwrap();
//! assert!(root.is_object());
//! assert_eq!(root["foo"].as_i64(), Some(1));
//! assert!(root["bar"][1].is_null());
//! assert_eq!(root.to_string(), r#"{"foo":1,"bar":[true,null]}"#);
//! ```

mod encode;
mod parser;
mod transition;
mod types;

pub use encode::encode;
pub use parser::{parse, Parser, DEFAULT_MAX_DEPTH};
pub use types::{JsonError, Node, NodeIndex, Value};
