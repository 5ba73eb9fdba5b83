//! The scanning loop: state machine driver, token accumulator and tree
//! builder in one forward pass.
//
//  The driver walks the input one character at a time and consults the
//  transition table. Depth is tracked by two growable stacks: prior states
//  (so escapes and commas can return to where they were) and in-progress
//  nodes (so a close can restore the enclosing container). A close that pops
//  the last node ends the scan and yields the document root; trailing text
//  is ignored, as in the wild most buffers carry a trailing newline.

use log::{debug, trace};

use crate::transition::{lookup, State};
use crate::types::{JsonError, Node, Value};

/// Default maximum nesting depth, counting every open value node.
pub const DEFAULT_MAX_DEPTH: usize = 32;

// The state stack runs slightly ahead of the node stack (escape entries and
// member names push states without opening nodes).
const STATE_STACK_SLACK: usize = 4;

const TOKEN_BUF_DEFAULT: usize = 64;

/// Parse `text` with the default nesting bound.
pub fn parse(text: &str) -> Result<Node, JsonError> {
    Parser::new().parse(text)
}

/// Reusable parser configuration. Each call to [`Parser::parse`] owns its
/// cursor, so one configuration may serve many buffers.
#[derive(Debug, Clone)]
pub struct Parser {
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// The ephemeral state of one scan, discarded when the call returns.
#[derive(Debug)]
struct Cursor {
    state: State,
    /// Prior states, one per open scope or escape.
    states: Vec<State>,
    /// In-progress nodes; the top is the current node.
    nodes: Vec<Node>,
    /// Reusable token buffer; capacity persists across tokens.
    token: String,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the maximum nesting depth (a safety bound, not a fixed
    /// array size).
    pub fn with_max_depth(max_depth: usize) -> Self {
        Parser { max_depth }
    }

    /// Scan one complete buffer into a tree, or fail with no tree exposed.
    pub fn parse(&self, text: &str) -> Result<Node, JsonError> {
        debug!("parse: {} bytes, max depth {}", text.len(), self.max_depth);

        // The scan starts inside a virtual enclosing array so the root value
        // needs no special casing.
        let mut cur = Cursor {
            state: State::Array,
            states: Vec::new(),
            nodes: Vec::new(),
            token: String::with_capacity(TOKEN_BUF_DEFAULT),
        };

        for (offset, ch) in text.char_indices() {
            // Anything that is not ASCII-graphic only separates tokens;
            // inside a token it is kept verbatim. Stray non-ASCII text
            // outside a token is therefore skipped, not rejected.
            if !cur.state.is_token() && !ch.is_ascii_graphic() {
                continue;
            }

            let rule = lookup(cur.state, ch).ok_or(JsonError::UnexpectedChar { ch, offset })?;
            let mut next = rule.to;

            /*──────── state stack ────────*/
            match rule.states {
                1 => {
                    if cur.states.len() >= self.max_depth + STATE_STACK_SLACK {
                        return Err(JsonError::DepthExceeded {
                            limit: self.max_depth,
                        });
                    }
                    cur.states.push(cur.state);
                }
                -1 => {
                    let prior = cur
                        .states
                        .pop()
                        .ok_or(JsonError::UnexpectedChar { ch, offset })?;
                    // Idle is a sentinel: the table did not supply the next
                    // state, the stack does.
                    if next == State::Idle {
                        next = prior;
                    }
                }
                _ => {}
            }

            /*──────── node creation ────────*/
            if rule.nodes > 0 {
                if cur.nodes.len() >= self.max_depth {
                    return Err(JsonError::DepthExceeded {
                        limit: self.max_depth,
                    });
                }
                trace!("open node at depth {} (offset {offset})", cur.nodes.len());
                cur.nodes.push(Node::default());
            }

            // An opening bracket tags the current node; inside objects that
            // node was already created when its name started.
            if !rule.consume {
                if let Some(node) = cur.nodes.last_mut() {
                    match (next, ch) {
                        (State::Array, '[') => node.value = Value::Array(Vec::new()),
                        (State::Object, '{') => node.value = Value::Object(Vec::new()),
                        _ => {}
                    }
                }
            }

            /*──────── token accumulator ────────*/
            // Entering an escape swallows the backslash; the escaped
            // character arrives on the next iteration with its own rule.
            if next != State::Escape {
                if cur.state.is_token() && !next.is_token() {
                    finish_token(&mut cur, offset)?;
                } else if rule.consume || cur.state.is_token() {
                    cur.token.push(ch);
                }
            }

            /*──────── closing scopes ────────*/
            // A cascading close (`]]`, or `]` ending a number and its array)
            // pops twice in one scan step; the pending token above was
            // already materialized into the node being popped.
            if rule.nodes < 0 {
                for _ in 0..rule.nodes.unsigned_abs() {
                    let child = cur
                        .nodes
                        .pop()
                        .ok_or(JsonError::UnexpectedChar { ch, offset })?;
                    match cur.nodes.last_mut() {
                        Some(parent) => {
                            parent
                                .push_child(child)
                                .ok_or(JsonError::UnexpectedChar { ch, offset })?;
                        }
                        None => {
                            // Document closed; anything after it is ignored.
                            debug!("parse: document closed at byte {offset}");
                            return Ok(child);
                        }
                    }
                }
            }

            cur.state = next;
        }

        Err(JsonError::UnexpectedEof { offset: text.len() })
    }
}

/// Materialize the finished token into the current node, per the token state
/// that just ended.
fn finish_token(cur: &mut Cursor, offset: usize) -> Result<(), JsonError> {
    trace!("finish {:?} token {:?}", cur.state, cur.token);
    let node = cur
        .nodes
        .last_mut()
        .ok_or(JsonError::UnexpectedEof { offset })?;
    match cur.state {
        State::Name => node.name = Some(cur.token.clone()),
        State::Str => node.value = Value::String(cur.token.clone()),
        State::Number => node.value = Value::Number(leading_integer(&cur.token)),
        State::Literal => {
            node.value = match cur.token.trim() {
                "null" => Value::Null,
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                other => {
                    return Err(JsonError::InvalidLiteral {
                        literal: other.to_owned(),
                        offset,
                    })
                }
            };
        }
        _ => {}
    }
    cur.token.clear();
    Ok(())
}

/// `atol`-style conversion: optional sign, then the leading run of decimal
/// digits; everything after it (fraction, exponent) is discarded. Saturates
/// instead of overflowing.
fn leading_integer(raw: &str) -> i64 {
    let text = raw.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let mut value: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(b - b'0'));
    }
    if negative {
        -value
    } else {
        value
    }
}
