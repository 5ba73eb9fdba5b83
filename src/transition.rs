//! The fixed transition table that drives the scanning loop.
//
//  Each rule maps (source state, inclusive character range) to a destination
//  state, a node-depth delta, a state-depth delta and a consume flag. A rule
//  with `code == ecode == 0` is a wildcard for its source state: it matches
//  any character that no exact rule claimed. Rules are scanned in declared
//  order; the first exact match wins, otherwise the last wildcard seen for
//  the state. A character with no rule at all is a syntax error.

/// Parser state. `Idle` is a sentinel destination meaning "pop the state
/// stack to find out where we were"; the scan never rests in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Idle,
    Escape,
    /// After a colon, expecting a value.
    Value,
    /// After a member name, expecting the colon.
    Colon,
    /// After a closed value, expecting a comma or another close.
    Wait,
    Array,
    Object,
    Name,
    Str,
    Number,
    Literal,
}

impl State {
    /// Token states accumulate characters into the token buffer.
    pub(crate) fn is_token(self) -> bool {
        matches!(self, State::Name | State::Str | State::Number | State::Literal)
    }
}

#[derive(Debug)]
pub(crate) struct Transition {
    pub from: State,
    pub to: State,
    pub code: u8,
    pub ecode: u8,
    /// Structural depth delta: nodes opened (+1) or closed (-1 / -2).
    pub nodes: i8,
    /// State stack delta: +1 pushes the current state, -1 pops one.
    pub states: i8,
    /// Append the current character to the token buffer.
    pub consume: bool,
}

macro_rules! rule {
    ($from:ident => $to:ident, $code:expr, $ecode:expr, $nodes:expr, $states:expr, $consume:expr) => {
        Transition {
            from: State::$from,
            to: State::$to,
            code: $code,
            ecode: $ecode,
            nodes: $nodes,
            states: $states,
            consume: $consume,
        }
    };
}

pub(crate) const TRANSITIONS: &[Transition] = &[
    // object members: name, colon, value
    rule!(Object => Name, b'"', b'"', 1, 1, false),
    rule!(Name => Colon, b'"', b'"', 0, 0, false),
    rule!(Colon => Value, b':', b':', 0, 0, false),
    // escapes: push the interrupted state, copy one character verbatim
    rule!(Str => Escape, b'\\', b'\\', 0, 1, false),
    rule!(Name => Escape, b'\\', b'\\', 0, 1, false),
    rule!(Escape => Idle, 0, 0, 0, -1, true),
    // a value after a colon fills the member node in place
    rule!(Value => Array, b'[', b'[', 0, 0, false),
    rule!(Value => Object, b'{', b'{', 0, 0, false),
    rule!(Value => Number, b'0', b'9', 0, 0, true),
    rule!(Value => Str, b'"', b'"', 0, 0, false),
    rule!(Value => Literal, 0, 0, 0, 0, true),
    // a value inside an array opens a fresh node
    rule!(Array => Array, b'[', b'[', 1, 1, false),
    rule!(Array => Object, b'{', b'{', 1, 1, false),
    rule!(Array => Number, b'0', b'9', 1, 1, true),
    rule!(Array => Str, b'"', b'"', 1, 1, false),
    rule!(Array => Literal, 0, 0, 1, 1, true),
    // closing an empty scope or a string
    rule!(Array => Wait, b']', b']', -1, 0, false),
    rule!(Object => Wait, b'}', b'}', -1, 0, false),
    rule!(Str => Wait, b'"', b'"', -1, 0, false),
    // comma ends the token and returns to the enclosing container state
    rule!(Number => Idle, b',', b',', -1, -1, false),
    rule!(Literal => Idle, b',', b',', -1, -1, false),
    rule!(Wait => Idle, b',', b',', 0, -1, false),
    // cascading closes: the token and its scope fall in one step
    rule!(Number => Wait, b']', b']', -2, -1, false),
    rule!(Literal => Wait, b']', b']', -2, -1, false),
    rule!(Wait => Wait, b']', b']', -1, -1, false),
    rule!(Number => Wait, b'}', b'}', -2, -1, false),
    rule!(Literal => Wait, b'}', b'}', -2, -1, false),
    rule!(Wait => Wait, b'}', b'}', -1, -1, false),
    // token bodies: any character not claimed above stays in the token
    rule!(Name => Name, 0, 0, 0, 0, true),
    rule!(Str => Str, 0, 0, 0, 0, true),
    rule!(Number => Number, 0, 0, 0, 0, true),
    rule!(Literal => Literal, 0, 0, 0, 0, true),
];

/// First exact range match in declared order, else the most recently seen
/// wildcard for `state`, else `None`.
pub(crate) fn lookup(state: State, ch: char) -> Option<&'static Transition> {
    let mut fallback = None;
    for rule in TRANSITIONS {
        if rule.from != state {
            continue;
        }
        if rule.code == 0 && rule.ecode == 0 {
            fallback = Some(rule);
            continue;
        }
        if (rule.code as char) <= ch && ch <= (rule.ecode as char) {
            return Some(rule);
        }
    }
    fallback
}
