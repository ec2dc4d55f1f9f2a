//! Transition token carried as an inline button payload: `menux/<toId>/<fromId>`.

use std::fmt;

use crate::menu::MenuId;

/// First segment of every transition token.
pub const TRANSITION_PREFIX: &str = "menux";

/// A target/origin menu pair encoded into an inline callback payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionToken {
    pub to: MenuId,
    pub from: MenuId,
}

impl TransitionToken {
    pub fn new(to: MenuId, from: MenuId) -> Self {
        Self { to, from }
    }

    /// Encodes as `menux/<to>/<from>`.
    pub fn encode(&self) -> String {
        format!("{}/{}/{}", TRANSITION_PREFIX, self.to, self.from)
    }

    /// Parses a callback payload. Returns `None` for anything that is not exactly three `/`-separated
    /// parts, the `menux` prefix and two base-10 non-negative integers.
    pub fn parse(payload: &str) -> Option<Self> {
        let mut parts = payload.splitn(3, '/');
        let prefix = parts.next()?;
        let to = parts.next()?;
        let from = parts.next()?;
        if prefix != TRANSITION_PREFIX {
            return None;
        }
        Some(Self {
            to: parse_id(to)?,
            from: parse_id(from)?,
        })
    }
}

impl fmt::Display for TransitionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", TRANSITION_PREFIX, self.to, self.from)
    }
}

/// Digits only: `usize::from_str` alone would also take a leading `+`.
fn parse_id(s: &str) -> Option<MenuId> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().map(MenuId)
}
