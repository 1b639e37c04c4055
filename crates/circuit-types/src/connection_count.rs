//! Range-checked connector counts, used both for a `LogicItem`'s declared
//! input/output counts and for `SegmentTree::output_count`.

use std::fmt;

/// Maximum number of connectors any single logic item or segment tree can
/// carry. Chosen generously above real gate arities; exceeding it is a
/// state violation, not a silent clamp.
pub const CONNECTION_COUNT_MAX: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ConnectionCount(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionCountError {
    #[error("connection count {0} exceeds maximum {CONNECTION_COUNT_MAX}")]
    TooLarge(u32),
}

impl ConnectionCount {
    pub const ZERO: ConnectionCount = ConnectionCount(0);

    pub fn new(value: u32) -> Result<Self, ConnectionCountError> {
        if value > CONNECTION_COUNT_MAX as u32 {
            return Err(ConnectionCountError::TooLarge(value));
        }
        Ok(ConnectionCount(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn increment(self) -> Self {
        ConnectionCount(self.0.saturating_add(1))
    }

    pub fn decrement(self) -> Self {
        ConnectionCount(self.0.saturating_sub(1))
    }
}

/// An inclusive `[min, max]` range of legal connector counts for an element
/// type, as returned by `LayoutInfo::for(ElementType)` (spec.md §6.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionCountRange {
    pub min: ConnectionCount,
    pub max: ConnectionCount,
}

impl ConnectionCountRange {
    pub fn fixed(count: ConnectionCount) -> Self {
        Self {
            min: count,
            max: count,
        }
    }

    pub fn contains(self, count: ConnectionCount) -> bool {
        self.min <= count && count <= self.max
    }
}

impl fmt::Display for ConnectionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
