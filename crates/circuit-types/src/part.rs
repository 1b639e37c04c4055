//! The `Part` interval type. Algebra over parts (predicates, intersection,
//! difference) lives in `circuit-geometry`; this crate only owns the
//! invariant-checked value type so every other crate can depend on it
//! without pulling in the predicate machinery.

use crate::grid::Offset;
use std::fmt;

/// A half-open offset interval `[begin, end)` along a line. `begin < end`
/// is enforced at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Part {
    begin: Offset,
    end: Offset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PartError {
    #[error("part begin {begin:?} must be strictly less than end {end:?}")]
    NotOrdered { begin: Offset, end: Offset },
}

impl Part {
    pub fn new(begin: Offset, end: Offset) -> Result<Self, PartError> {
        if begin >= end {
            return Err(PartError::NotOrdered { begin, end });
        }
        Ok(Part { begin, end })
    }

    pub fn begin(self) -> Offset {
        self.begin
    }

    pub fn end(self) -> Offset {
        self.end
    }

    /// Length of the interval.
    pub fn distance(self) -> u16 {
        self.end.value() - self.begin.value()
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin.value(), self.end.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_inverted() {
        assert!(Part::new(Offset::new(3), Offset::new(3)).is_err());
        assert!(Part::new(Offset::new(4), Offset::new(3)).is_err());
    }

    #[test]
    fn distance_is_length() {
        let p = Part::new(Offset::new(2), Offset::new(7)).unwrap();
        assert_eq!(p.distance(), 5);
    }
}
