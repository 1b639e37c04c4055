//! Propagation delay used by clock generators and per-output timings.
//! The simulation engine consumes this value; the core only stores it.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Delay(u64);

impl Delay {
    pub const ZERO: Delay = Delay(0);

    pub fn from_nanos(nanos: u64) -> Self {
        Delay(nanos)
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_nanos(self.0)
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ns", self.0)
    }
}
