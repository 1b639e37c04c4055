//! Inline-storage containers for the small, fixed-cap-in-practice lists
//! attached to logic items. Using `SmallVec` instead of `Vec` avoids a heap
//! allocation for the overwhelming majority of items (spec.md §9 REDESIGN
//! FLAGS: "small-vector optimisation").

use smallvec::SmallVec;

/// Per-input inverter flags. Most gates have 1-3 inputs.
pub type InverterList = SmallVec<[bool; 4]>;

/// Per-output propagation delays. The source caps this at 3.
pub type OutputDelayList = SmallVec<[crate::delay::Delay; 3]>;
