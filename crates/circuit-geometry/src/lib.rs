//! Orthogonal-line and part-interval algebra: the predicates, conversions,
//! and rectangle tests that `circuit-layout` and `circuit-index` build on,
//! plus the invariant-enforcing `PartSelection` container.

pub mod conversions;
pub mod part_selection;
pub mod predicates;
pub mod rect;

pub use conversions::{offset_of_point, to_line, to_part, to_part_from_line};
pub use part_selection::{PartSelection, PartSelectionError};
pub use predicates::*;
pub use rect::{Rect, RectFine};
