//! Vocabulary types shared by every layer of the editable-circuit core:
//! strong ids, grid/line/part geometry primitives, and the small enums used
//! to tag display/insertion state. Nothing in this crate has behavior beyond
//! constructing and validating itself — algorithms live one layer up in
//! `circuit-geometry` and `circuit-layout`.

pub mod connection_count;
pub mod delay;
pub mod enums;
pub mod grid;
pub mod ids;
pub mod small_vec;

pub use connection_count::{ConnectionCount, ConnectionCountError, ConnectionCountRange};
pub use delay::Delay;
pub use enums::{CacheState, DecorationType, DisplayState, ElementType, InsertionMode, Rotation, SegmentPointType};
pub use grid::{Grid, GridError, GridFine, Line, LineError, Offset, OrderedLine, Orientation, Point, PointFine};
pub use ids::{
    DecorationId, LogicItemId, PartCopyDefinition, Segment, SegmentIndex, SegmentPart, SelectionId,
    WireId, COLLIDING_WIRE_ID, FIRST_INSERTED_WIRE_ID, TEMPORARY_WIRE_ID,
};
pub use part::{Part, PartError};
pub use small_vec::{InverterList, OutputDelayList};

pub mod part;
