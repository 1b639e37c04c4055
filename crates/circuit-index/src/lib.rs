//! Derived lookup structures kept in lock-step with a `Layout` by
//! `Modifier`'s `InfoMessage` broadcast (spec.md §4.4): connector point
//! maps, the collision cache, the spatial R-tree, and the stable key/id
//! map. Each index only ever answers queries against its own state; nothing
//! here reaches back into `Layout` except the `validate` test helpers.

pub mod allocated_size;
pub mod collision_index;
pub mod connector_index;
pub mod key_index;
pub mod spatial_index;

pub use allocated_size::AllocatedSize;
pub use collision_index::{CollisionError, CollisionIndex};
pub use connector_index::{
    LogicItemConnectorEntry, LogicItemInputIndex, LogicItemOutputIndex, WireConnectorEntry,
    WireInputIndex, WireOutputIndex,
};
pub use key_index::{Key, KeyIndex, KeyIndexError};
pub use spatial_index::{SpatialIndex, SpatialPayload};
