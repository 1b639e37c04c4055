//! The layout layer: `SegmentTree` wire geometry, its on-demand adjacency
//! helper, and the column-store `Layout` holding logic items, decorations,
//! and wires.

pub mod adjacency;
pub mod layout;
pub mod segment_tree;

pub use adjacency::{AdjacencyGraph, GraphError};
pub use layout::{
    AttrsClockGenerator, AttrsTextElement, DecorationData, DecorationStore, Layout, LayoutError,
    LogicItemData, LogicItemStore, WireStore,
};
pub use segment_tree::{SegmentInfo, SegmentTree, SegmentTreeError};
