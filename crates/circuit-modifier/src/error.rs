//! Failure kinds surfaced by `Modifier` primitives (spec.md §7): invalid
//! arguments and state violations fail fast before any mutation or message
//! is emitted; collisions are not errors (the colliding mode has its own
//! outcome) and so never appear here.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    #[error(transparent)]
    Layout(#[from] circuit_layout::LayoutError),
    #[error(transparent)]
    SegmentTree(#[from] circuit_layout::SegmentTreeError),
    #[error(transparent)]
    PartSelection(#[from] circuit_geometry::PartSelectionError),
    #[error("logic item {0:?} is not in the temporary state required by this primitive")]
    NotTemporary(circuit_types::LogicItemId),
    #[error("segment part does not fall entirely within its segment's current bounds")]
    PartOutOfBounds,
    #[error("segments are not collinear and touching, cannot merge")]
    NotMergeable,
    #[error("the id space for this entity is exhausted")]
    IdSpaceExhausted,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
}
