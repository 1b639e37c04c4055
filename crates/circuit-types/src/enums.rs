//! Small tagged-variant enums shared across the core. These correspond to
//! the polymorphic capability sets in the source implementation
//! (`ElementType`, `SegmentPointType`, `CacheState`, `InsertionMode`,
//! `DisplayState`); each maps to a plain Rust enum here rather than a class
//! hierarchy, per the REDESIGN FLAGS in spec.md §9.

/// The kind of logic item placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    Buffer,
    Not,
    FlipFlopJk,
    LatchD,
    ClockGenerator,
    Led,
    Button,
}

/// The kind of decoration (non-simulated, rendering-only element).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationType {
    TextElement,
}

/// User-facing wire/logic-item insertion intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertionMode {
    Temporary,
    Collisions,
    InsertOrDiscard,
}

/// Rendered-facing state of a logic item, decoration, or wire segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayState {
    Normal,
    Valid,
    Colliding,
    Temporary,
}

impl DisplayState {
    /// A logic item or wire is *inserted* iff its state is `Normal` or `Valid`.
    pub fn is_inserted(self) -> bool {
        matches!(self, DisplayState::Normal | DisplayState::Valid)
    }
}

/// Endpoint classification used to decide rendering and validate invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentPointType {
    Input,
    Output,
    CornerPoint,
    CrossPoint,
    ShadowPoint,
    NewUnknown,
}

impl SegmentPointType {
    pub fn is_input(self) -> bool {
        matches!(self, SegmentPointType::Input)
    }
    pub fn is_output(self) -> bool {
        matches!(self, SegmentPointType::Output)
    }
}

/// Rotation of a logic item (and, transitively, its connectors) on the grid.
/// Distinct from [`crate::grid::Orientation`], which only distinguishes
/// horizontal/vertical wire segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Right,
    Left,
    Up,
    Down,
}

/// What a grid point currently holds, consulted by the `CollisionIndex`
/// before a candidate insertion. `ElementConnection`/`WireConnection` carry
/// the connector's own orientation, the same way `WireHorizontal`/
/// `WireVertical` already carry a wire's, so the collision rule table can
/// require matching orientations before promoting either to
/// `ElementWireConnection` (spec.md §4.7.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheState {
    ElementBody,
    ElementConnection(crate::grid::Orientation),
    WireConnection(crate::grid::Orientation),
    WireHorizontal,
    WireVertical,
    WireCornerPoint,
    WireCrossPoint,
    WireCrossing,
    ElementWireConnection,
}
