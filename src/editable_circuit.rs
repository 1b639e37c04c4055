//! `EditableCircuit`: the public façade over [`Modifier`] (spec.md §4.8,
//! §6). Owns the selection-guard helpers, the lazily-composed visible
//! selection, and thin wrappers that expose every §6.1/§6.2 operation
//! without handing out the raw `Modifier` or its indices.

use circuit_geometry::RectFine;
use circuit_index::SpatialPayload;
use circuit_layout::{AttrsClockGenerator, AttrsTextElement, DecorationData, Layout, LogicItemData, SegmentInfo};
use circuit_modifier::Modifier;
use circuit_selection::{Selection, SelectionGuard};
use circuit_types::{
    CacheState, DecorationId, InsertionMode, LogicItemId, OrderedLine, Point, Segment, SegmentIndex,
    SegmentPart, SegmentPointType, SelectionId, WireId, TEMPORARY_WIRE_ID,
};

use crate::connector::Connector;
use crate::error::EditableCircuitError;
use crate::line_tree::{derive_line_tree, LineTree};

/// Whether a rectangular visible-selection operation adds to or subtracts
/// from the set of hits found under its rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperation {
    Add,
    Subtract,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct RectangularSelectionOp {
    operation: SetOperation,
    rect: RectFine,
}

/// One concrete member of a [`Selection`] (spec.md §6.2's `add_to_selection`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionItem {
    LogicItem(LogicItemId),
    Decoration(DecorationId),
    SegmentPart(SegmentPart),
}

#[derive(Debug, Clone, Default)]
pub struct EditableCircuit {
    modifier: Modifier,
    visible_selection_ops: Vec<RectangularSelectionOp>,
}

impl EditableCircuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construction used by tests: every broadcast message is additionally
    /// checked for Inserted/Uninserted balance.
    pub fn with_validator() -> Self {
        Self {
            modifier: Modifier::with_validator(),
            visible_selection_ops: Vec::new(),
        }
    }

    // ---- §6.1 query surface ----

    pub fn layout(&self) -> &Layout {
        &self.modifier.data.layout
    }

    pub fn spatial_query(&self, rect: RectFine) -> Vec<SpatialPayload> {
        self.modifier.data.indices.spatial.query_selection(rect)
    }

    pub fn point_to_connector(&self, point: Point) -> Option<Connector> {
        if let Some(entry) = self.modifier.data.indices.logic_item_inputs.get(point) {
            return Some(Connector::LogicItemInput(entry));
        }
        if let Some(entry) = self.modifier.data.indices.logic_item_outputs.get(point) {
            return Some(Connector::LogicItemOutput(entry));
        }
        if let Some(entry) = self.modifier.data.indices.wire_inputs.get(point) {
            return Some(Connector::WireInput(entry));
        }
        if let Some(entry) = self.modifier.data.indices.wire_outputs.get(point) {
            return Some(Connector::WireOutput(entry));
        }
        None
    }

    pub fn collision_state(&self, point: Point) -> Option<CacheState> {
        self.modifier.data.indices.collision.state_at(point)
    }

    pub fn selection(&self, id: SelectionId) -> Result<&Selection, EditableCircuitError> {
        Ok(self.modifier.data.selection_store.get(id)?)
    }

    /// The base stored selection composed with every pending rectangular
    /// add/subtract operation, evaluated fresh each call (spec.md §4.8).
    pub fn visible_selection(&self) -> Selection {
        let mut result = self.modifier.data.visible_selection.clone();
        for op in &self.visible_selection_ops {
            self.apply_rect_op(&mut result, op);
        }
        result
    }

    fn apply_rect_op(&self, selection: &mut Selection, op: &RectangularSelectionOp) {
        for payload in self.modifier.data.indices.spatial.query_selection(op.rect) {
            match payload {
                SpatialPayload::LogicItem(id) => match op.operation {
                    SetOperation::Add => selection.add_logic_item(id),
                    SetOperation::Subtract => selection.remove_logic_item(id),
                },
                SpatialPayload::Decoration(id) => match op.operation {
                    SetOperation::Add => selection.add_decoration(id),
                    SetOperation::Subtract => selection.remove_decoration(id),
                },
                SpatialPayload::Segment(segment) => {
                    let Ok(tree) = self.modifier.data.layout.wires.tree(segment.wire_id) else {
                        continue;
                    };
                    let Ok(full) = tree.part(segment.segment_index) else {
                        continue;
                    };
                    let segment_part = SegmentPart::new(segment, full);
                    match op.operation {
                        SetOperation::Add => selection.add_segment_part(segment_part),
                        SetOperation::Subtract => selection.remove_segment_part(segment_part),
                    }
                }
            }
        }
    }

    pub fn line_tree_of(&self, wire_id: WireId) -> Result<LineTree, EditableCircuitError> {
        let tree = self.modifier.data.layout.wires.tree(wire_id)?;
        Ok(derive_line_tree(tree)?)
    }

    // ---- §6.2 logic item lifecycle ----

    pub fn add_logic_item(
        &mut self,
        data: LogicItemData,
        mode: InsertionMode,
    ) -> Result<LogicItemId, EditableCircuitError> {
        Ok(self.modifier.add_logic_item(data, mode)?)
    }

    pub fn delete_logic_item(&mut self, id: LogicItemId) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.delete_temporary_logicitem(id)?)
    }

    pub fn change_logic_item_insertion_mode(
        &mut self,
        id: LogicItemId,
        mode: InsertionMode,
    ) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.change_logicitem_insertion_mode(id, mode)?)
    }

    pub fn move_or_delete_logic_item(
        &mut self,
        id: LogicItemId,
        dx: i32,
        dy: i32,
    ) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.move_or_delete_temporary_logicitem(id, dx, dy)?)
    }

    /// Set a logic item's clock-generator attributes directly on the layout
    /// store. Not a `Modifier` primitive: attribute edits carry no
    /// collision/insertion semantics, so there is no matching `InfoMessage`
    /// or undo entry (see DESIGN.md).
    pub fn set_logic_item_attributes(
        &mut self,
        id: LogicItemId,
        attrs: AttrsClockGenerator,
    ) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.data.layout.logic_items.set_attributes(id, attrs)?)
    }

    // ---- §6.2 decoration lifecycle (mirror of logic item) ----

    pub fn add_decoration(
        &mut self,
        data: DecorationData,
        mode: InsertionMode,
    ) -> Result<DecorationId, EditableCircuitError> {
        Ok(self.modifier.add_decoration(data, mode)?)
    }

    pub fn delete_decoration(&mut self, id: DecorationId) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.delete_temporary_decoration(id)?)
    }

    pub fn change_decoration_insertion_mode(
        &mut self,
        id: DecorationId,
        mode: InsertionMode,
    ) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.change_decoration_insertion_mode(id, mode)?)
    }

    pub fn move_or_delete_decoration(
        &mut self,
        id: DecorationId,
        dx: i32,
        dy: i32,
    ) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.move_or_delete_temporary_decoration(id, dx, dy)?)
    }

    pub fn set_decoration_attributes(
        &mut self,
        id: DecorationId,
        attrs: AttrsTextElement,
    ) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.data.layout.decorations.set_attributes(id, attrs)?)
    }

    // ---- §6.2 wire lifecycle ----

    /// Append `line` to the temporary wire, then transition it to `mode`
    /// (a no-op for `InsertionMode::Temporary`). Returns the segment's id
    /// *before* any insertion-mode transition — `change_wire_insertion_mode`
    /// does not hand back the relocated id, matching `Modifier`'s own
    /// scoping (see DESIGN.md).
    pub fn add_wire_segment(
        &mut self,
        line: OrderedLine,
        mode: InsertionMode,
    ) -> Result<Segment, EditableCircuitError> {
        let info = SegmentInfo::new(line, SegmentPointType::ShadowPoint, SegmentPointType::ShadowPoint);
        let idx = self.modifier.add_segment(TEMPORARY_WIRE_ID, info)?;
        let segment = Segment::new(TEMPORARY_WIRE_ID, idx);
        if mode != InsertionMode::Temporary {
            let part = circuit_geometry::to_part(line);
            self.modifier
                .change_wire_insertion_mode(SegmentPart::new(segment, part), mode)?;
        }
        Ok(segment)
    }

    pub fn change_wire_insertion_mode(
        &mut self,
        part: SegmentPart,
        mode: InsertionMode,
    ) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.change_wire_insertion_mode(part, mode)?)
    }

    /// Translate every segment of an uninserted wire tree by `(dx, dy)`.
    /// Scoped down from a full `Modifier` primitive: there is no
    /// `HistoryEntry` variant for a bulk segment move, so this bypasses
    /// history and the `InfoMessage` broadcast entirely (temporary/colliding
    /// wires carry no spatial or collision footprint to keep in sync
    /// either). See DESIGN.md.
    pub fn move_temporary(
        &mut self,
        wire_id: WireId,
        dx: i32,
        dy: i32,
    ) -> Result<(), EditableCircuitError> {
        if wire_id.is_inserted_candidate() {
            return Err(EditableCircuitError::NotUninsertedWire(wire_id));
        }
        let indices: Vec<SegmentIndex> = self.modifier.data.layout.wires.tree(wire_id)?.indices().collect();
        for idx in indices {
            let tree = self.modifier.data.layout.wires.tree_mut(wire_id)?;
            let info = tree.info(idx)?;
            let p0 = Point::new(
                info.line.p0().x.checked_add(dx).ok_or(EditableCircuitError::PositionOutOfRange(wire_id))?,
                info.line.p0().y.checked_add(dy).ok_or(EditableCircuitError::PositionOutOfRange(wire_id))?,
            );
            let p1 = Point::new(
                info.line.p1().x.checked_add(dx).ok_or(EditableCircuitError::PositionOutOfRange(wire_id))?,
                info.line.p1().y.checked_add(dy).ok_or(EditableCircuitError::PositionOutOfRange(wire_id))?,
            );
            let moved = OrderedLine::new(p0, p1).map_err(|_| EditableCircuitError::PositionOutOfRange(wire_id))?;
            tree.update_segment(idx, SegmentInfo::new(moved, info.p0_type, info.p1_type))?;
        }
        Ok(())
    }

    pub fn regularize_temporary_selection(
        &mut self,
        selection: &Selection,
        true_crosspoints: &[Point],
    ) -> Result<(), EditableCircuitError> {
        Ok(self
            .modifier
            .regularize_temporary_selection(selection, true_crosspoints)?)
    }

    pub fn split_temporary_segments(
        &mut self,
        selection: &Selection,
        points: &[Point],
    ) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.split_temporary_segments(selection, points)?)
    }

    /// Merge two uninserted, collinear, touching segments of the same wire
    /// into one.
    pub fn merge_uninserted_segment(
        &mut self,
        wire_id: WireId,
        a: SegmentIndex,
        b: SegmentIndex,
    ) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.merge_uninserted_segment(wire_id, a, b)?)
    }

    /// Overwrite the endpoint types of a temporary segment.
    pub fn set_temporary_endpoints(
        &mut self,
        wire_id: WireId,
        idx: SegmentIndex,
        p0_type: SegmentPointType,
        p1_type: SegmentPointType,
    ) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.set_temporary_endpoints(wire_id, idx, p0_type, p1_type)?)
    }

    // ---- §6.2 selections ----

    pub fn create_selection(&mut self) -> SelectionId {
        self.modifier.data.selection_store.create()
    }

    pub fn destroy_selection(&mut self, id: SelectionId) {
        self.modifier.data.selection_store.destroy(id);
    }

    /// RAII helper: the returned guard's selection is destroyed automatically
    /// when it drops, even on an early return (spec.md §4.8).
    pub fn selection_guard(&mut self) -> SelectionGuard<'_> {
        SelectionGuard::new(&mut self.modifier.data.selection_store)
    }

    pub fn add_to_selection(
        &mut self,
        id: SelectionId,
        item: SelectionItem,
    ) -> Result<(), EditableCircuitError> {
        let selection = self.modifier.data.selection_store.get_mut(id)?;
        match item {
            SelectionItem::LogicItem(id) => selection.add_logic_item(id),
            SelectionItem::Decoration(id) => selection.add_decoration(id),
            SelectionItem::SegmentPart(part) => selection.add_segment_part(part),
        }
        Ok(())
    }

    /// Replace the persisted base of the visible selection wholesale and
    /// drop any pending rectangular operations.
    pub fn set_visible_selection(&mut self, selection: Selection) {
        self.modifier.data.visible_selection = selection;
        self.visible_selection_ops.clear();
    }

    /// Queue one rectangular add/subtract operation, applied lazily by
    /// every subsequent [`Self::visible_selection`] call.
    pub fn add_visible_selection_rect(&mut self, operation: SetOperation, rect: RectFine) {
        self.visible_selection_ops.push(RectangularSelectionOp { operation, rect });
    }

    /// Fold every pending rectangular operation into the persisted base
    /// selection and clear the stack (spec.md §6.2 `apply_visible_operations`).
    pub fn apply_visible_operations(&mut self) {
        let composed = self.visible_selection();
        self.modifier.data.visible_selection = composed;
        self.visible_selection_ops.clear();
    }

    // ---- §6.2 history ----

    /// No-op placeholder: every `Modifier` primitive already commits its own
    /// elementary undo group on completion, so there is nothing to open here
    /// (see DESIGN.md for why bulk-edit group bundling is out of scope).
    pub fn begin_group(&mut self) {}

    pub fn can_undo(&self) -> bool {
        self.modifier.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.modifier.can_redo()
    }

    pub fn undo_group(&mut self) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.undo()?)
    }

    pub fn redo_group(&mut self) -> Result<(), EditableCircuitError> {
        Ok(self.modifier.redo()?)
    }

    pub fn enable_history(&mut self) {
        self.modifier.data.history.set_enabled(true);
    }

    pub fn disable_history(&mut self) {
        self.modifier.data.history.set_enabled(false);
    }
}
