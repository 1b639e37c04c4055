//! `Indices`: every derived lookup structure bundled together and kept in
//! lock-step with the layout by replaying the same `InfoMessage` stream
//! `Modifier` emits (spec.md §4.4). Only logic items and decorations get a
//! stable [`Key`] — grounded on `decoration_key_t` being the only key type
//! visible in `core/component/editable_circuit/circuit_data.h`; wires and
//! segments are never referenced by external key in this codebase.

use circuit_index::{
    CollisionIndex, Key, KeyIndex, LogicItemInputIndex, LogicItemOutputIndex, SpatialIndex,
    SpatialPayload, WireInputIndex, WireOutputIndex,
};
use circuit_message::InfoMessage;
use circuit_types::{DecorationId, LogicItemId};

use crate::wire_editing::collect_line_points as line_points;

#[derive(Debug, Clone, Default)]
pub struct Indices {
    pub collision: CollisionIndex,
    pub spatial: SpatialIndex,
    pub logic_item_inputs: LogicItemInputIndex,
    pub logic_item_outputs: LogicItemOutputIndex,
    pub wire_inputs: WireInputIndex,
    pub wire_outputs: WireOutputIndex,
    pub keys_logic_item: KeyIndex<LogicItemId>,
    pub keys_decoration: KeyIndex<DecorationId>,
}

impl Indices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_for_logic_item(&self, id: LogicItemId) -> Option<Key> {
        self.keys_logic_item.key_for(id).ok()
    }

    pub fn key_for_decoration(&self, id: DecorationId) -> Option<Key> {
        self.keys_decoration.key_for(id).ok()
    }

    /// Rewrite every connector-index entry whose embedded logic-item id is
    /// `old` to `new`. Connector entries are keyed by grid point, not id, so
    /// an id change (swap-and-delete relocation) has to be found by a linear
    /// scan rather than a direct lookup.
    fn rebind_logic_item_connectors(&mut self, old: LogicItemId, new: LogicItemId) {
        let inputs: Vec<_> = self
            .logic_item_inputs
            .iter()
            .filter(|(_, e)| e.logic_item_id == old)
            .collect();
        for (point, mut entry) in inputs {
            self.logic_item_inputs.remove(point);
            entry.logic_item_id = new;
            self.logic_item_inputs.insert(point, entry);
        }
        let outputs: Vec<_> = self
            .logic_item_outputs
            .iter()
            .filter(|(_, e)| e.logic_item_id == old)
            .collect();
        for (point, mut entry) in outputs {
            self.logic_item_outputs.remove(point);
            entry.logic_item_id = new;
            self.logic_item_outputs.insert(point, entry);
        }
    }

    fn rebind_logic_item_spatial(&mut self, old: LogicItemId, new: LogicItemId, data: &circuit_layout::LogicItemData) {
        let rect = data.bounding_rect.to_fine_padded();
        self.spatial.remove(SpatialPayload::LogicItem(old), rect);
        self.spatial.insert(SpatialPayload::LogicItem(new), rect);
    }

    /// React to one broadcast message, keeping every index consistent with
    /// the layout mutation that produced it.
    pub fn submit(&mut self, msg: &InfoMessage) {
        match msg {
            InfoMessage::LogicItemCreated { id } => {
                self.keys_logic_item.allocate(*id);
            }
            InfoMessage::LogicItemIdUpdated { old, new } => {
                self.keys_logic_item.rebind_id(*old, *new);
            }
            InfoMessage::LogicItemDeleted { id } => {
                self.keys_logic_item.remove_by_id(*id);
            }
            InfoMessage::LogicItemInserted { id, data } => {
                let rect = data.bounding_rect.to_fine_padded();
                self.spatial.insert(SpatialPayload::LogicItem(*id), rect);
                self.collision.set(data.position, circuit_types::CacheState::ElementBody);
            }
            InfoMessage::InsertedLogicItemIdUpdated { old, new, data } => {
                self.keys_logic_item.rebind_id(*old, *new);
                self.rebind_logic_item_spatial(*old, *new, data);
                self.rebind_logic_item_connectors(*old, *new);
            }
            InfoMessage::LogicItemUninserted { id, data } => {
                let rect = data.bounding_rect.to_fine_padded();
                self.spatial.remove(SpatialPayload::LogicItem(*id), rect);
                self.collision.clear(data.position);
            }

            InfoMessage::DecorationCreated { id } => {
                self.keys_decoration.allocate(*id);
            }
            InfoMessage::DecorationIdUpdated { old, new } => {
                self.keys_decoration.rebind_id(*old, *new);
            }
            InfoMessage::DecorationDeleted { id } => {
                self.keys_decoration.remove_by_id(*id);
            }
            InfoMessage::DecorationInserted { id, data } => {
                let rect = data.bounding_rect.to_fine_padded();
                self.spatial.insert(SpatialPayload::Decoration(*id), rect);
            }
            InfoMessage::InsertedDecorationIdUpdated { old, new, data } => {
                self.keys_decoration.rebind_id(*old, *new);
                let rect = data.bounding_rect.to_fine_padded();
                self.spatial.remove(SpatialPayload::Decoration(*old), rect);
                self.spatial.insert(SpatialPayload::Decoration(*new), rect);
            }
            InfoMessage::DecorationUninserted { id, data } => {
                let rect = data.bounding_rect.to_fine_padded();
                self.spatial.remove(SpatialPayload::Decoration(*id), rect);
            }

            InfoMessage::SegmentInserted { segment, info } => {
                let rect = circuit_geometry::Rect::new(info.line.p0(), info.line.p1()).to_fine_padded();
                self.spatial.insert(SpatialPayload::Segment(*segment), rect);
                let incoming = wire_cache_state(info.line);
                for point in line_points(info.line) {
                    let combined = self.collision.check_and_combine(point, incoming).unwrap_or(incoming);
                    self.collision.set(point, combined);
                }
            }
            InfoMessage::InsertedSegmentIdUpdated { old, new, info } => {
                let rect = circuit_geometry::Rect::new(info.line.p0(), info.line.p1()).to_fine_padded();
                self.spatial.remove(SpatialPayload::Segment(*old), rect);
                self.spatial.insert(SpatialPayload::Segment(*new), rect);
            }
            InfoMessage::InsertedEndPointsUpdated { .. } => {
                // Endpoint type changes do not move the segment's line, so
                // neither the spatial nor collision entries need updating.
            }
            InfoMessage::SegmentUninserted { segment, info } => {
                let rect = circuit_geometry::Rect::new(info.line.p0(), info.line.p1()).to_fine_padded();
                self.spatial.remove(SpatialPayload::Segment(*segment), rect);
                for point in line_points(info.line) {
                    self.collision.clear(point);
                }
            }

            // Uninserted segment bookkeeping (create/rekey/move/delete) has
            // no spatial or collision footprint to maintain.
            InfoMessage::SegmentCreated { .. }
            | InfoMessage::SegmentIdUpdated { .. }
            | InfoMessage::SegmentPartMoved { .. }
            | InfoMessage::SegmentPartDeleted { .. } => {}
        }
    }
}

fn wire_cache_state(line: circuit_types::OrderedLine) -> circuit_types::CacheState {
    match line.orientation() {
        circuit_types::Orientation::Horizontal => circuit_types::CacheState::WireHorizontal,
        circuit_types::Orientation::Vertical => circuit_types::CacheState::WireVertical,
    }
}
