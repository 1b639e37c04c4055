//! Column-oriented storage for logic items, decorations, and wires
//! (spec.md §4.3). Every table is a set of parallel `Vec`s indexed by the
//! entity's dense id; sparse per-type attributes live in a side `HashMap`
//! keyed by the same id, since only a few element/decoration types carry
//! extra data.

use ahash::AHashMap;
use circuit_geometry::Rect;
use circuit_types::{
    ConnectionCount, DecorationId, DecorationType, Delay, DisplayState, ElementType, InverterList,
    LogicItemId, Offset, OutputDelayList, Point, Rotation, WireId,
};
use std::fmt;
use tracing::trace;

use crate::segment_tree::SegmentTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("logic item id {0:?} out of range")]
    LogicItemOutOfRange(LogicItemId),
    #[error("decoration id {0:?} out of range")]
    DecorationOutOfRange(DecorationId),
    #[error("wire id {0:?} out of range")]
    WireOutOfRange(WireId),
    #[error("wire id {0:?} is reserved and cannot be removed")]
    ReservedWireId(WireId),
}

/// Clock-generator specific timing attributes, grounded on
/// `attrs_clock_generator` (`schematic_generation.cpp`): either a single
/// symmetric period or independent on/off durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrsClockGenerator {
    pub is_symmetric: bool,
    pub time_symmetric: Delay,
    pub time_on: Delay,
    pub time_off: Delay,
}

impl Default for AttrsClockGenerator {
    fn default() -> Self {
        Self {
            is_symmetric: true,
            time_symmetric: Delay::from_nanos(1_000_000_000),
            time_on: Delay::from_nanos(1_000_000_000),
            time_off: Delay::from_nanos(1_000_000_000),
        }
    }
}

/// Text-decoration attributes (`attributes_text_element_t`): the displayed
/// string and the width it reserves on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrsTextElement {
    pub text: String,
    pub width: Offset,
}

impl Default for AttrsTextElement {
    fn default() -> Self {
        Self {
            text: String::new(),
            width: Offset::new(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicItemData {
    pub element_type: ElementType,
    pub input_count: ConnectionCount,
    pub output_count: ConnectionCount,
    pub position: Point,
    pub rotation: Rotation,
    pub sub_circuit_id: Option<u32>,
    pub input_inverters: InverterList,
    pub output_inverters: InverterList,
    pub output_delays: OutputDelayList,
    pub display_state: DisplayState,
    pub bounding_rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecorationData {
    pub decoration_type: DecorationType,
    pub size: (Offset, Offset),
    pub position: Point,
    pub display_state: DisplayState,
    pub bounding_rect: Rect,
}

/// Parallel-vector store of every logic item in the layout.
#[derive(Debug, Clone, Default)]
pub struct LogicItemStore {
    items: Vec<LogicItemData>,
    attrs_clock_generator: AHashMap<LogicItemId, AttrsClockGenerator>,
}

impl LogicItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self, id: LogicItemId) -> Result<usize, LayoutError> {
        let i = id.value() as usize;
        if i >= self.items.len() {
            return Err(LayoutError::LogicItemOutOfRange(id));
        }
        Ok(i)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = LogicItemId> + '_ {
        (0..self.items.len()).map(|i| LogicItemId::new(i as u32))
    }

    pub fn data(&self, id: LogicItemId) -> Result<&LogicItemData, LayoutError> {
        Ok(&self.items[self.check(id)?])
    }

    pub fn attrs_clock_generator(&self, id: LogicItemId) -> Option<&AttrsClockGenerator> {
        self.attrs_clock_generator.get(&id)
    }

    pub fn add(&mut self, data: LogicItemData) -> LogicItemId {
        self.items.push(data);
        let id = LogicItemId::new((self.items.len() - 1) as u32);
        trace!(target: "layout.logic_items", id = %id, "add");
        id
    }

    /// Remove `id` via swap-and-delete, returning the id of the item that
    /// was relocated into its slot (if any) so the caller can rebind every
    /// index entry pointing at the old id.
    pub fn swap_and_delete(&mut self, id: LogicItemId) -> Result<Option<LogicItemId>, LayoutError> {
        let i = self.check(id)?;
        self.attrs_clock_generator.remove(&id);
        let last = self.items.len() - 1;
        let relocated = if i != last {
            self.items.swap_remove(i);
            let last_id = LogicItemId::new(last as u32);
            if let Some(attrs) = self.attrs_clock_generator.remove(&last_id) {
                self.attrs_clock_generator.insert(id, attrs);
            }
            Some(last_id)
        } else {
            self.items.pop();
            None
        };
        Ok(relocated)
    }

    pub fn swap_items(&mut self, a: LogicItemId, b: LogicItemId) -> Result<(), LayoutError> {
        let ia = self.check(a)?;
        let ib = self.check(b)?;
        self.items.swap(ia, ib);
        let attrs_a = self.attrs_clock_generator.remove(&a);
        let attrs_b = self.attrs_clock_generator.remove(&b);
        if let Some(v) = attrs_a {
            self.attrs_clock_generator.insert(b, v);
        }
        if let Some(v) = attrs_b {
            self.attrs_clock_generator.insert(a, v);
        }
        Ok(())
    }

    pub fn set_position(&mut self, id: LogicItemId, position: Point) -> Result<(), LayoutError> {
        let i = self.check(id)?;
        self.items[i].position = position;
        Ok(())
    }

    pub fn set_display_state(
        &mut self,
        id: LogicItemId,
        state: DisplayState,
    ) -> Result<(), LayoutError> {
        let i = self.check(id)?;
        self.items[i].display_state = state;
        Ok(())
    }

    pub fn set_attributes(&mut self, id: LogicItemId, attrs: AttrsClockGenerator) -> Result<(), LayoutError> {
        self.check(id)?;
        self.attrs_clock_generator.insert(id, attrs);
        Ok(())
    }

    /// Sort items by `(position, element_type)` and re-key the attribute
    /// map so two visually-equal layouts compare equal regardless of
    /// insertion order.
    pub fn normalize(&mut self) {
        let mut indexed: Vec<(usize, LogicItemData)> =
            self.items.drain(..).enumerate().collect();
        indexed.sort_by(|(_, a), (_, b)| {
            (a.position, format!("{:?}", a.element_type))
                .cmp(&(b.position, format!("{:?}", b.element_type)))
        });
        let mut new_attrs = AHashMap::new();
        for (new_i, (old_i, data)) in indexed.iter().enumerate() {
            let old_id = LogicItemId::new(*old_i as u32);
            if let Some(attrs) = self.attrs_clock_generator.get(&old_id) {
                new_attrs.insert(LogicItemId::new(new_i as u32), *attrs);
            }
            let _ = data;
        }
        self.items = indexed.into_iter().map(|(_, data)| data).collect();
        self.attrs_clock_generator = new_attrs;
    }
}

/// Parallel-vector store of every decoration in the layout.
#[derive(Debug, Clone, Default)]
pub struct DecorationStore {
    items: Vec<DecorationData>,
    attrs_text_element: AHashMap<DecorationId, AttrsTextElement>,
}

impl DecorationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self, id: DecorationId) -> Result<usize, LayoutError> {
        let i = id.value() as usize;
        if i >= self.items.len() {
            return Err(LayoutError::DecorationOutOfRange(id));
        }
        Ok(i)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = DecorationId> + '_ {
        (0..self.items.len()).map(|i| DecorationId::new(i as u32))
    }

    pub fn data(&self, id: DecorationId) -> Result<&DecorationData, LayoutError> {
        Ok(&self.items[self.check(id)?])
    }

    pub fn attrs_text_element(&self, id: DecorationId) -> Option<&AttrsTextElement> {
        self.attrs_text_element.get(&id)
    }

    pub fn add(&mut self, data: DecorationData) -> DecorationId {
        self.items.push(data);
        DecorationId::new((self.items.len() - 1) as u32)
    }

    pub fn swap_and_delete(
        &mut self,
        id: DecorationId,
    ) -> Result<Option<DecorationId>, LayoutError> {
        let i = self.check(id)?;
        self.attrs_text_element.remove(&id);
        let last = self.items.len() - 1;
        let relocated = if i != last {
            self.items.swap_remove(i);
            let last_id = DecorationId::new(last as u32);
            if let Some(attrs) = self.attrs_text_element.remove(&last_id) {
                self.attrs_text_element.insert(id, attrs);
            }
            Some(last_id)
        } else {
            self.items.pop();
            None
        };
        Ok(relocated)
    }

    pub fn swap_items(&mut self, a: DecorationId, b: DecorationId) -> Result<(), LayoutError> {
        let ia = self.check(a)?;
        let ib = self.check(b)?;
        self.items.swap(ia, ib);
        let attrs_a = self.attrs_text_element.remove(&a);
        let attrs_b = self.attrs_text_element.remove(&b);
        if let Some(v) = attrs_a {
            self.attrs_text_element.insert(b, v);
        }
        if let Some(v) = attrs_b {
            self.attrs_text_element.insert(a, v);
        }
        Ok(())
    }

    pub fn set_position(&mut self, id: DecorationId, position: Point) -> Result<(), LayoutError> {
        let i = self.check(id)?;
        self.items[i].position = position;
        Ok(())
    }

    pub fn set_display_state(
        &mut self,
        id: DecorationId,
        state: DisplayState,
    ) -> Result<(), LayoutError> {
        let i = self.check(id)?;
        self.items[i].display_state = state;
        Ok(())
    }

    pub fn set_attributes(
        &mut self,
        id: DecorationId,
        attrs: AttrsTextElement,
    ) -> Result<(), LayoutError> {
        self.check(id)?;
        self.attrs_text_element.insert(id, attrs);
        Ok(())
    }

    /// Sorts the parallel vectors together with a zipped key so two
    /// visually-equivalent decoration sets compare equal after
    /// normalization, independent of insertion order.
    pub fn normalize(&mut self) {
        let mut indexed: Vec<(usize, DecorationData)> =
            self.items.drain(..).enumerate().collect();
        indexed.sort_by_key(|(_, d)| d.position);
        let mut new_attrs = AHashMap::new();
        for (new_i, (old_i, _)) in indexed.iter().enumerate() {
            let old_id = DecorationId::new(*old_i as u32);
            if let Some(attrs) = self.attrs_text_element.get(&old_id) {
                new_attrs.insert(DecorationId::new(new_i as u32), attrs.clone());
            }
        }
        self.items = indexed.into_iter().map(|(_, data)| data).collect();
        self.attrs_text_element = new_attrs;
    }
}

/// One `SegmentTree` per wire id. Ids `0`/`1` are the reserved temporary and
/// colliding wires and are always present, never removed.
#[derive(Debug, Clone, Default)]
pub struct WireStore {
    trees: Vec<SegmentTree>,
}

impl WireStore {
    pub fn new() -> Self {
        let mut trees = Vec::new();
        trees.push(SegmentTree::new()); // temporary_wire_id
        trees.push(SegmentTree::new()); // colliding_wire_id
        Self { trees }
    }

    fn check(&self, id: WireId) -> Result<usize, LayoutError> {
        let i = id.value() as usize;
        if i >= self.trees.len() {
            return Err(LayoutError::WireOutOfRange(id));
        }
        Ok(i)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = WireId> + '_ {
        (0..self.trees.len()).map(|i| WireId::new(i as u32))
    }

    pub fn tree(&self, id: WireId) -> Result<&SegmentTree, LayoutError> {
        Ok(&self.trees[self.check(id)?])
    }

    pub fn tree_mut(&mut self, id: WireId) -> Result<&mut SegmentTree, LayoutError> {
        let i = self.check(id)?;
        Ok(&mut self.trees[i])
    }

    pub fn add(&mut self, tree: SegmentTree) -> WireId {
        self.trees.push(tree);
        WireId::new((self.trees.len() - 1) as u32)
    }

    pub fn swap_and_delete(&mut self, id: WireId) -> Result<Option<WireId>, LayoutError> {
        if id.is_temporary() || id.is_colliding() {
            return Err(LayoutError::ReservedWireId(id));
        }
        let i = self.check(id)?;
        let last = self.trees.len() - 1;
        let relocated = if i != last {
            self.trees.swap_remove(i);
            Some(WireId::new(last as u32))
        } else {
            self.trees.pop();
            None
        };
        Ok(relocated)
    }
}

/// The full layout: three independent tables sharing nothing but ids.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub logic_items: LogicItemStore,
    pub decorations: DecorationStore,
    pub wires: WireStore,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout({} logic items, {} decorations, {} wires)",
            self.logic_items.len(),
            self.decorations.len(),
            self.wires.len()
        )
    }
}

impl Layout {
    pub fn new() -> Self {
        Self {
            logic_items: LogicItemStore::new(),
            decorations: DecorationStore::new(),
            wires: WireStore::new(),
        }
    }

    pub fn normalize(&mut self) {
        self.logic_items.normalize();
        self.decorations.normalize();
    }
}
