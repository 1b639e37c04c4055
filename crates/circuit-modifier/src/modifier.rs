//! `Modifier`: the single mutation path for the layout (spec.md §4.7). Every
//! primitive pushes its undo entry, mutates the layout, and broadcasts the
//! resulting messages through `CircuitData::submit` in that order, then
//! closes its own history group — so a primitive that fails partway through
//! never leaves a committed, partially-applied group behind.

use ahash::AHashSet;
use circuit_history::HistoryEntry;
use circuit_layout::SegmentInfo;
use circuit_message::InfoMessage;
use circuit_selection::Selection;
use circuit_types::{
    CacheState, InsertionMode, OrderedLine, Point, Segment, SegmentIndex, SegmentPart, WireId,
    COLLIDING_WIRE_ID, FIRST_INSERTED_WIRE_ID, TEMPORARY_WIRE_ID,
};

use crate::circuit_data::CircuitData;
use crate::error::ModifierError;
use crate::wire_editing::{
    are_collinear_touching, collect_line_points, fix_endpoints_at, isolate_segment_part,
};

#[derive(Debug, Clone, Default)]
pub struct Modifier {
    pub data: CircuitData,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validator() -> Self {
        Self {
            data: CircuitData::with_validator(),
        }
    }

    fn emit(&mut self, msg: InfoMessage) {
        self.data.submit(&msg);
    }

    fn wire_cache_state(line: OrderedLine) -> CacheState {
        match line.orientation() {
            circuit_types::Orientation::Horizontal => CacheState::WireHorizontal,
            circuit_types::Orientation::Vertical => CacheState::WireVertical,
        }
    }

    /// `true` if any grid point of `line` already holds a state incompatible
    /// with a wire, per the collision rule table (spec.md §4.7.2).
    fn line_collides(&self, line: OrderedLine) -> bool {
        let incoming = Self::wire_cache_state(line);
        collect_line_points(line)
            .into_iter()
            .any(|point| self.data.indices.collision.check_and_combine(point, incoming).is_err())
    }

    /// Append a new, uninserted segment directly to `wire_id`'s tree
    /// (spec.md §4.7.1's `add_segment` primitive — normally used to grow the
    /// temporary wire).
    pub fn add_segment(
        &mut self,
        wire_id: WireId,
        info: SegmentInfo,
    ) -> Result<SegmentIndex, ModifierError> {
        let idx = self.data.layout.wires.tree_mut(wire_id)?.add_segment(info)?;
        let segment = Segment::new(wire_id, idx);
        self.data.history.push(HistoryEntry::AddSegment { segment, info });
        self.emit(InfoMessage::SegmentCreated {
            segment,
            size: info.line.length() as u16,
        });
        self.data.history.commit_group();
        Ok(idx)
    }

    /// Move an uninserted segment from `from`'s tree into `to_wire`'s,
    /// appending there and swap-deleting at the source. There is no single
    /// "transplant" message; a relocation across trees is represented as the
    /// id-rename pair a swap-and-delete already produces (spec.md §4.6).
    fn relocate_uninserted(
        &mut self,
        from: Segment,
        info: SegmentInfo,
        to_wire: WireId,
    ) -> Result<Segment, ModifierError> {
        let new_idx = self.data.layout.wires.tree_mut(to_wire)?.add_segment(info)?;
        let new_segment = Segment::new(to_wire, new_idx);
        self.emit(InfoMessage::SegmentIdUpdated {
            old: from,
            new: new_segment,
        });
        if let Some(relocated) = self
            .data
            .layout
            .wires
            .tree_mut(from.wire_id)?
            .swap_and_delete_segment(from.segment_index)?
        {
            self.emit(InfoMessage::SegmentIdUpdated {
                old: Segment::new(from.wire_id, relocated),
                new: from,
            });
        }
        Ok(new_segment)
    }

    /// Insert `segment` into a freshly allocated wire tree of its own,
    /// recomputing endpoint types at both ends against the now-inserted
    /// wire network (spec.md §4.7.3's destination-wire resolution is
    /// scoped down here to "every newly inserted segment gets its own
    /// wire"; see DESIGN.md).
    fn insert_segment(&mut self, segment: Segment, info: SegmentInfo) -> Result<(), ModifierError> {
        let mut dest_wire = FIRST_INSERTED_WIRE_ID;
        while self.data.layout.wires.tree(dest_wire).is_ok() {
            dest_wire = dest_wire
                .checked_next()
                .ok_or(ModifierError::IdSpaceExhausted)?;
        }
        let allocated = self.data.layout.wires.add(circuit_layout::SegmentTree::new());
        debug_assert_eq!(allocated.value(), dest_wire.value());

        let new_idx = self.data.layout.wires.tree_mut(dest_wire)?.add_segment(info)?;
        let new_segment = Segment::new(dest_wire, new_idx);
        self.emit(InfoMessage::SegmentIdUpdated {
            old: segment,
            new: new_segment,
        });

        if let Some(relocated) = self
            .data
            .layout
            .wires
            .tree_mut(segment.wire_id)?
            .swap_and_delete_segment(segment.segment_index)?
        {
            self.emit(InfoMessage::SegmentIdUpdated {
                old: Segment::new(segment.wire_id, relocated),
                new: segment,
            });
        }

        self.emit(InfoMessage::SegmentInserted {
            segment: new_segment,
            info,
        });

        for point in [info.line.p0(), info.line.p1()] {
            let tree = self.data.layout.wires.tree_mut(dest_wire)?;
            let changed = fix_endpoints_at(
                tree,
                point,
                &self.data.indices.logic_item_outputs,
                &self.data.indices.logic_item_inputs,
            )?;
            for idx in changed {
                let updated_info = tree.info(idx)?;
                self.emit(InfoMessage::InsertedEndPointsUpdated {
                    segment: Segment::new(dest_wire, idx),
                    info: updated_info,
                });
            }
        }
        Ok(())
    }

    /// Transition `part` of a segment between `temporary`, `collisions`, and
    /// `insert_or_discard` (spec.md §4.7.2): isolate the requested sub-range
    /// into its own segment; if it was already inserted, uninsert it onto
    /// the temporary wire first so every transition starts from the same
    /// uninserted state; then move it to the temporary, colliding, or a
    /// freshly inserted wire tree depending on `mode` and collision outcome.
    pub fn change_wire_insertion_mode(
        &mut self,
        part: SegmentPart,
        mode: InsertionMode,
    ) -> Result<(), ModifierError> {
        let original_segment = part.segment;

        let isolated_idx = {
            let tree = self.data.layout.wires.tree_mut(original_segment.wire_id)?;
            isolate_segment_part(tree, original_segment.segment_index, part.part)?
        };
        let mut current = Segment::new(original_segment.wire_id, isolated_idx);
        let mut info = self.data.layout.wires.tree(current.wire_id)?.info(isolated_idx)?;

        let from_mode = wire_mode(current.wire_id);
        self.data.history.push(HistoryEntry::ChangeWireInsertionMode {
            segment: current,
            from: from_mode,
            to: mode,
        });

        if current.wire_id.is_inserted_candidate() {
            self.emit(InfoMessage::SegmentUninserted {
                segment: current,
                info,
            });
            current = self.relocate_uninserted(current, info, TEMPORARY_WIRE_ID)?;
            info = self
                .data
                .layout
                .wires
                .tree(current.wire_id)?
                .info(current.segment_index)?;
        }

        match mode {
            InsertionMode::Temporary => {
                if current.wire_id != TEMPORARY_WIRE_ID {
                    self.relocate_uninserted(current, info, TEMPORARY_WIRE_ID)?;
                }
            }
            InsertionMode::Collisions => {
                if self.line_collides(info.line) {
                    if current.wire_id != COLLIDING_WIRE_ID {
                        self.relocate_uninserted(current, info, COLLIDING_WIRE_ID)?;
                    }
                } else {
                    self.insert_segment(current, info)?;
                }
            }
            InsertionMode::InsertOrDiscard => {
                if self.line_collides(info.line) {
                    // discarded, not an error.
                    if current.wire_id != TEMPORARY_WIRE_ID {
                        self.relocate_uninserted(current, info, TEMPORARY_WIRE_ID)?;
                    }
                } else {
                    self.insert_segment(current, info)?;
                }
            }
        }

        self.data.history.commit_group();
        Ok(())
    }

    /// Merge two uninserted, collinear, touching segments of the same wire
    /// into one (spec.md §4.7.1).
    pub fn merge_uninserted_segment(
        &mut self,
        wire_id: WireId,
        a: SegmentIndex,
        b: SegmentIndex,
    ) -> Result<(), ModifierError> {
        let tree = self.data.layout.wires.tree(wire_id)?;
        let line_a = tree.line(a)?;
        let line_b = tree.line(b)?;
        if !crate::wire_editing::are_collinear_touching(line_a, line_b) {
            return Err(ModifierError::NotMergeable);
        }
        let deleted_info = tree.info(b)?;

        self.data.history.push(HistoryEntry::MergeSegments {
            wire_id,
            merge_to: a,
            deleted: b,
            deleted_info,
        });

        self.data.layout.wires.tree_mut(wire_id)?.swap_and_merge_segment(a, b)?;
        let merged_line = self.data.layout.wires.tree(wire_id)?.line(a)?;
        self.emit(InfoMessage::SegmentPartMoved {
            src: SegmentPart::new(Segment::new(wire_id, b), circuit_geometry::to_part(line_b)),
            dst: SegmentPart::new(Segment::new(wire_id, a), circuit_geometry::to_part(merged_line)),
        });
        self.data.history.commit_group();
        Ok(())
    }

    /// Split one segment at `at`, the two halves becoming independent
    /// segments of the same tree. The single-segment, single-point
    /// primitive `split_temporary_segments` builds on; does not commit a
    /// history group itself, so callers splitting several segments (or one
    /// segment at several points) in a row can bundle all of it into one
    /// undo step. `tracking`, if given, is fed the emitted message so a
    /// caller-local selection snapshot stays in sync across the split
    /// (spec.md §4.7.1's `regularize_temporary_selection` needs this; a
    /// bare `split_temporary_segments` call does not).
    fn split_segment_at(
        &mut self,
        wire_id: WireId,
        idx: SegmentIndex,
        at: Point,
        tracking: Option<&mut Selection>,
    ) -> Result<(SegmentIndex, SegmentIndex), ModifierError> {
        let tree = self.data.layout.wires.tree(wire_id)?;
        let line = tree.line(idx)?;
        let offset =
            circuit_geometry::offset_of_point(line, at).ok_or(ModifierError::PartOutOfBounds)?;
        let full = tree.part(idx)?;
        if offset == full.begin() || offset == full.end() {
            return Err(ModifierError::PartOutOfBounds);
        }
        let leading = circuit_types::Part::new(full.begin(), offset)
            .map_err(|_| ModifierError::PartOutOfBounds)?;

        let tree = self.data.layout.wires.tree_mut(wire_id)?;
        let leading_idx = isolate_segment_part(tree, idx, leading)?;
        let trailing_idx = tree
            .indices()
            .find(|&i| {
                i != leading_idx
                    && tree
                        .line(i)
                        .map(|l| l.p0() == at || l.p1() == at)
                        .unwrap_or(false)
            })
            .ok_or(ModifierError::PartOutOfBounds)?;

        self.data.history.push(HistoryEntry::SplitSegment {
            wire_id,
            source: idx,
            new_index: trailing_idx,
            new_info: self.data.layout.wires.tree(wire_id)?.info(trailing_idx)?,
        });
        let msg = InfoMessage::SegmentPartMoved {
            src: SegmentPart::new(Segment::new(wire_id, idx), full),
            dst: SegmentPart::new(Segment::new(wire_id, leading_idx), leading),
        };
        self.emit(msg.clone());
        if let Some(sel) = tracking {
            sel.submit(&msg);
        }
        Ok((leading_idx, trailing_idx))
    }

    /// Split every segment named by `selection` at every point of `points`
    /// that lands strictly inside it (spec.md §4.7.1), one undo group for
    /// the whole call. Grounded on `SplitTemporaryMultiple`, which splits a
    /// single segment at six points in one call: each segment is split
    /// repeatedly, advancing into the trailing half after each cut, so
    /// every point that falls within it ends up as a boundary.
    pub fn split_temporary_segments(
        &mut self,
        selection: &Selection,
        points: &[Point],
    ) -> Result<(), ModifierError> {
        let mut segments: AHashSet<Segment> = AHashSet::default();
        for (segment, _) in selection.segment_parts() {
            segments.insert(segment);
        }

        for segment in segments {
            let mut current = segment.segment_index;
            loop {
                let next_point = {
                    let tree = self.data.layout.wires.tree(segment.wire_id)?;
                    let line = tree.line(current)?;
                    let full = tree.part(current)?;
                    points
                        .iter()
                        .copied()
                        .filter_map(|p| {
                            let offset = circuit_geometry::offset_of_point(line, p)?;
                            if offset == full.begin() || offset == full.end() {
                                None
                            } else {
                                Some((offset, p))
                            }
                        })
                        .min_by_key(|&(offset, _)| offset)
                };
                let Some((_, point)) = next_point else { break };
                let (_, trailing) = self.split_segment_at(segment.wire_id, current, point, None)?;
                current = trailing;
            }
        }

        self.data.history.commit_group();
        Ok(())
    }

    /// Overwrite the endpoint types of a temporary segment (spec.md
    /// §4.7.1's `set_temporary_endpoints`), used once a segment's position
    /// relative to other temporary geometry is known.
    pub fn set_temporary_endpoints(
        &mut self,
        wire_id: WireId,
        idx: SegmentIndex,
        p0_type: circuit_types::SegmentPointType,
        p1_type: circuit_types::SegmentPointType,
    ) -> Result<(), ModifierError> {
        let tree = self.data.layout.wires.tree_mut(wire_id)?;
        let old = tree.info(idx)?;
        let new = SegmentInfo::new(old.line, p0_type, p1_type);
        tree.update_segment(idx, new)?;
        self.data.history.push(HistoryEntry::SetEndpoints {
            segment: Segment::new(wire_id, idx),
            old,
            new,
        });
        self.data.history.commit_group();
        Ok(())
    }

    /// Confirm a temporary wire shape as the user's intent (spec.md
    /// §4.7.1): force an explicit split at every point in `true_crosspoints`
    /// that only grazes a selected segment's interior (a crossing through
    /// each other's middle, not a shared endpoint — `RegularizeTrueCrosspoint`),
    /// reclassify every point the selection's segments touch (merging an
    /// exactly-collinear touching pair, cross/shadow-classifying a
    /// three-or-four-way junction per `fix_endpoints_at`'s rule table), then
    /// mark every originally selected range fully valid.
    pub fn regularize_temporary_selection(
        &mut self,
        selection: &Selection,
        true_crosspoints: &[Point],
    ) -> Result<(), ModifierError> {
        let mut working = selection.clone();

        let mut wire_ids: AHashSet<WireId> = AHashSet::default();
        for (segment, _) in working.segment_parts() {
            wire_ids.insert(segment.wire_id);
        }

        for &point in true_crosspoints {
            for &wire_id in &wire_ids {
                loop {
                    let hit = {
                        let tree = self.data.layout.wires.tree(wire_id)?;
                        tree.indices().find(|&i| {
                            tree.line(i)
                                .map(|l| {
                                    l.p0() != point
                                        && l.p1() != point
                                        && circuit_geometry::offset_of_point(l, point).is_some()
                                })
                                .unwrap_or(false)
                        })
                    };
                    let Some(idx) = hit else { break };
                    self.split_segment_at(wire_id, idx, point, Some(&mut working))?;
                }
            }
        }

        let mut points: AHashSet<Point> = AHashSet::default();
        for &wire_id in &wire_ids {
            let tree = self.data.layout.wires.tree(wire_id)?;
            for idx in tree.indices() {
                let line = tree.line(idx)?;
                points.insert(line.p0());
                points.insert(line.p1());
            }
        }
        for point in points {
            for &wire_id in &wire_ids {
                self.regularize_point(wire_id, point, &mut working)?;
            }
        }

        let marks: Vec<(Segment, circuit_geometry::PartSelection)> = working
            .segment_parts()
            .map(|(s, ps)| (s, ps.clone()))
            .collect();
        for (segment, part_selection) in marks {
            let tree = self.data.layout.wires.tree_mut(segment.wire_id)?;
            let old = tree.valid_parts(segment.segment_index)?.clone();
            for &part in part_selection.parts() {
                tree.mark_valid(segment.segment_index, part)?;
            }
            let new = tree.valid_parts(segment.segment_index)?.clone();
            self.data.history.push(HistoryEntry::SetValidParts {
                segment,
                old,
                new,
            });
        }

        self.data.history.commit_group();
        Ok(())
    }

    /// Reclassify (and, if exactly two collinear segments meet, merge) the
    /// segments of `wire_id`'s tree touching `point`. `working` is kept in
    /// sync with any merge so the caller's own bookkeeping survives index
    /// shifts.
    fn regularize_point(
        &mut self,
        wire_id: WireId,
        point: Point,
        working: &mut Selection,
    ) -> Result<(), ModifierError> {
        let touching: Vec<SegmentIndex> = {
            let tree = self.data.layout.wires.tree(wire_id)?;
            tree.indices()
                .filter(|&i| {
                    tree.line(i)
                        .map(|l| l.p0() == point || l.p1() == point)
                        .unwrap_or(false)
                })
                .collect()
        };

        if touching.len() == 2 {
            let (a, b) = (touching[0], touching[1]);
            let (line_a, line_b) = {
                let tree = self.data.layout.wires.tree(wire_id)?;
                (tree.line(a)?, tree.line(b)?)
            };
            if are_collinear_touching(line_a, line_b) {
                let deleted_info = self.data.layout.wires.tree(wire_id)?.info(b)?;
                self.data.history.push(HistoryEntry::MergeSegments {
                    wire_id,
                    merge_to: a,
                    deleted: b,
                    deleted_info,
                });
                self.data.layout.wires.tree_mut(wire_id)?.swap_and_merge_segment(a, b)?;
                let merged_line = self.data.layout.wires.tree(wire_id)?.line(a)?;
                let msg = InfoMessage::SegmentPartMoved {
                    src: SegmentPart::new(Segment::new(wire_id, b), circuit_geometry::to_part(line_b)),
                    dst: SegmentPart::new(Segment::new(wire_id, a), circuit_geometry::to_part(merged_line)),
                };
                self.emit(msg.clone());
                working.submit(&msg);
                return Ok(());
            }
        }

        let changed = fix_endpoints_at(
            self.data.layout.wires.tree_mut(wire_id)?,
            point,
            &self.data.indices.logic_item_outputs,
            &self.data.indices.logic_item_inputs,
        )?;
        if wire_id.is_inserted_candidate() {
            for idx in changed {
                let info = self.data.layout.wires.tree(wire_id)?.info(idx)?;
                self.emit(InfoMessage::InsertedEndPointsUpdated {
                    segment: Segment::new(wire_id, idx),
                    info,
                });
            }
        }
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.data.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.data.history.can_redo()
    }

    /// Replay one undo group directly against the layout and index state
    /// (history itself is disabled for the duration, since the primitives
    /// below would otherwise push fresh entries onto the very stack being
    /// unwound).
    pub fn undo(&mut self) -> Result<(), ModifierError> {
        let group = self.data.history.undo_group().ok_or(ModifierError::NothingToUndo)?;
        self.data.history.set_enabled(false);
        let result = group.into_iter().try_for_each(|entry| self.apply_entry(entry));
        self.data.history.set_enabled(true);
        result
    }

    pub fn redo(&mut self) -> Result<(), ModifierError> {
        let group = self.data.history.redo_group().ok_or(ModifierError::NothingToRedo)?;
        self.data.history.set_enabled(false);
        let result = group.into_iter().try_for_each(|entry| self.apply_entry(entry));
        self.data.history.set_enabled(true);
        result
    }

    fn apply_entry(&mut self, entry: HistoryEntry) -> Result<(), ModifierError> {
        match entry {
            HistoryEntry::CreateLogicItem { data, .. } => {
                self.add_logic_item(data, InsertionMode::Temporary)?;
            }
            HistoryEntry::DeleteLogicItem { id, .. } => {
                self.delete_temporary_logicitem(id)?;
            }
            HistoryEntry::MoveLogicItem { id, to, .. } => {
                self.data.layout.logic_items.set_position(id, to)?;
            }
            HistoryEntry::ChangeLogicItemInsertionMode { id, to, .. } => {
                self.change_logicitem_insertion_mode(id, to)?;
            }
            HistoryEntry::CreateDecoration { data, .. } => {
                self.add_decoration(data, InsertionMode::Temporary)?;
            }
            HistoryEntry::DeleteDecoration { id, .. } => {
                self.delete_temporary_decoration(id)?;
            }
            HistoryEntry::MoveDecoration { id, to, .. } => {
                self.data.layout.decorations.set_position(id, to)?;
            }
            HistoryEntry::AddSegment { segment, info } => {
                self.add_segment(segment.wire_id, info)?;
            }
            HistoryEntry::DeleteSegment { segment, info } => {
                self.emit(InfoMessage::SegmentPartDeleted {
                    segment_part: SegmentPart::new(segment, circuit_geometry::to_part(info.line)),
                });
                if let Some(relocated) = self
                    .data
                    .layout
                    .wires
                    .tree_mut(segment.wire_id)?
                    .swap_and_delete_segment(segment.segment_index)?
                {
                    self.emit(InfoMessage::SegmentIdUpdated {
                        old: Segment::new(segment.wire_id, relocated),
                        new: segment,
                    });
                }
            }
            HistoryEntry::MergeSegments {
                wire_id,
                merge_to,
                deleted,
                ..
            } => {
                self.data
                    .layout
                    .wires
                    .tree_mut(wire_id)?
                    .swap_and_merge_segment(merge_to, deleted)?;
            }
            HistoryEntry::SplitSegment { wire_id, source, .. } => {
                let line = self.data.layout.wires.tree(wire_id)?.line(source)?;
                self.split_segment_at(wire_id, source, line.p0(), None)?;
            }
            HistoryEntry::ChangeWireInsertionMode { segment, to, .. } => {
                let part = self
                    .data
                    .layout
                    .wires
                    .tree(segment.wire_id)?
                    .part(segment.segment_index)?;
                self.change_wire_insertion_mode(SegmentPart::new(segment, part), to)?;
            }
            HistoryEntry::SetEndpoints { segment, new, .. } => {
                self.data
                    .layout
                    .wires
                    .tree_mut(segment.wire_id)?
                    .update_segment(segment.segment_index, new)?;
                if segment.wire_id.is_inserted_candidate() {
                    self.emit(InfoMessage::InsertedEndPointsUpdated { segment, info: new });
                }
            }
            HistoryEntry::SetValidParts { segment, old, new } => {
                let tree = self.data.layout.wires.tree_mut(segment.wire_id)?;
                for part in old.parts() {
                    tree.unmark_valid(segment.segment_index, *part)?;
                }
                for part in new.parts() {
                    tree.mark_valid(segment.segment_index, *part)?;
                }
            }
            HistoryEntry::SwapSegmentIndices { wire_id, a, b } => {
                let tree = self.data.layout.wires.tree_mut(wire_id)?;
                let info_a = tree.info(a)?;
                let info_b = tree.info(b)?;
                tree.update_segment(a, info_b)?;
                tree.update_segment(b, info_a)?;
            }
        }
        Ok(())
    }
}

fn wire_mode(wire_id: WireId) -> InsertionMode {
    if wire_id.is_temporary() {
        InsertionMode::Temporary
    } else if wire_id.is_colliding() {
        InsertionMode::Collisions
    } else {
        InsertionMode::InsertOrDiscard
    }
}
