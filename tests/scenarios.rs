//! End-to-end scenarios exercising `EditableCircuit` across several
//! primitives at once, the way a single user-facing edit would.

use circuit_geometry::Rect;
use circuit_layout::LogicItemData;
use circuit_types::{
    CacheState, ConnectionCount, DisplayState, ElementType, Grid, InsertionMode, OrderedLine, Point,
    Rotation, Segment, SegmentPart, SegmentPointType,
};
use circuit_selection::Selection;
use editable_circuit::{EditableCircuit, SelectionItem};

fn pt(x: i32, y: i32) -> Point {
    Point::new(Grid::new(x).unwrap(), Grid::new(y).unwrap())
}

fn line(x0: i32, y0: i32, x1: i32, y1: i32) -> OrderedLine {
    OrderedLine::new(pt(x0, y0), pt(x1, y1)).unwrap()
}

fn and_gate(position: Point) -> LogicItemData {
    LogicItemData {
        element_type: ElementType::And,
        input_count: ConnectionCount::new(2).unwrap(),
        output_count: ConnectionCount::new(1).unwrap(),
        position,
        rotation: Rotation::Right,
        sub_circuit_id: None,
        input_inverters: Default::default(),
        output_inverters: Default::default(),
        output_delays: Default::default(),
        display_state: DisplayState::Temporary,
        bounding_rect: Rect::single_point(position),
    }
}

#[test]
fn scenario_1_add_single_wire_segment_in_temporary_mode() {
    let mut circuit = EditableCircuit::with_validator();

    let segment = circuit
        .add_wire_segment(line(0, 0, 10, 0), InsertionMode::Temporary)
        .unwrap();

    let tree = circuit.layout().wires.tree(segment.wire_id).unwrap();
    assert_eq!(tree.len(), 1);
    let info = tree.info(segment.segment_index).unwrap();
    assert_eq!(info.p0_type, SegmentPointType::ShadowPoint);
    assert_eq!(info.p1_type, SegmentPointType::ShadowPoint);
    assert_eq!(info.line.length(), 10);

    // a temporary wire carries no collision or spatial footprint
    for x in 0..=10 {
        assert!(circuit.collision_state(pt(x, 0)).is_none());
    }
    assert!(circuit
        .spatial_query(Rect::new(pt(0, 0), pt(10, 0)).to_fine_padded())
        .is_empty());

    circuit.undo_group().unwrap();
    assert_eq!(circuit.layout().wires.tree(segment.wire_id).unwrap().len(), 0);
}

#[test]
fn scenario_2_promote_wire_across_an_existing_inserted_wire() {
    let mut circuit = EditableCircuit::with_validator();

    let vertical = circuit
        .add_wire_segment(line(0, -5, 0, 5), InsertionMode::InsertOrDiscard)
        .unwrap();
    let horizontal = circuit
        .add_wire_segment(line(0, 0, 10, 0), InsertionMode::InsertOrDiscard)
        .unwrap();

    // each newly inserted segment lands on its own wire tree
    assert_ne!(vertical.wire_id, horizontal.wire_id);
    assert!(circuit.layout().wires.tree(vertical.wire_id).is_ok());
    assert!(circuit.layout().wires.tree(horizontal.wire_id).is_ok());

    // the crossing point is cached as a genuine crossing, not a plain wire
    assert_eq!(circuit.collision_state(pt(0, 0)), Some(CacheState::WireCrossing));

    // each `add_wire_segment` call commits two groups (append, then the
    // insertion-mode transition); undo all four to return to empty.
    for _ in 0..4 {
        circuit.undo_group().unwrap();
    }
    assert!(circuit.collision_state(pt(0, 0)).is_none());
}

#[test]
fn scenario_3_regularize_a_t_junction() {
    let mut circuit = EditableCircuit::with_validator();

    // a real T-junction: `left` and `right` are collinear and touch at
    // (5, 0), `stub` meets that same point at a right angle — three
    // segments touching one point, no two of which are all collinear.
    let left = circuit
        .add_wire_segment(line(0, 0, 5, 0), InsertionMode::Temporary)
        .unwrap();
    let right = circuit
        .add_wire_segment(line(5, 0, 10, 0), InsertionMode::Temporary)
        .unwrap();
    let stub = circuit
        .add_wire_segment(line(5, 0, 5, 5), InsertionMode::Temporary)
        .unwrap();
    let wire_id = left.wire_id;
    assert_eq!(right.wire_id, wire_id);
    assert_eq!(stub.wire_id, wire_id);
    assert_eq!(circuit.layout().wires.tree(wire_id).unwrap().len(), 3);

    let mut selection = Selection::new();
    for endpoint in [left, right, stub] {
        let part = circuit
            .layout()
            .wires
            .tree(wire_id)
            .unwrap()
            .part(endpoint.segment_index)
            .unwrap();
        selection.add_segment_part(SegmentPart::new(endpoint, part));
    }

    // no true crosspoint here: the three segments already share an
    // endpoint, so regularizing must classify rather than split anything.
    circuit
        .regularize_temporary_selection(&selection, &[])
        .unwrap();

    // a T-junction is not a mergeable pair, so all three segments survive
    // individually.
    let tree = circuit.layout().wires.tree(wire_id).unwrap();
    assert_eq!(tree.len(), 3);

    // `left` and `right` are the mutually-collinear "through line" and
    // become cross points at the shared junction; `stub` is the odd one
    // out and becomes a shadow point.
    assert_eq!(
        tree.info(left.segment_index).unwrap().p1_type,
        SegmentPointType::CrossPoint
    );
    assert_eq!(
        tree.info(right.segment_index).unwrap().p0_type,
        SegmentPointType::CrossPoint
    );
    assert_eq!(
        tree.info(stub.segment_index).unwrap().p0_type,
        SegmentPointType::ShadowPoint
    );

    // every segment's full part was marked valid by the regularize pass.
    for endpoint in [left, right, stub] {
        let full = tree.part(endpoint.segment_index).unwrap();
        assert_eq!(
            tree.valid_parts(endpoint.segment_index).unwrap().parts(),
            &[full]
        );
    }

    circuit.undo_group().unwrap();
    let tree = circuit.layout().wires.tree(wire_id).unwrap();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.info(left.segment_index).unwrap().p1_type, SegmentPointType::ShadowPoint);
}

#[test]
fn scenario_4_insert_or_discard_with_a_blocking_element_body() {
    let mut circuit = EditableCircuit::with_validator();

    circuit
        .add_logic_item(and_gate(pt(3, 0)), InsertionMode::InsertOrDiscard)
        .unwrap();
    assert_eq!(circuit.collision_state(pt(3, 0)), Some(CacheState::ElementBody));

    circuit
        .add_wire_segment(line(0, 0, 10, 0), InsertionMode::InsertOrDiscard)
        .unwrap();

    // the whole candidate segment collides (it passes through the gate's
    // body point) and is discarded in full rather than split around the
    // blockage, so no part of it ends up inserted anywhere along the line
    assert_eq!(circuit.collision_state(pt(3, 0)), Some(CacheState::ElementBody));
    assert!(circuit.collision_state(pt(8, 0)).is_none());
}

#[test]
fn scenario_5_selection_tracking_across_merge() {
    let mut circuit = EditableCircuit::with_validator();

    let a = circuit
        .add_wire_segment(line(0, 0, 5, 0), InsertionMode::Temporary)
        .unwrap();
    let b = circuit
        .add_wire_segment(line(5, 0, 10, 0), InsertionMode::Temporary)
        .unwrap();
    assert_eq!(a.wire_id, b.wire_id);

    let selection_id = circuit.create_selection();
    let part_a = circuit.layout().wires.tree(a.wire_id).unwrap().part(a.segment_index).unwrap();
    let part_b = circuit.layout().wires.tree(b.wire_id).unwrap().part(b.segment_index).unwrap();

    let right_half_of_a =
        circuit_types::Part::new(circuit_types::Offset::new(3), part_a.end()).unwrap();
    let left_half_of_b =
        circuit_types::Part::new(part_b.begin(), circuit_types::Offset::new(2)).unwrap();

    circuit
        .add_to_selection(
            selection_id,
            SelectionItem::SegmentPart(SegmentPart::new(a, right_half_of_a)),
        )
        .unwrap();
    circuit
        .add_to_selection(
            selection_id,
            SelectionItem::SegmentPart(SegmentPart::new(b, left_half_of_b)),
        )
        .unwrap();

    circuit
        .merge_uninserted_segment(a.wire_id, a.segment_index, b.segment_index)
        .unwrap();

    let merged = Segment::new(a.wire_id, a.segment_index);
    let selection = circuit.selection(selection_id).unwrap();
    let parts = selection.segment_part(merged).unwrap().parts();
    assert_eq!(
        parts,
        &[circuit_types::Part::new(circuit_types::Offset::new(3), circuit_types::Offset::new(7)).unwrap()]
    );
}

#[test]
fn scenario_6_undo_redo_round_trip_for_a_complex_edit() {
    let mut circuit = EditableCircuit::with_validator();

    circuit
        .add_logic_item(and_gate(pt(0, 0)), InsertionMode::InsertOrDiscard)
        .unwrap();
    circuit
        .add_logic_item(and_gate(pt(10, 0)), InsertionMode::InsertOrDiscard)
        .unwrap();
    circuit
        .add_logic_item(and_gate(pt(20, 0)), InsertionMode::InsertOrDiscard)
        .unwrap();
    for i in 0..5 {
        let y = i * 4;
        circuit
            .add_wire_segment(line(0, y, 5, y), InsertionMode::InsertOrDiscard)
            .unwrap();
    }

    let logic_item_count = circuit.layout().logic_items.len();
    let wire_count = circuit.layout().wires.len();
    assert_eq!(logic_item_count, 3);

    let edits = 8;
    for i in 0..edits {
        let y = 100 + i;
        circuit
            .add_wire_segment(line(0, y, 1, y), InsertionMode::Temporary)
            .unwrap();
    }
    assert!(circuit.can_undo());

    for _ in 0..edits {
        circuit.undo_group().unwrap();
    }
    assert_eq!(circuit.layout().logic_items.len(), logic_item_count);
    assert_eq!(circuit.layout().wires.len(), wire_count);

    for _ in 0..edits {
        circuit.redo_group().unwrap();
    }
    assert_eq!(circuit.layout().logic_items.len(), logic_item_count);
}
