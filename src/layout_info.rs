//! `LayoutInfo`: per-`ElementType` connector/size data tables and the
//! connector iteration helpers consumed by the rest of the core (spec.md
//! §6.4). Grounded on `layout_calculation.h`'s `get_layout_info` table and
//! its `iter_input_location`/`iter_output_location`, which transform
//! element-local connector offsets by the item's position and orientation;
//! the body-relative offsets themselves are not present in the retrieved
//! `original_source/` slice, so a plausible table is authored here (see
//! DESIGN.md).

use circuit_layout::LogicItemData;
use circuit_types::{ConnectionCount, ConnectionCountRange, ElementType, Grid, Offset, Orientation, Point, Rotation};

/// Whether an element type exposes a fixed body size or one that grows with
/// its input/output count (variable-arity gates).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementSize {
    Fixed { width: Offset, height: Offset },
    VariableHeight { width: Offset },
}

/// Whether rotating the element changes which edge inputs/outputs sit on.
/// Fixed-orientation elements (sources, sinks) ignore `rotation` entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionType {
    Directed,
    Undirected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInfo {
    pub input_count_range: ConnectionCountRange,
    pub output_count_range: ConnectionCountRange,
    pub direction_type: DirectionType,
    pub size: ElementSize,
}

impl LayoutInfo {
    pub fn for_element(element_type: ElementType) -> LayoutInfo {
        use ElementType::*;
        let fixed = |n: u32| ConnectionCountRange::fixed(ConnectionCount::new(n).unwrap());
        let range = |min: u32, max: u32| ConnectionCountRange {
            min: ConnectionCount::new(min).unwrap(),
            max: ConnectionCount::new(max).unwrap(),
        };
        match element_type {
            And | Or | Xor | Nand | Nor | Xnor => LayoutInfo {
                input_count_range: range(2, 8),
                output_count_range: fixed(1),
                direction_type: DirectionType::Directed,
                size: ElementSize::VariableHeight { width: Offset::new(2) },
            },
            Buffer | Not => LayoutInfo {
                input_count_range: fixed(1),
                output_count_range: fixed(1),
                direction_type: DirectionType::Directed,
                size: ElementSize::Fixed {
                    width: Offset::new(1),
                    height: Offset::new(0),
                },
            },
            FlipFlopJk => LayoutInfo {
                input_count_range: fixed(3),
                output_count_range: fixed(2),
                direction_type: DirectionType::Directed,
                size: ElementSize::Fixed {
                    width: Offset::new(2),
                    height: Offset::new(2),
                },
            },
            LatchD => LayoutInfo {
                input_count_range: fixed(2),
                output_count_range: fixed(1),
                direction_type: DirectionType::Directed,
                size: ElementSize::Fixed {
                    width: Offset::new(2),
                    height: Offset::new(1),
                },
            },
            ClockGenerator => LayoutInfo {
                input_count_range: fixed(0),
                output_count_range: fixed(1),
                direction_type: DirectionType::Undirected,
                size: ElementSize::Fixed {
                    width: Offset::new(1),
                    height: Offset::new(0),
                },
            },
            Led => LayoutInfo {
                input_count_range: fixed(1),
                output_count_range: fixed(0),
                direction_type: DirectionType::Undirected,
                size: ElementSize::Fixed {
                    width: Offset::new(0),
                    height: Offset::new(0),
                },
            },
            Button => LayoutInfo {
                input_count_range: fixed(0),
                output_count_range: fixed(1),
                direction_type: DirectionType::Undirected,
                size: ElementSize::Fixed {
                    width: Offset::new(0),
                    height: Offset::new(0),
                },
            },
        }
    }

    /// The body width of `data`, resolving the variable-height case against
    /// its actual input count.
    pub fn width(&self) -> Offset {
        match self.size {
            ElementSize::Fixed { width, .. } => width,
            ElementSize::VariableHeight { width } => width,
        }
    }

    /// The body height, one grid step per input beyond the first for
    /// variable-height elements (so two inputs sit one unit apart).
    pub fn height(&self, input_count: ConnectionCount) -> Offset {
        match self.size {
            ElementSize::Fixed { height, .. } => height,
            ElementSize::VariableHeight { .. } => {
                Offset::new(input_count.value().saturating_sub(1) as u16)
            }
        }
    }
}

/// Rotate `(x, y)` around the origin, then translate to `position` — the
/// local-to-world transform `layout_calculation.h`'s `transform` performs
/// per connector.
fn transform(position: Point, rotation: Rotation, local: (i32, i32)) -> Point {
    let (lx, ly) = local;
    let (rx, ry) = match rotation {
        Rotation::Right => (lx, ly),
        Rotation::Left => (-lx, -ly),
        Rotation::Up => (-ly, lx),
        Rotation::Down => (ly, -lx),
    };
    Point::new(
        Grid::new(position.x.value() + rx).expect("connector position within range"),
        Grid::new(position.y.value() + ry).expect("connector position within range"),
    )
}

fn transform_orientation(rotation: Rotation, local: Orientation) -> Orientation {
    match (rotation, local) {
        (Rotation::Right | Rotation::Left, o) => o,
        (Rotation::Up | Rotation::Down, Orientation::Horizontal) => Orientation::Vertical,
        (Rotation::Up | Rotation::Down, Orientation::Vertical) => Orientation::Horizontal,
    }
}

/// Every input connector of `data`, evaluated in world space: local inputs
/// sit on the left edge (`x = 0`), stacked one per grid row.
pub fn iter_input_locations(data: &LogicItemData, mut f: impl FnMut(Point, Orientation)) {
    let count = data.input_count.value();
    for i in 0..count {
        let local = (0, i as i32);
        let point = transform(data.position, data.rotation, local);
        let orientation = transform_orientation(data.rotation, Orientation::Horizontal);
        f(point, orientation);
    }
}

/// Every output connector of `data`: local outputs sit on the right edge
/// (`x = width`), stacked one per grid row.
pub fn iter_output_locations(data: &LogicItemData, mut f: impl FnMut(Point, Orientation)) {
    let info = LayoutInfo::for_element(data.element_type);
    let width = info.width().value() as i32;
    let count = data.output_count.value();
    for i in 0..count {
        let local = (width, i as i32);
        let point = transform(data.position, data.rotation, local);
        let orientation = transform_orientation(data.rotation, Orientation::Horizontal);
        f(point, orientation);
    }
}
