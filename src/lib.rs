//! The editable-circuit core: a 2-D digital logic layout that can be
//! interactively built up, validated against collision rules, and undone,
//! independent of any particular rendering or simulation front end.
//!
//! [`EditableCircuit`] is the single entry point; everything else in this
//! crate supports it. The layered crates underneath (`circuit-types` through
//! `circuit-modifier`) implement the data model and mutation primitives this
//! façade composes.

pub mod connector;
pub mod editable_circuit;
pub mod error;
pub mod layout_info;
pub mod line_tree;

pub use connector::Connector;
pub use editable_circuit::{EditableCircuit, SelectionItem, SetOperation};
pub use error::EditableCircuitError;
pub use layout_info::{iter_input_locations, iter_output_locations, DirectionType, ElementSize, LayoutInfo};
pub use line_tree::{derive_line_tree, LineTree};
