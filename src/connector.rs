//! `point_to_connector` result type (spec.md §6.1): which owner kind, if
//! any, has a connector registered at a queried point. Grounded on the four
//! parallel `circuit_index` connector maps already distinguishing input vs.
//! output and logic-item vs. wire ownership.

use circuit_index::{LogicItemConnectorEntry, WireConnectorEntry};

/// The owner of a connector found at a given grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    LogicItemInput(LogicItemConnectorEntry),
    LogicItemOutput(LogicItemConnectorEntry),
    WireInput(WireConnectorEntry),
    WireOutput(WireConnectorEntry),
}
