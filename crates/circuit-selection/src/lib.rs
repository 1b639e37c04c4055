//! User selections of logic items, decorations, and wire segment parts, kept
//! stable under arbitrary edits by consuming the same `InfoMessage` stream
//! every other index does (spec.md §4.5).

pub mod selection;
pub mod selection_guard;
pub mod selection_store;

pub use selection::Selection;
pub use selection_guard::SelectionGuard;
pub use selection_store::{SelectionStore, SelectionStoreError};
