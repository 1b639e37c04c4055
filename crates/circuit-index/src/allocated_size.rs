//! Memory accounting for test harnesses and diagnostics (spec.md §4.4:
//! "An `allocated_size()` reporter supports memory accounting"). Grounded on
//! the source's per-container `allocated_size()` members (e.g.
//! `attributes_text_element_t::allocated_size`): every index reports the
//! heap bytes its backing collections have reserved, not just what is used.

/// Reports heap bytes reserved by a container, for test-harness memory
/// accounting. Capacity, not length, is reported: a `HashMap` that grew to
/// 1000 entries and shrank to 10 still holds its larger allocation.
pub trait AllocatedSize {
    fn allocated_size(&self) -> usize;
}

impl<K, V, S> AllocatedSize for std::collections::HashMap<K, V, S> {
    fn allocated_size(&self) -> usize {
        self.capacity() * (std::mem::size_of::<K>() + std::mem::size_of::<V>())
    }
}

impl<T> AllocatedSize for Vec<T> {
    fn allocated_size(&self) -> usize {
        self.capacity() * std::mem::size_of::<T>()
    }
}
