//! Stable key ↔ dense id map (spec.md §4.4). Dense ids are recycled by
//! swap-and-delete and so are meaningless across edits; a `KeyIndex` gives
//! external holders (selections serialized to disk, UI widgets) a key that
//! survives relocation, at the cost of an extra indirection maintained by
//! `Modifier` on every `…IdUpdated` message.

use ahash::AHashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(u64);

impl Key {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum KeyIndexError {
    #[error("key {0:?} is not present in this index")]
    UnknownKey(Key),
    #[error("id has no registered key")]
    UnknownId,
}

#[derive(Debug, Clone)]
pub struct KeyIndex<Id> {
    next_key: u64,
    key_to_id: AHashMap<Key, Id>,
    id_to_key: AHashMap<Id, Key>,
}

impl<Id> Default for KeyIndex<Id> {
    fn default() -> Self {
        Self {
            next_key: 0,
            key_to_id: AHashMap::new(),
            id_to_key: AHashMap::new(),
        }
    }
}

impl<Id: Copy + Eq + Hash> KeyIndex<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh key for `id`, failing the process (via panic, since
    /// a `u64` counter exhausting is unreachable in practice) only if the
    /// counter itself overflows.
    pub fn allocate(&mut self, id: Id) -> Key {
        let key = Key(self.next_key);
        self.next_key = self
            .next_key
            .checked_add(1)
            .expect("key counter exhausted u64 space");
        self.key_to_id.insert(key, id);
        self.id_to_key.insert(id, key);
        key
    }

    pub fn id_for(&self, key: Key) -> Result<Id, KeyIndexError> {
        self.key_to_id.get(&key).copied().ok_or(KeyIndexError::UnknownKey(key))
    }

    pub fn key_for(&self, id: Id) -> Result<Key, KeyIndexError> {
        self.id_to_key.get(&id).copied().ok_or(KeyIndexError::UnknownId)
    }

    pub fn remove_by_id(&mut self, id: Id) -> Option<Key> {
        let key = self.id_to_key.remove(&id)?;
        self.key_to_id.remove(&key);
        Some(key)
    }

    /// Rebind the key currently pointing at `old` to point at `new` — used
    /// when a swap-and-delete relocates an entity to a different id.
    pub fn rebind_id(&mut self, old: Id, new: Id) {
        if let Some(key) = self.id_to_key.remove(&old) {
            self.id_to_key.insert(new, key);
            self.key_to_id.insert(key, new);
        }
    }

    pub fn len(&self) -> usize {
        self.key_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_to_id.is_empty()
    }
}

impl<Id> crate::allocated_size::AllocatedSize for KeyIndex<Id> {
    fn allocated_size(&self) -> usize {
        self.key_to_id.capacity() * (std::mem::size_of::<Key>() + std::mem::size_of::<Id>()) * 2
    }
}
