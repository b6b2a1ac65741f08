//! Index-addressed node storage.
//!
//! Nodes of the ordered stores live in a `SlotArena` and refer to each other
//! by [`SlotId`] instead of pointers, so there is no cyclic ownership and no
//! `unsafe`. Freed slots are recycled through a free list.
//!
//! ```text
//!   slots:     [Some(a)] [None] [Some(c)] [Some(d)]
//!   free_list: [1]
//!   insert(e) ──► reuses slot 1
//! ```
//!
//! A `SlotId` is only meaningful for the arena that issued it and only until
//! the slot is removed; after that the index may be handed out again.

/// Stable handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Raw slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Vector of optional slots plus a free list of vacated indices.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value`, reusing a vacated slot when one exists.
    pub fn insert(&mut self, value: T) -> SlotId {
        let idx = match self.free_list.pop() {
            Some(idx) => {
                self.slots[idx] = Some(value);
                idx
            },
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            },
        };
        self.len += 1;
        SlotId(idx)
    }

    /// Takes the value out of `id`, returning `None` for vacant or unknown slots.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value. Previously issued ids become invalid.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_arena_insert_remove_reuse() {
        let mut arena = SlotArena::new();
        let id1 = arena.insert(b"a".to_vec());
        let id2 = arena.insert(b"b".to_vec());
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(id1).map(Vec::as_slice), Some(&b"a"[..]));
        assert_eq!(arena.get(id2).map(Vec::as_slice), Some(&b"b"[..]));

        assert_eq!(arena.remove(id1), Some(b"a".to_vec()));
        assert_eq!(arena.len(), 1);
        assert!(!arena.contains(id1));

        let id3 = arena.insert(b"c".to_vec());
        assert_eq!(arena.len(), 2);
        assert_eq!(id1.index(), id3.index());
    }

    #[test]
    fn slot_arena_double_remove_is_none() {
        let mut arena = SlotArena::new();
        let id = arena.insert(1u8);
        assert_eq!(arena.remove(id), Some(1));
        assert_eq!(arena.remove(id), None);
        assert_eq!(arena.remove(SlotId(42)), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn slot_arena_get_mut_and_clear() {
        let mut arena = SlotArena::with_capacity(4);
        let id = arena.insert(10u32);
        if let Some(value) = arena.get_mut(id) {
            *value += 5;
        }
        assert_eq!(arena.get(id), Some(&15));

        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(id), None);
    }
}
