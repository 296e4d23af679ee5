use crate::scene::scene_error::{EntityKind, SceneError};
use crate::utils::revision::Revision;
use more_asserts::debug_assert_le;

/// Append-only storage with a capacity fixed at construction.
/// Slots are addressed by their insertion index and never reused
/// until the whole arena is cleared.
pub(crate) struct FixedArena<T> {
    slots: Vec<T>,
    capacity: usize,
    kind: EntityKind,
    revision: Revision,
}

impl<T> FixedArena<T> {
    #[must_use]
    pub(crate) fn new(kind: EntityKind, capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            capacity,
            kind,
            revision: Revision::default(),
        }
    }

    pub(crate) fn push(&mut self, value: T) -> Result<usize, SceneError> {
        if self.slots.len() >= self.capacity {
            return Err(SceneError::CapacityExhausted { kind: self.kind, capacity: self.capacity });
        }
        self.slots.push(value);
        self.revision.bump();
        debug_assert_le!(self.slots.len(), self.capacity);
        Ok(self.slots.len() - 1)
    }

    /// Runs `mutation` on the addressed slot; `false` when the index
    /// has not been allocated.
    pub(crate) fn update<Mutation: FnOnce(&mut T)>(&mut self, index: usize, mutation: Mutation) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                mutation(slot);
                self.revision.bump();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    #[must_use]
    pub(crate) fn contains(&self, index: usize) -> bool {
        index < self.slots.len()
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Highest allocated index; the transfer size is this plus one.
    #[must_use]
    pub(crate) fn last_index(&self) -> Option<usize> {
        self.slots.len().checked_sub(1)
    }

    #[must_use]
    pub(crate) fn revision(&self) -> Revision {
        self.revision
    }

    #[must_use]
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.slots
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.revision.bump();
    }
}
