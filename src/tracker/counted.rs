use tracing::trace;

use crate::{
    fields::FieldIndex,
    storage::{BaseFields, OverflowFields},
    tracker::FieldTracker,
};

/// Dirty state for every field of one object, with a running dirty count.
///
/// Low indices live in a fixed bit vector and high indices in an overflow set;
/// each index is only ever stored on its own side of the split. The count is
/// adjusted exclusively from the result of a single private write path, so it
/// always equals the number of indices reported dirty.
///
/// # Examples
///
/// ```
/// use dirtyset::{fields::FieldIndex, tracker::DirtyFieldTracker};
///
/// let mut tracker = DirtyFieldTracker::new();
/// tracker.set_field_dirty(FieldIndex::new(5));
/// tracker.set_field_dirty(FieldIndex::new(200));
/// assert!(tracker.has_any_dirty());
/// assert_eq!(tracker.dirty_count(), 2);
///
/// tracker.clear_all_dirty();
/// assert!(!tracker.is_field_dirty(FieldIndex::new(200)));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DirtyFieldTracker {
    base_fields: BaseFields,
    extra_fields: OverflowFields,
    dirty_count: usize,
}

impl DirtyFieldTracker {
    pub fn new() -> Self {
        DirtyFieldTracker {
            base_fields: BaseFields::new(),
            extra_fields: OverflowFields::new(),
            dirty_count: 0,
        }
    }

    pub fn is_field_dirty(&self, index: FieldIndex) -> bool {
        if index.is_base() {
            self.base_fields.get(usize::from(index.get()))
        } else {
            self.extra_fields.contains(index)
        }
    }

    #[inline]
    pub fn has_any_dirty(&self) -> bool {
        self.dirty_count > 0
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty_count
    }

    /// Marks `index` dirty. Setting an already dirty field changes nothing.
    pub fn set_field_dirty(&mut self, index: FieldIndex) {
        if self.assign(index, true) {
            self.dirty_count += 1;
        }
    }

    /// Marks `index` clean. Clearing an already clean field changes nothing.
    pub fn clear_field_dirty(&mut self, index: FieldIndex) {
        if self.assign(index, false) {
            self.dirty_count -= 1;
        }
    }

    /// Marks every index yielded by `indices` dirty and returns how many of them
    /// were clean before.
    pub fn set_fields_dirty<I>(&mut self, indices: I) -> usize
    where
        I: IntoIterator<Item = FieldIndex>,
    {
        let before = self.dirty_count;
        for index in indices {
            self.set_field_dirty(index);
        }
        self.dirty_count - before
    }

    /// Marks every index yielded by `indices` clean and returns how many of them
    /// were dirty before.
    pub fn clear_fields_dirty<I>(&mut self, indices: I) -> usize
    where
        I: IntoIterator<Item = FieldIndex>,
    {
        let before = self.dirty_count;
        for index in indices {
            self.clear_field_dirty(index);
        }
        before - self.dirty_count
    }

    pub fn clear_all_dirty(&mut self) {
        trace!(
            dirty = self.dirty_count,
            overflow = self.extra_fields.len(),
            "clearing all dirty fields"
        );
        self.base_fields.reset();
        self.extra_fields.clear();
        self.dirty_count = 0;
    }

    // Single write path for both storages. Returns whether the state changed.
    fn assign(&mut self, index: FieldIndex, value: bool) -> bool {
        if index.is_base() {
            self.base_fields.assign(usize::from(index.get()), value)
        } else if value {
            self.extra_fields.insert(index)
        } else {
            self.extra_fields.remove(index)
        }
    }
}

impl FieldTracker for DirtyFieldTracker {
    fn is_dirty(&self, index: FieldIndex) -> bool {
        self.is_field_dirty(index)
    }

    fn mark_dirty(&mut self, index: FieldIndex) {
        self.set_field_dirty(index);
    }

    fn mark_clean(&mut self, index: FieldIndex) {
        self.clear_field_dirty(index);
    }

    fn clear_all(&mut self) {
        self.clear_all_dirty();
    }
}

impl std::fmt::Debug for DirtyFieldTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirtyFieldTracker")
            .field("dirty_count", &self.dirty_count)
            .field("base_fields", &self.base_fields)
            .field("extra_fields", &self.extra_fields)
            .finish()
    }
}
