use hashbrown::HashSet;

use crate::{fields::FieldIndex, storage::BuildFieldHasher};

/// Dirty overflow-range indices. Presence means dirty.
///
/// Only objects with more than [`BASE_FIELDS_COUNT`](crate::fields::BASE_FIELDS_COUNT)
/// fields ever allocate here.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OverflowFields {
    fields: HashSet<FieldIndex, BuildFieldHasher>,
}

impl OverflowFields {
    pub fn new() -> Self {
        Self {
            fields: HashSet::with_hasher(BuildFieldHasher::default()),
        }
    }

    pub fn contains(&self, index: FieldIndex) -> bool {
        self.fields.contains(&index)
    }

    /// Returns `true` if the index was not present before.
    pub fn insert(&mut self, index: FieldIndex) -> bool {
        self.fields.insert(index)
    }

    /// Returns `true` if the index was present before.
    pub fn remove(&mut self, index: FieldIndex) -> bool {
        self.fields.remove(&index)
    }

    /// Drops every entry and releases the allocation.
    pub fn clear(&mut self) {
        self.fields = HashSet::with_hasher(BuildFieldHasher::default());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl std::fmt::Debug for OverflowFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sorted: Vec<u16> = self.fields.iter().map(|i| i.get()).collect();
        sorted.sort_unstable();
        f.debug_tuple("OverflowFields").field(&sorted).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(raw: u16) -> FieldIndex {
        FieldIndex::new(raw)
    }

    #[test]
    fn new_is_empty() {
        let set = OverflowFields::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(idx(128)));
    }

    #[test]
    fn insert_and_remove_report_membership_changes() {
        let mut set = OverflowFields::new();
        assert!(set.insert(idx(200)));
        assert!(!set.insert(idx(200)));
        assert!(set.contains(idx(200)));
        assert_eq!(set.len(), 1);

        assert!(set.remove(idx(200)));
        assert!(!set.remove(idx(200)));
        assert!(!set.contains(idx(200)));
        assert!(set.is_empty());
    }

    #[test]
    fn sparse_indices() {
        let mut set = OverflowFields::new();
        for raw in [128u16, 129, 9999, u16::MAX] {
            set.insert(idx(raw));
        }
        assert_eq!(set.len(), 4);
        assert!(set.contains(idx(9999)));
        assert!(!set.contains(idx(5000)));
    }

    #[test]
    fn clear_releases_everything() {
        let mut set = OverflowFields::new();
        for raw in 128..1128u16 {
            set.insert(idx(raw));
        }
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.fields.capacity(), 0);
        assert!(!set.contains(idx(500)));
    }

    #[test]
    fn debug_is_sorted() {
        let mut set = OverflowFields::new();
        set.insert(idx(300));
        set.insert(idx(129));
        set.insert(idx(200));
        assert_eq!(format!("{set:?}"), "OverflowFields([129, 200, 300])");
    }
}
