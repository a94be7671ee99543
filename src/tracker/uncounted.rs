use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    fields::FieldIndex,
    storage::{BaseFields, OverflowFields},
    tracker::FieldTracker,
};

/// What [`UncountedFieldTracker::set_dirty`] does with an overflow-range index
/// when asked to make it clean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowClearPolicy {
    /// Remove the index, so overflow fields clear like base fields.
    #[default]
    Erase,
    /// Insert the index whatever the requested value. Overflow fields can then
    /// only be cleaned by [`UncountedFieldTracker::clear_all`]. Kept for
    /// consumers that rely on the historical behaviour.
    InsertOnly,
}

/// Dirty state without a running count.
///
/// Cheaper per write than [`DirtyFieldTracker`](crate::tracker::DirtyFieldTracker)
/// since it never checks the prior state, but answering "is anything dirty?"
/// needs [`scan_any_dirty`](Self::scan_any_dirty).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UncountedFieldTracker {
    base_fields: BaseFields,
    extra_fields: OverflowFields,
    policy: OverflowClearPolicy,
}

impl UncountedFieldTracker {
    pub fn new() -> Self {
        Self::with_policy(OverflowClearPolicy::default())
    }

    pub fn with_policy(policy: OverflowClearPolicy) -> Self {
        debug!(?policy, "creating uncounted field tracker");
        UncountedFieldTracker {
            base_fields: BaseFields::new(),
            extra_fields: OverflowFields::new(),
            policy,
        }
    }

    pub fn policy(&self) -> OverflowClearPolicy {
        self.policy
    }

    pub fn is_dirty(&self, index: FieldIndex) -> bool {
        if index.is_base() {
            self.base_fields.get(usize::from(index.get()))
        } else {
            self.extra_fields.contains(index)
        }
    }

    pub fn set_dirty(&mut self, index: FieldIndex, value: bool) {
        if index.is_base() {
            self.base_fields.assign(usize::from(index.get()), value);
            return;
        }
        match (value, self.policy) {
            (false, OverflowClearPolicy::Erase) => {
                self.extra_fields.remove(index);
            }
            (true, _) | (false, OverflowClearPolicy::InsertOnly) => {
                self.extra_fields.insert(index);
            }
        }
    }

    pub fn clear_dirty(&mut self, index: FieldIndex) {
        self.set_dirty(index, false);
    }

    pub fn clear_all(&mut self) {
        trace!(overflow = self.extra_fields.len(), "clearing all dirty fields");
        self.base_fields.reset();
        self.extra_fields.clear();
    }

    /// Linear scan over the base range plus an overflow emptiness check.
    pub fn scan_any_dirty(&self) -> bool {
        !self.base_fields.is_empty() || !self.extra_fields.is_empty()
    }
}

impl FieldTracker for UncountedFieldTracker {
    fn is_dirty(&self, index: FieldIndex) -> bool {
        UncountedFieldTracker::is_dirty(self, index)
    }

    fn mark_dirty(&mut self, index: FieldIndex) {
        self.set_dirty(index, true);
    }

    fn mark_clean(&mut self, index: FieldIndex) {
        self.clear_dirty(index);
    }

    fn clear_all(&mut self) {
        UncountedFieldTracker::clear_all(self);
    }
}

impl std::fmt::Debug for UncountedFieldTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UncountedFieldTracker")
            .field("policy", &self.policy)
            .field("base_fields", &self.base_fields)
            .field("extra_fields", &self.extra_fields)
            .finish()
    }
}
