use crate::fields::FieldIndex;

/// Common surface of the dirty trackers, for code that only needs per-field
/// marking and a full reset.
///
/// `mark_clean` follows the implementor's clear semantics: an
/// [`UncountedFieldTracker`](crate::tracker::UncountedFieldTracker) built with
/// [`OverflowClearPolicy::InsertOnly`](crate::tracker::OverflowClearPolicy::InsertOnly)
/// leaves overflow fields dirty.
///
/// # Examples
///
/// ```
/// use dirtyset::{
///     fields::FieldIndex,
///     tracker::{DirtyFieldTracker, FieldTracker, UncountedFieldTracker},
/// };
///
/// fn touch<T: FieldTracker>(tracker: &mut T) -> bool {
///     tracker.mark_dirty(FieldIndex::new(200));
///     tracker.mark_clean(FieldIndex::new(200));
///     tracker.is_dirty(FieldIndex::new(200))
/// }
///
/// assert!(!touch(&mut DirtyFieldTracker::new()));
/// assert!(!touch(&mut UncountedFieldTracker::new()));
/// ```
pub trait FieldTracker {
    fn is_dirty(&self, index: FieldIndex) -> bool;
    fn mark_dirty(&mut self, index: FieldIndex);
    fn mark_clean(&mut self, index: FieldIndex);
    fn clear_all(&mut self);
}
