//! Per-object dirty field tracking.
//!
//! Two trackers with different contracts live here and are not interchangeable:
//!
//! - [`DirtyFieldTracker`]: keeps a running count of dirty fields, so "is anything
//!   dirty?" is O(1), and only touches storage on real transitions
//! - [`UncountedFieldTracker`]: no count; overflow clears follow an
//!   [`OverflowClearPolicy`]
//!
//! Both implement [`FieldTracker`] so generic drivers can run against either.

mod counted;
mod field_tracker;
mod uncounted;

pub use counted::*;
pub use field_tracker::*;
pub use uncounted::*;
