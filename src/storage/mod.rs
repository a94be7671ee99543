//! Backing storage for the two index ranges.
//!
//! - [`BaseFields`]: inline bit vector for indices below
//!   [`BASE_FIELDS_COUNT`](crate::fields::BASE_FIELDS_COUNT), never allocates
//! - [`OverflowFields`]: hashed set for the rare objects with more fields

mod base_fields;
mod field_hasher;
mod overflow_fields;

pub use base_fields::*;
pub use field_hasher::*;
pub use overflow_fields::*;
