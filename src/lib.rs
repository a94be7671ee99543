//! Dirty field tracking for objects with small integer field indices.
//!
//! Low indices are tracked in a fixed 128-bit vector, higher ones in an overflow
//! set, so objects with up to [`fields::BASE_FIELDS_COUNT`] fields never allocate.

pub mod fields;
pub mod storage;
pub mod tracker;
pub mod workload;
