//! Field addressing for dirty tracking.
//!
//! Field indices are opaque small integers handed out by whatever object owns the
//! tracker. This module fixes their width, the split between the base range and
//! the overflow range, and the checked conversions used at the API boundary.

mod error;
mod field_index;

pub use error::*;
pub use field_index::*;
