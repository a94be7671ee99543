use std::fmt;

use crate::fields::FieldIndexError;

/// Number of low field indices kept in the fixed bit vector. Indices at or
/// above this value live in the overflow set.
pub const BASE_FIELDS_COUNT: usize = 128;

/// Identifies one trackable field of an owning object.
///
/// The tracker never interprets the value beyond routing it to base or overflow
/// storage. Construction from a `u16` is infallible; wider or signed integers go
/// through [`TryFrom`] and are rejected with a [`FieldIndexError`].
///
/// # Examples
///
/// ```
/// use dirtyset::fields::{FieldIndex, FieldIndexError};
///
/// let f = FieldIndex::new(127);
/// assert!(f.is_base());
/// assert!(!FieldIndex::new(128).is_base());
///
/// assert_eq!(FieldIndex::try_from(-1i64), Err(FieldIndexError::Negative(-1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldIndex(u16);

impl FieldIndex {
    pub const fn new(raw: u16) -> Self {
        FieldIndex(raw)
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    /// Whether this index is stored in the fixed bit vector.
    #[inline]
    pub const fn is_base(self) -> bool {
        (self.0 as usize) < BASE_FIELDS_COUNT
    }
}

impl From<u16> for FieldIndex {
    fn from(raw: u16) -> Self {
        FieldIndex(raw)
    }
}

impl From<FieldIndex> for u16 {
    fn from(index: FieldIndex) -> Self {
        index.0
    }
}

impl TryFrom<i64> for FieldIndex {
    type Error = FieldIndexError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw < 0 {
            return Err(FieldIndexError::Negative(raw));
        }
        u16::try_from(raw)
            .map(FieldIndex)
            .map_err(|_| FieldIndexError::OutOfRange(raw as u64))
    }
}

impl TryFrom<i32> for FieldIndex {
    type Error = FieldIndexError;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        FieldIndex::try_from(i64::from(raw))
    }
}

impl TryFrom<usize> for FieldIndex {
    type Error = FieldIndexError;

    fn try_from(raw: usize) -> Result<Self, Self::Error> {
        u16::try_from(raw)
            .map(FieldIndex)
            .map_err(|_| FieldIndexError::OutOfRange(raw as u64))
    }
}

impl fmt::Display for FieldIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
