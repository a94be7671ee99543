use thiserror::Error;

/// Rejection reasons for integers that cannot name a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldIndexError {
    #[error("invalid field index {0}: field indices are unsigned")]
    Negative(i64),
    #[error("invalid field index {0}: largest addressable field is {max}", max = u16::MAX)]
    OutOfRange(u64),
}
