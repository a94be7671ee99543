use crate::fields::BASE_FIELDS_COUNT;

pub const BASE_FIELDS_U64: usize = BASE_FIELDS_COUNT / 64;

/// Dirty bits for the base range, packed into `u64` words.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BaseFields {
    bits: [u64; BASE_FIELDS_U64],
}

impl BaseFields {
    pub const fn new() -> Self {
        Self {
            bits: [0; BASE_FIELDS_U64],
        }
    }

    /// # Panics
    ///
    /// Panics if `offset >= BASE_FIELDS_COUNT`.
    #[inline]
    pub fn get(&self, offset: usize) -> bool {
        assert!(offset < BASE_FIELDS_COUNT);
        (self.bits[offset / 64] & (1 << (offset % 64))) != 0
    }

    /// Writes `value` at `offset` and reports whether the bit actually flipped.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= BASE_FIELDS_COUNT`.
    #[inline]
    pub fn assign(&mut self, offset: usize, value: bool) -> bool {
        assert!(offset < BASE_FIELDS_COUNT);
        let word = &mut self.bits[offset / 64];
        let mask = 1u64 << (offset % 64);
        let before = *word;
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
        before != *word
    }

    pub fn reset(&mut self) {
        self.bits = [0; BASE_FIELDS_U64];
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }
}

impl Default for BaseFields {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BaseFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseFields")
            .field("dirty", &self.count_ones())
            .finish()
    }
}
