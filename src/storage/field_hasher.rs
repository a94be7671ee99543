use std::hash::{BuildHasherDefault, Hasher};

// 2^64 / golden ratio, odd so the multiplication is a bijection on u64.
const FIBONACCI_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

/// Multiplicative hasher for [`FieldIndex`](crate::fields::FieldIndex) keys.
///
/// A field index is a `u16`, so the full key fits in one word and needs no
/// mixing rounds. The multiply moves the index bits into the high bits of the
/// hash, which hashbrown uses for its control-byte tags. A plain identity hash
/// would leave those all zero.
#[derive(Default)]
pub struct FieldHasher {
    state: u64,
}

impl FieldHasher {
    #[inline]
    fn mix(&mut self, word: u64) {
        self.state = (self.state ^ word).wrapping_mul(FIBONACCI_MULTIPLIER);
    }
}

impl Hasher for FieldHasher {
    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.mix(u64::from(i));
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.mix(u64::from_le_bytes(word));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }
}

pub type BuildFieldHasher = BuildHasherDefault<FieldHasher>;

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, Hash};

    use super::*;
    use crate::fields::FieldIndex;

    fn hash_of(index: u16) -> u64 {
        BuildFieldHasher::default().hash_one(FieldIndex::new(index))
    }

    #[test]
    fn field_index_goes_through_write_u16() {
        let mut direct = FieldHasher::default();
        direct.write_u16(300);

        let mut via_hash = FieldHasher::default();
        FieldIndex::new(300).hash(&mut via_hash);

        assert_eq!(direct.finish(), via_hash.finish());
        assert_eq!(direct.finish(), 300u64.wrapping_mul(FIBONACCI_MULTIPLIER));
    }

    #[test]
    fn every_field_index_hashes_uniquely() {
        let mut seen = hashbrown::HashSet::new();
        for raw in 0..=u16::MAX {
            assert!(seen.insert(hash_of(raw)), "collision at field {raw}");
        }
    }

    #[test]
    fn overflow_indices_spread_into_tag_bits() {
        // hashbrown tags come from the top 7 bits
        let tags: hashbrown::HashSet<u64> = (128..1152u16).map(|raw| hash_of(raw) >> 57).collect();
        assert!(tags.len() > 64, "only {} distinct tags", tags.len());
    }

    #[test]
    fn byte_writes_depend_on_content() {
        let mut a = FieldHasher::default();
        a.write(b"field-a");
        let mut b = FieldHasher::default();
        b.write(b"field-b");
        assert_ne!(a.finish(), b.finish());

        let mut long = FieldHasher::default();
        long.write(&[7u8; 20]);
        assert_ne!(long.finish(), 0);
    }
}
