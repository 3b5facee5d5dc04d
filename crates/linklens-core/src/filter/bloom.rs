//! Read-only probabilistic membership over a 32-bit word array.
//!
//! A part is a bit-array view plus its hash-iteration count; bit positions
//! come from k-fold double hashing of two FNV-1a digests. Parts are built
//! offline and only queried here.

/// One immutable region of a combined filter.
#[derive(Debug, Clone)]
pub struct FilterPart {
    bits: Vec<i32>,
    hash_count: u32,
}

impl FilterPart {
    pub fn new(bits: Vec<i32>, hash_count: u32) -> Self {
        FilterPart { bits, hash_count }
    }

    /// Membership test: true means "possibly present", false is definitive.
    ///
    /// The probe walk runs in `u64`: the stride digest spans the full `u32`
    /// range, so adding it to a position in `u32` can overflow, and a word
    /// count past 2^27 would truncate the bit count.
    pub fn contains(&self, key: &str) -> bool {
        if self.bits.is_empty() {
            return false;
        }
        let m = self.bits.len() as u64 * 32;
        let (a, b) = double_hash(key.as_bytes());
        let mut x = a as u64 % m;
        for _ in 0..self.hash_count {
            if !self.bit(x) {
                return false;
            }
            x = (x + b as u64) % m;
        }
        true
    }

    fn bit(&self, index: u64) -> bool {
        let word = self.bits[(index / 32) as usize];
        (word >> (index % 32)) & 1 == 1
    }

    /// Word count of the underlying bit array.
    pub fn len_words(&self) -> usize {
        self.bits.len()
    }

    /// Sets the bits for `key`. Production filters are prebuilt; this exists
    /// only so tests can construct small fixtures.
    #[cfg(test)]
    pub(crate) fn insert(&mut self, key: &str) {
        let m = self.bits.len() as u64 * 32;
        let (a, b) = double_hash(key.as_bytes());
        let mut x = a as u64 % m;
        for _ in 0..self.hash_count {
            self.bits[(x / 32) as usize] |= 1 << (x % 32);
            x = (x + b as u64) % m;
        }
    }

    /// Little-endian serialization of the word array (test fixtures only).
    #[cfg(test)]
    pub(crate) fn to_le_bytes(&self) -> Vec<u8> {
        self.bits.iter().flat_map(|w| w.to_le_bytes()).collect()
    }
}

/// Two independent 32-bit FNV-1a digests; the second seeds the probe stride.
fn double_hash(bytes: &[u8]) -> (u32, u32) {
    (fnv1a(bytes, 0), fnv1a(bytes, 0x5bd1_e995))
}

fn fnv1a(bytes: &[u8], seed: u32) -> u32 {
    let mut h: u32 = 0x811c_9dc5 ^ seed;
    for &b in bytes {
        h ^= b as u32;
        h = h.wrapping_mul(0x0100_0193);
    }
    h
}
