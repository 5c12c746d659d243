use int_to_bytes::bit_is_set;
use serde::{Deserialize, Serialize};

/// A participation bitfield: bit `i` flags the committee member at position `i`.
///
/// Bits are packed most-significant-bit first, so bit `0` is `0x80` of the first byte. The
/// length of a `Bitfield` is always a whole number of bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bitfield(Vec<u8>);

impl Bitfield {
    /// Create a new, empty bitfield.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zeroed bitfield large enough to hold `num_bits` bits.
    pub fn with_capacity(num_bits: usize) -> Self {
        Self(vec![0; Self::num_bytes_for(num_bits)])
    }

    /// Create a new bitfield using the supplied `bytes` as input.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// The number of bytes needed to hold `num_bits` bits.
    pub fn num_bytes_for(num_bits: usize) -> usize {
        num_bits.div_ceil(8)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Read the value of a bit. Bits beyond the end of the bitfield are `false`.
    pub fn get(&self, i: usize) -> bool {
        bit_is_set(&self.0, i)
    }

    /// Set the value of a bit, growing the bitfield if `i` is out of bounds.
    ///
    /// Returns the previous value.
    pub fn set(&mut self, i: usize, value: bool) -> bool {
        let previous = self.get(i);

        let byte_index = i / 8;
        if byte_index >= self.0.len() {
            self.0.resize(byte_index + 1, 0);
        }

        let mask = 0x80 >> (i % 8);
        if value {
            self.0[byte_index] |= mask;
        } else {
            self.0[byte_index] &= !mask;
        }

        previous
    }

    /// Returns the number of bytes in the bitfield.
    pub fn num_bytes(&self) -> usize {
        self.0.len()
    }

    /// Returns the number of `1` bits in the bitfield.
    pub fn num_set_bits(&self) -> usize {
        self.0.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    /// Returns true if all bits are set to 0.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|byte| *byte == 0)
    }
}

impl From<Vec<u8>> for Bitfield {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}
