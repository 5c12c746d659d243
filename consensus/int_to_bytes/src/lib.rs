//! Fixed-width big-endian integer encodings and the small set of byte-slice helpers used when
//! deriving shuffling seeds and decoding participation bitfields.
use bytes::{BufMut, BytesMut};

/// Returns `int` as a 1-byte big-endian vector.
pub fn int_to_bytes1(int: u8) -> Vec<u8> {
    vec![int]
}

/// Returns `int` as a 2-byte big-endian vector.
pub fn int_to_bytes2(int: u16) -> Vec<u8> {
    let mut bytes = BytesMut::with_capacity(2);
    bytes.put_u16(int);
    bytes.to_vec()
}

/// Returns the low 24 bits of `int` as a 3-byte big-endian vector.
///
/// The most significant byte of `int` is discarded.
pub fn int_to_bytes3(int: u32) -> Vec<u8> {
    let mut bytes = BytesMut::with_capacity(4);
    bytes.put_u32(int);
    bytes[1..].to_vec()
}

/// Returns `int` as a 4-byte big-endian vector.
pub fn int_to_bytes4(int: u32) -> Vec<u8> {
    let mut bytes = BytesMut::with_capacity(4);
    bytes.put_u32(int);
    bytes.to_vec()
}

/// Returns `int` as an 8-byte big-endian vector.
pub fn int_to_bytes8(int: u64) -> Vec<u8> {
    let mut bytes = BytesMut::with_capacity(8);
    bytes.put_u64(int);
    bytes.to_vec()
}

/// Returns `int` as a 32-byte vector: the 8-byte big-endian encoding followed by 24 zero bytes.
pub fn int_to_bytes32(int: u64) -> Vec<u8> {
    let mut bytes = BytesMut::with_capacity(32);
    bytes.put_u64(int);
    bytes.resize(32, 0);
    bytes.to_vec()
}

/// Decodes the first 8 bytes of `bytes` as a big-endian `u64`.
///
/// Returns `None` if fewer than 8 bytes are supplied.
pub fn from_bytes8(bytes: &[u8]) -> Option<u64> {
    let mut array = [0; 8];
    array.copy_from_slice(bytes.get(0..8)?);
    Some(u64::from_be_bytes(array))
}

/// Copies `bytes` into a 32-byte array, truncating longer inputs and zero-padding shorter ones.
pub fn to_bytes32(bytes: &[u8]) -> [u8; 32] {
    let mut array = [0; 32];
    let len = std::cmp::min(bytes.len(), 32);
    array[..len].copy_from_slice(&bytes[..len]);
    array
}

/// XORs `a` and `b` byte-by-byte. The output has the length of the shorter input.
pub fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}

/// Returns `true` if `a` sorts strictly before `b` when compared lexicographically.
///
/// Used to break ties by favouring the lower of two roots.
pub fn lower_than(a: &[u8], b: &[u8]) -> bool {
    a < b
}

/// Returns `true` if bit `i` of `bytes` is set.
///
/// Bits are numbered from the most significant bit of the first byte. Bits past the end of
/// `bytes` read as unset.
pub fn bit_is_set(bytes: &[u8], i: usize) -> bool {
    match bytes.get(i / 8) {
        Some(byte) => byte & (0x80 >> (i % 8)) != 0,
        None => false,
    }
}
