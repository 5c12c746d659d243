use crate::{bytes_to_int64, list_size_is_valid, PIVOT_VIEW_SIZE, SEED_SIZE, TOTAL_SIZE};
use ethereum_hashing::hash_fixed;
use std::cmp::max;

/// Return `p(index)` in a pseudorandom permutation `p` of `0...list_size-1` with `seed` as entropy.
///
/// Utilizes 'swap or not' shuffling found in
/// https://link.springer.com/content/pdf/10.1007%2F978-3-642-32009-5_1.pdf
/// See the 'generalized domain' algorithm on page 3.
///
/// Note: this function is significantly slower than the `shuffle_list` function in this crate.
/// Using `compute_shuffled_index` to shuffle an entire list, index by index, has been observed to
/// be 250x slower than `shuffle_list`. Therefore, this function is only useful when shuffling a
/// small portion of a much larger list.
///
/// Returns `None` under any of the following conditions:
///  - `list_size == 0`
///  - `index >= list_size`
///  - `list_size > 2**24`
///  - `list_size > usize::MAX / 2`
///  - `seed` is shorter than 32 bytes
pub fn compute_shuffled_index(
    index: usize,
    list_size: usize,
    seed: &[u8],
    shuffle_round_count: u8,
) -> Option<usize> {
    if !list_size_is_valid(list_size) || index >= list_size || seed.len() < SEED_SIZE {
        return None;
    }

    let mut index = index;
    for round in 0..shuffle_round_count {
        let pivot = bytes_to_int64(&hash_with_round(seed, round)[..]) as usize % list_size;
        index = do_round(seed, index, pivot, round, list_size);
    }
    Some(index)
}

fn do_round(seed: &[u8], index: usize, pivot: usize, round: u8, list_size: usize) -> usize {
    let flip = (pivot + (list_size - index)) % list_size;
    let position = max(index, flip);
    let source = hash_with_round_and_position(seed, round, position);
    let byte = source[(position % 256) / 8];
    let bit = (byte >> (position % 8)) % 2;

    if bit == 1 {
        flip
    } else {
        index
    }
}

fn hash_with_round_and_position(seed: &[u8], round: u8, position: usize) -> [u8; 32] {
    let mut buf = [0; TOTAL_SIZE];
    buf[..SEED_SIZE].copy_from_slice(&seed[..SEED_SIZE]);
    buf[SEED_SIZE] = round;
    buf[PIVOT_VIEW_SIZE..].copy_from_slice(&((position / 256) as u32).to_le_bytes());
    hash_fixed(&buf)
}

fn hash_with_round(seed: &[u8], round: u8) -> [u8; 32] {
    let mut buf = [0; PIVOT_VIEW_SIZE];
    buf[..SEED_SIZE].copy_from_slice(&seed[..SEED_SIZE]);
    buf[SEED_SIZE] = round;
    hash_fixed(&buf)
}
