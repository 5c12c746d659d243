use crate::{
    bytes_to_int64, list_size_is_valid, PIVOT_VIEW_SIZE, POSITION_WINDOW_SIZE, SEED_SIZE,
    TOTAL_SIZE,
};
use ethereum_hashing::hash_fixed;

/// Reusable scratch space holding `seed || round || position_window`.
struct Buf([u8; TOTAL_SIZE]);

impl Buf {
    fn new(seed: &[u8]) -> Self {
        let mut buf = [0; TOTAL_SIZE];
        buf[0..SEED_SIZE].copy_from_slice(&seed[0..SEED_SIZE]);
        Self(buf)
    }

    fn set_round(&mut self, round: u8) {
        self.0[SEED_SIZE] = round;
    }

    /// Returns the new pivot. It is "raw" because it has not been modulo'd by the list size.
    fn raw_pivot(&self) -> u64 {
        bytes_to_int64(&hash_fixed(&self.0[0..PIVOT_VIEW_SIZE])[0..8])
    }

    fn mix_in_position(&mut self, position: usize) {
        let bytes = (position as u32).to_le_bytes();
        self.0[PIVOT_VIEW_SIZE..PIVOT_VIEW_SIZE + POSITION_WINDOW_SIZE].copy_from_slice(&bytes);
    }

    fn hash(&self) -> [u8; 32] {
        hash_fixed(&self.0)
    }
}

/// Shuffles an entire list in-place.
///
/// Note: this is equivalent to the `compute_shuffled_index` function, except it shuffles an entire
/// list not just a single index. With large lists this function has been observed to be 250x
/// faster than running `compute_shuffled_index` across an entire list.
///
/// Credits to [@protolambda](https://github.com/protolambda) for defining this algorithm.
///
/// Shuffles if `forwards == true`, otherwise un-shuffles.
/// It holds that: shuffle_list(shuffle_list(l, r, s, true), r, s, false) == l
///           and: shuffle_list(shuffle_list(l, r, s, false), r, s, true) == l
///
/// With `forwards == false`, the output at position `i` is the input at
/// `compute_shuffled_index(i, ..)`.
///
/// Returns `None` under any of the following conditions:
///  - `list_size == 0`
///  - `list_size > 2**24`
///  - `list_size > usize::MAX / 2`
///  - `rounds == 0`
///  - `seed` is shorter than 32 bytes
pub fn shuffle_list(
    mut input: Vec<usize>,
    rounds: u8,
    seed: &[u8],
    forwards: bool,
) -> Option<Vec<usize>> {
    let list_size = input.len();

    if !list_size_is_valid(list_size) || rounds == 0 || seed.len() < SEED_SIZE {
        return None;
    }

    let mut buf = Buf::new(seed);

    let mut r = if forwards { 0 } else { rounds - 1 };

    loop {
        buf.set_round(r);

        let pivot = buf.raw_pivot() as usize % list_size;

        let mirror = (pivot + 1) >> 1;

        buf.mix_in_position(pivot >> 8);
        let mut source = buf.hash();
        let mut byte_v = source[(pivot & 0xff) >> 3];

        for i in 0..mirror {
            let j = pivot - i;

            if j & 0xff == 0xff {
                buf.mix_in_position(j >> 8);
                source = buf.hash();
            }

            if j & 0x07 == 0x07 {
                byte_v = source[(j & 0xff) >> 3];
            }
            let bit_v = (byte_v >> (j & 0x07)) & 0x01;

            if bit_v == 1 {
                input.swap(i, j);
            }
        }

        let mirror = (pivot + list_size + 1) >> 1;
        let end = list_size - 1;

        buf.mix_in_position(end >> 8);
        let mut source = buf.hash();
        let mut byte_v = source[(end & 0xff) >> 3];

        for (loop_iter, i) in ((pivot + 1)..mirror).enumerate() {
            let j = end - loop_iter;

            if j & 0xff == 0xff {
                buf.mix_in_position(j >> 8);
                source = buf.hash();
            }

            if j & 0x07 == 0x07 {
                byte_v = source[(j & 0xff) >> 3];
            }
            let bit_v = (byte_v >> (j & 0x07)) & 0x01;

            if bit_v == 1 {
                input.swap(i, j);
            }
        }

        if forwards {
            r += 1;
            if r == rounds {
                break;
            }
        } else {
            if r == 0 {
                break;
            }
            r -= 1;
        }
    }

    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_shuffled_index;
    use ethereum_types::H256 as Hash256;

    const ROUNDS: u8 = 90;

    #[test]
    fn returns_none_for_zero_length_list() {
        assert_eq!(None, shuffle_list(vec![], ROUNDS, &[42; 32], true));
    }

    #[test]
    fn returns_none_for_zero_rounds() {
        assert_eq!(None, shuffle_list(vec![1, 2, 3], 0, &[42; 32], true));
    }

    #[test]
    fn returns_none_for_short_seed() {
        assert_eq!(None, shuffle_list(vec![1, 2, 3], ROUNDS, &[42, 42], true));
    }

    #[test]
    fn output_is_a_permutation_of_input() {
        let seed = Hash256::from_low_u64_be(7);
        let input: Vec<usize> = (0..1_000).map(|i| i * 3).collect();

        let mut output = shuffle_list(input.clone(), ROUNDS, seed.as_bytes(), false).unwrap();
        assert_ne!(output, input, "1000 elements should not stay in place");

        output.sort_unstable();
        assert_eq!(output, input);
    }

    #[test]
    fn is_deterministic() {
        let seed = Hash256::repeat_byte(0xab);
        let input: Vec<usize> = (0..513).collect();

        assert_eq!(
            shuffle_list(input.clone(), ROUNDS, seed.as_bytes(), false),
            shuffle_list(input, ROUNDS, seed.as_bytes(), false)
        );
    }

    #[test]
    fn different_seeds_give_different_shuffles() {
        let input: Vec<usize> = (0..513).collect();

        assert_ne!(
            shuffle_list(input.clone(), ROUNDS, &[1; 32], false),
            shuffle_list(input, ROUNDS, &[2; 32], false)
        );
    }

    #[test]
    fn backwards_undoes_forwards() {
        let seed = Hash256::from_low_u64_be(1_234);
        let input: Vec<usize> = (0..777).collect();

        let shuffled = shuffle_list(input.clone(), ROUNDS, seed.as_bytes(), true).unwrap();
        let unshuffled = shuffle_list(shuffled, ROUNDS, seed.as_bytes(), false).unwrap();

        assert_eq!(unshuffled, input);
    }

    #[test]
    fn matches_compute_shuffled_index() {
        let seed = Hash256::from_low_u64_be(99);
        // Spans more than one 256-position hash window.
        let list_size = 600;
        let input: Vec<usize> = (0..list_size).map(|i| i + 10_000).collect();

        let shuffled = shuffle_list(input.clone(), ROUNDS, seed.as_bytes(), false).unwrap();

        for (i, value) in shuffled.iter().enumerate() {
            let j = compute_shuffled_index(i, list_size, seed.as_bytes(), ROUNDS).unwrap();
            assert_eq!(*value, input[j], "position {}", i);
        }
    }
}
