//! Provides list-shuffling functions matching the Ethereum 2.0 swap-or-not shuffle.
//!
//! There are two functions exported by this crate:
//!
//! - `compute_shuffled_index`: given a single index, computes the index resulting from a shuffle.
//! Runs in less time than it takes to run `shuffle_list`.
//! - `shuffle_list`: shuffles an entire list in-place. Runs in less time than it takes to run
//! `compute_shuffled_index` on each index.
//!
//! Both are pure functions of the seed, the round count and the list size. Neither consults any
//! source of randomness other than the seed.

mod compute_shuffled_index;
mod shuffle_list;

pub use compute_shuffled_index::compute_shuffled_index;
pub use shuffle_list::shuffle_list;

/// The largest list either function will shuffle.
///
/// Positions are hashed as a `u32` window of 256 positions, so larger lists cannot be addressed.
pub const MAX_LIST_SIZE: usize = 1 << 24;

const SEED_SIZE: usize = 32;
const ROUND_SIZE: usize = 1;
const POSITION_WINDOW_SIZE: usize = 4;
const PIVOT_VIEW_SIZE: usize = SEED_SIZE + ROUND_SIZE;
const TOTAL_SIZE: usize = SEED_SIZE + ROUND_SIZE + POSITION_WINDOW_SIZE;

/// Returns `true` if a list of `list_size` elements can be shuffled.
fn list_size_is_valid(list_size: usize) -> bool {
    list_size > 0 && list_size <= MAX_LIST_SIZE && list_size <= usize::MAX / 2
}

/// Interprets the first 8 bytes of `slice` as a little-endian `u64`.
fn bytes_to_int64(slice: &[u8]) -> u64 {
    let mut bytes = [0; 8];
    bytes.copy_from_slice(&slice[0..8]);
    u64::from_le_bytes(bytes)
}
