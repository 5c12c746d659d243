//! Shuffles the active validators of an epoch and splits them into committees.
use crate::*;
use int_to_bytes::{int_to_bytes32, to_bytes32, xor};
use log::{debug, trace};
use std::fmt;
use std::ops::Range;
use swap_or_not_shuffle::shuffle_list;

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// The list is longer than can be shuffled without modulo bias.
    BiasOverflow { list_len: usize, max_len: usize },
    /// The permutation rejected its inputs, e.g. a `ChainSpec` with zero shuffle rounds.
    UnableToShuffle,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::BiasOverflow { list_len, max_len } => write!(
                f,
                "input list exceeded upper bound and reached modulo bias ({} > {})",
                list_len, max_len
            ),
            Error::UnableToShuffle => write!(f, "unable to shuffle input list"),
        }
    }
}

/// Shuffles `active_validator_indices` with `seed` and splits the result into
/// `committees_per_slot * epoch_length` committees, in epoch order.
///
/// `slot` is rounded down to the start of its epoch and mixed into the seed, so every slot of
/// an epoch produces the same shuffling.
///
/// Committee `k` of `n` is the contiguous range `[len * k / n, len * (k + 1) / n)` of the
/// shuffled list, so committee sizes differ by at most one.
pub fn get_shuffling(
    seed: Hash256,
    active_validator_indices: Vec<usize>,
    slot: Slot,
    spec: &ChainSpec,
) -> Result<Vec<Committee>, Error> {
    let list_len = active_validator_indices.len();
    let max_len = spec.shuffle_list_size_limit();

    if list_len > max_len {
        return Err(Error::BiasOverflow { list_len, max_len });
    }

    let slot = slot - (slot % spec.epoch_length);
    let committee_count = spec.get_epoch_committee_count(list_len) as usize;

    let shuffled = if active_validator_indices.is_empty() {
        debug!("No active validators to shuffle at slot {}", slot);
        active_validator_indices
    } else {
        let seed = seed_for_slot(seed, slot);
        shuffle_list(
            active_validator_indices,
            spec.shuffle_round_count,
            seed.as_bytes(),
            false,
        )
        .ok_or(Error::UnableToShuffle)?
    };

    trace!(
        "Shuffled {} validators into {} committees for slot {}",
        list_len,
        committee_count,
        slot
    );

    Ok((0..committee_count)
        .map(|index| shuffled[committee_range(list_len, index, committee_count)].to_vec())
        .collect())
}

/// Mixes `slot` into `seed`: `seed XOR int_to_bytes32(slot)`.
pub fn seed_for_slot(seed: Hash256, slot: Slot) -> Hash256 {
    Hash256::from(to_bytes32(&xor(
        seed.as_bytes(),
        &int_to_bytes32(slot.as_u64()),
    )))
}

/// Returns the range of a `list_len` list that forms the `index`'th of `count` committees.
fn committee_range(list_len: usize, index: usize, count: usize) -> Range<usize> {
    let start = (list_len * index) / count;
    let end = (list_len * (index + 1)) / count;

    start..end
}
