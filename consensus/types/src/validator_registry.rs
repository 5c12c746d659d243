//! Contains logic to filter the validator registry down to the validators with duties.
use crate::{Slot, Validator};

/// Returns a list of all `validators` indices where the validator is active at the given
/// `slot`.
///
/// The indices are in ascending order.
pub fn get_active_validator_indices(validators: &[Validator], slot: Slot) -> Vec<usize> {
    let mut active = Vec::with_capacity(validators.len());

    for (index, validator) in validators.iter().enumerate() {
        if validator.is_active_at(slot) {
            active.push(index)
        }
    }

    active.shrink_to_fit();

    active
}

/// Returns the count of all `validators` indices where the validator is active at the given
/// `slot`.
pub fn get_active_validator_count(validators: &[Validator], slot: Slot) -> usize {
    validators.iter().filter(|v| v.is_active_at(slot)).count()
}
