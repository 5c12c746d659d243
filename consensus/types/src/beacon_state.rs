use crate::shuffling::{get_shuffling, Error as ShufflingError};
use crate::validator_registry::{get_active_validator_count, get_active_validator_indices};
use crate::*;
use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;


#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// The requested slot is outside `[lower, upper)`, the slots of the previous and current
    /// epochs.
    SlotOutOfBounds {
        slot: Slot,
        lower: Slot,
        upper: Slot,
    },
    /// Shuffling the validators of `relative_epoch` failed.
    ShufflingFailed {
        relative_epoch: RelativeEpoch,
        error: ShufflingError,
    },
    InsufficientValidators,
    UnknownValidator(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::SlotOutOfBounds { slot, lower, upper } => write!(
                f,
                "input committee slot {} out of bounds: {} <= slot < {}",
                slot, lower, upper
            ),
            Error::ShufflingFailed {
                relative_epoch,
                error,
            } => write!(
                f,
                "could not shuffle {} epoch validators: {}",
                relative_epoch, error
            ),
            Error::InsufficientValidators => write!(f, "insufficient validators"),
            Error::UnknownValidator(index) => write!(f, "unknown validator index {}", index),
        }
    }
}

/// Everything needed to shuffle one epoch's committees, gathered once per call.
#[derive(Debug, PartialEq, Clone)]
pub struct ShufflingInputs {
    pub relative_epoch: RelativeEpoch,
    pub seed: Hash256,
    pub calculation_slot: Slot,
    pub start_shard: Shard,
    pub active_validator_indices: Vec<usize>,
    pub committees_per_slot: u64,
}

/// The state of the `BeaconChain` at some slot, as far as committee assignment is concerned.
///
/// The validator registry is append-only: a validator's index never changes and exited
/// validators are kept, marked by their `exit_slot`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct BeaconState {
    // Misc
    pub slot: Slot,

    // Validator registry
    pub validator_registry: Vec<Validator>,

    // Randomness and committees
    pub previous_epoch_start_shard: Shard,
    pub current_epoch_start_shard: Shard,
    pub previous_epoch_calculation_slot: Slot,
    pub current_epoch_calculation_slot: Slot,
    pub previous_epoch_seed: Hash256,
    pub current_epoch_seed: Hash256,
}

impl BeaconState {
    /// The epoch containing `self.slot`.
    pub fn current_epoch(&self, spec: &ChainSpec) -> Epoch {
        self.slot.epoch(spec.epoch_length)
    }

    /// The epoch prior to `self.current_epoch()`.
    ///
    /// If the current epoch is the genesis epoch, the genesis epoch is returned.
    pub fn previous_epoch(&self, spec: &ChainSpec) -> Epoch {
        RelativeEpoch::Previous.into_epoch(self.current_epoch(spec))
    }

    /// The slots for which `get_crosslink_committees_at_slot` can return committees: every slot
    /// of the previous and the current epoch.
    pub fn committee_slot_bounds(&self, spec: &ChainSpec) -> Range<Slot> {
        let lower = self.previous_epoch(spec).start_slot(spec.epoch_length);
        let upper = (self.current_epoch(spec) + 1).start_slot(spec.epoch_length);
        lower..upper
    }

    /// Returns the number of committees per slot in the previous epoch.
    pub fn get_previous_epoch_committee_count_per_slot(&self, spec: &ChainSpec) -> u64 {
        spec.committees_per_slot(get_active_validator_count(
            &self.validator_registry,
            self.previous_epoch_calculation_slot,
        ))
    }

    /// Returns the number of committees per slot in the current epoch.
    pub fn get_current_epoch_committee_count_per_slot(&self, spec: &ChainSpec) -> u64 {
        spec.committees_per_slot(get_active_validator_count(
            &self.validator_registry,
            self.current_epoch_calculation_slot,
        ))
    }

    /// Collects the seed, active validators and committee parameters for `relative_epoch`.
    pub fn get_shuffling_inputs(
        &self,
        relative_epoch: RelativeEpoch,
        spec: &ChainSpec,
    ) -> ShufflingInputs {
        let (seed, calculation_slot, start_shard) = match relative_epoch {
            RelativeEpoch::Previous => (
                self.previous_epoch_seed,
                self.previous_epoch_calculation_slot,
                self.previous_epoch_start_shard,
            ),
            RelativeEpoch::Current => (
                self.current_epoch_seed,
                self.current_epoch_calculation_slot,
                self.current_epoch_start_shard,
            ),
        };

        let active_validator_indices =
            get_active_validator_indices(&self.validator_registry, calculation_slot);
        let committees_per_slot = spec.committees_per_slot(active_validator_indices.len());

        ShufflingInputs {
            relative_epoch,
            seed,
            calculation_slot,
            start_shard,
            active_validator_indices,
            committees_per_slot,
        }
    }

    /// Returns the crosslink committees for `slot`, each with the shard it is assigned to.
    ///
    /// `slot` must be in the previous or current epoch.
    pub fn get_crosslink_committees_at_slot(
        &self,
        slot: Slot,
        spec: &ChainSpec,
    ) -> Result<Vec<CrosslinkCommittee>, Error> {
        let relative_epoch = self.relative_epoch_for_slot(slot, spec)?;
        let (inputs, shuffling) = self.get_epoch_committees(relative_epoch, spec)?;

        trace!(
            "Resolving committees for slot {} from the {} epoch shuffling",
            slot,
            relative_epoch
        );

        Ok(crosslink_committees_at_slot(&inputs, &shuffling, slot, spec))
    }

    /// Returns the index of the validator which proposes the block at `slot`.
    ///
    /// The proposer is the member at `slot % len` of the first committee at `slot`.
    pub fn get_beacon_proposer_index(&self, slot: Slot, spec: &ChainSpec) -> Result<usize, Error> {
        let committees = self.get_crosslink_committees_at_slot(slot, spec)?;

        committees
            .first()
            .ok_or(Error::InsufficientValidators)
            .and_then(|first| {
                let index = slot
                    .as_usize()
                    .checked_rem(first.committee.len())
                    .ok_or(Error::InsufficientValidators)?;
                Ok(first.committee[index])
            })
    }

    /// Returns the `AttestationDuty` of `validator_index` in the current epoch, or `None` if the
    /// validator is not in any current epoch committee.
    pub fn get_attestation_duties(
        &self,
        validator_index: usize,
        spec: &ChainSpec,
    ) -> Result<Option<AttestationDuty>, Error> {
        if validator_index >= self.validator_registry.len() {
            return Err(Error::UnknownValidator(validator_index));
        }

        let (inputs, shuffling) = self.get_epoch_committees(RelativeEpoch::Current, spec)?;

        let duty = self
            .current_epoch(spec)
            .slot_iter(spec.epoch_length)
            .flat_map(|slot| crosslink_committees_at_slot(&inputs, &shuffling, slot, spec))
            .find_map(|crosslink_committee| {
                crosslink_committee
                    .committee
                    .iter()
                    .position(|i| *i == validator_index)
                    .map(|committee_index| AttestationDuty {
                        slot: crosslink_committee.slot,
                        shard: crosslink_committee.shard,
                        committee_index,
                        committee_len: crosslink_committee.committee.len(),
                    })
            });

        Ok(duty)
    }

    /// Decides whether `slot` is served by the previous or the current epoch's shuffling.
    fn relative_epoch_for_slot(&self, slot: Slot, spec: &ChainSpec) -> Result<RelativeEpoch, Error> {
        let bounds = self.committee_slot_bounds(spec);
        let out_of_bounds = Error::SlotOutOfBounds {
            slot,
            lower: bounds.start,
            upper: bounds.end,
        };

        if !bounds.contains(&slot) {
            return Err(out_of_bounds);
        }

        RelativeEpoch::from_slot(self.slot, slot, spec.epoch_length).map_err(|_| out_of_bounds)
    }

    /// Shuffles the whole of `relative_epoch` into `committees_per_slot * epoch_length`
    /// committees.
    fn get_epoch_committees(
        &self,
        relative_epoch: RelativeEpoch,
        spec: &ChainSpec,
    ) -> Result<(ShufflingInputs, Vec<Committee>), Error> {
        let inputs = self.get_shuffling_inputs(relative_epoch, spec);

        let shuffling = get_shuffling(
            inputs.seed,
            inputs.active_validator_indices.clone(),
            inputs.calculation_slot,
            spec,
        )
        .map_err(|error| Error::ShufflingFailed {
            relative_epoch,
            error,
        })?;

        Ok((inputs, shuffling))
    }
}

/// Selects the committees of `slot` from an epoch's `shuffling` and assigns their shards.
fn crosslink_committees_at_slot(
    inputs: &ShufflingInputs,
    shuffling: &[Committee],
    slot: Slot,
    spec: &ChainSpec,
) -> Vec<CrosslinkCommittee> {
    let committees_per_slot = inputs.committees_per_slot;
    let offset = (slot % spec.epoch_length).as_u64();
    // Every term is reduced below `shard_count` so the sums cannot overflow.
    let slot_start_shard = (inputs.start_shard % spec.shard_count
        + (committees_per_slot * offset) % spec.shard_count)
        % spec.shard_count;

    let start = (committees_per_slot * offset) as usize;
    let end = (committees_per_slot * (offset + 1)) as usize;

    shuffling
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, committee)| CrosslinkCommittee {
            slot,
            shard: (slot_start_shard + i as u64) % spec.shard_count,
            committee: committee.clone(),
        })
        .collect()
}
