use crate::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Holds all the "constants" the committee computations depend on.
///
/// A `ChainSpec` is fixed once the process is configured and is passed by reference into every
/// call that needs it.
///
/// Every deserialized `ChainSpec` is validated, whichever loader is used.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ChainSpecFields")]
pub struct ChainSpec {
    /*
     * Misc
     */
    pub shard_count: u64,
    pub target_committee_size: u64,
    pub shuffle_round_count: u8,
    /// The longest validator list that may be shuffled without modulo bias.
    pub max_shuffle_list_size: u64,

    /*
     * Initial Values
     */
    pub genesis_slot: Slot,
    pub far_future_slot: Slot,

    /*
     * Time parameters
     */
    pub epoch_length: u64,
}

impl ChainSpec {
    /// Returns the number of committees per slot for `active_validator_count` validators.
    ///
    /// Note: this is _not_ the committee size.
    ///
    /// Always at least `1` and at most `shard_count / epoch_length`.
    pub fn committees_per_slot(&self, active_validator_count: usize) -> u64 {
        let max_committees_per_slot = self.shard_count / self.epoch_length;
        let committees_per_slot = (active_validator_count as u64)
            / self.epoch_length.saturating_mul(self.target_committee_size).max(1);

        std::cmp::max(1, std::cmp::min(max_committees_per_slot, committees_per_slot))
    }

    /// Return the number of committees in one epoch.
    pub fn get_epoch_committee_count(&self, active_validator_count: usize) -> u64 {
        self.committees_per_slot(active_validator_count) * self.epoch_length
    }

    /// The largest list the shuffling engine will accept.
    ///
    /// This is `max_shuffle_list_size`, capped at what the swap-or-not permutation can address.
    pub fn shuffle_list_size_limit(&self) -> usize {
        std::cmp::min(
            usize::try_from(self.max_shuffle_list_size).unwrap_or(usize::MAX),
            swap_or_not_shuffle::MAX_LIST_SIZE,
        )
    }

    /// Parses a `ChainSpec` from YAML. Absent fields take their `foundation` values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Unable to parse chain spec YAML: {:?}", e))
    }

    /// Reads and parses a YAML `ChainSpec` from `path`.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let yaml = fs::read_to_string(path)
            .map_err(|e| format!("Unable to read chain spec {:?}: {:?}", path, e))?;

        Self::from_yaml_str(&yaml)
    }

    /// Rejects values that would make committee arithmetic divide by zero.
    fn validate(&self) -> Result<(), String> {
        if self.epoch_length == 0 {
            return Err("epoch_length must be non-zero".to_string());
        }
        if self.shard_count == 0 {
            return Err("shard_count must be non-zero".to_string());
        }
        if self.shuffle_round_count == 0 {
            return Err("shuffle_round_count must be non-zero".to_string());
        }
        Ok(())
    }

    /// Returns a `ChainSpec` compatible with the Ethereum Foundation specification.
    pub fn foundation() -> Self {
        Self {
            /*
             * Misc
             */
            shard_count: 1_024,
            target_committee_size: 128,
            shuffle_round_count: 90,
            max_shuffle_list_size: 2_u64.pow(24) - 1,

            /*
             * Initial Values
             */
            genesis_slot: Slot::new(0),
            far_future_slot: Slot::max_value(),

            /*
             * Time parameters
             */
            epoch_length: 64,
        }
    }

    /// Returns a `ChainSpec` with small committees, so a few hundred validators fill many of them.
    pub fn few_validators() -> Self {
        Self {
            target_committee_size: 8,
            ..ChainSpec::foundation()
        }
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::foundation()
    }
}

/// The serialized form of a `ChainSpec`, before defaults are filled in and values are checked.
#[derive(Deserialize)]
struct ChainSpecFields {
    shard_count: Option<u64>,
    target_committee_size: Option<u64>,
    shuffle_round_count: Option<u8>,
    max_shuffle_list_size: Option<u64>,
    genesis_slot: Option<Slot>,
    far_future_slot: Option<Slot>,
    epoch_length: Option<u64>,
}

impl TryFrom<ChainSpecFields> for ChainSpec {
    type Error = String;

    fn try_from(fields: ChainSpecFields) -> Result<Self, String> {
        let foundation = ChainSpec::foundation();

        let spec = ChainSpec {
            shard_count: fields.shard_count.unwrap_or(foundation.shard_count),
            target_committee_size: fields
                .target_committee_size
                .unwrap_or(foundation.target_committee_size),
            shuffle_round_count: fields
                .shuffle_round_count
                .unwrap_or(foundation.shuffle_round_count),
            max_shuffle_list_size: fields
                .max_shuffle_list_size
                .unwrap_or(foundation.max_shuffle_list_size),
            genesis_slot: fields.genesis_slot.unwrap_or(foundation.genesis_slot),
            far_future_slot: fields.far_future_slot.unwrap_or(foundation.far_future_slot),
            epoch_length: fields.epoch_length.unwrap_or(foundation.epoch_length),
        };

        spec.validate()?;

        Ok(spec)
    }
}
