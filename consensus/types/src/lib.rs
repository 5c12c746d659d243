//! Ethereum 2.0 types needed to assign validators to crosslink committees.

pub mod test_utils;

pub mod attestation_data;
pub mod attestation_duty;
pub mod beacon_state;
pub mod bitfield;
pub mod chain_spec;
pub mod crosslink_committee;
pub mod relative_epoch;
pub mod shuffling;
pub mod slot_epoch;
pub mod validator;
pub mod validator_registry;

use ethereum_types::H256;

pub use crate::attestation_data::AttestationData;
pub use crate::attestation_duty::AttestationDuty;
pub use crate::beacon_state::{BeaconState, Error as BeaconStateError, ShufflingInputs};
pub use crate::bitfield::Bitfield;
pub use crate::chain_spec::ChainSpec;
pub use crate::crosslink_committee::CrosslinkCommittee;
pub use crate::relative_epoch::{Error as RelativeEpochError, RelativeEpoch};
pub use crate::shuffling::Error as ShufflingError;
pub use crate::slot_epoch::{Epoch, Slot};
pub use crate::validator::Validator;

pub type Shard = u64;
pub type Committee = Vec<usize>;

pub type Hash256 = H256;
