use std::fmt;
use types::{BeaconStateError, Shard, Slot};

macro_rules! impl_from_beacon_state_error {
    ($type: ident) => {
        impl From<BeaconStateError> for $type {
            fn from(e: BeaconStateError) -> $type {
                $type::BeaconStateError(e)
            }
        }
    };
}

/*
 * Attestation participants
 */

#[derive(Debug, PartialEq, Clone)]
pub enum AttestationParticipantsError {
    /// No committee at `slot` is assigned to `shard`.
    ShardNotFound { slot: Slot, shard: Shard },
    /// The bitfield is not exactly one bit per committee member, rounded up to whole bytes.
    BitfieldLengthMismatch { expected: usize, actual: usize },
    /// The committees at the attested slot could not be resolved.
    BeaconStateError(BeaconStateError),
}

impl_from_beacon_state_error!(AttestationParticipantsError);

impl fmt::Display for AttestationParticipantsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttestationParticipantsError::ShardNotFound { slot, shard } => {
                write!(f, "no committee for shard {} at slot {}", shard, slot)
            }
            AttestationParticipantsError::BitfieldLengthMismatch { expected, actual } => write!(
                f,
                "incorrect bitfield length: expected {} bytes, got {}",
                expected, actual
            ),
            AttestationParticipantsError::BeaconStateError(e) => write!(f, "{}", e),
        }
    }
}
