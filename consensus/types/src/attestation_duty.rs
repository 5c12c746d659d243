use crate::*;
use serde::{Deserialize, Serialize};

/// Where a validator must attest during an epoch, and its position in the committee there.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttestationDuty {
    pub slot: Slot,
    pub shard: Shard,
    pub committee_index: usize,
    pub committee_len: usize,
}
