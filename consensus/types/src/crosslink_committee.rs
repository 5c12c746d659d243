use crate::*;

/// A committee of validators assigned to crosslink `shard` at `slot`.
///
/// `committee` is in shuffled order. Bit `i` of an attestation bitfield refers to `committee[i]`.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct CrosslinkCommittee {
    pub slot: Slot,
    pub shard: Shard,
    pub committee: Committee,
}
