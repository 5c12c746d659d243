use crate::{Shard, Slot};
use serde::{Deserialize, Serialize};

/// The data upon which an attestation is based.
///
/// Only the fields needed to locate the attesting committee are held here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AttestationData {
    pub slot: Slot,
    pub shard: Shard,
}
