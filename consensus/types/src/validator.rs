use crate::Slot;
use serde::{Deserialize, Serialize};

/// Information about a `BeaconChain` validator.
///
/// Only the fields the committee computations read are held here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Validator {
    pub activation_slot: Slot,
    pub exit_slot: Slot,
}

impl Validator {
    /// Returns `true` if the validator is considered active at some slot.
    pub fn is_active_at(&self, slot: Slot) -> bool {
        self.activation_slot <= slot && slot < self.exit_slot
    }

    /// Returns `true` if the validator is considered exited at some slot.
    pub fn is_exited_at(&self, slot: Slot) -> bool {
        self.exit_slot <= slot
    }
}

impl Default for Validator {
    /// Yields a "default" `Validator`: never activated, never exited. Primarily used for testing.
    fn default() -> Self {
        Self {
            activation_slot: Slot::max_value(),
            exit_slot: Slot::max_value(),
        }
    }
}
