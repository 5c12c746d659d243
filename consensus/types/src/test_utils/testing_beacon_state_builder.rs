use crate::*;

/// Builds a `BeaconState` whose validators are all active, for use in tests.
pub struct TestingBeaconStateBuilder {
    state: BeaconState,
}

impl TestingBeaconStateBuilder {
    /// Creates a state at the genesis slot with `validator_count` validators, each active from
    /// genesis and never exiting.
    pub fn new(validator_count: usize, spec: &ChainSpec) -> Self {
        let validator = Validator {
            activation_slot: spec.genesis_slot,
            exit_slot: spec.far_future_slot,
        };

        let state = BeaconState {
            slot: spec.genesis_slot,
            validator_registry: vec![validator; validator_count],
            previous_epoch_calculation_slot: spec.genesis_slot,
            current_epoch_calculation_slot: spec.genesis_slot,
            ..BeaconState::default()
        };

        Self { state }
    }

    /// Sets the state's slot.
    pub fn teleport_to_slot(&mut self, slot: Slot) -> &mut Self {
        self.state.slot = slot;
        self
    }

    /// Sets the seeds used to shuffle the previous and current epochs.
    pub fn set_seeds(&mut self, previous: Hash256, current: Hash256) -> &mut Self {
        self.state.previous_epoch_seed = previous;
        self.state.current_epoch_seed = current;
        self
    }

    /// Sets the shards given to the first committee of the previous and current epochs.
    pub fn set_start_shards(&mut self, previous: Shard, current: Shard) -> &mut Self {
        self.state.previous_epoch_start_shard = previous;
        self.state.current_epoch_start_shard = current;
        self
    }

    /// Mutable access to the validator registry, e.g. to exit or delay some validators.
    pub fn validators_mut(&mut self) -> &mut Vec<Validator> {
        &mut self.state.validator_registry
    }

    pub fn build(self) -> BeaconState {
        self.state
    }
}
