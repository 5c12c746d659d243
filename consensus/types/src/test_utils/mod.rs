mod testing_beacon_state_builder;

pub use testing_beacon_state_builder::TestingBeaconStateBuilder;
