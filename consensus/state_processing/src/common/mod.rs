mod get_attesting_indices;

pub use get_attesting_indices::{
    get_attestation_participants, get_attestation_participants_union, get_attesting_indices,
};
