#[macro_use]
mod macros;

pub mod common;
pub mod errors;

pub use common::{
    get_attestation_participants, get_attestation_participants_union, get_attesting_indices,
};
pub use errors::AttestationParticipantsError;
