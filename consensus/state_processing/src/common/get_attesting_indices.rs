use crate::errors::AttestationParticipantsError as Error;
use log::trace;
use types::*;

/// Returns the validator indices of `committee` whose bit is set in `bitfield`.
///
/// The result is in committee order, i.e. the order the bits are read, *not* sorted by
/// validator index. Bit `i` always refers to `committee[i]`.
pub fn get_attesting_indices(committee: &[usize], bitfield: &Bitfield) -> Result<Vec<usize>, Error> {
    let expected = Bitfield::num_bytes_for(committee.len());

    verify!(
        bitfield.num_bytes() == expected,
        Error::BitfieldLengthMismatch {
            expected,
            actual: bitfield.num_bytes(),
        }
    );

    Ok(committee
        .iter()
        .enumerate()
        .filter_map(|(i, validator_index)| {
            if bitfield.get(i) {
                Some(*validator_index)
            } else {
                None
            }
        })
        .collect())
}

/// Returns the validators of the committee attesting to `attestation_data` whose bit is set in
/// `bitfield`, in committee order.
pub fn get_attestation_participants(
    state: &BeaconState,
    attestation_data: &AttestationData,
    bitfield: &Bitfield,
    spec: &ChainSpec,
) -> Result<Vec<usize>, Error> {
    let crosslink_committees =
        state.get_crosslink_committees_at_slot(attestation_data.slot, spec)?;

    let crosslink_committee = crosslink_committees
        .iter()
        .find(|cc| cc.shard == attestation_data.shard)
        .ok_or(Error::ShardNotFound {
            slot: attestation_data.slot,
            shard: attestation_data.shard,
        })?;

    let participants = get_attesting_indices(&crosslink_committee.committee, bitfield)?;

    trace!(
        "{} of {} committee members attested to shard {} at slot {}",
        participants.len(),
        crosslink_committee.committee.len(),
        attestation_data.shard,
        attestation_data.slot
    );

    Ok(participants)
}

/// Returns every validator that participated in any of `attestations`, sorted by increasing
/// index and without duplicates.
pub fn get_attestation_participants_union<'a, I>(
    state: &BeaconState,
    attestations: I,
    spec: &ChainSpec,
) -> Result<Vec<usize>, Error>
where
    I: IntoIterator<Item = (&'a AttestationData, &'a Bitfield)>,
{
    let mut all_participants =
        attestations
            .into_iter()
            .try_fold(vec![], |mut acc, (data, bitfield)| {
                acc.append(&mut get_attestation_participants(
                    state, data, bitfield, spec,
                )?);
                Ok::<_, Error>(acc)
            })?;

    all_participants.sort_unstable();
    all_participants.dedup();

    Ok(all_participants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use types::test_utils::TestingBeaconStateBuilder;

    fn state(validator_count: usize, slot: u64, spec: &ChainSpec) -> BeaconState {
        let mut builder = TestingBeaconStateBuilder::new(validator_count, spec);
        builder.teleport_to_slot(Slot::new(slot));
        builder.build()
    }

    fn full_bitfield(len: usize) -> Bitfield {
        let mut bitfield = Bitfield::with_capacity(len);
        for i in 0..len {
            bitfield.set(i, true);
        }
        bitfield
    }

    #[test]
    fn bits_map_to_committee_positions() {
        let committee = vec![40, 3, 17, 99, 5, 61, 8, 12, 70];
        // 77 == 0b0100_1101: positions 1, 4, 5 and 7.
        let bitfield = Bitfield::from_bytes(&[77, 0b1000_0000]);

        assert_eq!(
            get_attesting_indices(&committee, &bitfield),
            Ok(vec![3, 5, 61, 12, 70])
        );
    }

    #[test]
    fn output_is_in_committee_order_not_sorted() {
        let committee = vec![121, 11];
        let bitfield = Bitfield::from_bytes(&[0xff]);

        assert_eq!(
            get_attesting_indices(&committee, &bitfield),
            Ok(vec![121, 11])
        );
    }

    #[test]
    fn padding_bits_are_ignored() {
        let committee = vec![4, 2];
        // Only the first two bits refer to committee members.
        let bitfield = Bitfield::from_bytes(&[0b0011_1111]);

        assert_eq!(get_attesting_indices(&committee, &bitfield), Ok(vec![]));
    }

    #[test]
    fn rejects_wrong_bitfield_length() {
        let committee: Vec<usize> = (0..9).collect();

        assert_eq!(
            get_attesting_indices(&committee, &Bitfield::from_bytes(&[0xff])),
            Err(Error::BitfieldLengthMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            get_attesting_indices(&[], &Bitfield::from_bytes(&[0])),
            Err(Error::BitfieldLengthMismatch {
                expected: 0,
                actual: 1
            })
        );
    }

    #[quickcheck]
    fn full_bitfield_yields_whole_committee(committee: Vec<usize>) -> bool {
        get_attesting_indices(&committee, &full_bitfield(committee.len())) == Ok(committee)
    }

    /// `get_attestation_participants` is consistent with `get_crosslink_committees_at_slot` when
    /// every bit is set.
    #[test]
    fn participants_consistency() {
        let spec = ChainSpec::few_validators();
        let state = state(2_000, 70, &spec);

        for slot in state.committee_slot_bounds(&spec).start.as_u64()..128 {
            let slot = Slot::new(slot);
            for cc in state.get_crosslink_committees_at_slot(slot, &spec).unwrap() {
                let data = AttestationData {
                    slot,
                    shard: cc.shard,
                };
                let bitfield = full_bitfield(cc.committee.len());

                assert_eq!(
                    get_attestation_participants(&state, &data, &bitfield, &spec),
                    Ok(cc.committee)
                );
            }
        }
    }

    #[test]
    fn participants_follow_bit_order() {
        let spec = ChainSpec::few_validators();
        // 128 validators make committees of two.
        let state = state(128, 5, &spec);

        // Find a committee whose first member has the higher index.
        let cc = state
            .current_epoch(&spec)
            .slot_iter(spec.epoch_length)
            .flat_map(|slot| state.get_crosslink_committees_at_slot(slot, &spec).unwrap())
            .find(|cc| cc.committee[0] > cc.committee[1])
            .unwrap();
        let data = AttestationData {
            slot: cc.slot,
            shard: cc.shard,
        };

        let participants =
            get_attestation_participants(&state, &data, &Bitfield::from_bytes(&[0xff]), &spec)
                .unwrap();

        assert_eq!(participants, cc.committee);
        assert!(participants[0] > participants[1]);
    }

    #[test]
    fn partial_bitfield_for_two_member_committee() {
        let spec = ChainSpec::few_validators();
        let state = state(128, 10, &spec);
        let data = AttestationData {
            slot: Slot::new(1),
            shard: 1,
        };
        let committee = state
            .get_crosslink_committees_at_slot(data.slot, &spec)
            .unwrap()
            .remove(0)
            .committee;

        // 77 == 0b0100_1101, only bit 1 lies within a two member committee.
        let participants =
            get_attestation_participants(&state, &data, &Bitfield::from_bytes(&[77]), &spec);

        assert_eq!(participants, Ok(vec![committee[1]]));
    }

    #[test]
    fn incorrect_bitfield_length() {
        let spec = ChainSpec::few_validators();
        let validators_per_epoch = (spec.epoch_length * spec.target_committee_size) as usize;
        let state = state(validators_per_epoch, 0, &spec);
        let data = AttestationData::default();

        assert_eq!(
            get_attestation_participants(&state, &data, &Bitfield::from_bytes(&[1, 1]), &spec),
            Err(Error::BitfieldLengthMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn shard_not_found() {
        let spec = ChainSpec::few_validators();
        let state = state(128, 5, &spec);
        // One committee per slot: slot 2 is crosslinked to shard 2 only.
        let data = AttestationData {
            slot: Slot::new(2),
            shard: 3,
        };

        assert_eq!(
            get_attestation_participants(&state, &data, &Bitfield::from_bytes(&[0xff]), &spec),
            Err(Error::ShardNotFound {
                slot: Slot::new(2),
                shard: 3
            })
        );
    }

    #[test]
    fn slot_out_of_bounds_propagates() {
        let spec = ChainSpec::few_validators();
        let state = state(128, 0, &spec);
        let data = AttestationData {
            slot: Slot::new(spec.epoch_length + 1),
            shard: 0,
        };

        assert_eq!(
            get_attestation_participants(&state, &data, &Bitfield::from_bytes(&[0xff]), &spec),
            Err(Error::BeaconStateError(BeaconStateError::SlotOutOfBounds {
                slot: data.slot,
                lower: Slot::new(0),
                upper: Slot::new(spec.epoch_length),
            }))
        );
    }

    #[test]
    fn union_is_sorted_and_deduplicated() {
        let spec = ChainSpec::few_validators();
        let state = state(128, 5, &spec);

        let data_a = AttestationData {
            slot: Slot::new(2),
            shard: 2,
        };
        let data_b = AttestationData {
            slot: Slot::new(3),
            shard: 3,
        };
        let full = Bitfield::from_bytes(&[0xff]);

        let a = get_attestation_participants(&state, &data_a, &full, &spec).unwrap();
        let b = get_attestation_participants(&state, &data_b, &full, &spec).unwrap();
        let mut expected = [a, b].concat();
        expected.sort_unstable();

        let union = get_attestation_participants_union(
            &state,
            vec![(&data_a, &full), (&data_b, &full), (&data_a, &full)],
            &spec,
        )
        .unwrap();

        assert_eq!(union, expected);
    }
}
