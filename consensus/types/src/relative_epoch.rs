use crate::*;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Error {
    EpochTooLow { base: Epoch, other: Epoch },
    EpochTooHigh { base: Epoch, other: Epoch },
}

/// Defines the epochs relative to some epoch. Most useful when referring to the committees prior
/// to and during some epoch.
///
/// The genesis epoch has no predecessor, so at genesis only `Current` resolves.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum RelativeEpoch {
    /// The prior epoch.
    Previous,
    /// The current epoch.
    Current,
}

impl RelativeEpoch {
    /// Returns the `epoch` that `self` refers to, with respect to the `base` epoch.
    pub fn into_epoch(self, base: Epoch) -> Epoch {
        match self {
            RelativeEpoch::Previous => base - 1,
            RelativeEpoch::Current => base,
        }
    }

    /// Converts the `other` epoch into a `RelativeEpoch`, with respect to `base`
    ///
    /// ## Errors
    /// Returns an error when:
    /// - `EpochTooLow` when `other` is more than 1 prior to `base`.
    /// - `EpochTooHigh` when `other` is after `base`.
    pub fn from_epoch(base: Epoch, other: Epoch) -> Result<Self, Error> {
        if other == base {
            Ok(RelativeEpoch::Current)
        } else if other.as_u64().checked_add(1) == Some(base.as_u64()) {
            Ok(RelativeEpoch::Previous)
        } else if other < base {
            Err(Error::EpochTooLow { base, other })
        } else {
            Err(Error::EpochTooHigh { base, other })
        }
    }

    /// Convenience function for `Self::from_epoch` where both slots are converted into epochs.
    pub fn from_slot(base: Slot, other: Slot, slots_per_epoch: u64) -> Result<Self, Error> {
        Self::from_epoch(base.epoch(slots_per_epoch), other.epoch(slots_per_epoch))
    }

    /// A lowercase name for logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            RelativeEpoch::Previous => "previous",
            RelativeEpoch::Current => "current",
        }
    }
}

impl std::fmt::Display for RelativeEpoch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_epoch() {
        let base = Epoch::new(10);

        assert_eq!(RelativeEpoch::Current.into_epoch(base), base);
        assert_eq!(RelativeEpoch::Previous.into_epoch(base), base - 1);
    }

    #[test]
    fn from_epoch() {
        let base = Epoch::new(10);

        assert_eq!(
            RelativeEpoch::from_epoch(base, base - 1),
            Ok(RelativeEpoch::Previous)
        );
        assert_eq!(
            RelativeEpoch::from_epoch(base, base),
            Ok(RelativeEpoch::Current)
        );
        assert_eq!(
            RelativeEpoch::from_epoch(base, base - 2),
            Err(RelativeEpochError::EpochTooLow {
                base,
                other: base - 2
            })
        );
        assert_eq!(
            RelativeEpoch::from_epoch(base, base + 1),
            Err(RelativeEpochError::EpochTooHigh {
                base,
                other: base + 1
            })
        );
    }

    #[test]
    fn genesis_has_no_previous_epoch() {
        let genesis = Epoch::new(0);

        assert_eq!(
            RelativeEpoch::from_epoch(genesis, genesis),
            Ok(RelativeEpoch::Current)
        );
        assert!(RelativeEpoch::from_epoch(genesis, genesis + 1).is_err());
    }

    #[test]
    fn from_slot() {
        let slots_per_epoch = 64;
        let base = Epoch::new(10).start_slot(slots_per_epoch);

        assert_eq!(
            RelativeEpoch::from_slot(base, base - 1, slots_per_epoch),
            Ok(RelativeEpoch::Previous)
        );
        assert_eq!(
            RelativeEpoch::from_slot(base, base + (slots_per_epoch - 1), slots_per_epoch),
            Ok(RelativeEpoch::Current)
        );
        assert!(RelativeEpoch::from_slot(base, base + slots_per_epoch, slots_per_epoch).is_err());
    }
}
