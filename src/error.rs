use thiserror::Error;

/// Everything that can go wrong while building fighters, resolving duels or
/// aggregating batches. Every variant is an invalid argument: either the
/// caller broke a contract, or an aggregation does not add up. None of them
/// are transient, so retrying the same call will always fail the same way
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The requested amount of duels is outside of the allowed range
    #[error("batch size must be between 1 and {max}, got {requested}")]
    BatchSize { requested: u32, max: u32 },
    /// The win/draw tallies of a batch do not add up to the amount of fights,
    /// or do not agree with the verdicts of the recorded fights
    #[error(
        "inconsistent tallies: {wins1} + {wins2} + {draws} does not match \
         {total} fights"
    )]
    TallyMismatch {
        wins1: u32,
        wins2: u32,
        draws: u32,
        total: u32,
    },
    /// The amount of recorded fights does not match the total of the batch
    #[error("recorded {recorded} fights, but the batch claims {total}")]
    FightCountMismatch { recorded: usize, total: u32 },
    /// The amount of attacks in a fight can not have happened in the
    /// recorded amount of turns
    #[error("{events} attacks can not happen in {turns} turns")]
    EventCountMismatch { events: usize, turns: u32 },
    /// A combat event was built from invalid data
    #[error("invalid combat event: {0}")]
    InvalidEvent(&'static str),
    /// A fighter was built from invalid data
    #[error("invalid fighter: {0}")]
    InvalidFighter(&'static str),
    /// A weapon was built from invalid data
    #[error("invalid weapon: {0}")]
    InvalidWeapon(&'static str),
    /// The simulation config can not be used to run anything
    #[error("invalid simulation config: {0}")]
    InvalidConfig(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_message() {
        let err = SimError::BatchSize {
            requested: 10_001,
            max: 10_000,
        };
        assert_eq!(
            err.to_string(),
            "batch size must be between 1 and 10000, got 10001"
        );
    }

    #[test]
    fn test_static_reason_is_forwarded() {
        let err = SimError::InvalidEvent("attacker name is blank");
        assert_eq!(
            err.to_string(),
            "invalid combat event: attacker name is blank"
        );
    }
}
