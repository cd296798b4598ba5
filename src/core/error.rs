//! Round errors.
//!
//! Only misuse is an error. Winning and running out of spins are outcomes
//! and are reported through return values.

use thiserror::Error;

/// Errors raised by `RoundEngine`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RoundError {
    /// Bet outside `1..=max`.
    #[error("invalid bet {bet}: must be between 1 and {max}")]
    InvalidBet { bet: i64, max: i64 },

    /// `spin()` called with no spins left.
    #[error("no spins remaining")]
    NoSpinsRemaining,

    /// `spin()` called with every safe already open.
    #[error("no unopened safes remaining")]
    NoSafesRemaining,

    /// `spin()` called after the round was won.
    #[error("round is already won")]
    RoundComplete,

    /// An explicit layout broke the assignment rules.
    #[error("invalid safe layout: {0}")]
    InvalidLayout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RoundError::InvalidBet { bet: -3, max: 100 };
        assert_eq!(err.to_string(), "invalid bet -3: must be between 1 and 100");
        assert_eq!(RoundError::NoSpinsRemaining.to_string(), "no spins remaining");
        assert_eq!(
            RoundError::InvalidLayout("x15 appears 4 times".into()).to_string(),
            "invalid safe layout: x15 appears 4 times"
        );
    }
}
