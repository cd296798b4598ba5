//! Game constants and per-round configuration.
//!
//! The board shape is fixed: 9 safes in a 3×3 grid, 4 spins, 2 matching
//! multipliers to win. Only the bet and the RNG seed vary between runs,
//! and those live in `RoundConfig`.

use serde::{Deserialize, Serialize};

use super::error::RoundError;

/// Number of safes on the board.
pub const SAFE_COUNT: usize = 9;

/// Safes per grid row.
pub const GRID_WIDTH: usize = 3;

/// Spins available in one round.
pub const SPIN_LIMIT: u8 = 4;

/// Matching reveals needed to win.
pub const WIN_THRESHOLD: u8 = 2;

/// Distinct multipliers drawn from the catalog each round.
pub const PICK_COUNT: usize = 3;

/// Safes holding each drawn multiplier.
pub const COPIES_PER_MULTIPLIER: usize = 3;

/// Bet used when none is given.
pub const DEFAULT_BET: i64 = 10;

/// Largest accepted bet. Keeps `bet * 20` inside `i64`.
pub const MAX_BET: i64 = i64::MAX / 20;

/// Check that a bet is playable.
///
/// ```
/// use safe_cracker::core::config::{validate_bet, MAX_BET};
///
/// assert!(validate_bet(10).is_ok());
/// assert!(validate_bet(0).is_err());
/// assert!(validate_bet(MAX_BET + 1).is_err());
/// ```
pub fn validate_bet(bet: i64) -> Result<i64, RoundError> {
    if bet <= 0 || bet > MAX_BET {
        return Err(RoundError::InvalidBet { bet, max: MAX_BET });
    }
    Ok(bet)
}

/// Settings for a single round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Amount staked. The payout is `bet_amount * matched multiplier`.
    pub bet_amount: i64,

    /// RNG seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            bet_amount: DEFAULT_BET,
            seed: None,
        }
    }
}

impl RoundConfig {
    /// Create a config with the default bet and an entropy seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bet amount.
    #[must_use]
    pub fn with_bet(mut self, bet_amount: i64) -> Self {
        self.bet_amount = bet_amount;
        self
    }

    /// Fix the RNG seed so the round can be replayed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), RoundError> {
        validate_bet(self.bet_amount).map(|_| ())
    }
}
