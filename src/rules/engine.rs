//! Round engine.
//!
//! `RoundEngine` runs one round at a time:
//! - Deals the hidden multipliers
//! - Opens one random unopened safe per spin
//! - Detects two matching reveals and computes the payout
//!
//! It never prints. Callers get outcome values back and decide how to show
//! them (see `crate::play`).
//!
//! ```
//! use safe_cracker::core::GameRng;
//! use safe_cracker::rules::{RoundEngine, WinStatus};
//!
//! let mut engine = RoundEngine::new(10, GameRng::new(42)).unwrap();
//!
//! while !engine.is_terminal() {
//!     engine.spin().unwrap();
//!     engine.check_win();
//! }
//!
//! // Three values over four spins: a pair always turns up.
//! assert!(engine.is_won());
//! assert!(matches!(engine.check_win(), WinStatus::Won(_)));
//! ```

use tracing::{debug, info};

use crate::core::config::{validate_bet, RoundConfig, SAFE_COUNT, WIN_THRESHOLD};
use crate::core::error::RoundError;
use crate::core::rng::{GameRng, RandomSource};
use crate::core::safe::{Grid, Multiplier, SafeIndex, CATALOG_SIZE};
use crate::core::state::RoundState;

/// What one spin revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinResult {
    /// Safe that was opened.
    pub safe: SafeIndex,
    /// Multiplier inside it.
    pub multiplier: Multiplier,
    /// Spins left after this one.
    pub spins_remaining: u8,
}

/// A winning match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Win {
    /// The matched multiplier.
    pub multiplier: Multiplier,
    /// `bet * multiplier`.
    pub payout: i64,
}

/// Result of a win check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinStatus {
    /// No match yet.
    Pending,
    /// Round won.
    Won(Win),
}

impl WinStatus {
    /// Check if the round is won.
    #[must_use]
    pub fn is_won(&self) -> bool {
        matches!(self, WinStatus::Won(_))
    }
}

/// How a finished round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundResult {
    /// Two multipliers matched.
    Won(Win),
    /// Spins ran out without a match. Unreachable with a valid deal.
    Exhausted,
}

impl RoundResult {
    /// Amount paid out; zero if the round was not won.
    #[must_use]
    pub fn payout(&self) -> i64 {
        match self {
            RoundResult::Won(win) => win.payout,
            RoundResult::Exhausted => 0,
        }
    }
}

/// Owns one round's state and its random source.
///
/// The random source is a type parameter so tests can inject `ScriptedRng`
/// or a fixed-seed `GameRng`.
#[derive(Clone, Debug)]
pub struct RoundEngine<R: RandomSource = GameRng> {
    state: RoundState,
    rng: R,
}

impl RoundEngine<GameRng> {
    /// Build an engine from a `RoundConfig`.
    ///
    /// Uses the configured seed, or OS entropy when none is set.
    pub fn from_config(config: &RoundConfig) -> Result<Self, RoundError> {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::new(config.bet_amount, rng)
    }

    /// Seed of the underlying generator.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl<R: RandomSource> RoundEngine<R> {
    /// Deal a new round.
    ///
    /// Fails with `InvalidBet` unless `1 <= bet_amount <= MAX_BET`.
    pub fn new(bet_amount: i64, mut rng: R) -> Result<Self, RoundError> {
        let state = RoundState::deal(bet_amount, &mut rng)?;
        debug!(bet = bet_amount, layout = ?state.layout(), "round dealt");
        Ok(Self { state, rng })
    }

    /// Start a round from a known layout instead of dealing one.
    ///
    /// The layout must hold three distinct multipliers, three safes each.
    pub fn with_layout(
        bet_amount: i64,
        layout: [Multiplier; SAFE_COUNT],
        rng: R,
    ) -> Result<Self, RoundError> {
        let state = RoundState::from_layout(bet_amount, layout)?;
        debug!(bet = bet_amount, ?layout, "round started from layout");
        Ok(Self { state, rng })
    }

    /// Deal a fresh round with the same random source.
    ///
    /// On error the current round is left as it was.
    pub fn initialize(&mut self, bet_amount: i64) -> Result<(), RoundError> {
        validate_bet(bet_amount)?;
        self.state = RoundState::deal(bet_amount, &mut self.rng)?;
        debug!(bet = bet_amount, layout = ?self.state.layout(), "round dealt");
        Ok(())
    }

    /// Open one random unopened safe.
    ///
    /// Errors leave the state untouched:
    /// - `NoSpinsRemaining` when all spins are used
    /// - `RoundComplete` when the round is already won
    /// - `NoSafesRemaining` when every safe is open
    pub fn spin(&mut self) -> Result<SpinResult, RoundError> {
        if self.state.spins_remaining == 0 {
            return Err(RoundError::NoSpinsRemaining);
        }
        if self.state.won {
            return Err(RoundError::RoundComplete);
        }

        let unopened = self.state.unopened();
        if unopened.is_empty() {
            return Err(RoundError::NoSafesRemaining);
        }

        let safe = unopened[self.rng.gen_index(unopened.len())];
        let multiplier = self.state.open(safe);
        let spins_remaining = self.state.spins_remaining;

        debug!(safe = safe.label(), %multiplier, spins_remaining, "safe opened");

        Ok(SpinResult {
            safe,
            multiplier,
            spins_remaining,
        })
    }

    /// Check the opened safes for a pair.
    ///
    /// Opened safes are walked in reveal order; the first multiplier to be
    /// seen `WIN_THRESHOLD` times wins. Once won, later calls return the
    /// same result.
    pub fn check_win(&mut self) -> WinStatus {
        if let (true, Some(multiplier), Some(payout)) =
            (self.state.won, self.state.matched, self.state.payout)
        {
            return WinStatus::Won(Win { multiplier, payout });
        }

        let Some(multiplier) = first_to_threshold(self.state.revealed_multipliers()) else {
            return WinStatus::Pending;
        };

        let payout = self.state.bet_amount * multiplier.value();
        self.state.won = true;
        self.state.matched = Some(multiplier);
        self.state.payout = Some(payout);

        info!(%multiplier, bet = self.state.bet_amount, payout, "round won");
        WinStatus::Won(Win { multiplier, payout })
    }

    /// The board as the player sees it.
    #[must_use]
    pub fn describe_grid(&self) -> Grid {
        self.state.grid()
    }

    /// Outcome of the round, once it is over.
    ///
    /// `None` while spins remain. With spins used up, a pair that
    /// `check_win` has not recorded yet also keeps this `None`, so a
    /// returned result never changes afterwards.
    #[must_use]
    pub fn result(&self) -> Option<RoundResult> {
        if let (true, Some(multiplier), Some(payout)) =
            (self.state.won, self.state.matched, self.state.payout)
        {
            return Some(RoundResult::Won(Win { multiplier, payout }));
        }
        if self.state.spins_remaining > 0 {
            return None;
        }
        match first_to_threshold(self.state.revealed_multipliers()) {
            Some(_) => None,
            None => Some(RoundResult::Exhausted),
        }
    }

    // === Accessors ===

    /// Spins left in this round.
    #[must_use]
    pub fn spins_remaining(&self) -> u8 {
        self.state.spins_remaining
    }

    /// True once `check_win` has recorded a match.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.state.won
    }

    /// `bet * multiplier` once won.
    #[must_use]
    pub fn payout(&self) -> Option<i64> {
        self.state.payout
    }

    /// The multiplier that won the round.
    #[must_use]
    pub fn matched_multiplier(&self) -> Option<Multiplier> {
        self.state.matched
    }

    /// Amount staked on this round.
    #[must_use]
    pub fn bet_amount(&self) -> i64 {
        self.state.bet_amount
    }

    /// Opened safes in reveal order.
    #[must_use]
    pub fn opened_safes(&self) -> &[SafeIndex] {
        &self.state.opened
    }

    /// True once won or out of spins.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Read-only view of the full round state, hidden layout included.
    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }
}

/// First multiplier whose running count reaches `WIN_THRESHOLD`.
fn first_to_threshold(reveals: impl Iterator<Item = Multiplier>) -> Option<Multiplier> {
    let mut counts = [0u8; CATALOG_SIZE];
    for multiplier in reveals {
        let count = &mut counts[multiplier.catalog_index()];
        *count += 1;
        if *count >= WIN_THRESHOLD {
            return Some(multiplier);
        }
    }
    None
}
