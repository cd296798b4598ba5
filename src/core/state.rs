//! Round state.
//!
//! ## RoundState
//!
//! Everything one round needs:
//! - The 9 safes and their hidden multipliers (fixed at deal time)
//! - Opened safes, in reveal order
//! - Spins left, the bet, and the win record
//!
//! `RoundState` is a plain value. `RoundEngine` owns it and is the only
//! thing that mutates it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::config::{validate_bet, COPIES_PER_MULTIPLIER, PICK_COUNT, SAFE_COUNT, SPIN_LIMIT};
use super::error::RoundError;
use super::rng::RandomSource;
use super::safe::{Grid, Multiplier, Safe, SafeIndex, CATALOG_SIZE};

/// Reveal-ordered list of opened safes. Never longer than `SPIN_LIMIT`.
pub type OpenedSafes = SmallVec<[SafeIndex; SPIN_LIMIT as usize]>;

/// State of a single round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Board in position order. `safes[i].index == SafeIndex::new(i)`.
    pub safes: [Safe; SAFE_COUNT],

    /// Opened safes in reveal order. Unique.
    pub opened: OpenedSafes,

    /// Spins left. Starts at `SPIN_LIMIT`.
    pub spins_remaining: u8,

    /// Amount staked for this round.
    pub bet_amount: i64,

    /// Set once two matching multipliers are revealed.
    pub won: bool,

    /// Multiplier that produced the win.
    pub matched: Option<Multiplier>,

    /// `bet_amount * matched`, once won.
    pub payout: Option<i64>,
}

impl RoundState {
    /// Deal a fresh round.
    ///
    /// Draws `PICK_COUNT` distinct multipliers from the catalog and spreads
    /// `COPIES_PER_MULTIPLIER` of each over the board in random order.
    pub fn deal<R: RandomSource>(bet_amount: i64, rng: &mut R) -> Result<Self, RoundError> {
        let bet_amount = validate_bet(bet_amount)?;

        let picked = rng.pick_distinct(&Multiplier::ALL, PICK_COUNT);
        let mut layout: Vec<Multiplier> = picked
            .iter()
            .flat_map(|&m| std::iter::repeat(m).take(COPIES_PER_MULTIPLIER))
            .collect();
        rng.shuffle(&mut layout);

        let mut slots = [Multiplier::X15; SAFE_COUNT];
        slots.copy_from_slice(&layout);
        Ok(Self::with_layout_unchecked(bet_amount, slots))
    }

    /// Start a round from an explicit layout.
    ///
    /// The layout must hold exactly `PICK_COUNT` distinct multipliers,
    /// each in exactly `COPIES_PER_MULTIPLIER` safes.
    pub fn from_layout(bet_amount: i64, layout: [Multiplier; SAFE_COUNT]) -> Result<Self, RoundError> {
        let bet_amount = validate_bet(bet_amount)?;
        validate_layout(&layout)?;
        Ok(Self::with_layout_unchecked(bet_amount, layout))
    }

    fn with_layout_unchecked(bet_amount: i64, layout: [Multiplier; SAFE_COUNT]) -> Self {
        let safes = std::array::from_fn(|i| Safe::new(SafeIndex::new(i as u8), layout[i]));
        Self {
            safes,
            opened: OpenedSafes::new(),
            spins_remaining: SPIN_LIMIT,
            bet_amount,
            won: false,
            matched: None,
            payout: None,
        }
    }

    /// Get a safe by position.
    #[must_use]
    pub fn safe(&self, index: SafeIndex) -> &Safe {
        &self.safes[index.raw()]
    }

    /// Positions not yet opened, ascending.
    #[must_use]
    pub fn unopened(&self) -> SmallVec<[SafeIndex; SAFE_COUNT]> {
        self.safes
            .iter()
            .filter(|safe| !safe.revealed)
            .map(|safe| safe.index)
            .collect()
    }

    /// Open a safe and record it. Caller checks preconditions.
    pub(crate) fn open(&mut self, index: SafeIndex) -> Multiplier {
        let safe = &mut self.safes[index.raw()];
        debug_assert!(!safe.revealed, "safe opened twice");
        safe.revealed = true;
        let multiplier = safe.multiplier;

        self.opened.push(index);
        self.spins_remaining -= 1;
        multiplier
    }

    /// Multipliers of the opened safes, in reveal order.
    pub fn revealed_multipliers(&self) -> impl Iterator<Item = Multiplier> + '_ {
        self.opened.iter().map(move |&index| self.safe(index).multiplier)
    }

    /// The hidden layout in position order.
    #[must_use]
    pub fn layout(&self) -> [Multiplier; SAFE_COUNT] {
        std::array::from_fn(|i| self.safes[i].multiplier)
    }

    /// Player-visible board.
    #[must_use]
    pub fn grid(&self) -> Grid {
        std::array::from_fn(|i| self.safes[i].cell())
    }

    /// True once won or out of spins.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.won || self.spins_remaining == 0
    }
}

/// Count how many safes hold each catalog entry.
pub fn multiplier_counts(layout: &[Multiplier]) -> [usize; CATALOG_SIZE] {
    let mut counts = [0usize; CATALOG_SIZE];
    for m in layout {
        counts[m.catalog_index()] += 1;
    }
    counts
}

fn validate_layout(layout: &[Multiplier; SAFE_COUNT]) -> Result<(), RoundError> {
    let counts = multiplier_counts(layout);

    for (m, &count) in Multiplier::ALL.iter().zip(counts.iter()) {
        if count != 0 && count != COPIES_PER_MULTIPLIER {
            return Err(RoundError::InvalidLayout(format!(
                "{} appears {} times, expected {}",
                m, count, COPIES_PER_MULTIPLIER
            )));
        }
    }

    let distinct = counts.iter().filter(|&&c| c > 0).count();
    if distinct != PICK_COUNT {
        return Err(RoundError::InvalidLayout(format!(
            "{} distinct multipliers, expected {}",
            distinct, PICK_COUNT
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::safe::Cell;
    use crate::core::rng::{GameRng, ScriptedRng};
    use crate::core::safe::Multiplier::*;

    const LAYOUT: [Multiplier; SAFE_COUNT] = [X18, X15, X20, X15, X15, X18, X20, X20, X18];

    #[test]
    fn test_deal_distribution() {
        let mut rng = GameRng::new(42);

        for _ in 0..500 {
            let state = RoundState::deal(10, &mut rng).unwrap();
            let counts = multiplier_counts(&state.layout());

            assert_eq!(counts.iter().filter(|&&c| c == 3).count(), 3);
            assert_eq!(counts.iter().filter(|&&c| c == 0).count(), 3);
        }
    }

    #[test]
    fn test_deal_resets_round() {
        let state = RoundState::deal(25, &mut GameRng::new(1)).unwrap();

        assert_eq!(state.spins_remaining, SPIN_LIMIT);
        assert_eq!(state.bet_amount, 25);
        assert!(state.opened.is_empty());
        assert!(!state.won);
        assert_eq!(state.payout, None);
        assert_eq!(state.matched, None);
        assert!(state.safes.iter().all(|s| !s.revealed));
        for (i, safe) in state.safes.iter().enumerate() {
            assert_eq!(safe.index.raw(), i);
        }
    }

    #[test]
    fn test_deal_scripted() {
        // All-zero draws keep the catalog order, so x15, x16, x17 are picked.
        let state = RoundState::deal(10, &mut ScriptedRng::default()).unwrap();
        let counts = multiplier_counts(&state.layout());
        assert_eq!(&counts[..3], &[3, 3, 3]);
    }

    #[test]
    fn test_deal_rejects_bad_bet() {
        let err = RoundState::deal(0, &mut GameRng::new(1)).unwrap_err();
        assert!(matches!(err, RoundError::InvalidBet { bet: 0, .. }));
    }

    #[test]
    fn test_from_layout() {
        let state = RoundState::from_layout(10, LAYOUT).unwrap();
        assert_eq!(state.layout(), LAYOUT);
        assert_eq!(state.safe(SafeIndex::new(5)).multiplier, X18);
    }

    #[test]
    fn test_from_layout_rejects_wrong_counts() {
        let layout = [X18, X18, X18, X18, X15, X15, X20, X20, X20];
        let err = RoundState::from_layout(10, layout).unwrap_err();
        assert!(matches!(err, RoundError::InvalidLayout(_)));
    }

    #[test]
    fn test_from_layout_rejects_too_few_values() {
        let layout = [X18; SAFE_COUNT];
        assert!(RoundState::from_layout(10, layout).is_err());
    }

    #[test]
    fn test_open_and_grid() {
        let mut state = RoundState::from_layout(10, LAYOUT).unwrap();
        assert_eq!(state.unopened().len(), SAFE_COUNT);

        let m = state.open(SafeIndex::new(5));
        assert_eq!(m, X18);
        assert_eq!(state.spins_remaining, SPIN_LIMIT - 1);
        assert_eq!(state.opened.as_slice(), &[SafeIndex::new(5)]);
        assert_eq!(state.unopened().len(), SAFE_COUNT - 1);
        assert!(!state.unopened().contains(&SafeIndex::new(5)));

        let grid = state.grid();
        assert_eq!(grid[5], Cell::Revealed(X18));
        assert_eq!(grid[0], Cell::Hidden(SafeIndex::new(0)));

        state.open(SafeIndex::new(3));
        let revealed: Vec<_> = state.revealed_multipliers().collect();
        assert_eq!(revealed, vec![X18, X15]);
    }

    #[test]
    fn test_is_terminal() {
        let mut state = RoundState::from_layout(10, LAYOUT).unwrap();
        assert!(!state.is_terminal());
        state.spins_remaining = 0;
        assert!(state.is_terminal());
        state.spins_remaining = 2;
        state.won = true;
        assert!(state.is_terminal());
    }

    #[test]
    fn test_state_serde() {
        let mut state = RoundState::from_layout(10, LAYOUT).unwrap();
        state.open(SafeIndex::new(0));

        let json = serde_json::to_string(&state).unwrap();
        let restored: RoundState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, restored);
        assert!(json.contains("\"x18\""));
    }

    #[test]
    fn test_deserialize_rejects_off_board_safe() {
        let mut state = RoundState::from_layout(10, LAYOUT).unwrap();
        state.open(SafeIndex::new(8));

        let json = serde_json::to_string(&state).unwrap();
        let tampered = json.replace("\"opened\":[8]", "\"opened\":[9]");
        assert_ne!(json, tampered);
        assert!(serde_json::from_str::<RoundState>(&tampered).is_err());
    }
}
