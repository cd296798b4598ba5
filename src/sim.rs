//! Headless batch simulation.
//!
//! Plays many rounds without a presenter and tallies the outcomes. Each
//! round gets its own fork of one seeded `GameRng`, so a `(seed, rounds)`
//! pair always produces the same report.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::core::config::{validate_bet, SPIN_LIMIT};
use crate::core::error::RoundError;
use crate::core::rng::GameRng;
use crate::core::safe::Multiplier;
use crate::rules::{RoundEngine, RoundResult};

/// Aggregate results of a simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Seed the run started from.
    pub seed: u64,
    /// Rounds played.
    pub rounds: u64,
    /// Rounds that ended in a match.
    pub wins: u64,
    /// Rounds that ran out of spins. Non-zero means a broken deal.
    pub exhausted: u64,
    /// Sum of bets.
    pub total_bet: i64,
    /// Sum of payouts.
    pub total_payout: i64,
    /// `wins_by_spin[n]` counts wins decided on spin `n`.
    pub wins_by_spin: [u64; SPIN_LIMIT as usize + 1],
    /// Wins per matched multiplier.
    pub wins_by_multiplier: BTreeMap<Multiplier, u64>,
}

impl SimulationReport {
    /// Fraction of rounds won.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.wins as f64 / self.rounds as f64
    }

    /// Payout returned per unit bet.
    #[must_use]
    pub fn return_to_player(&self) -> f64 {
        if self.total_bet == 0 {
            return 0.0;
        }
        self.total_payout as f64 / self.total_bet as f64
    }

    fn record(&mut self, result: &RoundResult, bet: i64, spins_used: usize) {
        self.rounds += 1;
        self.total_bet = self.total_bet.saturating_add(bet);
        match result {
            RoundResult::Won(win) => {
                self.wins += 1;
                self.total_payout = self.total_payout.saturating_add(win.payout);
                self.wins_by_spin[spins_used] += 1;
                *self.wins_by_multiplier.entry(win.multiplier).or_insert(0) += 1;
            }
            RoundResult::Exhausted => self.exhausted += 1,
        }
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "seed:            {}", self.seed)?;
        writeln!(f, "rounds:          {}", self.rounds)?;
        writeln!(f, "wins:            {} ({:.2}%)", self.wins, self.win_rate() * 100.0)?;
        writeln!(f, "exhausted:       {}", self.exhausted)?;
        writeln!(f, "total bet:       {}", self.total_bet)?;
        writeln!(f, "total payout:    {}", self.total_payout)?;
        writeln!(f, "return / bet:    {:.3}", self.return_to_player())?;
        for (spin, count) in self.wins_by_spin.iter().enumerate().skip(1) {
            writeln!(f, "won on spin {}:   {}", spin, count)?;
        }
        for (multiplier, count) in &self.wins_by_multiplier {
            writeln!(f, "won with {}:    {}", multiplier, count)?;
        }
        Ok(())
    }
}

/// Play `rounds` rounds at `bet` each.
///
/// ```
/// use safe_cracker::sim::simulate;
///
/// let report = simulate(100, 10, 42).unwrap();
/// assert_eq!(report.rounds, 100);
/// assert_eq!(report.wins, 100);
/// ```
pub fn simulate(rounds: u64, bet: i64, seed: u64) -> Result<SimulationReport, RoundError> {
    let bet = validate_bet(bet)?;
    let mut rng = GameRng::new(seed);
    let mut report = SimulationReport {
        seed,
        ..SimulationReport::default()
    };

    for round in 0..rounds {
        let mut engine = RoundEngine::new(bet, rng.fork())?;
        let result = loop {
            if let Some(result) = engine.result() {
                break result;
            }
            engine.spin()?;
            engine.check_win();
        };

        debug!(round, ?result, "simulated round");
        report.record(&result, bet, engine.opened_safes().len());
    }

    Ok(report)
}
