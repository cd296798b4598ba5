//! Driving a round through a presenter.
//!
//! `play_round` owns the sequencing:
//!
//! 1. Show the grid, wait for a spin confirmation
//! 2. Spin, show the grid again and what was revealed
//! 3. Check for a win; if the round goes on, wait before the next spin
//!
//! `Presenter` is the only seam to the outside world. The console
//! implementation lives in `console`; tests plug in recorders.

pub mod console;
pub mod grid;

use std::io;

use thiserror::Error;
use tracing::warn;

use crate::core::error::RoundError;
use crate::core::rng::RandomSource;
use crate::core::safe::Grid;
use crate::rules::{RoundEngine, RoundResult, SpinResult};

pub use console::ConsolePresenter;

/// What the player is being asked to confirm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// Before a spin.
    Spin,
    /// After a reveal, before the next spin.
    Continue,
}

/// Renders round progress and collects confirmations.
pub trait Presenter {
    /// Show the board.
    fn show_grid(&mut self, grid: &Grid, spins_remaining: u8) -> io::Result<()>;

    /// Block until the player confirms.
    fn await_confirmation(&mut self, prompt: Prompt) -> io::Result<()>;

    /// Announce the safe a spin opened.
    fn show_reveal(&mut self, spin: &SpinResult) -> io::Result<()>;

    /// Announce how the round ended.
    fn show_result(&mut self, result: &RoundResult, bet_amount: i64) -> io::Result<()>;
}

/// Errors from playing a round.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error(transparent)]
    Round(#[from] RoundError),

    #[error("presentation failed: {0}")]
    Io(#[from] io::Error),
}

impl PlayError {
    /// True if the player abandoned the round at a prompt.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, PlayError::Io(err) if err.kind() == io::ErrorKind::Interrupted)
    }
}

/// Play the engine's current round to completion.
pub fn play_round<R, P>(engine: &mut RoundEngine<R>, presenter: &mut P) -> Result<RoundResult, PlayError>
where
    R: RandomSource,
    P: Presenter + ?Sized,
{
    // Settle reveals made before the round was handed over.
    engine.check_win();

    let result = loop {
        if let Some(result) = engine.result() {
            break result;
        }

        presenter.show_grid(&engine.describe_grid(), engine.spins_remaining())?;
        presenter.await_confirmation(Prompt::Spin)?;

        let spin = engine.spin()?;
        presenter.show_grid(&engine.describe_grid(), engine.spins_remaining())?;
        presenter.show_reveal(&spin)?;

        if engine.check_win().is_won() || engine.is_terminal() {
            continue;
        }
        presenter.await_confirmation(Prompt::Continue)?;
    };

    if result == RoundResult::Exhausted {
        warn!(
            opened = ?engine.opened_safes(),
            layout = ?engine.state().layout(),
            "spins exhausted without a match; layout breaks the deal invariant"
        );
    }

    presenter.show_result(&result, engine.bet_amount())?;
    Ok(result)
}
