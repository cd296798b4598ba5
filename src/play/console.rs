//! Terminal presenter.
//!
//! Redraws the screen with crossterm and reads single key presses in raw
//! mode. With `auto` set it never clears or waits, which suits pipes and
//! scripted runs.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};

use super::grid::render_grid;
use super::{Presenter, Prompt};
use crate::core::safe::Grid;
use crate::rules::{RoundResult, SpinResult};

/// How a key press answers a prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Accept,
    Ignore,
    Quit,
}

/// Decide what a key press means for `prompt`.
///
/// Esc and Ctrl-C quit. A spin needs SPACE; "continue" takes any key.
#[must_use]
pub fn classify_key(prompt: Prompt, key: &KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');
    if ctrl_c || key.code == KeyCode::Esc {
        return KeyAction::Quit;
    }

    match prompt {
        Prompt::Spin if key.code != KeyCode::Char(' ') => KeyAction::Ignore,
        _ => KeyAction::Accept,
    }
}

/// Text shown for a prompt.
#[must_use]
pub fn prompt_text(prompt: Prompt) -> &'static str {
    match prompt {
        Prompt::Spin => "Press [SPACE] to spin",
        Prompt::Continue => "Press any key to continue...",
    }
}

/// Restores cooked mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn wait_for_key(prompt: Prompt) -> io::Result<()> {
    let _raw = RawModeGuard::enable()?;
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match classify_key(prompt, &key) {
            KeyAction::Accept => return Ok(()),
            KeyAction::Ignore => {}
            KeyAction::Quit => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "round abandoned"));
            }
        }
    }
}

/// Presenter writing to a terminal (or any writer in `auto` mode).
pub struct ConsolePresenter<W: Write> {
    out: W,
    auto: bool,
}

impl ConsolePresenter<io::Stdout> {
    /// Interactive presenter on stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsolePresenter<W> {
    /// Interactive presenter on `out`.
    pub fn new(out: W) -> Self {
        Self { out, auto: false }
    }

    /// Skip screen clearing and key waits.
    #[must_use]
    pub fn with_auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn show_grid(&mut self, grid: &Grid, spins_remaining: u8) -> io::Result<()> {
        if !self.auto {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        write!(self.out, "{}", render_grid(grid))?;
        writeln!(self.out, "Spins left: {}", spins_remaining)?;
        self.out.flush()
    }

    fn await_confirmation(&mut self, prompt: Prompt) -> io::Result<()> {
        writeln!(self.out, "{}", prompt_text(prompt))?;
        self.out.flush()?;
        if self.auto {
            return Ok(());
        }
        wait_for_key(prompt)
    }

    fn show_reveal(&mut self, spin: &SpinResult) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Safe {} opened!", spin.safe)?;
        writeln!(self.out, "Multiplier revealed: {}", spin.multiplier)?;
        self.out.flush()
    }

    fn show_result(&mut self, result: &RoundResult, bet_amount: i64) -> io::Result<()> {
        writeln!(self.out)?;
        match result {
            RoundResult::Won(win) => writeln!(
                self.out,
                "Congratulations! You matched {} and won {} ({} x {}).",
                win.multiplier,
                win.payout,
                bet_amount,
                win.multiplier.value()
            )?,
            RoundResult::Exhausted => writeln!(self.out, "Game over. You didn't win this time.")?,
        }
        self.out.flush()
    }
}
