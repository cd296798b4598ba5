//! Round engine integration tests.
//!
//! Forced scenarios use `with_layout` plus `ScriptedRng`. Each scripted
//! value indexes the ascending list of still-unopened safes.

use safe_cracker::core::config::{SAFE_COUNT, SPIN_LIMIT};
use safe_cracker::core::state::multiplier_counts;
use safe_cracker::{
    Cell, GameRng, Multiplier, RoundEngine, RoundError, RoundResult, SafeIndex, ScriptedRng, Win,
    WinStatus,
};

use safe_cracker::Multiplier::*;

const LAYOUT: [Multiplier; SAFE_COUNT] = [X18, X15, X20, X15, X15, X18, X20, X20, X18];

fn forced(bet: i64, script: &[usize]) -> RoundEngine<ScriptedRng> {
    RoundEngine::with_layout(bet, LAYOUT, ScriptedRng::new(script.iter().copied()))
        .expect("layout is valid")
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_fresh_round_shows_nine_labels() {
    let engine = RoundEngine::new(10, GameRng::new(42)).unwrap();
    let grid = engine.describe_grid();

    let labels: Vec<String> = grid.iter().map(|c| c.to_string()).collect();
    assert_eq!(labels, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
    assert_eq!(engine.spins_remaining(), SPIN_LIMIT);
    assert!(!engine.is_won());
    assert_eq!(engine.payout(), None);
}

#[test]
fn test_deal_uses_three_values_three_times() {
    let mut rng = GameRng::new(2024);
    for _ in 0..1000 {
        let engine = RoundEngine::new(10, rng.fork()).unwrap();
        let counts = multiplier_counts(&engine.state().layout());

        let mut used: Vec<usize> = counts.iter().copied().filter(|&c| c > 0).collect();
        used.sort_unstable();
        assert_eq!(used, vec![3, 3, 3]);
    }
}

#[test]
fn test_every_catalog_value_gets_dealt() {
    let mut rng = GameRng::new(5);
    let mut seen = [false; 6];
    for _ in 0..200 {
        let engine = RoundEngine::new(10, rng.fork()).unwrap();
        for m in engine.state().layout() {
            seen[m.catalog_index()] = true;
        }
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn test_invalid_bets() {
    for bet in [0, -1, -100] {
        match RoundEngine::new(bet, GameRng::new(1)) {
            Err(RoundError::InvalidBet { bet: got, .. }) => assert_eq!(got, bet),
            other => panic!("expected InvalidBet, got {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn test_invalid_layout() {
    let layout = [X15, X15, X15, X16, X16, X16, X17, X17, X18];
    let err = RoundEngine::with_layout(10, layout, ScriptedRng::default()).unwrap_err();
    assert!(matches!(err, RoundError::InvalidLayout(_)));
}

// =============================================================================
// Spins
// =============================================================================

#[test]
fn test_spins_never_repeat() {
    let mut rng = GameRng::new(77);
    for _ in 0..2000 {
        let mut engine = RoundEngine::new(10, rng.fork()).unwrap();
        let mut seen = Vec::new();
        while engine.spins_remaining() > 0 {
            let spin = engine.spin().unwrap();
            assert!(!seen.contains(&spin.safe), "safe {} spun twice", spin.safe);
            seen.push(spin.safe);
        }
        assert_eq!(engine.opened_safes(), seen.as_slice());
    }
}

#[test]
fn test_spin_cap() {
    let mut engine = RoundEngine::new(10, GameRng::new(3)).unwrap();
    let mut successes = 0;
    for _ in 0..10 {
        if engine.spin().is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, SPIN_LIMIT);
    assert_eq!(engine.opened_safes().len(), SPIN_LIMIT as usize);
}

#[test]
fn test_spin_at_zero_fails_without_mutation() {
    let mut engine = forced(10, &[0, 0, 0, 0]);
    for _ in 0..SPIN_LIMIT {
        engine.spin().unwrap();
    }

    let before = engine.state().clone();
    let grid = engine.describe_grid();

    assert_eq!(engine.spin(), Err(RoundError::NoSpinsRemaining));
    assert_eq!(engine.state(), &before);
    assert_eq!(engine.describe_grid(), grid);
    assert_eq!(engine.spins_remaining(), 0);
}

#[test]
fn test_spin_reports_multiplier_at_safe() {
    let mut engine = forced(10, &[2]);
    let spin = engine.spin().unwrap();

    assert_eq!(spin.safe, SafeIndex::new(2));
    assert_eq!(spin.multiplier, LAYOUT[2]);
    assert_eq!(spin.spins_remaining, SPIN_LIMIT - 1);
}

// =============================================================================
// Win detection and payout
// =============================================================================

#[test]
fn test_payout_x18_x15_x18() {
    // Safe 6 (x18), safe 4 (x15), safe 9 (x18).
    let mut engine = forced(10, &[5, 3, 6]);

    let reveals: Vec<Multiplier> = (0..2)
        .map(|_| {
            let spin = engine.spin().unwrap();
            assert_eq!(engine.check_win(), WinStatus::Pending);
            spin.multiplier
        })
        .collect();
    assert_eq!(reveals, vec![X18, X15]);

    let third = engine.spin().unwrap();
    assert_eq!(third.multiplier, X18);

    assert_eq!(
        engine.check_win(),
        WinStatus::Won(Win {
            multiplier: X18,
            payout: 180
        })
    );
    assert!(engine.is_won());
    assert_eq!(engine.matched_multiplier(), Some(X18));
    assert_eq!(engine.payout(), Some(180));
    assert!(engine.is_terminal());
}

#[test]
fn test_win_on_second_spin() {
    // Safe 2 (x15), then safe 4 (x15).
    let mut engine = forced(7, &[1, 2]);
    engine.spin().unwrap();
    engine.spin().unwrap();

    assert_eq!(
        engine.check_win(),
        WinStatus::Won(Win {
            multiplier: X15,
            payout: 105
        })
    );
    assert_eq!(engine.spins_remaining(), SPIN_LIMIT - 2);
    assert_eq!(engine.spin(), Err(RoundError::RoundComplete));
}

#[test]
fn test_tie_break_earliest_pair_wins() {
    // Opens safes 1 (x18), 2 (x15), 4 (x15), 6 (x18) with no check in
    // between: x15 completed its pair first.
    let mut engine = forced(10, &[0, 0, 1, 2]);
    for _ in 0..4 {
        engine.spin().unwrap();
    }
    let opened: Vec<u8> = engine.opened_safes().iter().map(|s| s.label()).collect();
    assert_eq!(opened, vec![1, 2, 4, 6]);

    assert_eq!(
        engine.check_win(),
        WinStatus::Won(Win {
            multiplier: X15,
            payout: 150
        })
    );
}

#[test]
fn test_result_lifecycle() {
    let mut engine = forced(10, &[5, 3, 6]);
    assert_eq!(engine.result(), None);

    for _ in 0..3 {
        engine.spin().unwrap();
        engine.check_win();
    }
    assert_eq!(
        engine.result(),
        Some(RoundResult::Won(Win {
            multiplier: X18,
            payout: 180
        }))
    );
}

// =============================================================================
// Grid projection
// =============================================================================

#[test]
fn test_describe_grid_idempotent() {
    let mut engine = RoundEngine::new(10, GameRng::new(11)).unwrap();
    for _ in 0..3 {
        let a = engine.describe_grid();
        let b = engine.describe_grid();
        assert_eq!(a, b);
        engine.spin().unwrap();
    }
}

#[test]
fn test_describe_grid_matches_opened() {
    let mut engine = RoundEngine::new(10, GameRng::new(12)).unwrap();
    engine.spin().unwrap();
    engine.spin().unwrap();

    let grid = engine.describe_grid();
    for (i, cell) in grid.iter().enumerate() {
        let index = SafeIndex::new(i as u8);
        let opened = engine.opened_safes().contains(&index);
        match cell {
            Cell::Revealed(m) => {
                assert!(opened);
                assert_eq!(*m, engine.state().safe(index).multiplier);
            }
            Cell::Hidden(label) => {
                assert!(!opened);
                assert_eq!(*label, index);
            }
        }
    }
}

// =============================================================================
// Re-initialization
// =============================================================================

#[test]
fn test_initialize_starts_new_round() {
    let mut engine = forced(10, &[5, 3, 6]);
    for _ in 0..3 {
        engine.spin().unwrap();
    }
    engine.check_win();
    assert!(engine.is_won());

    engine.initialize(30).unwrap();
    assert!(!engine.is_won());
    assert_eq!(engine.bet_amount(), 30);
    assert_eq!(engine.spins_remaining(), SPIN_LIMIT);
    assert!(engine.describe_grid().iter().all(|c| matches!(c, Cell::Hidden(_))));
}
