//! Radiation resource subsystem.
//!
//! Each side carries one radiation counter clamped to [0, 10]. Radiation
//! is double-edged: thresholds at 3/5/8 unlock combat bonuses, but a side
//! whose counter reaches 10 loses on the spot.
//!
//! All mutation goes through `gain` / `reduce` so threshold crossings are
//! detected exactly once per mutation and the win condition is checked
//! after every increase, not just at phase boundaries.

use crate::core::{GameEvent, GameState, Side};

/// Counter ceiling. Reaching it loses the game.
pub const MAX_RADIATION: u8 = 10;

/// Informational thresholds, checked on upward crossings.
pub const THRESHOLDS: [u8; 3] = [3, 5, 8];

/// Raise a side's radiation, clamped to the ceiling.
///
/// Emits `RadiationChanged` plus one `ThresholdCrossed` per threshold
/// crossed upward, and runs the win check: the side that hits the ceiling
/// loses. Once the game is over, counters freeze.
pub fn gain(state: &mut GameState, side: Side, amount: u8, events: &mut Vec<GameEvent>) {
    if amount == 0 || state.game_over {
        return;
    }

    let from = state.radiation[side];
    let to = from.saturating_add(amount).min(MAX_RADIATION);
    if to == from {
        return;
    }

    state.radiation[side] = to;
    events.push(GameEvent::RadiationChanged { side, from, to });

    for threshold in THRESHOLDS {
        if from < threshold && to >= threshold {
            events.push(GameEvent::ThresholdCrossed { side, threshold });
        }
    }

    if to == MAX_RADIATION {
        let winner = side.opposite();
        state.game_over = true;
        state.winner = Some(winner);
        events.push(GameEvent::GameOver { winner });
    }
}

/// Lower a side's radiation, floored at zero.
pub fn reduce(state: &mut GameState, side: Side, amount: u8, events: &mut Vec<GameEvent>) {
    if amount == 0 || state.game_over {
        return;
    }

    let from = state.radiation[side];
    let to = from.saturating_sub(amount);
    if to == from {
        return;
    }

    state.radiation[side] = to;
    events.push(GameEvent::RadiationChanged { side, from, to });
}

/// Move radiation from one side onto the other (drain zones).
///
/// The receiving side gains the full amount even if the giver was
/// already at zero.
pub fn transfer(state: &mut GameState, from: Side, amount: u8, events: &mut Vec<GameEvent>) {
    reduce(state, from, amount, events);
    gain(state, from.opposite(), amount, events);
}

/// Boost-archetype damage tier for a radiation level.
///
/// 0 below the first threshold, then +1 per threshold reached.
#[must_use]
pub fn boost_tier(radiation: u8) -> i32 {
    THRESHOLDS.iter().filter(|&&t| radiation >= t).count() as i32
}
