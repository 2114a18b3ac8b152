//! Opponent control.
//!
//! The opponent board is AI-driven and deliberately simple: a deployment
//! roll each End phase and a random blocker when an attack comes in. All
//! randomness flows through the state's own RNG so replays stay exact.

use crate::catalog;
use crate::core::{Archetype, CardId, GameEvent, GameState, Side};

/// Roll for an opponent deployment: a random catalog creature onto a
/// random empty slot.
pub fn maybe_deploy(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.rng.gen_bool(state.config.ai_deploy_chance) {
        return;
    }

    let empty = state.board(Side::Opponent).empty_slots();
    let Some(&slot) = state.rng.choose(&empty) else {
        return; // board full
    };
    let Some(&archetype) = state.rng.choose(&Archetype::ALL) else {
        return;
    };

    let id = state.alloc_card_id();
    state
        .board_mut(Side::Opponent)
        .place(slot, catalog::make(id, archetype));
    events.push(GameEvent::CardPlayed {
        side: Side::Opponent,
        card: id,
        slot,
    });
}

/// Pick a random blocker: any occupied opponent slot other than the
/// attack target. `None` when the target stands alone.
#[must_use]
pub fn choose_blocker(state: &mut GameState, target: CardId) -> Option<CardId> {
    let candidates: Vec<CardId> = state
        .board(Side::Opponent)
        .occupied()
        .filter(|(_, c)| c.id != target)
        .map(|(_, c)| c.id)
        .collect();
    state.rng.choose(&candidates).copied()
}
