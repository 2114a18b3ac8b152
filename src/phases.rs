//! The turn phase state machine.
//!
//! `Draw -> Recovery -> Attack -> Block -> Damage -> End -> Draw`, strictly
//! cyclic, advanced only by the advance-phase command. Each phase runs its
//! entry actions the moment it is entered; two bypasses exist:
//!
//! - Attack is skipped straight to End when the player's board is empty
//!   (nothing could attack), and
//! - Block is skipped straight to End when no attacker was selected.
//!
//! End entry actions still run on both bypasses, so zones and field
//! events decay exactly once per turn no matter which route was taken.

use crate::core::{CombatStep, GameEvent, GameState, Phase, RejectReason, Side};
use crate::{ai, combat, radiation, transform, zones};

/// Advance the machine one step, running entry actions and bypasses.
pub fn advance(state: &mut GameState, events: &mut Vec<GameEvent>) -> Result<(), RejectReason> {
    if state.game_over {
        return Err(RejectReason::GameOver);
    }

    let mut phase = state.phase.next();
    loop {
        if phase == Phase::Draw {
            state.turn += 1;
        }
        state.phase = phase;
        events.push(GameEvent::PhaseChanged { phase });

        match phase {
            Phase::Draw => enter_draw(state, events),
            Phase::Recovery => enter_recovery(state, events),
            Phase::Attack => {
                if state.board(Side::Player).is_empty() {
                    phase = Phase::End;
                    continue;
                }
            }
            Phase::Block => {
                if state.selection.attacker.is_none() {
                    phase = Phase::End;
                    continue;
                }
            }
            Phase::Damage => enter_damage(state, events),
            Phase::End => enter_end(state, events),
        }
        return Ok(());
    }
}

/// Draw entry: ambient radiation, the draw itself, deck-out check, zone
/// spawn roll.
pub fn enter_draw(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for side in Side::both() {
        radiation::gain(state, side, 1, events);
    }
    if state.game_over {
        return;
    }

    if let Some(card) = state.deck.pop_front() {
        events.push(GameEvent::CardDrawn {
            card: card.id,
            name: card.name.clone(),
        });
        state.hand.push_back(card);
    } else {
        events.push(GameEvent::DrawFailed);
        // Deck and hand exhausted: the player cannot continue.
        if state.hand.is_empty() && state.deck_dealt {
            state.game_over = true;
            state.winner = Some(Side::Opponent);
            events.push(GameEvent::GameOver {
                winner: Side::Opponent,
            });
            return;
        }
    }

    zones::maybe_spawn_zone(state, events);
}

fn enter_recovery(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for side in Side::both() {
        for (_, card) in state.board_mut(side).occupied_mut() {
            if card.transformed {
                card.transformed_turns += 1;
            }
            card.attack_buff = 0;
            if let Some(ult) = card.ultimate.as_mut() {
                ult.current_cooldown = ult.current_cooldown.saturating_sub(1);
            }
        }
        transform::auto_evolve(state, side, events);
    }
}

/// Damage entry: AI blocker assignment, then resolution.
fn enter_damage(state: &mut GameState, events: &mut Vec<GameEvent>) {
    combat::prune_selection(state);

    if state.selection.step == CombatStep::SelectBlocker && state.selection.blocker.is_none() {
        if let Some(target) = state.selection.target {
            // The defender blocks when it can spare a creature.
            state.selection.blocker = ai::choose_blocker(state, target);
        }
    }

    combat::resolve(state, events);
}

fn enter_end(state: &mut GameState, events: &mut Vec<GameEvent>) {
    zones::tick_zones(state, events);
    zones::tick_field_events(state, events);
    state.selection.clear();
    if state.game_over {
        return; // a drain zone or storm pushed a counter to the ceiling
    }

    zones::maybe_spawn_zone(state, events);
    zones::maybe_spawn_event(state, events);
    ai::maybe_deploy(state, events);
}
