//! Combat resolution: selection workflow and the damage pipeline.
//!
//! Selection is a sub-state-machine nested inside the Attack/Block/Damage
//! phases: `SelectAttacker -> SelectTarget -> SelectBlocker -> Resolved`.
//! The player attacks from their own board; the AI opponent defends.
//!
//! ## Blocker rule
//!
//! When a blocker is engaged, damage intended for the target redirects
//! entirely to the blocker, and the blocker's counter-damage (computed
//! with the same pipeline, roles swapped) lands on the attacker. With no
//! blocker, the target takes direct damage and nothing strikes back.
//!
//! ## Damage pipeline, in order
//!
//! 1. effective base attack (base + temporary buff)
//! 2. x2 if transformed
//! 3. +2 per evolution level
//! 4. archetype modifier (boost tier / burst energy / amplify x1.5 /
//!    drain radiation side effect)
//! 5. zones (+2 boost zone under the attacker, -2 shield zone over the
//!    defender, floored at 0)
//! 6. +1 per directly adjacent ally sharing the attacker's archetype
//! 7. critical hit roll: x1.5, floored
//! 8. floor at a minimum of 1

use crate::core::{
    Archetype, CardId, CombatStep, GameEvent, GameState, Phase, RejectReason, Side,
};
use crate::radiation;
use crate::zones::ZoneKind;

/// Outcome of one pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strike {
    pub amount: i32,
    pub critical: bool,
}

/// Choose (or toggle off) the attacking creature.
pub fn select_attacker(
    state: &mut GameState,
    card_id: CardId,
) -> Result<(), RejectReason> {
    if state.phase != Phase::Attack {
        return Err(RejectReason::WrongPhase {
            expected: Phase::Attack,
            actual: state.phase,
        });
    }

    if state.selection.attacker == Some(card_id) {
        // Re-selecting deselects and rewinds the sub-machine.
        state.selection.clear();
        return Ok(());
    }

    if state.find_on_board(Side::Player, card_id).is_none() {
        return Err(RejectReason::NotOnBoard(card_id));
    }

    // Choosing a second attacker replaces the first.
    state.selection.clear();
    state.selection.attacker = Some(card_id);
    state.selection.step = CombatStep::SelectTarget;
    Ok(())
}

/// Choose (or toggle off) the targeted defender.
pub fn select_target(state: &mut GameState, card_id: CardId) -> Result<(), RejectReason> {
    if state.phase != Phase::Attack {
        return Err(RejectReason::WrongPhase {
            expected: Phase::Attack,
            actual: state.phase,
        });
    }
    match state.selection.step {
        CombatStep::SelectTarget | CombatStep::SelectBlocker => {}
        CombatStep::SelectAttacker | CombatStep::Resolved => {
            return Err(RejectReason::NoAttackerSelected);
        }
    }
    debug_assert!(state.selection.attacker.is_some());

    if state.selection.target == Some(card_id) {
        state.selection.target = None;
        state.selection.blocker = None;
        state.selection.step = CombatStep::SelectTarget;
        return Ok(());
    }

    if state.find_on_board(Side::Opponent, card_id).is_none() {
        return Err(RejectReason::NotOnBoard(card_id));
    }

    state.selection.target = Some(card_id);
    state.selection.step = CombatStep::SelectBlocker;
    Ok(())
}

/// Choose (or toggle off) the blocking creature.
pub fn select_blocker(state: &mut GameState, card_id: CardId) -> Result<(), RejectReason> {
    if state.phase != Phase::Block {
        return Err(RejectReason::WrongPhase {
            expected: Phase::Block,
            actual: state.phase,
        });
    }
    match state.selection.step {
        CombatStep::SelectBlocker => {}
        CombatStep::SelectAttacker | CombatStep::Resolved => {
            return Err(RejectReason::NoAttackerSelected);
        }
        CombatStep::SelectTarget => return Err(RejectReason::NoTargetSelected),
    }
    debug_assert!(state.selection.attacker.is_some() && state.selection.target.is_some());

    if state.selection.blocker == Some(card_id) {
        state.selection.blocker = None;
        return Ok(());
    }

    if state.find_on_board(Side::Opponent, card_id).is_none() {
        return Err(RejectReason::NotOnBoard(card_id));
    }

    state.selection.blocker = Some(card_id);
    Ok(())
}

/// Drop selection roles whose cards left the board (ultimates and field
/// events can clear slots mid-phase).
pub fn prune_selection(state: &mut GameState) {
    if let Some(id) = state.selection.attacker {
        if state.find_on_board(Side::Player, id).is_none() {
            state.selection.clear();
            return;
        }
    }
    if let Some(id) = state.selection.target {
        if state.find_on_board(Side::Opponent, id).is_none() {
            state.selection.target = None;
            state.selection.blocker = None;
            state.selection.step = CombatStep::SelectTarget;
        }
    }
    if let Some(id) = state.selection.blocker {
        if state.find_on_board(Side::Opponent, id).is_none() {
            state.selection.blocker = None;
        }
    }
}

/// Run the damage pipeline for one attacker/defender pair.
///
/// Mutates state: burst attackers spend stored energy, drain attackers
/// gain radiation, and the critical roll advances the RNG.
pub fn compute_damage(
    state: &mut GameState,
    attacker_side: Side,
    attacker_slot: usize,
    defender_slot: usize,
    events: &mut Vec<GameEvent>,
) -> Strike {
    let defender_side = attacker_side.opposite();
    let attacker = state
        .board(attacker_side)
        .get(attacker_slot)
        .cloned()
        .expect("attacker slot occupied");

    let mut damage = attacker.effective_attack();

    if attacker.transformed {
        damage *= 2;
    }

    damage += 2 * attacker.evolution_level.unwrap_or(0) as i32;

    match attacker.archetype {
        Some(Archetype::Boost) => {
            let mut tier = radiation::boost_tier(state.radiation[attacker_side]);
            let amplify_ally = state
                .board(attacker_side)
                .occupied()
                .any(|(_, c)| c.archetype == Some(Archetype::Amplify));
            if amplify_ally {
                tier *= 2;
            }
            damage += tier;
        }
        Some(Archetype::Burst) => {
            if attacker.energy_stored > 0 {
                damage += attacker.energy_stored;
                if let Some(c) = state.board_mut(attacker_side).get_mut(attacker_slot) {
                    c.energy_stored = 0;
                }
            }
        }
        Some(Archetype::Amplify) => {
            if state.radiation[attacker_side] >= 3 {
                damage = (damage as f64 * 1.5).floor() as i32;
            }
        }
        Some(Archetype::Drain) => {
            // Side effect only, no damage change.
            radiation::gain(state, attacker_side, 1, events);
        }
        Some(Archetype::Reduce) | Some(Archetype::Shield) | None => {}
    }

    if state
        .zone_at(attacker_side, attacker_slot)
        .is_some_and(|z| z.kind == ZoneKind::Boost)
    {
        damage += 2;
    }
    if state
        .zone_at(defender_side, defender_slot)
        .is_some_and(|z| z.kind == ZoneKind::Shield)
    {
        damage = (damage - 2).max(0);
    }

    if let Some(archetype) = attacker.archetype {
        let allies = state
            .board(attacker_side)
            .adjacent(attacker_slot)
            .filter(|c| c.archetype == Some(archetype))
            .count();
        damage += allies as i32;
    }

    let critical = state.rng.gen_bool(state.config.crit_chance);
    if critical {
        damage = (damage as f64 * 1.5).floor() as i32;
    }

    Strike {
        amount: damage.max(1),
        critical,
    }
}

/// Resolve the selected combat, if attacker and target are both set.
///
/// Invoked at Damage phase entry. Applies damage, handles destruction
/// and its radiation side effects, then parks the sub-machine at
/// `Resolved` with all roles cleared; the End phase rewinds it to
/// `SelectAttacker` for the next turn.
pub fn resolve(state: &mut GameState, events: &mut Vec<GameEvent>) {
    prune_selection(state);

    let (Some(attacker_id), Some(target_id)) =
        (state.selection.attacker, state.selection.target)
    else {
        return; // nothing staged: Damage passes through
    };
    let blocker_id = state.selection.blocker;

    let Some((attacker_slot, _)) = state.find_on_board(Side::Player, attacker_id) else {
        debug_assert!(false, "selection referenced a missing attacker");
        state.selection.clear();
        return;
    };

    // Full-redirect rule: a blocker absorbs the whole attack.
    let defender_id = blocker_id.unwrap_or(target_id);
    let Some((defender_slot, _)) = state.find_on_board(Side::Opponent, defender_id) else {
        debug_assert!(false, "selection referenced a missing defender");
        state.selection.clear();
        return;
    };

    let strike = compute_damage(state, Side::Player, attacker_slot, defender_slot, events);
    events.push(GameEvent::DamageDealt {
        attacker: attacker_id,
        defender: defender_id,
        amount: strike.amount,
        critical: strike.critical,
    });
    if let Some(c) = state.board_mut(Side::Opponent).get_mut(defender_slot) {
        c.defense -= strike.amount;
    }

    // An engaged blocker strikes back with the same pipeline.
    if blocker_id.is_some() {
        let counter =
            compute_damage(state, Side::Opponent, defender_slot, attacker_slot, events);
        events.push(GameEvent::DamageDealt {
            attacker: defender_id,
            defender: attacker_id,
            amount: counter.amount,
            critical: counter.critical,
        });
        if let Some(c) = state.board_mut(Side::Player).get_mut(attacker_slot) {
            c.defense -= counter.amount;
        }
    }

    check_destruction(state, Side::Opponent, defender_slot, events);
    check_destruction(state, Side::Player, attacker_slot, events);

    state.selection.clear();
    state.selection.step = CombatStep::Resolved;
}

/// Remove a card whose defense fell to zero and pay out the radiation
/// side effects of its death.
fn check_destruction(
    state: &mut GameState,
    side: Side,
    slot: usize,
    events: &mut Vec<GameEvent>,
) {
    let destroyed = state
        .board(side)
        .get(slot)
        .map_or(false, |c| c.defense <= 0);
    if !destroyed {
        return;
    }

    let card = state
        .board_mut(side)
        .remove(slot)
        .expect("destruction checked occupancy");
    events.push(GameEvent::CardDestroyed {
        side,
        card: card.id,
        name: card.name.clone(),
    });

    // The destroyer harvests a point of radiation.
    let destroyer = side.opposite();
    radiation::gain(state, destroyer, 1, events);

    // A dying burst creature releases its payload onto its own side.
    if card.archetype == Some(Archetype::Burst) {
        radiation::gain(state, destroyer.opposite(), 2, events);
    }
}
