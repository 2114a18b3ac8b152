//! Transformation and evolution rules.
//!
//! Transformation is a one-time, player-initiated upgrade gated by a
//! card's `TransformSpec`. Evolution is the repeatable ladder that opens
//! afterwards; its requirements are re-checked every Recovery phase since
//! radiation and turn counters keep moving.
//!
//! A transform or evolution of one card may ripple onto directly
//! adjacent, not-yet-transformed allies with complementary archetypes.
//! Those chain checks run once, immediately after the trigger.

use crate::core::{
    Archetype, CardId, GameEvent, GameState, Side, TransformBlocker, TransformSpec,
};
use crate::radiation;

/// Evaluate a transform requirement against the current state.
///
/// Checks every field; the first violated field is reported so rejection
/// messages can cite it.
pub fn check_requirement(
    state: &GameState,
    side: Side,
    slot: usize,
    spec: &TransformSpec,
    stones: u32,
) -> Result<(), TransformBlocker> {
    if stones < spec.stones {
        return Err(TransformBlocker::Stones { needed: spec.stones });
    }

    let radiation = state.radiation[side];
    if radiation < spec.radiation {
        return Err(TransformBlocker::Radiation { needed: spec.radiation });
    }
    if let Some(max) = spec.max_radiation {
        if radiation > max {
            return Err(TransformBlocker::RadiationTooHigh { max });
        }
    }

    if let Some(min_turn) = spec.min_turn {
        if state.turn < min_turn {
            return Err(TransformBlocker::Turn { needed: min_turn });
        }
    }

    if !spec.adjacent.is_empty() {
        let matched = state
            .board(side)
            .adjacent(slot)
            .any(|c| c.archetype.is_some_and(|a| spec.adjacent.contains(&a)));
        if !matched {
            return Err(TransformBlocker::Adjacency);
        }
    }

    Ok(())
}

/// Attempt the one-time transformation of a board card.
///
/// On success the card sheds its juvenile prefix, doubles attack,
/// multiplies defense by 1.5 (floored), and opens its evolution ladder.
/// Burst creatures vent on transformation: the opponent gains +3
/// radiation.
pub fn try_transform(
    state: &mut GameState,
    side: Side,
    card_id: CardId,
    events: &mut Vec<GameEvent>,
) -> Result<(), crate::core::RejectReason> {
    use crate::core::RejectReason;

    let Some((slot, card)) = state.find_on_board(side, card_id) else {
        return Err(RejectReason::NotOnBoard(card_id));
    };
    if card.transformed {
        return Err(RejectReason::AlreadyTransformed(card_id));
    }

    if let Some(spec) = card.transform.clone() {
        let stones = card.stones;
        check_requirement(state, side, slot, &spec, stones)
            .map_err(|blocker| RejectReason::TransformBlocked { card: card_id, blocker })?;
    }

    let card = state
        .board_mut(side)
        .get_mut(slot)
        .expect("slot checked occupied above");

    card.transformed = true;
    card.name = card.name.trim_start_matches("Baby ").to_string();
    card.attack *= 2;
    card.defense = (card.defense as f64 * 1.5).floor() as i32;
    card.transformed_turns = 0;
    card.evolution_level = Some(0);

    let archetype = card.archetype;
    events.push(GameEvent::Transformed {
        card: card_id,
        name: card.name.clone(),
    });

    // Archetype one-shots on transformation.
    if archetype == Some(Archetype::Burst) {
        radiation::gain(state, side.opposite(), 3, events);
    }

    chain_effects(state, side, slot, events);
    Ok(())
}

/// Evolve every eligible transformed card on a side's board.
///
/// Called each Recovery; a card evolves at most one step per turn.
pub fn auto_evolve(state: &mut GameState, side: Side, events: &mut Vec<GameEvent>) {
    let radiation = state.radiation[side];
    let mut evolved_slots = Vec::new();

    for (slot, card) in state.board_mut(side).occupied_mut() {
        if !card.transformed {
            continue;
        }
        let Some(step) = card.next_evolution() else { continue };

        let req = &step.requirement;
        let eligible = radiation >= req.radiation
            && card.stones >= req.stones
            && req
                .transformed_turns
                .map_or(true, |needed| card.transformed_turns >= needed);
        if !eligible {
            continue;
        }

        let step = step.clone();
        card.name = step.name.clone();
        card.ability = Some(step.ability);
        card.attack += step.attack_bonus;
        card.defense += step.defense_bonus;
        let level = card.evolution_level.unwrap_or(0) + 1;
        card.evolution_level = Some(level);

        events.push(GameEvent::Evolved {
            card: card.id,
            name: step.name,
            level,
        });
        evolved_slots.push(slot);
    }

    for slot in evolved_slots {
        chain_effects(state, side, slot, events);
    }
}

/// Ripple a transform/evolution onto adjacent untransformed allies.
///
/// - amplify + burst adjacency: the opponent takes +1 radiation
/// - shield + boost adjacency: the boost card gains +2 defense
fn chain_effects(state: &mut GameState, side: Side, slot: usize, events: &mut Vec<GameEvent>) {
    let Some(trigger) = state.board(side).get(slot) else {
        return;
    };
    let Some(trigger_arch) = trigger.archetype else {
        return;
    };
    let trigger_id = trigger.id;

    let neighbors: Vec<(usize, CardId, Archetype)> = crate::core::Board::adjacent_slots(slot)
        .filter_map(|i| {
            let c = state.board(side).get(i)?;
            if c.transformed {
                return None;
            }
            c.archetype.map(|a| (i, c.id, a))
        })
        .collect();

    for (neighbor_slot, neighbor_id, neighbor_arch) in neighbors {
        match (trigger_arch, neighbor_arch) {
            (Archetype::Amplify, Archetype::Burst) | (Archetype::Burst, Archetype::Amplify) => {
                events.push(GameEvent::ChainEffect {
                    source: trigger_id,
                    description: "Amplified burst vents radiation at the enemy".to_string(),
                });
                radiation::gain(state, side.opposite(), 1, events);
            }
            (Archetype::Shield, Archetype::Boost) => {
                if let Some(c) = state.board_mut(side).get_mut(neighbor_slot) {
                    c.defense += 2;
                }
                events.push(GameEvent::ChainEffect {
                    source: trigger_id,
                    description: "Shield lattice hardens the boosted ally (+2 defense)"
                        .to_string(),
                });
            }
            (Archetype::Boost, Archetype::Shield) => {
                if let Some(c) = state.board_mut(side).get_mut(slot) {
                    c.defense += 2;
                }
                events.push(GameEvent::ChainEffect {
                    source: neighbor_id,
                    description: "Shield lattice hardens the boosted ally (+2 defense)"
                        .to_string(),
                });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::core::{EngineConfig, RejectReason};
    use smallvec::smallvec;

    fn state() -> GameState {
        GameState::new(EngineConfig::without_randomness(), 42)
    }

    fn place(state: &mut GameState, side: Side, slot: usize, archetype: Archetype) -> CardId {
        let id = state.alloc_card_id();
        state.board_mut(side).place(slot, catalog::make(id, archetype));
        id
    }

    fn ready_to_transform(state: &mut GameState, side: Side, id: CardId) {
        state.radiation[side] = 5;
        let (_, card) = state.board_mut(side).find_mut(id).unwrap();
        card.stones = 3;
    }

    #[test]
    fn test_transform_succeeds_when_all_fields_hold() {
        let mut state = state();
        let id = place(&mut state, Side::Player, 0, Archetype::Boost);
        ready_to_transform(&mut state, Side::Player, id);

        let mut events = Vec::new();
        try_transform(&mut state, Side::Player, id, &mut events).unwrap();

        let card = state.board(Side::Player).get(0).unwrap();
        assert!(card.transformed);
        assert_eq!(card.name, "Godzilla"); // "Baby " stripped
        assert_eq!(card.attack, 4); // 2 doubled
        assert_eq!(card.defense, 4); // floor(3 * 1.5)
        assert_eq!(card.evolution_level, Some(0));
    }

    #[test]
    fn test_transform_fails_on_each_field_independently() {
        // Stones unmet.
        let mut state = state();
        let id = place(&mut state, Side::Player, 0, Archetype::Boost);
        state.radiation[Side::Player] = 5;
        let mut events = Vec::new();
        let err = try_transform(&mut state, Side::Player, id, &mut events).unwrap_err();
        assert!(matches!(
            err,
            RejectReason::TransformBlocked { blocker: TransformBlocker::Stones { needed: 3 }, .. }
        ));

        // Radiation unmet.
        let mut state = self::state();
        let id = place(&mut state, Side::Player, 0, Archetype::Boost);
        state.board_mut(Side::Player).find_mut(id).unwrap().1.stones = 3;
        let err = try_transform(&mut state, Side::Player, id, &mut events).unwrap_err();
        assert!(matches!(
            err,
            RejectReason::TransformBlocked {
                blocker: TransformBlocker::Radiation { needed: 5 },
                ..
            }
        ));
        assert!(!state.board(Side::Player).get(0).unwrap().transformed);
    }

    #[test]
    fn test_transform_max_radiation_and_min_turn() {
        let mut state = state();
        let id = place(&mut state, Side::Player, 0, Archetype::Shield);
        ready_to_transform(&mut state, Side::Player, id);

        {
            let (_, card) = state.board_mut(Side::Player).find_mut(id).unwrap();
            let spec = card.transform.as_mut().unwrap();
            spec.max_radiation = Some(7);
            spec.min_turn = Some(3);
        }

        // Turn 1 < 3.
        let mut events = Vec::new();
        let err = try_transform(&mut state, Side::Player, id, &mut events).unwrap_err();
        assert!(matches!(
            err,
            RejectReason::TransformBlocked { blocker: TransformBlocker::Turn { needed: 3 }, .. }
        ));

        // Overheated.
        state.turn = 3;
        state.radiation[Side::Player] = 9;
        let err = try_transform(&mut state, Side::Player, id, &mut events).unwrap_err();
        assert!(matches!(
            err,
            RejectReason::TransformBlocked {
                blocker: TransformBlocker::RadiationTooHigh { max: 7 },
                ..
            }
        ));
    }

    #[test]
    fn test_transform_adjacency_requirement_cites_adjacency() {
        // Scenario: stones and radiation met, adjacency unmet.
        let mut state = state();
        let id = place(&mut state, Side::Player, 0, Archetype::Amplify);
        ready_to_transform(&mut state, Side::Player, id);

        {
            let (_, card) = state.board_mut(Side::Player).find_mut(id).unwrap();
            card.transform.as_mut().unwrap().adjacent = smallvec![Archetype::Burst];
        }

        let mut events = Vec::new();
        let err = try_transform(&mut state, Side::Player, id, &mut events).unwrap_err();
        assert!(matches!(
            err,
            RejectReason::TransformBlocked { blocker: TransformBlocker::Adjacency, .. }
        ));
        assert!(!state.board(Side::Player).get(0).unwrap().transformed);

        // Satisfy it with a burst neighbor.
        place(&mut state, Side::Player, 1, Archetype::Burst);
        try_transform(&mut state, Side::Player, id, &mut events).unwrap();
        assert!(state.board(Side::Player).get(0).unwrap().transformed);
    }

    #[test]
    fn test_transform_is_one_time() {
        let mut state = state();
        let id = place(&mut state, Side::Player, 0, Archetype::Boost);
        ready_to_transform(&mut state, Side::Player, id);

        let mut events = Vec::new();
        try_transform(&mut state, Side::Player, id, &mut events).unwrap();
        let err = try_transform(&mut state, Side::Player, id, &mut events).unwrap_err();
        assert_eq!(err, RejectReason::AlreadyTransformed(id));
    }

    #[test]
    fn test_burst_transform_vents_onto_opponent() {
        let mut state = state();
        let id = place(&mut state, Side::Player, 0, Archetype::Burst);
        ready_to_transform(&mut state, Side::Player, id);

        let mut events = Vec::new();
        try_transform(&mut state, Side::Player, id, &mut events).unwrap();

        assert_eq!(state.radiation[Side::Opponent], 3);
    }

    #[test]
    fn test_chain_effect_shield_boost() {
        let mut state = state();
        let shield = place(&mut state, Side::Player, 1, Archetype::Shield);
        place(&mut state, Side::Player, 2, Archetype::Boost);
        ready_to_transform(&mut state, Side::Player, shield);

        let boost_def_before = state.board(Side::Player).get(2).unwrap().defense;

        let mut events = Vec::new();
        try_transform(&mut state, Side::Player, shield, &mut events).unwrap();

        assert_eq!(
            state.board(Side::Player).get(2).unwrap().defense,
            boost_def_before + 2
        );
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ChainEffect { .. })));
    }

    #[test]
    fn test_chain_effect_amplify_burst_hits_opponent() {
        let mut state = state();
        let amplify = place(&mut state, Side::Player, 0, Archetype::Amplify);
        place(&mut state, Side::Player, 1, Archetype::Burst);
        ready_to_transform(&mut state, Side::Player, amplify);

        let mut events = Vec::new();
        try_transform(&mut state, Side::Player, amplify, &mut events).unwrap();

        assert_eq!(state.radiation[Side::Opponent], 1);
    }

    #[test]
    fn test_chain_skips_transformed_neighbors() {
        let mut state = state();
        let shield = place(&mut state, Side::Player, 1, Archetype::Shield);
        let boost = place(&mut state, Side::Player, 2, Archetype::Boost);

        // Transform the boost neighbor first.
        ready_to_transform(&mut state, Side::Player, boost);
        let mut events = Vec::new();
        try_transform(&mut state, Side::Player, boost, &mut events).unwrap();
        let def_after_transform = state.board(Side::Player).get(2).unwrap().defense;

        // Now the shield transforms; its chain must skip the already
        // transformed boost card.
        state.board_mut(Side::Player).find_mut(shield).unwrap().1.stones = 3;
        try_transform(&mut state, Side::Player, shield, &mut events).unwrap();

        assert_eq!(
            state.board(Side::Player).get(2).unwrap().defense,
            def_after_transform
        );
    }

    #[test]
    fn test_auto_evolve_applies_step_and_deltas() {
        let mut state = state();
        let id = place(&mut state, Side::Player, 0, Archetype::Boost);
        ready_to_transform(&mut state, Side::Player, id);
        let mut events = Vec::new();
        try_transform(&mut state, Side::Player, id, &mut events).unwrap();

        // First boost step needs radiation 6, stones 4.
        state.radiation[Side::Player] = 6;
        {
            let (_, card) = state.board_mut(Side::Player).find_mut(id).unwrap();
            card.stones = 4;
        }
        let (attack_before, defense_before) = {
            let c = state.board(Side::Player).get(0).unwrap();
            (c.attack, c.defense)
        };

        auto_evolve(&mut state, Side::Player, &mut events);

        let card = state.board(Side::Player).get(0).unwrap();
        assert_eq!(card.name, "Radiation Absorber");
        assert_eq!(card.attack, attack_before + 2);
        assert_eq!(card.defense, defense_before + 1);
        assert_eq!(card.evolution_level, Some(1));
    }

    #[test]
    fn test_auto_evolve_requires_transform_and_rechecks() {
        let mut state = state();
        let id = place(&mut state, Side::Player, 0, Archetype::Boost);
        state.radiation[Side::Player] = 8;
        {
            let (_, card) = state.board_mut(Side::Player).find_mut(id).unwrap();
            card.stones = 6;
        }

        let mut events = Vec::new();
        auto_evolve(&mut state, Side::Player, &mut events);
        assert_eq!(
            state.board(Side::Player).get(0).unwrap().evolution_level,
            None
        );

        // Transform, then drop radiation below the step requirement:
        // still no evolution.
        state.radiation[Side::Player] = 5;
        state.board_mut(Side::Player).find_mut(id).unwrap().1.stones = 4;
        try_transform(&mut state, Side::Player, id, &mut events).unwrap();
        state.radiation[Side::Player] = 2;
        auto_evolve(&mut state, Side::Player, &mut events);
        assert_eq!(
            state.board(Side::Player).get(0).unwrap().evolution_level,
            Some(0)
        );

        // Radiation recovers on a later turn: the re-check now passes.
        state.radiation[Side::Player] = 6;
        auto_evolve(&mut state, Side::Player, &mut events);
        assert_eq!(
            state.board(Side::Player).get(0).unwrap().evolution_level,
            Some(1)
        );
    }

    #[test]
    fn test_second_evolution_needs_transformed_turns() {
        let mut state = state();
        let id = place(&mut state, Side::Player, 0, Archetype::Boost);
        ready_to_transform(&mut state, Side::Player, id);
        let mut events = Vec::new();
        try_transform(&mut state, Side::Player, id, &mut events).unwrap();

        state.radiation[Side::Player] = 8;
        state.board_mut(Side::Player).find_mut(id).unwrap().1.stones = 5;

        auto_evolve(&mut state, Side::Player, &mut events);
        assert_eq!(
            state.board(Side::Player).get(0).unwrap().evolution_level,
            Some(1)
        );

        // Step 2 needs transformed_turns >= 2; none have passed.
        auto_evolve(&mut state, Side::Player, &mut events);
        assert_eq!(
            state.board(Side::Player).get(0).unwrap().evolution_level,
            Some(1)
        );

        state.board_mut(Side::Player).find_mut(id).unwrap().1.transformed_turns = 2;
        auto_evolve(&mut state, Side::Player, &mut events);
        let card = state.board(Side::Player).get(0).unwrap();
        assert_eq!(card.evolution_level, Some(2));
        assert_eq!(card.name, "Radiation Master");
    }
}
