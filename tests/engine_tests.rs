//! End-to-end reducer tests driven through the public command surface.

use rad_duel::core::{
    Archetype, Card, CardId, Command, EngineConfig, GameEvent, GameState, Phase, RejectReason,
    Side, TransformBlocker,
};
use rad_duel::{catalog, engine};

fn quiet_state() -> GameState {
    GameState::new(EngineConfig::without_randomness(), 42)
}

fn place(state: &mut GameState, side: Side, slot: usize, archetype: Archetype) -> CardId {
    let id = state.alloc_card_id();
    state.board_mut(side).place(slot, catalog::make(id, archetype));
    id
}

// =============================================================================
// Combat Scenarios
// =============================================================================

/// A transformed boost attacker destroys an unshielded lone defender.
#[test]
fn test_transformed_boost_destroys_lone_defender() {
    let mut state = quiet_state();

    // Base attack 2, transformed: 4 effective. Radiation 6 adds the
    // boost tier on top, comfortably past the defender's 5 defense.
    let attacker_id = state.alloc_card_id();
    let mut attacker = Card::new(attacker_id, "Godzilla", 2, 5).with_archetype(Archetype::Boost);
    attacker.transformed = true;
    attacker.evolution_level = Some(0);
    state.board_mut(Side::Player).place(0, attacker);

    let defender_id = state.alloc_card_id();
    state
        .board_mut(Side::Opponent)
        .place(0, Card::new(defender_id, "Sentinel", 3, 5));

    state.radiation[Side::Player] = 6;
    state.phase = Phase::Attack;

    let outcome = engine::apply(&state, &Command::SelectAttacker { card: attacker_id });
    let outcome = engine::apply(&outcome.state, &Command::SelectTarget { card: defender_id });
    let outcome = engine::apply(&outcome.state, &Command::AdvancePhase); // Block
    assert_eq!(outcome.state.phase, Phase::Block);
    let outcome = engine::apply(&outcome.state, &Command::AdvancePhase); // Damage

    assert_eq!(outcome.state.phase, Phase::Damage);
    assert!(outcome.state.board(Side::Opponent).is_empty());
    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::CardDestroyed { card, .. } if *card == defender_id)));
    // No blocker existed, so no counter-damage touched the attacker.
    assert_eq!(outcome.state.board(Side::Player).get(0).unwrap().defense, 5);
}

/// With a second defender on the board, the AI blocks and the target is
/// spared.
#[test]
fn test_second_defender_blocks_the_attack() {
    let mut state = quiet_state();
    let attacker = place(&mut state, Side::Player, 0, Archetype::Burst);
    let target = place(&mut state, Side::Opponent, 0, Archetype::Drain);
    place(&mut state, Side::Opponent, 3, Archetype::Shield);
    state.phase = Phase::Attack;

    let outcome = engine::apply(&state, &Command::SelectAttacker { card: attacker });
    let outcome = engine::apply(&outcome.state, &Command::SelectTarget { card: target });
    let outcome = engine::apply(&outcome.state, &Command::AdvancePhase); // Block
    let outcome = engine::apply(&outcome.state, &Command::AdvancePhase); // Damage

    // The drainer kept its full defense; the shield took the hit.
    assert_eq!(
        outcome.state.board(Side::Opponent).get(0).unwrap().defense,
        catalog::base_defense(Archetype::Drain)
    );
    assert!(
        outcome.state.board(Side::Opponent).get(3).unwrap().defense
            < catalog::base_defense(Archetype::Shield)
    );
}

// =============================================================================
// Win / Loss Scenarios
// =============================================================================

/// The Draw-phase ambient gain tips a counter at 9 over the ceiling.
#[test]
fn test_draw_gain_at_nine_loses_the_game() {
    let mut state = quiet_state();
    catalog::deal_starter_deck(&mut state);
    state.radiation[Side::Player] = 9;
    state.phase = Phase::End;

    let outcome = engine::apply(&state, &Command::AdvancePhase);

    assert_eq!(outcome.state.radiation[Side::Player], 10);
    assert!(outcome.state.game_over);
    assert_eq!(outcome.state.winner, Some(Side::Opponent));
    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::GameOver { winner: Side::Opponent })));

    // A finished game rejects everything except Reset.
    let next = engine::apply(&outcome.state, &Command::AdvancePhase);
    assert!(matches!(
        next.events[0],
        GameEvent::Rejected(RejectReason::GameOver)
    ));
}

/// Deck and hand both empty at Draw entry: the player is out of cards.
#[test]
fn test_deck_out_marks_the_player_as_loser() {
    // A fresh state has no deck or hand; marking the deck as dealt makes
    // the empty draw a loss rather than a pre-game condition.
    let mut state = quiet_state();
    state.deck_dealt = true;
    state.phase = Phase::End;

    let outcome = engine::apply(&state, &Command::AdvancePhase);

    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::DrawFailed)));
    assert!(outcome.state.game_over);
    assert_eq!(outcome.state.winner, Some(Side::Opponent));
}

// =============================================================================
// Transformation Scenarios
// =============================================================================

/// Stones and radiation met but adjacency unmet: the rejection cites the
/// adjacency requirement and the card stays untransformed.
#[test]
fn test_transform_rejection_cites_adjacency() {
    let mut state = quiet_state();
    let card = place(&mut state, Side::Player, 0, Archetype::Amplify);
    state.radiation[Side::Player] = 5;
    {
        let (_, c) = state.board_mut(Side::Player).find_mut(card).unwrap();
        c.stones = 3;
        c.transform.as_mut().unwrap().adjacent.push(Archetype::Burst);
    }

    let outcome = engine::apply(&state, &Command::Transform { card });

    assert!(matches!(
        outcome.events[0],
        GameEvent::Rejected(RejectReason::TransformBlocked {
            blocker: TransformBlocker::Adjacency,
            ..
        })
    ));
    assert!(!outcome.state.board(Side::Player).get(0).unwrap().transformed);
    let text = outcome.events[0].describe();
    assert!(text.contains("adjacent"), "got: {text}");
}

/// The happy path: requirements met, the card transforms through the
/// command surface.
#[test]
fn test_transform_command_happy_path() {
    let mut state = quiet_state();
    let card = place(&mut state, Side::Player, 0, Archetype::Boost);
    state.radiation[Side::Player] = 5;
    state.board_mut(Side::Player).find_mut(card).unwrap().1.stones = 3;

    let outcome = engine::apply(&state, &Command::Transform { card });

    let transformed = outcome.state.board(Side::Player).get(0).unwrap();
    assert!(transformed.transformed);
    assert_eq!(transformed.name, "Godzilla");
    assert!(outcome
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::Transformed { .. })));
}

// =============================================================================
// Determinism
// =============================================================================

/// The same seed and command script always produce the same game.
#[test]
fn test_identical_seeds_identical_games() {
    let script = [
        Command::AdvancePhase,
        Command::AdvancePhase,
        Command::AdvancePhase,
        Command::AdvancePhase,
        Command::AdvancePhase,
        Command::AdvancePhase,
        Command::AdvancePhase,
    ];

    let run = |seed: u64| {
        let mut state = engine::new_game(EngineConfig::default(), seed);
        let mut all_events = Vec::new();
        for command in &script {
            let outcome = engine::apply(&state, command);
            all_events.extend(outcome.events);
            state = outcome.state;
        }
        (
            state.turn,
            state.phase,
            state.radiation[Side::Player],
            state.radiation[Side::Opponent],
            state.hand.len(),
            state.zones.len(),
            all_events,
        )
    };

    assert_eq!(run(1234), run(1234));
}

/// Different seeds eventually diverge (shuffle order at minimum).
#[test]
fn test_different_seeds_shuffle_differently() {
    let a = engine::new_game(EngineConfig::default(), 1);
    let b = engine::new_game(EngineConfig::default(), 2);

    let names_a: Vec<_> = a.deck.iter().map(|c| c.name.clone()).collect();
    let names_b: Vec<_> = b.deck.iter().map(|c| c.name.clone()).collect();
    assert_ne!(names_a, names_b);
}

// =============================================================================
// Rejection Semantics
// =============================================================================

/// A rejected command is a no-op: replaying it any number of times
/// changes nothing.
#[test]
fn test_rejection_is_idempotent() {
    let state = engine::new_game(EngineConfig::default(), 42);
    let ghost = CardId::new(9999);

    let first = engine::apply(&state, &Command::Transform { card: ghost });
    let second = engine::apply(&first.state, &Command::Transform { card: ghost });

    assert!(first.events[0].is_rejection());
    assert!(second.events[0].is_rejection());
    assert_eq!(first.state.turn, state.turn);
    assert_eq!(first.state.phase, state.phase);
    assert_eq!(first.state.radiation, state.radiation);
    assert_eq!(first.state.hand.len(), state.hand.len());
    assert_eq!(first.state.deck.len(), state.deck.len());
}

/// Selection commands outside their phase are rejected with the phase
/// named.
#[test]
fn test_selection_outside_phase_rejected() {
    let mut state = quiet_state();
    let card = place(&mut state, Side::Player, 0, Archetype::Boost);
    state.phase = Phase::Draw;

    let outcome = engine::apply(&state, &Command::SelectAttacker { card });

    assert!(matches!(
        outcome.events[0],
        GameEvent::Rejected(RejectReason::WrongPhase {
            expected: Phase::Attack,
            actual: Phase::Draw,
        })
    ));
}

// =============================================================================
// Full-Game Smoke Test
// =============================================================================

/// Drive a fresh game for many turns on phase advances alone; the engine
/// must stay internally consistent whatever the dice do.
#[test]
fn test_many_turns_smoke() {
    let mut state = engine::new_game(EngineConfig::default(), 7);

    for _ in 0..200 {
        let outcome = engine::apply(&state, &Command::AdvancePhase);
        state = outcome.state;

        assert!(state.radiation[Side::Player] <= 10);
        assert!(state.radiation[Side::Opponent] <= 10);
        if state.game_over {
            assert!(state.winner.is_some());
            break;
        }
    }
}
