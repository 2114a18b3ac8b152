//! The command reducer: the only write surface of the engine.
//!
//! `apply` takes the previous state and a command, and returns a fresh
//! state plus the ordered events that happened. The input state is never
//! mutated; a rejected command returns an equal state carrying a single
//! `Rejected` event. Every accepted event is also rendered into the
//! in-state game log.

use crate::catalog;
use crate::core::{
    Archetype, Board, Card, CardId, ComboKind, Command, EngineConfig, GameEvent, GameState,
    NotificationSink, RejectReason, Side, UltimateKind, BOARD_SLOTS,
};
use crate::{combat, phases, radiation, transform};

/// Result of one reducer step.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

/// Build a fresh game: starter deck dealt, the opponent's opening
/// creatures placed, and the first Draw already run.
#[must_use]
pub fn new_game(config: EngineConfig, seed: u64) -> GameState {
    let mut state = GameState::new(config, seed);
    catalog::deal_starter_deck(&mut state);
    catalog::opening_opponent_board(&mut state);

    let mut events = Vec::new();
    phases::enter_draw(&mut state, &mut events);
    for event in &events {
        state.log_line(event.describe());
    }
    state
}

/// Reduce one command against a state snapshot.
pub fn apply(state: &GameState, command: &Command) -> Outcome {
    let mut next = state.clone();
    let mut events = Vec::new();

    let result = dispatch(&mut next, command, &mut events);

    match result {
        Ok(()) => {
            for event in &events {
                next.log_line(event.describe());
            }
            Outcome { state: next, events }
        }
        Err(reason) => {
            // Dispatch may have partially mutated the clone; rejection
            // always hands back the input state untouched.
            let mut unchanged = state.clone();
            let event = GameEvent::Rejected(reason);
            unchanged.log_line(event.describe());
            Outcome {
                state: unchanged,
                events: vec![event],
            }
        }
    }
}

/// `apply`, forwarding every event to a sink as it is produced.
pub fn apply_with_sink(
    state: &GameState,
    command: &Command,
    sink: &mut dyn NotificationSink,
) -> Outcome {
    let outcome = apply(state, command);
    for event in &outcome.events {
        sink.notify(event);
    }
    outcome
}

fn dispatch(
    state: &mut GameState,
    command: &Command,
    events: &mut Vec<GameEvent>,
) -> Result<(), RejectReason> {
    // Reset is the one command a finished game still accepts.
    if state.game_over && !matches!(command, Command::Reset { .. }) {
        return Err(RejectReason::GameOver);
    }

    match *command {
        Command::InitDeck => init_deck(state),
        Command::PlayCard { card, slot } => play_card(state, card, slot, events),
        Command::AttachStones { source, target } => attach_stones(state, source, target, events),
        Command::Transform { card } => transform::try_transform(state, Side::Player, card, events),
        Command::SelectAttacker { card } => combat::select_attacker(state, card),
        Command::SelectTarget { card } => combat::select_target(state, card),
        Command::SelectBlocker { card } => combat::select_blocker(state, card),
        Command::AdvancePhase => phases::advance(state, events),
        Command::UseUltimate { card } => use_ultimate(state, card, events),
        Command::Reset { seed } => {
            *state = new_game(state.config, seed);
            Ok(())
        }
    }
}

fn init_deck(state: &mut GameState) -> Result<(), RejectReason> {
    if state.deck_dealt {
        return Err(RejectReason::DeckAlreadyDealt);
    }
    catalog::deal_starter_deck(state);
    Ok(())
}

fn play_card(
    state: &mut GameState,
    card_id: CardId,
    slot: usize,
    events: &mut Vec<GameEvent>,
) -> Result<(), RejectReason> {
    if slot >= BOARD_SLOTS {
        return Err(RejectReason::InvalidSlot(slot));
    }
    if state.board(Side::Player).get(slot).is_some() {
        return Err(RejectReason::SlotOccupied(slot));
    }
    let card = take_from_hand(state, card_id)?;
    let archetype = card.archetype;

    state.board_mut(Side::Player).place(slot, card);
    events.push(GameEvent::CardPlayed {
        side: Side::Player,
        card: card_id,
        slot,
    });

    // On-play archetype effects.
    match archetype {
        Some(Archetype::Reduce) => radiation::reduce(state, Side::Player, 1, events),
        Some(Archetype::Drain) => radiation::gain(state, Side::Opponent, 1, events),
        Some(Archetype::Burst) if state.radiation[Side::Player] >= 5 => {
            radiation::gain(state, Side::Opponent, 2, events);
        }
        _ => {}
    }

    // Formation bonus from the card's combo components.
    let bonus = formation_bonus(state.board(Side::Player), slot);
    if bonus > 0 {
        if let Some(c) = state.board_mut(Side::Player).get_mut(slot) {
            c.attack += bonus;
        }
        events.push(GameEvent::FormationBonus {
            card: card_id,
            bonus,
        });
    }

    Ok(())
}

/// Total on-play attack bonus from the combos of the card in `slot`.
fn formation_bonus(board: &Board, slot: usize) -> i32 {
    let Some(card) = board.get(slot) else { return 0 };

    let mut bonus = 0;
    for combo in &card.combos {
        match combo.kind {
            ComboKind::Chain => {
                let matches = board
                    .adjacent(slot)
                    .filter(|c| c.archetype.is_some_and(|a| combo.required.contains(&a)))
                    .count() as i32;
                bonus += combo.bonus * matches;
            }
            ComboKind::Synergy => {
                let all_present = !combo.required.is_empty()
                    && combo.required.iter().all(|need| {
                        board
                            .occupied()
                            .any(|(i, c)| i != slot && c.archetype == Some(*need))
                    });
                if all_present {
                    bonus += combo.bonus;
                }
            }
            ComboKind::Resonance => {
                if let Some(archetype) = card.archetype {
                    let allies = board
                        .occupied()
                        .filter(|(_, c)| c.archetype == Some(archetype))
                        .count();
                    if allies >= 3 {
                        bonus += combo.bonus;
                    }
                }
            }
        }
    }
    bonus
}

fn attach_stones(
    state: &mut GameState,
    source: CardId,
    target: CardId,
    events: &mut Vec<GameEvent>,
) -> Result<(), RejectReason> {
    if state.find_on_board(Side::Player, target).is_none() {
        return Err(RejectReason::NotOnBoard(target));
    }
    let _consumed = take_from_hand(state, source)?;

    let (_, card) = state
        .board_mut(Side::Player)
        .find_mut(target)
        .expect("target located above");
    card.stones += 1;
    let total = card.stones;

    events.push(GameEvent::StonesAttached { target, total });
    Ok(())
}

fn take_from_hand(state: &mut GameState, card_id: CardId) -> Result<Card, RejectReason> {
    let index = state
        .hand
        .iter()
        .position(|c| c.id == card_id)
        .ok_or(RejectReason::NotInHand(card_id))?;
    Ok(state.hand.remove(index))
}

fn use_ultimate(
    state: &mut GameState,
    card_id: CardId,
    events: &mut Vec<GameEvent>,
) -> Result<(), RejectReason> {
    let Some((slot, card)) = state.find_on_board(Side::Player, card_id) else {
        return Err(RejectReason::NotOnBoard(card_id));
    };
    let Some(ult) = card.ultimate.as_ref() else {
        return Err(RejectReason::NoUltimate(card_id));
    };
    if !ult.ready() {
        return Err(RejectReason::CooldownActive {
            card: card_id,
            remaining: ult.current_cooldown,
        });
    }
    let have = state.radiation[Side::Player];
    if have < ult.cost {
        return Err(RejectReason::NotEnoughRadiation {
            needed: ult.cost,
            have,
        });
    }

    let kind = ult.kind;
    let name = ult.name.clone();
    let cost = ult.cost;
    let cooldown = ult.cooldown;

    radiation::reduce(state, Side::Player, cost, events);
    {
        let card = state
            .board_mut(Side::Player)
            .get_mut(slot)
            .expect("slot checked occupied above");
        if let Some(ult) = card.ultimate.as_mut() {
            ult.current_cooldown = cooldown;
        }
    }
    events.push(GameEvent::UltimateUsed {
        card: card_id,
        name,
    });

    match kind {
        UltimateKind::Overdrive => {
            // Triple effective attack until the next Recovery.
            if let Some(c) = state.board_mut(Side::Player).get_mut(slot) {
                c.attack_buff = 2 * c.attack;
            }
        }
        UltimateKind::TotalAbsorption => {
            let stolen = state.radiation[Side::Opponent];
            radiation::transfer(state, Side::Opponent, stolen, events);
        }
        UltimateKind::ChainReaction => {
            for side in Side::both() {
                for slot in 0..BOARD_SLOTS {
                    let doomed = state
                        .board(side)
                        .get(slot)
                        .map_or(false, |c| !c.transformed);
                    if !doomed {
                        continue;
                    }
                    let card = state
                        .board_mut(side)
                        .remove(slot)
                        .expect("occupancy checked above");
                    events.push(GameEvent::CardDestroyed {
                        side,
                        card: card.id,
                        name: card.name,
                    });
                }
            }
            combat::prune_selection(state);
        }
    }

    Ok(())
}
