//! Static card catalog.
//!
//! Card templates are keyed by archetype: base stats, ability text, the
//! evolution ladder, and the ultimate ability are all fixed per archetype.
//! The catalog only builds cards; ids come from the game state.

use smallvec::smallvec;

use crate::core::{
    Archetype, Card, CardId, ComboEffect, ComboKind, EvolutionStep, EvolveRequirement, GameState,
    TransformSpec, UltimateAbility, UltimateKind,
};

/// Display name for an archetype's creature.
#[must_use]
pub fn base_name(archetype: Archetype) -> &'static str {
    match archetype {
        Archetype::Boost => "Baby Godzilla",
        Archetype::Reduce => "Radiation Absorber",
        Archetype::Drain => "Radiation Drainer",
        Archetype::Amplify => "Radiation Amplifier",
        Archetype::Shield => "Radiation Shield",
        Archetype::Burst => "Radiation Burster",
    }
}

/// Base attack for an archetype's creature.
#[must_use]
pub fn base_attack(archetype: Archetype) -> i32 {
    match archetype {
        Archetype::Boost => 2,
        Archetype::Reduce => 1,
        Archetype::Drain => 3,
        Archetype::Amplify => 3,
        Archetype::Shield => 1,
        Archetype::Burst => 4,
    }
}

/// Base defense for an archetype's creature.
#[must_use]
pub fn base_defense(archetype: Archetype) -> i32 {
    match archetype {
        Archetype::Boost => 3,
        Archetype::Reduce => 4,
        Archetype::Drain => 2,
        Archetype::Amplify => 2,
        Archetype::Shield => 5,
        Archetype::Burst => 1,
    }
}

/// Special ability text, where the archetype has one.
#[must_use]
pub fn ability(archetype: Archetype) -> Option<&'static str> {
    match archetype {
        Archetype::Reduce => Some("Reduce radiation by 1 when played"),
        Archetype::Amplify => Some("Double all radiation effects"),
        Archetype::Shield => Some("Reduces radiation damage by 1"),
        Archetype::Burst => Some("Release stored radiation at level 5"),
        Archetype::Boost | Archetype::Drain => None,
    }
}

/// Evolution ladder. Only boost and burst creatures evolve.
#[must_use]
pub fn evolutions(archetype: Archetype) -> Vec<EvolutionStep> {
    match archetype {
        Archetype::Boost => vec![
            EvolutionStep {
                name: "Radiation Absorber".into(),
                ability: "Gains +1 attack for each radiation point".into(),
                attack_bonus: 2,
                defense_bonus: 1,
                requirement: EvolveRequirement {
                    radiation: 6,
                    stones: 4,
                    transformed_turns: None,
                },
            },
            EvolutionStep {
                name: "Radiation Master".into(),
                ability: "Can store double radiation energy".into(),
                attack_bonus: 3,
                defense_bonus: 2,
                requirement: EvolveRequirement {
                    radiation: 8,
                    stones: 5,
                    transformed_turns: Some(2),
                },
            },
        ],
        Archetype::Burst => vec![
            EvolutionStep {
                name: "Chain Reactor".into(),
                ability: "Burst affects adjacent zones".into(),
                attack_bonus: 3,
                defense_bonus: 0,
                requirement: EvolveRequirement {
                    radiation: 7,
                    stones: 4,
                    transformed_turns: None,
                },
            },
            EvolutionStep {
                name: "Meltdown Entity".into(),
                ability: "Survives after burst with 1 HP".into(),
                attack_bonus: 4,
                defense_bonus: 1,
                requirement: EvolveRequirement {
                    radiation: 9,
                    stones: 6,
                    transformed_turns: Some(3),
                },
            },
        ],
        _ => Vec::new(),
    }
}

/// Ultimate ability, where the archetype has one.
#[must_use]
pub fn ultimate(archetype: Archetype) -> Option<UltimateAbility> {
    match archetype {
        Archetype::Boost => Some(UltimateAbility {
            name: "Radiation Overdrive".into(),
            cost: 8,
            kind: UltimateKind::Overdrive,
            cooldown: 3,
            current_cooldown: 0,
        }),
        Archetype::Drain => Some(UltimateAbility {
            name: "Total Absorption".into(),
            cost: 6,
            kind: UltimateKind::TotalAbsorption,
            cooldown: 4,
            current_cooldown: 0,
        }),
        Archetype::Burst => Some(UltimateAbility {
            name: "Chain Reaction".into(),
            cost: 10,
            kind: UltimateKind::ChainReaction,
            cooldown: 5,
            current_cooldown: 0,
        }),
        _ => None,
    }
}

/// Build a full catalog creature for an archetype.
#[must_use]
pub fn make(id: CardId, archetype: Archetype) -> Card {
    let mut card = Card::new(
        id,
        base_name(archetype),
        base_attack(archetype),
        base_defense(archetype),
    )
    .with_archetype(archetype)
    .with_transform(TransformSpec::standard())
    .with_evolutions(evolutions(archetype))
    .with_combos(vec![ComboEffect {
        kind: ComboKind::Chain,
        bonus: 1,
        required: smallvec![archetype],
    }]);

    if let Some(text) = ability(archetype) {
        card = card.with_ability(text);
    }
    if let Some(ult) = ultimate(archetype) {
        card = card.with_ultimate(ult);
    }
    card
}

/// Populate and shuffle the player's starter deck.
///
/// `config.deck_copies` copies of each archetype, shuffled with the
/// state's RNG. Marks the deck as dealt.
pub fn deal_starter_deck(state: &mut GameState) {
    let mut cards = Vec::new();
    for archetype in Archetype::ALL {
        for _ in 0..state.config.deck_copies {
            let id = state.alloc_card_id();
            cards.push(make(id, archetype));
        }
    }
    state.rng.shuffle(&mut cards);
    state.deck = cards.into_iter().collect();
    state.deck_dealt = true;
}

/// Place the opponent's opening creatures: a drainer and a boost creature
/// with a gap between them.
pub fn opening_opponent_board(state: &mut GameState) {
    use crate::core::Side;

    let drainer_id = state.alloc_card_id();
    let boost_id = state.alloc_card_id();

    let board = state.board_mut(Side::Opponent);
    board.place(0, make(drainer_id, Archetype::Drain));
    board.place(2, make(boost_id, Archetype::Boost));
}
