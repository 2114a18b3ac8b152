//! Card data model: base stat block plus optional capability components.
//!
//! A `Card` always has a stat block (attack, defense, stones). Everything
//! else is an optional component attached to the card:
//!
//! - `TransformSpec`: the one-time transform requirement
//! - `EvolutionStep` ladder: repeatable post-transform upgrades
//! - `UltimateAbility`: a costed, cooldown-gated special
//! - `ComboEffect`: adjacency-driven formation bonuses
//!
//! Each component is independently validatable; the engine checks only the
//! components a card actually carries.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Stable identifier for a card instance.
///
/// Allocated by the game state; never reused within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card's radiation-effect archetype.
///
/// The archetype determines a card's special behavior on play, in combat,
/// and under zone effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Gains power from the owner's radiation level.
    Boost,
    /// Lowers the owner's radiation when played.
    Reduce,
    /// Pushes radiation onto the opponent.
    Drain,
    /// Multiplies radiation-derived damage.
    Amplify,
    /// Dampens incoming damage.
    Shield,
    /// Stores radiation energy and releases it violently.
    Burst,
}

impl Archetype {
    /// All archetypes in catalog order.
    pub const ALL: [Archetype; 6] = [
        Archetype::Boost,
        Archetype::Reduce,
        Archetype::Drain,
        Archetype::Amplify,
        Archetype::Shield,
        Archetype::Burst,
    ];
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Archetype::Boost => "boost",
            Archetype::Reduce => "reduce",
            Archetype::Drain => "drain",
            Archetype::Amplify => "amplify",
            Archetype::Shield => "shield",
            Archetype::Burst => "burst",
        };
        write!(f, "{name}")
    }
}

/// Requirement gating a card's one-time transformation.
///
/// All populated fields must hold simultaneously.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformSpec {
    /// Minimum owner radiation.
    pub radiation: u8,
    /// Minimum attached stones.
    pub stones: u32,
    /// If non-empty, at least one directly adjacent ally must match one
    /// of these archetypes.
    #[serde(default)]
    pub adjacent: SmallVec<[Archetype; 2]>,
    /// Earliest turn the transform may happen.
    #[serde(default)]
    pub min_turn: Option<u32>,
    /// Upper bound on owner radiation (overheated creatures refuse).
    #[serde(default)]
    pub max_radiation: Option<u8>,
}

impl TransformSpec {
    /// The common catalog requirement: radiation 5, stones 3, no extras.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            radiation: 5,
            stones: 3,
            adjacent: SmallVec::new(),
            min_turn: None,
            max_radiation: None,
        }
    }
}

/// Requirement for a single evolution step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolveRequirement {
    /// Minimum owner radiation.
    pub radiation: u8,
    /// Minimum attached stones.
    pub stones: u32,
    /// Minimum full turns since the card transformed.
    #[serde(default)]
    pub transformed_turns: Option<u32>,
}

/// One step on a card's evolution ladder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStep {
    /// Name the card takes at this step.
    pub name: String,
    /// Ability text the card takes at this step.
    pub ability: String,
    /// Flat attack delta.
    pub attack_bonus: i32,
    /// Flat defense delta.
    pub defense_bonus: i32,
    /// Requirement to reach this step.
    pub requirement: EvolveRequirement,
}

/// What an ultimate ability does when fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UltimateKind {
    /// Triple the card's attack until the next Recovery phase.
    Overdrive,
    /// Steal all of the opponent's radiation.
    TotalAbsorption,
    /// Destroy every non-transformed creature on both boards.
    ChainReaction,
}

/// A costed, cooldown-gated special ability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UltimateAbility {
    pub name: String,
    /// Radiation paid from the owner's counter.
    pub cost: u8,
    pub kind: UltimateKind,
    /// Turns between uses.
    pub cooldown: u32,
    /// Turns remaining until usable again (0 = ready).
    #[serde(default)]
    pub current_cooldown: u32,
}

impl UltimateAbility {
    /// Is the ability off cooldown?
    #[must_use]
    pub fn ready(&self) -> bool {
        self.current_cooldown == 0
    }
}

/// Combo effect categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboKind {
    /// Triggered by a matching directly adjacent ally.
    Chain,
    /// Triggered by required archetypes anywhere on the board.
    Synergy,
    /// Triggered by three or more allies sharing this card's archetype.
    Resonance,
}

/// An adjacency/board-composition bonus descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboEffect {
    pub kind: ComboKind,
    /// Attack bonus granted when the combo fires.
    pub bonus: i32,
    /// Archetypes the combo requires.
    pub required: SmallVec<[Archetype; 2]>,
}

/// A battle unit (or stone consumable) in the game.
///
/// Mutated in place by transform, evolution, zone effects, and combat;
/// removed from its board slot when effective defense reaches zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    /// Base attack, >= 0 at creation.
    pub attack: i32,
    /// Current defense. Goes negative transiently during combat; the card
    /// is destroyed once it is <= 0.
    pub defense: i32,
    /// Temporary attack bonus (Overdrive), cleared each Recovery.
    #[serde(default)]
    pub attack_buff: i32,
    /// Attached transformation stones.
    pub stones: u32,
    pub transformed: bool,
    /// Full turns since this card transformed.
    #[serde(default)]
    pub transformed_turns: u32,
    /// Next evolution ladder index; `None` until transformed.
    #[serde(default)]
    pub evolution_level: Option<u32>,
    pub archetype: Option<Archetype>,
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub transform: Option<TransformSpec>,
    #[serde(default)]
    pub evolutions: Vec<EvolutionStep>,
    #[serde(default)]
    pub ultimate: Option<UltimateAbility>,
    #[serde(default)]
    pub combos: Vec<ComboEffect>,
    /// Radiation energy banked by burst creatures.
    #[serde(default)]
    pub energy_stored: i32,
}

impl Card {
    /// Create a bare card with a stat block and no components.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, attack: i32, defense: i32) -> Self {
        debug_assert!(attack >= 0 && defense >= 0);
        Self {
            id,
            name: name.into(),
            attack,
            defense,
            attack_buff: 0,
            stones: 0,
            transformed: false,
            transformed_turns: 0,
            evolution_level: None,
            archetype: None,
            ability: None,
            transform: None,
            evolutions: Vec::new(),
            ultimate: None,
            combos: Vec::new(),
            energy_stored: 0,
        }
    }

    /// Attach an archetype.
    #[must_use]
    pub fn with_archetype(mut self, archetype: Archetype) -> Self {
        self.archetype = Some(archetype);
        self
    }

    /// Attach ability text.
    #[must_use]
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    /// Attach a transform requirement.
    #[must_use]
    pub fn with_transform(mut self, spec: TransformSpec) -> Self {
        self.transform = Some(spec);
        self
    }

    /// Attach an evolution ladder.
    #[must_use]
    pub fn with_evolutions(mut self, steps: Vec<EvolutionStep>) -> Self {
        self.evolutions = steps;
        self
    }

    /// Attach an ultimate ability.
    #[must_use]
    pub fn with_ultimate(mut self, ultimate: UltimateAbility) -> Self {
        self.ultimate = Some(ultimate);
        self
    }

    /// Attach combo effects.
    #[must_use]
    pub fn with_combos(mut self, combos: Vec<ComboEffect>) -> Self {
        self.combos = combos;
        self
    }

    /// Attack used as the combat base: base stat plus any temporary buff.
    #[must_use]
    pub fn effective_attack(&self) -> i32 {
        self.attack + self.attack_buff
    }

    /// The evolution step this card would take next, if any remain.
    #[must_use]
    pub fn next_evolution(&self) -> Option<&EvolutionStep> {
        let level = self.evolution_level? as usize;
        self.evolutions.get(level)
    }
}
