//! Game state: the aggregate root every command transforms.
//!
//! The engine follows a copy-on-write discipline: `engine::apply` clones
//! the previous state and mutates the clone, so earlier snapshots stay
//! valid for logging and undo. List-shaped parts (deck, hand, zones,
//! events, log) use `im::Vector` so a snapshot clone is cheap.
//!
//! Nothing in the state is hidden: turn counter, RNG, and config all live
//! here, making a game fully reproducible from a snapshot plus a command
//! log.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};
use super::config::{EngineConfig, BOARD_SLOTS};
use super::rng::GameRng;
use super::side::{Side, SideMap};
use crate::zones::{FieldEvent, RadiationZone};

/// The six phases of a turn, in fixed cyclic order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Draw,
    Recovery,
    Attack,
    Block,
    Damage,
    End,
}

impl Phase {
    /// The phase that follows this one in the cycle.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::Draw => Phase::Recovery,
            Phase::Recovery => Phase::Attack,
            Phase::Attack => Phase::Block,
            Phase::Block => Phase::Damage,
            Phase::Damage => Phase::End,
            Phase::End => Phase::Draw,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Draw => "Draw",
            Phase::Recovery => "Recovery",
            Phase::Attack => "Attack",
            Phase::Block => "Block",
            Phase::Damage => "Damage",
            Phase::End => "End",
        };
        write!(f, "{name}")
    }
}

/// Where the combat selection sub-machine currently stands.
///
/// The select operations gate on this, not on which roles happen to be
/// filled. `Resolved` marks a combat already carried out this turn;
/// the End phase rewinds to `SelectAttacker`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatStep {
    SelectAttacker,
    SelectTarget,
    SelectBlocker,
    Resolved,
}

/// The combat selection state nested inside Attack/Block/Damage.
///
/// Invariant: each role holds at most one card, and a role id always
/// references an occupied board slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub attacker: Option<CardId>,
    pub target: Option<CardId>,
    pub blocker: Option<CardId>,
    pub step: CombatStep,
}

impl Default for CombatStep {
    fn default() -> Self {
        CombatStep::SelectAttacker
    }
}

impl Selection {
    /// Drop all roles and reset the sub-machine.
    pub fn clear(&mut self) {
        *self = Selection::default();
    }
}

/// One side's board: exactly five ordered slots.
///
/// Adjacency is slot index distance 1.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    slots: [Option<Card>; BOARD_SLOTS],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The card in a slot, if any.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Card> {
        self.slots.get(slot)?.as_ref()
    }

    /// Mutable access to the card in a slot.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Card> {
        self.slots.get_mut(slot)?.as_mut()
    }

    /// Place a card into a slot, returning any displaced card.
    ///
    /// Callers are expected to have checked emptiness; combat never
    /// displaces this way.
    pub fn place(&mut self, slot: usize, card: Card) -> Option<Card> {
        debug_assert!(slot < BOARD_SLOTS);
        self.slots[slot].replace(card)
    }

    /// Remove and return the card in a slot.
    pub fn remove(&mut self, slot: usize) -> Option<Card> {
        self.slots.get_mut(slot)?.take()
    }

    /// Find a card by id.
    #[must_use]
    pub fn find(&self, id: CardId) -> Option<(usize, &Card)> {
        self.slots
            .iter()
            .enumerate()
            .find_map(|(i, s)| s.as_ref().filter(|c| c.id == id).map(|c| (i, c)))
    }

    /// Find a card by id, mutably.
    pub fn find_mut(&mut self, id: CardId) -> Option<(usize, &mut Card)> {
        self.slots
            .iter_mut()
            .enumerate()
            .find_map(|(i, s)| s.as_mut().filter(|c| c.id == id).map(|c| (i, c)))
    }

    /// Is every slot empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterate occupied slots as (index, card).
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Card)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|c| (i, c)))
    }

    /// Iterate occupied slots mutably.
    pub fn occupied_mut(&mut self) -> impl Iterator<Item = (usize, &mut Card)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|c| (i, c)))
    }

    /// Indices of empty slots.
    #[must_use]
    pub fn empty_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_none().then_some(i))
            .collect()
    }

    /// Slot indices directly adjacent to `slot`.
    #[must_use]
    pub fn adjacent_slots(slot: usize) -> impl Iterator<Item = usize> {
        let lo = slot.checked_sub(1);
        let hi = (slot + 1 < BOARD_SLOTS).then_some(slot + 1);
        lo.into_iter().chain(hi)
    }

    /// Cards directly adjacent to `slot`.
    pub fn adjacent(&self, slot: usize) -> impl Iterator<Item = &Card> {
        Self::adjacent_slots(slot).filter_map(|i| self.get(i))
    }
}

/// One line of the append-only game log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub phase: Phase,
    pub text: String,
}

/// The aggregate game state.
///
/// Cloning is cheap (persistent collections plus fixed boards), so each
/// reducer step can snapshot freely.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Engine tuning; embedded so the snapshot is self-describing.
    pub config: EngineConfig,
    /// Turn number, starting at 1.
    pub turn: u32,
    pub phase: Phase,
    /// Both boards, player first.
    pub boards: SideMap<Board>,
    /// The player's hand. The opponent is AI-driven and has no hand.
    pub hand: Vector<Card>,
    /// The player's deck, drawn from the front.
    pub deck: Vector<Card>,
    /// Set once the starter deck has been dealt.
    pub deck_dealt: bool,
    pub selection: Selection,
    /// Per-side radiation, clamped to [0, 10].
    pub radiation: SideMap<u8>,
    pub zones: Vector<RadiationZone>,
    pub field_events: Vector<FieldEvent>,
    pub game_over: bool,
    pub winner: Option<Side>,
    /// Append-only game log.
    pub log: Vector<LogEntry>,
    pub rng: GameRng,
    next_card_id: u32,
}

impl GameState {
    /// Create an empty state: blank boards, no deck, turn 1, Draw phase.
    ///
    /// Most callers want `engine::new_game`, which also deals the starter
    /// deck and the opponent's opening board.
    #[must_use]
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        Self {
            config,
            turn: 1,
            phase: Phase::Draw,
            boards: SideMap::default(),
            hand: Vector::new(),
            deck: Vector::new(),
            deck_dealt: false,
            selection: Selection::default(),
            radiation: SideMap::with_value(0),
            zones: Vector::new(),
            field_events: Vector::new(),
            game_over: false,
            winner: None,
            log: Vector::new(),
            rng: GameRng::new(seed),
            next_card_id: 0,
        }
    }

    /// Allocate a fresh card id.
    pub fn alloc_card_id(&mut self) -> CardId {
        let id = CardId::new(self.next_card_id);
        self.next_card_id += 1;
        id
    }

    /// One side's board.
    #[must_use]
    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side]
    }

    /// One side's board, mutably.
    pub fn board_mut(&mut self, side: Side) -> &mut Board {
        &mut self.boards[side]
    }

    /// Locate a card on a specific side's board.
    #[must_use]
    pub fn find_on_board(&self, side: Side, id: CardId) -> Option<(usize, &Card)> {
        self.boards[side].find(id)
    }

    /// Append a line to the game log at the current turn/phase.
    pub fn log_line(&mut self, text: String) {
        self.log.push_back(LogEntry {
            turn: self.turn,
            phase: self.phase,
            text,
        });
    }

    /// Does any active zone of the given kind sit on this slot?
    #[must_use]
    pub fn zone_at(&self, side: Side, slot: usize) -> Option<&RadiationZone> {
        self.zones.iter().find(|z| z.side == side && z.slot == slot)
    }
}
