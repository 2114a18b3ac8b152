//! Engine events and the notification sink.
//!
//! Every state transition emits an ordered list of `GameEvent`s describing
//! what happened. The UI layer consumes them through a `NotificationSink`
//! (or directly from the reducer's output); the engine never cares how
//! they are displayed. `GameEvent::describe` renders the human-readable
//! line that also goes into the in-state game log.

use serde::{Deserialize, Serialize};

use super::card::CardId;
use super::side::Side;
use super::state::Phase;
use crate::zones::ZoneKind;

/// Why a transform attempt was refused.
///
/// Names the specific requirement field that failed so rejection messages
/// can cite it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformBlocker {
    /// Owner radiation below the required minimum.
    Radiation { needed: u8 },
    /// Owner radiation above the allowed maximum.
    RadiationTooHigh { max: u8 },
    /// Not enough attached stones.
    Stones { needed: u32 },
    /// Too early in the game.
    Turn { needed: u32 },
    /// No directly adjacent ally with a required archetype.
    Adjacency,
}

impl std::fmt::Display for TransformBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformBlocker::Radiation { needed } => {
                write!(f, "requires radiation {needed}")
            }
            TransformBlocker::RadiationTooHigh { max } => {
                write!(f, "radiation exceeds maximum {max}")
            }
            TransformBlocker::Stones { needed } => write!(f, "requires {needed} stones"),
            TransformBlocker::Turn { needed } => write!(f, "requires turn {needed}"),
            TransformBlocker::Adjacency => {
                write!(f, "requires a matching adjacent creature")
            }
        }
    }
}

/// Why a command was rejected.
///
/// Rejections leave the state untouched; they are ordinary values, never
/// panics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The game is already over.
    GameOver,
    /// The command is not legal in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// The referenced card is not on the required board.
    NotOnBoard(CardId),
    /// The referenced card is not in hand.
    NotInHand(CardId),
    /// The slot index is outside the board.
    InvalidSlot(usize),
    /// The slot already holds a creature.
    SlotOccupied(usize),
    /// An attacker must be selected first.
    NoAttackerSelected,
    /// A target must be selected first.
    NoTargetSelected,
    /// A transform requirement field is unmet.
    TransformBlocked { card: CardId, blocker: TransformBlocker },
    /// The card already transformed.
    AlreadyTransformed(CardId),
    /// The card has no ultimate ability.
    NoUltimate(CardId),
    /// The ultimate is still cooling down.
    CooldownActive { card: CardId, remaining: u32 },
    /// Not enough radiation to pay a cost.
    NotEnoughRadiation { needed: u8, have: u8 },
    /// The deck was already initialized.
    DeckAlreadyDealt,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::GameOver => write!(f, "the game is over"),
            RejectReason::WrongPhase { expected, actual } => {
                write!(f, "only legal during {expected} (current phase: {actual})")
            }
            RejectReason::NotOnBoard(id) => write!(f, "{id} is not on the board"),
            RejectReason::NotInHand(id) => write!(f, "{id} is not in hand"),
            RejectReason::InvalidSlot(slot) => write!(f, "slot {slot} does not exist"),
            RejectReason::SlotOccupied(slot) => write!(f, "slot {slot} is occupied"),
            RejectReason::NoAttackerSelected => write!(f, "no attacker selected"),
            RejectReason::NoTargetSelected => write!(f, "no target selected"),
            RejectReason::TransformBlocked { card, blocker } => {
                write!(f, "{card} cannot transform: {blocker}")
            }
            RejectReason::AlreadyTransformed(id) => write!(f, "{id} already transformed"),
            RejectReason::NoUltimate(id) => write!(f, "{id} has no ultimate ability"),
            RejectReason::CooldownActive { card, remaining } => {
                write!(f, "{card} ultimate ready in {remaining} turns")
            }
            RejectReason::NotEnoughRadiation { needed, have } => {
                write!(f, "needs {needed} radiation, have {have}")
            }
            RejectReason::DeckAlreadyDealt => write!(f, "deck already dealt"),
        }
    }
}

/// Something that happened during a state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The phase state machine moved.
    PhaseChanged { phase: Phase },
    /// A card moved from deck to hand.
    CardDrawn { card: CardId, name: String },
    /// The deck was empty at Draw.
    DrawFailed,
    /// A card was placed onto a board slot.
    CardPlayed { side: Side, card: CardId, slot: usize },
    /// A stone was attached to a board card.
    StonesAttached { target: CardId, total: u32 },
    /// A radiation counter moved.
    RadiationChanged { side: Side, from: u8, to: u8 },
    /// A counter crossed the 3, 5, or 8 threshold going up.
    ThresholdCrossed { side: Side, threshold: u8 },
    /// A card completed its one-time transformation.
    Transformed { card: CardId, name: String },
    /// A card advanced one evolution step.
    Evolved { card: CardId, name: String, level: u32 },
    /// A transform/evolution rippled onto an adjacent ally.
    ChainEffect { source: CardId, description: String },
    /// A radiation zone appeared.
    ZoneCreated { side: Side, slot: usize, kind: ZoneKind },
    /// A radiation zone ran out.
    ZoneExpired { side: Side, slot: usize },
    /// A field event began.
    FieldEventStarted { name: String },
    /// A field event ran out.
    FieldEventExpired { name: String },
    /// Combat damage was applied.
    DamageDealt { attacker: CardId, defender: CardId, amount: i32, critical: bool },
    /// A creature left the board.
    CardDestroyed { side: Side, card: CardId, name: String },
    /// An ultimate ability fired.
    UltimateUsed { card: CardId, name: String },
    /// An ally formation bonus fired on play.
    FormationBonus { card: CardId, bonus: i32 },
    /// The game ended.
    GameOver { winner: Side },
    /// A command was refused; the state is unchanged.
    Rejected(RejectReason),
}

impl GameEvent {
    /// Render the human-readable description shown to players.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            GameEvent::PhaseChanged { phase } => format!("Phase: {phase}"),
            GameEvent::CardDrawn { name, .. } => format!("Drew {name}"),
            GameEvent::DrawFailed => "The deck is empty".to_string(),
            GameEvent::CardPlayed { side, slot, .. } => {
                format!("{side} deployed a creature to slot {slot}")
            }
            GameEvent::StonesAttached { target, total } => {
                format!("Attached a stone to {target} (now {total})")
            }
            GameEvent::RadiationChanged { side, from, to } => {
                format!("{side} radiation {from} -> {to}")
            }
            GameEvent::ThresholdCrossed { side, threshold } => {
                format!("{side} radiation crossed level {threshold}")
            }
            GameEvent::Transformed { name, .. } => format!("{name} has transformed!"),
            GameEvent::Evolved { name, level, .. } => {
                format!("Evolved into {name} (level {level})")
            }
            GameEvent::ChainEffect { description, .. } => description.clone(),
            GameEvent::ZoneCreated { side, slot, kind } => {
                format!("A {kind} radiation zone appeared on {side} slot {slot}")
            }
            GameEvent::ZoneExpired { side, slot } => {
                format!("The radiation zone on {side} slot {slot} dissipated")
            }
            GameEvent::FieldEventStarted { name } => format!("{name} sweeps the field!"),
            GameEvent::FieldEventExpired { name } => format!("{name} subsides"),
            GameEvent::DamageDealt { amount, critical, .. } => {
                if *critical {
                    format!("CRITICAL HIT! {amount} damage")
                } else {
                    format!("{amount} damage dealt")
                }
            }
            GameEvent::CardDestroyed { name, .. } => format!("{name} was destroyed!"),
            GameEvent::UltimateUsed { name, .. } => format!("Ultimate: {name}!"),
            GameEvent::FormationBonus { bonus, .. } => {
                format!("Formation bonus: +{bonus} attack")
            }
            GameEvent::GameOver { winner } => format!("Game over - {winner} wins!"),
            GameEvent::Rejected(reason) => format!("Rejected: {reason}"),
        }
    }

    /// Is this a rejection event?
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, GameEvent::Rejected(_))
    }
}

/// One-way callback surface for event delivery.
///
/// The engine pushes every event here; implementors decide presentation.
pub trait NotificationSink {
    fn notify(&mut self, event: &GameEvent);
}

/// Sink that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Sink that collects events, mostly for tests.
#[derive(Clone, Debug, Default)]
pub struct CollectSink {
    pub events: Vec<GameEvent>,
}

impl NotificationSink for CollectSink {
    fn notify(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_cites_adjacency() {
        let reason = RejectReason::TransformBlocked {
            card: CardId::new(3),
            blocker: TransformBlocker::Adjacency,
        };

        let text = reason.to_string();
        assert!(text.contains("adjacent"), "got: {text}");
    }

    #[test]
    fn test_describe_game_over() {
        let event = GameEvent::GameOver { winner: Side::Opponent };
        assert_eq!(event.describe(), "Game over - Opponent wins!");
    }

    #[test]
    fn test_is_rejection() {
        assert!(GameEvent::Rejected(RejectReason::GameOver).is_rejection());
        assert!(!GameEvent::DrawFailed.is_rejection());
    }

    #[test]
    fn test_collect_sink() {
        let mut sink = CollectSink::default();
        sink.notify(&GameEvent::DrawFailed);
        sink.notify(&GameEvent::GameOver { winner: Side::Player });

        assert_eq!(sink.events.len(), 2);
    }

    #[test]
    fn test_event_serde() {
        let event = GameEvent::DamageDealt {
            attacker: CardId::new(1),
            defender: CardId::new(2),
            amount: 5,
            critical: true,
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
