//! The command surface consumed by the UI layer.
//!
//! Every player intent is a `Command`. Commands are pure data; the engine
//! reducer (`engine::apply`) interprets them. An invalid command is never
//! an error: it produces the unchanged state plus a rejection event.

use serde::{Deserialize, Serialize};

use super::card::CardId;

/// A player intent submitted to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Populate and shuffle the starter deck. Rejected once dealt.
    InitDeck,
    /// Move a hand card onto an empty own board slot.
    PlayCard { card: CardId, slot: usize },
    /// Consume a hand card to add a stone to an own board card.
    AttachStones { source: CardId, target: CardId },
    /// Attempt the one-time transformation of an own board card.
    Transform { card: CardId },
    /// Choose (or toggle off) the attacking creature. Attack phase only.
    SelectAttacker { card: CardId },
    /// Choose (or toggle off) the targeted defender on the opponent board.
    SelectTarget { card: CardId },
    /// Choose (or toggle off) the blocking creature. Block phase only.
    SelectBlocker { card: CardId },
    /// Advance the phase state machine one step.
    AdvancePhase,
    /// Fire an own board card's ultimate ability.
    UseUltimate { card: CardId },
    /// Discard everything and start a fresh game with the given seed.
    Reset { seed: u64 },
}
