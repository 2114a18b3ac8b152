//! Core engine types: sides, cards, state, commands, events, RNG, config.
//!
//! Everything here is data plus small invariant-preserving helpers. The
//! rule subsystems (`radiation`, `combat`, `phases`, ...) operate on these
//! types; the reducer in `engine` ties them together.

pub mod card;
pub mod command;
pub mod config;
pub mod event;
pub mod rng;
pub mod side;
pub mod state;

pub use card::{
    Archetype, Card, CardId, ComboEffect, ComboKind, EvolutionStep, EvolveRequirement,
    TransformSpec, UltimateAbility, UltimateKind,
};
pub use command::Command;
pub use config::{EngineConfig, BOARD_SLOTS};
pub use event::{
    CollectSink, GameEvent, NotificationSink, NullSink, RejectReason, TransformBlocker,
};
pub use rng::GameRng;
pub use side::{Side, SideMap};
pub use state::{Board, CombatStep, GameState, LogEntry, Phase, Selection};
