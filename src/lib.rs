//! # rad-duel
//!
//! A deterministic engine for a two-player radiation card duel.
//!
//! ## Design Principles
//!
//! 1. **Pure Reducer**: The only write surface is `engine::apply(state,
//!    command) -> Outcome`. The input state is never mutated; a rejected
//!    command returns an equal state plus a rejection event.
//!
//! 2. **No Hidden State**: Turn counter, RNG, and config all live inside
//!    `GameState`, so a game is fully reproducible from a snapshot plus
//!    a command log.
//!
//! 3. **Component Cards**: A card is a stat block plus optional
//!    components (transform spec, evolution ladder, ultimate, combos);
//!    the engine checks only the components a card carries.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: list-shaped state uses `im-rs` for
//!   O(1) snapshot cloning.
//!
//! - **Seeded RNG**: all randomness (crits, spawns, AI) flows through
//!   the state's own ChaCha8 stream; identical seeds give identical
//!   games.
//!
//! ## Modules
//!
//! - `core`: sides, cards, state, commands, events, RNG, configuration
//! - `catalog`: the static card catalog and starter deck
//! - `radiation`: per-side radiation counters, thresholds, win check
//! - `zones`: timed radiation zones and global field events
//! - `transform`: one-time transformation and the evolution ladder
//! - `combat`: selection workflow and the damage pipeline
//! - `phases`: the six-phase turn state machine
//! - `ai`: the opponent's deployment and blocker choices
//! - `engine`: the command reducer tying it all together

pub mod core;
pub mod catalog;
pub mod radiation;
pub mod zones;
pub mod transform;
pub mod combat;
pub mod phases;
pub mod ai;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Archetype, Card, CardId, ComboEffect, ComboKind, EvolutionStep, EvolveRequirement,
    TransformSpec, UltimateAbility, UltimateKind,
    Command,
    EngineConfig, BOARD_SLOTS,
    CollectSink, GameEvent, NotificationSink, NullSink, RejectReason, TransformBlocker,
    GameRng,
    Side, SideMap,
    Board, CombatStep, GameState, LogEntry, Phase, Selection,
};

pub use crate::engine::{apply, apply_with_sink, new_game, Outcome};

pub use crate::zones::{FieldEvent, FieldEventKind, RadiationZone, ZoneKind};
