//! Engine tuning knobs.
//!
//! All probabilistic rates and durations live here rather than as magic
//! numbers inside subsystems. The config is embedded in the game state so
//! a snapshot fully describes the game.

use serde::{Deserialize, Serialize};

/// Number of board slots per side.
pub const BOARD_SLOTS: usize = 5;

/// Tunable engine parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Probability of a critical hit per combat resolution.
    pub crit_chance: f64,
    /// Probability a radiation zone spawns per Draw/End tick.
    pub zone_spawn_chance: f64,
    /// Turns a new radiation zone lasts.
    pub zone_duration: u32,
    /// Probability a field event spawns per End tick.
    pub event_spawn_chance: f64,
    /// Turns a new field event lasts.
    pub event_duration: u32,
    /// Probability the opponent AI deploys a creature per End tick.
    pub ai_deploy_chance: f64,
    /// Copies of each archetype in the starter deck.
    pub deck_copies: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            crit_chance: 0.2,
            zone_spawn_chance: 0.25,
            zone_duration: 3,
            event_spawn_chance: 0.15,
            event_duration: 3,
            ai_deploy_chance: 0.35,
            deck_copies: 3,
        }
    }
}

impl EngineConfig {
    /// A config with all randomness disabled.
    ///
    /// Combat still runs, but no crits, spawns, or AI deployments occur.
    /// Useful for deterministic scenario tests.
    #[must_use]
    pub fn without_randomness() -> Self {
        Self {
            crit_chance: 0.0,
            zone_spawn_chance: 0.0,
            event_spawn_chance: 0.0,
            ai_deploy_chance: 0.0,
            ..Self::default()
        }
    }
}
