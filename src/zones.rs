//! Timed board modifiers: radiation zones and field events.
//!
//! Zones are positional (one board slot), field events are global. Both
//! decay once per End tick and are pruned at zero duration. Effects are
//! applied exactly once per tick; applying twice in one tick is a defect.

use serde::{Deserialize, Serialize};

use crate::core::{Archetype, GameEvent, GameState, Side};
use crate::radiation;

/// What a radiation zone does to its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    /// +1 attack per tick to a boost-archetype occupant.
    Boost,
    /// Moves 1 radiation per tick from the zone's side to the opponent.
    Drain,
    /// Passive: dampens damage against the occupant during combat.
    Shield,
}

impl ZoneKind {
    /// All spawnable kinds.
    pub const ALL: [ZoneKind; 3] = [ZoneKind::Boost, ZoneKind::Drain, ZoneKind::Shield];
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneKind::Boost => write!(f, "boost"),
            ZoneKind::Drain => write!(f, "drain"),
            ZoneKind::Shield => write!(f, "shield"),
        }
    }
}

/// A timed positional modifier sitting on one board slot.
///
/// Applies to whatever card occupies the slot when the tick runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiationZone {
    pub side: Side,
    pub slot: usize,
    pub kind: ZoneKind,
    /// Remaining ticks.
    pub duration: u32,
}

/// Global timed modifier kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldEventKind {
    /// Clears a random occupied slot each tick.
    Meteor,
    /// All boost creatures gain +1 attack each tick.
    Meltdown,
    /// Both sides gain +1 radiation each tick.
    Storm,
    /// All burst creatures bank +1 energy each tick.
    PowerSurge,
}

impl FieldEventKind {
    /// All spawnable kinds.
    pub const ALL: [FieldEventKind; 4] = [
        FieldEventKind::Meteor,
        FieldEventKind::Meltdown,
        FieldEventKind::Storm,
        FieldEventKind::PowerSurge,
    ];

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FieldEventKind::Meteor => "Meteor Shower",
            FieldEventKind::Meltdown => "Radiation Meltdown",
            FieldEventKind::Storm => "Radiation Storm",
            FieldEventKind::PowerSurge => "Power Surge",
        }
    }
}

/// A global timed modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEvent {
    pub kind: FieldEventKind,
    /// Remaining ticks.
    pub duration: u32,
}

/// Apply every active zone's effect once, then decay and prune.
pub fn tick_zones(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut zones: Vec<RadiationZone> = state.zones.iter().copied().collect();

    for i in 0..zones.len() {
        let zone = zones[i];
        let occupant = state.board(zone.side).get(zone.slot).cloned();
        let Some(card) = occupant else { continue };

        match zone.kind {
            ZoneKind::Boost => {
                if card.archetype == Some(Archetype::Boost) {
                    if let Some(c) = state.board_mut(zone.side).get_mut(zone.slot) {
                        c.attack += 1;
                    }
                }
            }
            ZoneKind::Drain => {
                radiation::transfer(state, zone.side, 1, events);
            }
            ZoneKind::Shield => {} // consulted during combat only
        }

        // Burst occupants soak energy out of any zone.
        if card.archetype == Some(Archetype::Burst) {
            if let Some(c) = state.board_mut(zone.side).get_mut(zone.slot) {
                c.energy_stored += 1;
            }
        }

        // Amplify occupants feed adjacent zones, extending their life.
        if card.archetype == Some(Archetype::Amplify) {
            for other in zones.iter_mut() {
                if other.side == zone.side && other.slot.abs_diff(zone.slot) == 1 {
                    other.duration += 1;
                }
            }
        }
    }

    for zone in &mut zones {
        zone.duration = zone.duration.saturating_sub(1);
        if zone.duration == 0 {
            events.push(GameEvent::ZoneExpired {
                side: zone.side,
                slot: zone.slot,
            });
        }
    }
    state.zones = zones.into_iter().filter(|z| z.duration > 0).collect();
}

/// Roll for a new radiation zone on a random occupied, zone-free slot.
pub fn maybe_spawn_zone(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.rng.gen_bool(state.config.zone_spawn_chance) {
        return;
    }

    let mut candidates: Vec<(Side, usize)> = Vec::new();
    for side in Side::both() {
        for (slot, _) in state.board(side).occupied() {
            if state.zone_at(side, slot).is_none() {
                candidates.push((side, slot));
            }
        }
    }
    let Some(&(side, slot)) = state.rng.choose(&candidates) else {
        return;
    };

    let Some(&kind) = state.rng.choose(&ZoneKind::ALL) else {
        return;
    };

    state.zones.push_back(RadiationZone {
        side,
        slot,
        kind,
        duration: state.config.zone_duration,
    });
    events.push(GameEvent::ZoneCreated { side, slot, kind });
}

/// Apply every active field event's effect once, then decay and prune.
pub fn tick_field_events(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let active: Vec<FieldEvent> = state.field_events.iter().copied().collect();

    for event in &active {
        apply_field_event(state, event.kind, events);
    }

    let mut remaining: Vec<FieldEvent> = Vec::with_capacity(active.len());
    for mut event in active {
        event.duration = event.duration.saturating_sub(1);
        if event.duration == 0 {
            events.push(GameEvent::FieldEventExpired {
                name: event.kind.name().to_string(),
            });
        } else {
            remaining.push(event);
        }
    }
    state.field_events = remaining.into_iter().collect();
}

fn apply_field_event(state: &mut GameState, kind: FieldEventKind, events: &mut Vec<GameEvent>) {
    match kind {
        FieldEventKind::Meteor => {
            let mut occupied: Vec<(Side, usize)> = Vec::new();
            for side in Side::both() {
                occupied.extend(state.board(side).occupied().map(|(slot, _)| (side, slot)));
            }
            if let Some(&(side, slot)) = state.rng.choose(&occupied) {
                if let Some(card) = state.board_mut(side).remove(slot) {
                    events.push(GameEvent::CardDestroyed {
                        side,
                        card: card.id,
                        name: card.name,
                    });
                }
            }
        }
        FieldEventKind::Meltdown => {
            for side in Side::both() {
                for (_, card) in state.board_mut(side).occupied_mut() {
                    if card.archetype == Some(Archetype::Boost) {
                        card.attack += 1;
                    }
                }
            }
        }
        FieldEventKind::Storm => {
            for side in Side::both() {
                radiation::gain(state, side, 1, events);
            }
        }
        FieldEventKind::PowerSurge => {
            for side in Side::both() {
                for (_, card) in state.board_mut(side).occupied_mut() {
                    if card.archetype == Some(Archetype::Burst) {
                        card.energy_stored += 1;
                    }
                }
            }
        }
    }
}

/// Roll for a new field event of a kind not already active.
pub fn maybe_spawn_event(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.rng.gen_bool(state.config.event_spawn_chance) {
        return;
    }

    let inactive: Vec<FieldEventKind> = FieldEventKind::ALL
        .into_iter()
        .filter(|k| !state.field_events.iter().any(|e| e.kind == *k))
        .collect();
    let Some(&kind) = state.rng.choose(&inactive) else {
        return;
    };

    state.field_events.push_back(FieldEvent {
        kind,
        duration: state.config.event_duration,
    });
    events.push(GameEvent::FieldEventStarted {
        name: kind.name().to_string(),
    });
}
