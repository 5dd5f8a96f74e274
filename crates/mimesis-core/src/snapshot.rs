//! Read-only snapshots for external consumers.
//!
//! Snapshots are owned copies; nothing in them points back into the
//! simulation, so a host may serialize or hold them while ticks continue.

use mimesis_agents::{Agent, Corpse};
use mimesis_types::{MapView, WorldState};

use crate::state::SimulationState;

/// Assemble the world snapshot. Dead agents are left out.
pub fn world_state(state: &SimulationState) -> WorldState {
    WorldState {
        tick: state.clock.tick(),
        time: state.clock.hour(),
        width: state.grid.width(),
        height: state.grid.height(),
        agents: state
            .agents
            .iter()
            .filter(|a| a.alive)
            .map(Agent::to_view)
            .collect(),
        corpses: state.corpses.iter().map(Corpse::to_view).collect(),
        events: state.events.snapshot(),
    }
}

/// The terrain as a row-major grid.
pub fn map_view(state: &SimulationState) -> MapView {
    state.grid.to_view()
}

#[cfg(test)]
mod tests {
    use mimesis_agents::DamageSource;
    use mimesis_types::{Job, Terrain};

    use super::*;
    use crate::state::testing::{at_mut, grass_state, place};

    #[test]
    fn snapshot_hides_the_dead() {
        let mut state = grass_state(1);
        place(&mut state, Job::Guard, 1, 1);
        let victim = place(&mut state, Job::Gatherer, 2, 2);
        let notice = at_mut(&mut state, victim).take_damage(500.0, DamageSource::Sunlight, 0);
        if let Some(notice) = notice {
            state.record_death(notice);
        }

        let snap = world_state(&state);
        assert_eq!(snap.agents.len(), 1);
        assert_eq!(snap.corpses.len(), 1);
        assert_eq!(snap.events.len(), 1);
        assert_eq!(snap.time, 8);
        assert_eq!((snap.width, snap.height), (10, 10));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut state = grass_state(2);
        place(&mut state, Job::Lumberjack, 1, 1);
        let json = serde_json::to_value(world_state(&state)).unwrap_or_default();
        assert_eq!(json.pointer("/tick").and_then(serde_json::Value::as_u64), Some(0));
        assert_eq!(
            json.pointer("/agents/0/job").and_then(serde_json::Value::as_str),
            Some("lumberjack")
        );
        assert!(json.pointer("/agents/0/psyche/sanity").is_some_and(serde_json::Value::is_number));
    }

    #[test]
    fn map_reflects_terrain() {
        let state = grass_state(3);
        let map = map_view(&state);
        assert_eq!(map.grid.len(), 10);
        assert!(map.grid.iter().flatten().all(|t| *t == Terrain::Grass));
    }
}
