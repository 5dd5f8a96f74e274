//! Who an agent can see and hear.
//!
//! Agents perceive every living agent within a Euclidean radius: 4 tiles
//! for decisions, 5 tiles for speech. Results are ordered nearest first,
//! with roster order breaking ties, so "the nearest X" is simply the first
//! match.

use mimesis_agents::Agent;

/// Radius within which agents notice each other when deciding.
pub const NEARBY_RADIUS: f64 = 4.0;

/// Radius within which speech is heard.
pub const SPEECH_RADIUS: f64 = 5.0;

/// Another agent seen from somewhere.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    /// Roster index.
    pub index: usize,
    /// The agent.
    pub agent: &'a Agent,
    /// Euclidean distance.
    pub distance: f64,
}

/// Living agents other than `roster[me]` within `radius`, nearest first.
///
/// Returns an empty list if `me` is out of range.
pub fn neighbors(roster: &[Agent], me: usize, radius: f64) -> Vec<Neighbor<'_>> {
    let Some(origin) = roster.get(me) else {
        return Vec::new();
    };
    let mut found: Vec<Neighbor<'_>> = roster
        .iter()
        .enumerate()
        .filter(|(i, other)| *i != me && other.alive)
        .map(|(index, agent)| Neighbor {
            index,
            agent,
            distance: origin.pos.distance(agent.pos),
        })
        .filter(|n| n.distance <= radius)
        .collect();
    found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    found
}
