//! Initial population.
//!
//! A fresh world holds one trader with a purse of gold and the configured
//! number of seed citizens, each placed on a random open tile and enrolled
//! in a random founding clan.

use mimesis_agents::{Agent, ClanRegistry};
use mimesis_types::Job;
use tracing::{info, warn};

use crate::execute::CITIZEN_PREFIX;
use crate::state::SimulationState;

/// Name of the starting trader.
pub const TRADER_NAME: &str = "Trader-0";

/// Seed the trader and the initial citizens. Returns how many were placed.
pub(crate) fn seed_population(state: &mut SimulationState) -> usize {
    let mut placed = 0;

    if let Some(pos) = state.find_open_tile() {
        let vitals = state.config.agents.clone();
        let mut trader = Agent::random_citizen(
            String::from(TRADER_NAME),
            Some(Job::Trader),
            pos,
            &vitals,
            &mut state.rng,
        );
        trader.inventory.add_gold(state.config.population.trader_gold);
        state.add_agent(trader);
        placed += 1;
    } else {
        warn!("No open tile for the trader");
    }

    for _ in 0..state.config.population.initial_agents {
        let name = state.next_name(CITIZEN_PREFIX);
        let Some(pos) = state.find_open_tile() else {
            warn!(name = %name, "No open tile for a seed citizen");
            continue;
        };
        let vitals = state.config.agents.clone();
        let mut citizen = Agent::random_citizen(name, None, pos, &vitals, &mut state.rng);
        citizen.clan = ClanRegistry::random_founding(&mut state.rng).map(String::from);
        state.add_agent(citizen);
        placed += 1;
    }

    info!(
        placed,
        width = state.grid.width(),
        height = state.grid.height(),
        "Population seeded"
    );
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::grass_state;

    #[test]
    fn trader_and_ten_citizens() {
        let mut state = grass_state(1);
        assert_eq!(seed_population(&mut state), 11);

        let trader = state.agents().first();
        assert!(trader.is_some_and(|t| t.job == Job::Trader && t.inventory.gold() == 500 && t.clan.is_none()));

        let citizens: Vec<&Agent> = state.agents().iter().skip(1).collect();
        assert_eq!(citizens.len(), 10);
        assert!(citizens.iter().all(|c| Job::CIVILIAN.contains(&c.job) && c.clan.is_some()));
        assert_eq!(citizens.first().map(|c| c.name.as_str()), Some("Citoyen-0"));

        let members: usize = state.clans().iter().map(|c| c.members().len()).sum();
        assert_eq!(members, 10);
    }

    #[test]
    fn seeds_never_share_a_tile() {
        let mut state = grass_state(2);
        let _ = seed_population(&mut state);
        let agents = state.agents();
        for (i, a) in agents.iter().enumerate() {
            for b in agents.iter().skip(i + 1) {
                assert_ne!(a.pos, b.pos);
            }
        }
    }
}
