//! Speaking and meme spread.
//!
//! A speaker expresses a meme from the requested sentiment bucket, shows it
//! as its current utterance, and exposes every living non-monster within
//! [`SPEECH_RADIUS`] to it. A badly shaken speaker sometimes only mutters
//! `...`, which carries no meme.

use mimesis_types::{EpisodeKind, Sentiment};
use rand::Rng;
use tracing::debug;

use crate::perception::{SPEECH_RADIUS, neighbors};
use crate::state::SimulationState;

/// Sanity below which speech may fail.
const SILENT_SANITY: f64 = 30.0;

/// Chance a shaken speaker mutters instead of speaking.
const SILENT_CHANCE: f64 = 0.4;

/// What the mutter looks like.
const MUTTER: &str = "...";

/// Have `roster[speaker]` say something of the given sentiment.
///
/// Returns the number of listeners that learned the meme. Speakers on
/// cooldown, dead speakers, and jobs that never speak are silently skipped.
pub(crate) fn say(state: &mut SimulationState, speaker: usize, sentiment: Sentiment) -> usize {
    let tick = state.clock.tick();
    let cooldown = state.config.agents.speech_cooldown;
    let SimulationState { agents, rng, .. } = state;

    let Some(agent) = agents.get_mut(speaker) else {
        return 0;
    };
    if !agent.alive || agent.speech_cooldown > 0 || !agent.profile().speaks {
        return 0;
    }

    if agent.psyche.sanity() < SILENT_SANITY && rng.random::<f64>() < SILENT_CHANCE {
        agent.speak(String::from(MUTTER), tick, cooldown);
        return 0;
    }

    let Some(meme) = agent.memetics.express(sentiment, rng) else {
        return 0;
    };
    agent.speak(meme.text.clone(), tick, cooldown);
    let prestige = agent.prestige();
    let speaker_name = agent.name.clone();

    let listeners: Vec<usize> = neighbors(agents, speaker, SPEECH_RADIUS)
        .iter()
        .filter(|n| !n.agent.job.is_monster())
        .map(|n| n.index)
        .collect();

    let mut infected = 0;
    for index in listeners {
        let Some(listener) = agents.get_mut(index) else {
            continue;
        };
        if listener.memetics.expose(&meme, prestige, rng) {
            listener.log_event(
                tick,
                EpisodeKind::Learning,
                format!("Learned '{}' from {speaker_name}", meme.text),
                0.5,
            );
            infected += 1;
        }
    }

    debug!(
        tick,
        speaker = %speaker_name,
        ?sentiment,
        text = %meme.text,
        generation = meme.generation,
        infected,
        "meme spoken"
    );
    infected
}

#[cfg(test)]
mod tests {
    use mimesis_agents::{Agent, AgentParams, Personality};
    use mimesis_types::{Gender, Job, Position};

    use super::*;
    use crate::state::testing::{at, at_mut, grass_state, place};

    /// A gatherer whose susceptibility is fixed at 1.0 from birth.
    fn place_open_mind(state: &mut SimulationState, x: i32, y: i32) -> usize {
        let vitals = state.config.agents.clone();
        let mut traits = Personality::uniform(0.5);
        traits.openness = 1.0;
        let params = AgentParams {
            name: String::from("Ecoute"),
            job: Job::Gatherer,
            gender: Gender::Female,
            pos: Position::new(x, y),
            age: vitals.adult_age(),
            generation: 1,
            clan: None,
            traits,
        };
        let agent = Agent::new(params, &vitals, &mut state.rng);
        state.add_agent(agent);
        state.agents.len().saturating_sub(1)
    }

    #[test]
    fn speaking_sets_utterance_and_cooldown() {
        let mut state = grass_state(1);
        let idx = place(&mut state, Job::Gatherer, 2, 2);
        let _ = say(&mut state, idx, Sentiment::Friendly);
        let agent = at(&state, idx);
        assert!(agent.speech.is_some());
        assert_eq!(agent.speech_cooldown, 20);
    }

    #[test]
    fn cooldown_blocks_speech() {
        let mut state = grass_state(2);
        let idx = place(&mut state, Job::Gatherer, 2, 2);
        at_mut(&mut state, idx).speech_cooldown = 4;
        assert_eq!(say(&mut state, idx, Sentiment::Hostile), 0);
        assert!(at(&state, idx).speech.is_none());
    }

    #[test]
    fn monsters_never_speak() {
        let mut state = grass_state(3);
        let idx = place(&mut state, Job::Monster, 2, 2);
        let _ = say(&mut state, idx, Sentiment::Hostile);
        assert!(at(&state, idx).speech.is_none());
    }

    #[test]
    fn shaken_speakers_sometimes_mutter_without_spreading() {
        let mut state = grass_state(4);
        let speaker = place(&mut state, Job::Gatherer, 2, 2);
        let listener = place(&mut state, Job::Gatherer, 3, 2);
        let _ = at_mut(&mut state, speaker).psyche.adjust_sanity(-100.0);

        let mut muttered = false;
        for _ in 0..40 {
            at_mut(&mut state, speaker).speech_cooldown = 0;
            let before = at(&state, listener).journal.episodes().len();
            let infected = say(&mut state, speaker, Sentiment::Neutral);
            let said = at(&state, speaker).speech.as_ref().map(|s| s.text.clone());
            if said.as_deref() == Some(MUTTER) {
                muttered = true;
                assert_eq!(infected, 0);
                assert_eq!(at(&state, listener).journal.episodes().len(), before);
            }
        }
        assert!(muttered);
    }

    #[test]
    fn repeated_exposure_never_duplicates_vocabulary() {
        let mut state = grass_state(5);
        let speaker = place(&mut state, Job::Gatherer, 2, 2);
        let listener = place_open_mind(&mut state, 2, 3);
        assert!((at(&state, listener).memetics.susceptibility() - 1.0).abs() < f64::EPSILON);

        for _ in 0..200 {
            at_mut(&mut state, speaker).speech_cooldown = 0;
            let _ = say(&mut state, speaker, Sentiment::Friendly);
        }
        let host = &at(&state, listener).memetics;
        let texts: Vec<&str> = host.vocabulary(Sentiment::Friendly).map(|m| m.text.as_str()).collect();
        let ids: std::collections::BTreeSet<_> = host.vocabulary(Sentiment::Friendly).map(|m| m.id).collect();
        assert!(!texts.is_empty());
        assert_eq!(ids.len(), texts.len());
        assert!(host.bucket_len(Sentiment::Friendly) <= 5);
    }
}
