//! Memes, mutation, and social infection.
//!
//! Each agent's [`MemeticHost`] starts with three seed phrases per
//! [`Sentiment`]. Speaking picks a phrase uniformly from the requested
//! bucket; one time in ten the phrase drifts into a mutant that the speaker
//! learns before saying it. Listeners within earshot catch a spoken meme with
//! probability `openness * virality * (1 + prestige)`, unless they already
//! learned that exact meme id (immunity is permanent).
//!
//! Buckets hold at most [`VOCABULARY_LIMIT`] memes; learning into a full
//! bucket forgets the oldest entry.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use mimesis_types::{MemeId, Sentiment};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Maximum memes per sentiment bucket.
pub const VOCABULARY_LIMIT: usize = 5;

/// Base transmissibility of every meme.
pub const BASE_VIRALITY: f64 = 1.0;

/// Probability an expression mutates.
pub const MUTATION_RATE: f64 = 0.1;

/// Probability of a vowel shift when drifting.
const VOWEL_SHIFT_CHANCE: f64 = 0.3;

/// Probability of dropping the last character when drifting.
const TRUNCATION_CHANCE: f64 = 0.2;

/// Probability of appending an exclamation mark when drifting.
const EMPHASIS_CHANCE: f64 = 0.2;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Starting vocabulary of every host.
const SEED_VOCABULARY: [(Sentiment, [&str; 3]); 4] = [
    (Sentiment::Hostile, ["Back off.", "Fight me?", "Go away!"]),
    (Sentiment::Friendly, ["Hello.", "Peace.", "Good trade."]),
    (Sentiment::Fearful, ["Run!", "Help!", "Monster!"]),
    (Sentiment::Neutral, ["Hmm.", "Nice day.", "Busy."]),
];

// ---------------------------------------------------------------------------
// Meme
// ---------------------------------------------------------------------------

/// An immutable unit of culture.
#[derive(Debug, Clone, PartialEq)]
pub struct Meme {
    /// Identity; immunity is keyed on it.
    pub id: MemeId,
    /// The phrase.
    pub text: String,
    /// Emotional bucket.
    pub sentiment: Sentiment,
    /// The meme this one mutated from.
    pub parent: Option<MemeId>,
    /// Mutation depth; seeds are 0.
    pub generation: u32,
    /// Base transmissibility.
    pub virality: f64,
}

impl Meme {
    /// A generation-0 meme.
    pub fn new(text: impl Into<String>, sentiment: Sentiment, rng: &mut impl Rng) -> Self {
        Self {
            id: MemeId::from_rng(rng),
            text: text.into(),
            sentiment,
            parent: None,
            generation: 0,
            virality: BASE_VIRALITY,
        }
    }

    /// A drifted child of this meme with a fresh id.
    pub fn mutate(&self, rng: &mut impl Rng) -> Self {
        let text = drift(&self.text, rng);
        Self {
            id: MemeId::from_rng(rng),
            text,
            sentiment: self.sentiment,
            parent: Some(self.id),
            generation: self.generation.saturating_add(1),
            virality: self.virality,
        }
    }
}

/// Apply at most one textual corruption to `text`.
///
/// Each form is its own independent draw, tried in order: vowel shift
/// (a random position, replaced only if it already holds a vowel),
/// truncation (only for texts longer than three characters), then emphasis.
pub fn drift(text: &str, rng: &mut impl Rng) -> String {
    if rng.random::<f64>() < VOWEL_SHIFT_CHANCE {
        let mut chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        let idx = rng.random_range(0..chars.len());
        if let Some(c) = chars.get_mut(idx)
            && VOWELS.contains(c)
        {
            *c = VOWELS.choose(rng).copied().unwrap_or(*c);
        }
        chars.into_iter().collect()
    } else if rng.random::<f64>() < TRUNCATION_CHANCE {
        let mut chars: Vec<char> = text.chars().collect();
        if chars.len() > 3 {
            chars.pop();
        }
        chars.into_iter().collect()
    } else if rng.random::<f64>() < EMPHASIS_CHANCE {
        format!("{text}!")
    } else {
        text.to_owned()
    }
}

// ---------------------------------------------------------------------------
// MemeticHost
// ---------------------------------------------------------------------------

/// An agent's vocabulary and immunity record.
#[derive(Debug, Clone, PartialEq)]
pub struct MemeticHost {
    susceptibility: f64,
    vocabulary: BTreeMap<Sentiment, VecDeque<Meme>>,
    learned: BTreeSet<MemeId>,
}

impl MemeticHost {
    /// A host seeded with the starting vocabulary.
    ///
    /// `openness` becomes the host's susceptibility to infection.
    pub fn new(openness: f64, rng: &mut impl Rng) -> Self {
        let mut host = Self {
            susceptibility: openness,
            vocabulary: BTreeMap::new(),
            learned: BTreeSet::new(),
        };
        for (sentiment, phrases) in SEED_VOCABULARY {
            for phrase in phrases {
                host.learn(Meme::new(phrase, sentiment, rng));
            }
        }
        host
    }

    /// Susceptibility to infection.
    pub const fn susceptibility(&self) -> f64 {
        self.susceptibility
    }

    /// Memes currently held in a bucket, oldest first.
    pub fn vocabulary(&self, sentiment: Sentiment) -> impl Iterator<Item = &Meme> {
        self.vocabulary.get(&sentiment).into_iter().flatten()
    }

    /// Number of memes in a bucket.
    pub fn bucket_len(&self, sentiment: Sentiment) -> usize {
        self.vocabulary.get(&sentiment).map_or(0, VecDeque::len)
    }

    /// Whether this meme id was ever learned.
    pub fn knows(&self, id: MemeId) -> bool {
        self.learned.contains(&id)
    }

    /// Pick something to say from a bucket, possibly mutating it.
    ///
    /// A mutant is learned by the speaker before it is returned.
    pub fn express(&mut self, sentiment: Sentiment, rng: &mut impl Rng) -> Option<Meme> {
        let bucket = self.vocabulary.get(&sentiment)?;
        if bucket.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..bucket.len());
        let chosen = bucket.get(idx)?.clone();

        if rng.random::<f64>() < MUTATION_RATE {
            let mutant = chosen.mutate(rng);
            self.learn(mutant.clone());
            return Some(mutant);
        }
        Some(chosen)
    }

    /// Roll for infection by a spoken meme.
    ///
    /// Returns `true` if the meme was learned.
    pub fn expose(&mut self, meme: &Meme, speaker_prestige: f64, rng: &mut impl Rng) -> bool {
        if self.knows(meme.id) {
            return false;
        }
        let chance = self.susceptibility * meme.virality * (1.0 + speaker_prestige);
        if rng.random::<f64>() < chance {
            self.learn(meme.clone())
        } else {
            false
        }
    }

    /// Insert a meme into its bucket, forgetting the oldest if full.
    ///
    /// Returns `false` if the id was already learned.
    pub fn learn(&mut self, meme: Meme) -> bool {
        if !self.learned.insert(meme.id) {
            return false;
        }
        let bucket = self.vocabulary.entry(meme.sentiment).or_default();
        while bucket.len() >= VOCABULARY_LIMIT {
            bucket.pop_front();
        }
        bucket.push_back(meme);
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn stranger(rng: &mut StdRng, n: usize) -> Meme {
        Meme::new(format!("Phrase {n}"), Sentiment::Friendly, rng)
    }

    #[test]
    fn host_is_seeded_with_three_per_bucket() {
        let mut rng = StdRng::seed_from_u64(1);
        let host = MemeticHost::new(0.5, &mut rng);
        for sentiment in Sentiment::ALL {
            assert_eq!(host.bucket_len(sentiment), 3);
        }
        let texts: Vec<&str> = host.vocabulary(Sentiment::Fearful).map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Run!", "Help!", "Monster!"]);
    }

    #[test]
    fn buckets_never_exceed_limit() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut host = MemeticHost::new(1.0, &mut rng);
        for n in 0..20 {
            let meme = stranger(&mut rng, n);
            assert!(host.learn(meme));
            assert!(host.bucket_len(Sentiment::Friendly) <= VOCABULARY_LIMIT);
        }
        let newest = host.vocabulary(Sentiment::Friendly).last().map(|m| m.text.clone());
        assert_eq!(newest.as_deref(), Some("Phrase 19"));
    }

    #[test]
    fn same_meme_is_never_learned_twice() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut host = MemeticHost::new(1.0, &mut rng);
        let meme = stranger(&mut rng, 0);

        assert!(host.expose(&meme, 0.0, &mut rng));
        let before = host.bucket_len(Sentiment::Friendly);
        assert!(!host.expose(&meme, 10.0, &mut rng));
        assert!(!host.learn(meme));
        assert_eq!(host.bucket_len(Sentiment::Friendly), before);
    }

    #[test]
    fn closed_minds_never_catch_anything() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut host = MemeticHost::new(0.0, &mut rng);
        for n in 0..50 {
            let meme = stranger(&mut rng, n);
            assert!(!host.expose(&meme, 1.0, &mut rng));
        }
    }

    #[test]
    fn immunity_survives_eviction() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut host = MemeticHost::new(1.0, &mut rng);
        let first = stranger(&mut rng, 0);
        assert!(host.learn(first.clone()));
        for n in 1..10 {
            let _ = host.learn(stranger(&mut rng, n));
        }
        assert!(host.vocabulary(Sentiment::Friendly).all(|m| m.id != first.id));
        assert!(!host.expose(&first, 0.0, &mut rng));
    }

    #[test]
    fn mutation_links_to_parent() {
        let mut rng = StdRng::seed_from_u64(6);
        let parent = Meme::new("Hello.", Sentiment::Friendly, &mut rng);
        let child = parent.mutate(&mut rng);
        assert_eq!(child.parent, Some(parent.id));
        assert_eq!(child.generation, 1);
        assert_ne!(child.id, parent.id);
        assert_eq!(child.sentiment, Sentiment::Friendly);
        let grandchild = child.mutate(&mut rng);
        assert_eq!(grandchild.generation, 2);
    }

    #[test]
    fn drift_changes_at_most_one_thing() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let out = drift("Peace.", &mut rng);
            let len = out.chars().count();
            assert!((5..=7).contains(&len), "unexpected drift {out}");
        }
        assert!(drift("Hi", &mut StdRng::seed_from_u64(8)).chars().count() >= 2);
    }

    #[test]
    fn express_returns_known_or_learned_meme() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut host = MemeticHost::new(0.5, &mut rng);
        for _ in 0..100 {
            let Some(meme) = host.express(Sentiment::Hostile, &mut rng) else {
                panic!("hostile bucket is never empty");
            };
            assert!(host.knows(meme.id));
            assert!(host.bucket_len(Sentiment::Hostile) <= VOCABULARY_LIMIT);
        }
    }
}
