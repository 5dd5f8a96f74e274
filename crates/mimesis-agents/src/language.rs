//! Procedural sentences for flavor logs.
//!
//! A tiny grammar: subject, verb, optional object, and a mood ending.
//! First-person sentences drop the verb's trailing `s` ("I wait calmly.").

use rand::Rng;
use rand::seq::IndexedRandom;

/// The kind of deed being described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deed {
    /// Fighting.
    Attack,
    /// Eating.
    Eat,
    /// Harvesting.
    Gather,
    /// Making things.
    Craft,
    /// Buying and selling.
    Trade,
    /// Doing nothing.
    Idle,
    /// Running away.
    Flee,
    /// Pilfering.
    Steal,
}

/// The tone of the sentence ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    /// Flat.
    Neutral,
    /// Angry.
    Hostile,
    /// Scared.
    Fearful,
    /// Warm.
    Friendly,
    /// Hurting.
    Pain,
}

const fn verbs(deed: Deed) -> &'static [&'static str] {
    match deed {
        Deed::Attack => &["hits", "strikes", "bashes", "cuts"],
        Deed::Eat => &["eats", "devours", "munches", "consumes"],
        Deed::Gather => &["finds", "picks", "grabs", "harvests"],
        Deed::Craft => &["makes", "builds", "forges", "crafts"],
        Deed::Trade => &["sells", "buys", "swaps", "barters"],
        Deed::Idle => &["waits", "rests", "stands", "looks around"],
        Deed::Flee => &["runs from", "escapes", "evades"],
        Deed::Steal => &["steals from", "robs", "picks pocket of"],
    }
}

const fn endings(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Neutral => &[".", " calmly.", "."],
        Mood::Hostile => &[" aggressively!", " with rage!", "!"],
        Mood::Fearful => &[" quickly!", " in panic!", "..."],
        Mood::Friendly => &[" happily.", " with a smile.", "."],
        Mood::Pain => &[" painfully.", " while bleeding.", "!"],
    }
}

/// Compose a sentence.
///
/// `subject` of `None` means the speaker themself ("I").
pub fn compose(
    subject: Option<&str>,
    deed: Deed,
    object: Option<&str>,
    mood: Mood,
    rng: &mut impl Rng,
) -> String {
    let mut verb = verbs(deed).choose(rng).copied().unwrap_or("does");
    if subject.is_none() {
        verb = verb.strip_suffix('s').unwrap_or(verb);
    }
    let ending = endings(mood).choose(rng).copied().unwrap_or(".");

    let mut sentence = String::from(subject.unwrap_or("I"));
    sentence.push(' ');
    sentence.push_str(verb);
    if let Some(object) = object {
        sentence.push(' ');
        sentence.push_str(object);
    }
    sentence.push_str(ending);
    sentence
}
