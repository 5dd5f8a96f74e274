//! Personality, sanity, and disorder acquisition.
//!
//! Every agent carries five Big Five traits drawn uniformly from `[0, 1)` at
//! creation and never changed afterwards (children inherit a blend, see
//! [`crate::reproduction`]). Sanity is a bounded accumulator fed by the
//! emotional weight of episodes:
//!
//! | Episode weight | Sanity change       |
//! |----------------|---------------------|
//! | `< -2`         | full weight         |
//! | `> 2`          | half weight         |
//! | otherwise      | none                |
//!
//! After every change the disorder thresholds below are evaluated; a
//! disorder, once acquired, is never removed.
//!
//! | Disorder      | Sanity below | Trait condition                       |
//! |---------------|--------------|---------------------------------------|
//! | Paranoia      | 30           | neuroticism > 0.6                     |
//! | Schizophrenia | 20           | openness > 0.7                        |
//! | Hoarding OCD  | 40           | conscientiousness > 0.8               |
//! | Phobia        | 50           | neuroticism > 0.8                     |
//! | Megalomania   | 35           | extraversion > 0.7, agreeableness < 0.3 |

use mimesis_types::{Disorder, PsycheView, TraitsView};
use rand::Rng;

/// Sanity ceiling and starting value.
pub const MAX_SANITY: f64 = 100.0;

/// Episodes must exceed this magnitude to touch sanity.
const SANITY_WEIGHT_THRESHOLD: f64 = 2.0;

/// Positive episodes heal at this fraction of their weight.
const HEALING_FACTOR: f64 = 0.5;

/// Maximum jitter applied to each inherited trait.
const INHERITANCE_JITTER: f64 = 0.1;

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

/// The five fixed personality traits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Personality {
    /// Curiosity; sets meme susceptibility.
    pub openness: f64,
    /// Discipline and orderliness.
    pub conscientiousness: f64,
    /// Social energy.
    pub extraversion: f64,
    /// Kindness and cooperation.
    pub agreeableness: f64,
    /// Anxiety and instability.
    pub neuroticism: f64,
}

impl Personality {
    /// Draw every trait uniformly from `[0, 1)`.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            openness: rng.random(),
            conscientiousness: rng.random(),
            extraversion: rng.random(),
            agreeableness: rng.random(),
            neuroticism: rng.random(),
        }
    }

    /// A uniform personality, mostly useful for tests.
    pub const fn uniform(value: f64) -> Self {
        Self {
            openness: value,
            conscientiousness: value,
            extraversion: value,
            agreeableness: value,
            neuroticism: value,
        }
    }

    /// Child traits: the parents' mean plus independent jitter in
    /// `[-0.1, 0.1]`, clamped to `[0, 1]`.
    pub fn inherit(a: &Self, b: &Self, rng: &mut impl Rng) -> Self {
        let mut blend = |x: f64, y: f64| {
            let jitter = rng.random_range(-INHERITANCE_JITTER..=INHERITANCE_JITTER);
            ((x + y) / 2.0 + jitter).clamp(0.0, 1.0)
        };
        Self {
            openness: blend(a.openness, b.openness),
            conscientiousness: blend(a.conscientiousness, b.conscientiousness),
            extraversion: blend(a.extraversion, b.extraversion),
            agreeableness: blend(a.agreeableness, b.agreeableness),
            neuroticism: blend(a.neuroticism, b.neuroticism),
        }
    }

    /// Every trait as an array, in OCEAN order.
    pub const fn as_array(&self) -> [f64; 5] {
        [
            self.openness,
            self.conscientiousness,
            self.extraversion,
            self.agreeableness,
            self.neuroticism,
        ]
    }

    /// Build the serializable view.
    pub const fn to_view(&self) -> TraitsView {
        TraitsView {
            openness: self.openness,
            conscientiousness: self.conscientiousness,
            extraversion: self.extraversion,
            agreeableness: self.agreeableness,
            neuroticism: self.neuroticism,
        }
    }
}

// ---------------------------------------------------------------------------
// Psyche
// ---------------------------------------------------------------------------

/// Traits plus mutable mental state.
#[derive(Debug, Clone, PartialEq)]
pub struct Psyche {
    /// Fixed personality traits.
    pub traits: Personality,
    sanity: f64,
    disorders: Vec<Disorder>,
}

impl Psyche {
    /// A healthy psyche with full sanity and no disorders.
    pub const fn new(traits: Personality) -> Self {
        Self {
            traits,
            sanity: MAX_SANITY,
            disorders: Vec::new(),
        }
    }

    /// Current sanity in `[0, 100]`.
    pub const fn sanity(&self) -> f64 {
        self.sanity
    }

    /// Acquired disorders in acquisition order.
    pub fn disorders(&self) -> &[Disorder] {
        &self.disorders
    }

    /// Whether the disorder has been acquired.
    pub fn has(&self, disorder: Disorder) -> bool {
        self.disorders.contains(&disorder)
    }

    /// Feed an episode's emotional weight into sanity.
    ///
    /// Returns any disorders newly acquired as a result.
    pub fn absorb(&mut self, weight: f64) -> Vec<Disorder> {
        if weight < -SANITY_WEIGHT_THRESHOLD {
            self.adjust_sanity(weight)
        } else if weight > SANITY_WEIGHT_THRESHOLD {
            self.adjust_sanity(weight * HEALING_FACTOR)
        } else {
            Vec::new()
        }
    }

    /// Shift sanity by `delta`, clamp it, and evaluate disorder thresholds.
    ///
    /// Returns any disorders newly acquired as a result.
    pub fn adjust_sanity(&mut self, delta: f64) -> Vec<Disorder> {
        self.sanity = (self.sanity + delta).clamp(0.0, MAX_SANITY);

        let mut acquired = Vec::new();
        for disorder in [
            Disorder::Paranoia,
            Disorder::Schizophrenia,
            Disorder::HoardingOcd,
            Disorder::Phobia,
            Disorder::Megalomania,
        ] {
            if !self.has(disorder) && self.meets_threshold(disorder) {
                self.disorders.push(disorder);
                acquired.push(disorder);
            }
        }
        acquired
    }

    fn meets_threshold(&self, disorder: Disorder) -> bool {
        let t = &self.traits;
        match disorder {
            Disorder::Paranoia => self.sanity < 30.0 && t.neuroticism > 0.6,
            Disorder::Schizophrenia => self.sanity < 20.0 && t.openness > 0.7,
            Disorder::HoardingOcd => self.sanity < 40.0 && t.conscientiousness > 0.8,
            Disorder::Phobia => self.sanity < 50.0 && t.neuroticism > 0.8,
            Disorder::Megalomania => {
                self.sanity < 35.0 && t.extraversion > 0.7 && t.agreeableness < 0.3
            }
        }
    }

    /// Build the serializable view.
    pub fn to_view(&self) -> PsycheView {
        PsycheView {
            traits: self.traits.to_view(),
            sanity: self.sanity,
            disorders: self.disorders.clone(),
        }
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

    #[test]
    fn random_traits_are_unit_interval() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let p = Personality::random(&mut rng);
            assert!(p.as_array().iter().all(|t| (0.0..1.0).contains(t)));
        }
    }

    #[test]
    fn small_weights_do_not_move_sanity() {
        let mut psyche = Psyche::new(Personality::uniform(0.5));
        assert!(psyche.absorb(-2.0).is_empty());
        assert!(psyche.absorb(2.0).is_empty());
        assert!((psyche.sanity() - MAX_SANITY).abs() < f64::EPSILON);
    }

    #[test]
    fn trauma_applies_full_weight_and_joy_half() {
        let mut psyche = Psyche::new(Personality::uniform(0.5));
        let _ = psyche.absorb(-10.0);
        assert!((psyche.sanity() - 90.0).abs() < 1e-9);
        let _ = psyche.absorb(4.0);
        assert!((psyche.sanity() - 92.0).abs() < 1e-9);
    }

    #[test]
    fn sanity_is_clamped() {
        let mut psyche = Psyche::new(Personality::uniform(0.5));
        let _ = psyche.adjust_sanity(-500.0);
        assert!(psyche.sanity().abs() < f64::EPSILON);
        let _ = psyche.adjust_sanity(500.0);
        assert!((psyche.sanity() - MAX_SANITY).abs() < f64::EPSILON);
    }

    #[test]
    fn paranoia_needs_low_sanity_and_neuroticism() {
        let mut traits = Personality::uniform(0.5);
        traits.neuroticism = 0.65;
        let mut psyche = Psyche::new(traits);

        assert!(psyche.adjust_sanity(-69.0).is_empty());
        let acquired = psyche.adjust_sanity(-2.0);
        assert_eq!(acquired, vec![Disorder::Paranoia]);
        assert!(psyche.has(Disorder::Paranoia));
    }

    #[test]
    fn disorders_are_permanent() {
        let mut traits = Personality::uniform(0.5);
        traits.conscientiousness = 0.9;
        let mut psyche = Psyche::new(traits);
        let _ = psyche.adjust_sanity(-70.0);
        assert!(psyche.has(Disorder::HoardingOcd));

        let _ = psyche.adjust_sanity(100.0);
        assert!(psyche.has(Disorder::HoardingOcd));
        assert_eq!(psyche.disorders().len(), 1);
    }

    #[test]
    fn megalomania_needs_both_traits() {
        let mut traits = Personality::uniform(0.5);
        traits.extraversion = 0.9;
        traits.agreeableness = 0.2;
        let mut psyche = Psyche::new(traits);
        let acquired = psyche.adjust_sanity(-66.0);
        assert!(acquired.contains(&Disorder::Megalomania));

        let mut mild = Personality::uniform(0.5);
        mild.extraversion = 0.9;
        let mut other = Psyche::new(mild);
        let _ = other.adjust_sanity(-66.0);
        assert!(!other.has(Disorder::Megalomania));
    }

    #[test]
    fn phobia_triggers_before_paranoia_for_very_anxious() {
        let mut traits = Personality::uniform(0.1);
        traits.neuroticism = 0.9;
        let mut psyche = Psyche::new(traits);
        assert_eq!(psyche.adjust_sanity(-55.0), vec![Disorder::Phobia]);
        assert_eq!(psyche.adjust_sanity(-20.0), vec![Disorder::Paranoia]);
    }

    #[test]
    fn inherited_traits_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let low = Personality::uniform(0.0);
        let high = Personality::uniform(1.0);
        for _ in 0..200 {
            let child = Personality::inherit(&low, &low, &mut rng);
            assert!(child.as_array().iter().all(|t| (0.0..=0.1).contains(t)));
            let child = Personality::inherit(&high, &high, &mut rng);
            assert!(child.as_array().iter().all(|t| (0.9..=1.0).contains(t)));
            let child = Personality::inherit(&low, &high, &mut rng);
            assert!(child.as_array().iter().all(|t| (0.4..=0.6).contains(t)));
        }
    }
}
