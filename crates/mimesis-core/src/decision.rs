//! Utility-based action selection.
//!
//! Every decision scores the full action menu and picks the highest entry,
//! breaking ties by the canonical order of [`ActionType::ALL`]. The result
//! is a [`Decision`] carrying the chosen action, an [`Intent`] naming its
//! target, the full score table, and an optional sentiment to speak. The
//! executor consumes the decision once; nothing is cached on the agent.
//!
//! # Scoring passes
//!
//! 1. Speech: hostile (or fearful) toward a detected hostile, friendly
//!    toward anyone nearby, or a random sentiment for the schizophrenic
//! 2. Distraction: a schizophrenic agent sometimes picks move, idle, or
//!    gather at random and stops scoring
//! 3. Survival: hunger drives eat (or foraging when no food is carried),
//!    fatigue drives sleep; night favours sleep and penalizes move
//! 4. Monsters: hunt the nearest non-monster at night, idle by day
//! 5. Combat: confidence-scaled attack on hostiles, policing, stealing,
//!    paranoia, megalomania, and phobic flight
//! 6. Economy: selling to a trader, job work, equipment crafting, building
//! 7. Reproduction with an opposite-gender adult nearby
//!
//! Scoring reads the roster but never writes to it.

use mimesis_agents::behavior::FULL_CONFIDENCE;
use mimesis_agents::crafting::{Recipe, can_craft};
use mimesis_agents::inventory::WOOD;
use mimesis_agents::reproduction::{can_reproduce, is_compatible_partner};
use mimesis_agents::{Agent, VitalsConfig};
use mimesis_types::{ActionType, AgentId, Disorder, EquipSlot, Sentiment, Terrain};
use mimesis_world::TerrainGrid;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::perception::{NEARBY_RADIUS, Neighbor, neighbors};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const HOSTILE_SPEECH_CHANCE: f64 = 0.3;
const FRIENDLY_SPEECH_CHANCE: f64 = 0.2;
const RAVING_SPEECH_CHANCE: f64 = 0.1;

const DISTRACTION_CHANCE: f64 = 0.15;
const DISTRACTIONS: [ActionType; 3] = [ActionType::Move, ActionType::Idle, ActionType::Gather];

/// Share of the hunger score that turns into foraging when no food is carried.
const FORAGE_PRESSURE: f64 = 0.8;

const NIGHT_SLEEP_BONUS: f64 = 20.0;
const NIGHT_MOVE_PENALTY: f64 = 10.0;
const NERVOUS_SLEEP_BONUS: f64 = 20.0;
const NERVOUS_THRESHOLD: f64 = 0.5;

const MONSTER_PROWL: f64 = 50.0;
const MONSTER_HUNT: f64 = 100.0;
const MONSTER_LURK: f64 = 100.0;

/// Weapon power above which any agent fights with full confidence.
const STRONG_WEAPON: u32 = 10;
const TIMID_THRESHOLD: f64 = 0.7;

const DEFEND: f64 = 90.0;
const POLICE: f64 = 80.0;
const STEAL: f64 = 60.0;
const PARANOID_STRIKE: f64 = 50.0;
const MEGALOMANIAC_STRIKE: f64 = 95.0;
const MEGALOMANIA_CHANCE: f64 = 0.05;
const PHOBIC_FLIGHT: f64 = 100.0;

const TRADE: f64 = 70.0;
const TRADE_MIN_ITEMS: usize = 5;

const BASE_MOVE: f64 = 20.0;
const BASE_IDLE: f64 = 5.0;

const SIGNATURE_CRAFT: f64 = 80.0;
const HOARDING_GATHER: f64 = 15.0;
const BUILD: f64 = 35.0;
const BUILD_MIN_WOOD: usize = 7;

/// Hand-slot recipes in order of preference, with their scores.
const WEAPON_CRAFTS: [(Recipe, f64); 2] = [(Recipe::Spear, 75.0), (Recipe::Club, 70.0)];
const ARMOR_CRAFT: f64 = 65.0;

const REPRODUCE: f64 = 85.0;

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

const ACTION_COUNT: usize = ActionType::ALL.len();

/// One utility score per action, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scores([f64; ACTION_COUNT]);

impl Scores {
    /// Score of one action.
    pub fn get(&self, action: ActionType) -> f64 {
        self.0.get(action as usize).copied().unwrap_or(0.0)
    }

    fn set(&mut self, action: ActionType, value: f64) {
        if let Some(slot) = self.0.get_mut(action as usize) {
            *slot = value;
        }
    }

    fn add(&mut self, action: ActionType, delta: f64) {
        if let Some(slot) = self.0.get_mut(action as usize) {
            *slot += delta;
        }
    }

    /// The highest-scoring action; earlier actions win ties.
    pub fn best(&self) -> ActionType {
        let mut best = ActionType::Idle;
        let mut best_score = f64::NEG_INFINITY;
        for action in ActionType::ALL {
            let score = self.get(action);
            if score > best_score {
                best = action;
                best_score = score;
            }
        }
        best
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// The target of a chosen action, consumed once by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// The action needs no target.
    None,
    /// Strike this agent.
    Attack {
        /// The defender.
        target: AgentId,
    },
    /// Pick this agent's pocket.
    Steal {
        /// The mark.
        victim: AgentId,
    },
    /// Sell to this trader.
    Trade {
        /// The buyer.
        partner: AgentId,
    },
    /// Craft this recipe.
    Craft {
        /// What to make.
        recipe: Recipe,
    },
    /// Have a child with this agent.
    Reproduce {
        /// The mate.
        partner: AgentId,
    },
}

/// The outcome of one decision call.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// The chosen action.
    pub action: ActionType,
    /// The chosen action's target.
    pub intent: Intent,
    /// Every action's score.
    pub scores: Scores,
    /// Sentiment to speak before acting.
    pub utterance: Option<Sentiment>,
}

impl Decision {
    /// Idle with nothing else to do (dead or missing agents).
    pub fn idle() -> Self {
        Self {
            action: ActionType::Idle,
            intent: Intent::None,
            scores: Scores::default(),
            utterance: None,
        }
    }
}

/// World facts a decision reads besides the roster.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    /// Terrain.
    pub grid: &'a TerrainGrid,
    /// Whether it is night.
    pub is_night: bool,
    /// Living agents in the world.
    pub living: usize,
    /// Living agents at which reproduction stops.
    pub max_population: usize,
    /// Agent tunables.
    pub vitals: &'a VitalsConfig,
}

/// Accumulates scores together with the target each score is aimed at.
#[derive(Debug, Default)]
struct Plan {
    scores: Scores,
    attack: Option<AgentId>,
    steal: Option<AgentId>,
    trade: Option<AgentId>,
    craft: Option<Recipe>,
    mate: Option<AgentId>,
}

impl Plan {
    fn aim_attack(&mut self, score: f64, target: AgentId) {
        if self.attack.is_none() || score > self.scores.get(ActionType::Attack) {
            self.scores.set(ActionType::Attack, score);
            self.attack = Some(target);
        }
    }

    fn aim_craft(&mut self, score: f64, recipe: Recipe) {
        if score > self.scores.get(ActionType::Craft) {
            self.scores.set(ActionType::Craft, score);
            self.craft = Some(recipe);
        }
    }

    fn finish(self, utterance: Option<Sentiment>) -> Decision {
        let action = self.scores.best();
        let intent = match action {
            ActionType::Attack => self.attack.map(|target| Intent::Attack { target }),
            ActionType::Steal => self.steal.map(|victim| Intent::Steal { victim }),
            ActionType::Trade => self.trade.map(|partner| Intent::Trade { partner }),
            ActionType::Craft => self.craft.map(|recipe| Intent::Craft { recipe }),
            ActionType::Reproduce => self.mate.map(|partner| Intent::Reproduce { partner }),
            _ => None,
        };
        Decision {
            action,
            intent: intent.unwrap_or(Intent::None),
            scores: self.scores,
            utterance,
        }
    }
}

// ---------------------------------------------------------------------------
// decide
// ---------------------------------------------------------------------------

/// Score the action menu for `roster[me]` and pick one.
pub fn decide(
    roster: &[Agent],
    me: usize,
    ctx: &DecisionContext<'_>,
    rng: &mut impl Rng,
) -> Decision {
    let Some(agent) = roster.get(me) else {
        return Decision::idle();
    };
    if !agent.alive {
        return Decision::idle();
    }

    let nearby = neighbors(roster, me, NEARBY_RADIUS);
    let hostiles: Vec<&Neighbor<'_>> = nearby
        .iter()
        .filter(|n| agent.regards_as_hostile(n.agent))
        .collect();
    let utterance = choose_utterance(agent, !nearby.is_empty(), !hostiles.is_empty(), rng);

    let psyche = &agent.psyche;
    if psyche.has(Disorder::Schizophrenia) && rng.random::<f64>() < DISTRACTION_CHANCE {
        let action = DISTRACTIONS.choose(rng).copied().unwrap_or(ActionType::Idle);
        let mut plan = Plan::default();
        plan.scores.set(action, 1.0);
        return plan.finish(utterance);
    }

    let profile = agent.profile();
    let inventory = &agent.inventory;
    let tile = ctx.grid.get(agent.pos);
    let mut plan = Plan::default();

    // Survival
    let hunger_pressure = agent.stats.hunger_fraction() * 100.0;
    if inventory.has_food() {
        plan.scores.set(ActionType::Eat, hunger_pressure);
    } else if tile.is_forageable() {
        plan.scores.add(ActionType::Gather, hunger_pressure * FORAGE_PRESSURE);
    }
    plan.scores.set(ActionType::Sleep, agent.stats.fatigue_fraction() * 100.0);
    if ctx.is_night {
        plan.scores.add(ActionType::Sleep, NIGHT_SLEEP_BONUS);
        plan.scores.add(ActionType::Move, -NIGHT_MOVE_PENALTY);
        if psyche.traits.neuroticism > NERVOUS_THRESHOLD {
            plan.scores.add(ActionType::Sleep, NERVOUS_SLEEP_BONUS);
        }
    }

    if profile.nocturnal {
        plan.scores.set(ActionType::Eat, 0.0);
        plan.scores.set(ActionType::Sleep, 0.0);
        plan.scores.set(ActionType::Gather, 0.0);
        if ctx.is_night {
            plan.scores.set(ActionType::Move, MONSTER_PROWL);
            if let Some(prey) = nearby.iter().find(|n| !n.agent.job.is_monster()) {
                plan.aim_attack(MONSTER_HUNT, prey.agent.id);
            }
        } else {
            plan.scores.set(ActionType::Idle, MONSTER_LURK);
        }
        return plan.finish(None);
    }

    // Combat
    let mut confidence = if inventory.weapon_power() > STRONG_WEAPON {
        FULL_CONFIDENCE
    } else {
        profile.confidence_floor
    };
    if psyche.traits.neuroticism > TIMID_THRESHOLD {
        confidence *= 0.5;
    }
    if psyche.has(Disorder::Megalomania) {
        confidence *= 2.0;
    }

    if let Some(hostile) = hostiles.first() {
        plan.aim_attack(DEFEND * confidence, hostile.agent.id);
    } else if let Some(nearest) = nearby.first() {
        if profile.polices {
            if let Some(culprit) = nearby
                .iter()
                .find(|n| n.agent.profile().steals || n.agent.job.is_monster())
            {
                plan.aim_attack(POLICE, culprit.agent.id);
            }
        } else if profile.steals {
            if let Some(mark) = nearby
                .iter()
                .find(|n| !n.agent.inventory.is_empty() || n.agent.inventory.gold() > 0)
            {
                plan.scores.set(ActionType::Steal, STEAL);
                plan.steal = Some(mark.agent.id);
            }
        } else if psyche.has(Disorder::Paranoia) {
            plan.aim_attack(PARANOID_STRIKE * confidence, nearest.agent.id);
        }
    }
    if psyche.has(Disorder::Megalomania)
        && let Some(nearest) = nearby.first()
        && rng.random::<f64>() < MEGALOMANIA_CHANCE
    {
        plan.aim_attack(MEGALOMANIAC_STRIKE, nearest.agent.id);
    }
    if psyche.has(Disorder::Phobia) && !hostiles.is_empty() {
        plan.scores.add(ActionType::Move, PHOBIC_FLIGHT);
    }

    // Selling
    if !profile.trades_goods
        && !ctx.is_night
        && inventory.len() > TRADE_MIN_ITEMS
        && !psyche.has(Disorder::HoardingOcd)
        && let Some(trader) = nearby.iter().find(|n| n.agent.profile().trades_goods)
    {
        plan.scores.set(ActionType::Trade, TRADE);
        plan.trade = Some(trader.agent.id);
    }

    plan.scores.add(ActionType::Move, BASE_MOVE);
    plan.scores.add(ActionType::Idle, BASE_IDLE);

    // Work
    if !ctx.is_night {
        if profile.harvests_wood {
            if tile == Terrain::Forest {
                plan.scores.add(ActionType::Gather, profile.gather_affinity);
            } else {
                plan.scores.add(ActionType::Move, profile.roam_bonus);
            }
        }
        if profile.mines_ore {
            match profile.signature_recipe {
                Some(recipe) if can_craft(inventory, recipe) => {
                    plan.aim_craft(SIGNATURE_CRAFT, recipe);
                }
                _ if ctx.grid.is_on_or_adjacent(agent.pos, Terrain::Wall) => {
                    plan.scores.add(ActionType::Gather, profile.gather_affinity);
                }
                _ => plan.scores.add(ActionType::Move, profile.roam_bonus),
            }
        }
        if profile.forages {
            plan.scores.add(ActionType::Gather, profile.gather_affinity);
        }
        if profile.builds && inventory.count(WOOD) >= BUILD_MIN_WOOD {
            plan.scores.set(ActionType::Build, BUILD);
        }
        if psyche.has(Disorder::HoardingOcd) {
            plan.scores.add(ActionType::Gather, HOARDING_GATHER);
        }
    }

    // Equipment
    if inventory.slot_is_empty(EquipSlot::Hand)
        && let Some((recipe, score)) = WEAPON_CRAFTS
            .iter()
            .find(|(recipe, _)| can_craft(inventory, *recipe))
    {
        plan.aim_craft(*score, *recipe);
    }
    if inventory.slot_is_empty(EquipSlot::Body) && can_craft(inventory, Recipe::Tunic) {
        plan.aim_craft(ARMOR_CRAFT, Recipe::Tunic);
    }

    // Reproduction
    if ctx.living < ctx.max_population
        && can_reproduce(agent, ctx.vitals)
        && let Some(mate) = nearby
            .iter()
            .find(|n| is_compatible_partner(agent, n.agent, ctx.vitals))
    {
        plan.scores.set(ActionType::Reproduce, REPRODUCE);
        plan.mate = Some(mate.agent.id);
    }

    plan.finish(utterance)
}

fn choose_utterance(
    agent: &Agent,
    anyone_near: bool,
    hostile_near: bool,
    rng: &mut impl Rng,
) -> Option<Sentiment> {
    if !agent.profile().speaks || agent.speech_cooldown > 0 {
        return None;
    }
    if hostile_near && rng.random::<f64>() < HOSTILE_SPEECH_CHANCE {
        return Some(if agent.psyche.has(Disorder::Phobia) {
            Sentiment::Fearful
        } else {
            Sentiment::Hostile
        });
    }
    if anyone_near && rng.random::<f64>() < FRIENDLY_SPEECH_CHANCE {
        return Some(Sentiment::Friendly);
    }
    if agent.psyche.has(Disorder::Schizophrenia) && rng.random::<f64>() < RAVING_SPEECH_CHANCE {
        return Sentiment::ALL.choose(rng).copied();
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
