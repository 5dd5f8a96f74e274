//! Error types for the mimesis-agents crate.
//!
//! Expected in-world failures (no food, missing materials, a full pack) are
//! reported through the agent's own log, not through this type. These
//! variants cover the cases a caller must handle explicitly.

use mimesis_types::{AgentId, ItemCategory};

/// Errors that can occur during agent state operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// No recipe exists under the given name.
    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),

    /// A recipe's material requirement is not met.
    #[error("missing materials for {recipe}: need {needed} {material}, have {available}")]
    MissingMaterials {
        /// The recipe being crafted.
        recipe: &'static str,
        /// The first unmet material.
        material: &'static str,
        /// Quantity the recipe requires.
        needed: usize,
        /// Quantity the inventory holds.
        available: usize,
    },

    /// The carried list has no room for the item.
    #[error("inventory full ({capacity} items)")]
    InventoryFull {
        /// The inventory's capacity.
        capacity: usize,
    },

    /// The item cannot be placed in any equipment slot.
    #[error("{name} ({category:?}) cannot be equipped")]
    NotEquippable {
        /// Item name.
        name: String,
        /// Item category.
        category: ItemCategory,
    },

    /// The named item is not carried.
    #[error("item not carried: {0}")]
    ItemNotCarried(String),

    /// Agent with the given ID was not found in the roster.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// Reproduction failed a precondition check.
    #[error("reproduction failed: {reason}")]
    ReproductionFailed {
        /// Description of why reproduction was rejected.
        reason: String,
    },
}
