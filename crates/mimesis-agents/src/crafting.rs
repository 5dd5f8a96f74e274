//! Crafting recipes.
//!
//! Defines the static recipe table mapping craftable items to their input
//! materials and result attributes. Crafting checks every requirement before
//! consuming anything, and always instantiates a fresh result [`Item`].
//!
//! | Recipe | Inputs   | Result            |
//! |--------|----------|-------------------|
//! | Spear  | 3 Wood   | weapon 15, value 10 |
//! | Club   | 2 Wood   | weapon 10, value 5  |
//! | Tunic  | 3 Fiber  | armor 10, value 15  |
//! | Sword  | 2 Ore    | weapon 30, value 50 |

use mimesis_types::{EquipSlot, ItemCategory};

use crate::error::AgentError;
use crate::inventory::{FIBER, Inventory, Item, ORE, WOOD};

// ---------------------------------------------------------------------------
// Recipe
// ---------------------------------------------------------------------------

/// A craftable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Recipe {
    /// Wooden spear.
    Spear,
    /// Wooden club.
    Club,
    /// Fiber tunic.
    Tunic,
    /// Iron sword.
    Sword,
}

impl Recipe {
    /// Every recipe.
    pub const ALL: [Self; 4] = [Self::Spear, Self::Club, Self::Tunic, Self::Sword];

    /// Output item name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spear => "Spear",
            Self::Club => "Club",
            Self::Tunic => "Tunic",
            Self::Sword => "Sword",
        }
    }

    /// Look a recipe up by output name.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownRecipe`] if no recipe has that name.
    pub fn from_name(name: &str) -> Result<Self, AgentError> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| AgentError::UnknownRecipe(name.to_owned()))
    }

    /// Materials consumed: `(item name, count)` pairs.
    pub const fn inputs(self) -> &'static [(&'static str, usize)] {
        match self {
            Self::Spear => &[(WOOD, 3)],
            Self::Club => &[(WOOD, 2)],
            Self::Tunic => &[(FIBER, 3)],
            Self::Sword => &[(ORE, 2)],
        }
    }

    /// A fresh instance of the result item.
    pub fn result(self) -> Item {
        match self {
            Self::Spear => Item::new(self.name(), ItemCategory::Weapon, 15, 10),
            Self::Club => Item::new(self.name(), ItemCategory::Weapon, 10, 5),
            Self::Tunic => Item::new(self.name(), ItemCategory::Armor, 10, 15),
            Self::Sword => Item::new(self.name(), ItemCategory::Weapon, 30, 50),
        }
    }

    /// The slot the result occupies.
    pub const fn slot(self) -> EquipSlot {
        match self {
            Self::Tunic => EquipSlot::Body,
            Self::Spear | Self::Club | Self::Sword => EquipSlot::Hand,
        }
    }
}

// ---------------------------------------------------------------------------
// Crafting
// ---------------------------------------------------------------------------

/// What a successful craft produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crafted {
    /// The recipe used.
    pub recipe: Recipe,
    /// Whether the result went straight into an empty slot.
    pub equipped: bool,
}

/// Check whether the inventory carries every input of `recipe`.
pub fn can_craft(inventory: &Inventory, recipe: Recipe) -> bool {
    first_shortfall(inventory, recipe).is_none()
}

/// Consume the inputs and add a fresh result item.
///
/// A weapon or armor result is equipped immediately when its slot is empty.
///
/// # Errors
///
/// Returns [`AgentError::MissingMaterials`] naming the first unmet input;
/// the inventory is untouched in that case.
pub fn craft(inventory: &mut Inventory, recipe: Recipe) -> Result<Crafted, AgentError> {
    if let Some((material, needed, available)) = first_shortfall(inventory, recipe) {
        return Err(AgentError::MissingMaterials {
            recipe: recipe.name(),
            material,
            needed,
            available,
        });
    }

    for &(material, count) in recipe.inputs() {
        inventory.remove(material, count);
    }
    // Inputs always free at least two slots, so the result fits.
    inventory.add(recipe.result());

    let equipped = inventory.slot_is_empty(recipe.slot())
        && inventory.equip_carried(recipe.name()).is_ok();

    Ok(Crafted { recipe, equipped })
}

fn first_shortfall(inventory: &Inventory, recipe: Recipe) -> Option<(&'static str, usize, usize)> {
    recipe.inputs().iter().find_map(|&(material, needed)| {
        let available = inventory.count(material);
        (available < needed).then_some((material, needed, available))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn with(material: &str, n: usize) -> Inventory {
        let mut inv = Inventory::default();
        for _ in 0..n {
            inv.add(Item::resource(material));
        }
        inv
    }

    #[test]
    fn failed_check_leaves_counts_unchanged() {
        let mut inv = with(WOOD, 2);
        assert!(!can_craft(&inv, Recipe::Spear));
        let result = craft(&mut inv, Recipe::Spear);
        assert!(matches!(
            result,
            Err(AgentError::MissingMaterials { material: "Wood", needed: 3, available: 2, .. })
        ));
        assert_eq!(inv.count(WOOD), 2);
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn craft_consumes_exact_inputs_and_equips() {
        let mut inv = with(WOOD, 5);
        let crafted = craft(&mut inv, Recipe::Spear);
        assert_eq!(
            crafted.ok(),
            Some(Crafted { recipe: Recipe::Spear, equipped: true })
        );
        assert_eq!(inv.count(WOOD), 2);
        assert_eq!(inv.weapon_power(), 15);
        assert_eq!(inv.count("Spear"), 0);
    }

    #[test]
    fn second_weapon_stays_in_pack() {
        let mut inv = with(WOOD, 5);
        assert!(craft(&mut inv, Recipe::Spear).is_ok());
        let second = craft(&mut inv, Recipe::Club);
        assert_eq!(second.ok().map(|c| c.equipped), Some(false));
        assert_eq!(inv.count("Club"), 1);
        assert_eq!(inv.count(WOOD), 0);
        assert_eq!(inv.weapon_power(), 15);
    }

    #[test]
    fn results_are_fresh_instances() {
        let mut inv = with(FIBER, 6);
        assert!(craft(&mut inv, Recipe::Tunic).is_ok());
        assert!(craft(&mut inv, Recipe::Tunic).is_ok());
        let carried = inv.items().iter().find(|i| i.name() == "Tunic").cloned();
        let worn = inv.equipped(EquipSlot::Body).cloned();
        assert_eq!(carried, worn);
        assert_eq!(inv.count(FIBER), 0);
    }

    #[test]
    fn sword_from_ore() {
        let mut inv = with(ORE, 2);
        assert!(can_craft(&inv, Recipe::Sword));
        assert!(craft(&mut inv, Recipe::Sword).is_ok());
        assert_eq!(inv.weapon_power(), 30);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(Recipe::from_name("Club").ok(), Some(Recipe::Club));
        assert!(matches!(
            Recipe::from_name("Bow"),
            Err(AgentError::UnknownRecipe(name)) if name == "Bow"
        ));
    }
}
