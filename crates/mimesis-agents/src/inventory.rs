//! Items, carried inventory, gold, and equipment slots.
//!
//! An [`Inventory`] holds a bounded list of [`Item`]s, a gold balance, and
//! two equipment slots. Invariants:
//!
//! - The carried list never exceeds its capacity through [`Inventory::add`].
//! - An equipped item is never also present in the carried list.
//! - Gold arithmetic saturates; it never wraps.
//!
//! # Equip policy
//!
//! Equipping removes the item from the carried list first, then places it in
//! its slot; a displaced item goes back onto the list. For a carried item
//! this always has room (a slot was just freed). For an item that is not
//! carried, if the slot is occupied and the list is full the equip is
//! rejected with [`AgentError::InventoryFull`] and nothing changes.

use mimesis_types::{EquipSlot, EquipmentView, InventoryView, ItemCategory, ItemView};

use crate::error::AgentError;

/// Default carried-item capacity.
pub const DEFAULT_CAPACITY: usize = 10;

/// Wood, the lumberjack's material.
pub const WOOD: &str = "Wood";

/// Ore, mined next to walls.
pub const ORE: &str = "Ore";

/// Fiber, foraged on grass.
pub const FIBER: &str = "Fiber";

/// Berries, the only food.
pub const BERRIES: &str = "Berries";

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// An immutable item instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    name: String,
    category: ItemCategory,
    power: u32,
    value: u32,
}

impl Item {
    /// Create an item.
    pub fn new(name: impl Into<String>, category: ItemCategory, power: u32, value: u32) -> Self {
        Self {
            name: name.into(),
            category,
            power,
            value,
        }
    }

    /// A raw material worth nothing.
    pub fn resource(name: &str) -> Self {
        Self::new(name, ItemCategory::Resource, 0, 0)
    }

    /// A food item worth nothing.
    pub fn food(name: &str) -> Self {
        Self::new(name, ItemCategory::Food, 0, 0)
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category.
    pub const fn category(&self) -> ItemCategory {
        self.category
    }

    /// Combat bonus.
    pub const fn power(&self) -> u32 {
        self.power
    }

    /// Trade value in gold.
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Build the serializable view.
    pub fn to_view(&self) -> ItemView {
        ItemView {
            name: self.name.clone(),
            category: self.category,
            power: self.power,
            value: self.value,
        }
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Carried items, gold, and equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    capacity: usize,
    items: Vec<Item>,
    gold: u32,
    hand: Option<Item>,
    body: Option<Item>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Inventory {
    /// An empty inventory with the given carried-item capacity.
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
            gold: 0,
            hand: None,
            body: None,
        }
    }

    /// Carried items, oldest first.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of carried items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is carried.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Carried-item capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether one more item fits.
    pub fn has_room(&self) -> bool {
        self.items.len() < self.capacity
    }

    /// Gold balance.
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    /// Add gold, saturating at `u32::MAX`.
    pub const fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Remove exactly `amount` gold. Returns `false` and changes nothing if
    /// the balance is insufficient.
    pub const fn spend_gold(&mut self, amount: u32) -> bool {
        match self.gold.checked_sub(amount) {
            Some(rest) => {
                self.gold = rest;
                true
            }
            None => false,
        }
    }

    /// Append an item. Returns `false` (dropping the item) when full.
    pub fn add(&mut self, item: Item) -> bool {
        self.try_add(item).is_ok()
    }

    /// Append an item, handing it back when there is no room.
    ///
    /// # Errors
    ///
    /// Returns the rejected item if the pack is full.
    pub fn try_add(&mut self, item: Item) -> Result<(), Item> {
        if self.has_room() {
            self.items.push(item);
            Ok(())
        } else {
            Err(item)
        }
    }

    /// Number of carried items with this name.
    pub fn count(&self, name: &str) -> usize {
        self.items.iter().filter(|i| i.name == name).count()
    }

    /// Whether any carried item is food.
    pub fn has_food(&self) -> bool {
        self.items.iter().any(|i| i.category == ItemCategory::Food)
    }

    /// Remove `count` items named `name`, oldest first. All-or-nothing:
    /// returns `false` and changes nothing if fewer are carried.
    pub fn remove(&mut self, name: &str, count: usize) -> bool {
        if self.count(name) < count {
            return false;
        }
        let mut remaining = count;
        self.items.retain(|item| {
            if remaining > 0 && item.name == name {
                remaining = remaining.saturating_sub(1);
                false
            } else {
                true
            }
        });
        true
    }

    /// Take the oldest carried item of the given category.
    pub fn take_first_of(&mut self, category: ItemCategory) -> Option<Item> {
        let idx = self.items.iter().position(|i| i.category == category)?;
        Some(self.items.remove(idx))
    }

    /// Take the most recently added carried item.
    pub fn pop_newest(&mut self) -> Option<Item> {
        self.items.pop()
    }

    /// The most recently added carried item.
    pub fn newest(&self) -> Option<&Item> {
        self.items.last()
    }

    /// The item in a slot.
    pub const fn equipped(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::Hand => self.hand.as_ref(),
            EquipSlot::Body => self.body.as_ref(),
        }
    }

    /// Whether a slot is empty.
    pub const fn slot_is_empty(&self, slot: EquipSlot) -> bool {
        self.equipped(slot).is_none()
    }

    /// Power of the equipped weapon, 0 when unarmed.
    pub fn weapon_power(&self) -> u32 {
        self.hand.as_ref().map_or(0, Item::power)
    }

    /// Equip an item that is not in the carried list.
    ///
    /// # Errors
    ///
    /// - [`AgentError::NotEquippable`] if the item has no slot.
    /// - [`AgentError::InventoryFull`] if the slot is occupied and the
    ///   displaced item would not fit back in the carried list.
    pub fn equip(&mut self, item: Item) -> Result<(), AgentError> {
        let slot = slot_for(&item)?;
        if !self.slot_is_empty(slot) && !self.has_room() {
            return Err(AgentError::InventoryFull {
                capacity: self.capacity,
            });
        }
        if let Some(previous) = self.slot_mut(slot).replace(item) {
            self.items.push(previous);
        }
        Ok(())
    }

    /// Equip the oldest carried item with the given name.
    ///
    /// # Errors
    ///
    /// - [`AgentError::ItemNotCarried`] if no such item is carried.
    /// - [`AgentError::NotEquippable`] if the item has no slot.
    pub fn equip_carried(&mut self, name: &str) -> Result<(), AgentError> {
        let idx = self
            .items
            .iter()
            .position(|i| i.name == name)
            .ok_or_else(|| AgentError::ItemNotCarried(name.to_owned()))?;
        let slot = self
            .items
            .get(idx)
            .ok_or_else(|| AgentError::ItemNotCarried(name.to_owned()))
            .and_then(slot_for)?;

        let item = self.items.remove(idx);
        if let Some(previous) = self.slot_mut(slot).replace(item) {
            self.items.push(previous);
        }
        Ok(())
    }

    /// Build the serializable view.
    pub fn to_view(&self) -> InventoryView {
        InventoryView {
            items: self.items.iter().map(Item::to_view).collect(),
            gold: self.gold,
            equipment: EquipmentView {
                hand: self.hand.as_ref().map(Item::to_view),
                body: self.body.as_ref().map(Item::to_view),
            },
        }
    }

    const fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Hand => &mut self.hand,
            EquipSlot::Body => &mut self.body,
        }
    }
}

fn slot_for(item: &Item) -> Result<EquipSlot, AgentError> {
    item.category
        .slot()
        .ok_or_else(|| AgentError::NotEquippable {
            name: item.name.clone(),
            category: item.category,
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn spear() -> Item {
        Item::new("Spear", ItemCategory::Weapon, 15, 10)
    }

    fn filled(n: usize) -> Inventory {
        let mut inv = Inventory::default();
        for _ in 0..n {
            assert!(inv.add(Item::resource(WOOD)));
        }
        inv
    }

    #[test]
    fn eleventh_item_is_rejected() {
        let mut inv = filled(10);
        assert!(!inv.add(Item::resource(ORE)));
        assert_eq!(inv.len(), 10);
        assert_eq!(inv.count(ORE), 0);
    }

    #[test]
    fn try_add_hands_back_what_does_not_fit() {
        let mut inv = filled(10);
        let Err(returned) = inv.try_add(spear()) else {
            panic!("a full pack has no room");
        };
        assert_eq!(returned.name(), "Spear");
        assert_eq!(inv.len(), 10);
    }

    #[test]
    fn remove_is_all_or_nothing() {
        let mut inv = filled(2);
        assert!(!inv.remove(WOOD, 3));
        assert_eq!(inv.count(WOOD), 2);
        assert!(inv.remove(WOOD, 2));
        assert!(inv.is_empty());
    }

    #[test]
    fn remove_takes_oldest_matching() {
        let mut inv = Inventory::default();
        assert!(inv.add(Item::resource(WOOD)));
        assert!(inv.add(Item::resource(ORE)));
        assert!(inv.add(Item::resource(WOOD)));
        assert!(inv.remove(WOOD, 1));
        let names: Vec<&str> = inv.items().iter().map(Item::name).collect();
        assert_eq!(names, vec![ORE, WOOD]);
    }

    #[test]
    fn gold_never_goes_negative() {
        let mut inv = Inventory::default();
        inv.add_gold(5);
        assert!(!inv.spend_gold(6));
        assert_eq!(inv.gold(), 5);
        assert!(inv.spend_gold(5));
        assert_eq!(inv.gold(), 0);
    }

    #[test]
    fn equip_carried_moves_item_out_of_list() {
        let mut inv = Inventory::default();
        assert!(inv.add(spear()));
        assert!(inv.equip_carried("Spear").is_ok());
        assert!(inv.is_empty());
        assert_eq!(inv.weapon_power(), 15);
    }

    #[test]
    fn equip_carried_swaps_displaced_item_back() {
        let mut inv = filled(9);
        assert!(inv.equip(Item::new("Club", ItemCategory::Weapon, 10, 5)).is_ok());
        assert!(inv.add(spear()));
        assert_eq!(inv.len(), 10);

        assert!(inv.equip_carried("Spear").is_ok());
        assert_eq!(inv.len(), 10);
        assert_eq!(inv.newest().map(Item::name), Some("Club"));
        assert_eq!(inv.weapon_power(), 15);
    }

    #[test]
    fn equip_from_outside_into_occupied_slot_with_full_list_is_rejected() {
        let mut inv = filled(10);
        assert!(inv.equip(spear()).is_ok());
        let before = inv.clone();

        let result = inv.equip(Item::new("Sword", ItemCategory::Weapon, 30, 50));
        assert!(matches!(result, Err(AgentError::InventoryFull { capacity: 10 })));
        assert_eq!(inv, before);
    }

    #[test]
    fn resources_cannot_be_equipped() {
        let mut inv = filled(1);
        assert!(matches!(
            inv.equip_carried(WOOD),
            Err(AgentError::NotEquippable { .. })
        ));
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn armor_goes_on_body() {
        let mut inv = Inventory::default();
        assert!(inv.equip(Item::new("Tunic", ItemCategory::Armor, 10, 15)).is_ok());
        assert!(inv.slot_is_empty(EquipSlot::Hand));
        assert_eq!(inv.equipped(EquipSlot::Body).map(Item::name), Some("Tunic"));
        assert_eq!(inv.to_view().equipment.body.map(|i| i.value), Some(15));
    }

    #[test]
    fn food_is_taken_oldest_first() {
        let mut inv = Inventory::default();
        assert!(inv.add(Item::resource(WOOD)));
        assert!(inv.add(Item::food(BERRIES)));
        assert!(inv.has_food());
        assert_eq!(inv.take_first_of(ItemCategory::Food).map(|i| i.name), Some(String::from(BERRIES)));
        assert!(!inv.has_food());
        assert_eq!(inv.len(), 1);
    }
}
