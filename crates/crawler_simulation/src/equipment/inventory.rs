//! Inventory / slot components
//!
//! Slots hold descriptors, never live objects: a weapon slot keeps its
//! `WeaponConfig` and every equip builds a fresh `Weapon` from it.

use bevy::prelude::*;

use crate::bridge::CueHandle;
use crate::combat::Weapon;
use crate::config::WeaponConfig;

#[derive(Debug, Clone, PartialEq)]
pub enum SlotItem {
    /// Equippable; the slot is not consumed by equipping
    Weapon { config: WeaponConfig },
    /// Consumable units, popped one at a time
    Stackable { name: String, count: u32 },
}

impl SlotItem {
    pub fn name(&self) -> &str {
        match self {
            SlotItem::Weapon { config } => &config.name,
            SlotItem::Stackable { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventorySlot {
    pub index: usize,
    pub item: Option<SlotItem>,
}

impl InventorySlot {
    /// Authoritative emptiness: no item, or a stack with zero units
    pub fn is_empty(&self) -> bool {
        match &self.item {
            None => true,
            Some(SlotItem::Stackable { count, .. }) => *count == 0,
            Some(SlotItem::Weapon { .. }) => false,
        }
    }
}

/// Player inventory (fixed number of slots)
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Inventory {
    pub slots: Vec<InventorySlot>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_slots(Self::DEFAULT_SLOTS)
    }
}

impl Inventory {
    pub const DEFAULT_SLOTS: usize = 8;

    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: (0..count).map(|index| InventorySlot { index, item: None }).collect(),
        }
    }

    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.slots.get(index)
    }

    /// Put an item into the inventory.
    ///
    /// Stackables merge into a slot holding the same name; anything else takes
    /// the first empty slot. Returns the slot index, or None when full.
    pub fn store(&mut self, item: SlotItem) -> Option<usize> {
        if let SlotItem::Stackable { name, count } = &item {
            let existing = self.slots.iter_mut().find(|slot| {
                matches!(&slot.item, Some(SlotItem::Stackable { name: held, .. }) if held == name)
            });
            if let Some(slot) = existing {
                if let Some(SlotItem::Stackable { count: held, .. }) = &mut slot.item {
                    *held = held.saturating_add(*count);
                }
                return Some(slot.index);
            }
        }

        let slot = self.slots.iter_mut().find(|slot| slot.is_empty())?;
        slot.item = Some(item);
        Some(slot.index)
    }

    /// Build a live weapon from a weapon slot (the descriptor stays in place)
    pub fn instantiate(&self, index: usize, target: Option<Entity>, fire_cue: CueHandle) -> Option<Weapon> {
        match &self.slot(index)?.item {
            Some(SlotItem::Weapon { config }) => Some(Weapon::new(config.clone(), target, fire_cue)),
            _ => None,
        }
    }

    /// Take one unit out of a stackable slot. Returns the unit's name.
    ///
    /// The last unit empties the slot.
    pub fn pop(&mut self, index: usize) -> Option<String> {
        let slot = self.slots.get_mut(index)?;
        let Some(SlotItem::Stackable { name, count }) = &mut slot.item else {
            return None;
        };

        if *count == 0 {
            return None;
        }

        *count -= 1;
        let name = name.clone();
        if *count == 0 {
            slot.item = None;
        }

        Some(name)
    }
}

/// World item: touching it hands the player its weapon (when not already held)
#[derive(Component, Debug, Clone)]
#[require(crate::components::Position, crate::components::ArenaEntity)]
pub struct WeaponPickup {
    pub config: WeaponConfig,
}
