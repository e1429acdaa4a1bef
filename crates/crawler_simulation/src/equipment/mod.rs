//! Equipment module: inventory slots and the weapon-equip protocol
//!
//! # Architecture
//!
//! **Events → Systems flow:**
//! - Host emits `SlotClick` (UI) / `Contact` (pickup overlap)
//! - Systems swap the wielder's `Weapon` component
//! - `UiNotification` tells the overlay what to redraw
//!
//! **Slot items:**
//! - Weapon → equip (replace, never merge; descriptor stays in the slot)
//! - Stackable → pop one unit → `ItemConsumed`

use bevy::prelude::*;

pub mod inventory;
pub mod systems;

// Re-exports
pub use inventory::*;
pub use systems::*;

use crate::CombatSet;

/// Equipment plugin
pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ItemConsumed>().add_systems(
            FixedUpdate,
            (
                process_slot_clicks.in_set(CombatSet::Input),
                pickup_weapons.in_set(CombatSet::Loot),
            ),
        );
    }
}
