//! Equipment system implementations
//!
//! # Systems
//!
//! - `process_slot_clicks` — slot click → equip weapon / consume one stackable unit
//! - `pickup_weapons` — player touches a `WeaponPickup` → equip its weapon
//!
//! Equip is always a replace: the previous weapon is consumed via
//! `Weapon::release` and its fire cue is stopped and released before the new
//! weapon is inserted. Clicking the weapon already held is a no-op.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::bridge::{AudioCommand, Contact, CueAllocator, SlotClick, UiNotification};
use crate::combat::Weapon;
use crate::components::{Aim, Lifecycle, Player};
use crate::config::WeaponConfig;
use crate::equipment::inventory::{Inventory, SlotItem, WeaponPickup};
use crate::logger::{log, log_warning};

/// Событие: один unit stackable предмета израсходован
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ItemConsumed {
    pub owner: Entity,
    pub item: String,
}

/// Weapons equipped earlier in this step (commands are not applied yet)
type PendingWeapons = HashMap<Entity, Weapon>;

fn held_name<'a>(owner: Entity, current: Option<&'a Weapon>, pending: &'a PendingWeapons) -> Option<&'a str> {
    pending.get(&owner).or(current).map(Weapon::name)
}

/// Swap in `weapon`, releasing whatever the owner held before
fn equip(
    commands: &mut Commands,
    owner: Entity,
    previous: Option<Weapon>,
    weapon: Weapon,
    pending: &mut PendingWeapons,
    audio: &mut EventWriter<AudioCommand>,
    ui: &mut EventWriter<UiNotification>,
) {
    if let Some(previous) = previous {
        let released = previous.release();
        audio.write(AudioCommand::StopAndRelease {
            handle: released.fire_cue,
        });
        log(&format!("🔁 {:?}: {} released", owner, released.name));
    }

    let name = weapon.name().to_string();
    commands.entity(owner).insert(weapon.clone());
    pending.insert(owner, weapon);

    ui.write(UiNotification::WeaponChanged {
        wielder: owner,
        weapon: name.clone(),
    });
    log(&format!("✅ {:?} equipped {}", owner, name));
}

/// System: SlotClick → equip weapon or consume one unit
pub fn process_slot_clicks(
    mut commands: Commands,
    mut clicks: EventReader<SlotClick>,
    mut owners: Query<(&mut Inventory, Option<&Weapon>, Option<&Aim>, &Lifecycle)>,
    mut allocator: ResMut<CueAllocator>,
    mut audio: EventWriter<AudioCommand>,
    mut ui: EventWriter<UiNotification>,
    mut consumed: EventWriter<ItemConsumed>,
) {
    let mut pending = PendingWeapons::new();

    for click in clicks.read() {
        let Ok((mut inventory, current, aim, lifecycle)) = owners.get_mut(click.owner) else {
            log_warning(&format!("⚠️ SlotClick for {:?} ignored: no inventory", click.owner));
            continue;
        };

        if lifecycle.is_dead() {
            continue;
        }

        let Some(slot) = inventory.slot(click.slot_index) else {
            log_warning(&format!(
                "⚠️ SlotClick for {:?} ignored: invalid slot {}",
                click.owner, click.slot_index
            ));
            continue;
        };

        if slot.is_empty() {
            continue;
        }

        let weapon_name = match &slot.item {
            Some(SlotItem::Weapon { config }) => Some(config.name.clone()),
            _ => None,
        };

        match weapon_name {
            Some(name) => {
                if held_name(click.owner, current, &pending) == Some(name.as_str()) {
                    continue;
                }

                let target = aim.map(|aim| aim.reticle);
                let Some(weapon) = inventory.instantiate(click.slot_index, target, allocator.allocate()) else {
                    continue;
                };

                let previous = pending.remove(&click.owner).or_else(|| current.cloned());
                equip(
                    &mut commands,
                    click.owner,
                    previous,
                    weapon,
                    &mut pending,
                    &mut audio,
                    &mut ui,
                );
            }
            None => {
                let Some(item) = inventory.pop(click.slot_index) else {
                    continue;
                };

                log(&format!("🧪 {:?} used {}", click.owner, item));
                consumed.write(ItemConsumed {
                    owner: click.owner,
                    item,
                });
                ui.write(UiNotification::InventoryChanged { owner: click.owner });
            }
        }
    }
}

/// Player overlaps a weapon pickup → equip when the held weapon differs.
/// The pickup stays in the world.
pub fn pickup_weapons(
    mut commands: Commands,
    mut contacts: EventReader<Contact>,
    pickups: Query<&WeaponPickup>,
    players: Query<(Option<&Weapon>, Option<&Aim>, &Lifecycle), With<Player>>,
    mut allocator: ResMut<CueAllocator>,
    mut audio: EventWriter<AudioCommand>,
    mut ui: EventWriter<UiNotification>,
) {
    let mut pending = PendingWeapons::new();

    for contact in contacts.read() {
        let (pickup, player) = if pickups.contains(contact.a) {
            (contact.a, contact.b)
        } else if pickups.contains(contact.b) {
            (contact.b, contact.a)
        } else {
            continue;
        };

        let (Ok(pickup), Ok((current, aim, lifecycle))) = (pickups.get(pickup), players.get(player)) else {
            continue;
        };

        if lifecycle.is_dead() {
            continue;
        }

        let config: &WeaponConfig = &pickup.config;
        if held_name(player, current, &pending) == Some(config.name.as_str()) {
            continue;
        }

        let weapon = Weapon::new(config.clone(), aim.map(|aim| aim.reticle), allocator.allocate());
        let previous = pending.remove(&player).or_else(|| current.cloned());
        equip(&mut commands, player, previous, weapon, &mut pending, &mut audio, &mut ui);
    }
}
