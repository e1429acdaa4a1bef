//! Spawn helpers (arena population)
//!
//! Level loading is the host's job; these helpers build the ECS side of each
//! actor from `CombatConfig` so the runner and tests create identical bodies.

use std::time::Duration;

use bevy::prelude::*;

use crate::ai::EnemyBrain;
use crate::bridge::{ActorSounds, CueAllocator};
use crate::combat::{EnemyContact, Weapon};
use crate::components::{
    Actor, Aim, ArenaEntity, BodyCategory, BodyRadius, Destructible, Enemy, Facing, Health, MovementTuning, Player,
    Position, Reticle,
};
use crate::config::{CombatConfig, EnemyConfig, WeaponConfig};
use crate::equipment::{Inventory, SlotItem, WeaponPickup};
use crate::loot::LootDrop;
use crate::tasks::{ScheduledTasks, TaskKind};

fn combat_config(world: &World) -> CombatConfig {
    world.get_resource::<CombatConfig>().cloned().unwrap_or_default()
}

fn allocate_sounds(world: &mut World) -> ActorSounds {
    let mut allocator = world.get_resource_or_insert_with(CueAllocator::default);
    ActorSounds::allocate(&mut allocator)
}

pub fn spawn_reticle(world: &mut World, position: Vec2) -> Entity {
    world.spawn((Reticle, Position(position))).id()
}

/// Player with a popper in hand (also stored in slot 0) aiming at `reticle`
pub fn spawn_player(world: &mut World, position: Vec2, reticle: Entity) -> Entity {
    let config = combat_config(world);
    let sounds = allocate_sounds(world);
    let fire_cue = world.get_resource_or_insert_with(CueAllocator::default).allocate();

    let popper = config.weapon("popper").cloned().unwrap_or_else(WeaponConfig::popper);
    let mut inventory = Inventory::default();
    inventory.store(SlotItem::Weapon { config: popper.clone() });

    let player = world
        .spawn((
            Actor::named("player"),
            Player,
            Health::new(config.player.health),
            Position(position),
            MovementTuning {
                speed: config.player.speed,
                max_speed: config.player.speed,
                velocity_increment: 0.0,
                mass: 1.0,
                drag: 0.0,
            },
            BodyRadius(config.player.body_radius),
            Facing::default(),
            BodyCategory::Player,
            sounds,
            Aim { reticle },
            inventory,
            Weapon::new(popper, Some(reticle), fire_cue),
        ))
        .id();

    crate::logger::log(&format!("🧍 Player spawned at {:?} ({:?})", position, player));
    player
}

/// Sensing enemy (ogre by default). Starts sensing after the activation delay.
pub fn spawn_enemy(world: &mut World, config: &EnemyConfig, position: Vec2) -> Entity {
    let sounds = allocate_sounds(world);

    let mut tasks = ScheduledTasks::default();
    tasks.schedule_once(TaskKind::Activate, Duration::from_millis(config.activation_delay_ms));

    let enemy = world
        .spawn((
            Actor::named(config.name.clone()),
            Enemy,
            Health::new(config.health),
            Position(position),
            MovementTuning {
                speed: config.speed,
                max_speed: config.max_speed,
                velocity_increment: config.velocity_increment,
                mass: config.mass,
                drag: config.drag,
            },
            BodyRadius(config.body_radius),
            Facing::default(),
            BodyCategory::Enemy,
            EnemyBrain::new(config.sense_range, Duration::from_millis(config.update_speed_ms)),
            LootDrop {
                min_coins: config.min_coins,
                max_coins: config.max_coins,
            },
            EnemyContact::new(config.damage, Duration::from_millis(config.contact_interval_ms)),
            sounds,
            tasks,
        ))
        .id();

    crate::logger::log(&format!("👹 {} spawned at {:?} ({:?})", config.name, position, enemy));
    enemy
}

pub fn spawn_wall(world: &mut World, position: Vec2) -> Entity {
    world.spawn((Position(position), BodyCategory::Wall, ArenaEntity)).id()
}

pub fn spawn_destructible(world: &mut World, position: Vec2, health: u32) -> Entity {
    world
        .spawn((Destructible, Health::new(health), Position(position), BodyCategory::Destructible))
        .id()
}

pub fn spawn_weapon_pickup(world: &mut World, position: Vec2, config: WeaponConfig) -> Entity {
    world
        .spawn((WeaponPickup { config }, Position(position), BodyCategory::Pickup))
        .id()
}
