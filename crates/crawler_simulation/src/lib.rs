//! Club Crawler Simulation Core
//!
//! ECS-симуляция боя на Bevy 0.16 (headless)
//!
//! HYBRID ARCHITECTURE:
//! - ECS = game state + combat rules (health, weapons, death, loot, sensing)
//! - Host = rendering, audio playback, collision detection, input devices
//!
//! Граница проходит через события (`bridge`): хост шлёт intents и contacts,
//! симуляция отвечает audio/visual/UI командами.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod bridge;
pub mod combat;
pub mod components;
pub mod config;
pub mod equipment;
pub mod geometry;
pub mod logger;
pub mod loot;
pub mod signals;
pub mod spawn;
pub mod tasks;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, BehaviorState, EnemyBrain, EnemySensed, Sensable, Sensation};
pub use bridge::BridgePlugin;
pub use combat::{ActorDied, CombatPlugin, DamageDealt, DeathTriggered, Projectile, Weapon, WeaponFired};
pub use components::*;
pub use config::{CombatConfig, ConfigError, EnemyConfig, WeaponConfig};
pub use equipment::{EquipmentPlugin, Inventory, ItemConsumed, SlotItem, WeaponPickup};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use loot::{Coin, LootDrop, LootPlugin};
pub use signals::{GameSignal, GameStats, SignalBus, SignalKind, SignalPlugin};
pub use tasks::{ScheduledTasks, TaskFired, TaskKind};

/// Порядок одного simulation tick (FixedUpdate), всегда в этой последовательности
///
/// Timers идут до per-entity систем: таймер, созревший в этом шаге,
/// виден всем остальным системам того же шага.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Input,
    Timers,
    Sense,
    Motion,
    Weapons,
    Projectiles,
    Contacts,
    Lifecycle,
    Loot,
    Signals,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                CombatSet::Input,
                CombatSet::Timers,
                CombatSet::Sense,
                CombatSet::Motion,
                CombatSet::Weapons,
                CombatSet::Projectiles,
                CombatSet::Contacts,
                CombatSet::Lifecycle,
                CombatSet::Loot,
                CombatSet::Signals,
            )
                .chain(),
        );

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<CombatConfig>()
            .add_event::<TaskFired>()
            .add_systems(FixedUpdate, tasks::tick_scheduled_tasks.in_set(CombatSet::Timers))
            // Подсистемы
            .add_plugins((BridgePlugin, SignalPlugin, AIPlugin, CombatPlugin, LootPlugin, EquipmentPlugin));

        // Seed по умолчанию, если хост не вставил свой
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сериализуются через Debug в порядке Entity index.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
