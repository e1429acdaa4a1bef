//! Combat module: weapons, projectiles, damage, death
//!
//! ECS ответственность:
//! - Game state: Health, Lifecycle, Weapon fire gate, projectile lifetime
//! - Combat rules: category policy (hit / overlap / ignore), damage, death sequence
//! - Events: WeaponFired, DamageDealt, DeathTriggered, ActorDied
//!
//! Host ответственность:
//! - Collision detection → `Contact` events
//! - Sprites, sounds → reads `VisualCommand` / `AudioCommand`

use bevy::prelude::*;

pub mod collision;
pub mod components;
pub mod damage;
pub mod systems;

pub use collision::{CategoryMask, CollisionCategories, ContactPolicy};
pub use components::{DeferredCueRelease, EnemyContact, FlameGrowth, OverlapRetrigger, Projectile, Weapon, WeaponRelease};
pub use damage::{DamageDealer, DamageDealt, DamageOutcome, Damageable, DeathTriggered};
pub use systems::{spawn_projectile, ActorDied, WeaponFired};

use crate::CombatSet;

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. Weapons — fire gate → spawn projectiles
/// 2. Projectiles — expiry, flame growth (cosmetic)
/// 3. Contacts — category policy → damage → death mark (same step)
/// 4. Lifecycle — death sequence, re-trigger cleanup, deferred cue release, arena teardown
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponFired>()
            .add_event::<DamageDealt>()
            .add_event::<DeathTriggered>()
            .add_event::<ActorDied>();

        app.add_systems(
            FixedUpdate,
            (
                systems::fire_weapons.in_set(CombatSet::Weapons),
                (systems::expire_projectiles, systems::animate_flame_growth)
                    .chain()
                    .in_set(CombatSet::Projectiles),
                systems::resolve_contacts.in_set(CombatSet::Contacts),
                (
                    systems::run_death_sequences,
                    systems::forget_dead_targets,
                    systems::release_deferred_cues,
                    systems::teardown_arena,
                )
                    .chain()
                    .in_set(CombatSet::Lifecycle),
            ),
        );
    }
}
