//! Projectile components
//!
//! A projectile is owned by the arena, not by the weapon: replacing or
//! dropping the weapon leaves shots in flight untouched. Its own `Expire`
//! task (in `ScheduledTasks`) is the hard despawn deadline.

use std::collections::HashMap;
use std::time::Duration;

use bevy::prelude::*;

use crate::combat::collision::CollisionCategories;
use crate::combat::DamageDealer;
use crate::components::{ArenaEntity, Position, Velocity};
use crate::config::{GrowthRamp, WeaponConfig};
use crate::tasks::ScheduledTasks;

#[derive(Component, Debug, Clone)]
#[require(Position, Velocity, ScheduledTasks, ArenaEntity)]
pub struct Projectile {
    /// Wielder that fired it (self-hits are ignored)
    pub owner: Entity,
    pub weapon: String,
    pub damage: u32,
    pub categories: CollisionCategories,
    pub destroy_on_wall_touch: bool,
    /// Stopped by a wall; stays until it expires
    pub stopped: bool,
}

impl Projectile {
    pub fn from_weapon(owner: Entity, config: &WeaponConfig) -> Self {
        Self {
            owner,
            weapon: config.name.clone(),
            damage: config.damage,
            categories: config.categories,
            destroy_on_wall_touch: config.destroy_on_wall_touch,
            stopped: false,
        }
    }
}

impl DamageDealer for Projectile {
    fn damage(&self) -> u32 {
        self.damage
    }
}

/// Per-target re-trigger throttle for repeated contacts
///
/// Used by overlap projectiles (flame over an enemy) and by enemy contact
/// damage. The first contact with a target always triggers.
#[derive(Component, Debug, Clone, Default)]
pub struct OverlapRetrigger {
    pub interval: Duration,
    last: HashMap<Entity, Duration>,
}

impl OverlapRetrigger {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: HashMap::new(),
        }
    }

    pub fn try_trigger(&mut self, target: Entity, now: Duration) -> bool {
        if let Some(last) = self.last.get(&target) {
            if now.saturating_sub(*last) < self.interval {
                return false;
            }
        }

        self.last.insert(target, now);
        true
    }

    /// Drops a target that died (despawned or inert)
    pub fn forget(&mut self, target: Entity) {
        self.last.remove(&target);
    }

    pub fn tracks(&self, target: Entity) -> bool {
        self.last.contains_key(&target)
    }
}

/// Cosmetic scale/alpha ramp (flame). Never touches collision state.
#[derive(Component, Debug, Clone, Copy)]
pub struct FlameGrowth {
    pub ramp: GrowthRamp,
    /// Half of the projectile duration
    pub ramp_duration: Duration,
    pub elapsed: Duration,
}

impl FlameGrowth {
    pub fn new(ramp: GrowthRamp, projectile_duration: Duration) -> Self {
        Self {
            ramp,
            ramp_duration: projectile_duration / 2,
            elapsed: Duration::ZERO,
        }
    }

    pub fn progress(&self) -> f32 {
        if self.ramp_duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.ramp_duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// (scale, alpha) at the current progress. Alpha starts fully opaque and
    /// fades to half once the ramp is past its midpoint; clamped to [0, 1].
    pub fn sample(&self) -> (Vec2, f32) {
        let progress = self.progress();
        let value = self.ramp.from + (self.ramp.to - self.ramp.from) * progress;
        let scale = Vec2::new(value * self.ramp.x_ratio, value);
        let alpha = (1.5 - progress).clamp(0.0, 1.0);
        (scale, alpha)
    }
}
