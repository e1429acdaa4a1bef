//! Weapon: live instance on the wielder entity
//!
//! Inventory slots store `WeaponConfig` descriptors; equip creates a fresh
//! `Weapon` from one. The component sits on the wielder, so the wielder
//! back-reference is the owning entity itself.

use std::time::Duration;

use bevy::prelude::*;

use crate::bridge::CueHandle;
use crate::combat::DamageDealer;
use crate::config::WeaponConfig;

#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub config: WeaponConfig,
    /// Aim point (reticle), back-reference only
    pub target: Option<Entity>,
    /// Weapon's own voice; released when the weapon is replaced
    pub fire_cue: CueHandle,
    /// Game time of the last shot, written only by `fire`
    last_fired: Option<Duration>,
}

impl Weapon {
    pub fn new(config: WeaponConfig, target: Option<Entity>, fire_cue: CueHandle) -> Self {
        Self {
            config,
            target,
            fire_cue,
            last_fired: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn last_fired(&self) -> Option<Duration> {
        self.last_fired
    }

    /// Fire-rate gate. Returns true when a projectile must be spawned now.
    ///
    /// Passes when no shot was fired yet or `now - last_fired >= fire_rate`;
    /// on pass `last_fired = now`. Callers may call this every step.
    pub fn fire(&mut self, now: Duration) -> bool {
        if let Some(last) = self.last_fired {
            if now.saturating_sub(last) < self.config.fire_rate() {
                return false;
            }
        }

        self.last_fired = Some(now);
        true
    }

    /// Ownership transfer on replacement: consumes the weapon and hands back
    /// the resources the new owner must release.
    pub fn release(self) -> WeaponRelease {
        WeaponRelease {
            name: self.config.name,
            fire_cue: self.fire_cue,
        }
    }
}

impl DamageDealer for Weapon {
    fn damage(&self) -> u32 {
        self.config.damage
    }
}

/// What a replaced weapon leaves behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponRelease {
    pub name: String,
    pub fire_cue: CueHandle,
}
