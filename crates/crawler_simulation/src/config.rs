//! Combat configuration
//!
//! Every tunable entity has an explicit struct with named defaults. Configs are
//! plain serde structs so they can be loaded from RON (`CombatConfig::from_ron_str`);
//! unknown keys are rejected and missing keys fall back to the defaults below.
//! `validate()` rejects values the simulation cannot run with.

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::collision::{CategoryMask, CollisionCategories};

/// Ошибки конфигурации (единственная fallible поверхность симуляции)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse combat config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("min_coins + max_coins overflows ({min_coins} + {max_coins})")]
    LootOverflow { min_coins: u32, max_coins: u32 },

    #[error("duplicate weapon name in catalog: {0}")]
    DuplicateWeapon(String),
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ConfigError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

fn check_name(field: &'static str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Empty { field });
    }
    Ok(())
}

const MAX_SPEED: f64 = 10_000.0;
const MAX_MILLIS: f64 = 600_000.0;

// ============================================================================
// Weapon
// ============================================================================

/// Cosmetic scale/alpha ramp of a flame projectile.
///
/// Runs over the first half of the projectile duration. Purely visual, the
/// collision footprint is owned by the world layer and never scaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default, deny_unknown_fields)]
pub struct GrowthRamp {
    pub from: f32,
    pub to: f32,
    /// Horizontal scale = vertical scale × x_ratio
    pub x_ratio: f32,
}

impl Default for GrowthRamp {
    fn default() -> Self {
        Self {
            from: 0.7,
            to: 2.2,
            x_ratio: 0.7,
        }
    }
}

/// Projectile variant spawned by a weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub enum ProjectileKind {
    /// Spinning bullet (spin is presentation-only)
    Bullet { spin_deg_per_sec: f32 },
    /// Continuous stream segment with a growth ramp
    Flame(GrowthRamp),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeaponConfig {
    pub name: String,
    /// Damage per hit (or per overlap re-trigger)
    pub damage: u32,
    /// Minimum milliseconds between two shots
    pub fire_rate_ms: u64,
    pub projectile_velocity: f32,
    /// Hard despawn deadline of each projectile (ms)
    pub duration_ms: u64,
    /// Distance added to the wielder radius when placing the projectile
    pub spawn_clearance: f32,
    /// Minimum ms between two overlap damage ticks on the same target
    pub overlap_retrigger_ms: u64,
    pub categories: CollisionCategories,
    /// hit_walls: true → destroy on wall contact instead of stopping
    pub destroy_on_wall_touch: bool,
    pub projectile: ProjectileKind,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self::popper()
    }
}

impl WeaponConfig {
    /// Basic bullet gun
    pub fn popper() -> Self {
        Self {
            name: "popper".to_string(),
            damage: 10,
            fire_rate_ms: 250,
            projectile_velocity: 800.0,
            duration_ms: 1000,
            spawn_clearance: 40.0,
            overlap_retrigger_ms: 100,
            categories: CollisionCategories {
                hits: CategoryMask::WALLS | CategoryMask::ENEMIES | CategoryMask::DESTRUCTIBLES,
                overlaps: CategoryMask::NONE,
            },
            destroy_on_wall_touch: true,
            projectile: ProjectileKind::Bullet {
                spin_deg_per_sec: 2000.0,
            },
        }
    }

    /// Flamethrower: tiny damage, very high rate, passes through enemies
    pub fn flamethrower() -> Self {
        Self {
            name: "flamethrower".to_string(),
            damage: 1, // overlaps re-trigger a lot
            fire_rate_ms: 75,
            projectile_velocity: 700.0,
            duration_ms: 800,
            spawn_clearance: 40.0,
            overlap_retrigger_ms: 100,
            categories: CollisionCategories {
                hits: CategoryMask::WALLS,
                overlaps: CategoryMask::ENEMIES | CategoryMask::DESTRUCTIBLES | CategoryMask::PLAYER,
            },
            destroy_on_wall_touch: false,
            projectile: ProjectileKind::Flame(GrowthRamp::default()),
        }
    }

    pub fn fire_rate(&self) -> Duration {
        Duration::from_millis(self.fire_rate_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        check_name("weapon.name", &self.name)?;
        check_range("weapon.fire_rate_ms", self.fire_rate_ms as f64, 1.0, MAX_MILLIS)?;
        check_range("weapon.duration_ms", self.duration_ms as f64, 1.0, MAX_MILLIS)?;
        check_range("weapon.projectile_velocity", self.projectile_velocity as f64, 0.0, MAX_SPEED)?;
        check_range("weapon.spawn_clearance", self.spawn_clearance as f64, 0.0, 1_000.0)?;
        check_range("weapon.overlap_retrigger_ms", self.overlap_retrigger_ms as f64, 1.0, MAX_MILLIS)?;

        if let ProjectileKind::Flame(ramp) = self.projectile {
            check_range("weapon.growth.from", ramp.from as f64, 0.01, 100.0)?;
            check_range("weapon.growth.to", ramp.to as f64, 0.01, 100.0)?;
            check_range("weapon.growth.x_ratio", ramp.x_ratio as f64, 0.01, 100.0)?;
        }

        Ok(self)
    }
}

// ============================================================================
// Enemy
// ============================================================================

/// Enemy stats (ogre defaults)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnemyConfig {
    pub name: String,
    pub health: u32,
    /// Base wandering speed
    pub speed: f32,
    pub max_speed: f32,
    /// Sense polling interval (ms)
    pub update_speed_ms: u64,
    /// Velocity added per poll when chasing
    pub velocity_increment: f32,
    pub mass: f32,
    pub drag: f32,
    /// Loot count is drawn from [min_coins, min_coins + max_coins)
    pub min_coins: u32,
    pub max_coins: u32,
    pub sense_range: f32,
    /// Contact damage dealt to the player
    pub damage: u32,
    /// Delay between spawn and the first sense poll (ms)
    pub activation_delay_ms: u64,
    /// Minimum ms between two contact damage ticks on the player
    pub contact_interval_ms: u64,
    pub body_radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self::ogre()
    }
}

impl EnemyConfig {
    pub fn ogre() -> Self {
        Self {
            name: "Ogre".to_string(),
            health: 300,
            speed: 100.0,
            max_speed: 500.0,
            update_speed_ms: 500,
            velocity_increment: 400.0,
            mass: 5.0,
            drag: 50.0,
            min_coins: 5,
            max_coins: 10,
            sense_range: 800.0,
            damage: 5,
            activation_delay_ms: 100,
            contact_interval_ms: 500,
            body_radius: 24.0,
        }
    }

    /// Radius under which the enemy switches to the attacking sub-state
    pub fn attack_range(&self) -> f32 {
        self.sense_range * 2.0 / 3.0
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        check_name("enemy.name", &self.name)?;
        check_range("enemy.health", self.health as f64, 1.0, 1_000_000.0)?;
        check_range("enemy.speed", self.speed as f64, 0.0, MAX_SPEED)?;
        check_range("enemy.max_speed", self.max_speed as f64, 0.0, MAX_SPEED)?;
        check_range("enemy.update_speed_ms", self.update_speed_ms as f64, 1.0, MAX_MILLIS)?;
        check_range("enemy.velocity_increment", self.velocity_increment as f64, 0.0, MAX_SPEED)?;
        check_range("enemy.mass", self.mass as f64, 0.0, 1_000.0)?;
        check_range("enemy.drag", self.drag as f64, 0.0, MAX_SPEED)?;
        check_range("enemy.sense_range", self.sense_range as f64, 0.001, 100_000.0)?;
        check_range("enemy.max_coins", self.max_coins as f64, 1.0, 1_000.0)?;
        check_range("enemy.activation_delay_ms", self.activation_delay_ms as f64, 0.0, MAX_MILLIS)?;
        check_range("enemy.contact_interval_ms", self.contact_interval_ms as f64, 1.0, MAX_MILLIS)?;
        check_range("enemy.body_radius", self.body_radius as f64, 0.0, 1_000.0)?;

        if self.min_coins.checked_add(self.max_coins).is_none() {
            return Err(ConfigError::LootOverflow {
                min_coins: self.min_coins,
                max_coins: self.max_coins,
            });
        }

        Ok(self)
    }
}

// ============================================================================
// Player / loot / lifecycle
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub health: u32,
    pub speed: f32,
    pub body_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            health: 100,
            speed: 300.0,
            body_radius: 16.0,
        }
    }
}

impl PlayerConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        check_range("player.health", self.health as f64, 1.0, 1_000_000.0)?;
        check_range("player.speed", self.speed as f64, 0.0, MAX_SPEED)?;
        check_range("player.body_radius", self.body_radius as f64, 0.0, 1_000.0)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoinConfig {
    pub value: u32,
    /// Loot scatter: each velocity axis is drawn from [-scatter, scatter)
    pub scatter_speed: f32,
    pub drag: f32,
    /// Collected coin spins this long before despawning (ms)
    pub fade_ms: u64,
    pub spin_rate: f32,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            value: 1,
            scatter_speed: 50.0,
            drag: 10.0,
            fade_ms: 500,
            spin_rate: 4000.0,
        }
    }
}

impl CoinConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        check_range("coin.value", self.value as f64, 1.0, 1_000_000.0)?;
        check_range("coin.scatter_speed", self.scatter_speed as f64, 0.001, MAX_SPEED)?;
        check_range("coin.drag", self.drag as f64, 0.0, MAX_SPEED)?;
        check_range("coin.fade_ms", self.fade_ms as f64, 1.0, MAX_MILLIS)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecycleConfig {
    /// Death cue gets this long to finish before the actor's cues are released (ms)
    pub cue_release_delay_ms: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            cue_release_delay_ms: 6000,
        }
    }
}

impl LifecycleConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        check_range("lifecycle.cue_release_delay_ms", self.cue_release_delay_ms as f64, 0.0, MAX_MILLIS)?;
        Ok(self)
    }
}

// ============================================================================
// CombatConfig (Resource)
// ============================================================================

/// All combat tuning in one resource
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CombatConfig {
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub coin: CoinConfig,
    pub lifecycle: LifecycleConfig,
    /// Weapon catalog (pickups, inventory slots)
    pub weapons: Vec<WeaponConfig>,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            coin: CoinConfig::default(),
            lifecycle: LifecycleConfig::default(),
            weapons: vec![WeaponConfig::popper(), WeaponConfig::flamethrower()],
        }
    }
}

impl CombatConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: CombatConfig = ron::from_str(source)?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        let mut weapons = Vec::with_capacity(self.weapons.len());
        for weapon in self.weapons {
            if weapons.iter().any(|w: &WeaponConfig| w.name == weapon.name) {
                return Err(ConfigError::DuplicateWeapon(weapon.name));
            }
            weapons.push(weapon.validate()?);
        }

        Ok(Self {
            player: self.player.validate()?,
            enemy: self.enemy.validate()?,
            coin: self.coin.validate()?,
            lifecycle: self.lifecycle.validate()?,
            weapons,
        })
    }

    pub fn weapon(&self, name: &str) -> Option<&WeaponConfig> {
        self.weapons.iter().find(|w| w.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CombatConfig::default().validate().is_ok());
        assert!(WeaponConfig::flamethrower().validate().is_ok());
        assert!(WeaponConfig::popper().validate().is_ok());
    }

    #[test]
    fn test_ogre_defaults() {
        let ogre = EnemyConfig::ogre();
        assert_eq!(ogre.health, 300);
        assert_eq!(ogre.sense_range, 800.0);
        assert_eq!(ogre.min_coins, 5);
        assert_eq!(ogre.max_coins, 10);
        assert!((ogre.attack_range() - 533.333).abs() < 0.01);
    }

    #[test]
    fn test_partial_ron_keeps_defaults() {
        let config = CombatConfig::from_ron_str("(enemy: (sense_range: 600.0))").expect("valid config");
        assert_eq!(config.enemy.sense_range, 600.0);
        assert_eq!(config.enemy.health, 300);
        assert_eq!(config.weapons.len(), 2);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = CombatConfig::from_ron_str("(enemy: (sense_rnage: 600.0))");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_fire_rate_rejected() {
        let mut weapon = WeaponConfig::popper();
        weapon.fire_rate_ms = 0;
        assert!(matches!(
            weapon.validate(),
            Err(ConfigError::OutOfRange { field: "weapon.fire_rate_ms", .. })
        ));
    }

    #[test]
    fn test_empty_loot_range_rejected() {
        let mut ogre = EnemyConfig::ogre();
        ogre.max_coins = 0;
        assert!(ogre.validate().is_err());

        let mut ogre = EnemyConfig::ogre();
        ogre.min_coins = u32::MAX;
        assert!(matches!(ogre.validate(), Err(ConfigError::LootOverflow { .. })));
    }

    #[test]
    fn test_duplicate_weapon_rejected() {
        let mut config = CombatConfig::default();
        config.weapons.push(WeaponConfig::popper());
        assert!(matches!(config.validate(), Err(ConfigError::DuplicateWeapon(name)) if name == "popper"));
    }
}
