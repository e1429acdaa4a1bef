//! World компоненты: позиция, кинематика, категории тел
//!
//! 2D top-down, +x вправо, +y вниз (экранные координаты хоста).

use bevy::prelude::*;

use crate::combat::collision::CategoryMask;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Position(pub Vec2);

/// Units per second
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);

/// Movement tuning (не физически точно: drag линейный, mass только для хоста)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementTuning {
    pub speed: f32,
    pub max_speed: f32,
    pub velocity_increment: f32,
    pub mass: f32,
    /// Speed lost per second while no action pushes the body
    pub drag: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            speed: 100.0,
            max_speed: 500.0,
            velocity_increment: 400.0,
            mass: 1.0,
            drag: 0.0,
        }
    }
}

/// Radius of the body footprint. Used only to place projectiles outside it.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BodyRadius(pub f32);

/// Sprite facing, derived from the horizontal velocity sign
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Facing {
    pub flip_x: bool,
}

/// What the world layer registered this body as
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum BodyCategory {
    Wall,
    Enemy,
    Destructible,
    Player,
    Projectile,
    Loot,
    Pickup,
}

impl BodyCategory {
    /// Mask used by projectile category flags. Projectiles, loot and pickups
    /// are never projectile targets.
    pub fn mask(&self) -> CategoryMask {
        match self {
            BodyCategory::Wall => CategoryMask::WALLS,
            BodyCategory::Enemy => CategoryMask::ENEMIES,
            BodyCategory::Destructible => CategoryMask::DESTRUCTIBLES,
            BodyCategory::Player => CategoryMask::PLAYER,
            BodyCategory::Projectile | BodyCategory::Loot | BodyCategory::Pickup => CategoryMask::NONE,
        }
    }
}

/// Everything the arena owns. Arena teardown despawns all of these.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ArenaEntity;
