//! Collision categories
//!
//! ## Архитектура:
//! - **BodyCategory → CategoryMask:** на каком "слое" находится тело
//! - **CollisionCategories:** что projectile делает с каждым слоем
//!   (`hits` = урон один раз + блокирует, `overlaps` = проходит насквозь и
//!   повторяет урон с интервалом re-trigger)
//!
//! Detection itself is the host's job (see `bridge::world`).

use std::ops::{BitOr, BitOrAssign};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Category bits
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Reflect)]
#[serde(transparent)]
pub struct CategoryMask(pub u8);

impl CategoryMask {
    pub const NONE: CategoryMask = CategoryMask(0);
    pub const WALLS: CategoryMask = CategoryMask(0b0001);
    pub const ENEMIES: CategoryMask = CategoryMask(0b0010);
    pub const DESTRUCTIBLES: CategoryMask = CategoryMask(0b0100);
    pub const PLAYER: CategoryMask = CategoryMask(0b1000);

    pub fn intersects(&self, other: CategoryMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Для debug логов
    pub fn name(&self) -> &'static str {
        match *self {
            CategoryMask::WALLS => "Walls",
            CategoryMask::ENEMIES => "Enemies",
            CategoryMask::DESTRUCTIBLES => "Destructibles",
            CategoryMask::PLAYER => "Player",
            CategoryMask::NONE => "None",
            _ => "Mixed",
        }
    }
}

impl BitOr for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: CategoryMask) -> CategoryMask {
        CategoryMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for CategoryMask {
    fn bitor_assign(&mut self, rhs: CategoryMask) {
        self.0 |= rhs.0;
    }
}

// ============================================================================
// Per-weapon flags
// ============================================================================

/// What a contact with one category does to the projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPolicy {
    /// Apply damage once, then the projectile is stopped/destroyed
    Hit,
    /// Pass through, re-signal while overlapping
    Overlap,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
#[serde(default, deny_unknown_fields)]
pub struct CollisionCategories {
    pub hits: CategoryMask,
    pub overlaps: CategoryMask,
}

impl CollisionCategories {
    /// `hits` wins when a category is flagged both ways
    pub fn policy(&self, target: CategoryMask) -> ContactPolicy {
        if self.hits.intersects(target) {
            ContactPolicy::Hit
        } else if self.overlaps.intersects(target) {
            ContactPolicy::Overlap
        } else {
            ContactPolicy::Ignore
        }
    }
}
