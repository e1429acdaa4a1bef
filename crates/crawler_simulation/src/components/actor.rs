//! Базовые компоненты акторов: Actor, Health, Lifecycle

use bevy::prelude::*;

use crate::components::{ArenaEntity, Position, Velocity};
use crate::tasks::ScheduledTasks;

/// Актор (игрок, враг): базовый компонент для живых существ
///
/// Автоматически добавляет Health, Position, Velocity, Lifecycle и
/// ScheduledTasks через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Position, Velocity, Lifecycle, ScheduledTasks, ArenaEntity)]
pub struct Actor {
    pub name: String,
}

impl Actor {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max, current never grows (no heal events in combat)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Returns true when this hit took the actor from alive to zero
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.current = self.current.saturating_sub(amount);
        was_alive && !self.is_alive()
    }
}

/// Alive → Dead is one-way. `mark_dead` is the death guard: only the first
/// caller gets `true` and runs the death sequence.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum Lifecycle {
    #[default]
    Alive,
    Dead,
}

impl Lifecycle {
    pub fn is_dead(&self) -> bool {
        matches!(self, Lifecycle::Dead)
    }

    pub fn mark_dead(&mut self) -> bool {
        match self {
            Lifecycle::Alive => {
                *self = Lifecycle::Dead;
                true
            }
            Lifecycle::Dead => false,
        }
    }
}

/// Маркер игрока
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Маркер врага (ogre и другие sensing акторы)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Enemy;

/// Aim point of the player (mouse position on the host side)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Position, ArenaEntity)]
pub struct Reticle;

/// Who the actor is aiming at (back-reference to a reticle or target entity)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Aim {
    pub reticle: Entity,
}

/// Breakable prop (crates, barrels). Takes damage, drops nothing.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Position, Lifecycle, ArenaEntity)]
pub struct Destructible;
