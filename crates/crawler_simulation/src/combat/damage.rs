//! Damage contracts: Damageable / DamageDealer + combat events

use bevy::prelude::*;

use crate::components::Health;

/// Result of one `take_damage` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Survived { remaining: u32 },
    /// This hit crossed zero. Reported exactly once per actor.
    Killed,
    /// Health was already zero; nothing changed
    AlreadyDead,
}

/// Anything that can lose health
///
/// Pre: none (any amount, including 0).
/// Post: health never grows; `Killed` is returned by at most one call.
pub trait Damageable {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome;
    fn is_alive(&self) -> bool;
}

impl Damageable for Health {
    fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if !Health::is_alive(self) {
            return DamageOutcome::AlreadyDead;
        }

        if Health::take_damage(self, amount) {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Survived { remaining: self.current }
        }
    }

    fn is_alive(&self) -> bool {
        Health::is_alive(self)
    }
}

/// Anything that deals a fixed amount per hit
pub trait DamageDealer {
    fn damage(&self) -> u32;
}

/// Событие: урон нанесён (после применения к Health)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageDealt {
    /// Projectile or enemy that dealt the damage
    pub source: Entity,
    pub target: Entity,
    pub amount: u32,
    pub remaining: u32,
}

/// Событие: актор помечен мёртвым в этом тике, death sequence ещё не выполнен
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathTriggered {
    pub entity: Entity,
}
