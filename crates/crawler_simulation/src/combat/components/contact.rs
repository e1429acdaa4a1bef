//! Body contact damage (enemy touches player)

use bevy::prelude::*;

use crate::combat::components::OverlapRetrigger;
use crate::combat::DamageDealer;

/// Enemy deals `damage` to the player on contact, at most once per
/// `retrigger.interval` per target.
#[derive(Component, Debug, Clone)]
pub struct EnemyContact {
    pub damage: u32,
    pub retrigger: OverlapRetrigger,
}

impl EnemyContact {
    pub fn new(damage: u32, interval: std::time::Duration) -> Self {
        Self {
            damage,
            retrigger: OverlapRetrigger::new(interval),
        }
    }
}

impl DamageDealer for EnemyContact {
    fn damage(&self) -> u32 {
        self.damage
    }
}
