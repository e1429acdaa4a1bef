//! Input/UI contract: the host pushes intents, the core never polls devices.

use bevy::prelude::*;

use crate::components::{Lifecycle, MovementTuning, Player, Position, Reticle, Velocity};

/// Trigger held this step. Sent every step while held; the weapon's fire-rate
/// gate decides whether a projectile actually spawns.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireCommand {
    pub wielder: Entity,
}

/// Inventory slot clicked in the UI
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotClick {
    pub owner: Entity,
    pub slot_index: usize,
}

/// Desired move direction (WASD), zero = stop
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerMoveIntent {
    pub player: Entity,
    pub direction: Vec2,
}

/// Reticle follows the pointer
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AimIntent {
    pub reticle: Entity,
    pub position: Vec2,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseIntent {
    pub paused: bool,
}

/// Host tears the arena (scene) down early
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeardownArena;

/// Run the death sequence on an actor regardless of its health
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillIntent {
    pub entity: Entity,
}

/// System: WASD → player velocity
pub fn apply_move_intents(
    mut intents: EventReader<PlayerMoveIntent>,
    mut players: Query<(&MovementTuning, &Lifecycle, &mut Velocity), With<Player>>,
) {
    for intent in intents.read() {
        let Ok((tuning, lifecycle, mut velocity)) = players.get_mut(intent.player) else {
            continue;
        };

        if lifecycle.is_dead() {
            continue;
        }

        velocity.0 = intent.direction.normalize_or_zero() * tuning.speed;
    }
}

/// System: pointer → reticle position
pub fn apply_aim_intents(mut intents: EventReader<AimIntent>, mut reticles: Query<&mut Position, With<Reticle>>) {
    for intent in intents.read() {
        if let Ok(mut position) = reticles.get_mut(intent.reticle) {
            position.0 = intent.position;
        }
    }
}

/// System (Update): pausing virtual time freezes every fixed-step counter
pub fn apply_pause_intents(mut intents: EventReader<PauseIntent>, mut time: ResMut<Time<Virtual>>) {
    for intent in intents.read() {
        if intent.paused == time.is_paused() {
            continue;
        }

        if intent.paused {
            time.pause();
            crate::logger::log_info("⏸️ Simulation paused");
        } else {
            time.unpause();
            crate::logger::log_info("▶️ Simulation resumed");
        }
    }
}
