//! AI module: enemy sense loop and motion
//!
//! Враг не думает каждый кадр: после activation delay он раз в
//! `update_speed_ms` опрашивает расстояние до игрока (`Sensable::sense`)
//! и выставляет скорость. Между опросами тело просто летит с drag.

use bevy::prelude::*;

pub mod components;
pub mod systems;

pub use components::{BehaviorState, EnemyBrain, MovementAction, Sensable, SenseResponse, Sensation};
pub use systems::{move_randomly, move_towards_player, sense_player_repeat, EnemySensed};

use crate::CombatSet;

/// AI Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. Sense — activation, sense polls (только по TaskFired)
/// 2. Motion — facing, drag + integration
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnemySensed>();

        app.add_systems(
            FixedUpdate,
            (
                (systems::activate_enemies, systems::poll_sensations)
                    .chain()
                    .in_set(CombatSet::Sense),
                (systems::update_facing, systems::integrate_motion)
                    .chain()
                    .in_set(CombatSet::Motion),
            ),
        );
    }
}
