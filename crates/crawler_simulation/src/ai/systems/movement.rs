//! Movement actions + motion integration.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::bridge::VisualCommand;
use crate::components::{Actor, Facing, Lifecycle, MovementTuning, Position, Velocity};

/// Push the velocity towards the player by `velocity_increment`, capped at `max_speed`.
///
/// A zero offset (enemy on top of the player) leaves the velocity unchanged.
pub fn move_towards_player(velocity: Vec2, offset: Vec2, tuning: &MovementTuning) -> Vec2 {
    let Some(direction) = offset.try_normalize() else {
        return velocity;
    };

    (velocity + direction * tuning.velocity_increment).clamp_length_max(tuning.max_speed)
}

/// Random heading in [0, 2π), magnitude `speed * speed_ratio`
pub fn move_randomly<R: Rng>(rng: &mut R, tuning: &MovementTuning, speed_ratio: f32) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    Vec2::from_angle(angle) * tuning.speed * speed_ratio
}

/// Drag then speed cap, for one step of `dt` seconds
pub fn apply_drag(velocity: Vec2, tuning: &MovementTuning, dt: f32) -> Vec2 {
    let speed = velocity.length();
    if speed <= f32::EPSILON {
        return Vec2::ZERO;
    }

    let slowed = (speed - tuning.drag * dt).max(0.0);
    (velocity / speed * slowed).clamp_length_max(tuning.max_speed)
}

/// System: integrate positions (Motion set)
///
/// Dead bodies do not move. Bodies without tuning move at constant velocity
/// (projectiles).
pub fn integrate_motion(
    mut bodies: Query<(&mut Position, &mut Velocity, Option<&MovementTuning>, Option<&Lifecycle>)>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (mut position, mut velocity, tuning, lifecycle) in bodies.iter_mut() {
        if lifecycle.is_some_and(Lifecycle::is_dead) {
            continue;
        }

        if let Some(tuning) = tuning {
            let dragged = apply_drag(velocity.0, tuning, dt);
            if dragged != velocity.0 {
                velocity.0 = dragged;
            }
        }

        if velocity.0 != Vec2::ZERO {
            position.0 += velocity.0 * dt;
        }
    }
}

/// System: sprite facing follows the horizontal velocity sign
///
/// Only a rightward velocity flips the sprite; standing still faces left.
pub fn update_facing(
    mut actors: Query<(Entity, &Velocity, &mut Facing, &Lifecycle), With<Actor>>,
    mut visuals: EventWriter<VisualCommand>,
) {
    for (entity, velocity, mut facing, lifecycle) in actors.iter_mut() {
        if lifecycle.is_dead() {
            continue;
        }

        let flip_x = velocity.0.x > 0.0;
        if facing.flip_x != flip_x {
            facing.flip_x = flip_x;
            visuals.write(VisualCommand::SetFacing { entity, flip_x });
        }
    }
}
