//! Trajectory math (pure, stateless)

use bevy::prelude::*;

/// Result of aiming from one point at another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    /// Unit vector (cos, sin), zero for a degenerate aim
    pub direction: Vec2,
    /// direction × speed
    pub velocity: Vec2,
    /// Sprite rotation in radians, always in [-π/2, π/2]
    pub rotation: f32,
    /// Sprite is mirrored when the shot does not travel right
    pub flip_x: bool,
}

impl Trajectory {
    pub const STILL: Trajectory = Trajectory {
        direction: Vec2::ZERO,
        velocity: Vec2::ZERO,
        rotation: 0.0,
        flip_x: false,
    };
}

/// Direction and speed-scaled velocity from `from` towards `to`.
///
/// Coincident (or non-finite) points have no direction: the result is a still
/// trajectory and a warning is logged. Never returns NaN.
pub fn aim(from: Vec2, to: Vec2, speed: f32) -> Trajectory {
    let offset = to - from;
    let length = offset.length();

    if !length.is_finite() || length <= f32::EPSILON || !speed.is_finite() {
        crate::logger::log_warning(&format!(
            "⚠️ Degenerate aim from {:?} to {:?} (speed {}), using zero velocity",
            from, to, speed
        ));
        return Trajectory::STILL;
    }

    let direction = offset / length;
    let velocity = direction * speed;
    let sine = direction.y.clamp(-1.0, 1.0);

    // Sprite art faces right: mirror it and invert the tilt otherwise
    let (rotation, flip_x) = if velocity.x > 0.0 {
        (sine.asin(), false)
    } else {
        (-sine.asin(), true)
    };

    Trajectory {
        direction,
        velocity,
        rotation,
        flip_x,
    }
}

/// Point `clearance` units away from `from` along `direction`
pub fn spawn_point(from: Vec2, direction: Vec2, clearance: f32) -> Vec2 {
    from + direction * clearance
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
